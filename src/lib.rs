//! ytresolve library
//!
//! Turns YouTube links into direct stream URLs for a media pipeline by
//! running yt-dlp.

pub mod extractor;
pub mod utils;

// Re-export main types for easier use
pub use extractor::{LinkResolver, StreamUrls, VideoParameters, YtDlpResolver};
pub use utils::{ResolverError, ResolverResult, ResolverSettings};
