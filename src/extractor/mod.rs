pub mod link;
pub mod models;
pub mod traits;
pub mod ytdlp;

pub use link::{is_valid, video_id};
pub use models::{StreamUrls, VideoParameters};
pub use traits::LinkResolver;
pub use ytdlp::{find_ytdlp, parse_stream_urls, YtDlpResolver};
