use crate::extractor::models::{StreamUrls, VideoParameters};
use crate::utils::error::ResolverResult;
use async_trait::async_trait;

/// Core trait for link resolvers
///
/// This trait isolates the streaming pipeline from the specific way direct
/// stream URLs are obtained (yt-dlp subprocess, a native extractor, a fake
/// in tests).
#[async_trait]
pub trait LinkResolver: Send + Sync {
    /// Returns a unique identifier for this resolver (e.g., "yt-dlp")
    fn id(&self) -> &'static str;

    /// Checks if this resolver recognizes the given link
    fn supports(&self, link: &str) -> bool;

    /// Resolves `link` into direct video and audio stream URLs
    ///
    /// `None` for the link yields empty [`StreamUrls`] without doing any work.
    async fn resolve(
        &self,
        link: Option<&str>,
        params: &VideoParameters,
        add_commands: Option<&str>,
    ) -> ResolverResult<StreamUrls>;
}
