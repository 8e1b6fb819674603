//! Data structures for stream resolution

use serde::{Deserialize, Serialize};

/// Desired output resolution of the calling pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoParameters {
    pub width: u32,
    pub height: u32,
}

impl VideoParameters {
    /// Both dimensions are clamped to at least 1
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width: width.max(1),
            height: height.max(1),
        }
    }

    /// Resolution used for the extractor's sort preference, never 0
    pub fn sort_resolution(&self) -> u32 {
        self.width.min(self.height).max(1)
    }
}

impl Default for VideoParameters {
    fn default() -> Self {
        Self::new(1280, 720)
    }
}

/// Direct stream URLs returned by the extractor
///
/// Both are `None` only when no link was given. For merged formats the
/// extractor prints a single URL and `audio` repeats `video`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamUrls {
    pub video: Option<String>,
    pub audio: Option<String>,
}

impl StreamUrls {
    pub fn empty() -> Self {
        Self::default()
    }

    /// True when video and audio come from the same stream
    pub fn is_merged(&self) -> bool {
        self.video.is_some() && self.video == self.audio
    }

    pub fn into_pair(self) -> (Option<String>, Option<String>) {
        (self.video, self.audio)
    }
}

impl From<StreamUrls> for (Option<String>, Option<String>) {
    fn from(urls: StreamUrls) -> Self {
        urls.into_pair()
    }
}
