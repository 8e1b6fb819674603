//! Error handling for ytresolve

use std::time::Duration;
use thiserror::Error;

/// Message reported when the extractor binary cannot be launched
pub const TOOL_NOT_INSTALLED: &str = "yt-dlp is not installed on your system";

/// Main error type for ytresolve
#[derive(Debug, Error)]
pub enum ResolverError {
    #[error("{}", TOOL_NOT_INSTALLED)]
    ToolNotInstalled,

    #[error("{0}")]
    ExtractionFailed(String),

    #[error("yt-dlp timed out after {}s", .0.as_secs_f64())]
    Timeout(Duration),

    #[error("Invalid extra arguments: {0}")]
    InvalidArguments(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl ResolverError {
    /// True for failures reported by the extractor itself
    pub fn is_extraction_failure(&self) -> bool {
        matches!(self, ResolverError::ExtractionFailed(_))
    }
}

pub type ResolverResult<T> = Result<T, ResolverError>;
