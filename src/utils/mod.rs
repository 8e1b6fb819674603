//! Utility modules for error handling, configuration and process plumbing

pub mod args;
pub mod config;
pub mod error;
pub mod process;

// Re-export for convenience
pub use args::{parse_help_flags, render_command, sanitize_args, tokenize};
pub use config::{default_config_path, ResolverSettings, DEFAULT_DENYLIST};
pub use error::{ResolverError, ResolverResult, TOOL_NOT_INSTALLED};
pub use process::{run_with_timeout, ProcessOutput};
