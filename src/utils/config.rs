//! Resolver configuration

use crate::utils::error::{ResolverError, ResolverResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Flags callers may not override through extra arguments
pub const DEFAULT_DENYLIST: [&str; 4] = ["-f", "-g", "--no-warnings", "--extractor-args"];

/// Resolver settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverSettings {
    /// Extractor binary, a bare name is looked up on PATH at spawn time
    pub binary: PathBuf,

    /// Wall-clock limit for one extractor run (seconds)
    pub timeout_secs: u64,

    /// Flags stripped from caller-supplied arguments
    pub denylist: Vec<String>,

    /// Drop caller flags that `<binary> --help` does not list
    pub probe_flags: bool,
}

impl Default for ResolverSettings {
    fn default() -> Self {
        Self {
            binary: PathBuf::from("yt-dlp"),
            timeout_secs: 20,
            denylist: DEFAULT_DENYLIST.iter().map(|s| s.to_string()).collect(),
            probe_flags: false,
        }
    }
}

impl ResolverSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Load settings from a JSON file; missing fields fall back to defaults
    pub fn load(path: &Path) -> ResolverResult<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| ResolverError::Config(format!("{}: {}", path.display(), e)))?;
        let mut settings: ResolverSettings = serde_json::from_str(&raw)
            .map_err(|e| ResolverError::Config(format!("{}: {}", path.display(), e)))?;

        // Enforce sane minimums
        if settings.timeout_secs == 0 {
            settings.timeout_secs = 1;
        }

        Ok(settings)
    }

    /// Load from the default location, or defaults when no file exists there
    pub fn load_or_default() -> ResolverResult<Self> {
        let path = default_config_path();
        if path.is_file() {
            Self::load(&path)
        } else {
            Ok(Self::default())
        }
    }
}

/// Returns the settings file path
/// - macOS: ~/Library/Application Support/ytresolve/settings.json
/// - Windows: %APPDATA%\ytresolve\settings.json
/// - Linux: ~/.config/ytresolve/settings.json
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("ytresolve")
        .join("settings.json")
}
