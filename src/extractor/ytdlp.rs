//! yt-dlp wrapper for stream URL resolution
//!
//! Runs `yt-dlp -g` with a fixed format selector and reads back one or two
//! direct URLs. Callers may pass extra command-line text; it is sanitized so
//! it cannot replace the flags this module depends on.

use crate::extractor::link;
use crate::extractor::models::{StreamUrls, VideoParameters};
use crate::extractor::traits::LinkResolver;
use crate::utils::args::{parse_help_flags, render_command, sanitize_args, tokenize};
use crate::utils::config::ResolverSettings;
use crate::utils::error::{ResolverError, ResolverResult};
use crate::utils::process::run_with_timeout;
use async_trait::async_trait;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, warn};

/// Best VP9 or H.264 video plus m4a audio, else the best merged format
pub const FORMAT_SELECTOR: &str = "bestvideo[vcodec~='(vp09|avc1)']+m4a/best";

/// Skips the login check yt-dlp performs for channel tabs
pub const EXTRACTOR_ARGS: &str = "youtubetab:skip=authcheck";

/// Resolves links to direct stream URLs using yt-dlp
#[derive(Debug, Clone, Default)]
pub struct YtDlpResolver {
    settings: ResolverSettings,
}

impl YtDlpResolver {
    /// Resolver with default settings (`yt-dlp` looked up on PATH, 20s timeout)
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_settings(settings: ResolverSettings) -> Self {
        Self { settings }
    }

    /// Build a resolver around the first yt-dlp binary found on this system
    pub fn detect() -> ResolverResult<Self> {
        match find_ytdlp() {
            Some(path) => {
                info!("Found yt-dlp at: {}", path.display());
                Ok(Self::with_settings(ResolverSettings {
                    binary: path,
                    ..Default::default()
                }))
            }
            None => {
                error!("yt-dlp not found anywhere!");
                Err(ResolverError::ToolNotInstalled)
            }
        }
    }

    pub fn settings(&self) -> &ResolverSettings {
        &self.settings
    }

    /// Get the path to yt-dlp being used
    pub fn binary(&self) -> &Path {
        &self.settings.binary
    }

    /// Returns true if `link` is a recognized YouTube link
    pub fn is_valid(link: &str) -> bool {
        link::is_valid(link)
    }

    /// Assemble the argument list (without the program name)
    ///
    /// `extra` must already be sanitized; it is placed between the fixed
    /// flags and the link.
    pub fn build_args(&self, link: &str, params: &VideoParameters, extra: &[String]) -> Vec<String> {
        let mut args: Vec<String> = vec![
            "-g".into(),
            "-f".into(),
            FORMAT_SELECTOR.into(),
            "-S".into(),
            format!("res:{}", params.sort_resolution()),
            "--no-warnings".into(),
            "--extractor-args".into(),
            EXTRACTOR_ARGS.into(),
        ];
        args.extend(extra.iter().cloned());
        args.push(link.to_string());
        args
    }

    /// Resolve direct video and audio URLs for `link`
    ///
    /// Uses: yt-dlp -g -f <selector> -S res:<n> --no-warnings --extractor-args ... <link>
    pub async fn extract(
        &self,
        link: Option<&str>,
        params: &VideoParameters,
        add_commands: Option<&str>,
    ) -> ResolverResult<StreamUrls> {
        let Some(link) = link else {
            return Ok(StreamUrls::empty());
        };

        let extra = match add_commands {
            Some(text) if !text.trim().is_empty() => self.extra_args(text).await?,
            _ => Vec::new(),
        };

        let args = self.build_args(link, params, &extra);
        debug!(
            "Running with \"{}\" command",
            render_command(&self.binary().to_string_lossy(), &args)
        );

        let output = run_with_timeout(self.binary(), &args, self.settings.timeout()).await?;

        if !output.success() {
            error!("yt-dlp extraction failed: {}", output.stderr.trim());
            return Err(ResolverError::ExtractionFailed(output.stderr));
        }

        parse_stream_urls(&output.stdout)
    }

    /// Tokenize and sanitize caller-supplied arguments
    async fn extra_args(&self, text: &str) -> ResolverResult<Vec<String>> {
        let tokens = tokenize(text)?;

        let supported = if self.settings.probe_flags {
            match self.supported_flags().await {
                Ok(flags) => Some(flags),
                Err(e) => {
                    warn!("Could not read yt-dlp options, using denylist only: {}", e);
                    None
                }
            }
        } else {
            None
        };

        Ok(sanitize_args(&tokens, &self.settings.denylist, supported.as_ref()))
    }

    /// Flags listed by `yt-dlp --help`
    pub async fn supported_flags(&self) -> ResolverResult<HashSet<String>> {
        let output = run_with_timeout(self.binary(), ["--help"], self.settings.timeout()).await?;
        if !output.success() {
            return Err(ResolverError::ExtractionFailed(output.stderr));
        }

        let flags = parse_help_flags(&output.stdout);
        if flags.is_empty() {
            return Err(ResolverError::ExtractionFailed(
                "yt-dlp --help listed no options".to_string(),
            ));
        }
        Ok(flags)
    }

    /// Version string reported by `yt-dlp --version`
    pub async fn version(&self) -> ResolverResult<String> {
        let output = run_with_timeout(self.binary(), ["--version"], self.settings.timeout()).await?;
        if !output.success() {
            return Err(ResolverError::ExtractionFailed(output.stderr));
        }
        Ok(output.stdout.trim().to_string())
    }
}

#[async_trait]
impl LinkResolver for YtDlpResolver {
    fn id(&self) -> &'static str {
        "yt-dlp"
    }

    fn supports(&self, link: &str) -> bool {
        link::is_valid(link)
    }

    async fn resolve(
        &self,
        link: Option<&str>,
        params: &VideoParameters,
        add_commands: Option<&str>,
    ) -> ResolverResult<StreamUrls> {
        self.extract(link, params, add_commands).await
    }
}

/// Parse `yt-dlp -g` output: first line video, optional second line audio
pub fn parse_stream_urls(stdout: &str) -> ResolverResult<StreamUrls> {
    let mut lines = stdout.trim().lines().map(str::trim_end);

    let video = match lines.next() {
        Some(first) if !first.is_empty() => first.to_string(),
        _ => return Err(ResolverError::ExtractionFailed("No video URLs found".to_string())),
    };
    let audio = lines.next().map(str::to_string).unwrap_or_else(|| video.clone());

    Ok(StreamUrls {
        video: Some(video),
        audio: Some(audio),
    })
}

// ============================================================
// yt-dlp Detection Functions
// ============================================================

/// Find yt-dlp binary with priority:
/// 1. Next to the current executable
/// 2. System PATH
/// 3. Common installation paths
pub fn find_ytdlp() -> Option<PathBuf> {
    if let Some(local) = find_beside_executable() {
        info!("Using yt-dlp next to executable: {:?}", local);
        return Some(local);
    }

    if let Some(system) = find_in_path() {
        info!("Using system yt-dlp: {:?}", system);
        return Some(system);
    }

    if let Some(common) = find_in_common_paths() {
        info!("Using yt-dlp from common path: {:?}", common);
        return Some(common);
    }

    warn!("yt-dlp not found anywhere!");
    None
}

fn find_beside_executable() -> Option<PathBuf> {
    let exe_path = std::env::current_exe().ok()?;
    let exe_dir = exe_path.parent()?;

    let candidate = exe_dir.join(binary_file_name());
    debug!("Checking {:?}", candidate);
    if candidate.is_file() && is_executable(&candidate) {
        return Some(candidate);
    }

    None
}

/// Find yt-dlp in system PATH using `which`
fn find_in_path() -> Option<PathBuf> {
    which::which("yt-dlp").ok().filter(|path| path.exists())
}

/// Find yt-dlp in common installation paths
fn find_in_common_paths() -> Option<PathBuf> {
    let common_paths = [
        // macOS Homebrew (Apple Silicon)
        "/opt/homebrew/bin/yt-dlp",
        // macOS Homebrew (Intel)
        "/usr/local/bin/yt-dlp",
        // System
        "/usr/bin/yt-dlp",
        // pip --user
        "~/.local/bin/yt-dlp",
    ];

    for path_str in common_paths {
        let expanded = match path_str.strip_prefix("~/") {
            Some(rest) => match dirs::home_dir() {
                Some(home) => home.join(rest),
                None => continue,
            },
            None => PathBuf::from(path_str),
        };

        if expanded.is_file() && is_executable(&expanded) {
            return Some(expanded);
        }
    }

    None
}

fn binary_file_name() -> &'static str {
    if cfg!(windows) {
        "yt-dlp.exe"
    } else {
        "yt-dlp"
    }
}

/// Check if a file is executable
fn is_executable(path: &Path) -> bool {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;

        std::fs::metadata(path)
            .map(|metadata| metadata.permissions().mode() & 0o111 != 0)
            .unwrap_or(false)
    }

    #[cfg(not(unix))]
    {
        // On Windows, just check if file exists
        path.exists()
    }
}

// ============================================================
// Tests
// ============================================================
