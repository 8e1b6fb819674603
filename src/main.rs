//! ytresolve - resolve YouTube links into direct stream URLs
//!
//! Thin command-line front end over the library: prints the video and audio
//! URLs yt-dlp selects for each link.

use anyhow::{Context, Result};
use clap::Parser;
use futures::future::join_all;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use ytresolve::extractor::{self, VideoParameters, YtDlpResolver};
use ytresolve::utils::{ResolverError, ResolverSettings, TOOL_NOT_INSTALLED};

#[derive(Parser)]
#[command(name = "ytresolve", version, about)]
struct Args {
    /// Links to resolve
    links: Vec<String>,

    /// Desired output width
    #[arg(long, default_value_t = 1280)]
    width: u32,

    /// Desired output height
    #[arg(long, default_value_t = 720)]
    height: u32,

    /// Extra yt-dlp arguments, as one shell-quoted string
    #[arg(long, allow_hyphen_values = true)]
    extra: Option<String>,

    /// Path to the yt-dlp binary
    #[arg(long)]
    binary: Option<PathBuf>,

    /// Timeout per link in seconds
    #[arg(long)]
    timeout: Option<u64>,

    /// Settings file (JSON)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print results as JSON lines
    #[arg(long)]
    json: bool,

    /// Only check whether links are recognized, do not run yt-dlp
    #[arg(long)]
    check: bool,

    /// Print the yt-dlp version and exit
    #[arg(long)]
    version_check: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    if args.check {
        let mut all_valid = true;
        for link in &args.links {
            let valid = extractor::is_valid(link);
            all_valid &= valid;
            println!("{}\t{}", if valid { "valid" } else { "invalid" }, link);
        }
        std::process::exit(if all_valid { 0 } else { 1 });
    }

    let resolver = YtDlpResolver::with_settings(load_settings(&args)?);

    if args.version_check {
        match resolver.version().await {
            Ok(version) => println!("yt-dlp {}", version),
            Err(ResolverError::ToolNotInstalled) => {
                print_install_hint();
                std::process::exit(1);
            }
            Err(e) => return Err(e).context("failed to query yt-dlp version"),
        }
        return Ok(());
    }

    if args.links.is_empty() {
        anyhow::bail!("no links given");
    }

    let params = VideoParameters::new(args.width, args.height);
    let extra = args.extra.as_deref();

    let results = join_all(
        args.links
            .iter()
            .map(|link| resolver.extract(Some(link.as_str()), &params, extra)),
    )
    .await;

    let mut failed = false;
    for (link, result) in args.links.iter().zip(results) {
        match result {
            Ok(urls) if args.json => {
                let line = serde_json::json!({ "link": link, "video": urls.video, "audio": urls.audio });
                println!("{}", line);
            }
            Ok(urls) => {
                println!("{}", link);
                println!("  video: {}", urls.video.unwrap_or_default());
                println!("  audio: {}", urls.audio.unwrap_or_default());
            }
            Err(ResolverError::ToolNotInstalled) => {
                print_install_hint();
                std::process::exit(1);
            }
            Err(e) => {
                failed = true;
                eprintln!("{}: could not extract a stream: {}", link, e.to_string().trim());
            }
        }
    }

    if failed {
        std::process::exit(1);
    }
    Ok(())
}

fn load_settings(args: &Args) -> Result<ResolverSettings> {
    let mut settings = match &args.config {
        Some(path) => ResolverSettings::load(path)?,
        None => ResolverSettings::load_or_default()?,
    };

    if let Some(binary) = &args.binary {
        settings.binary = binary.clone();
    } else if settings.binary == ResolverSettings::default().binary {
        // Launched outside a shell, PATH may not include user-installed tools
        if let Ok(detected) = YtDlpResolver::detect() {
            settings.binary = detected.settings().binary.clone();
        }
    }
    if let Some(timeout) = args.timeout {
        settings.timeout_secs = timeout.max(1);
    }

    Ok(settings)
}

fn print_install_hint() {
    eprintln!("{}", TOOL_NOT_INSTALLED);
    eprintln!("Please install yt-dlp:");
    eprintln!("  pip install yt-dlp");
    eprintln!("  or: brew install yt-dlp");
    eprintln!("  or visit: https://github.com/yt-dlp/yt-dlp");
}
