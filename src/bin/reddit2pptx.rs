//! CLI binary for reddit2pptx.
//!
//! A thin shim over the library crate that maps CLI flags to
//! `GenerationConfig` and prints a summary.

use anyhow::{Context, Result};
use clap::Parser;
use reddit2pptx::{generate, GenerationConfig, RedditCredentials};
use std::io;
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn dim(s: &str) -> String {
    format!("\x1b[2m{s}\x1b[0m")
}
fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # Five newest posts from r/earthporn into ./earthporn.pptx
  reddit2pptx --subreddit earthporn --limit 5

  # Custom deck title and subtitle
  reddit2pptx -s aww -l 10 --title "Cat tax" --description "the ten newest"

ENVIRONMENT VARIABLES:
  client_id       Reddit application client id
  client_secret   Reddit application client secret
  user_agent      User-agent string sent to Reddit

SETUP:
  1. Create a "script" app at https://www.reddit.com/prefs/apps
  2. Export the three variables above
  3. reddit2pptx --subreddit <name> --limit <n>
"#;

/// Generate a PowerPoint deck from a subreddit's newest image posts.
#[derive(Parser, Debug)]
#[command(
    name = "reddit2pptx",
    version,
    about = "Generate a PowerPoint deck from a subreddit's newest image posts",
    long_about = "Fetch the newest posts of a subreddit, keep the ones linking to a PNG or JPEG, \
and compose a .pptx: a title slide followed by one picture slide per post, oldest first.",
    arg_required_else_help = true,
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Subreddit to fetch from (without the r/ prefix).
    #[arg(short, long)]
    subreddit: String,

    /// How many of the newest posts to consider.
    #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..))]
    limit: u32,

    /// Deck title, also the output file stem. Default: the subreddit name.
    #[arg(short, long)]
    title: Option<String>,

    /// Subtitle text for the title slide.
    #[arg(short, long, default_value = "")]
    description: String,

    /// Timeout for Reddit API requests in seconds.
    #[arg(long, default_value_t = 30)]
    api_timeout: u64,

    /// Timeout per image download in seconds.
    #[arg(long, default_value_t = 60)]
    download_timeout: u64,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long)]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long)]
    quiet: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "error"
    } else {
        "info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    // ── Build config ─────────────────────────────────────────────────────
    let credentials =
        RedditCredentials::from_env().context("Reddit credentials are not configured")?;

    let mut builder = GenerationConfig::builder()
        .credentials(credentials)
        .description(&cli.description)
        .api_timeout_secs(cli.api_timeout)
        .download_timeout_secs(cli.download_timeout);
    if let Some(ref title) = cli.title {
        builder = builder.title(title);
    }
    let config = builder.build().context("Invalid configuration")?;

    // ── Run generation ───────────────────────────────────────────────────
    let output = generate(&cli.subreddit, cli.limit, &config)
        .await
        .context("Deck generation failed")?;

    if !cli.quiet {
        let s = &output.stats;
        eprintln!(
            "{}  {} slides  {}ms  →  {}",
            green("✔"),
            s.slide_count,
            s.total_duration_ms,
            bold(&output.path.display().to_string()),
        );
        eprintln!(
            "   {} posts listed  /  {} skipped  /  {} downloaded ({} bytes)",
            dim(&s.posts_listed.to_string()),
            dim(&s.posts_skipped.to_string()),
            dim(&s.images_downloaded.to_string()),
            dim(&s.bytes_downloaded.to_string()),
        );
    }

    Ok(())
}
