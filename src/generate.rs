//! End-to-end generation: subreddit in, `.pptx` out.

use crate::config::{GenerationConfig, RedditCredentials};
use crate::error::Reddit2PptxError;
use crate::output::{GenerationOutput, GenerationStats};
use crate::pipeline::fetch::fetch_slide_content;
use crate::pipeline::layout::{compute_placement, probe, PICTURE_LEFT, PICTURE_TOP};
use crate::pipeline::reddit::RedditClient;
use crate::pptx::Deck;
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tracing::info;

/// Generate a deck from the `limit` newest posts of `subreddit`.
///
/// Runs the full pipeline: authenticate, list, filter, download, lay out,
/// compose, save. All-or-nothing — the first failure at any stage aborts
/// the run and no output file is written (or, when overwriting, the old
/// file is left untouched).
///
/// The output lands at `<output_dir>/<title>.pptx`, defaulting to the
/// current directory and the subreddit name.
///
/// # Errors
/// Any [`Reddit2PptxError`]; see the per-stage functions for the mapping.
pub async fn generate(
    subreddit: &str,
    limit: u32,
    config: &GenerationConfig,
) -> Result<GenerationOutput, Reddit2PptxError> {
    if subreddit.is_empty() {
        return Err(Reddit2PptxError::InvalidConfig(
            "subreddit name must not be empty".to_string(),
        ));
    }
    if limit == 0 {
        return Err(Reddit2PptxError::InvalidConfig(
            "post limit must be at least 1".to_string(),
        ));
    }

    let total_start = Instant::now();
    let credentials = match &config.credentials {
        Some(c) => c.clone(),
        None => RedditCredentials::from_env()?,
    };

    // Fetch stage.
    let fetch_start = Instant::now();
    let client = RedditClient::connect(&credentials, config.api_timeout_secs).await?;
    let posts = client.newest_posts(subreddit, limit).await?;
    let posts_listed = posts.len();
    // Downloads get their own client: same user agent, looser timeout.
    let downloader = reqwest::Client::builder()
        .user_agent(&credentials.user_agent)
        .timeout(Duration::from_secs(config.download_timeout_secs))
        .build()
        .map_err(|e| Reddit2PptxError::Internal(format!("HTTP client build failed: {e}")))?;
    let batch = fetch_slide_content(&downloader, &posts).await?;
    let fetch_duration_ms = fetch_start.elapsed().as_millis() as u64;

    // Compose stage.
    let compose_start = Instant::now();
    let title = config.title.clone().unwrap_or_else(|| subreddit.to_string());
    let mut deck = Deck::new(&title, &config.description);
    for item in &batch.items {
        let probed = probe(&item.image)?;
        let placement = compute_placement(probed.width, probed.height);
        let (cx, cy) = placement.resolve(probed.width, probed.height);
        deck.push_picture(
            &item.title,
            item.image.clone(),
            probed.format,
            PICTURE_LEFT,
            PICTURE_TOP,
            cx,
            cy,
        );
    }

    let dir = config
        .output_dir
        .clone()
        .unwrap_or_else(|| PathBuf::from("."));
    let path = dir.join(format!("{title}.pptx"));
    deck.save(&path)?;
    let compose_duration_ms = compose_start.elapsed().as_millis() as u64;

    let stats = GenerationStats {
        posts_listed,
        posts_skipped: batch.skipped,
        images_downloaded: batch.items.len(),
        bytes_downloaded: batch.bytes_downloaded,
        slide_count: deck.slide_count(),
        fetch_duration_ms,
        compose_duration_ms,
        total_duration_ms: total_start.elapsed().as_millis() as u64,
    };
    info!(
        "Generated {} ({} slides in {} ms)",
        path.display(),
        stats.slide_count,
        stats.total_duration_ms
    );

    Ok(GenerationOutput { path, stats })
}

/// Blocking wrapper around [`generate`] for synchronous callers.
///
/// Spins up a current-thread Tokio runtime for the duration of the call.
/// Must not be invoked from inside an async context.
pub fn generate_sync(
    subreddit: &str,
    limit: u32,
    config: &GenerationConfig,
) -> Result<GenerationOutput, Reddit2PptxError> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| Reddit2PptxError::Internal(format!("failed to start runtime: {e}")))?;
    runtime.block_on(generate(subreddit, limit, config))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn zero_limit_is_rejected_before_any_network_io() {
        let config = GenerationConfig::builder().build().unwrap();
        let err = generate("pics", 0, &config).await.unwrap_err();
        assert!(matches!(err, Reddit2PptxError::InvalidConfig(_)));
    }

    #[tokio::test]
    async fn empty_subreddit_is_rejected() {
        let config = GenerationConfig::builder().build().unwrap();
        let err = generate("", 5, &config).await.unwrap_err();
        assert!(matches!(err, Reddit2PptxError::InvalidConfig(_)));
    }
}
