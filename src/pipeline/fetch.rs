//! Image-post filtering, download, and slide ordering.
//!
//! The listing arrives newest-first. Filtering and downloading preserve
//! that order; [`oldest_first`] reverses the fully-downloaded batch at the
//! end so the deck reads chronologically. Downloads are strictly
//! sequential and fully buffered — a deck run fetches a handful of images,
//! so there is nothing to gain from interleaving, and one failed download
//! aborts the whole run by design.

use crate::error::Reddit2PptxError;
use crate::pipeline::reddit::RedditPost;
use bytes::Bytes;
use tracing::{debug, info};

/// One downloaded image paired with its post title, ready for a slide.
#[derive(Debug, Clone)]
pub struct SlideContent {
    /// Raw image bytes, exactly as served.
    pub image: Bytes,
    /// The post title, used as the slide headline.
    pub title: String,
}

/// Outcome of the fetch stage.
#[derive(Debug)]
pub struct FetchedBatch {
    /// Downloaded items, oldest post first.
    pub items: Vec<SlideContent>,
    /// Posts skipped because their URL failed [`is_image_url`].
    pub skipped: usize,
    /// Total bytes buffered across all downloads.
    pub bytes_downloaded: u64,
}

/// Does this URL point at an image we can place on a slide?
///
/// The test is deliberately literal: the URL must end in `.png` or `.jpg`,
/// case-sensitively, with no query-string stripping. `.jpeg`, `.PNG`, and
/// `x.png?width=640` all fail. Loosening this changes which posts make it
/// into existing users' decks.
pub fn is_image_url(url: &str) -> bool {
    url.ends_with(".png") || url.ends_with(".jpg")
}

/// Filter a listing down to image posts, keeping order.
///
/// Returns the qualifying posts and the skipped count. Skipping is silent
/// (debug-logged), never an error — text posts and link posts are expected
/// in any subreddit.
pub fn image_posts(posts: &[RedditPost]) -> (Vec<&RedditPost>, usize) {
    let mut qualifying = Vec::with_capacity(posts.len());
    let mut skipped = 0;
    for post in posts {
        if is_image_url(&post.url) {
            qualifying.push(post);
        } else {
            debug!("Skipping non-image post '{}' ({})", post.title, post.url);
            skipped += 1;
        }
    }
    (qualifying, skipped)
}

/// Reverse a newest-first batch into slide order (oldest first).
pub fn oldest_first(mut items: Vec<SlideContent>) -> Vec<SlideContent> {
    items.reverse();
    items
}

/// Download every qualifying post's image, in listing order, then reverse
/// into slide order.
///
/// # Errors
/// [`Reddit2PptxError::ImageDownloadFailed`] on the first non-success
/// response or transport failure. All-or-nothing: no partial batch is ever
/// returned.
pub async fn fetch_slide_content(
    http: &reqwest::Client,
    posts: &[RedditPost],
) -> Result<FetchedBatch, Reddit2PptxError> {
    let (qualifying, skipped) = image_posts(posts);
    info!(
        "{} image posts to download ({} skipped)",
        qualifying.len(),
        skipped
    );

    let mut items = Vec::with_capacity(qualifying.len());
    let mut bytes_downloaded = 0u64;
    for post in qualifying {
        let image = download_image(http, &post.url).await?;
        debug!("Downloaded '{}' ({} bytes)", post.title, image.len());
        bytes_downloaded += image.len() as u64;
        items.push(SlideContent {
            image,
            title: post.title.clone(),
        });
    }

    Ok(FetchedBatch {
        items: oldest_first(items),
        skipped,
        bytes_downloaded,
    })
}

/// GET one image URL, fully buffering the body.
async fn download_image(http: &reqwest::Client, url: &str) -> Result<Bytes, Reddit2PptxError> {
    let response =
        http.get(url)
            .send()
            .await
            .map_err(|e| Reddit2PptxError::ImageDownloadFailed {
                url: url.to_string(),
                reason: e.to_string(),
            })?;

    if !response.status().is_success() {
        return Err(Reddit2PptxError::ImageDownloadFailed {
            url: url.to_string(),
            reason: format!("HTTP {}", response.status()),
        });
    }

    response
        .bytes()
        .await
        .map_err(|e| Reddit2PptxError::ImageDownloadFailed {
            url: url.to_string(),
            reason: e.to_string(),
        })
}
