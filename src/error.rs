//! Error types for the reddit2pptx library.
//!
//! A single fatal error enum: every failure aborts the run. There is no
//! partial-output mode — a deck is either written completely or not at all,
//! so there is nothing useful to recover from mid-run. Each variant carries
//! enough context for the CLI to print an actionable message and exit
//! non-zero.

use std::path::PathBuf;
use thiserror::Error;

/// All errors returned by the reddit2pptx library.
#[derive(Debug, Error)]
pub enum Reddit2PptxError {
    // ── Reddit API errors ─────────────────────────────────────────────────
    /// Reddit rejected the OAuth2 client-credentials handshake, or the
    /// credentials were missing from the environment.
    #[error("Reddit authentication failed: {detail}\nSet the client_id, client_secret, and user_agent environment variables (see https://www.reddit.com/prefs/apps).")]
    AuthenticationFailed { detail: String },

    /// The subreddit does not exist, is private, or is otherwise inaccessible.
    #[error("Subreddit 'r/{subreddit}' not found or not accessible")]
    SubredditNotFound { subreddit: String },

    /// The listing request failed for a reason other than a missing subreddit.
    #[error("Failed to list posts from 'r/{subreddit}': {reason}\nCheck your internet connection.")]
    ListingFailed { subreddit: String, reason: String },

    // ── Image errors ──────────────────────────────────────────────────────
    /// An image download returned a non-success status or the transport
    /// failed. Aborts the whole run — there is no per-image recovery.
    #[error("Failed to download image '{url}': {reason}")]
    ImageDownloadFailed { url: String, reason: String },

    /// Downloaded bytes could not be decoded as a PNG or JPEG image.
    #[error("Unsupported or corrupt image: {detail}")]
    UnsupportedImage { detail: String },

    // ── Deck errors ───────────────────────────────────────────────────────
    /// A slide layout was requested that the built-in template does not
    /// provide. Should not occur under normal configuration.
    #[error("Slide layout '{layout}' is not available in the built-in template")]
    LayoutUnavailable { layout: String },

    /// Assembling the .pptx package in memory failed (ZIP or XML error).
    #[error("Failed to assemble deck: {detail}")]
    DeckBuildFailed { detail: String },

    /// Could not persist the assembled deck to disk.
    #[error("Failed to write deck file '{path}': {source}")]
    DeckWriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ── Catch-all ─────────────────────────────────────────────────────────
    /// Unexpected internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}
