//! # reddit2pptx
//!
//! Turn a subreddit's newest image posts into a PowerPoint deck.
//!
//! The pipeline authenticates against the Reddit API, lists the newest
//! posts of a subreddit, keeps the ones whose URL points at a PNG or JPEG,
//! downloads each image, and composes a `.pptx`: a title slide followed by
//! one picture slide per post, oldest post first so the deck reads
//! chronologically.
//!
//! ```text
//! subreddit ──▶ OAuth2 + listing ──▶ filter + download ──▶ fit ──▶ .pptx
//! ```
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use reddit2pptx::{generate, GenerationConfig, RedditCredentials};
//!
//! # async fn run() -> Result<(), reddit2pptx::Reddit2PptxError> {
//! let config = GenerationConfig::builder()
//!     .credentials(RedditCredentials::new("id", "secret", "my-app/0.1"))
//!     .description("the five newest posts")
//!     .build()?;
//!
//! let output = generate("earthporn", 5, &config).await?;
//! println!("wrote {} ({} slides)", output.path.display(), output.stats.slide_count);
//! # Ok(())
//! # }
//! ```
//!
//! Credentials may instead come from the `client_id`, `client_secret`, and
//! `user_agent` environment variables; see
//! [`RedditCredentials::from_env`].
//!
//! ## Failure model
//!
//! Generation is all-or-nothing: the first failure at any stage aborts the
//! run with a [`Reddit2PptxError`], and no partial output file is ever left
//! behind — the package is assembled fully in memory and persisted with a
//! write-then-rename.

pub mod config;
pub mod error;
pub mod generate;
pub mod output;
pub mod pipeline;
pub mod pptx;

pub use config::{GenerationConfig, GenerationConfigBuilder, RedditCredentials};
pub use error::Reddit2PptxError;
pub use generate::{generate, generate_sync};
pub use output::{GenerationOutput, GenerationStats};
