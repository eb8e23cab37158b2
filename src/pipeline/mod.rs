//! Pipeline stages for subreddit-to-deck generation.
//!
//! Each submodule implements exactly one stage. Keeping stages separate
//! makes each independently testable: the layout maths never touches the
//! network, and the fetch filtering/ordering rules are plain functions.
//!
//! ## Data Flow
//!
//! ```text
//! reddit ──▶ fetch ──▶ layout ──▶ pptx
//! (listing)  (filter+   (fit box)  (compose
//!            download)             + save)
//! ```
//!
//! 1. [`reddit`] — OAuth2 handshake and `/r/<sub>/new` listing
//! 2. [`fetch`]  — image-URL filter, sequential downloads, oldest-first
//!    reordering
//! 3. [`layout`] — pure placement computation for one image inside the
//!    fixed slide content box
//!
//! The composer itself lives in [`crate::pptx`], outside the pipeline: it
//! is a self-contained OOXML writer rather than a transformation step.

pub mod fetch;
pub mod layout;
pub mod reddit;
