//! Output types returned by a generation run.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Result of a successful generation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationOutput {
    /// Absolute or cwd-relative path of the written `.pptx` file.
    pub path: PathBuf,
    /// Counters and timings for the run.
    pub stats: GenerationStats,
}

/// Counters and timings collected during a generation run.
///
/// Purely informational — nothing in the pipeline branches on these. The
/// CLI prints a one-line summary from them; library callers can log or
/// serialise them.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GenerationStats {
    /// Posts returned by the listing request (before filtering).
    pub posts_listed: usize,
    /// Posts skipped because their URL did not look like an image.
    pub posts_skipped: usize,
    /// Images downloaded (equals the number of content slides).
    pub images_downloaded: usize,
    /// Total image payload buffered in memory, in bytes.
    pub bytes_downloaded: u64,
    /// Slides in the deck, including the title slide.
    pub slide_count: usize,
    /// Wall-clock time spent listing and downloading.
    pub fetch_duration_ms: u64,
    /// Wall-clock time spent laying out and serialising the deck.
    pub compose_duration_ms: u64,
    /// End-to-end wall-clock time.
    pub total_duration_ms: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stats_roundtrip_json() {
        let stats = GenerationStats {
            posts_listed: 5,
            posts_skipped: 2,
            images_downloaded: 3,
            bytes_downloaded: 1024,
            slide_count: 4,
            ..Default::default()
        };
        let json = serde_json::to_string(&stats).unwrap();
        let back: GenerationStats = serde_json::from_str(&json).unwrap();
        assert_eq!(back.posts_listed, 5);
        assert_eq!(back.slide_count, 4);
    }
}
