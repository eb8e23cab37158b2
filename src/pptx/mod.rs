//! Minimal .pptx composer.
//!
//! A deck is one title slide plus any number of picture slides, serialized
//! as an OPC (zip) package with hand-built OOXML parts. This writes the
//! narrow slice of PresentationML the generator needs; it is not a general
//! PowerPoint library.
//!
//! Serialization is all-in-memory ([`Deck::to_bytes`]); [`Deck::save`]
//! persists through a temp file + rename so a failed run never leaves a
//! partial `.pptx` behind.

pub mod template;
pub mod units;

mod package;
mod slide;

use crate::error::Reddit2PptxError;
use crate::pipeline::layout::PictureFormat;
use crate::pptx::units::Emu;
use bytes::Bytes;
use std::fs;
use std::path::Path;
use tracing::info;

/// A presentation under construction.
pub struct Deck {
    pub(crate) title: String,
    pub(crate) description: String,
    pub(crate) pictures: Vec<PictureSlide>,
}

/// One picture slide: headline, image bytes, and resolved geometry.
pub(crate) struct PictureSlide {
    pub(crate) title: String,
    pub(crate) image: Bytes,
    pub(crate) format: PictureFormat,
    pub(crate) left: Emu,
    pub(crate) top: Emu,
    pub(crate) cx: Emu,
    pub(crate) cy: Emu,
}

impl Deck {
    /// Start a deck whose opening slide shows `title` and `description`.
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            pictures: Vec::new(),
        }
    }

    /// Append a picture slide. Slides appear in insertion order after the
    /// title slide.
    #[allow(clippy::too_many_arguments)]
    pub fn push_picture(
        &mut self,
        title: impl Into<String>,
        image: Bytes,
        format: PictureFormat,
        left: Emu,
        top: Emu,
        cx: Emu,
        cy: Emu,
    ) {
        self.pictures.push(PictureSlide {
            title: title.into(),
            image,
            format,
            left,
            top,
            cx,
            cy,
        });
    }

    /// Total slide count, title slide included.
    pub fn slide_count(&self) -> usize {
        1 + self.pictures.len()
    }

    /// Serialize to .pptx bytes without touching the filesystem.
    ///
    /// # Errors
    /// [`Reddit2PptxError::DeckBuildFailed`] if package serialization fails.
    pub fn to_bytes(&self) -> Result<Vec<u8>, Reddit2PptxError> {
        package::deck_to_bytes(self)
    }

    /// Serialize and write to `path`, overwriting any existing file.
    ///
    /// The bytes land in a sibling temp file first and are renamed into
    /// place, so `path` either keeps its old contents or gets the complete
    /// new deck.
    ///
    /// # Errors
    /// [`Reddit2PptxError::DeckBuildFailed`] on serialization failure,
    /// [`Reddit2PptxError::DeckWriteFailed`] on any filesystem failure.
    pub fn save(&self, path: &Path) -> Result<(), Reddit2PptxError> {
        let bytes = self.to_bytes()?;

        let tmp = path.with_extension("pptx.tmp");
        let write_err = |source: std::io::Error| Reddit2PptxError::DeckWriteFailed {
            path: path.to_path_buf(),
            source,
        };

        fs::write(&tmp, &bytes).map_err(write_err)?;
        if let Err(e) = fs::rename(&tmp, path) {
            let _ = fs::remove_file(&tmp);
            return Err(write_err(e));
        }

        info!(
            "Saved {} slides ({} bytes) to {}",
            self.slide_count(),
            bytes.len(),
            path.display()
        );
        Ok(())
    }
}
