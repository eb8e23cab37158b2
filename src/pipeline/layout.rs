//! Placement computation: fit one image inside the slide content box.
//!
//! The content box is fixed: 10″ × 6″, offset 1.5″ from the top, flush
//! left. The fit constrains exactly one dimension — whichever would scale
//! the image down further — and leaves the other free so the renderer
//! preserves the aspect ratio.
//!
//! ## Pixels as inches
//!
//! The ratios treat the image's pixel counts directly as inch counts, with
//! no DPI conversion. That is how the tool has always behaved, and because
//! both ratios share the same fictional unit the *comparison* (and thus
//! the chosen constraint) is exactly what a true-DPI computation would
//! pick. Changing it would silently re-letterbox existing decks, so it
//! stays.

use crate::error::Reddit2PptxError;
use crate::pptx::units::{Emu, EMU_PER_INCH};
use std::io::Cursor;
use tracing::debug;

/// Maximum picture width: 10 inches.
pub const MAX_PICTURE_WIDTH: Emu = Emu(9_144_000);
/// Maximum picture height: 6 inches.
pub const MAX_PICTURE_HEIGHT: Emu = Emu(5_486_400);
/// Fixed offset from the top of the slide: 1.5 inches, below the headline.
pub const PICTURE_TOP: Emu = Emu(1_371_600);
/// Fixed offset from the left edge: flush.
pub const PICTURE_LEFT: Emu = Emu(0);

/// The constrained dimension of a placement. Exactly one of width or
/// height is pinned; the other follows from the image's aspect ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FittedExtent {
    /// Width pinned to the box; height free.
    Width(Emu),
    /// Height pinned to the box; width free.
    Height(Emu),
}

/// Where and how large an image sits on its slide.
///
/// Immutable once computed; consumed once by the composer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub top: Emu,
    pub left: Emu,
    pub extent: FittedExtent,
}

impl Placement {
    /// Resolve the free dimension from the image's native aspect ratio.
    ///
    /// OOXML's `a:ext` needs both extents, so the composer calls this to
    /// fill in the dimension the fit left open, the same way a pptx
    /// renderer completes a width-only picture.
    pub fn resolve(&self, px_width: u32, px_height: u32) -> (Emu, Emu) {
        match self.extent {
            FittedExtent::Width(cx) => {
                let cy = (cx.0 as f64 * px_height as f64 / px_width as f64).round() as i64;
                (cx, Emu(cy))
            }
            FittedExtent::Height(cy) => {
                let cx = (cy.0 as f64 * px_width as f64 / px_height as f64).round() as i64;
                (Emu(cx), cy)
            }
        }
    }
}

/// Image formats the deck can embed. The URL filter only admits `.png`
/// and `.jpg`, so anything else here means the server lied about the
/// content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PictureFormat {
    Png,
    Jpeg,
}

impl PictureFormat {
    /// Part-name extension under `ppt/media/`.
    pub fn extension(self) -> &'static str {
        match self {
            PictureFormat::Png => "png",
            PictureFormat::Jpeg => "jpg",
        }
    }

    /// MIME content type for `[Content_Types].xml`.
    pub fn content_type(self) -> &'static str {
        match self {
            PictureFormat::Png => "image/png",
            PictureFormat::Jpeg => "image/jpeg",
        }
    }
}

/// Header-probed image properties: pixel dimensions and format.
#[derive(Debug, Clone, Copy)]
pub struct ProbedImage {
    pub width: u32,
    pub height: u32,
    pub format: PictureFormat,
}

/// Decode just enough of `bytes` to learn dimensions and format.
///
/// # Errors
/// [`Reddit2PptxError::UnsupportedImage`] when the bytes are not a
/// recognisable PNG or JPEG (corrupt download, HTML error page, or a URL
/// whose extension lied).
pub fn probe(bytes: &[u8]) -> Result<ProbedImage, Reddit2PptxError> {
    let reader = image::ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| Reddit2PptxError::UnsupportedImage {
            detail: e.to_string(),
        })?;

    let format = match reader.format() {
        Some(image::ImageFormat::Png) => PictureFormat::Png,
        Some(image::ImageFormat::Jpeg) => PictureFormat::Jpeg,
        Some(other) => {
            return Err(Reddit2PptxError::UnsupportedImage {
                detail: format!("decoded as {other:?}, only PNG and JPEG are supported"),
            })
        }
        None => {
            return Err(Reddit2PptxError::UnsupportedImage {
                detail: "bytes do not match any known image format".to_string(),
            })
        }
    };

    let (width, height) =
        reader
            .into_dimensions()
            .map_err(|e| Reddit2PptxError::UnsupportedImage {
                detail: e.to_string(),
            })?;

    debug!("Probed image: {}x{} px, {:?}", width, height, format);
    Ok(ProbedImage {
        width,
        height,
        format,
    })
}

/// Compute the placement for an image of the given pixel size.
///
/// Pure and deterministic. `widthRatio = 10/w`, `heightRatio = 6/h` (pixels
/// read as inches, see module docs); the smaller ratio wins and pins its
/// dimension, ties go to height.
pub fn compute_placement(px_width: u32, px_height: u32) -> Placement {
    let width_ratio = MAX_PICTURE_WIDTH.0 as f64 / (px_width as i64 * EMU_PER_INCH) as f64;
    let height_ratio = MAX_PICTURE_HEIGHT.0 as f64 / (px_height as i64 * EMU_PER_INCH) as f64;

    let extent = if width_ratio < height_ratio {
        FittedExtent::Width(MAX_PICTURE_WIDTH)
    } else {
        FittedExtent::Height(MAX_PICTURE_HEIGHT)
    };

    Placement {
        top: PICTURE_TOP,
        left: PICTURE_LEFT,
        extent,
    }
}
