//! OOXML length units.
//!
//! DrawingML measures everything in English Metric Units: 914 400 EMU to
//! the inch. Font sizes in run properties use hundredths of a point.

/// EMU per inch.
pub const EMU_PER_INCH: i64 = 914_400;

/// A length in English Metric Units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Emu(pub i64);

/// Font size in hundredths of a point, as used by `a:defRPr sz="..."`.
pub fn centipoints(points: u32) -> u32 {
    points * 100
}
