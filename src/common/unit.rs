//! Unit conversion utilities.
//!
//! Word drawings mix two length systems: modern DrawingML anchors speak in
//! English Metric Units (EMU) while legacy VML style strings speak in points
//! or in a shape-local coordinate space. This module holds the constants and
//! the [`Emu`] newtype that bridge them.

use crate::common::error::{Error, Result};
use std::fmt;
use std::str::FromStr;

pub const EMUS_PER_PT: i64 = 12_700;

#[inline]
pub fn pt_to_emu_f64(pt: f64) -> i64 {
    (pt * EMUS_PER_PT as f64).round() as i64
}

#[inline]
pub fn emu_to_pt_f64(emu: i64) -> f64 {
    emu as f64 / EMUS_PER_PT as f64
}

/// A length expressed in English Metric Units.
///
/// 12700 EMU make one point.
///
/// # Examples
///
/// ```
/// use vml_textbox::common::unit::Emu;
///
/// let offset: Emu = "914400".parse().unwrap();
/// assert_eq!(offset.value(), 914_400);
/// assert_eq!(offset.pt(), 72.0);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Emu(pub i64);

impl Emu {
    /// Create a new EMU length.
    #[inline]
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Build an EMU length from a point value, rounding to the nearest EMU.
    #[inline]
    pub fn from_pt(pt: f64) -> Self {
        Self(pt_to_emu_f64(pt))
    }

    /// Raw EMU count.
    #[inline]
    pub const fn value(self) -> i64 {
        self.0
    }

    /// Length in points.
    #[inline]
    pub fn pt(self) -> f64 {
        emu_to_pt_f64(self.0)
    }
}

impl From<i64> for Emu {
    #[inline]
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl From<Emu> for i64 {
    #[inline]
    fn from(value: Emu) -> Self {
        value.0
    }
}

impl FromStr for Emu {
    type Err = Error;

    /// Parse an integral EMU count as found in `x`, `y` and `wp:posOffset`.
    fn from_str(s: &str) -> Result<Self> {
        atoi_simd::parse::<i64, false, false>(s.trim().as_bytes())
            .map(Self)
            .map_err(|_| Error::schema(format!("'{}' is not a valid EMU value", s)))
    }
}

impl fmt::Display for Emu {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}emu", self.0)
    }
}
