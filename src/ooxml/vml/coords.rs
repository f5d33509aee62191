//! Local coordinate spaces declared through `coordsize` / `coordorigin`.
//!
//! A group maps its own box onto an arbitrary integer grid. Children then
//! express unit-less style numbers on that grid, and the resolver scales them
//! back to points with the unit basis computed here.

use crate::common::error::{Error, Result};
use crate::common::unit::EMUS_PER_PT;

/// Unit basis used when a node declares no `coordsize`.
pub const DEFAULT_UNIT: i64 = EMUS_PER_PT;

/// The declared local coordinate space of a group-base node.
///
/// # Example
///
/// ```
/// use vml_textbox::ooxml::vml::CoordinateSpace;
///
/// let space = CoordinateSpace::parse(Some("1000,800"), Some("-100,50")).unwrap();
/// assert_eq!(space.width_unit(), 900);
/// assert_eq!(space.height_unit(), 850);
///
/// assert_eq!(CoordinateSpace::default().width_unit(), 12700);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CoordinateSpace {
    size: Option<(i64, i64)>,
    origin: Option<(i64, i64)>,
}

impl CoordinateSpace {
    #[inline]
    pub fn new(size: Option<(i64, i64)>, origin: Option<(i64, i64)>) -> Self {
        Self { size, origin }
    }

    /// Build from the raw `coordsize` and `coordorigin` attribute values.
    pub fn parse(size: Option<&str>, origin: Option<&str>) -> Result<Self> {
        Ok(Self {
            size: size.map(|v| parse_pair("coordsize", v)).transpose()?,
            origin: origin.map(|v| parse_pair("coordorigin", v)).transpose()?,
        })
    }

    /// Declared `coordsize`.
    #[inline]
    pub fn size(&self) -> Option<(i64, i64)> {
        self.size
    }

    /// Declared `coordorigin`.
    #[inline]
    pub fn origin(&self) -> Option<(i64, i64)> {
        self.origin
    }

    /// Horizontal unit basis.
    #[inline]
    pub fn width_unit(&self) -> i64 {
        self.unit(|(x, _)| x)
    }

    /// Vertical unit basis.
    #[inline]
    pub fn height_unit(&self) -> i64 {
        self.unit(|(_, y)| y)
    }

    // The origin only counts once a size has been declared.
    fn unit(&self, axis: impl Fn((i64, i64)) -> i64) -> i64 {
        match (self.size, self.origin) {
            (None, _) => DEFAULT_UNIT,
            (Some(size), Some(origin)) => axis(origin) + axis(size),
            (Some(size), None) => axis(size),
        }
    }
}

/// Parse an `x,y` integer pair. An empty component counts as zero.
fn parse_pair(attribute: &str, value: &str) -> Result<(i64, i64)> {
    let invalid = || {
        Error::schema(format!(
            "{} must be a pair of integers, got '{}'",
            attribute, value
        ))
    };

    let mut parts = value.split(',');
    let (Some(x), Some(y), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(invalid());
    };

    let component = |raw: &str| -> Result<i64> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Ok(0);
        }
        atoi_simd::parse::<i64, false, false>(raw.as_bytes()).map_err(|_| invalid())
    };

    Ok((component(x)?, component(y)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_unit() {
        let space = CoordinateSpace::default();
        assert_eq!(space.width_unit(), 12700);
        assert_eq!(space.height_unit(), 12700);

        // An origin without a size is ignored.
        let space = CoordinateSpace::new(None, Some((10, 10)));
        assert_eq!(space.width_unit(), DEFAULT_UNIT);
    }

    #[test]
    fn test_size_only() {
        let space = CoordinateSpace::parse(Some("21600,10800"), None).unwrap();
        assert_eq!(space.width_unit(), 21600);
        assert_eq!(space.height_unit(), 10800);
    }

    #[test]
    fn test_size_and_origin() {
        let space = CoordinateSpace::parse(Some("1000,1000"), Some("200,-300")).unwrap();
        assert_eq!(space.size(), Some((1000, 1000)));
        assert_eq!(space.origin(), Some((200, -300)));
        assert_eq!(space.width_unit(), 1200);
        assert_eq!(space.height_unit(), 700);
    }

    #[test]
    fn test_pair_parsing() {
        assert_eq!(parse_pair("coordsize", " 10 , 20 ").unwrap(), (10, 20));
        assert_eq!(parse_pair("coordorigin", ",5").unwrap(), (0, 5));
        assert!(parse_pair("coordsize", "10").is_err());
        assert!(parse_pair("coordsize", "1,2,3").is_err());
        assert!(parse_pair("coordsize", "1.5,2").is_err());

        let err = CoordinateSpace::parse(Some("a,b"), None).unwrap_err();
        assert_eq!(
            err,
            Error::SchemaViolation("coordsize must be a pair of integers, got 'a,b'".to_string())
        );
    }
}
