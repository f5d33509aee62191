//! VML `style` attribute parsing.
//!
//! VML positions and sizes shapes through a CSS-like declaration list:
//!
//! ```text
//! position:absolute;margin-left:12pt;margin-top:4.5pt;width:100pt;height:50pt;
//! mso-position-horizontal:center;mso-position-vertical-relative:page
//! ```
//!
//! Real documents are sloppy, so parsing is lenient: fragments without a
//! colon are skipped and a repeated property keeps its last value.

use crate::common::error::{Error, Result};
use smallvec::SmallVec;
use std::borrow::Cow;

/// Parsed declarations of a VML `style` attribute.
///
/// Property names are normalized on the way in: surrounding whitespace is
/// trimmed, ASCII letters are lower-cased and `-` becomes `_`, so
/// `mso-position-horizontal` and `mso_position_horizontal` address the same
/// entry. Lookups are normalized the same way.
///
/// # Example
///
/// ```
/// use vml_textbox::ooxml::vml::StyleMap;
///
/// let style = StyleMap::parse("width:100pt; margin-left:5pt;bogus;width:120pt");
/// assert_eq!(style.get("width"), Some("120pt"));
/// assert_eq!(style.get("margin_left"), Some("5pt"));
/// assert_eq!(style.get("bogus"), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StyleMap {
    entries: SmallVec<[(String, String); 8]>,
}

impl StyleMap {
    /// Parse a `key:value;key:value` declaration list.
    pub fn parse(style: &str) -> Self {
        let mut map = Self::default();
        for fragment in style.split(';') {
            let Some(colon) = memchr::memchr(b':', fragment.as_bytes()) else {
                continue;
            };
            let key = normalize_key(&fragment[..colon]);
            if key.is_empty() {
                continue;
            }
            map.insert(key.into_owned(), fragment[colon + 1..].trim().to_string());
        }
        map
    }

    fn insert(&mut self, key: String, value: String) {
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    /// Raw value of a property.
    ///
    /// A declaration with an empty value (`width:`) reads as absent.
    pub fn get(&self, key: &str) -> Option<&str> {
        let key = normalize_key(key);
        self.entries
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
            .filter(|v| !v.is_empty())
    }

    /// Whether a property is present with a non-empty value.
    #[inline]
    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Typed value of a geometric property.
    ///
    /// Returns `Ok(None)` when the property is absent and a
    /// [`Error::SchemaViolation`] when it is present but not numeric.
    pub fn length(&self, key: &str) -> Result<Option<StyleLength>> {
        self.get(key)
            .map(|raw| {
                StyleLength::parse(raw).map_err(|_| {
                    Error::schema(format!("style property '{}' has non-numeric value '{}'", key, raw))
                })
            })
            .transpose()
    }

    /// Number of distinct properties.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over normalized properties in first-declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl From<&str> for StyleMap {
    #[inline]
    fn from(style: &str) -> Self {
        Self::parse(style)
    }
}

fn normalize_key(key: &str) -> Cow<'_, str> {
    let key = key.trim();
    if key.bytes().any(|b| b == b'-' || b.is_ascii_uppercase()) {
        Cow::Owned(
            key.chars()
                .map(|c| if c == '-' { '_' } else { c.to_ascii_lowercase() })
                .collect(),
        )
    } else {
        Cow::Borrowed(key)
    }
}

/// A geometric style value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StyleLength {
    /// Absolute value with a `pt` suffix
    Points(f64),
    /// Bare number in the parent's local coordinate space
    Units(f64),
}

impl StyleLength {
    /// Parse `12.5pt` or `500`.
    pub fn parse(raw: &str) -> Result<Self> {
        let raw = raw.trim();
        let (number, points) = match raw.strip_suffix("pt") {
            Some(number) => (number.trim(), true),
            None => (raw, false),
        };
        let value: f64 = fast_float2::parse(number)
            .map_err(|_| Error::schema(format!("'{}' is not a number", raw)))?;
        Ok(if points {
            StyleLength::Points(value)
        } else {
            StyleLength::Units(value)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_basic() {
        let style = StyleMap::parse("width:100pt;height:50pt;left:10pt;top:5pt");
        assert_eq!(style.len(), 4);
        assert_eq!(style.get("width"), Some("100pt"));
        assert_eq!(style.get("top"), Some("5pt"));
        assert_eq!(style.get("right"), None);
    }

    #[test]
    fn test_lenient_fragments() {
        let style = StyleMap::parse(";;width;height:7pt; :9pt;top : 3pt ;");
        assert_eq!(style.len(), 2);
        assert_eq!(style.get("height"), Some("7pt"));
        assert_eq!(style.get("top"), Some("3pt"));
        assert_eq!(style.get("width"), None);
    }

    #[test]
    fn test_last_duplicate_wins() {
        let style = StyleMap::parse("position:relative;width:1pt;position:absolute");
        assert_eq!(style.get("position"), Some("absolute"));
        assert_eq!(style.iter().map(|(k, _)| k).collect::<Vec<_>>(), vec!["position", "width"]);
    }

    #[test]
    fn test_key_normalization() {
        let style = StyleMap::parse("Margin-Left:4pt;mso-position-vertical-relative:page");
        assert_eq!(style.get("margin_left"), Some("4pt"));
        assert_eq!(style.get("margin-left"), Some("4pt"));
        assert_eq!(style.get("mso_position_vertical_relative"), Some("page"));
    }

    #[test]
    fn test_empty_value_reads_as_absent() {
        let style = StyleMap::parse("width:10pt;width:");
        assert_eq!(style.get("width"), None);
        assert!(!style.contains("width"));
        assert_eq!(style.length("width").unwrap(), None);
    }

    #[test]
    fn test_value_colon_kept() {
        let style = StyleMap::parse("font-family:a:b");
        assert_eq!(style.get("font_family"), Some("a:b"));
    }

    #[test]
    fn test_style_length() {
        assert_eq!(StyleLength::parse("12.5pt").unwrap(), StyleLength::Points(12.5));
        assert_eq!(StyleLength::parse("-3 pt").unwrap(), StyleLength::Points(-3.0));
        assert_eq!(StyleLength::parse("500").unwrap(), StyleLength::Units(500.0));
        assert!(StyleLength::parse("1in").is_err());
        assert!(StyleLength::parse("pt").is_err());
    }

    #[test]
    fn test_length_error_names_property() {
        let style = StyleMap::parse("width:wide");
        match style.length("width") {
            Err(Error::SchemaViolation(msg)) => assert!(msg.contains("'width'")),
            other => panic!("expected schema violation, got {:?}", other),
        }
    }
}
