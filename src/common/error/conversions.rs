//! Error conversion implementations.
//!
//! This module contains From trait implementations to convert errors raised by
//! the XML reader into the unified Error type.

use super::types::Error;

impl From<quick_xml::Error> for Error {
    fn from(err: quick_xml::Error) -> Self {
        Error::Xml(err.to_string())
    }
}

impl From<quick_xml::events::attributes::AttrError> for Error {
    fn from(err: quick_xml::events::attributes::AttrError) -> Self {
        Error::Xml(format!("Attribute error: {}", err))
    }
}

impl From<std::str::Utf8Error> for Error {
    fn from(err: std::str::Utf8Error) -> Self {
        Error::Xml(format!("UTF-8 conversion error: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_utf8_error_maps_to_xml() {
        let bytes = [0x66, 0x6f, 0xff];
        let err: Error = std::str::from_utf8(&bytes).unwrap_err().into();
        assert!(matches!(err, Error::Xml(msg) if msg.starts_with("UTF-8")));
    }

    #[test]
    fn test_display() {
        let err = Error::schema("<v:rect> is missing required attribute 'style'");
        assert_eq!(
            err.to_string(),
            "Schema violation: <v:rect> is missing required attribute 'style'"
        );

        let err = Error::unexpected("w:txbxContent", "v:rect");
        assert_eq!(
            err.to_string(),
            "Unexpected node: expected w:txbxContent, got v:rect"
        );
    }
}
