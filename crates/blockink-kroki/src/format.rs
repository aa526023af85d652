//! Supported output formats.

use std::str::FromStr;

/// Image format requested from the rendering server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Png,
    Svg,
}

impl OutputFormat {
    /// URL path segment for this format.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Svg => "svg",
        }
    }

    /// Content type of the rendered image.
    pub fn content_type(self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Svg => "image/svg+xml",
        }
    }

    /// Whether the rendered image is binary (needs base64 transport).
    pub fn is_binary(self) -> bool {
        matches!(self, Self::Png)
    }
}

/// Requested format is not one of the supported values.
#[derive(Debug, thiserror::Error)]
#[error("unsupported output format: {0:?}")]
pub struct UnknownFormat(pub String);

impl FromStr for OutputFormat {
    type Err = UnknownFormat;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "png" => Ok(Self::Png),
            "svg" => Ok(Self::Svg),
            other => Err(UnknownFormat(other.to_owned())),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn parses_supported_formats() {
        assert_eq!("png".parse::<OutputFormat>().unwrap(), OutputFormat::Png);
        assert_eq!("svg".parse::<OutputFormat>().unwrap(), OutputFormat::Svg);
    }

    #[test]
    fn rejects_everything_else() {
        for value in ["bmp", "PNG", "", "jpeg", "svgz"] {
            assert!(value.parse::<OutputFormat>().is_err(), "accepted {value:?}");
        }
    }

    #[test]
    fn content_types_and_transport() {
        assert_eq!(OutputFormat::Png.content_type(), "image/png");
        assert_eq!(OutputFormat::Svg.content_type(), "image/svg+xml");
        assert!(OutputFormat::Png.is_binary());
        assert!(!OutputFormat::Svg.is_binary());
    }
}
