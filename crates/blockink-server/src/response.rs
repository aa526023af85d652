//! Response framing: content type, transport encoding, fixed headers.

use std::collections::HashMap;
use std::string::FromUtf8Error;

use base64::Engine;
use base64::prelude::BASE64_STANDARD;
use blockink_kroki::OutputFormat;

use crate::proxy::ProxyResponse;

/// Rendered images must never be cached; the embed re-fetches on every view.
const CACHE_CONTROL: &str = "no-store, no-cache, must-revalidate, max-age=0";

/// Only the Notion editor origin may embed responses.
const ALLOW_ORIGIN: &str = "https://www.notion.so";

/// Frame rendered image bytes as the final response envelope.
///
/// PNG bytes travel base64-encoded with the transport flag set; SVG travels
/// as verbatim UTF-8 text. Invalid UTF-8 in an SVG body is an error, never a
/// lossy conversion.
pub(crate) fn assemble(
    image: Vec<u8>,
    format: OutputFormat,
) -> Result<ProxyResponse, FromUtf8Error> {
    let headers = HashMap::from([
        ("Content-Type".to_owned(), format.content_type().to_owned()),
        ("Cache-Control".to_owned(), CACHE_CONTROL.to_owned()),
        (
            "Access-Control-Allow-Origin".to_owned(),
            ALLOW_ORIGIN.to_owned(),
        ),
    ]);

    let body = if format.is_binary() {
        BASE64_STANDARD.encode(&image)
    } else {
        String::from_utf8(image)?
    };

    Ok(ProxyResponse {
        status: 200,
        headers,
        body,
        is_base64: format.is_binary(),
    })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn png_is_base64_with_binary_flag() {
        let response = assemble(vec![0x89, 0x50], OutputFormat::Png).unwrap();
        assert_eq!(response.status, 200);
        assert!(response.is_base64);
        assert_eq!(response.body, BASE64_STANDARD.encode([0x89, 0x50]));
    }

    #[test]
    fn svg_is_verbatim_with_text_flag() {
        let response = assemble(b"<svg/>".to_vec(), OutputFormat::Svg).unwrap();
        assert!(!response.is_base64);
        assert_eq!(response.body, "<svg/>");
    }

    #[test]
    fn fixed_headers_are_always_present() {
        for format in [OutputFormat::Png, OutputFormat::Svg] {
            let response = assemble(Vec::new(), format).unwrap();
            assert_eq!(
                response.headers.get("Cache-Control").map(String::as_str),
                Some(CACHE_CONTROL)
            );
            assert_eq!(
                response
                    .headers
                    .get("Access-Control-Allow-Origin")
                    .map(String::as_str),
                Some(ALLOW_ORIGIN)
            );
            assert_eq!(
                response.headers.get("Content-Type").map(String::as_str),
                Some(format.content_type())
            );
        }
    }

    #[test]
    fn invalid_utf8_svg_errors() {
        assert!(assemble(vec![0xFF, 0xFE], OutputFormat::Svg).is_err());
    }
}
