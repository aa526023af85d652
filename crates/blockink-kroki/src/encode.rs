//! Token encoding for diagram-server URLs.
//!
//! Kept free of HTTP concerns so the encoding can be tested in isolation.
//! The diagram source is zlib-compressed at the highest level, then the
//! compressed bytes are re-encoded into a URL-safe token with the scheme
//! the targeted server expects.

use std::io::Write;

use base64::Engine;
use base64::prelude::BASE64_URL_SAFE;
use flate2::Compression;
use flate2::write::ZlibEncoder;

use crate::error::{DecodeError, RenderError};

/// The PlantUML token alphabet.
///
/// Same 6-bit packing as base64 but a different symbol order: digits first,
/// then uppercase, lowercase, `-` and `_`. No padding character exists.
const PLANTUML_ALPHABET: &[u8; 64] =
    b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz-_";

/// Token encoding expected by the targeted rendering server.
///
/// Fixed per deployment: a PlantUML server decodes only its own alphabet,
/// while Kroki accepts standard URL-safe base64 of the zlib stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenEncoding {
    /// PlantUML alphabet over the zlib stream, no padding.
    Plantuml,
    /// Padded URL-safe base64 over the zlib stream (Kroki).
    Base64Url,
}

/// Compress diagram source and encode it as a URL token.
///
/// Deterministic: the same source and encoding always produce the same token.
pub fn encode_diagram(source: &str, encoding: TokenEncoding) -> Result<String, RenderError> {
    let compressed = compress(source)?;
    let token = match encoding {
        TokenEncoding::Plantuml => encode_plantuml(&compressed),
        TokenEncoding::Base64Url => BASE64_URL_SAFE.encode(&compressed),
    };
    Ok(token)
}

/// zlib-compress the UTF-8 bytes of the source at the highest level.
fn compress(source: &str) -> Result<Vec<u8>, RenderError> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::best());
    encoder
        .write_all(source.as_bytes())
        .map_err(RenderError::Compress)?;
    encoder.finish().map_err(RenderError::Compress)
}

/// Encode bytes with the PlantUML alphabet.
///
/// Bytes are packed big-endian into 24-bit groups and emitted as 6-bit
/// slices, most significant first. A 2-byte tail emits 3 symbols and a
/// 1-byte tail emits 2; the token length is always `ceil(8n / 6)`.
pub fn encode_plantuml(data: &[u8]) -> String {
    let mut token = String::with_capacity(data.len().div_ceil(3) * 4);
    for chunk in data.chunks(3) {
        let group = (u32::from(chunk[0]) << 16)
            | chunk.get(1).map_or(0, |&b| u32::from(b) << 8)
            | chunk.get(2).map_or(0, |&b| u32::from(b));
        for slice in 0..=chunk.len() {
            let index = (group >> (18 - 6 * slice)) & 0x3F;
            token.push(char::from(PLANTUML_ALPHABET[index as usize]));
        }
    }
    token
}

/// Decode a PlantUML-alphabet token back to bytes.
pub fn decode_plantuml(token: &str) -> Result<Vec<u8>, DecodeError> {
    let mut data = Vec::with_capacity(token.len() / 4 * 3 + 2);
    for chunk in token.as_bytes().chunks(4) {
        // A lone trailing symbol carries fewer than 8 bits and cannot
        // come from the encoder.
        if chunk.len() == 1 {
            return Err(DecodeError::TruncatedGroup);
        }
        let mut group: u32 = 0;
        for (slice, &symbol) in chunk.iter().enumerate() {
            let value =
                symbol_value(symbol).ok_or(DecodeError::InvalidSymbol(char::from(symbol)))?;
            group |= u32::from(value) << (18 - 6 * slice);
        }
        data.push((group >> 16) as u8);
        if chunk.len() > 2 {
            data.push((group >> 8) as u8);
        }
        if chunk.len() > 3 {
            data.push(group as u8);
        }
    }
    Ok(data)
}

/// Inverse of the alphabet table.
fn symbol_value(symbol: u8) -> Option<u8> {
    match symbol {
        b'0'..=b'9' => Some(symbol - b'0'),
        b'A'..=b'Z' => Some(symbol - b'A' + 10),
        b'a'..=b'z' => Some(symbol - b'a' + 36),
        b'-' => Some(62),
        b'_' => Some(63),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::io::Read;

    use flate2::read::ZlibDecoder;
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn alphabet_has_64_distinct_symbols() {
        let symbols: HashSet<u8> = PLANTUML_ALPHABET.iter().copied().collect();
        assert_eq!(symbols.len(), 64);
        assert_eq!(PLANTUML_ALPHABET[0], b'0');
        assert_eq!(PLANTUML_ALPHABET[10], b'A');
        assert_eq!(PLANTUML_ALPHABET[36], b'a');
        assert_eq!(PLANTUML_ALPHABET[62], b'-');
        assert_eq!(PLANTUML_ALPHABET[63], b'_');
    }

    #[test]
    fn encodes_fixed_vectors() {
        assert_eq!(encode_plantuml(&[]), "");
        assert_eq!(encode_plantuml(&[0x00]), "00");
        assert_eq!(encode_plantuml(&[0xFF]), "_m");
        assert_eq!(encode_plantuml(&[0xFF, 0xFF]), "__y");
        assert_eq!(encode_plantuml(&[0xFF, 0xFF, 0xFF]), "____");
        assert_eq!(encode_plantuml(&[0x00, 0x00, 0x00]), "0000");
        assert_eq!(encode_plantuml(&[0x01, 0x02, 0x03]), "0G83");
    }

    #[test]
    fn token_length_is_ceil_of_bit_count() {
        for n in 0..=16 {
            let data = vec![0xAB; n];
            let token = encode_plantuml(&data);
            assert_eq!(token.len(), (n * 8).div_ceil(6), "length {n}");
        }
    }

    #[test]
    fn round_trips_all_tail_lengths() {
        let cases: &[&[u8]] = &[
            &[],
            &[0x00],
            &[0x7F, 0x80],
            &[1, 2, 3],
            &[1, 2, 3, 4],
            &[1, 2, 3, 4, 5],
            &[0xDE, 0xAD, 0xBE, 0xEF, 0x00, 0xFF, 0x42],
        ];
        for &data in cases {
            let token = encode_plantuml(data);
            assert_eq!(decode_plantuml(&token).unwrap(), data);
        }
    }

    #[test]
    fn decode_rejects_foreign_symbols() {
        assert!(matches!(
            decode_plantuml("ab=d"),
            Err(DecodeError::InvalidSymbol('='))
        ));
        assert!(matches!(
            decode_plantuml("ab+d"),
            Err(DecodeError::InvalidSymbol('+'))
        ));
    }

    #[test]
    fn decode_rejects_truncated_group() {
        assert!(matches!(
            decode_plantuml("abcde"),
            Err(DecodeError::TruncatedGroup)
        ));
    }

    #[test]
    fn plantuml_token_round_trips_to_source() {
        let source = "@startuml\nAlice -> Bob: hello\n@enduml";
        let token = encode_diagram(source, TokenEncoding::Plantuml).unwrap();
        assert!(!token.is_empty());

        let compressed = decode_plantuml(&token).unwrap();
        let mut inflated = String::new();
        ZlibDecoder::new(&compressed[..])
            .read_to_string(&mut inflated)
            .unwrap();
        assert_eq!(inflated, source);
    }

    #[test]
    fn base64url_token_round_trips_to_source() {
        let source = "A->B: hi";
        let token = encode_diagram(source, TokenEncoding::Base64Url).unwrap();

        let compressed = BASE64_URL_SAFE.decode(&token).unwrap();
        let mut inflated = String::new();
        ZlibDecoder::new(&compressed[..])
            .read_to_string(&mut inflated)
            .unwrap();
        assert_eq!(inflated, source);
    }

    #[test]
    fn encoding_is_deterministic() {
        let source = "digraph G { a -> b }";
        for encoding in [TokenEncoding::Plantuml, TokenEncoding::Base64Url] {
            let first = encode_diagram(source, encoding).unwrap();
            let second = encode_diagram(source, encoding).unwrap();
            assert_eq!(first, second);
        }
    }

    #[test]
    fn empty_source_still_produces_a_token() {
        // The zlib header and checksum survive even with no payload.
        let token = encode_diagram("", TokenEncoding::Plantuml).unwrap();
        assert!(!token.is_empty());

        let compressed = decode_plantuml(&token).unwrap();
        let mut inflated = String::new();
        ZlibDecoder::new(&compressed[..])
            .read_to_string(&mut inflated)
            .unwrap();
        assert_eq!(inflated, "");
    }
}
