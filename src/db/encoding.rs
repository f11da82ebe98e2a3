// SPDX-License-Identifier: MIT

//! Base64 transcoding for document bodies.
//!
//! The content API stores document bodies base64-encoded and returns
//! them chunked with newlines, so decoding strips ASCII whitespace
//! before handing the payload to the base64 engine. Both directions
//! are lossless for arbitrary UTF-8.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};

/// Errors produced while decoding a document body.
///
/// These are distinct from "document not found": a document that
/// exists but cannot be decoded is a backend/data problem, not a
/// missing key.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("invalid base64: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("invalid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// Encode a UTF-8 string as standard base64.
pub fn encode_text(text: &str) -> String {
    BASE64.encode(text.as_bytes())
}

/// Decode a base64 payload back into a UTF-8 string.
///
/// The backend interleaves newlines into long payloads; any ASCII
/// whitespace is removed before decoding.
pub fn decode_text(payload: &str) -> Result<String, DecodeError> {
    let compact: String = payload
        .chars()
        .filter(|c| !c.is_ascii_whitespace())
        .collect();
    let bytes = BASE64.decode(compact.as_bytes())?;
    Ok(String::from_utf8(bytes)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_ascii() {
        let input = "hello world";
        assert_eq!(decode_text(&encode_text(input)).unwrap(), input);
    }

    #[test]
    fn test_decode_with_newlines() {
        let encoded = encode_text("payload that survives chunking");
        let (a, b) = encoded.split_at(8);
        let chunked = format!("{}\n{}\n", a, b);
        assert_eq!(
            decode_text(&chunked).unwrap(),
            "payload that survives chunking"
        );
    }

    #[test]
    fn test_invalid_base64_is_an_error() {
        assert!(decode_text("!!not base64!!").is_err());
    }
}
