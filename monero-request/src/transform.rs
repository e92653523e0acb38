//! Gzip and base64 for the wire payload.
//!
//! [`compress_and_encode`] turns the serialized field map into the token that
//! follows the version in a request string; [`decode_and_decompress`] undoes
//! it. Only the round trip is guaranteed: another gzip implementation may
//! produce different bytes for the same text, and both decode fine.

use std::io::{Read, Write};

use base64::Engine;
use base64::engine::general_purpose::STANDARD as b64;
use flate2::Compression;
use flate2::read::MultiGzDecoder;
use flate2::write::GzEncoder;

use crate::error::DecodeError;

/// Gzips `text` and encodes the result as padded standard base64.
///
/// # Panics
///
/// Never in practice: the compressor writes into memory, which cannot fail.
#[must_use]
pub fn compress_and_encode(text: &str) -> String {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder
        .write_all(text.as_bytes())
        .expect("writing to a Vec cannot fail");
    let compressed = encoder.finish().expect("writing to a Vec cannot fail");
    b64.encode(compressed)
}

/// Decodes base64 `token` and gunzips it back into text.
///
/// The token is decoded as given, so surrounding whitespace is rejected like
/// any other character outside the alphabet. Concatenated gzip members are
/// read as one stream.
///
/// # Errors
///
/// - [`DecodeError::Base64`] if `token` is not padded standard base64;
/// - [`DecodeError::Decompress`] if the bytes are not a complete gzip stream;
/// - [`DecodeError::Utf8`] if the decompressed bytes are not UTF-8.
pub fn decode_and_decompress(token: &str) -> Result<String, DecodeError> {
    let compressed = b64.decode(token)?;
    let mut decompressed = Vec::new();
    MultiGzDecoder::new(compressed.as_slice())
        .read_to_end(&mut decompressed)
        .map_err(DecodeError::Decompress)?;
    Ok(String::from_utf8(decompressed)?)
}
