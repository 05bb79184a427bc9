//! Response body decompression and decoding.

use std::io::Read;

use bytes::Bytes;
use flate2::read::GzDecoder;
use reqwest::header::{CONTENT_ENCODING, HeaderMap};

use super::response::SearchResponse;

/// True when `Content-Encoding` mentions gzip.
pub fn is_gzip(headers: &HeaderMap) -> bool {
    headers
        .get(CONTENT_ENCODING)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|encoding| encoding.to_ascii_lowercase().contains("gzip"))
}

/// Decompress the body if the headers say it is gzip, else return it as-is.
pub fn decompress(headers: &HeaderMap, body: Bytes) -> std::io::Result<Bytes> {
    if !is_gzip(headers) {
        return Ok(body);
    }

    let mut decoded = Vec::with_capacity(body.len() * 4);
    GzDecoder::new(body.as_ref()).read_to_end(&mut decoded)?;
    Ok(Bytes::from(decoded))
}

pub fn decode_search_response(body: &[u8]) -> serde_json::Result<SearchResponse> {
    serde_json::from_slice(body)
}
