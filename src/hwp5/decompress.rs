//! Body-stream decompression.
//!
//! Compressed body sections are raw DEFLATE from offset 0, with no zlib
//! header or trailer. Output is bounded by an expansion ratio so a
//! pathological stream cannot balloon memory.

use crate::error::{Error, Result};
use flate2::read::DeflateDecoder;
use std::io::Read;

/// Default ceiling on output size as a multiple of input size.
pub const DEFAULT_MAX_EXPANSION: usize = 100;

/// Inflate a raw DEFLATE stream, failing once output exceeds `limit` bytes.
pub fn inflate_raw(data: &[u8], limit: usize) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    let mut decoder = DeflateDecoder::new(data);
    decoder
        .by_ref()
        .take(limit as u64 + 1)
        .read_to_end(&mut out)?;
    if out.len() > limit {
        return Err(Error::DecodeLimit {
            limit,
            actual: out.len(),
        });
    }
    Ok(out)
}

/// Decode a body-section stream according to the header's compression flag.
///
/// Uncompressed streams pass through. Some files set the compression flag
/// but store sections uncompressed; an inflate failure on such data falls
/// back to the raw bytes. Exceeding the expansion limit is never tolerated.
pub fn decode_stream(data: &[u8], compressed: bool, max_expansion: usize) -> Result<Vec<u8>> {
    if !compressed {
        return Ok(data.to_vec());
    }
    let limit = data.len().saturating_mul(max_expansion);
    match inflate_raw(data, limit) {
        Ok(out) => Ok(out),
        Err(Error::DecodeLimit { limit, actual }) => Err(Error::DecodeLimit { limit, actual }),
        Err(_) => Ok(data.to_vec()),
    }
}
