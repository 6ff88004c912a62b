//! `FileHeader` stream decoding.

use crate::error::{Error, Result};
use crate::model::HwpVersion;

/// Signature literal at the start of the `FileHeader` stream, null-padded
/// to 32 bytes in the file.
pub const HWP_SIGNATURE: &[u8] = b"HWP Document File";

const FLAG_COMPRESSED: u32 = 1;
const FLAG_ENCRYPTED: u32 = 1 << 1;
const FLAG_DISTRIBUTED: u32 = 1 << 2;

/// Decoded `FileHeader`: version tuple plus the feature flags the extractor
/// acts on.
#[derive(Debug, Clone, Copy)]
pub struct FileHeader {
    pub version: HwpVersion,
    pub compressed: bool,
    pub encrypted: bool,
    pub distributed: bool,
}

impl FileHeader {
    /// Parse the fixed-layout header stream (nominally 256 bytes).
    ///
    /// Signature mismatch fails with [`Error::NotHwp5`]; a stream too short
    /// to carry version and flags fails with [`Error::Truncated`].
    pub fn parse(data: &[u8]) -> Result<Self> {
        if data.len() < HWP_SIGNATURE.len() || &data[..HWP_SIGNATURE.len()] != HWP_SIGNATURE {
            return Err(Error::NotHwp5("FileHeader signature mismatch".to_string()));
        }
        if data.len() < 40 {
            return Err(Error::Truncated(format!(
                "FileHeader stream is {} bytes, need 40",
                data.len()
            )));
        }

        // Bytes 32..36: version packed low byte first as (build, rev, minor, major).
        let version = HwpVersion::new(data[35], data[34], data[33], data[32]);
        let flags = u32::from_le_bytes(data[36..40].try_into().expect("4-byte slice"));

        Ok(Self {
            version,
            compressed: flags & FLAG_COMPRESSED != 0,
            encrypted: flags & FLAG_ENCRYPTED != 0,
            distributed: flags & FLAG_DISTRIBUTED != 0,
        })
    }
}
