//! Error types for the unhwp library.

use std::io;
use thiserror::Error;

/// Result type alias for unhwp operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during document extraction.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error during file or stream operations.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The file is not an HWP 5.x document (bad signature or container).
    #[error("Not an HWP 5.x document: {0}")]
    NotHwp5(String),

    /// The document is encrypted and cannot be processed.
    #[error("Document is encrypted")]
    Encrypted,

    /// A stream ended mid-header or mid-payload.
    #[error("Truncated stream: {0}")]
    Truncated(String),

    /// Decompression exceeded the configured expansion limit.
    #[error("Decompression limit exceeded: {actual} bytes > {limit} bytes")]
    DecodeLimit {
        /// Configured output ceiling in bytes.
        limit: usize,
        /// Bytes the stream tried to expand to (lower bound).
        actual: usize,
    },

    /// A record declared an extended payload larger than the remaining stream.
    #[error("Malformed record: {0}")]
    MalformedRecord(String),

    /// The file format could not be determined.
    #[error("Unknown file format")]
    UnknownFormat,

    /// The file format is recognized but not supported by this path.
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// Error reading a ZIP archive (HWPX container).
    #[error("ZIP archive error: {0}")]
    ZipArchive(String),

    /// Error parsing XML content (HWPX sections).
    #[error("XML parse error: {0}")]
    XmlParse(String),

    /// External converter invocation failed (HWP 3.x path).
    #[error("Conversion failed: {0}")]
    Conversion(String),

    /// Error while serializing an output view.
    #[error("Render error: {0}")]
    Render(String),
}

impl From<zip::result::ZipError> for Error {
    fn from(err: zip::result::ZipError) -> Self {
        Error::ZipArchive(err.to_string())
    }
}

impl From<quick_xml::Error> for Error {
    fn from(err: quick_xml::Error) -> Self {
        Error::XmlParse(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::Encrypted;
        assert_eq!(err.to_string(), "Document is encrypted");

        let err = Error::NotHwp5("missing FileHeader stream".to_string());
        assert!(err.to_string().contains("missing FileHeader"));

        let err = Error::DecodeLimit {
            limit: 100,
            actual: 150,
        };
        assert!(err.to_string().contains("150"));
    }

    #[test]
    fn test_error_from_io() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }
}
