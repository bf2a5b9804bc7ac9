//! Error types for the converter

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The stream ended partway through a record
    #[error("truncated record at byte {offset}: got {available} bytes")]
    TruncatedRecord {
        /// Byte offset where the incomplete record starts
        offset: u64,
        /// Bytes that were actually available for it
        available: usize,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
