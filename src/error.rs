//! Error type shared by every stage of the codec.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum HuffError {
    /// The source held no symbols once trailing whitespace was trimmed.
    #[error("input is empty")]
    EmptyInput,

    /// Encoded data that cannot have come from the encoder.
    #[error("malformed bitstream: {0}")]
    MalformedBitstream(String),

    /// The text contains a symbol the code table was not built for.
    #[error("symbol {0:?} has no code in this table")]
    UnknownSymbol(char),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Frequency table could not be (de)serialized.
    #[error("frequency table error: {0}")]
    Table(#[from] bincode::Error),

    #[error("journal error: {0}")]
    Journal(#[from] serde_json::Error),
}

impl HuffError {
    pub(crate) fn malformed(reason: impl Into<String>) -> Self {
        HuffError::MalformedBitstream(reason.into())
    }
}

pub type Result<T> = std::result::Result<T, HuffError>;
