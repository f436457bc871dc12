use thiserror::Error;

/// Hard failures of the field codec. Decoding never produces one of these.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    /// Text does not fit in one packed field.
    #[error("value too large: {size} bytes exceeds maximum {max} bytes")]
    ValueTooLarge { size: usize, max: usize },

    #[error("malformed field literal: {0:?}")]
    MalformedField(String),

    #[error("hash modulus must be a positive decimal integer")]
    InvalidModulus,
}

/// Failures while fetching a struct dump from a record source.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("rpc returned status {status}")]
    Rpc { status: u16 },

    #[error("invalid rpc body: {0}")]
    InvalidBody(String),
}

pub type SourceResult<T> = Result<T, SourceError>;
