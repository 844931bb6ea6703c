use jiff::civil::Date;
use thiserror::Error;

/// Domain failures that callers are expected to match on.
/// IO and glue errors stay `anyhow` at the command layer.
#[derive(Debug, Error)]
pub enum Error {
    #[error("effective alphabet is empty; enable at least one character class or drop --exclude-similar")]
    EmptyAlphabet,

    #[error(
        "no unique key found after {attempts} attempts; the alphabet is too small for the requested quantity"
    )]
    RetriesExhausted { attempts: u32 },

    #[error("quantity must be between 1 and 10000, got {requested}")]
    QuantityOutOfRange { requested: u32 },

    #[error("expiry date {date} is in the past")]
    ExpiryInPast { date: Date },
}

pub type Result<T> = std::result::Result<T, Error>;
