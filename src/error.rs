//! Error types shared by the keyspace model and the enumeration engine.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Longest password or enumeration target accepted.
pub const MAX_LENGTH: usize = 4_096;
/// Most passwords generated in one batch.
pub const MAX_COUNT: usize = 1_000_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConfigIssue {
    #[error("charset is empty, select at least one character class")]
    EmptyCharset,
    #[error("length must be at least 1")]
    ZeroLength,
    #[error("length must be at most {MAX_LENGTH}")]
    LengthTooLarge,
    #[error("number of passwords must be at most {MAX_COUNT}")]
    CountTooLarge,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Rejected before any work starts. Never retried.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(#[from] ConfigIssue),

    #[error("invalid input: {0}")]
    InvalidInput(&'static str),
}

/// Fail fast on configurations no keyspace consumer can work with.
pub fn validate(charset_size: usize, length: usize) -> Result<()> {
    if charset_size == 0 {
        return Err(ConfigIssue::EmptyCharset.into());
    }
    if length == 0 {
        return Err(ConfigIssue::ZeroLength.into());
    }
    if length > MAX_LENGTH {
        return Err(ConfigIssue::LengthTooLarge.into());
    }
    Ok(())
}

pub fn validate_count(count: usize) -> Result<()> {
    if count > MAX_COUNT {
        return Err(ConfigIssue::CountTooLarge.into());
    }
    Ok(())
}
