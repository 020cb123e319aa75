use thiserror::Error;

use crate::params::MAX_SECRET_BYTES;

/// Result type specialized for sharing operations.
pub type Result<T, E = SharingError> = std::result::Result<T, E>;

/// Errors surfaced by the sharing engine.
///
/// Payloads are categorical — indices, counts, lengths. Secret bytes never
/// appear in an error value or its rendering.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SharingError {
    #[error("invalid parameters: threshold {threshold} of {shares} shares")]
    InvalidParameters { shares: usize, threshold: usize },
    #[error("invalid secret: {0}")]
    InvalidSecret(#[from] SecretError),
    #[error("secure randomness unavailable: {0}")]
    RandomnessUnavailable(#[from] RandomnessFault),
    #[error("malformed share on line {line}: {reason}")]
    MalformedShare {
        line: usize,
        reason: ShareFormatError,
    },
    #[error("shares with index {0} disagree")]
    InconsistentShares(u8),
    #[error("inconsistent share lengths: {0} != {1}")]
    InconsistentShareLengths(usize, usize),
    #[error("insufficient shares: need {required}, got {provided}")]
    InsufficientShares { required: usize, provided: usize },
    #[error("internal invariant violated: {0}")]
    Internal(&'static str),
}

/// Reasons a secret is rejected before splitting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SecretError {
    #[error("secret is empty")]
    Empty,
    #[error("secret is {0} bytes, limit is {limit}", limit = MAX_SECRET_BYTES)]
    TooLong(usize),
    #[error("secret contains a disallowed control character")]
    ControlCharacter,
}

/// Failure modes of the randomness gate self-check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RandomnessFault {
    #[error("operating-system source unavailable")]
    SourceUnavailable,
    #[error("source repeated output across independent samples")]
    StuckOutput,
    #[error("sample carries too few distinct byte values")]
    LowDiversity,
}

/// Reasons a single share line fails to decode in either format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ShareFormatError {
    #[error("character outside the expected alphabet")]
    BadAlphabet,
    #[error("length below the padded minimum")]
    BelowMinimumLength,
    #[error("declared lengths do not fit the record")]
    LengthMismatch,
    #[error("share index zero is reserved")]
    ZeroIndex,
    #[error("hex payload is truncated or oddly sized")]
    BadHexLayout,
}
