use thiserror::Error;

/// Common result type used across this crate.
pub type Result<T, E = Gf256Error> = core::result::Result<T, E>;

/// Errors returned by GF(2^8) helpers.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Gf256Error {
    #[error("zero has no multiplicative inverse")]
    ZeroInverse,
}
