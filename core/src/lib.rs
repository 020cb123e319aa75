//! Shamir secret-sharing core over GF(2^8).
//!
//! Splits a short byte secret into N shares such that any K reconstruct it
//! exactly and fewer reveal nothing beyond its length. The crate also owns
//! the two share wire formats (legacy hex, padded Base62), the randomness
//! gate with its start-up self-check, and the sensitive-buffer hygiene
//! registry. Hosts consume the operations re-exported from [`engine`].

pub mod codec;
pub mod engine;
pub mod error;
pub mod gate;
pub mod params;
mod poly;
pub mod sensitive;
pub mod shamir;

pub use engine::{
    generate_secret, init, reconstruct, split, split_text, teardown,
    validate_parameters, validate_share_lines,
};
pub use error::{
    RandomnessFault, Result, SecretError, ShareFormatError, SharingError,
};
pub use shamir::{reconstruct_secret, SecretSharer, ShareRecord};
