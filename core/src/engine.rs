//! Host-facing operations.
//!
//! The engine performs no I/O, reads no environment and persists nothing;
//! hosts drive it through the functions below. Log events carry counts and
//! categorical outcomes only.

use math::Gf256;
use zeroize::Zeroize;

use crate::codec;
use crate::error::{Result, SharingError};
use crate::gate;
use crate::params;
use crate::sensitive;
use crate::shamir::{self, SecretSharer, ShareRecord};

/// Alphabet for generated secrets: alphanumerics plus a small symbol set.
const GENERATED_SECRET_ALPHABET: &[u8] =
    b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789!@#$%^&*";

/// One-time start-up: confirm the field tables, bind the randomness gate to
/// the operating-system source for good, and run the gate self-check.
pub fn init() -> Result<()> {
    if !Gf256::verify_tables() {
        return Err(SharingError::Internal("gf256 table verification failed"));
    }
    gate::seal_to_os();
    gate::verify()?;
    tracing::debug!("randomness self-check passed, engine ready");
    Ok(())
}

/// Split `secret` into `shares` encoded shares, any `threshold` of which
/// reconstruct it exactly. Output is the padded Base62 form, one string per
/// share, in increasing index order.
pub fn split(secret: &[u8], shares: usize, threshold: usize) -> Result<Vec<String>> {
    params::validate_secret_bytes(secret)?;
    let sharer = SecretSharer::new(threshold, shares)?;
    gate::verify()?;

    let records = sharer.split(secret)?;
    let mut encoded = Vec::with_capacity(records.len());
    for record in &records {
        encoded.push(codec::encode_share(record)?);
    }
    // records are wiped as they drop
    tracing::debug!(shares, threshold, secret_len = secret.len(), "split complete");
    Ok(encoded)
}

/// Validate a text secret against the character-class rules, encode it as
/// UTF-8 and split it.
pub fn split_text(secret: &str, shares: usize, threshold: usize) -> Result<Vec<String>> {
    params::validate_secret_text(secret)?;
    split(secret.as_bytes(), shares, threshold)
}

/// Reconstruct the secret bytes from share lines.
///
/// Formats may be mixed freely; each line is classified on its own. Blank
/// lines are skipped and `Share <n>:` labels are stripped before decoding.
pub fn reconstruct<S: AsRef<str>>(lines: &[S]) -> Result<Vec<u8>> {
    let records = decode_lines(lines)?;
    let decoded = records.len();
    let secret = shamir::reconstruct_secret(records)?;
    tracing::debug!(provided = lines.len(), decoded, "reconstruct complete");
    Ok(secret)
}

/// Host-facing parameter check: `(shares, threshold)` ranges plus the
/// secret-length policy.
pub fn validate_parameters(
    shares: usize,
    threshold: usize,
    secret_len: usize,
) -> Result<()> {
    params::validate_parameters(shares, threshold, secret_len)
}

/// Structural validation of a share batch without interpolating: per-line
/// format, distinct indices after dedup, uniform lengths, at least two
/// shares.
pub fn validate_share_lines<S: AsRef<str>>(lines: &[S]) -> Result<()> {
    let records = decode_lines(lines)?;
    shamir::screen_records(records).map(drop)
}

/// Generate a random secret over the tool's display alphabet, rejection
/// sampled so every character is equally likely. Length is bounded by the
/// same policy as split input.
pub fn generate_secret(length: usize) -> Result<String> {
    params::validate_secret_length(length)?;

    let alphabet_len = GENERATED_SECRET_ALPHABET.len();
    let accept_below = (256 / alphabet_len) * alphabet_len;
    let mut secret = String::with_capacity(length);
    while secret.len() < length {
        let mut draw = [0u8; 32];
        gate::fill(&mut draw)?;
        for &byte in &draw {
            if (byte as usize) < accept_below && secret.len() < length {
                secret.push(
                    GENERATED_SECRET_ALPHABET[byte as usize % alphabet_len] as char,
                );
            }
        }
        draw.zeroize();
    }
    Ok(secret)
}

/// Wipe every buffer still in the sensitive registry and request a pass
/// from the host collector, if one was installed.
pub fn teardown() {
    let swept = sensitive::teardown();
    tracing::debug!(swept, "sensitive registry swept");
}

fn decode_lines<S: AsRef<str>>(lines: &[S]) -> Result<Vec<ShareRecord>> {
    let mut records = Vec::with_capacity(lines.len());
    for (number, raw) in lines.iter().enumerate() {
        let Some(line) = codec::normalize_line(raw.as_ref()) else {
            continue;
        };
        let record = codec::decode_share(line).map_err(|reason| {
            SharingError::MalformedShare {
                line: number + 1,
                reason,
            }
        })?;
        records.push(record);
    }
    Ok(records)
}
