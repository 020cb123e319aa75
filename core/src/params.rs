use math::prelude::GROUP_ORDER;

use crate::error::{Result, SecretError, SharingError};

/// Longest secret the splitter accepts, in encoded bytes. A policy ceiling
/// of this tool, not a limit of the algorithm.
pub const MAX_SECRET_BYTES: usize = 64;

/// Most shares a single split can emit: share indices must be distinct
/// non-zero field elements.
pub const MAX_SHARES: usize = GROUP_ORDER;

/// Smallest meaningful share count.
pub const MIN_SHARES: usize = 2;

/// Smallest meaningful threshold; a threshold of one would make every share
/// the secret.
pub const MIN_THRESHOLD: usize = 2;

/// Range checks for a `(shares, threshold)` configuration.
pub fn validate_share_parameters(shares: usize, threshold: usize) -> Result<()> {
    let valid = threshold >= MIN_THRESHOLD
        && shares >= MIN_SHARES
        && threshold <= shares
        && shares <= MAX_SHARES;
    if valid {
        Ok(())
    } else {
        Err(SharingError::InvalidParameters { shares, threshold })
    }
}

/// Length policy for secret payloads.
pub fn validate_secret_length(length: usize) -> Result<()> {
    if length == 0 {
        return Err(SecretError::Empty.into());
    }
    if length > MAX_SECRET_BYTES {
        return Err(SecretError::TooLong(length).into());
    }
    Ok(())
}

/// Byte-level secret checks: length policy plus the control-character rule.
/// Multi-byte UTF-8 is unaffected, its bytes are all >= 0x80.
pub fn validate_secret_bytes(secret: &[u8]) -> Result<()> {
    validate_secret_length(secret.len())?;
    if secret.iter().any(|&byte| is_forbidden_control(byte)) {
        return Err(SecretError::ControlCharacter.into());
    }
    Ok(())
}

/// Character-class rules for the text entry path; any Unicode is accepted
/// and judged by its UTF-8 encoding.
pub fn validate_secret_text(secret: &str) -> Result<()> {
    validate_secret_bytes(secret.as_bytes())
}

/// Combined host-facing check: share parameters plus secret length.
pub fn validate_parameters(
    shares: usize,
    threshold: usize,
    secret_len: usize,
) -> Result<()> {
    validate_share_parameters(shares, threshold)?;
    validate_secret_length(secret_len)?;
    Ok(())
}

// ASCII control bytes other than tab, newline and carriage return, plus DEL.
fn is_forbidden_control(byte: u8) -> bool {
    (byte < 0x20 && !matches!(byte, b'\t' | b'\n' | b'\r')) || byte == 0x7f
}

#[cfg(test)]
mod params_tests {
    use super::*;

    #[test]
    fn accepts_the_whole_supported_range() {
        validate_share_parameters(2, 2).unwrap();
        validate_share_parameters(255, 2).unwrap();
        validate_share_parameters(255, 255).unwrap();
        validate_share_parameters(5, 3).unwrap();
    }

    #[test]
    fn rejects_out_of_range_configurations() {
        for (shares, threshold) in
            [(1, 1), (1, 2), (2, 1), (0, 0), (256, 2), (300, 3), (5, 6)]
        {
            assert_eq!(
                validate_share_parameters(shares, threshold),
                Err(SharingError::InvalidParameters { shares, threshold }),
                "({shares}, {threshold}) must be rejected"
            );
        }
    }

    #[test]
    fn secret_length_policy() {
        validate_secret_length(1).unwrap();
        validate_secret_length(MAX_SECRET_BYTES).unwrap();
        assert_eq!(
            validate_secret_length(0),
            Err(SharingError::InvalidSecret(SecretError::Empty))
        );
        assert_eq!(
            validate_secret_length(MAX_SECRET_BYTES + 1),
            Err(SharingError::InvalidSecret(SecretError::TooLong(65)))
        );
    }

    #[test]
    fn control_characters_are_rejected() {
        assert_eq!(
            validate_secret_bytes(b"pass\x00word"),
            Err(SharingError::InvalidSecret(SecretError::ControlCharacter))
        );
        assert_eq!(
            validate_secret_bytes(b"bell\x07"),
            Err(SharingError::InvalidSecret(SecretError::ControlCharacter))
        );
        assert_eq!(
            validate_secret_bytes(&[b'a', 0x7f]),
            Err(SharingError::InvalidSecret(SecretError::ControlCharacter))
        );
    }

    #[test]
    fn whitespace_controls_are_allowed() {
        validate_secret_bytes(b"two\nlines\tand\rreturn").unwrap();
    }

    #[test]
    fn unicode_text_is_judged_by_its_utf8_bytes() {
        validate_secret_text("héllo🔐").unwrap();
        // 32 four-byte scalars encode to 128 bytes.
        let wide: String = std::iter::repeat('🔐').take(32).collect();
        assert_eq!(
            validate_secret_text(&wide),
            Err(SharingError::InvalidSecret(SecretError::TooLong(128)))
        );
    }

    #[test]
    fn combined_check_orders_parameters_first() {
        assert_eq!(
            validate_parameters(1, 1, 0),
            Err(SharingError::InvalidParameters {
                shares: 1,
                threshold: 1
            })
        );
        assert_eq!(
            validate_parameters(3, 2, 0),
            Err(SharingError::InvalidSecret(SecretError::Empty))
        );
        validate_parameters(3, 2, 64).unwrap();
    }
}
