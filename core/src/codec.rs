//! Share wire formats.
//!
//! Two textual forms are accepted on input; the padded Base62 form is the
//! only one emitted:
//!
//! * legacy hex — `xx-hh…hh`, the index as two lowercase hex digits, a
//!   dash, then two lowercase hex digits per share byte;
//! * padded Base62 — the record `index ‖ len ‖ bytes ‖ padding ‖ pad-len`
//!   rendered as a big-endian integer over `0-9A-Za-z`, padded so every
//!   share prints at least [`MIN_ENCODED_CHARS`] characters regardless of
//!   the secret's length.
//!
//! The Base62 bignum work is long division over a byte vector; at record
//! sizes that is cheaper than carrying an arbitrary-precision dependency.

use zeroize::Zeroize;

use crate::error::{Result, ShareFormatError};
use crate::gate;
use crate::params::{self, MAX_SECRET_BYTES};
use crate::shamir::ShareRecord;

/// Base62 alphabet in digit order; digit 0 is `'0'`, digit 61 is `'z'`.
const ALPHABET: &[u8; 62] =
    b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";

/// Canonical shares never render below this many characters; shorter
/// Base62 inputs are rejected outright.
pub const MIN_ENCODED_CHARS: usize = 250;

/// Byte length of the `index ‖ len ‖ bytes ‖ padding` prefix. A 187-byte
/// prefix plus the trailer is the smallest record guaranteed to render at
/// least [`MIN_ENCODED_CHARS`] digits for every value: the leading byte is
/// a non-zero share index, so the record is at least 256^187, which needs
/// 252 Base62 digits.
const PADDED_PREFIX_BYTES: usize = 187;

/// Encode a record in the canonical padded Base62 form. Padding bytes come
/// from the randomness gate; the working buffer is wiped before returning.
pub fn encode_share(record: &ShareRecord) -> Result<String> {
    params::validate_secret_length(record.len())?;

    let padding_len = PADDED_PREFIX_BYTES - 2 - record.len();
    let mut buffer = Vec::with_capacity(PADDED_PREFIX_BYTES + 1);
    buffer.push(record.index);
    buffer.push(record.len() as u8);
    buffer.extend_from_slice(&record.bytes);
    let padding_start = buffer.len();
    buffer.resize(padding_start + padding_len, 0);
    if let Err(fault) = gate::fill(&mut buffer[padding_start..]) {
        buffer.zeroize();
        return Err(fault);
    }
    buffer.push(padding_len as u8);

    let encoded = base62_encode(&buffer);
    buffer.zeroize();
    debug_assert!(encoded.len() >= MIN_ENCODED_CHARS);
    Ok(encoded)
}

/// Strip surrounding ASCII whitespace and an optional `Share <digits>:`
/// label. Returns `None` for blank lines.
pub fn normalize_line(line: &str) -> Option<&str> {
    let trimmed = line.trim_matches(|c: char| c.is_ascii_whitespace());
    let trimmed = strip_label(trimmed);
    (!trimmed.is_empty()).then_some(trimmed)
}

fn strip_label(line: &str) -> &str {
    let Some(rest) = line.strip_prefix("Share ") else {
        return line;
    };
    let digits = rest.bytes().take_while(u8::is_ascii_digit).count();
    match rest[digits..].strip_prefix(':') {
        Some(payload) if digits > 0 => {
            payload.trim_start_matches(|c: char| c.is_ascii_whitespace())
        }
        _ => line,
    }
}

/// Decode one normalized line. The dash separates the legacy grammar from
/// the Base62 one, whose alphabet has no dash.
pub fn decode_share(line: &str) -> std::result::Result<ShareRecord, ShareFormatError> {
    if line.contains('-') {
        decode_legacy(line)
    } else {
        decode_padded(line)
    }
}

fn is_lower_hex(text: &str) -> bool {
    !text.is_empty()
        && text
            .bytes()
            .all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'))
}

fn decode_legacy(line: &str) -> std::result::Result<ShareRecord, ShareFormatError> {
    let (index_part, payload_part) =
        line.split_once('-').ok_or(ShareFormatError::BadHexLayout)?;
    if index_part.len() != 2 || !is_lower_hex(index_part) || !is_lower_hex(payload_part)
    {
        return Err(ShareFormatError::BadAlphabet);
    }
    if payload_part.len() % 2 != 0 {
        return Err(ShareFormatError::BadHexLayout);
    }
    if payload_part.len() / 2 > MAX_SECRET_BYTES {
        return Err(ShareFormatError::LengthMismatch);
    }

    let index = hex::decode(index_part)
        .map_err(|_| ShareFormatError::BadAlphabet)?[0];
    if index == 0 {
        return Err(ShareFormatError::ZeroIndex);
    }
    let payload =
        hex::decode(payload_part).map_err(|_| ShareFormatError::BadAlphabet)?;
    Ok(ShareRecord::new(index, payload))
}

fn decode_padded(line: &str) -> std::result::Result<ShareRecord, ShareFormatError> {
    if line.len() < MIN_ENCODED_CHARS {
        return Err(ShareFormatError::BelowMinimumLength);
    }
    let mut buffer = base62_decode(line)?;
    let record = parse_padded_record(&buffer);
    buffer.zeroize();
    record
}

fn parse_padded_record(
    buffer: &[u8],
) -> std::result::Result<ShareRecord, ShareFormatError> {
    let (&padding_len, rest) = buffer
        .split_last()
        .ok_or(ShareFormatError::LengthMismatch)?;
    let padding_len = padding_len as usize;
    if rest.len() < padding_len + 3 {
        return Err(ShareFormatError::LengthMismatch);
    }

    let data = &rest[..rest.len() - padding_len];
    let index = data[0];
    let length = data[1] as usize;
    if length == 0 || length > MAX_SECRET_BYTES || data.len() != 2 + length {
        return Err(ShareFormatError::LengthMismatch);
    }
    if index == 0 {
        return Err(ShareFormatError::ZeroIndex);
    }
    Ok(ShareRecord::new(index, data[2..].to_vec()))
}

/// Big-endian bytes to Base62. The bignum rendering drops leading zero
/// bytes, so one `'0'` character is emitted per leading zero byte to keep
/// the mapping bijective.
pub(crate) fn base62_encode(bytes: &[u8]) -> String {
    let zeros = bytes.iter().take_while(|&&b| b == 0).count();
    let mut digits = Vec::new(); // least significant first
    let mut number = bytes[zeros..].to_vec();
    while !number.is_empty() {
        let mut remainder = 0u32;
        let mut quotient = Vec::with_capacity(number.len());
        for &byte in &number {
            let acc = (remainder << 8) | byte as u32;
            let q = (acc / 62) as u8;
            remainder = acc % 62;
            if !(quotient.is_empty() && q == 0) {
                quotient.push(q);
            }
        }
        digits.push(ALPHABET[remainder as usize]);
        number.zeroize();
        number = quotient;
    }

    let mut out = String::with_capacity(zeros + digits.len());
    out.extend(std::iter::repeat('0').take(zeros));
    out.extend(digits.iter().rev().map(|&d| d as char));
    out
}

pub(crate) fn base62_decode(
    text: &str,
) -> std::result::Result<Vec<u8>, ShareFormatError> {
    let bytes = text.as_bytes();
    let zeros = bytes.iter().take_while(|&&b| b == b'0').count();
    let mut number: Vec<u8> = Vec::new(); // big-endian accumulator
    for &ch in &bytes[zeros..] {
        let digit = base62_digit(ch).ok_or(ShareFormatError::BadAlphabet)?;
        let mut carry = digit as u32;
        for byte in number.iter_mut().rev() {
            let acc = *byte as u32 * 62 + carry;
            *byte = (acc & 0xff) as u8;
            carry = acc >> 8;
        }
        while carry > 0 {
            number.insert(0, (carry & 0xff) as u8);
            carry >>= 8;
        }
    }

    let mut out = vec![0u8; zeros];
    out.append(&mut number);
    Ok(out)
}

fn base62_digit(byte: u8) -> Option<u8> {
    match byte {
        b'0'..=b'9' => Some(byte - b'0'),
        b'A'..=b'Z' => Some(byte - b'A' + 10),
        b'a'..=b'z' => Some(byte - b'a' + 36),
        _ => None,
    }
}
