//! Core OTP generation — RFC 4226 (HOTP) and RFC 6238 (TOTP).
//!
//! HMAC-SHA1 over a big-endian 64-bit counter, dynamic truncation to a
//! 31-bit value, and reduction to a zero-padded decimal code. Time-slice
//! helpers turn a unix timestamp into the TOTP counter.

use hmac::{Hmac, Mac};
use sha1::Sha1;

use crate::totp::codec::Base32Codec;
use crate::totp::types::*;

type HmacSha1 = Hmac<Sha1>;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  Raw HMAC-OTP (RFC 4226 §5.3)
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Compute an HOTP code for the given raw key bytes and counter.
pub fn hotp_raw(key: &[u8], counter: u64, code_length: u8) -> Result<String, TotpError> {
    validate_code_length(code_length)?;
    if key.is_empty() {
        return Err(TotpError::new(TotpErrorKind::InvalidSecret, "Secret key is empty"));
    }
    let hmac_result = compute_hmac(key, &counter.to_be_bytes())?;
    Ok(truncate(&hmac_result, code_length))
}

/// Compute HMAC-SHA1(key, message).
fn compute_hmac(key: &[u8], data: &[u8]) -> Result<Vec<u8>, TotpError> {
    let mut mac = HmacSha1::new_from_slice(key).map_err(|e| {
        TotpError::new(TotpErrorKind::InvalidSecret, "Unusable HMAC key").with_detail(e.to_string())
    })?;
    mac.update(data);
    Ok(mac.finalize().into_bytes().to_vec())
}

/// Dynamic truncation per RFC 4226 §5.3.
///
/// The low nibble of the last digest byte picks a 4-byte window; the window
/// is read big-endian with the sign bit cleared.
fn truncate(digest: &[u8], code_length: u8) -> String {
    let offset = usize::from(digest[digest.len() - 1] & 0x0f);
    let mut window = [0u8; 4];
    window.copy_from_slice(&digest[offset..offset + 4]);
    let value = u32::from_be_bytes(window) & 0x7fff_ffff;
    let digits = usize::from(code_length);
    format!("{:0digits$}", value % 10u32.pow(u32::from(code_length)))
}

/// Reject digit counts outside `[MIN_CODE_LENGTH, MAX_CODE_LENGTH]`.
pub fn validate_code_length(code_length: u8) -> Result<(), TotpError> {
    if (MIN_CODE_LENGTH..=MAX_CODE_LENGTH).contains(&code_length) {
        Ok(())
    } else {
        Err(TotpError::new(
            TotpErrorKind::InvalidCodeLength,
            format!(
                "Code length must be between {} and {}",
                MIN_CODE_LENGTH, MAX_CODE_LENGTH
            ),
        )
        .with_detail(format!("got {}", code_length)))
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  HOTP from a base-32 secret
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Decode a base-32 secret into HMAC key bytes.
///
/// Both a malformed encoding and an empty result are `InvalidSecret`.
pub fn decode_secret(codec: &Base32Codec, secret: &str) -> Result<Vec<u8>, TotpError> {
    let key = codec.decode(secret).map_err(|e| {
        let err = TotpError::new(TotpErrorKind::InvalidSecret, "Invalid base-32 secret");
        match e.detail {
            Some(d) => err.with_detail(d),
            None => err,
        }
    })?;
    if key.is_empty() {
        return Err(TotpError::new(
            TotpErrorKind::InvalidSecret,
            "Secret decodes to zero key bytes",
        ));
    }
    Ok(key)
}

/// Generate an HOTP code from a base-32 secret.
pub fn compute(secret: &str, counter: u64, code_length: u8) -> Result<String, TotpError> {
    compute_with(&Base32Codec::default(), secret, counter, code_length)
}

/// Generate an HOTP code, decoding the secret with a specific codec.
pub fn compute_with(
    codec: &Base32Codec,
    secret: &str,
    counter: u64,
    code_length: u8,
) -> Result<String, TotpError> {
    validate_code_length(code_length)?;
    let key = decode_secret(codec, secret)?;
    hotp_raw(&key, counter, code_length)
}

/// Generate an HOTP code for a signed counter, rejecting negative values
/// instead of letting them wrap to a distant slice.
pub fn compute_signed(secret: &str, counter: i64, code_length: u8) -> Result<String, TotpError> {
    let counter = counter_from_signed(counter)?;
    compute(secret, counter, code_length)
}

/// Convert a logical (possibly negative) counter into a valid HOTP counter.
pub fn counter_from_signed(counter: i64) -> Result<u64, TotpError> {
    u64::try_from(counter).map_err(|_| {
        TotpError::new(TotpErrorKind::InvalidCounter, "Counter must not be negative")
            .with_detail(format!("got {}", counter))
    })
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  TOTP (time-based, RFC 6238)
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Compute the time slice for a given unix timestamp.
pub fn time_slice(unix_seconds: u64, period: u32) -> Result<u64, TotpError> {
    validate_period(period)?;
    Ok(unix_seconds / period as u64)
}

/// Seconds remaining until the slice containing `unix_seconds` expires.
pub fn seconds_remaining(unix_seconds: u64, period: u32) -> Result<u32, TotpError> {
    validate_period(period)?;
    let p = period as u64;
    Ok((p - (unix_seconds % p)) as u32)
}

/// Generate a TOTP code at an explicit unix timestamp.
pub fn totp_at(
    secret: &str,
    unix_seconds: u64,
    period: u32,
    code_length: u8,
) -> Result<String, TotpError> {
    let slice = time_slice(unix_seconds, period)?;
    compute(secret, slice, code_length)
}

pub(crate) fn validate_period(period: u32) -> Result<(), TotpError> {
    if period == 0 {
        return Err(TotpError::new(
            TotpErrorKind::InvalidPeriod,
            "Time step must be at least one second",
        ));
    }
    Ok(())
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  Utility helpers
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Group a code for display as two halves, e.g. `"123456"` → `"123 456"`.
///
/// Codes of four characters or fewer are returned as-is. The split is made
/// on a character boundary, so any `&str` is accepted.
pub fn format_code_display(code: &str) -> String {
    let chars = code.chars().count();
    if chars <= 4 {
        return code.to_owned();
    }
    let split = code
        .char_indices()
        .nth(chars / 2)
        .map_or(code.len(), |(idx, _)| idx);
    let (head, tail) = code.split_at(split);
    format!("{head} {tail}")
}
