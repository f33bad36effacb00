//! TOTP verification with a drift window.
//!
//! The candidate is compared against the code of every time slice in
//! `[current - discrepancy, current + discrepancy]`, oldest first, and the
//! first match wins. Slices that would fall below zero are skipped rather
//! than wrapped.
//!
//! Codes are compared with [`subtle::ConstantTimeEq`] so the time taken does
//! not reveal how many leading digits of a guess were right. Plain string
//! equality would leak that through timing.
//!
//! Nothing is remembered between calls, so a code stays acceptable for the
//! whole window. Callers that need replay protection can record
//! [`VerifyResult::matched_slice`] and refuse slices they have already seen.

use subtle::ConstantTimeEq;

use crate::totp::clock::current_unix_time;
use crate::totp::codec::Base32Codec;
use crate::totp::core;
use crate::totp::types::*;

/// Verification parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VerifyOptions {
    /// Slices accepted on either side of the current one.
    pub discrepancy: u32,
    /// Time step in seconds.
    pub period: u32,
    /// Expected number of digits.
    pub code_length: u8,
    /// Codec used to decode the secret.
    pub codec: Base32Codec,
}

impl Default for VerifyOptions {
    fn default() -> Self {
        Self {
            discrepancy: DEFAULT_DISCREPANCY,
            period: DEFAULT_PERIOD,
            code_length: DEFAULT_CODE_LENGTH,
            codec: Base32Codec::default(),
        }
    }
}

impl VerifyOptions {
    /// Builder: set the drift window.
    pub fn with_discrepancy(mut self, discrepancy: u32) -> Self {
        self.discrepancy = discrepancy;
        self
    }

    /// Builder: set the time step.
    pub fn with_period(mut self, period: u32) -> Self {
        self.period = period;
        self
    }

    /// Builder: set the digit count.
    pub fn with_code_length(mut self, code_length: u8) -> Self {
        self.code_length = code_length;
        self
    }

    /// Builder: set the secret codec.
    pub fn with_codec(mut self, codec: Base32Codec) -> Self {
        self.codec = codec;
        self
    }
}

/// Verify `candidate` at the unix timestamp `now`, reporting which slice
/// matched.
///
/// Malformed parameters or secrets are errors; a well-formed candidate that
/// simply does not match is `Ok` with `valid == false`.
pub fn verify_at(
    secret: &str,
    candidate: &str,
    options: &VerifyOptions,
    now: u64,
) -> Result<VerifyResult, TotpError> {
    core::validate_code_length(options.code_length)?;
    let current = core::time_slice(now, options.period)?;
    let key = core::decode_secret(&options.codec, secret)?;

    // Exact string comparison: wrong width or non-digits can never match.
    if candidate.len() != options.code_length as usize
        || !candidate.bytes().all(|b| b.is_ascii_digit())
    {
        return Ok(VerifyResult::rejected());
    }

    let window = options.discrepancy as i64;
    for offset in -window..=window {
        let Some(slice) = current.checked_add_signed(offset) else {
            log::debug!("skipping out-of-range slice at offset {}", offset);
            continue;
        };
        let generated = core::hotp_raw(&key, slice, options.code_length)?;
        if bool::from(generated.as_bytes().ct_eq(candidate.as_bytes())) {
            log::debug!("code accepted with drift {}", offset);
            return Ok(VerifyResult {
                valid: true,
                drift: offset,
                matched_slice: Some(slice),
            });
        }
    }

    Ok(VerifyResult::rejected())
}

/// Verify `candidate` at the unix timestamp `now`.
pub fn verify(
    secret: &str,
    candidate: &str,
    options: &VerifyOptions,
    now: u64,
) -> Result<bool, TotpError> {
    verify_at(secret, candidate, options, now).map(|r| r.valid)
}

/// Verify against the wall clock with default step and code length.
pub fn verify_now(secret: &str, candidate: &str, discrepancy: u32) -> Result<bool, TotpError> {
    let options = VerifyOptions::default().with_discrepancy(discrepancy);
    verify(secret, candidate, &options, current_unix_time())
}
