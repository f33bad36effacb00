//! Core types for the TOTP/HOTP authenticator.

use serde::{Deserialize, Serialize};
use std::fmt;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  Defaults & limits
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// The 32 symbols of the RFC 4648 base-32 alphabet, in value order.
pub const BASE32_ALPHABET: &[u8; 32] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ234567";

/// Digits in a generated code unless configured otherwise.
pub const DEFAULT_CODE_LENGTH: u8 = 6;
/// Smallest accepted code length.
pub const MIN_CODE_LENGTH: u8 = 1;
/// Largest accepted code length; 10^10 exceeds the 31-bit truncated value.
pub const MAX_CODE_LENGTH: u8 = 9;
/// TOTP time-step in seconds.
pub const DEFAULT_PERIOD: u32 = 30;
/// Time slices accepted on either side of the current one.
pub const DEFAULT_DISCREPANCY: u32 = 1;
/// Symbols in a freshly generated secret (16 symbols = 10 bytes).
pub const DEFAULT_SECRET_LENGTH: usize = 16;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  Errors
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Error categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TotpErrorKind {
    /// A character outside the base-32 alphabet was found while decoding.
    InvalidEncoding,
    /// The secret is not usable key material (bad encoding or empty).
    InvalidSecret,
    /// Requested digit count outside `[1, 9]`.
    InvalidCodeLength,
    /// Negative or otherwise out-of-range counter / time slice.
    InvalidCounter,
    /// The random source could not be read.
    InsufficientEntropy,
    /// Zero-length time step.
    InvalidPeriod,
    /// Configuration failed validation.
    InvalidConfig,
}

/// Crate-level error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TotpError {
    pub kind: TotpErrorKind,
    pub message: String,
    pub detail: Option<String>,
}

impl fmt::Display for TotpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:?}] {}", self.kind, self.message)?;
        if let Some(d) = &self.detail {
            write!(f, " ({})", d)?;
        }
        Ok(())
    }
}

impl std::error::Error for TotpError {}

impl TotpError {
    pub fn new(kind: TotpErrorKind, msg: impl Into<String>) -> Self {
        Self {
            kind,
            message: msg.into(),
            detail: None,
        }
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    /// Whether retrying the same call could succeed.
    ///
    /// Only an unreadable random source is plausibly transient; every other
    /// failure is a pure function of the inputs.
    pub fn is_transient(&self) -> bool {
        self.kind == TotpErrorKind::InsufficientEntropy
    }
}

impl From<TotpError> for String {
    fn from(e: TotpError) -> String {
        e.to_string()
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  Verification result
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Result of verifying a candidate code against a secret.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifyResult {
    pub valid: bool,
    /// How many time slices off the match was (0 = exact).
    pub drift: i64,
    /// The time slice that matched (if any).
    pub matched_slice: Option<u64>,
}

impl VerifyResult {
    pub(crate) fn rejected() -> Self {
        Self {
            valid: false,
            drift: 0,
            matched_slice: None,
        }
    }
}
