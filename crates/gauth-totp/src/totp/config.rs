//! Authenticator settings.
//!
//! Every field has a default so a partial JSON document (or none at all)
//! yields a working configuration. Loading the document from disk or the
//! environment is left to the embedding application.

use serde::{Deserialize, Serialize};

use crate::totp::codec::Base32Codec;
use crate::totp::core;
use crate::totp::types::*;
use crate::totp::verify::VerifyOptions;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AuthenticatorConfig {
    /// Digits per code, `1..=9`.
    pub code_length: u8,
    /// TOTP time step in seconds.
    pub period: u32,
    /// Slices tolerated on either side of the current one.
    pub discrepancy: u32,
    /// Symbols in a generated secret.
    pub secret_length: usize,
    /// Accept lowercase secrets.
    pub case_insensitive: bool,
}

impl Default for AuthenticatorConfig {
    fn default() -> Self {
        Self {
            code_length: DEFAULT_CODE_LENGTH,
            period: DEFAULT_PERIOD,
            discrepancy: DEFAULT_DISCREPANCY,
            secret_length: DEFAULT_SECRET_LENGTH,
            case_insensitive: true,
        }
    }
}

impl AuthenticatorConfig {
    /// Parse and validate a JSON document.
    pub fn from_json(json: &str) -> Result<Self, TotpError> {
        let config: Self = serde_json::from_str(json).map_err(|e| {
            TotpError::new(TotpErrorKind::InvalidConfig, "Malformed authenticator config")
                .with_detail(e.to_string())
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), TotpError> {
        core::validate_code_length(self.code_length)?;
        core::validate_period(self.period)?;
        if self.secret_length == 0 {
            return Err(TotpError::new(
                TotpErrorKind::InvalidConfig,
                "Secret length must be at least one symbol",
            ));
        }
        Ok(())
    }

    pub fn codec(&self) -> Base32Codec {
        Base32Codec::new(self.case_insensitive)
    }

    pub fn verify_options(&self) -> VerifyOptions {
        VerifyOptions {
            discrepancy: self.discrepancy,
            period: self.period,
            code_length: self.code_length,
            codec: self.codec(),
        }
    }
}
