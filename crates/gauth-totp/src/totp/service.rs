//! High-level facade: one secret, its settings, and a clock.
//!
//! Mirrors how an application usually holds a user's authenticator while
//! handling a request: provision a secret, show the enrolment link, then
//! check the codes the user types. The facade owns no storage; the caller
//! persists [`Authenticator::secret`] wherever it keeps user records.

use std::fmt;

use rand::{CryptoRng, RngCore};

use crate::totp::clock::{Clock, SystemClock};
use crate::totp::config::AuthenticatorConfig;
use crate::totp::core;
use crate::totp::secret::SecretGenerator;
use crate::totp::types::*;
use crate::totp::uri;
use crate::totp::verify;

/// Configured TOTP authenticator.
#[derive(Clone)]
pub struct Authenticator<C = SystemClock> {
    secret: Option<String>,
    config: AuthenticatorConfig,
    clock: C,
}

// The secret never appears in debug output.
impl<C: fmt::Debug> fmt::Debug for Authenticator<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Authenticator")
            .field("secret", &self.secret.as_ref().map(|_| "<redacted>"))
            .field("config", &self.config)
            .field("clock", &self.clock)
            .finish()
    }
}

impl Authenticator<SystemClock> {
    /// Authenticator on the wall clock, without a secret yet.
    pub fn new(config: AuthenticatorConfig) -> Result<Self, TotpError> {
        Self::with_clock(config, SystemClock)
    }

    /// Authenticator on the wall clock for an existing secret.
    pub fn with_secret(
        secret: impl Into<String>,
        config: AuthenticatorConfig,
    ) -> Result<Self, TotpError> {
        let mut auth = Self::new(config)?;
        auth.set_secret(secret)?;
        Ok(auth)
    }
}

impl<C: Clock> Authenticator<C> {
    /// Authenticator reading time from `clock`.
    pub fn with_clock(config: AuthenticatorConfig, clock: C) -> Result<Self, TotpError> {
        config.validate()?;
        Ok(Self {
            secret: None,
            config,
            clock,
        })
    }

    pub fn config(&self) -> &AuthenticatorConfig {
        &self.config
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// The configured base-32 secret, if any.
    pub fn secret(&self) -> Option<&str> {
        self.secret.as_deref()
    }

    /// Replace the secret after checking it decodes to usable key bytes.
    pub fn set_secret(&mut self, secret: impl Into<String>) -> Result<(), TotpError> {
        let secret = secret.into();
        core::decode_secret(&self.config.codec(), &secret)?;
        self.secret = Some(secret);
        log::debug!("authenticator secret replaced");
        Ok(())
    }

    /// Generate a fresh secret from the OS entropy source and keep it.
    pub fn generate_secret(&mut self) -> Result<String, TotpError> {
        self.generate_secret_with(&mut SecretGenerator::new())
    }

    /// Generate a fresh secret with a caller-supplied generator and keep it.
    pub fn generate_secret_with<R: RngCore + CryptoRng>(
        &mut self,
        generator: &mut SecretGenerator<R>,
    ) -> Result<String, TotpError> {
        let secret = generator.generate(self.config.secret_length)?;
        self.secret = Some(secret.clone());
        Ok(secret)
    }

    /// Current time slice according to the clock.
    pub fn current_slice(&self) -> Result<u64, TotpError> {
        core::time_slice(self.clock.unix_seconds(), self.config.period)
    }

    /// Seconds until the current code expires.
    pub fn seconds_remaining(&self) -> Result<u32, TotpError> {
        core::seconds_remaining(self.clock.unix_seconds(), self.config.period)
    }

    /// Code for the current time slice.
    pub fn current_code(&self) -> Result<String, TotpError> {
        let slice = self.current_slice()?;
        self.code_at(slice)
    }

    /// Code for an explicit time slice.
    pub fn code_at(&self, slice: u64) -> Result<String, TotpError> {
        core::compute_with(
            &self.config.codec(),
            self.require_secret()?,
            slice,
            self.config.code_length,
        )
    }

    /// Check a code using the configured drift window.
    pub fn verify_code(&self, candidate: &str) -> Result<bool, TotpError> {
        self.verify_code_with(candidate, self.config.discrepancy)
            .map(|r| r.valid)
    }

    /// Check a code with an explicit drift window.
    pub fn verify_code_with(
        &self,
        candidate: &str,
        discrepancy: u32,
    ) -> Result<VerifyResult, TotpError> {
        let options = self.config.verify_options().with_discrepancy(discrepancy);
        verify::verify_at(
            self.require_secret()?,
            candidate,
            &options,
            self.clock.unix_seconds(),
        )
    }

    /// `otpauth://` enrolment URI for the configured secret.
    pub fn provisioning_uri(&self, account: &str, issuer: &str) -> Result<String, TotpError> {
        Ok(uri::provisioning_uri(self.require_secret()?, account, issuer))
    }

    /// QR image link for the enrolment URI.
    pub fn qr_url(&self, account: &str, issuer: &str) -> Result<String, TotpError> {
        Ok(uri::provisioning_qr_url(self.require_secret()?, account, issuer))
    }

    fn require_secret(&self) -> Result<&str, TotpError> {
        self.secret.as_deref().ok_or_else(|| {
            TotpError::new(TotpErrorKind::InvalidSecret, "No secret configured")
        })
    }
}
