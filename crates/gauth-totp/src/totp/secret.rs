//! Random secret provisioning.
//!
//! Secrets are drawn symbol by symbol from the base-32 alphabet. The
//! requested length is a *symbol* count, not a byte count: a length that is
//! not a multiple of 8 yields a string whose trailing bits do not fill a
//! whole byte, and those bits are simply dropped when the secret is decoded.
//! The default of 16 symbols decodes to exactly 10 key bytes.

use rand::rngs::OsRng;
use rand::{CryptoRng, RngCore};

use crate::totp::types::*;

/// Generates base-32 secrets from a cryptographically secure RNG.
///
/// The RNG is owned by the generator; `R` must implement [`CryptoRng`], so a
/// non-cryptographic generator cannot be plugged in by accident.
#[derive(Debug, Clone)]
pub struct SecretGenerator<R = OsRng> {
    rng: R,
}

impl SecretGenerator<OsRng> {
    /// Generator backed by the operating system's entropy source.
    pub fn new() -> Self {
        Self { rng: OsRng }
    }
}

impl Default for SecretGenerator<OsRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: RngCore + CryptoRng> SecretGenerator<R> {
    /// Generator backed by a caller-supplied RNG.
    pub fn with_rng(rng: R) -> Self {
        Self { rng }
    }

    /// Generate a secret of exactly `length` base-32 symbols.
    pub fn generate(&mut self, length: usize) -> Result<String, TotpError> {
        if length == 0 {
            return Err(TotpError::new(
                TotpErrorKind::InvalidSecret,
                "Secret length must be at least one symbol",
            ));
        }

        let mut buf = vec![0u8; length];
        self.rng.try_fill_bytes(&mut buf).map_err(|e| {
            log::warn!("random source unavailable while generating secret: {}", e);
            TotpError::new(TotpErrorKind::InsufficientEntropy, "Random source unavailable")
                .with_detail(e.to_string())
        })?;

        // 256 is a multiple of 32, so masking to 5 bits keeps every symbol
        // equally likely.
        let secret: String = buf
            .iter()
            .map(|b| BASE32_ALPHABET[(b & 0x1f) as usize] as char)
            .collect();
        buf.fill(0);
        Ok(secret)
    }

    /// Generate a secret of [`DEFAULT_SECRET_LENGTH`] symbols.
    pub fn generate_default(&mut self) -> Result<String, TotpError> {
        self.generate(DEFAULT_SECRET_LENGTH)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::totp::codec::{is_alphabet_char, Base32Codec};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    struct BrokenRng;

    impl RngCore for BrokenRng {
        fn next_u32(&mut self) -> u32 {
            unreachable!("generator must use try_fill_bytes")
        }
        fn next_u64(&mut self) -> u64 {
            unreachable!("generator must use try_fill_bytes")
        }
        fn fill_bytes(&mut self, _dest: &mut [u8]) {
            unreachable!("generator must use try_fill_bytes")
        }
        fn try_fill_bytes(&mut self, _dest: &mut [u8]) -> Result<(), rand::Error> {
            Err(rand::Error::new("entropy source offline"))
        }
    }

    impl CryptoRng for BrokenRng {}

    #[test]
    fn default_length_is_sixteen() {
        let secret = SecretGenerator::new().generate_default().unwrap();
        assert_eq!(secret.len(), 16);
        assert!(secret.chars().all(is_alphabet_char));
    }

    #[test]
    fn exact_length_for_any_count() {
        let mut generator = SecretGenerator::new();
        for len in [1usize, 7, 16, 26, 32, 64] {
            let secret = generator.generate(len).unwrap();
            assert_eq!(secret.len(), len);
            assert!(secret.chars().all(is_alphabet_char));
        }
    }

    #[test]
    fn sixteen_symbols_decode_to_ten_bytes() {
        let secret = SecretGenerator::new().generate(16).unwrap();
        assert_eq!(Base32Codec::strict().decode(&secret).unwrap().len(), 10);
    }

    #[test]
    fn zero_length_rejected() {
        let err = SecretGenerator::new().generate(0).unwrap_err();
        assert_eq!(err.kind, TotpErrorKind::InvalidSecret);
    }

    #[test]
    fn seeded_rng_is_reproducible() {
        let a = SecretGenerator::with_rng(StdRng::seed_from_u64(7)).generate(32).unwrap();
        let b = SecretGenerator::with_rng(StdRng::seed_from_u64(7)).generate(32).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn successive_secrets_differ() {
        let mut generator = SecretGenerator::new();
        let a = generator.generate(32).unwrap();
        let b = generator.generate(32).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn every_symbol_reachable() {
        let mut generator = SecretGenerator::with_rng(StdRng::seed_from_u64(42));
        let secret = generator.generate(4096).unwrap();
        for &c in BASE32_ALPHABET.iter() {
            assert!(secret.contains(c as char), "symbol {} never drawn", c as char);
        }
    }

    #[test]
    fn broken_rng_reports_insufficient_entropy() {
        let err = SecretGenerator::with_rng(BrokenRng).generate(16).unwrap_err();
        assert_eq!(err.kind, TotpErrorKind::InsufficientEntropy);
        assert!(err.is_transient());
        assert!(err.detail.unwrap().contains("entropy source offline"));
    }
}
