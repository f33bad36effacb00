//! RFC 4648 base-32 codec for secrets.
//!
//! Every character is validated against the 32-symbol alphabet before the
//! bit packing (5 bits per symbol, most-significant bit first) is handed
//! to the `base32` crate, so callers get a precise `InvalidEncoding` error
//! naming the offending character instead of a bare failure.

use ::base32::Alphabet;

use crate::totp::types::*;

const ALPHABET: Alphabet = Alphabet::Rfc4648 { padding: false };

/// Base-32 encoder / decoder.
///
/// Decoding is case-insensitive by default since authenticator apps and
/// people copying secrets by hand frequently produce lowercase input.
/// Use [`Base32Codec::strict`] to accept only the canonical uppercase form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Base32Codec {
    pub case_insensitive: bool,
}

impl Default for Base32Codec {
    fn default() -> Self {
        Self {
            case_insensitive: true,
        }
    }
}

impl Base32Codec {
    pub fn new(case_insensitive: bool) -> Self {
        Self { case_insensitive }
    }

    /// Uppercase-only codec.
    pub fn strict() -> Self {
        Self::new(false)
    }

    /// Encode raw bytes (uppercase, no `=` padding).
    ///
    /// The final group is padded with zero bits.
    pub fn encode(&self, bytes: &[u8]) -> String {
        ::base32::encode(ALPHABET, bytes)
    }

    /// Decode a base-32 string into raw bytes.
    ///
    /// Trailing `=` padding is tolerated. Bits left over after the last whole
    /// byte are discarded.
    pub fn decode(&self, input: &str) -> Result<Vec<u8>, TotpError> {
        let unpadded = input.trim_end_matches('=');
        let mut canonical = String::with_capacity(unpadded.len());

        for (pos, c) in unpadded.chars().enumerate() {
            let c = if self.case_insensitive {
                c.to_ascii_uppercase()
            } else {
                c
            };
            if !is_alphabet_char(c) {
                return Err(TotpError::new(
                    TotpErrorKind::InvalidEncoding,
                    "Invalid base-32 character",
                )
                .with_detail(format!("{:?} at position {}", c, pos)));
            }
            canonical.push(c);
        }

        ::base32::decode(ALPHABET, &canonical).ok_or_else(|| {
            TotpError::new(TotpErrorKind::InvalidEncoding, "Invalid base-32 string")
        })
    }

    /// Check if a string decodes under this codec.
    pub fn is_valid(&self, input: &str) -> bool {
        self.decode(input).is_ok()
    }
}

/// `true` for `A`–`Z` and `2`–`7`.
pub fn is_alphabet_char(c: char) -> bool {
    matches!(c, 'A'..='Z' | '2'..='7')
}

/// Normalise a pasted secret: drop grouping spaces and dashes, upper-case.
pub fn normalise(secret: &str) -> String {
    secret
        .chars()
        .filter(|c| *c != ' ' && *c != '-')
        .map(|c| c.to_ascii_uppercase())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{RngCore, SeedableRng};

    // ── RFC 4648 §10 vectors ─────────────────────────────────────

    const RFC4648_VECTORS: [(&str, &str); 7] = [
        ("", ""),
        ("f", "MY"),
        ("fo", "MZXQ"),
        ("foo", "MZXW6"),
        ("foob", "MZXW6YQ"),
        ("fooba", "MZXW6YTB"),
        ("foobar", "MZXW6YTBOI"),
    ];

    #[test]
    fn encode_rfc4648_vectors() {
        let codec = Base32Codec::default();
        for (plain, encoded) in RFC4648_VECTORS {
            assert_eq!(codec.encode(plain.as_bytes()), encoded, "encoding {:?}", plain);
        }
    }

    #[test]
    fn decode_rfc4648_vectors() {
        let codec = Base32Codec::strict();
        for (plain, encoded) in RFC4648_VECTORS {
            assert_eq!(codec.decode(encoded).unwrap(), plain.as_bytes(), "decoding {:?}", encoded);
        }
    }

    #[test]
    fn rfc4226_key_encoding() {
        let codec = Base32Codec::default();
        assert_eq!(
            codec.encode(b"12345678901234567890"),
            "GEZDGNBVGY3TQOJQGEZDGNBVGY3TQOJQ"
        );
    }

    #[test]
    fn roundtrip_arbitrary_bytes() {
        let codec = Base32Codec::default();
        let mut rng = StdRng::seed_from_u64(0x5eed_b32);
        // Covers every residue of the 5-byte group, plus the empty input.
        for len in 0..=64 {
            let mut bytes = vec![0u8; len];
            rng.fill_bytes(&mut bytes);
            let encoded = codec.encode(&bytes);
            assert_eq!(encoded.len(), (len * 8 + 4) / 5, "length {}", len);
            assert_eq!(codec.decode(&encoded).unwrap(), bytes, "length {}", len);
        }
    }

    #[test]
    fn encode_emits_only_alphabet() {
        let codec = Base32Codec::default();
        let bytes: Vec<u8> = (0u8..=255).collect();
        let encoded = codec.encode(&bytes);
        assert!(encoded.chars().all(is_alphabet_char));
        assert!(!encoded.contains('='));
    }

    // ── Validation ───────────────────────────────────────────────

    #[test]
    fn decode_rejects_non_alphabet() {
        let codec = Base32Codec::default();
        for bad in ["MZXW1", "MZXW0", "MZXW8", "MZ W6", "MZ-W6", "!!!"] {
            let err = codec.decode(bad).unwrap_err();
            assert_eq!(err.kind, TotpErrorKind::InvalidEncoding, "input {:?}", bad);
        }
    }

    #[test]
    fn decode_error_names_position() {
        let err = Base32Codec::default().decode("MZX!W6").unwrap_err();
        assert_eq!(err.detail.as_deref(), Some("'!' at position 3"));
    }

    #[test]
    fn decode_case_insensitive_by_default() {
        let codec = Base32Codec::default();
        assert_eq!(codec.decode("mzxw6ytboi").unwrap(), b"foobar");
        assert_eq!(codec.decode("MzXw6YtBoI").unwrap(), b"foobar");
    }

    #[test]
    fn strict_codec_rejects_lowercase() {
        let err = Base32Codec::strict().decode("mzxw6ytboi").unwrap_err();
        assert_eq!(err.kind, TotpErrorKind::InvalidEncoding);
        assert!(Base32Codec::strict().is_valid("MZXW6YTBOI"));
    }

    #[test]
    fn decode_tolerates_trailing_padding() {
        let codec = Base32Codec::default();
        assert_eq!(codec.decode("MZXW6===").unwrap(), b"foo");
        assert_eq!(codec.decode("MY======").unwrap(), b"f");
    }

    #[test]
    fn decode_rejects_inner_padding() {
        let err = Base32Codec::default().decode("MZ=XW6").unwrap_err();
        assert_eq!(err.kind, TotpErrorKind::InvalidEncoding);
    }

    #[test]
    fn decode_discards_incomplete_trailing_bits() {
        let codec = Base32Codec::default();
        assert!(codec.decode("A").unwrap().is_empty());
        assert_eq!(codec.decode("MZX").unwrap(), b"f");
    }

    #[test]
    fn sixteen_symbols_decode_to_ten_bytes() {
        let bytes = Base32Codec::default().decode("JBSWY3DPEHPK3PXP").unwrap();
        assert_eq!(bytes.len(), 10);
    }

    // ── Normalisation ────────────────────────────────────────────

    #[test]
    fn normalise_strips_grouping() {
        assert_eq!(normalise("jbsw y3dp-ehpk 3pxp"), "JBSWY3DPEHPK3PXP");
        assert_eq!(normalise("JBSWY3DPEHPK3PXP"), "JBSWY3DPEHPK3PXP");
    }
}
