//! # gauth-totp – Google Authenticator compatible one-time passcodes
//!
//! Stateless time-based and counter-based one-time password crate:
//!
//! - **RFC 4648 Base32** – Secret encoding / decoding with alphabet validation
//! - **Secret provisioning** – Cryptographically random base-32 secrets
//! - **RFC 4226 / 6238** – HOTP & TOTP generation with HMAC-SHA1
//! - **Verification** – Drift-tolerant, constant-time code comparison
//! - **otpauth:// URIs** – Provisioning links and QR chart links for enrolment
//! - **Authenticator** – Configured facade bundling secret, settings and clock

pub mod totp;
