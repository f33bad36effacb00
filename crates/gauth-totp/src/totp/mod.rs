//! TOTP crate: sub-modules.

pub mod types;
pub mod codec;
pub mod secret;
pub mod core;
pub mod clock;
pub mod verify;
pub mod config;
pub mod uri;
pub mod service;

// Re-export top-level items for convenience.
pub use types::*;
pub use codec::Base32Codec;
pub use secret::SecretGenerator;
pub use clock::{Clock, FixedClock, SystemClock};
pub use verify::{verify, verify_at, VerifyOptions};
pub use config::AuthenticatorConfig;
pub use service::Authenticator;
