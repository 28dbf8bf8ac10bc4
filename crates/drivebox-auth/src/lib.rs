//! # drivebox-auth
//!
//! Authentication primitives for Drivebox: JWT issuance/verification and
//! Argon2id password hashing. No access-control policy lives here — the
//! ownership guard in `drivebox-service` is the only policy in the system.

pub mod jwt;
pub mod password;

pub use jwt::{AccessToken, Claims, TokenCodec};
pub use password::{hash_password, verify_password};
