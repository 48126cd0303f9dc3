//! Credential primitives.
//!
//! - [`CredentialService`] mints and checks signed, time-bounded bearer
//!   tokens whose subject is a user id. Tokens are never stored; a token is
//!   valid exactly when its signature checks out and it has not expired.
//! - [`hash_password`] / [`verify_password`] wrap Argon2id.
//!
//! # Example
//!
//! ```rust
//! use credentials::CredentialService;
//!
//! let service = CredentialService::new(b"an-example-secret-that-is-long-enough", CredentialService::default_ttl());
//! let token = service.issue("user-1").unwrap();
//! assert_eq!(service.verify(&token).unwrap(), "user-1");
//! ```

pub mod error;
pub mod password;
pub mod token;

pub use error::{CredentialError, Result};
pub use password::{hash_password, verify_password};
pub use token::{Claims, CredentialService};
