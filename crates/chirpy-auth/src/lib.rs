//! Credential hashing and session tokens.
//!
//! Both components are stateless apart from their configuration: the
//! password hasher carries its cost parameters and the token signer carries
//! keys derived once from the shared secret.

pub mod password;
pub mod token;

pub use password::{PasswordError, PasswordHasher};
pub use token::{TokenError, TokenSigner};
