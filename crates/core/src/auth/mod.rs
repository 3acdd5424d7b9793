//! Credential verification and password hashing.
//!
//! This module provides:
//! - Password hashing with Argon2id
//! - The static credential store built from configuration
//! - Session descriptors for authenticated users

mod credentials;
mod password;

pub use credentials::{AuthError, CredentialError, CredentialStore, UserSession};
pub use password::{PasswordError, hash_password, verify_password};
