//! Static credential store and login verification.
//!
//! Accounts come from configuration at process start and never change at
//! runtime. Authentication failures are distinguished for operational logs
//! (`UnknownUser` vs `NotConfigured` vs `InvalidCredentials`) but must be
//! presented identically to the end user.

use std::collections::HashMap;

use thiserror::Error;

use crate::access::Role;
use crate::auth::password::{PasswordError, verify_password};
use offertory_shared::config::UserAccount;

/// Errors raised while building the credential store from configuration.
#[derive(Debug, Error)]
pub enum CredentialError {
    /// An account names a role outside the fixed role table.
    #[error("unknown role `{role}` for user `{username}`")]
    UnknownRole {
        /// The offending account.
        username: String,
        /// The unrecognized role name.
        role: String,
    },

    /// Two accounts share a username.
    #[error("duplicate username `{0}`")]
    DuplicateUsername(String),
}

/// Authentication failures.
///
/// All variants surface to the end user as one generic "invalid credentials"
/// message; only logs distinguish them.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuthError {
    /// No account with that username exists.
    #[error("unknown user")]
    UnknownUser,

    /// The account exists but no usable password hash was provisioned.
    #[error("no password hash configured for user")]
    NotConfigured,

    /// The password does not match the stored hash.
    #[error("invalid credentials")]
    InvalidCredentials,
}

/// An authenticated session descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserSession {
    /// Login name, also the owner key on entries.
    pub username: String,
    /// Human-readable name.
    pub display_name: String,
    /// Capability role.
    pub role: Role,
}

#[derive(Debug, Clone)]
struct Account {
    password_hash: Option<String>,
    role: Role,
    display_name: String,
}

/// Immutable username → account mapping.
#[derive(Debug, Clone)]
pub struct CredentialStore {
    accounts: HashMap<String, Account>,
}

impl CredentialStore {
    /// Builds the store from configured accounts.
    ///
    /// # Errors
    ///
    /// Returns an error on an unrecognized role name or a duplicate username,
    /// so a misconfigured deployment fails at startup instead of at login.
    pub fn from_accounts(accounts: &[UserAccount]) -> Result<Self, CredentialError> {
        let mut map = HashMap::with_capacity(accounts.len());

        for account in accounts {
            let role: Role =
                account
                    .role
                    .parse()
                    .map_err(|_| CredentialError::UnknownRole {
                        username: account.username.clone(),
                        role: account.role.clone(),
                    })?;

            let previous = map.insert(
                account.username.clone(),
                Account {
                    password_hash: account.password_hash.clone(),
                    role,
                    display_name: account.display_name.clone(),
                },
            );
            if previous.is_some() {
                return Err(CredentialError::DuplicateUsername(account.username.clone()));
            }
        }

        Ok(Self { accounts: map })
    }

    /// Returns the number of configured accounts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    /// Returns true if no accounts are configured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    /// Verifies a username/password pair.
    ///
    /// # Errors
    ///
    /// - `UnknownUser` if the username is not in the store.
    /// - `NotConfigured` if the account has no usable hash (missing secret or
    ///   a malformed PHC string).
    /// - `InvalidCredentials` if the password does not match.
    pub fn authenticate(&self, username: &str, password: &str) -> Result<UserSession, AuthError> {
        let account = self.accounts.get(username).ok_or(AuthError::UnknownUser)?;

        let hash = account
            .password_hash
            .as_deref()
            .filter(|h| !h.is_empty())
            .ok_or(AuthError::NotConfigured)?;

        let matched = verify_password(password, hash).map_err(|e| match e {
            // An unusable stored hash is a provisioning gap, not a bad login.
            PasswordError::InvalidHash | PasswordError::VerifyError(_) => AuthError::NotConfigured,
            PasswordError::HashError(_) => AuthError::InvalidCredentials,
        })?;

        if !matched {
            return Err(AuthError::InvalidCredentials);
        }

        Ok(UserSession {
            username: username.to_string(),
            display_name: account.display_name.clone(),
            role: account.role,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::password::hash_password;

    fn account(username: &str, hash: Option<String>, role: &str) -> UserAccount {
        UserAccount {
            username: username.to_string(),
            password_hash: hash,
            role: role.to_string(),
            display_name: format!("User {username}"),
        }
    }

    fn store_with(hash: Option<String>) -> CredentialStore {
        CredentialStore::from_accounts(&[account("treasurer", hash, "admin")]).unwrap()
    }

    #[test]
    fn test_authenticate_success() {
        let hash = hash_password("open sesame").unwrap();
        let store = store_with(Some(hash));

        let session = store.authenticate("treasurer", "open sesame").unwrap();
        assert_eq!(session.username, "treasurer");
        assert_eq!(session.display_name, "User treasurer");
        assert_eq!(session.role, Role::Admin);
    }

    #[test]
    fn test_wrong_password() {
        let hash = hash_password("open sesame").unwrap();
        let store = store_with(Some(hash));

        assert_eq!(
            store.authenticate("treasurer", "closed sesame"),
            Err(AuthError::InvalidCredentials)
        );
    }

    #[test]
    fn test_unknown_user() {
        let store = store_with(Some(hash_password("x").unwrap()));
        assert_eq!(
            store.authenticate("nobody", "x"),
            Err(AuthError::UnknownUser)
        );
    }

    #[test]
    fn test_missing_hash_is_not_configured() {
        let store = store_with(None);
        assert_eq!(
            store.authenticate("treasurer", "anything"),
            Err(AuthError::NotConfigured)
        );
    }

    #[test]
    fn test_empty_hash_is_not_configured() {
        let store = store_with(Some(String::new()));
        assert_eq!(
            store.authenticate("treasurer", "anything"),
            Err(AuthError::NotConfigured)
        );
    }

    #[test]
    fn test_malformed_hash_is_not_configured() {
        let store = store_with(Some("plaintext-by-accident".to_string()));
        assert_eq!(
            store.authenticate("treasurer", "plaintext-by-accident"),
            Err(AuthError::NotConfigured)
        );
    }

    #[test]
    fn test_unknown_role_rejected_at_build() {
        let result = CredentialStore::from_accounts(&[account("x", None, "superuser")]);
        assert!(matches!(result, Err(CredentialError::UnknownRole { .. })));
    }

    #[test]
    fn test_duplicate_username_rejected_at_build() {
        let result = CredentialStore::from_accounts(&[
            account("x", None, "viewer"),
            account("x", None, "editor"),
        ]);
        assert!(matches!(result, Err(CredentialError::DuplicateUsername(_))));
    }
}
