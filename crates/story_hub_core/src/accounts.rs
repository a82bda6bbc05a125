//! crates/story_hub_core/src/accounts.rs
//!
//! Registration and credential verification.

use tracing::{info, warn};

use crate::domain::{Credentials, Principal, User};
use crate::ports::{DatabaseService, PasswordService, PortError};

#[derive(Debug, thiserror::Error)]
pub enum AccountError {
    #[error("User already exists")]
    DuplicateAccount,
    #[error(transparent)]
    Port(#[from] PortError),
}

/// Creates a password account. The returned `User` never carries the hash.
pub async fn register(
    db: &dyn DatabaseService,
    passwords: &dyn PasswordService,
    credentials: Credentials,
) -> Result<User, AccountError> {
    if db.get_user_by_email(&credentials.email).await?.is_some() {
        return Err(AccountError::DuplicateAccount);
    }

    let hashed_password = passwords.hash_password(&credentials.password)?;

    // A concurrent registration can still win the race; the store's unique
    // constraint turns that into a conflict.
    let user = db
        .create_user_with_email(&credentials.email, &hashed_password)
        .await
        .map_err(|e| match e {
            PortError::Conflict(_) => AccountError::DuplicateAccount,
            other => AccountError::Port(other),
        })?;

    info!(user_id = %user.id, "registered new user");
    Ok(user)
}

/// Verifies an email/password pair.
///
/// Unknown email, an account without a password, and a wrong password all
/// produce `Ok(None)` so callers cannot tell them apart. Only store failures
/// are errors.
pub async fn authenticate(
    db: &dyn DatabaseService,
    passwords: &dyn PasswordService,
    credentials: &Credentials,
) -> Result<Option<Principal>, PortError> {
    let Some(stored) = db.get_user_by_email(&credentials.email).await? else {
        warn!("sign-in rejected");
        return Ok(None);
    };

    let verified = stored
        .hashed_password
        .as_deref()
        .is_some_and(|hash| passwords.verify_password(&credentials.password, hash));

    if !verified {
        warn!("sign-in rejected");
        return Ok(None);
    }

    Ok(Some(Principal::from(&stored.user)))
}
