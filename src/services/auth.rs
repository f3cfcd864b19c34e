use argon2::{
    password_hash::{
        rand_core::OsRng, Error, PasswordHash, PasswordHasher, PasswordVerifier, SaltString,
    },
    Argon2, Params,
};
use chrono::Utc;

use std::sync::OnceLock;

use crate::common::{AuthError, StoreError};
use crate::db::{self, DocumentId, DocumentStore, Record};
use crate::models::{AdminAccount, AdminSession};

pub struct PasswordManager;

static INSTANCE: OnceLock<Argon2> = OnceLock::new();

impl PasswordManager {
    fn engine() -> &'static Argon2<'static> {
        INSTANCE.get_or_init(|| {
            let params = Params::new(
                64 * 1024, // 64MB Memory (m)
                3,         // 3 Iterations (t)
                4,         // 4 Parallelism lanes (p)
                None,
            )
            .unwrap_or_default();

            Argon2::new(argon2::Algorithm::Argon2id, argon2::Version::V0x13, params)
        })
    }

    pub fn hash_password(password: &str) -> Result<String, Error> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Self::engine().hash_password(password.as_bytes(), &salt)?;

        Ok(hash.to_string())
    }

    pub fn verify_password(password: &str, stored_hash: &str) -> Result<bool, Error> {
        let parsed_hash = PasswordHash::new(stored_hash)?;

        match Self::engine().verify_password(password.as_bytes(), &parsed_hash) {
            Ok(_) => Ok(true),
            Err(Error::Password) => Ok(false),
            Err(e) => Err(e),
        }
    }
}

/// Hash verified when the email is unknown, so both paths cost the same.
static DUMMY_HASH: OnceLock<String> = OnceLock::new();

fn dummy_hash() -> &'static str {
    DUMMY_HASH.get_or_init(|| {
        PasswordManager::hash_password("maagap-timing-placeholder").unwrap_or_default()
    })
}

/// Checks credentials. `Ok(None)` covers both an unknown email and a wrong
/// password.
pub async fn authenticate(
    store: &dyn DocumentStore,
    email: &str,
    password: &str,
) -> Result<Option<Record<AdminAccount>>, AuthError> {
    let admin = db::get_admin_by_email(store, email).await?;

    let stored_hash = match &admin {
        Some(admin) => admin.password_hash.as_str(),
        None => dummy_hash(),
    };

    let valid = PasswordManager::verify_password(password, stored_hash).unwrap_or(false);

    Ok(admin.filter(|_| valid))
}

pub async fn start_session(
    store: &dyn DocumentStore,
    admin_id: &DocumentId,
) -> Result<Record<AdminSession>, StoreError> {
    db::create_admin_session(store, admin_id).await
}

/// Looks up a live session. Expired sessions are removed on sight.
pub async fn resolve_session(
    store: &dyn DocumentStore,
    session_id: &DocumentId,
) -> Result<Option<Record<AdminSession>>, StoreError> {
    let Some(session) = db::get_admin_session(store, session_id).await? else {
        return Ok(None);
    };

    if session.is_expired(Utc::now()) {
        db::delete_admin_session(store, &session.id).await?;
        return Ok(None);
    }

    Ok(Some(session))
}

pub async fn end_session(
    store: &dyn DocumentStore,
    session_id: &DocumentId,
) -> Result<bool, StoreError> {
    db::delete_admin_session(store, session_id).await
}

/// Creates the configured admin account unless one with that email exists.
/// Returns whether an account was created.
pub async fn bootstrap_admin(
    store: &dyn DocumentStore,
    email: &str,
    password: &str,
) -> Result<bool, AuthError> {
    if db::get_admin_by_email(store, email).await?.is_some() {
        return Ok(false);
    }

    let password_hash = PasswordManager::hash_password(password)?;
    db::create_admin(store, email, &password_hash).await?;

    Ok(true)
}
