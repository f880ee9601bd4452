//! # Admin Authentication
//!
//! The admin console is only usable with a signed-in [`Session`]. Sign-in goes through an
//! [`AuthProvider`]; the application ships [`StaticCredentials`], which checks against the single
//! admin account from the configuration.

use crate::config::AdminCredentials;
use crate::notice::Notice;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use secrecy::ExposeSecret;
use std::sync::{Mutex, PoisonError};
use thiserror::Error;
use tracing::{info, warn};
use uuid::Uuid;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum AuthError {
    #[error("Invalid login credentials")]
    InvalidCredentials,

    #[error("Email and password are required")]
    MissingCredentials,

    #[error("Auth provider unavailable: {0}")]
    Unavailable(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub token: Uuid,
    pub email: String,
    pub signed_in_at: DateTime<Utc>,
}

#[async_trait]
pub trait AuthProvider: Send + Sync {
    async fn sign_in(&self, email: &str, password: &str) -> Result<Session, AuthError>;

    async fn current_session(&self) -> Option<Session>;

    async fn sign_out(&self) -> Result<(), AuthError>;
}

/// One admin account, held in memory, with at most one live session.
pub struct StaticCredentials {
    credentials: AdminCredentials,
    session: Mutex<Option<Session>>,
}

impl StaticCredentials {
    pub fn new(credentials: AdminCredentials) -> Self {
        Self {
            credentials,
            session: Mutex::new(None),
        }
    }

    fn session(&self) -> std::sync::MutexGuard<'_, Option<Session>> {
        self.session.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl AuthProvider for StaticCredentials {
    async fn sign_in(&self, email: &str, password: &str) -> Result<Session, AuthError> {
        let email = email.trim();
        if email.is_empty() || password.is_empty() {
            return Err(AuthError::MissingCredentials);
        }
        if email != self.credentials.email || password != self.credentials.password.expose_secret()
        {
            warn!(email, "Sign-in rejected");
            return Err(AuthError::InvalidCredentials);
        }

        let session = Session {
            token: Uuid::new_v4(),
            email: email.to_string(),
            signed_in_at: Utc::now(),
        };
        *self.session() = Some(session.clone());
        info!(email, "Signed in");
        Ok(session)
    }

    async fn current_session(&self) -> Option<Session> {
        self.session().clone()
    }

    async fn sign_out(&self) -> Result<(), AuthError> {
        if let Some(session) = self.session().take() {
            info!(email = %session.email, "Signed out");
        }
        Ok(())
    }
}

/// The toast shown after a sign-in attempt.
pub fn sign_in_notice(result: &Result<Session, AuthError>) -> Notice {
    match result {
        Ok(_) => Notice::success("ログインしました"),
        Err(e) => Notice::error(format!("ログインに失敗しました: {e}")),
    }
}
