//! Credential checking and the signed-in session.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

use crate::form::SubmitError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub name: String,
    pub email: String,
}

/// An account known to [`StaticAuthenticator`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("no account registered for {0}")]
    UnknownAccount(String),
    #[error("invalid credentials")]
    InvalidCredentials,
}

impl From<AuthError> for SubmitError {
    fn from(err: AuthError) -> Self {
        SubmitError::Rejected(err.to_string())
    }
}

pub trait Authenticator {
    fn sign_in(&self, credentials: &Credentials) -> Result<User, AuthError>;
}

#[derive(Debug, Clone, Default)]
pub struct StaticAuthenticator {
    accounts: Vec<Account>,
}

impl StaticAuthenticator {
    pub fn new(accounts: Vec<Account>) -> Self {
        Self { accounts }
    }
}

impl Authenticator for StaticAuthenticator {
    fn sign_in(&self, credentials: &Credentials) -> Result<User, AuthError> {
        let account = self
            .accounts
            .iter()
            .find(|account| account.email.eq_ignore_ascii_case(credentials.email.trim()))
            .ok_or_else(|| AuthError::UnknownAccount(credentials.email.clone()))?;
        if account.password != credentials.password {
            return Err(AuthError::InvalidCredentials);
        }
        Ok(User {
            name: account.name.clone(),
            email: account.email.clone(),
        })
    }
}

pub struct Session {
    authenticator: Box<dyn Authenticator>,
    user: Option<User>,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("user", &self.user)
            .finish_non_exhaustive()
    }
}

impl Session {
    pub fn new(authenticator: impl Authenticator + 'static) -> Self {
        Self {
            authenticator: Box::new(authenticator),
            user: None,
        }
    }

    pub fn sign_in(&mut self, credentials: &Credentials) -> Result<&User, AuthError> {
        match self.authenticator.sign_in(credentials) {
            Ok(user) => {
                info!(email = %user.email, "signed in");
                Ok(self.user.insert(user))
            }
            Err(err) => {
                warn!(email = %credentials.email, error = %err, "sign-in rejected");
                Err(err)
            }
        }
    }

    pub fn sign_out(&mut self) -> Option<User> {
        let user = self.user.take();
        if let Some(user) = &user {
            info!(email = %user.email, "signed out");
        }
        user
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn is_signed_in(&self) -> bool {
        self.user.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn authenticator() -> StaticAuthenticator {
        StaticAuthenticator::new(vec![Account {
            name: "Ana".into(),
            email: "ana@example.com".into(),
            password: "123456".into(),
        }])
    }

    fn credentials(email: &str, password: &str) -> Credentials {
        Credentials {
            email: email.into(),
            password: password.into(),
        }
    }

    #[test]
    fn email_match_ignores_case() {
        let user = authenticator()
            .sign_in(&credentials("ANA@example.com", "123456"))
            .expect("signed in");
        assert_eq!(user.name, "Ana");
    }

    #[test]
    fn wrong_password_is_rejected() {
        let err = authenticator()
            .sign_in(&credentials("ana@example.com", "nope"))
            .expect_err("rejected");
        assert_eq!(err, AuthError::InvalidCredentials);
    }

    #[test]
    fn session_tracks_user_until_sign_out() {
        let mut session = Session::new(authenticator());
        session
            .sign_in(&credentials("ana@example.com", "123456"))
            .expect("signed in");
        assert!(session.is_signed_in());
        assert_eq!(session.sign_out().map(|user| user.name), Some("Ana".into()));
        assert!(session.user().is_none());
    }

    #[test]
    fn failed_sign_in_keeps_previous_state() {
        let mut session = Session::new(authenticator());
        assert!(session.sign_in(&credentials("who@example.com", "x")).is_err());
        assert!(!session.is_signed_in());
    }
}
