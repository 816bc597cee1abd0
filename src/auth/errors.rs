use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::web::error::error_response;

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Invalid email or password")]
    InvalidCredentials,
    #[error("Email already registered")]
    EmailTaken,
    #[error("Session expired")]
    SessionExpired,
    #[error("Invalid session")]
    InvalidSession,
    #[error("Password error: {0}")]
    Password(#[from] crate::auth::password::PasswordError),
    #[error("Session token error: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl AuthError {
    /// Errors a login or registration form recovers from inline. Everything
    /// else is a server fault and surfaces as the generic error page.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            AuthError::InvalidCredentials
                | AuthError::EmailTaken
                | AuthError::Password(_)
        )
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        // Form-level failures are normally rendered inline by the handler;
        // anything that escapes here is treated as a server error.
        tracing::error!(error = %self, "authentication failure escaped handler");
        error_response()
    }
}
