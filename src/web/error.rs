use askama::Template;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use thiserror::Error;

use crate::auth::AuthError;
use crate::services::{AvailabilityError, BillingError, BookingError};

#[derive(Template)]
#[template(path = "errors/404.html")]
struct NotFoundTemplate;

#[derive(Template)]
#[template(path = "errors/500.html")]
struct ServerErrorTemplate;

/// Generic not-found page.
pub fn not_found_response() -> Response {
    match NotFoundTemplate.render() {
        Ok(body) => (StatusCode::NOT_FOUND, Html(body)).into_response(),
        Err(_) => (StatusCode::NOT_FOUND, "Page not found").into_response(),
    }
}

/// Generic server-error page. Never leaks error internals to the client.
pub fn error_response() -> Response {
    match ServerErrorTemplate.render() {
        Ok(body) => (StatusCode::INTERNAL_SERVER_ERROR, Html(body)).into_response(),
        Err(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Something went wrong").into_response(),
    }
}

/// Errors that escape a handler. Validation-level failures are rendered
/// inline by the handlers themselves; whatever reaches this type is either
/// a missing resource or a server fault scoped to the one request.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Page not found")]
    NotFound,
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error(transparent)]
    Auth(#[from] AuthError),
    #[error("Booking error: {0}")]
    Booking(#[from] BookingError),
    #[error("Billing error: {0}")]
    Billing(#[from] BillingError),
    #[error("Availability error: {0}")]
    Availability(#[from] AvailabilityError),
    #[error("Template error: {0}")]
    Template(#[from] askama::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::NotFound => not_found_response(),
            err => {
                tracing::error!(error = %err, "request failed");
                error_response()
            }
        }
    }
}
