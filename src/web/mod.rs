// HTTP surface: routers, portal handlers and page rendering.

pub mod admin;
pub mod error;
pub mod forms;
pub mod member;
pub mod routes;
pub mod trainer;

use askama::Template;
use axum::response::Html;
use sqlx::PgPool;

use crate::auth::SessionSigner;
use error::AppError;

/// Request-scoped application state. The pool is the only shared resource;
/// all booking/capacity/payment races are settled at the database.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub sessions: SessionSigner,
}

/// Render a page template to an HTML response.
pub fn render<T: Template>(template: T) -> Result<Html<String>, AppError> {
    Ok(Html(template.render()?))
}
