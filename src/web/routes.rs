use askama::Template;
use axum::{
    http::{header::HeaderName, HeaderValue},
    middleware,
    response::{IntoResponse, Redirect, Response},
    routing::{get, post},
    Json, Router,
};
use axum_extra::extract::cookie::CookieJar;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

use crate::auth::{require_admin, require_member, require_trainer, SessionSigner};
use crate::web::error::{not_found_response, AppError};
use crate::web::{admin, member, render, trainer, AppState};

#[derive(Template)]
#[template(path = "index.html")]
struct IndexTemplate;

pub fn create_routes(state: AppState) -> Router {
    let member_portal = Router::new()
        .route("/dashboard", get(member::dashboard))
        .route("/profile", get(member::profile))
        .route("/profile/contact", post(member::update_contact))
        .route("/profile/goals", post(member::add_goal))
        .route("/profile/metrics", post(member::record_metric))
        .route(
            "/schedule-training",
            get(member::schedule_training).post(member::book_session),
        )
        .route("/classes", get(member::classes).post(member::register_class))
        .route("/sessions/:id/cancel", post(member::cancel_session))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_member,
        ));

    let member_routes = Router::new()
        .route(
            "/register",
            get(member::register_page).post(member::register_submit),
        )
        .route("/login", get(member::login_page).post(member::login_submit))
        .merge(member_portal);

    let trainer_portal = Router::new()
        .route("/schedule", get(trainer::schedule))
        .route(
            "/availability",
            get(trainer::availability_page).post(trainer::add_availability),
        )
        .route("/members", get(trainer::members))
        .route("/member/:id", get(trainer::member_detail))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_trainer,
        ));

    let trainer_routes = Router::new()
        .route(
            "/login",
            get(trainer::login_page).post(trainer::login_submit),
        )
        .merge(trainer_portal);

    let admin_portal = Router::new()
        .route("/dashboard", get(admin::dashboard))
        .route("/rooms", get(admin::rooms).post(admin::create_room))
        .route("/rooms/:id", post(admin::update_room))
        .route(
            "/equipment",
            get(admin::equipment).post(admin::add_equipment),
        )
        .route("/equipment/:id/status", post(admin::update_equipment_status))
        .route("/billing", get(admin::billing))
        .route("/billing/bills", post(admin::generate_bill))
        .route("/billing/payments", post(admin::record_payment))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_admin));

    let admin_routes = Router::new()
        .route("/login", get(admin::login_page).post(admin::login_submit))
        .merge(admin_portal);

    Router::new()
        .route("/", get(index))
        .route("/health", get(health_check))
        .route("/logout", get(logout))
        .nest("/member", member_routes)
        .nest("/trainer", trainer_routes)
        .nest("/admin", admin_routes)
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .layer(SetResponseHeaderLayer::overriding(
            HeaderName::from_static("x-content-type-options"),
            HeaderValue::from_static("nosniff"),
        ))
        .with_state(state)
}

/// Landing page.
async fn index() -> Result<Response, AppError> {
    Ok(render(IndexTemplate)?.into_response())
}

async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

/// Clear the session cookie regardless of which portal it was issued for.
async fn logout(jar: CookieJar) -> Response {
    (
        jar.remove(SessionSigner::clear_cookie()),
        Redirect::to("/"),
    )
        .into_response()
}

async fn not_found() -> Response {
    not_found_response()
}
