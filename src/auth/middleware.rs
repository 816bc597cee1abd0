use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::CookieJar;

use crate::auth::{Role, SESSION_COOKIE};
use crate::web::AppState;

/// Role-gated session guard.
///
/// Reads the signed session cookie, checks the embedded role against the
/// portal's required role and attaches the `SessionUser` to the request.
/// Any failure redirects to the portal's login page; the guard never fails
/// the request harder than that.
async fn require_role(
    role: Role,
    state: AppState,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Response {
    let Some(cookie) = jar.get(SESSION_COOKIE) else {
        return Redirect::to(role.login_path()).into_response();
    };

    match state.sessions.validate(cookie.value()) {
        Ok(user) if user.role == role => {
            request.extensions_mut().insert(user);
            next.run(request).await
        }
        _ => Redirect::to(role.login_path()).into_response(),
    }
}

pub async fn require_member(
    State(state): State<AppState>,
    jar: CookieJar,
    request: Request,
    next: Next,
) -> Response {
    require_role(Role::Member, state, jar, request, next).await
}

pub async fn require_trainer(
    State(state): State<AppState>,
    jar: CookieJar,
    request: Request,
    next: Next,
) -> Response {
    require_role(Role::Trainer, state, jar, request, next).await
}

pub async fn require_admin(
    State(state): State<AppState>,
    jar: CookieJar,
    request: Request,
    next: Next,
) -> Response {
    require_role(Role::Admin, state, jar, request, next).await
}
