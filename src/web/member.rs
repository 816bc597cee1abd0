use askama::Template;
use axum::extract::{Path, Query, State};
use axum::response::{IntoResponse, Redirect, Response};
use axum::{Extension, Form};
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;

use crate::auth::{
    AuthService, LoginForm, RegisterMemberForm, Role, SessionUser,
};
use crate::models::{
    BookSessionForm, FitnessGoal, HealthMetric, Member, NewFitnessGoalForm, NewHealthMetricForm,
    OpenClassRow, RegisterClassForm, RegisteredClassRow, Trainer, UpcomingSessionRow,
    UpdateContactForm,
};
use crate::services::booking::BookSessionRequest;
use crate::services::dashboard::MemberDashboard;
use crate::services::{BookingError, BookingService, DashboardService, MemberService, TrainerService};
use crate::web::error::AppError;
use crate::web::{forms, render, AppState};

#[derive(Template)]
#[template(path = "member/login.html")]
struct LoginTemplate {
    error: Option<String>,
    notice: Option<String>,
}

#[derive(Template)]
#[template(path = "member/register.html")]
struct RegisterTemplate {
    error: Option<String>,
}

#[derive(Template)]
#[template(path = "member/dashboard.html")]
struct DashboardTemplate {
    name: String,
    summary: Option<MemberDashboard>,
    goals: Vec<FitnessGoal>,
    sessions: Vec<UpcomingSessionRow>,
    classes: Vec<RegisteredClassRow>,
    notice: Option<String>,
}

#[derive(Template)]
#[template(path = "member/profile.html")]
struct ProfileTemplate {
    member: Member,
    metrics: Vec<HealthMetric>,
    goals: Vec<FitnessGoal>,
    notice: Option<String>,
}

#[derive(Template)]
#[template(path = "member/schedule_training.html")]
struct ScheduleTrainingTemplate {
    trainers: Vec<Trainer>,
    error: Option<String>,
}

#[derive(Template)]
#[template(path = "member/classes.html")]
struct ClassesTemplate {
    classes: Vec<OpenClassRow>,
    error: Option<String>,
    notice: Option<String>,
}

#[derive(Deserialize)]
pub struct LoginQuery {
    #[serde(default)]
    registered: Option<u8>,
}

pub async fn login_page(Query(query): Query<LoginQuery>) -> Result<Response, AppError> {
    let notice = query
        .registered
        .map(|_| "Registration successful! Please log in.".to_string());
    Ok(render(LoginTemplate { error: None, notice })?.into_response())
}

pub async fn login_submit(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<LoginForm>,
) -> Result<Response, AppError> {
    let auth = AuthService::new(state.db.clone());
    match auth.login(Role::Member, &form).await {
        Ok(user) => {
            let cookie = state.sessions.cookie(state.sessions.issue(&user)?);
            Ok((jar.add(cookie), Redirect::to(Role::Member.dashboard_path())).into_response())
        }
        Err(err) if err.is_validation() => Ok(render(LoginTemplate {
            error: Some(err.to_string()),
            notice: None,
        })?
        .into_response()),
        Err(err) => Err(err.into()),
    }
}

pub async fn register_page() -> Result<Response, AppError> {
    Ok(render(RegisterTemplate { error: None })?.into_response())
}

pub async fn register_submit(
    State(state): State<AppState>,
    Form(form): Form<RegisterMemberForm>,
) -> Result<Response, AppError> {
    let auth = AuthService::new(state.db.clone());
    match auth.register_member(&form).await {
        Ok(_) => Ok(Redirect::to("/member/login?registered=1").into_response()),
        Err(err) if err.is_validation() => Ok(render(RegisterTemplate {
            error: Some(err.to_string()),
        })?
        .into_response()),
        Err(err) => Err(err.into()),
    }
}

#[derive(Deserialize)]
pub struct DashboardQuery {
    #[serde(default)]
    booked: Option<u8>,
    #[serde(default)]
    cancelled: Option<u8>,
}

pub async fn dashboard(
    State(state): State<AppState>,
    Extension(user): Extension<SessionUser>,
    Query(query): Query<DashboardQuery>,
) -> Result<Response, AppError> {
    let dashboards = DashboardService::new(state.db.clone());

    let summary = dashboards.member_summary(user.id).await?;
    let goals = dashboards.member_active_goals(user.id).await?;
    let sessions = dashboards.member_upcoming_sessions(user.id).await?;
    let classes = dashboards.member_registered_classes(user.id).await?;

    let notice = if query.booked.is_some() {
        Some("Session booked successfully!".to_string())
    } else if query.cancelled.is_some() {
        Some("Session cancelled.".to_string())
    } else {
        None
    };

    Ok(render(DashboardTemplate {
        name: user.name,
        summary,
        goals,
        sessions,
        classes,
        notice,
    })?
    .into_response())
}

#[derive(Deserialize)]
pub struct ProfileQuery {
    #[serde(default)]
    saved: Option<u8>,
}

pub async fn profile(
    State(state): State<AppState>,
    Extension(user): Extension<SessionUser>,
    Query(query): Query<ProfileQuery>,
) -> Result<Response, AppError> {
    let members = MemberService::new(state.db.clone());

    let member = members.profile(user.id).await?.ok_or(AppError::NotFound)?;
    let metrics = members.recent_metrics(user.id).await?;
    let goals = members.goals(user.id).await?;

    let notice = query.saved.map(|_| "Profile updated.".to_string());

    Ok(render(ProfileTemplate {
        member,
        metrics,
        goals,
        notice,
    })?
    .into_response())
}

pub async fn update_contact(
    State(state): State<AppState>,
    Extension(user): Extension<SessionUser>,
    Form(form): Form<UpdateContactForm>,
) -> Result<Response, AppError> {
    MemberService::new(state.db.clone())
        .update_contact(user.id, &form)
        .await?;
    Ok(Redirect::to("/member/profile?saved=1").into_response())
}

pub async fn add_goal(
    State(state): State<AppState>,
    Extension(user): Extension<SessionUser>,
    Form(form): Form<NewFitnessGoalForm>,
) -> Result<Response, AppError> {
    MemberService::new(state.db.clone())
        .add_goal(user.id, &form)
        .await?;
    Ok(Redirect::to("/member/profile?saved=1").into_response())
}

pub async fn record_metric(
    State(state): State<AppState>,
    Extension(user): Extension<SessionUser>,
    Form(form): Form<NewHealthMetricForm>,
) -> Result<Response, AppError> {
    MemberService::new(state.db.clone())
        .record_metric(user.id, &form)
        .await?;
    Ok(Redirect::to("/member/profile?saved=1").into_response())
}

pub async fn schedule_training(State(state): State<AppState>) -> Result<Response, AppError> {
    let trainers = TrainerService::new(state.db.clone()).list_trainers().await?;
    Ok(render(ScheduleTrainingTemplate {
        trainers,
        error: None,
    })?
    .into_response())
}

pub async fn book_session(
    State(state): State<AppState>,
    Extension(user): Extension<SessionUser>,
    Form(form): Form<BookSessionForm>,
) -> Result<Response, AppError> {
    let booking = BookingService::new(state.db.clone());

    let parsed = forms::parse_date(&form.session_date).and_then(|date| {
        let start = forms::parse_time(&form.start_time)?;
        let end = forms::parse_time(&form.end_time)?;
        Some((date, start, end))
    });
    let Some((session_date, start_time, end_time)) = parsed else {
        return booking_form_error(&state, "Invalid session date or time.").await;
    };

    let room_id = match form.room_id {
        Some(room_id) => room_id,
        None => match booking.find_free_room(session_date, start_time, end_time).await {
            Ok(room_id) => room_id,
            Err(err) if err.is_validation() => {
                return booking_form_error(&state, &err.to_string()).await;
            }
            Err(err) => return Err(err.into()),
        },
    };

    let request = BookSessionRequest {
        member_id: user.id,
        trainer_id: form.trainer_id,
        room_id,
        session_date,
        start_time,
        end_time,
        notes: form.notes.filter(|s| !s.is_empty()),
    };

    match booking.book_session(request).await {
        Ok(_) => Ok(Redirect::to("/member/dashboard?booked=1").into_response()),
        Err(err) if err.is_validation() => booking_form_error(&state, &err.to_string()).await,
        Err(err) => Err(err.into()),
    }
}

async fn booking_form_error(state: &AppState, message: &str) -> Result<Response, AppError> {
    let trainers = TrainerService::new(state.db.clone()).list_trainers().await?;
    Ok(render(ScheduleTrainingTemplate {
        trainers,
        error: Some(message.to_string()),
    })?
    .into_response())
}

#[derive(Deserialize)]
pub struct ClassesQuery {
    #[serde(default)]
    registered: Option<u8>,
}

pub async fn classes(
    State(state): State<AppState>,
    Query(query): Query<ClassesQuery>,
) -> Result<Response, AppError> {
    let classes = BookingService::new(state.db.clone()).open_classes().await?;
    let notice = query
        .registered
        .map(|_| "Successfully registered for class!".to_string());
    Ok(render(ClassesTemplate {
        classes,
        error: None,
        notice,
    })?
    .into_response())
}

pub async fn register_class(
    State(state): State<AppState>,
    Extension(user): Extension<SessionUser>,
    Form(form): Form<RegisterClassForm>,
) -> Result<Response, AppError> {
    let booking = BookingService::new(state.db.clone());

    match booking.register_for_class(user.id, form.class_id).await {
        Ok(()) => Ok(Redirect::to("/member/classes?registered=1").into_response()),
        Err(err) if err.is_validation() => {
            let classes = booking.open_classes().await?;
            Ok(render(ClassesTemplate {
                classes,
                error: Some(err.to_string()),
                notice: None,
            })?
            .into_response())
        }
        Err(err) => Err(err.into()),
    }
}

pub async fn cancel_session(
    State(state): State<AppState>,
    Extension(user): Extension<SessionUser>,
    Path(session_id): Path<i32>,
) -> Result<Response, AppError> {
    match BookingService::new(state.db.clone())
        .cancel_session(user.id, session_id)
        .await
    {
        Ok(()) => Ok(Redirect::to("/member/dashboard?cancelled=1").into_response()),
        Err(BookingError::UnknownSession) => Err(AppError::NotFound),
        Err(err) => Err(err.into()),
    }
}
