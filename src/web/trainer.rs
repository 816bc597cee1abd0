use askama::Template;
use axum::extract::{Path, Query, State};
use axum::response::{IntoResponse, Redirect, Response};
use axum::{Extension, Form};
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;

use crate::auth::{AuthService, LoginForm, Role, SessionUser};
use crate::models::{
    FitnessGoal, HealthMetric, Member, NewAvailabilityForm, TrainedMemberRow,
};
use crate::services::dashboard::TrainerSchedule;
use crate::services::{DashboardService, MemberService, TrainerService};
use crate::web::error::AppError;
use crate::web::{forms, render, AppState};

#[derive(Template)]
#[template(path = "trainer/login.html")]
struct LoginTemplate {
    error: Option<String>,
}

#[derive(Template)]
#[template(path = "trainer/schedule.html")]
struct ScheduleTemplate {
    name: String,
    schedule: TrainerSchedule,
    notice: Option<String>,
}

#[derive(Template)]
#[template(path = "trainer/availability.html")]
struct AvailabilityTemplate {
    error: Option<String>,
}

#[derive(Template)]
#[template(path = "trainer/members.html")]
struct MembersTemplate {
    members: Vec<TrainedMemberRow>,
}

#[derive(Template)]
#[template(path = "trainer/member_detail.html")]
struct MemberDetailTemplate {
    member: Member,
    metric: Option<HealthMetric>,
    goals: Vec<FitnessGoal>,
}

pub async fn login_page() -> Result<Response, AppError> {
    Ok(render(LoginTemplate { error: None })?.into_response())
}

pub async fn login_submit(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<LoginForm>,
) -> Result<Response, AppError> {
    let auth = AuthService::new(state.db.clone());
    match auth.login(Role::Trainer, &form).await {
        Ok(user) => {
            let cookie = state.sessions.cookie(state.sessions.issue(&user)?);
            Ok((jar.add(cookie), Redirect::to(Role::Trainer.dashboard_path())).into_response())
        }
        Err(err) if err.is_validation() => Ok(render(LoginTemplate {
            error: Some(err.to_string()),
        })?
        .into_response()),
        Err(err) => Err(err.into()),
    }
}

#[derive(Deserialize)]
pub struct ScheduleQuery {
    #[serde(default)]
    availability: Option<u8>,
}

pub async fn schedule(
    State(state): State<AppState>,
    Extension(user): Extension<SessionUser>,
    Query(query): Query<ScheduleQuery>,
) -> Result<Response, AppError> {
    let schedule = DashboardService::new(state.db.clone())
        .trainer_schedule(user.id)
        .await?;
    let notice = query
        .availability
        .map(|_| "Availability set successfully!".to_string());

    Ok(render(ScheduleTemplate {
        name: user.name,
        schedule,
        notice,
    })?
    .into_response())
}

pub async fn availability_page() -> Result<Response, AppError> {
    Ok(render(AvailabilityTemplate { error: None })?.into_response())
}

pub async fn add_availability(
    State(state): State<AppState>,
    Extension(user): Extension<SessionUser>,
    Form(form): Form<NewAvailabilityForm>,
) -> Result<Response, AppError> {
    let parsed = forms::parse_time(&form.start_time)
        .zip(forms::parse_time(&form.end_time));
    let Some((start_time, end_time)) = parsed else {
        return Ok(render(AvailabilityTemplate {
            error: Some("Invalid start or end time.".to_string()),
        })?
        .into_response());
    };

    let trainers = TrainerService::new(state.db.clone());
    match trainers
        .add_availability(user.id, &form.day_of_week, start_time, end_time)
        .await
    {
        Ok(_) => Ok(Redirect::to("/trainer/schedule?availability=1").into_response()),
        Err(err) if err.is_validation() => Ok(render(AvailabilityTemplate {
            error: Some(err.to_string()),
        })?
        .into_response()),
        Err(err) => Err(err.into()),
    }
}

pub async fn members(
    State(state): State<AppState>,
    Extension(user): Extension<SessionUser>,
) -> Result<Response, AppError> {
    let members = TrainerService::new(state.db.clone()).members(user.id).await?;
    Ok(render(MembersTemplate { members })?.into_response())
}

pub async fn member_detail(
    State(state): State<AppState>,
    Path(member_id): Path<i32>,
) -> Result<Response, AppError> {
    let members = MemberService::new(state.db.clone());

    let member = members
        .profile(member_id)
        .await?
        .ok_or(AppError::NotFound)?;
    let metric = members.latest_metric(member_id).await?;
    let goals = members.goals(member_id).await?;
    let goals = goals
        .into_iter()
        .filter(|g| g.status == "Active")
        .collect();

    Ok(render(MemberDetailTemplate {
        member,
        metric,
        goals,
    })?
    .into_response())
}
