use std::str::FromStr;

use askama::Template;
use axum::extract::{Path, Query, State};
use axum::response::{IntoResponse, Redirect, Response};
use axum::Form;
use axum_extra::extract::cookie::CookieJar;
use bigdecimal::BigDecimal;
use serde::Deserialize;

use crate::auth::{AuthService, LoginForm, Role};
use crate::models::{
    BillRow, EquipmentRow, EquipmentStatusForm, NewBillForm, NewEquipmentForm, NewPaymentForm,
    NewRoomForm, Room, UpdateRoomForm,
};
use crate::services::dashboard::AdminOverview;
use crate::services::{BillingService, DashboardService, FacilityService};
use crate::web::error::AppError;
use crate::web::{render, AppState};

#[derive(Template)]
#[template(path = "admin/login.html")]
struct LoginTemplate {
    error: Option<String>,
}

#[derive(Template)]
#[template(path = "admin/dashboard.html")]
struct DashboardTemplate {
    overview: AdminOverview,
}

#[derive(Template)]
#[template(path = "admin/rooms.html")]
struct RoomsTemplate {
    rooms: Vec<Room>,
    notice: Option<String>,
}

#[derive(Template)]
#[template(path = "admin/equipment.html")]
struct EquipmentTemplate {
    equipment: Vec<EquipmentRow>,
    notice: Option<String>,
}

#[derive(Template)]
#[template(path = "admin/billing.html")]
struct BillingTemplate {
    bills: Vec<BillRow>,
    error: Option<String>,
    notice: Option<String>,
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
    match auth.login(Role::Admin, &form).await {
        Ok(user) => {
            let cookie = state.sessions.cookie(state.sessions.issue(&user)?);
            Ok((jar.add(cookie), Redirect::to(Role::Admin.dashboard_path())).into_response())
        }
        Err(err) if err.is_validation() => Ok(render(LoginTemplate {
            error: Some(err.to_string()),
        })?
        .into_response()),
        Err(err) => Err(err.into()),
    }
}

pub async fn dashboard(State(state): State<AppState>) -> Result<Response, AppError> {
    let overview = DashboardService::new(state.db.clone())
        .admin_overview()
        .await?;
    Ok(render(DashboardTemplate { overview })?.into_response())
}

#[derive(Deserialize)]
pub struct SavedQuery {
    #[serde(default)]
    saved: Option<u8>,
}

pub async fn rooms(
    State(state): State<AppState>,
    Query(query): Query<SavedQuery>,
) -> Result<Response, AppError> {
    let rooms = FacilityService::new(state.db.clone()).rooms().await?;
    let notice = query.saved.map(|_| "Room saved.".to_string());
    Ok(render(RoomsTemplate { rooms, notice })?.into_response())
}

pub async fn create_room(
    State(state): State<AppState>,
    Form(form): Form<NewRoomForm>,
) -> Result<Response, AppError> {
    FacilityService::new(state.db.clone())
        .create_room(&form)
        .await?;
    Ok(Redirect::to("/admin/rooms?saved=1").into_response())
}

pub async fn update_room(
    State(state): State<AppState>,
    Path(room_id): Path<i32>,
    Form(form): Form<UpdateRoomForm>,
) -> Result<Response, AppError> {
    let updated = FacilityService::new(state.db.clone())
        .update_room(room_id, &form)
        .await?;
    if !updated {
        return Err(AppError::NotFound);
    }
    Ok(Redirect::to("/admin/rooms?saved=1").into_response())
}

pub async fn equipment(
    State(state): State<AppState>,
    Query(query): Query<SavedQuery>,
) -> Result<Response, AppError> {
    let equipment = FacilityService::new(state.db.clone()).equipment().await?;
    let notice = query.saved.map(|_| "Equipment updated.".to_string());
    Ok(render(EquipmentTemplate { equipment, notice })?.into_response())
}

pub async fn add_equipment(
    State(state): State<AppState>,
    Form(form): Form<NewEquipmentForm>,
) -> Result<Response, AppError> {
    FacilityService::new(state.db.clone())
        .add_equipment(&form)
        .await?;
    Ok(Redirect::to("/admin/equipment?saved=1").into_response())
}

pub async fn update_equipment_status(
    State(state): State<AppState>,
    Path(equipment_id): Path<i32>,
    Form(form): Form<EquipmentStatusForm>,
) -> Result<Response, AppError> {
    let updated = FacilityService::new(state.db.clone())
        .update_equipment_status(
            equipment_id,
            &form.status,
            form.notes.as_deref().filter(|s| !s.is_empty()),
        )
        .await?;
    if !updated {
        return Err(AppError::NotFound);
    }
    Ok(Redirect::to("/admin/equipment?saved=1").into_response())
}

#[derive(Deserialize)]
pub struct BillingQuery {
    #[serde(default)]
    billed: Option<u8>,
    #[serde(default)]
    paid: Option<u8>,
}

pub async fn billing(
    State(state): State<AppState>,
    Query(query): Query<BillingQuery>,
) -> Result<Response, AppError> {
    let notice = if query.billed.is_some() {
        Some("Bill generated successfully!".to_string())
    } else if query.paid.is_some() {
        Some("Payment recorded successfully!".to_string())
    } else {
        None
    };
    render_billing(&state, None, notice).await
}

pub async fn generate_bill(
    State(state): State<AppState>,
    Form(form): Form<NewBillForm>,
) -> Result<Response, AppError> {
    let Ok(amount) = BigDecimal::from_str(form.amount.trim()) else {
        return render_billing(&state, Some("Invalid bill amount.".to_string()), None).await;
    };

    let billing = BillingService::new(state.db.clone());
    match billing
        .generate_bill(form.member_id, &form.description, amount, form.due_days)
        .await
    {
        Ok(_) => Ok(Redirect::to("/admin/billing?billed=1").into_response()),
        Err(err) if err.is_validation() => {
            render_billing(&state, Some(err.to_string()), None).await
        }
        Err(err) => Err(err.into()),
    }
}

pub async fn record_payment(
    State(state): State<AppState>,
    Form(form): Form<NewPaymentForm>,
) -> Result<Response, AppError> {
    let Ok(amount) = BigDecimal::from_str(form.amount.trim()) else {
        return render_billing(&state, Some("Invalid payment amount.".to_string()), None).await;
    };

    let billing = BillingService::new(state.db.clone());
    match billing
        .record_payment(
            form.bill_id,
            amount,
            &form.method,
            form.reference.as_deref().filter(|s| !s.is_empty()),
        )
        .await
    {
        Ok(_) => Ok(Redirect::to("/admin/billing?paid=1").into_response()),
        Err(err) if err.is_validation() => {
            render_billing(&state, Some(err.to_string()), None).await
        }
        Err(err) => Err(err.into()),
    }
}

async fn render_billing(
    state: &AppState,
    error: Option<String>,
    notice: Option<String>,
) -> Result<Response, AppError> {
    let bills = BillingService::new(state.db.clone()).recent_bills().await?;
    Ok(render(BillingTemplate {
        bills,
        error,
        notice,
    })?
    .into_response())
}
