use chrono::{NaiveDate, NaiveTime};
use serde::Deserialize;
use sqlx::FromRow;

/// Session and registration lifecycle states. Rows are never hard-deleted;
/// cancellation is a status flip.
pub mod status {
    pub const SCHEDULED: &str = "Scheduled";
    pub const CANCELLED: &str = "Cancelled";
    pub const REGISTERED: &str = "Registered";
    // 'Attended' also appears in the member_dashboard view's class count.
    pub const ATTENDED: &str = "Attended";
}

/// A booked personal training session.
#[derive(Debug, Clone, FromRow)]
pub struct TrainingSession {
    pub id: i32,
    pub member_id: i32,
    pub trainer_id: i32,
    pub room_id: i32,
    pub session_date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub status: String,
    pub notes: Option<String>,
}

/// A group fitness class.
#[derive(Debug, Clone, FromRow)]
pub struct Class {
    pub id: i32,
    pub name: String,
    pub trainer_id: i32,
    pub room_id: i32,
    pub schedule_date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub status: String,
}

#[derive(Debug, Clone, FromRow)]
pub struct ClassRegistration {
    pub id: i32,
    pub class_id: i32,
    pub member_id: i32,
    pub status: String,
}

/// Upcoming session row on the member dashboard.
#[derive(Debug, Clone, FromRow)]
pub struct UpcomingSessionRow {
    pub id: i32,
    pub session_date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub trainer_name: String,
    pub room_name: String,
}

/// Session row on the trainer schedule, joined with member and room.
#[derive(Debug, Clone, FromRow)]
pub struct TrainerSessionRow {
    pub id: i32,
    pub session_date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub member_name: String,
    pub room_name: String,
    pub status: String,
    pub notes: Option<String>,
}

/// Open class listing row for the member portal, with remaining spots.
#[derive(Debug, Clone, FromRow)]
pub struct OpenClassRow {
    pub id: i32,
    pub name: String,
    pub schedule_date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub trainer_name: String,
    pub capacity: i32,
    pub registered: i64,
}

impl OpenClassRow {
    pub fn spots_left(&self) -> i64 {
        i64::from(self.capacity) - self.registered
    }
}

/// A class the member is registered for.
#[derive(Debug, Clone, FromRow)]
pub struct RegisteredClassRow {
    pub id: i32,
    pub name: String,
    pub schedule_date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub trainer_name: String,
    pub status: String,
}

/// Class row on the trainer schedule with enrollment counts.
#[derive(Debug, Clone, FromRow)]
pub struct TrainerClassRow {
    pub id: i32,
    pub name: String,
    pub schedule_date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub room_name: String,
    pub capacity: i32,
    pub registered: i64,
}

/// Booking form for a personal training session. Times arrive as raw
/// strings and are parsed by the handler so bad input re-renders the form.
#[derive(Debug, Deserialize)]
pub struct BookSessionForm {
    pub trainer_id: i32,
    pub session_date: String,
    pub start_time: String,
    pub end_time: String,
    #[serde(default, deserialize_with = "crate::web::forms::empty_string_as_none")]
    pub room_id: Option<i32>,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RegisterClassForm {
    pub class_id: i32,
}
