use chrono::NaiveTime;
use serde::Deserialize;
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow)]
pub struct Trainer {
    pub id: i32,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub specialization: Option<String>,
    pub phone: Option<String>,
}

impl Trainer {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// A trainer-declared weekly window during which bookings are permitted.
#[derive(Debug, Clone, FromRow)]
pub struct TrainerAvailability {
    pub id: i32,
    pub trainer_id: i32,
    pub day_of_week: String,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
}

#[derive(Debug, Deserialize)]
pub struct NewAvailabilityForm {
    pub day_of_week: String,
    pub start_time: String,
    pub end_time: String,
}

/// Member roster row for the trainer portal.
#[derive(Debug, Clone, FromRow)]
pub struct TrainedMemberRow {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
}
