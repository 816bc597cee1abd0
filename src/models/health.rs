use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow)]
pub struct HealthMetric {
    pub id: i32,
    pub member_id: i32,
    pub recorded_at: DateTime<Utc>,
    pub weight: Option<f64>,
    pub height: Option<f64>,
    pub heart_rate: Option<i32>,
    pub blood_pressure: Option<String>,
    pub body_fat_pct: Option<f64>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, FromRow)]
pub struct FitnessGoal {
    pub id: i32,
    pub member_id: i32,
    pub goal_type: String,
    pub target_value: Option<f64>,
    pub current_value: Option<f64>,
    pub target_date: Option<NaiveDate>,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct NewHealthMetricForm {
    #[serde(default, deserialize_with = "crate::web::forms::empty_string_as_none")]
    pub weight: Option<f64>,
    #[serde(default, deserialize_with = "crate::web::forms::empty_string_as_none")]
    pub height: Option<f64>,
    #[serde(default, deserialize_with = "crate::web::forms::empty_string_as_none")]
    pub heart_rate: Option<i32>,
    #[serde(default)]
    pub blood_pressure: Option<String>,
    #[serde(default, deserialize_with = "crate::web::forms::empty_string_as_none")]
    pub body_fat_pct: Option<f64>,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct NewFitnessGoalForm {
    pub goal_type: String,
    #[serde(default, deserialize_with = "crate::web::forms::empty_string_as_none")]
    pub target_value: Option<f64>,
    #[serde(default, deserialize_with = "crate::web::forms::empty_string_as_none")]
    pub current_value: Option<f64>,
    #[serde(default, deserialize_with = "crate::web::forms::empty_string_as_none")]
    pub target_date: Option<NaiveDate>,
}
