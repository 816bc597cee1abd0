use chrono::NaiveDate;
use serde::Deserialize;
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow)]
pub struct Room {
    pub id: i32,
    pub name: String,
    pub capacity: i32,
    pub room_type: String,
}

#[derive(Debug, Clone, FromRow)]
pub struct Equipment {
    pub id: i32,
    pub name: String,
    pub room_id: Option<i32>,
    pub status: String,
    pub last_maintenance_date: Option<NaiveDate>,
    pub maintenance_notes: Option<String>,
}

/// Equipment listing row joined with its room's name.
#[derive(Debug, Clone, FromRow)]
pub struct EquipmentRow {
    pub id: i32,
    pub name: String,
    pub room_name: Option<String>,
    pub status: String,
    pub last_maintenance_date: Option<NaiveDate>,
    pub maintenance_notes: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct NewRoomForm {
    pub name: String,
    pub capacity: i32,
    pub room_type: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateRoomForm {
    pub name: String,
    pub capacity: i32,
    pub room_type: String,
}

#[derive(Debug, Deserialize)]
pub struct NewEquipmentForm {
    pub name: String,
    #[serde(default, deserialize_with = "crate::web::forms::empty_string_as_none")]
    pub room_id: Option<i32>,
}

#[derive(Debug, Deserialize)]
pub struct EquipmentStatusForm {
    pub status: String,
    #[serde(default)]
    pub notes: Option<String>,
}
