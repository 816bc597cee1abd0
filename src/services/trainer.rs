use chrono::NaiveTime;
use sqlx::PgPool;
use thiserror::Error;

use crate::models::{TrainedMemberRow, Trainer, TrainerAvailability};

const DAYS: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

#[derive(Error, Debug)]
pub enum AvailabilityError {
    #[error("Unknown day of week")]
    InvalidDay,
    #[error("Window must start before it ends")]
    InvertedWindow,
    #[error("Window overlaps an existing availability window")]
    OverlapsExisting,
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl AvailabilityError {
    pub fn is_validation(&self) -> bool {
        !matches!(self, AvailabilityError::Database(_))
    }
}

/// Trainer-facing queries: availability windows and the member roster.
#[derive(Clone)]
pub struct TrainerService {
    db: PgPool,
}

impl TrainerService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    pub async fn list_trainers(&self) -> Result<Vec<Trainer>, sqlx::Error> {
        sqlx::query_as::<_, Trainer>(
            "SELECT id, email, first_name, last_name, specialization, phone
             FROM trainers
             ORDER BY id",
        )
        .fetch_all(&self.db)
        .await
    }

    /// Declare a weekly availability window. Trainers only ever mutate
    /// their own windows; `trainer_id` comes from the session.
    #[tracing::instrument(skip(self))]
    pub async fn add_availability(
        &self,
        trainer_id: i32,
        day_of_week: &str,
        start_time: NaiveTime,
        end_time: NaiveTime,
    ) -> Result<TrainerAvailability, AvailabilityError> {
        if !DAYS.contains(&day_of_week) {
            return Err(AvailabilityError::InvalidDay);
        }
        if start_time >= end_time {
            return Err(AvailabilityError::InvertedWindow);
        }

        let overlap = sqlx::query_scalar::<_, i32>(
            "SELECT id FROM trainer_availability
             WHERE trainer_id = $1
               AND day_of_week = $2
               AND start_time < $4
               AND end_time > $3",
        )
        .bind(trainer_id)
        .bind(day_of_week)
        .bind(start_time)
        .bind(end_time)
        .fetch_optional(&self.db)
        .await?;
        if overlap.is_some() {
            return Err(AvailabilityError::OverlapsExisting);
        }

        let window = sqlx::query_as::<_, TrainerAvailability>(
            "INSERT INTO trainer_availability (trainer_id, day_of_week, start_time, end_time)
             VALUES ($1, $2, $3, $4)
             RETURNING id, trainer_id, day_of_week, start_time, end_time",
        )
        .bind(trainer_id)
        .bind(day_of_week)
        .bind(start_time)
        .bind(end_time)
        .fetch_one(&self.db)
        .await?;

        tracing::info!(trainer_id, day_of_week, "declared availability window");
        Ok(window)
    }

    /// Members this trainer has trained, for the roster page.
    pub async fn members(&self, trainer_id: i32) -> Result<Vec<TrainedMemberRow>, sqlx::Error> {
        sqlx::query_as::<_, TrainedMemberRow>(
            "SELECT DISTINCT m.id, m.first_name, m.last_name, m.email, m.phone
             FROM members m
             JOIN training_sessions s ON m.id = s.member_id
             WHERE s.trainer_id = $1
             ORDER BY m.last_name, m.first_name",
        )
        .bind(trainer_id)
        .fetch_all(&self.db)
        .await
    }
}
