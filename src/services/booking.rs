use chrono::{Datelike, NaiveDate, NaiveTime, Weekday};
use sqlx::PgPool;
use thiserror::Error;

use crate::models::scheduling::status;
use crate::models::TrainingSession;

#[derive(Error, Debug)]
pub enum BookingError {
    #[error("Session must start before it ends")]
    EmptyInterval,
    #[error("Unknown trainer")]
    UnknownTrainer,
    #[error("Unknown room")]
    UnknownRoom,
    #[error("Trainer is not available at this time")]
    OutsideAvailability,
    #[error("Trainer already has a session at this time")]
    TrainerBusy,
    #[error("Room is occupied at this time")]
    RoomBusy,
    #[error("No rooms available at this time")]
    NoRoomFree,
    #[error("Class not found")]
    UnknownClass,
    #[error("Already registered for this class")]
    AlreadyRegistered,
    #[error("Class is full")]
    ClassFull,
    #[error("Session not found")]
    UnknownSession,
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl BookingError {
    /// Errors the booking form recovers from inline.
    pub fn is_validation(&self) -> bool {
        !matches!(self, BookingError::Database(_))
    }
}

/// True when `[a_start, a_end)` and `[b_start, b_end)` share any instant.
pub fn intervals_overlap(
    a_start: NaiveTime,
    a_end: NaiveTime,
    b_start: NaiveTime,
    b_end: NaiveTime,
) -> bool {
    a_start < b_end && b_start < a_end
}

/// True when the availability window `[w_start, w_end]` contains the
/// requested interval.
pub fn window_covers(
    w_start: NaiveTime,
    w_end: NaiveTime,
    start: NaiveTime,
    end: NaiveTime,
) -> bool {
    w_start <= start && end <= w_end
}

/// Availability windows are keyed by weekday name.
pub fn day_name(date: NaiveDate) -> &'static str {
    match date.weekday() {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

#[derive(Debug, Clone)]
pub struct BookSessionRequest {
    pub member_id: i32,
    pub trainer_id: i32,
    pub room_id: i32,
    pub session_date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub notes: Option<String>,
}

/// Booking and class-registration logic.
///
/// Both operations are check-then-insert; each runs inside one transaction
/// that first row-locks the contended parent row (trainer and room for
/// sessions, the class for registrations) so concurrent requests against
/// the same slot serialize at the database instead of racing.
#[derive(Clone)]
pub struct BookingService {
    db: PgPool,
}

impl BookingService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Book a personal training session.
    #[tracing::instrument(skip(self, request), fields(trainer_id = request.trainer_id))]
    pub async fn book_session(
        &self,
        request: BookSessionRequest,
    ) -> Result<TrainingSession, BookingError> {
        if request.start_time >= request.end_time {
            return Err(BookingError::EmptyInterval);
        }

        let mut tx = self.db.begin().await?;

        // Lock order is trainer then room everywhere.
        sqlx::query_scalar::<_, i32>("SELECT id FROM trainers WHERE id = $1 FOR UPDATE")
            .bind(request.trainer_id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or(BookingError::UnknownTrainer)?;

        sqlx::query_scalar::<_, i32>("SELECT id FROM rooms WHERE id = $1 FOR UPDATE")
            .bind(request.room_id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or(BookingError::UnknownRoom)?;

        let window = sqlx::query_scalar::<_, i32>(
            "SELECT id FROM trainer_availability
             WHERE trainer_id = $1
               AND day_of_week = $2
               AND start_time <= $3
               AND end_time >= $4",
        )
        .bind(request.trainer_id)
        .bind(day_name(request.session_date))
        .bind(request.start_time)
        .bind(request.end_time)
        .fetch_optional(&mut *tx)
        .await?;
        if window.is_none() {
            return Err(BookingError::OutsideAvailability);
        }

        let trainer_clash = sqlx::query_scalar::<_, i32>(
            "SELECT id FROM training_sessions
             WHERE trainer_id = $1
               AND session_date = $2
               AND status = $3
               AND start_time < $5
               AND end_time > $4",
        )
        .bind(request.trainer_id)
        .bind(request.session_date)
        .bind(status::SCHEDULED)
        .bind(request.start_time)
        .bind(request.end_time)
        .fetch_optional(&mut *tx)
        .await?;
        if trainer_clash.is_some() {
            return Err(BookingError::TrainerBusy);
        }

        let room_clash = sqlx::query_scalar::<_, i32>(
            "SELECT id FROM training_sessions
             WHERE room_id = $1
               AND session_date = $2
               AND status = $3
               AND start_time < $5
               AND end_time > $4",
        )
        .bind(request.room_id)
        .bind(request.session_date)
        .bind(status::SCHEDULED)
        .bind(request.start_time)
        .bind(request.end_time)
        .fetch_optional(&mut *tx)
        .await?;
        if room_clash.is_some() {
            return Err(BookingError::RoomBusy);
        }

        let session = sqlx::query_as::<_, TrainingSession>(
            "INSERT INTO training_sessions
                 (member_id, trainer_id, room_id, session_date, start_time, end_time, status, notes)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING id, member_id, trainer_id, room_id, session_date, start_time, end_time,
                       status, notes",
        )
        .bind(request.member_id)
        .bind(request.trainer_id)
        .bind(request.room_id)
        .bind(request.session_date)
        .bind(request.start_time)
        .bind(request.end_time)
        .bind(status::SCHEDULED)
        .bind(&request.notes)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        tracing::info!(session_id = session.id, "booked training session");
        Ok(session)
    }

    /// First personal-training room free for the interval, used when the
    /// booking form leaves the room unspecified.
    pub async fn find_free_room(
        &self,
        session_date: NaiveDate,
        start_time: NaiveTime,
        end_time: NaiveTime,
    ) -> Result<i32, BookingError> {
        let room = sqlx::query_scalar::<_, i32>(
            "SELECT r.id FROM rooms r
             WHERE r.room_type = 'Personal Training'
               AND NOT EXISTS (
                   SELECT 1 FROM training_sessions s
                   WHERE s.room_id = r.id
                     AND s.session_date = $1
                     AND s.status = $2
                     AND s.start_time < $4
                     AND s.end_time > $3
               )
             ORDER BY r.id
             LIMIT 1",
        )
        .bind(session_date)
        .bind(status::SCHEDULED)
        .bind(start_time)
        .bind(end_time)
        .fetch_optional(&self.db)
        .await?;

        room.ok_or(BookingError::NoRoomFree)
    }

    /// Upcoming classes with spots left, for the member class listing.
    pub async fn open_classes(&self) -> Result<Vec<crate::models::OpenClassRow>, BookingError> {
        let classes = sqlx::query_as::<_, crate::models::OpenClassRow>(
            "SELECT c.id, c.name, c.schedule_date, c.start_time, c.end_time,
                    t.first_name || ' ' || t.last_name AS trainer_name,
                    r.capacity,
                    (SELECT COUNT(*) FROM class_registrations cr
                      WHERE cr.class_id = c.id AND cr.status = $1) AS registered
             FROM classes c
             JOIN trainers t ON c.trainer_id = t.id
             JOIN rooms r ON c.room_id = r.id
             WHERE c.schedule_date >= CURRENT_DATE
               AND c.status = $2
               AND (SELECT COUNT(*) FROM class_registrations cr
                     WHERE cr.class_id = c.id AND cr.status = $1) < r.capacity
             ORDER BY c.schedule_date, c.start_time",
        )
        .bind(status::REGISTERED)
        .bind(status::SCHEDULED)
        .fetch_all(&self.db)
        .await?;

        Ok(classes)
    }

    /// Register a member for a class, enforcing the room's capacity.
    #[tracing::instrument(skip(self))]
    pub async fn register_for_class(
        &self,
        member_id: i32,
        class_id: i32,
    ) -> Result<(), BookingError> {
        let mut tx = self.db.begin().await?;

        let capacity = sqlx::query_scalar::<_, i32>(
            "SELECT r.capacity FROM classes c
             JOIN rooms r ON r.id = c.room_id
             WHERE c.id = $1 AND c.status = $2
             FOR UPDATE OF c",
        )
        .bind(class_id)
        .bind(status::SCHEDULED)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(BookingError::UnknownClass)?;

        let already = sqlx::query_scalar::<_, i32>(
            "SELECT 1 FROM class_registrations WHERE class_id = $1 AND member_id = $2",
        )
        .bind(class_id)
        .bind(member_id)
        .fetch_optional(&mut *tx)
        .await?;
        if already.is_some() {
            return Err(BookingError::AlreadyRegistered);
        }

        let registered = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM class_registrations WHERE class_id = $1 AND status = $2",
        )
        .bind(class_id)
        .bind(status::REGISTERED)
        .fetch_one(&mut *tx)
        .await?;
        if registered >= i64::from(capacity) {
            return Err(BookingError::ClassFull);
        }

        sqlx::query(
            "INSERT INTO class_registrations (class_id, member_id, status) VALUES ($1, $2, $3)",
        )
        .bind(class_id)
        .bind(member_id)
        .bind(status::REGISTERED)
        .execute(&mut *tx)
        .await
        .map_err(|err| {
            // Unique index on (class_id, member_id) is the backstop.
            let duplicate = err
                .as_database_error()
                .map(|db_err| matches!(db_err.kind(), sqlx::error::ErrorKind::UniqueViolation))
                .unwrap_or(false);
            if duplicate {
                BookingError::AlreadyRegistered
            } else {
                BookingError::Database(err)
            }
        })?;

        tx.commit().await?;

        tracing::info!(member_id, class_id, "registered for class");
        Ok(())
    }

    /// Cancel a member-owned session. The slot is freed for rebooking;
    /// the row is kept with a `Cancelled` status.
    pub async fn cancel_session(
        &self,
        member_id: i32,
        session_id: i32,
    ) -> Result<(), BookingError> {
        let updated = sqlx::query(
            "UPDATE training_sessions SET status = $1
             WHERE id = $2 AND member_id = $3 AND status = $4",
        )
        .bind(status::CANCELLED)
        .bind(session_id)
        .bind(member_id)
        .bind(status::SCHEDULED)
        .execute(&self.db)
        .await?;

        if updated.rows_affected() == 0 {
            return Err(BookingError::UnknownSession);
        }

        tracing::info!(member_id, session_id, "cancelled training session");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn test_overlap_detection() {
        // 10:00-11:00 vs 10:30-11:30 overlap
        assert!(intervals_overlap(t(10, 0), t(11, 0), t(10, 30), t(11, 30)));
        // back-to-back slots do not
        assert!(!intervals_overlap(t(10, 0), t(11, 0), t(11, 0), t(12, 0)));
        assert!(!intervals_overlap(t(11, 0), t(12, 0), t(10, 0), t(11, 0)));
        // containment overlaps
        assert!(intervals_overlap(t(10, 0), t(12, 0), t(10, 30), t(11, 0)));
        assert!(intervals_overlap(t(10, 30), t(11, 0), t(10, 0), t(12, 0)));
    }

    #[test]
    fn test_window_containment() {
        // Mon 09:00-12:00 window admits 10:00-11:00
        assert!(window_covers(t(9, 0), t(12, 0), t(10, 0), t(11, 0)));
        // exact fit is allowed
        assert!(window_covers(t(9, 0), t(12, 0), t(9, 0), t(12, 0)));
        // spilling past either edge is not
        assert!(!window_covers(t(9, 0), t(12, 0), t(8, 30), t(10, 0)));
        assert!(!window_covers(t(9, 0), t(12, 0), t(11, 30), t(12, 30)));
    }

    #[test]
    fn test_day_name() {
        // 2024-01-15 was a Monday
        let monday = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        assert_eq!(day_name(monday), "Monday");
        assert_eq!(day_name(monday.succ_opt().unwrap()), "Tuesday");
    }
}
