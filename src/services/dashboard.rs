use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

use crate::models::scheduling::status;
use crate::models::{
    FitnessGoal, RegisteredClassRow, TrainerAvailability, TrainerClassRow, TrainerSessionRow,
    UpcomingSessionRow,
};

/// Summary row from the `member_dashboard` view.
#[derive(Debug, Clone, FromRow)]
pub struct MemberDashboard {
    pub member_id: i32,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub latest_weight: Option<f64>,
    pub latest_heart_rate: Option<i32>,
    pub last_metric_date: Option<DateTime<Utc>>,
    pub active_goals: i64,
    pub upcoming_sessions: i64,
    pub classes_attended: i64,
    pub pending_balance: BigDecimal,
}

#[derive(Debug, Clone, FromRow)]
pub struct AdminOverview {
    pub total_members: i64,
    pub total_trainers: i64,
    pub upcoming_classes: i64,
    pub pending_revenue: BigDecimal,
}

/// Everything the trainer schedule page shows.
#[derive(Debug, Clone)]
pub struct TrainerSchedule {
    pub sessions: Vec<TrainerSessionRow>,
    pub classes: Vec<TrainerClassRow>,
    pub availability: Vec<TrainerAvailability>,
}

/// Read-only aggregate queries, one set per portal.
#[derive(Clone)]
pub struct DashboardService {
    db: PgPool,
}

impl DashboardService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    pub async fn member_summary(
        &self,
        member_id: i32,
    ) -> Result<Option<MemberDashboard>, sqlx::Error> {
        sqlx::query_as::<_, MemberDashboard>(
            "SELECT member_id, first_name, last_name, email, latest_weight, latest_heart_rate,
                    last_metric_date, active_goals, upcoming_sessions, classes_attended,
                    pending_balance
             FROM member_dashboard
             WHERE member_id = $1",
        )
        .bind(member_id)
        .fetch_optional(&self.db)
        .await
    }

    pub async fn member_active_goals(
        &self,
        member_id: i32,
    ) -> Result<Vec<FitnessGoal>, sqlx::Error> {
        sqlx::query_as::<_, FitnessGoal>(
            "SELECT id, member_id, goal_type, target_value, current_value, target_date, status,
                    created_at
             FROM fitness_goals
             WHERE member_id = $1 AND status = 'Active'
             ORDER BY target_date",
        )
        .bind(member_id)
        .fetch_all(&self.db)
        .await
    }

    pub async fn member_upcoming_sessions(
        &self,
        member_id: i32,
    ) -> Result<Vec<UpcomingSessionRow>, sqlx::Error> {
        sqlx::query_as::<_, UpcomingSessionRow>(
            "SELECT s.id, s.session_date, s.start_time, s.end_time,
                    t.first_name || ' ' || t.last_name AS trainer_name,
                    r.name AS room_name
             FROM training_sessions s
             JOIN trainers t ON s.trainer_id = t.id
             JOIN rooms r ON s.room_id = r.id
             WHERE s.member_id = $1
               AND s.session_date >= CURRENT_DATE
               AND s.status = $2
             ORDER BY s.session_date, s.start_time
             LIMIT 5",
        )
        .bind(member_id)
        .bind(status::SCHEDULED)
        .fetch_all(&self.db)
        .await
    }

    pub async fn member_registered_classes(
        &self,
        member_id: i32,
    ) -> Result<Vec<RegisteredClassRow>, sqlx::Error> {
        sqlx::query_as::<_, RegisteredClassRow>(
            "SELECT c.id, c.name, c.schedule_date, c.start_time, c.end_time,
                    t.first_name || ' ' || t.last_name AS trainer_name,
                    cr.status
             FROM class_registrations cr
             JOIN classes c ON cr.class_id = c.id
             JOIN trainers t ON c.trainer_id = t.id
             WHERE cr.member_id = $1
               AND c.schedule_date >= CURRENT_DATE
               AND cr.status = $2
             ORDER BY c.schedule_date, c.start_time",
        )
        .bind(member_id)
        .bind(status::REGISTERED)
        .fetch_all(&self.db)
        .await
    }

    pub async fn trainer_schedule(&self, trainer_id: i32) -> Result<TrainerSchedule, sqlx::Error> {
        let sessions = sqlx::query_as::<_, TrainerSessionRow>(
            "SELECT s.id, s.session_date, s.start_time, s.end_time,
                    m.first_name || ' ' || m.last_name AS member_name,
                    r.name AS room_name, s.status, s.notes
             FROM training_sessions s
             JOIN members m ON s.member_id = m.id
             JOIN rooms r ON s.room_id = r.id
             WHERE s.trainer_id = $1
               AND s.session_date >= CURRENT_DATE
               AND s.status = $2
             ORDER BY s.session_date, s.start_time",
        )
        .bind(trainer_id)
        .bind(status::SCHEDULED)
        .fetch_all(&self.db)
        .await?;

        let classes = sqlx::query_as::<_, TrainerClassRow>(
            "SELECT c.id, c.name, c.schedule_date, c.start_time, c.end_time,
                    r.name AS room_name, r.capacity,
                    (SELECT COUNT(*) FROM class_registrations cr
                      WHERE cr.class_id = c.id AND cr.status = $2) AS registered
             FROM classes c
             JOIN rooms r ON c.room_id = r.id
             WHERE c.trainer_id = $1
               AND c.schedule_date >= CURRENT_DATE
               AND c.status = $3
             ORDER BY c.schedule_date, c.start_time",
        )
        .bind(trainer_id)
        .bind(status::REGISTERED)
        .bind(status::SCHEDULED)
        .fetch_all(&self.db)
        .await?;

        let availability = sqlx::query_as::<_, TrainerAvailability>(
            "SELECT id, trainer_id, day_of_week, start_time, end_time
             FROM trainer_availability
             WHERE trainer_id = $1
             ORDER BY
                 CASE day_of_week
                     WHEN 'Monday' THEN 1
                     WHEN 'Tuesday' THEN 2
                     WHEN 'Wednesday' THEN 3
                     WHEN 'Thursday' THEN 4
                     WHEN 'Friday' THEN 5
                     WHEN 'Saturday' THEN 6
                     WHEN 'Sunday' THEN 7
                 END,
                 start_time",
        )
        .bind(trainer_id)
        .fetch_all(&self.db)
        .await?;

        Ok(TrainerSchedule {
            sessions,
            classes,
            availability,
        })
    }

    pub async fn admin_overview(&self) -> Result<AdminOverview, sqlx::Error> {
        sqlx::query_as::<_, AdminOverview>(
            "SELECT
                 (SELECT COUNT(*) FROM members) AS total_members,
                 (SELECT COUNT(*) FROM trainers) AS total_trainers,
                 (SELECT COUNT(*) FROM classes
                   WHERE schedule_date >= CURRENT_DATE AND status = 'Scheduled')
                     AS upcoming_classes,
                 (SELECT COALESCE(SUM(total_amount - amount_paid), 0) FROM bills
                   WHERE status = 'Pending') AS pending_revenue",
        )
        .fetch_one(&self.db)
        .await
    }
}
