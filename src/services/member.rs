use sqlx::PgPool;

use crate::models::{
    FitnessGoal, HealthMetric, Member, NewFitnessGoalForm, NewHealthMetricForm, UpdateContactForm,
};

/// Member profile, health metrics and fitness goals.
#[derive(Clone)]
pub struct MemberService {
    db: PgPool,
}

impl MemberService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    pub async fn profile(&self, member_id: i32) -> Result<Option<Member>, sqlx::Error> {
        sqlx::query_as::<_, Member>(
            "SELECT id, email, first_name, last_name, date_of_birth, gender, phone, address,
                    joined_on
             FROM members
             WHERE id = $1",
        )
        .bind(member_id)
        .fetch_optional(&self.db)
        .await
    }

    pub async fn update_contact(
        &self,
        member_id: i32,
        form: &UpdateContactForm,
    ) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE members SET phone = $1, address = $2 WHERE id = $3")
            .bind(&form.phone)
            .bind(&form.address)
            .bind(member_id)
            .execute(&self.db)
            .await?;
        Ok(())
    }

    /// Members mutate only their own metrics; `member_id` comes from the
    /// session, never the form.
    pub async fn record_metric(
        &self,
        member_id: i32,
        form: &NewHealthMetricForm,
    ) -> Result<HealthMetric, sqlx::Error> {
        sqlx::query_as::<_, HealthMetric>(
            "INSERT INTO health_metrics
                 (member_id, weight, height, heart_rate, blood_pressure, body_fat_pct, notes)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING id, member_id, recorded_at, weight, height, heart_rate, blood_pressure,
                       body_fat_pct, notes",
        )
        .bind(member_id)
        .bind(form.weight)
        .bind(form.height)
        .bind(form.heart_rate)
        .bind(form.blood_pressure.as_deref().filter(|s| !s.is_empty()))
        .bind(form.body_fat_pct)
        .bind(form.notes.as_deref().filter(|s| !s.is_empty()))
        .fetch_one(&self.db)
        .await
    }

    pub async fn add_goal(
        &self,
        member_id: i32,
        form: &NewFitnessGoalForm,
    ) -> Result<FitnessGoal, sqlx::Error> {
        sqlx::query_as::<_, FitnessGoal>(
            "INSERT INTO fitness_goals
                 (member_id, goal_type, target_value, current_value, target_date, status)
             VALUES ($1, $2, $3, $4, $5, 'Active')
             RETURNING id, member_id, goal_type, target_value, current_value, target_date,
                       status, created_at",
        )
        .bind(member_id)
        .bind(&form.goal_type)
        .bind(form.target_value)
        .bind(form.current_value)
        .bind(form.target_date)
        .fetch_one(&self.db)
        .await
    }

    pub async fn recent_metrics(&self, member_id: i32) -> Result<Vec<HealthMetric>, sqlx::Error> {
        sqlx::query_as::<_, HealthMetric>(
            "SELECT id, member_id, recorded_at, weight, height, heart_rate, blood_pressure,
                    body_fat_pct, notes
             FROM health_metrics
             WHERE member_id = $1
             ORDER BY recorded_at DESC
             LIMIT 10",
        )
        .bind(member_id)
        .fetch_all(&self.db)
        .await
    }

    pub async fn goals(&self, member_id: i32) -> Result<Vec<FitnessGoal>, sqlx::Error> {
        sqlx::query_as::<_, FitnessGoal>(
            "SELECT id, member_id, goal_type, target_value, current_value, target_date, status,
                    created_at
             FROM fitness_goals
             WHERE member_id = $1
             ORDER BY created_at DESC",
        )
        .bind(member_id)
        .fetch_all(&self.db)
        .await
    }

    /// Latest recorded metric, for the trainer's member detail page.
    pub async fn latest_metric(&self, member_id: i32) -> Result<Option<HealthMetric>, sqlx::Error> {
        sqlx::query_as::<_, HealthMetric>(
            "SELECT id, member_id, recorded_at, weight, height, heart_rate, blood_pressure,
                    body_fat_pct, notes
             FROM health_metrics
             WHERE member_id = $1
             ORDER BY recorded_at DESC
             LIMIT 1",
        )
        .bind(member_id)
        .fetch_optional(&self.db)
        .await
    }
}
