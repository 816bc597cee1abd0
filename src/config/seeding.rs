use anyhow::Result;
use bigdecimal::BigDecimal;
use chrono::NaiveTime;
use sqlx::PgPool;

/// Opt-in demo data seeder (`SEED_DEMO_DATA=1`).
///
/// Demo accounts are inserted with plaintext passwords on purpose: they are
/// the pre-seeded legacy rows the plaintext fallback in
/// `auth::password::verify_password` exists for. Credentials created
/// through the registration flow are always hashed.
pub struct DatabaseSeeder {
    pool: PgPool,
}

impl DatabaseSeeder {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn seed_all(&self) -> Result<()> {
        tracing::info!("Starting database seeding...");

        self.seed_staff().await?;
        self.seed_rooms().await?;
        self.seed_trainers().await?;
        self.seed_members().await?;
        self.seed_classes().await?;
        self.seed_bills().await?;

        tracing::info!("Database seeding completed!");
        Ok(())
    }

    async fn seed_staff(&self) -> Result<()> {
        self.insert_account(
            "admin_staff",
            "admin@fitclub.example",
            "admin123",
            "Ada",
            "Manager",
        )
        .await
    }

    async fn seed_trainers(&self) -> Result<()> {
        for (email, first, last, specialization) in [
            ("marco@fitclub.example", "Marco", "Silva", "Strength"),
            ("yuki@fitclub.example", "Yuki", "Tanaka", "Yoga"),
        ] {
            let exists = sqlx::query_scalar::<_, i32>("SELECT id FROM trainers WHERE email = $1")
                .bind(email)
                .fetch_optional(&self.pool)
                .await?;
            if exists.is_some() {
                continue;
            }

            let trainer_id = sqlx::query_scalar::<_, i32>(
                "INSERT INTO trainers (email, password, first_name, last_name, specialization)
                 VALUES ($1, $2, $3, $4, $5)
                 RETURNING id",
            )
            .bind(email)
            .bind("trainer123")
            .bind(first)
            .bind(last)
            .bind(specialization)
            .fetch_one(&self.pool)
            .await?;

            // Weekday morning availability for demo bookings.
            for day in ["Monday", "Wednesday", "Friday"] {
                sqlx::query(
                    "INSERT INTO trainer_availability (trainer_id, day_of_week, start_time, end_time)
                     VALUES ($1, $2, $3, $4)",
                )
                .bind(trainer_id)
                .bind(day)
                .bind(NaiveTime::from_hms_opt(9, 0, 0).unwrap())
                .bind(NaiveTime::from_hms_opt(12, 0, 0).unwrap())
                .execute(&self.pool)
                .await?;
            }
            tracing::info!(email, "created demo trainer");
        }
        Ok(())
    }

    async fn seed_members(&self) -> Result<()> {
        self.insert_account(
            "members",
            "alice@fitclub.example",
            "password123",
            "Alice",
            "Example",
        )
        .await
    }

    async fn seed_rooms(&self) -> Result<()> {
        if self.table_has_rows("rooms").await? {
            return Ok(());
        }

        for (name, capacity, room_type) in [
            ("Studio A", 10, "Group Fitness"),
            ("Studio B", 15, "Group Fitness"),
            ("PT Room 1", 2, "Personal Training"),
            ("PT Room 2", 2, "Personal Training"),
        ] {
            let room_id = sqlx::query_scalar::<_, i32>(
                "INSERT INTO rooms (name, capacity, room_type) VALUES ($1, $2, $3) RETURNING id",
            )
            .bind(name)
            .bind(capacity)
            .bind(room_type)
            .fetch_one(&self.pool)
            .await?;

            sqlx::query("INSERT INTO equipment (name, room_id) VALUES ($1, $2)")
                .bind(format!("{name} treadmill"))
                .bind(room_id)
                .execute(&self.pool)
                .await?;
        }
        tracing::info!("created demo rooms and equipment");
        Ok(())
    }

    async fn seed_classes(&self) -> Result<()> {
        if self.table_has_rows("classes").await? {
            return Ok(());
        }

        sqlx::query(
            "INSERT INTO classes (name, trainer_id, room_id, schedule_date, start_time, end_time)
             SELECT 'Morning Yoga', t.id, r.id, CURRENT_DATE + 7, $1, $2
             FROM trainers t, rooms r
             WHERE t.email = 'yuki@fitclub.example' AND r.name = 'Studio A'",
        )
        .bind(NaiveTime::from_hms_opt(8, 0, 0).unwrap())
        .bind(NaiveTime::from_hms_opt(9, 0, 0).unwrap())
        .execute(&self.pool)
        .await?;

        tracing::info!("created demo class");
        Ok(())
    }

    async fn seed_bills(&self) -> Result<()> {
        if self.table_has_rows("bills").await? {
            return Ok(());
        }

        sqlx::query(
            "INSERT INTO bills (member_id, due_date, total_amount, description)
             SELECT m.id, CURRENT_DATE + 14, $1, 'Monthly membership'
             FROM members m
             WHERE m.email = 'alice@fitclub.example'",
        )
        .bind(BigDecimal::from(100))
        .execute(&self.pool)
        .await?;

        tracing::info!("created demo bill");
        Ok(())
    }

    async fn insert_account(
        &self,
        table: &str,
        email: &str,
        password: &str,
        first_name: &str,
        last_name: &str,
    ) -> Result<()> {
        let exists_query = format!("SELECT 1 FROM {table} WHERE email = $1");
        let exists = sqlx::query_scalar::<_, i32>(&exists_query)
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        if exists.is_some() {
            return Ok(());
        }

        let insert_query = format!(
            "INSERT INTO {table} (email, password, first_name, last_name) VALUES ($1, $2, $3, $4)"
        );
        sqlx::query(&insert_query)
            .bind(email)
            .bind(password)
            .bind(first_name)
            .bind(last_name)
            .execute(&self.pool)
            .await?;

        tracing::info!(email, table, "created demo account");
        Ok(())
    }

    async fn table_has_rows(&self, table: &str) -> Result<bool> {
        let query = format!("SELECT COUNT(*) FROM {table}");
        let count = sqlx::query_scalar::<_, i64>(&query)
            .fetch_one(&self.pool)
            .await?;
        Ok(count > 0)
    }
}
