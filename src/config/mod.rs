pub mod seeding;

use anyhow::Result;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use std::env;
use std::time::Duration;

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub session_secret: String,
    pub seed_demo_data: bool,
}

impl AppConfig {
    /// Create configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()?,
            session_secret: env::var("SESSION_SECRET")
                .unwrap_or_else(|_| "dev-secret-key-change-in-production".to_string()),
            seed_demo_data: env::var("SEED_DEMO_DATA")
                .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
                .unwrap_or(false),
        })
    }

    /// Get server address
    pub fn server_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Database configuration
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub connect_timeout: Duration,
}

impl DatabaseConfig {
    /// Create database configuration from environment.
    ///
    /// `DATABASE_URL` wins; otherwise the URL is assembled from the discrete
    /// `DB_HOST` / `DB_NAME` / `DB_USER` / `DB_PASSWORD` / `DB_PORT` variables.
    pub fn from_env() -> Result<Self> {
        let url = match env::var("DATABASE_URL") {
            Ok(url) => url,
            Err(_) => {
                let host = env::var("DB_HOST").unwrap_or_else(|_| "localhost".to_string());
                let name = env::var("DB_NAME").unwrap_or_else(|_| "fitness_club".to_string());
                let user = env::var("DB_USER").unwrap_or_else(|_| "postgres".to_string());
                let password = env::var("DB_PASSWORD").unwrap_or_default();
                let port = env::var("DB_PORT").unwrap_or_else(|_| "5432".to_string());
                format!("postgresql://{user}:{password}@{host}:{port}/{name}")
            }
        };

        Ok(Self {
            url,
            max_connections: env::var("DB_MAX_CONNECTIONS")
                .unwrap_or_else(|_| "20".to_string())
                .parse()?,
            connect_timeout: Duration::from_secs(
                env::var("DB_CONNECT_TIMEOUT")
                    .unwrap_or_else(|_| "30".to_string())
                    .parse()?,
            ),
        })
    }

    /// Create database connection pool
    pub async fn create_pool(&self) -> Result<PgPool> {
        let pool = PgPoolOptions::new()
            .max_connections(self.max_connections)
            .acquire_timeout(self.connect_timeout)
            .connect(&self.url)
            .await?;

        Ok(pool)
    }
}

pub async fn run_migrations(pool: &PgPool) -> Result<()> {
    sqlx::migrate!("./migrations").run(pool).await?;
    Ok(())
}
