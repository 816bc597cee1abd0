use sqlx::PgPool;

use crate::auth::password::{hash_password, needs_rehash, verify_password};
use crate::auth::{AuthError, LoginForm, RegisterMemberForm, Role, SessionUser};

#[derive(Debug, Clone, sqlx::FromRow)]
struct CredentialRow {
    id: i32,
    first_name: String,
    last_name: String,
    password: String,
}

/// Login and registration against the per-role credential tables.
#[derive(Debug, Clone)]
pub struct AuthService {
    db: PgPool,
}

impl AuthService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Authenticate against the given portal's table.
    ///
    /// Every failure path collapses into `InvalidCredentials` so responses
    /// never reveal whether the email exists.
    #[tracing::instrument(skip(self, form))]
    pub async fn login(&self, role: Role, form: &LoginForm) -> Result<SessionUser, AuthError> {
        let query = format!(
            "SELECT id, first_name, last_name, password FROM {} WHERE email = $1",
            role.credential_table()
        );

        let row = sqlx::query_as::<_, CredentialRow>(&query)
            .bind(&form.email)
            .fetch_optional(&self.db)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        if !verify_password(&form.password, &row.password)? {
            return Err(AuthError::InvalidCredentials);
        }

        if needs_rehash(&row.password) {
            self.rehash_credential(role, row.id, &form.password).await?;
        }

        Ok(SessionUser {
            id: row.id,
            role,
            name: format!("{} {}", row.first_name, row.last_name),
        })
    }

    /// Register a new member. New credentials are always stored hashed;
    /// the legacy plaintext path exists only for pre-seeded rows.
    #[tracing::instrument(skip(self, form))]
    pub async fn register_member(&self, form: &RegisterMemberForm) -> Result<i32, AuthError> {
        let taken = sqlx::query_scalar::<_, i32>("SELECT 1 FROM members WHERE email = $1")
            .bind(&form.email)
            .fetch_optional(&self.db)
            .await?;
        if taken.is_some() {
            return Err(AuthError::EmailTaken);
        }

        let password_hash = hash_password(&form.password)?;

        let member_id = sqlx::query_scalar::<_, i32>(
            "INSERT INTO members (email, password, first_name, last_name, date_of_birth,
                                  gender, phone, address)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING id",
        )
        .bind(&form.email)
        .bind(&password_hash)
        .bind(&form.first_name)
        .bind(&form.last_name)
        .bind(form.date_of_birth)
        .bind(&form.gender)
        .bind(&form.phone)
        .bind(&form.address)
        .fetch_one(&self.db)
        .await?;

        tracing::info!(member_id, "registered new member");
        Ok(member_id)
    }

    /// Upgrade a legacy plaintext credential after a successful login.
    async fn rehash_credential(
        &self,
        role: Role,
        id: i32,
        password: &str,
    ) -> Result<(), AuthError> {
        // Legacy seed passwords may be shorter than the registration policy
        // allows; hash them as-is rather than locking the account out.
        let rehashed = match hash_password(password) {
            Ok(hash) => hash,
            Err(_) => bcrypt::hash(password, bcrypt::DEFAULT_COST)
                .map_err(|_| crate::auth::password::PasswordError::HashingFailed)?,
        };

        let query = format!(
            "UPDATE {} SET password = $1 WHERE id = $2",
            role.credential_table()
        );
        sqlx::query(&query)
            .bind(&rehashed)
            .bind(id)
            .execute(&self.db)
            .await?;

        tracing::info!(id, role = role.as_str(), "upgraded legacy credential");
        Ok(())
    }
}
