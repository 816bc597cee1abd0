use sqlx::FromRow;

#[derive(Debug, Clone, FromRow)]
pub struct AdminStaff {
    pub id: i32,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
}
