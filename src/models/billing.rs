use bigdecimal::BigDecimal;
use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;
use sqlx::FromRow;

pub mod bill_status {
    pub const PENDING: &str = "Pending";
    pub const PAID: &str = "Paid";
}

#[derive(Debug, Clone, FromRow)]
pub struct Bill {
    pub id: i32,
    pub member_id: i32,
    pub bill_date: NaiveDate,
    pub due_date: NaiveDate,
    pub total_amount: BigDecimal,
    pub amount_paid: BigDecimal,
    pub status: String,
    pub description: Option<String>,
}

impl Bill {
    pub fn remaining(&self) -> BigDecimal {
        &self.total_amount - &self.amount_paid
    }
}

/// Billing listing row joined with the member's name.
#[derive(Debug, Clone, FromRow)]
pub struct BillRow {
    pub id: i32,
    pub member_name: String,
    pub bill_date: NaiveDate,
    pub due_date: NaiveDate,
    pub total_amount: BigDecimal,
    pub amount_paid: BigDecimal,
    pub status: String,
    pub description: Option<String>,
}

impl BillRow {
    pub fn remaining(&self) -> BigDecimal {
        &self.total_amount - &self.amount_paid
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct Payment {
    pub id: i32,
    pub bill_id: i32,
    pub amount: BigDecimal,
    pub method: String,
    pub reference: Option<String>,
    pub paid_at: DateTime<Utc>,
}

/// Bill generation form; the amount arrives as a raw string and is parsed
/// by the handler so a bad value re-renders the billing page.
#[derive(Debug, Deserialize)]
pub struct NewBillForm {
    pub member_id: i32,
    pub description: String,
    pub amount: String,
    pub due_days: i64,
}

#[derive(Debug, Deserialize)]
pub struct NewPaymentForm {
    pub bill_id: i32,
    pub amount: String,
    pub method: String,
    #[serde(default)]
    pub reference: Option<String>,
}
