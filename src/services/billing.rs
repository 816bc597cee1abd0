use bigdecimal::BigDecimal;
use chrono::{Days, Utc};
use sqlx::PgPool;
use thiserror::Error;

use crate::models::billing::bill_status;
use crate::models::{Bill, BillRow, Payment};

#[derive(Error, Debug)]
pub enum BillingError {
    #[error("Bill not found")]
    UnknownBill,
    #[error("Amount must be greater than zero")]
    NonPositiveAmount,
    #[error("Payment exceeds remaining balance of {remaining}")]
    ExceedsBalance { remaining: BigDecimal },
    #[error("Invalid due date")]
    InvalidDueDate,
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl BillingError {
    pub fn is_validation(&self) -> bool {
        !matches!(self, BillingError::Database(_))
    }
}

/// Reject a payment that is non-positive or exceeds the bill's remaining
/// balance. Pure so the rule is testable without a database.
pub fn validate_payment(
    total: &BigDecimal,
    paid: &BigDecimal,
    amount: &BigDecimal,
) -> Result<(), BillingError> {
    if amount <= &BigDecimal::from(0) {
        return Err(BillingError::NonPositiveAmount);
    }
    let remaining = total - paid;
    if amount > &remaining {
        return Err(BillingError::ExceedsBalance { remaining });
    }
    Ok(())
}

/// Bill generation and payment recording.
///
/// `record_payment` row-locks the bill so concurrent payments against the
/// same bill serialize; the `amount_paid <= total_amount` CHECK constraint
/// is the database-level backstop.
#[derive(Clone)]
pub struct BillingService {
    db: PgPool,
}

impl BillingService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    pub async fn recent_bills(&self) -> Result<Vec<BillRow>, sqlx::Error> {
        sqlx::query_as::<_, BillRow>(
            "SELECT b.id, m.first_name || ' ' || m.last_name AS member_name,
                    b.bill_date, b.due_date, b.total_amount, b.amount_paid, b.status,
                    b.description
             FROM bills b
             JOIN members m ON b.member_id = m.id
             ORDER BY b.bill_date DESC, b.id DESC
             LIMIT 50",
        )
        .fetch_all(&self.db)
        .await
    }

    /// Generate a bill from a billable event.
    #[tracing::instrument(skip(self, description, amount))]
    pub async fn generate_bill(
        &self,
        member_id: i32,
        description: &str,
        amount: BigDecimal,
        due_days: i64,
    ) -> Result<Bill, BillingError> {
        if amount <= BigDecimal::from(0) {
            return Err(BillingError::NonPositiveAmount);
        }
        let due_days = u64::try_from(due_days).map_err(|_| BillingError::InvalidDueDate)?;
        let due_date = Utc::now()
            .date_naive()
            .checked_add_days(Days::new(due_days))
            .ok_or(BillingError::InvalidDueDate)?;

        let bill = sqlx::query_as::<_, Bill>(
            "INSERT INTO bills (member_id, due_date, total_amount, status, description)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING id, member_id, bill_date, due_date, total_amount, amount_paid, status,
                       description",
        )
        .bind(member_id)
        .bind(due_date)
        .bind(&amount)
        .bind(bill_status::PENDING)
        .bind(description)
        .fetch_one(&self.db)
        .await?;

        tracing::info!(bill_id = bill.id, member_id, "generated bill");
        Ok(bill)
    }

    /// Record a payment against a bill, rejecting overpayment.
    #[tracing::instrument(skip(self, amount, reference))]
    pub async fn record_payment(
        &self,
        bill_id: i32,
        amount: BigDecimal,
        method: &str,
        reference: Option<&str>,
    ) -> Result<Payment, BillingError> {
        let mut tx = self.db.begin().await?;

        let (total, paid) = sqlx::query_as::<_, (BigDecimal, BigDecimal)>(
            "SELECT total_amount, amount_paid FROM bills WHERE id = $1 FOR UPDATE",
        )
        .bind(bill_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(BillingError::UnknownBill)?;

        validate_payment(&total, &paid, &amount)?;

        let payment = sqlx::query_as::<_, Payment>(
            "INSERT INTO payments (bill_id, amount, method, reference)
             VALUES ($1, $2, $3, $4)
             RETURNING id, bill_id, amount, method, reference, paid_at",
        )
        .bind(bill_id)
        .bind(&amount)
        .bind(method)
        .bind(reference)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query(
            "UPDATE bills
             SET amount_paid = amount_paid + $1,
                 status = CASE WHEN amount_paid + $1 >= total_amount THEN $2 ELSE status END
             WHERE id = $3",
        )
        .bind(&amount)
        .bind(bill_status::PAID)
        .bind(bill_id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        tracing::info!(payment_id = payment.id, bill_id, "recorded payment");
        Ok(payment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(v: i32) -> BigDecimal {
        BigDecimal::from(v)
    }

    #[test]
    fn test_payment_within_balance() {
        assert!(validate_payment(&dec(100), &dec(0), &dec(60)).is_ok());
        assert!(validate_payment(&dec(100), &dec(60), &dec(40)).is_ok());
    }

    #[test]
    fn test_overpayment_rejected() {
        // bill total 100, 60 paid: a further 50 exceeds the remaining 40
        let err = validate_payment(&dec(100), &dec(60), &dec(50)).unwrap_err();
        match err {
            BillingError::ExceedsBalance { remaining } => assert_eq!(remaining, dec(40)),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_non_positive_amounts_rejected() {
        assert!(matches!(
            validate_payment(&dec(100), &dec(0), &dec(0)),
            Err(BillingError::NonPositiveAmount)
        ));
        assert!(matches!(
            validate_payment(&dec(100), &dec(0), &dec(-5)),
            Err(BillingError::NonPositiveAmount)
        ));
    }

    #[test]
    fn test_settling_payment_allowed() {
        assert!(validate_payment(&dec(100), &dec(60), &dec(40)).is_ok());
        // and nothing further once settled
        assert!(matches!(
            validate_payment(&dec(100), &dec(100), &dec(1)),
            Err(BillingError::ExceedsBalance { .. })
        ));
    }
}
