use async_trait::async_trait;
use chrono::NaiveDate;

use super::payments_model::{NewPayment, Payment};
use crate::errors::Result;

#[async_trait]
pub trait PaymentRepositoryTrait: Send + Sync {
    /// All payments with contract, player and team data, latest due date first.
    async fn list(&self) -> Result<Vec<Payment>>;

    async fn create(&self, new_payment: NewPayment) -> Result<Payment>;

    /// Sets status `paid` and records the paid date.
    async fn mark_paid(&self, payment_id: &str, paid_date: NaiveDate) -> Result<Payment>;
}
