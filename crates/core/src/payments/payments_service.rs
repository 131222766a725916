use chrono::Datelike;
use log::info;
use std::sync::Arc;

use super::payments_model::{payment_stats, payment_years, Payment, PaymentFilter, PaymentStats};
use super::payments_traits::PaymentRepositoryTrait;
use crate::errors::Result;
use crate::refresh::{Collection, Mutation, RefreshSet};
use crate::utils::Clock;

/// Service behind the payments page.
pub struct PaymentService {
    repository: Arc<dyn PaymentRepositoryTrait>,
    clock: Clock,
}

impl PaymentService {
    pub fn new(repository: Arc<dyn PaymentRepositoryTrait>) -> Self {
        Self {
            repository,
            clock: Clock::System,
        }
    }

    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    pub async fn list_payments(&self, filter: &PaymentFilter) -> Result<Vec<Payment>> {
        let payments = self.repository.list().await?;
        Ok(payments.into_iter().filter(|p| filter.matches(p)).collect())
    }

    /// Stats for the current year over all payments.
    pub async fn stats(&self) -> Result<PaymentStats> {
        let payments = self.repository.list().await?;
        Ok(payment_stats(&payments, self.clock.today().year()))
    }

    pub async fn available_years(&self) -> Result<Vec<i32>> {
        let payments = self.repository.list().await?;
        Ok(payment_years(&payments))
    }

    pub async fn mark_as_paid(&self, payment_id: &str) -> Result<Mutation<Payment>> {
        let payment = self
            .repository
            .mark_paid(payment_id, self.clock.today())
            .await?;
        info!("Payment {} marked as paid", payment_id);
        Ok(Mutation::new(payment, RefreshSet::of([Collection::Payments])))
    }
}
