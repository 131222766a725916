//! Commission payment models, filters and stats.

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::utils::format_eur;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    #[default]
    Pending,
    #[serde(alias = "received")]
    Paid,
    Overdue,
}

impl PaymentStatus {
    pub fn label(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => "Pending",
            PaymentStatus::Paid => "Paid",
            PaymentStatus::Overdue => "Overdue",
        }
    }
}

/// Commission owed to the agency on an active contract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payment {
    pub id: String,
    pub contract_id: String,
    pub amount: Decimal,
    pub due_date: NaiveDate,
    #[serde(default)]
    pub paid_date: Option<NaiveDate>,
    #[serde(default)]
    pub status: PaymentStatus,
    #[serde(default)]
    pub player_name: Option<String>,
    #[serde(default)]
    pub team_name: Option<String>,
    #[serde(default)]
    pub contract_value: Option<Decimal>,
    #[serde(default)]
    pub commission_percentage: Option<Decimal>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewPayment {
    pub contract_id: String,
    pub amount: Decimal,
    pub due_date: NaiveDate,
    pub status: PaymentStatus,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentFilter {
    #[serde(default)]
    pub status: Option<PaymentStatus>,
    /// Year of the due date.
    #[serde(default)]
    pub year: Option<i32>,
}

impl PaymentFilter {
    pub fn matches(&self, payment: &Payment) -> bool {
        self.status.map_or(true, |status| payment.status == status)
            && self.year.map_or(true, |year| payment.due_date.year() == year)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaymentStats {
    pub year: i32,
    pub paid_this_year: Decimal,
    pub pending_total: Decimal,
    pub count: usize,
    pub paid_this_year_display: String,
    pub pending_total_display: String,
}

/// Paid amounts for `year` (by paid date), pending total and count.
pub fn payment_stats(payments: &[Payment], year: i32) -> PaymentStats {
    let paid_this_year: Decimal = payments
        .iter()
        .filter(|p| p.paid_date.is_some_and(|d| d.year() == year))
        .map(|p| p.amount)
        .sum();
    let pending_total: Decimal = payments
        .iter()
        .filter(|p| p.status == PaymentStatus::Pending)
        .map(|p| p.amount)
        .sum();

    PaymentStats {
        year,
        paid_this_year,
        pending_total,
        count: payments.len(),
        paid_this_year_display: format_eur(paid_this_year, 0),
        pending_total_display: format_eur(pending_total, 0),
    }
}

/// Years appearing as due or paid years, newest first.
pub fn payment_years(payments: &[Payment]) -> Vec<i32> {
    let mut years: Vec<i32> = payments
        .iter()
        .flat_map(|p| std::iter::once(p.due_date.year()).chain(p.paid_date.map(|d| d.year())))
        .collect();
    years.sort_unstable_by(|a, b| b.cmp(a));
    years.dedup();
    years
}
