//! Payments module - commission payments created by active contracts.

mod payments_model;
mod payments_service;
mod payments_traits;

#[cfg(test)]
mod payments_service_tests;

pub use payments_model::{
    payment_stats, payment_years, NewPayment, Payment, PaymentFilter, PaymentStats, PaymentStatus,
};
pub use payments_service::PaymentService;
pub use payments_traits::PaymentRepositoryTrait;
