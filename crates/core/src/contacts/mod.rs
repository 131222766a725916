//! Contacts module - address book for club staff and player entourage.

mod contacts_model;
mod contacts_service;
mod contacts_traits;

#[cfg(test)]
mod contacts_service_tests;

pub use contacts_model::{Contact, ContactFilter, NewContact};
pub use contacts_service::ContactService;
pub use contacts_traits::ContactRepositoryTrait;
