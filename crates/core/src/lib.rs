//! AgentPlay Core - Domain entities, services, and traits.
//!
//! This crate contains the business logic of the AgentPlay sports agency
//! platform: players, prospects, the negotiation pipeline, contracts,
//! commissions, reminders and contacts. It is backend-agnostic and defines
//! repository traits that are implemented by the `agentplay-backend` crate
//! (hosted backend) and by [`memory::MemoryBackend`] (in-process).

pub mod calendar;
pub mod constants;
pub mod contacts;
pub mod context;
pub mod contracts;
pub mod deals;
pub mod errors;
pub mod memory;
pub mod payments;
pub mod players;
pub mod prospects;
pub mod refresh;
pub mod reminders;
pub mod repositories;
pub mod services;
pub mod session;
pub mod teams;
pub mod utils;

pub use context::PageContext;
pub use refresh::{Collection, Mutation, RefreshSet};
pub use repositories::{Repositories, RepositoryProvider};
pub use services::AgencyServices;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
