//! Prospects module - scouted athletes not yet under management.

mod prospects_model;
mod prospects_traits;

pub use prospects_model::{NewProspect, Prospect};
pub use prospects_traits::ProspectRepositoryTrait;
