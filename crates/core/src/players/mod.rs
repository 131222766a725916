//! Players module - domain models, roster view, services, and traits.

mod players_model;
mod players_roster;
mod players_service;
mod players_traits;


pub use players_model::{CurrentContract, NewPlayer, Player, PlayerDealStatus, PlayerUpdate};
pub use players_roster::{
    build_roster, PlayerDetail, RosterFilter, RosterKind, RosterRow, RosterTab, RosterView,
};
pub use players_service::PlayerService;
pub use players_traits::{PlayerRepositoryTrait, PlayerServiceTrait};

pub(crate) use players_model::{clean_optional, validate_names};
