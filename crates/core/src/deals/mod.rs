//! Deals module - the negotiation pipeline between players and teams.

mod deals_boards;
mod deals_feed;
mod deals_model;
mod deals_service;
mod deals_traits;
mod deals_transitions;


pub use deals_boards::{
    build_deal_board, build_player_board, DealCard, DealColumn, PlayerBoard, PlayerCard,
    PlayerColumn, TeamDealBoard,
};
pub use deals_feed::{build_feed, FeedItem};
pub use deals_model::{DealNote, DealStage, DealSummary, NewDealNote, NewTeamDeal, TeamDeal};
pub use deals_service::{
    DealPipelineService, DealReminderForm, TransitionOutcome, CONTRACT_DATA_UNAVAILABLE,
    CONTRACT_MANAGER_UNAVAILABLE,
};
pub use deals_traits::TeamDealRepositoryTrait;
pub use deals_transitions::{
    deal_stage_effect, player_status_effect, TransitionCommand, TransitionEffect,
};
