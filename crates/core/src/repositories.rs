//! Per-session bundle of repository handles.

use std::sync::Arc;

use crate::contacts::ContactRepositoryTrait;
use crate::contracts::ContractRepositoryTrait;
use crate::deals::TeamDealRepositoryTrait;
use crate::errors::Result;
use crate::payments::PaymentRepositoryTrait;
use crate::players::PlayerRepositoryTrait;
use crate::prospects::ProspectRepositoryTrait;
use crate::reminders::ReminderRepositoryTrait;
use crate::session::{Session, SessionProviderTrait};
use crate::teams::CatalogRepositoryTrait;

#[derive(Clone)]
pub struct Repositories {
    pub players: Arc<dyn PlayerRepositoryTrait>,
    pub prospects: Arc<dyn ProspectRepositoryTrait>,
    pub catalog: Arc<dyn CatalogRepositoryTrait>,
    pub deals: Arc<dyn TeamDealRepositoryTrait>,
    pub contracts: Arc<dyn ContractRepositoryTrait>,
    pub payments: Arc<dyn PaymentRepositoryTrait>,
    pub reminders: Arc<dyn ReminderRepositoryTrait>,
    pub contacts: Arc<dyn ContactRepositoryTrait>,
}

/// A data backend: the auth service plus repositories scoped to a session.
///
/// Row-level security lives in the backend, so repositories are built per
/// session and carry that session's access token.
pub trait RepositoryProvider: Send + Sync {
    fn sessions(&self) -> Arc<dyn SessionProviderTrait>;

    fn repositories(&self, session: &Session) -> Result<Repositories>;
}
