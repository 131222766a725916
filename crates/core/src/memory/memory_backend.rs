//! In-process data backend holding every table in memory.
//!
//! Joins that the hosted backend performs through embedded selects are
//! computed at read time, so stored rows only carry their own columns.

use chrono::{DateTime, Duration, Utc};
use log::debug;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, MutexGuard};
use uuid::Uuid;

use crate::constants::Table;
use crate::contacts::Contact;
use crate::contracts::Contract;
use crate::deals::{DealNote, DealSummary, TeamDeal};
use crate::errors::{DatabaseError, Error, Result};
use crate::payments::Payment;
use crate::players::{CurrentContract, Player};
use crate::prospects::Prospect;
use crate::reminders::Reminder;
use crate::repositories::{Repositories, RepositoryProvider};
use crate::session::{Session, SessionProviderTrait, SessionUser};
use crate::teams::{Competition, Team};
use crate::utils::Clock;

#[derive(Debug, Clone)]
pub(super) struct UserRecord {
    pub id: String,
    pub email: String,
    pub password: String,
    pub confirmed: bool,
}

#[derive(Default)]
pub(super) struct MemoryState {
    pub users: Vec<UserRecord>,
    pub sessions: HashMap<String, Session>,
    pub competitions: Vec<Competition>,
    pub teams: Vec<Team>,
    pub players: Vec<Player>,
    pub prospects: Vec<Prospect>,
    pub deals: Vec<TeamDeal>,
    pub notes: Vec<DealNote>,
    pub contracts: Vec<Contract>,
    pub payments: Vec<Payment>,
    pub reminders: Vec<Reminder>,
    pub contacts: Vec<Contact>,
    pub failing: HashSet<Table>,
    sequence: i64,
}

impl MemoryState {
    pub fn check(&self, table: Table) -> Result<()> {
        if self.failing.contains(&table) {
            return Err(DatabaseError::QueryFailed(format!("{} is unavailable", table)).into());
        }
        Ok(())
    }

    /// Strictly increasing timestamps so rows written in one test keep their order.
    pub fn stamp(&mut self, clock: &Clock) -> DateTime<Utc> {
        self.sequence += 1;
        clock.now() + Duration::milliseconds(self.sequence)
    }

    pub fn team(&self, team_id: &str) -> Option<Team> {
        self.teams.iter().find(|t| t.id == team_id).map(|team| {
            let mut team = team.clone();
            team.competition_name = team
                .competition_id
                .as_deref()
                .and_then(|id| self.competitions.iter().find(|c| c.id == id))
                .map(|c| c.name.clone());
            team
        })
    }

    pub fn team_name(&self, team_id: &str) -> Option<String> {
        self.teams
            .iter()
            .find(|t| t.id == team_id)
            .map(|t| t.name.clone())
    }

    pub fn player_name(&self, player_id: &str) -> Option<String> {
        self.players
            .iter()
            .find(|p| p.id == player_id)
            .map(Player::full_name)
    }

    pub fn join_player(&self, player: &Player) -> Player {
        let mut joined = player.clone();
        joined.team_deals = self
            .deals
            .iter()
            .filter(|d| d.player_id == player.id)
            .map(DealSummary::from)
            .collect();
        joined.current_contract = player
            .current_contract_id
            .as_deref()
            .and_then(|id| self.contracts.iter().find(|c| c.id == id))
            .map(|contract| CurrentContract {
                id: contract.id.clone(),
                contract_end_date: contract.contract_end_date,
                team_name: self.team_name(&contract.team_id),
            });
        joined
    }

    pub fn join_deal(&self, deal: &TeamDeal) -> TeamDeal {
        let mut joined = deal.clone();
        joined.team = self.team(&deal.team_id);
        joined.deal_notes = self
            .notes
            .iter()
            .filter(|n| n.team_deal_id == deal.id)
            .cloned()
            .collect();
        joined
    }

    pub fn join_contract(&self, contract: &Contract) -> Contract {
        let mut joined = contract.clone();
        joined.team_name = self.team_name(&contract.team_id);
        joined.competition_name = self
            .competitions
            .iter()
            .find(|c| c.id == contract.competition_id)
            .map(|c| c.name.clone());
        joined
    }

    pub fn join_payment(&self, payment: &Payment) -> Payment {
        let mut joined = payment.clone();
        if let Some(contract) = self.contracts.iter().find(|c| c.id == payment.contract_id) {
            joined.player_name = self.player_name(&contract.player_id);
            joined.team_name = self.team_name(&contract.team_id);
            joined.contract_value = Some(contract.contract_value);
            joined.commission_percentage = Some(contract.commission_percentage);
        }
        joined
    }

    pub fn join_reminder(&self, reminder: &Reminder) -> Reminder {
        let mut joined = reminder.clone();
        joined.player_name = reminder
            .player_id
            .as_deref()
            .and_then(|id| self.player_name(id));
        joined
    }

    pub fn join_contact(&self, contact: &Contact) -> Contact {
        let mut joined = contact.clone();
        joined.team_name = contact.team_id.as_deref().and_then(|id| self.team_name(id));
        joined.player_name = contact
            .player_id
            .as_deref()
            .and_then(|id| self.player_name(id));
        joined
    }
}

pub(super) fn new_id() -> String {
    Uuid::new_v4().to_string()
}

pub(super) fn not_found(what: &str, id: &str) -> Error {
    DatabaseError::NotFound(format!("{} {} not found", what, id)).into()
}

/// In-memory implementation of every repository and of the auth service.
///
/// Used for local development without a hosted backend and as the test
/// double throughout the workspace. Row-level ownership is not enforced.
#[derive(Clone, Default)]
pub struct MemoryBackend {
    pub(super) state: Arc<Mutex<MemoryState>>,
    pub(super) clock: Clock,
    pub(super) auto_confirm: bool,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    /// Sign-ups are confirmed immediately instead of awaiting an email link.
    pub fn with_auto_confirm(mut self) -> Self {
        self.auto_confirm = true;
        self
    }

    pub(super) fn lock(&self) -> MutexGuard<'_, MemoryState> {
        self.state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Makes every operation on `table` fail until [`heal_table`](Self::heal_table).
    pub fn fail_table(&self, table: Table) {
        debug!("Injecting failures for table {}", table);
        self.lock().failing.insert(table);
    }

    pub fn heal_table(&self, table: Table) {
        self.lock().failing.remove(&table);
    }

    pub fn add_competition(&self, name: &str, country: Option<&str>) -> String {
        let id = new_id();
        self.lock().competitions.push(Competition {
            id: id.clone(),
            name: name.to_string(),
            country: country.map(str::to_string),
        });
        id
    }

    pub fn add_team(&self, name: &str, city: Option<&str>, competition_id: Option<&str>) -> String {
        let id = new_id();
        self.lock().teams.push(Team {
            id: id.clone(),
            name: name.to_string(),
            city: city.map(str::to_string),
            competition_id: competition_id.map(str::to_string),
            competition_name: None,
        });
        id
    }

    /// Registers a confirmed account and returns its user id.
    pub fn register_user(&self, email: &str, password: &str) -> String {
        self.insert_user(email, password, true)
    }

    pub fn register_unconfirmed_user(&self, email: &str, password: &str) -> String {
        self.insert_user(email, password, false)
    }

    fn insert_user(&self, email: &str, password: &str, confirmed: bool) -> String {
        let id = new_id();
        self.lock().users.push(UserRecord {
            id: id.clone(),
            email: email.to_string(),
            password: password.to_string(),
            confirmed,
        });
        id
    }

    /// Issues a session for a registered user without going through sign-in.
    pub fn open_session(&self, user_id: &str) -> Result<Session> {
        let mut state = self.lock();
        let user = state
            .users
            .iter()
            .find(|u| u.id == user_id)
            .cloned()
            .ok_or_else(|| not_found("User", user_id))?;
        let session = issue_session(&user, &self.clock);
        state
            .sessions
            .insert(session.access_token.clone(), session.clone());
        Ok(session)
    }

    /// Inserts a reminder row as-is, e.g. one generated by a backend trigger.
    pub fn insert_reminder(&self, reminder: Reminder) {
        self.lock().reminders.push(reminder);
    }

    /// Inserts a contact row as-is, including player-synced ones.
    pub fn insert_contact(&self, contact: Contact) {
        self.lock().contacts.push(contact);
    }

    pub fn snapshot_players(&self) -> Vec<Player> {
        let state = self.lock();
        state.players.iter().map(|p| state.join_player(p)).collect()
    }

    pub fn snapshot_deals(&self) -> Vec<TeamDeal> {
        let state = self.lock();
        state.deals.iter().map(|d| state.join_deal(d)).collect()
    }

    pub fn snapshot_contracts(&self) -> Vec<Contract> {
        let state = self.lock();
        state.contracts.iter().map(|c| state.join_contract(c)).collect()
    }

    pub fn snapshot_payments(&self) -> Vec<Payment> {
        let state = self.lock();
        state.payments.iter().map(|p| state.join_payment(p)).collect()
    }

    pub fn snapshot_reminders(&self) -> Vec<Reminder> {
        let state = self.lock();
        state.reminders.iter().map(|r| state.join_reminder(r)).collect()
    }
}

pub(super) fn issue_session(user: &UserRecord, clock: &Clock) -> Session {
    Session {
        access_token: new_id(),
        refresh_token: Some(new_id()),
        expires_at: Some((clock.now() + Duration::hours(1)).timestamp()),
        user: SessionUser {
            id: user.id.clone(),
            email: Some(user.email.clone()),
        },
    }
}

impl RepositoryProvider for MemoryBackend {
    fn sessions(&self) -> Arc<dyn SessionProviderTrait> {
        Arc::new(self.clone())
    }

    fn repositories(&self, _session: &Session) -> Result<Repositories> {
        let backend = Arc::new(self.clone());
        Ok(Repositories {
            players: backend.clone(),
            prospects: backend.clone(),
            catalog: backend.clone(),
            deals: backend.clone(),
            contracts: backend.clone(),
            payments: backend.clone(),
            reminders: backend.clone(),
            contacts: backend,
        })
    }
}
