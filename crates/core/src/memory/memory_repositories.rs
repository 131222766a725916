use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use std::cmp::Reverse;

use super::memory_backend::{issue_session, new_id, not_found, MemoryBackend, UserRecord};
use crate::constants::Table;
use crate::contacts::{Contact, ContactRepositoryTrait, NewContact};
use crate::contracts::{Contract, ContractRepositoryTrait, NewContract};
use crate::deals::{DealNote, DealStage, NewDealNote, NewTeamDeal, TeamDeal, TeamDealRepositoryTrait};
use crate::errors::{AuthFailure, DatabaseError, Result};
use crate::payments::{NewPayment, Payment, PaymentRepositoryTrait, PaymentStatus};
use crate::players::{NewPlayer, Player, PlayerDealStatus, PlayerRepositoryTrait, PlayerUpdate};
use crate::prospects::{NewProspect, Prospect, ProspectRepositoryTrait};
use crate::reminders::{NewReminder, Reminder, ReminderRepositoryTrait};
use crate::session::{Credentials, Session, SessionProviderTrait, SignUpOutcome};
use crate::teams::{CatalogRepositoryTrait, Competition, Team};

#[async_trait]
impl PlayerRepositoryTrait for MemoryBackend {
    async fn list(&self) -> Result<Vec<Player>> {
        let state = self.lock();
        state.check(Table::Players)?;
        let mut players: Vec<Player> = state.players.iter().map(|p| state.join_player(p)).collect();
        players.sort_by_key(|p| Reverse(p.created_at));
        Ok(players)
    }

    async fn list_for_board(&self) -> Result<Vec<Player>> {
        let state = self.lock();
        state.check(Table::Players)?;
        let mut players: Vec<Player> = state.players.iter().map(|p| state.join_player(p)).collect();
        players.sort_by(|a, b| a.last_name.cmp(&b.last_name));
        Ok(players)
    }

    async fn get_by_id(&self, player_id: &str) -> Result<Player> {
        let state = self.lock();
        state.check(Table::Players)?;
        state
            .players
            .iter()
            .find(|p| p.id == player_id)
            .map(|p| state.join_player(p))
            .ok_or_else(|| not_found("Player", player_id))
    }

    async fn create(&self, new_player: NewPlayer) -> Result<Player> {
        let mut state = self.lock();
        state.check(Table::Players)?;
        let player = Player {
            id: new_id(),
            first_name: new_player.first_name,
            last_name: new_player.last_name,
            date_of_birth: new_player.date_of_birth,
            position: new_player.position,
            email: new_player.email,
            phone: new_player.phone,
            player_deal_status: PlayerDealStatus::FreeAgent,
            current_contract_id: None,
            current_contract: None,
            team_deals: Vec::new(),
            created_at: Some(state.stamp(&self.clock)),
        };
        state.players.push(player.clone());
        Ok(player)
    }

    async fn update(&self, player_update: PlayerUpdate) -> Result<Player> {
        let mut state = self.lock();
        state.check(Table::Players)?;
        let player = state
            .players
            .iter_mut()
            .find(|p| p.id == player_update.id)
            .ok_or_else(|| not_found("Player", &player_update.id))?;
        player.first_name = player_update.first_name;
        player.last_name = player_update.last_name;
        player.date_of_birth = player_update.date_of_birth;
        player.position = player_update.position;
        player.email = player_update.email;
        player.phone = player_update.phone;
        let updated = player.clone();
        Ok(state.join_player(&updated))
    }

    async fn delete(&self, player_id: &str) -> Result<usize> {
        let mut state = self.lock();
        state.check(Table::Players)?;
        if state.contracts.iter().any(|c| c.player_id == player_id) {
            return Err(DatabaseError::ForeignKeyViolation(format!(
                "Player {} still has contracts",
                player_id
            ))
            .into());
        }
        let before = state.players.len();
        state.players.retain(|p| p.id != player_id);
        let removed = before - state.players.len();
        let deal_ids: Vec<String> = state
            .deals
            .iter()
            .filter(|d| d.player_id == player_id)
            .map(|d| d.id.clone())
            .collect();
        state.deals.retain(|d| d.player_id != player_id);
        state.notes.retain(|n| !deal_ids.contains(&n.team_deal_id));
        Ok(removed)
    }

    async fn set_deal_status(&self, player_id: &str, status: PlayerDealStatus) -> Result<()> {
        let mut state = self.lock();
        state.check(Table::Players)?;
        let player = state
            .players
            .iter_mut()
            .find(|p| p.id == player_id)
            .ok_or_else(|| not_found("Player", player_id))?;
        player.player_deal_status = status;
        Ok(())
    }

    async fn mark_signed(&self, player_id: &str, contract_id: &str) -> Result<()> {
        let mut state = self.lock();
        state.check(Table::Players)?;
        let player = state
            .players
            .iter_mut()
            .find(|p| p.id == player_id)
            .ok_or_else(|| not_found("Player", player_id))?;
        player.player_deal_status = PlayerDealStatus::Signed;
        player.current_contract_id = Some(contract_id.to_string());
        Ok(())
    }
}

#[async_trait]
impl ProspectRepositoryTrait for MemoryBackend {
    async fn list_open(&self) -> Result<Vec<Prospect>> {
        let state = self.lock();
        state.check(Table::Prospects)?;
        let mut prospects: Vec<Prospect> = state
            .prospects
            .iter()
            .filter(|p| !p.is_converted)
            .cloned()
            .collect();
        prospects.sort_by_key(|p| Reverse(p.created_at));
        Ok(prospects)
    }

    async fn get_by_id(&self, prospect_id: &str) -> Result<Prospect> {
        let state = self.lock();
        state.check(Table::Prospects)?;
        state
            .prospects
            .iter()
            .find(|p| p.id == prospect_id)
            .cloned()
            .ok_or_else(|| not_found("Prospect", prospect_id))
    }

    async fn create(&self, new_prospect: NewProspect) -> Result<Prospect> {
        let mut state = self.lock();
        state.check(Table::Prospects)?;
        let prospect = Prospect {
            id: new_id(),
            first_name: new_prospect.first_name,
            last_name: new_prospect.last_name,
            email: new_prospect.email,
            phone: new_prospect.phone,
            notes: new_prospect.notes,
            is_converted: false,
            converted_player_id: None,
            created_at: Some(state.stamp(&self.clock)),
        };
        state.prospects.push(prospect.clone());
        Ok(prospect)
    }

    async fn mark_converted(&self, prospect_id: &str, player_id: &str) -> Result<Prospect> {
        let mut state = self.lock();
        state.check(Table::Prospects)?;
        let prospect = state
            .prospects
            .iter_mut()
            .find(|p| p.id == prospect_id)
            .ok_or_else(|| not_found("Prospect", prospect_id))?;
        prospect.is_converted = true;
        prospect.converted_player_id = Some(player_id.to_string());
        Ok(prospect.clone())
    }
}

#[async_trait]
impl CatalogRepositoryTrait for MemoryBackend {
    async fn list_teams(&self) -> Result<Vec<Team>> {
        let state = self.lock();
        state.check(Table::Teams)?;
        let mut teams: Vec<Team> = state
            .teams
            .iter()
            .filter_map(|t| state.team(&t.id))
            .collect();
        teams.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(teams)
    }

    async fn list_competitions(&self) -> Result<Vec<Competition>> {
        let state = self.lock();
        state.check(Table::Competitions)?;
        let mut competitions = state.competitions.clone();
        competitions.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(competitions)
    }
}

#[async_trait]
impl TeamDealRepositoryTrait for MemoryBackend {
    async fn list_for_player(&self, player_id: &str) -> Result<Vec<TeamDeal>> {
        let state = self.lock();
        state.check(Table::TeamDeals)?;
        Ok(state
            .deals
            .iter()
            .filter(|d| d.player_id == player_id)
            .map(|d| state.join_deal(d))
            .collect())
    }

    async fn create(&self, new_deal: NewTeamDeal) -> Result<TeamDeal> {
        let mut state = self.lock();
        state.check(Table::TeamDeals)?;
        if state
            .deals
            .iter()
            .any(|d| d.player_id == new_deal.player_id && d.team_id == new_deal.team_id)
        {
            return Err(DatabaseError::UniqueViolation(format!(
                "Deal for player {} and team {} already exists",
                new_deal.player_id, new_deal.team_id
            ))
            .into());
        }
        if !state.players.iter().any(|p| p.id == new_deal.player_id) {
            return Err(DatabaseError::ForeignKeyViolation(format!(
                "Unknown player {}",
                new_deal.player_id
            ))
            .into());
        }
        let now = state.stamp(&self.clock);
        let deal = TeamDeal {
            id: new_id(),
            player_id: new_deal.player_id,
            team_id: new_deal.team_id,
            deal_stage: DealStage::Ongoing,
            user_id: new_deal.user_id,
            team: None,
            deal_notes: Vec::new(),
            created_at: now,
            updated_at: now,
        };
        state.deals.push(deal.clone());
        Ok(state.join_deal(&deal))
    }

    async fn update_stage(
        &self,
        deal_id: &str,
        stage: DealStage,
        updated_at: DateTime<Utc>,
    ) -> Result<TeamDeal> {
        let mut state = self.lock();
        state.check(Table::TeamDeals)?;
        let deal = state
            .deals
            .iter_mut()
            .find(|d| d.id == deal_id)
            .ok_or_else(|| not_found("Team deal", deal_id))?;
        deal.deal_stage = stage;
        deal.updated_at = updated_at;
        let updated = deal.clone();
        Ok(state.join_deal(&updated))
    }

    async fn add_note(&self, new_note: NewDealNote) -> Result<DealNote> {
        let mut state = self.lock();
        state.check(Table::DealNotes)?;
        if !state.deals.iter().any(|d| d.id == new_note.team_deal_id) {
            return Err(not_found("Team deal", &new_note.team_deal_id));
        }
        let note = DealNote {
            id: new_id(),
            team_deal_id: new_note.team_deal_id,
            note_text: new_note.note_text,
            deal_stage_at_time: new_note.deal_stage_at_time,
            user_id: new_note.user_id,
            created_at: state.stamp(&self.clock),
        };
        state.notes.push(note.clone());
        Ok(note)
    }
}

fn contract_from(id: String, row: NewContract, created_at: Option<DateTime<Utc>>) -> Contract {
    Contract {
        id,
        player_id: row.player_id,
        team_id: row.team_id,
        competition_id: row.competition_id,
        contract_value: row.contract_value,
        commission_percentage: row.commission_percentage,
        contract_start_date: row.contract_start_date,
        contract_end_date: row.contract_end_date,
        notes: row.notes,
        is_active: row.is_active,
        added_retroactively: row.added_retroactively,
        team_deal_id: row.team_deal_id,
        team_name: None,
        competition_name: None,
        created_at,
    }
}

#[async_trait]
impl ContractRepositoryTrait for MemoryBackend {
    async fn get_active_for_player(&self, player_id: &str) -> Result<Contract> {
        let state = self.lock();
        state.check(Table::Contracts)?;
        state
            .contracts
            .iter()
            .filter(|c| c.player_id == player_id && c.is_active)
            .max_by_key(|c| c.contract_end_date)
            .map(|c| state.join_contract(c))
            .ok_or_else(|| not_found("Active contract for player", player_id))
    }

    async fn list_for_player(&self, player_id: &str) -> Result<Vec<Contract>> {
        let state = self.lock();
        state.check(Table::Contracts)?;
        let mut contracts: Vec<Contract> = state
            .contracts
            .iter()
            .filter(|c| c.player_id == player_id)
            .map(|c| state.join_contract(c))
            .collect();
        contracts.sort_by_key(|c| Reverse(c.contract_end_date));
        Ok(contracts)
    }

    async fn create(&self, new_contract: NewContract) -> Result<Contract> {
        let mut state = self.lock();
        state.check(Table::Contracts)?;
        let created_at = state.stamp(&self.clock);
        let contract = contract_from(new_id(), new_contract, Some(created_at));
        state.contracts.push(contract.clone());
        Ok(state.join_contract(&contract))
    }

    async fn update(&self, contract_id: &str, changes: NewContract) -> Result<Contract> {
        let mut state = self.lock();
        state.check(Table::Contracts)?;
        let existing = state
            .contracts
            .iter_mut()
            .find(|c| c.id == contract_id)
            .ok_or_else(|| not_found("Contract", contract_id))?;
        let team_deal_id = changes.team_deal_id.clone().or_else(|| existing.team_deal_id.clone());
        let mut updated = contract_from(existing.id.clone(), changes, existing.created_at);
        updated.team_deal_id = team_deal_id;
        *existing = updated.clone();
        Ok(state.join_contract(&updated))
    }
}

#[async_trait]
impl PaymentRepositoryTrait for MemoryBackend {
    async fn list(&self) -> Result<Vec<Payment>> {
        let state = self.lock();
        state.check(Table::Payments)?;
        let mut payments: Vec<Payment> = state.payments.iter().map(|p| state.join_payment(p)).collect();
        payments.sort_by_key(|p| Reverse(p.due_date));
        Ok(payments)
    }

    async fn create(&self, new_payment: NewPayment) -> Result<Payment> {
        let mut state = self.lock();
        state.check(Table::Payments)?;
        if !state.contracts.iter().any(|c| c.id == new_payment.contract_id) {
            return Err(DatabaseError::ForeignKeyViolation(format!(
                "Unknown contract {}",
                new_payment.contract_id
            ))
            .into());
        }
        let payment = Payment {
            id: new_id(),
            contract_id: new_payment.contract_id,
            amount: new_payment.amount,
            due_date: new_payment.due_date,
            paid_date: None,
            status: new_payment.status,
            player_name: None,
            team_name: None,
            contract_value: None,
            commission_percentage: None,
        };
        state.payments.push(payment.clone());
        Ok(state.join_payment(&payment))
    }

    async fn mark_paid(&self, payment_id: &str, paid_date: NaiveDate) -> Result<Payment> {
        let mut state = self.lock();
        state.check(Table::Payments)?;
        let payment = state
            .payments
            .iter_mut()
            .find(|p| p.id == payment_id)
            .ok_or_else(|| not_found("Payment", payment_id))?;
        payment.status = PaymentStatus::Paid;
        payment.paid_date = Some(paid_date);
        let updated = payment.clone();
        Ok(state.join_payment(&updated))
    }
}

/// Earliest due date first, undated reminders last.
fn sort_by_due(reminders: &mut [Reminder]) {
    reminders.sort_by_key(|r| (r.due_date.is_none(), r.due_date));
}

#[async_trait]
impl ReminderRepositoryTrait for MemoryBackend {
    async fn list(&self) -> Result<Vec<Reminder>> {
        let state = self.lock();
        state.check(Table::Reminders)?;
        let mut reminders: Vec<Reminder> = state.reminders.iter().map(|r| state.join_reminder(r)).collect();
        sort_by_due(&mut reminders);
        Ok(reminders)
    }

    async fn list_open(&self) -> Result<Vec<Reminder>> {
        let state = self.lock();
        state.check(Table::Reminders)?;
        let mut reminders: Vec<Reminder> = state
            .reminders
            .iter()
            .filter(|r| !r.completed)
            .map(|r| state.join_reminder(r))
            .collect();
        sort_by_due(&mut reminders);
        Ok(reminders)
    }

    async fn list_open_for_deals(&self, deal_ids: &[String]) -> Result<Vec<Reminder>> {
        let state = self.lock();
        state.check(Table::Reminders)?;
        let mut reminders: Vec<Reminder> = state
            .reminders
            .iter()
            .filter(|r| !r.completed)
            .filter(|r| {
                r.team_deal_id
                    .as_ref()
                    .is_some_and(|id| deal_ids.contains(id))
            })
            .map(|r| state.join_reminder(r))
            .collect();
        sort_by_due(&mut reminders);
        Ok(reminders)
    }

    async fn create(&self, new_reminder: NewReminder) -> Result<Reminder> {
        let mut state = self.lock();
        state.check(Table::Reminders)?;
        let reminder = Reminder {
            id: new_id(),
            title: new_reminder.title,
            description: new_reminder.description,
            due_date: new_reminder.due_date,
            tag: new_reminder.tag,
            completed: false,
            auto_generated: false,
            player_id: new_reminder.player_id,
            team_deal_id: new_reminder.team_deal_id,
            contract_id: new_reminder.contract_id,
            player_name: None,
            created_at: Some(state.stamp(&self.clock)),
        };
        state.reminders.push(reminder.clone());
        Ok(state.join_reminder(&reminder))
    }

    async fn set_completed(&self, reminder_id: &str, completed: bool) -> Result<Reminder> {
        let mut state = self.lock();
        state.check(Table::Reminders)?;
        let reminder = state
            .reminders
            .iter_mut()
            .find(|r| r.id == reminder_id)
            .ok_or_else(|| not_found("Reminder", reminder_id))?;
        reminder.completed = completed;
        let updated = reminder.clone();
        Ok(state.join_reminder(&updated))
    }

    async fn delete(&self, reminder_id: &str) -> Result<usize> {
        let mut state = self.lock();
        state.check(Table::Reminders)?;
        let before = state.reminders.len();
        state.reminders.retain(|r| r.id != reminder_id);
        Ok(before - state.reminders.len())
    }
}

#[async_trait]
impl ContactRepositoryTrait for MemoryBackend {
    async fn list(&self) -> Result<Vec<Contact>> {
        let state = self.lock();
        state.check(Table::Contacts)?;
        let mut contacts: Vec<Contact> = state.contacts.iter().map(|c| state.join_contact(c)).collect();
        contacts.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(contacts)
    }

    async fn get_by_id(&self, contact_id: &str) -> Result<Contact> {
        let state = self.lock();
        state.check(Table::Contacts)?;
        state
            .contacts
            .iter()
            .find(|c| c.id == contact_id)
            .map(|c| state.join_contact(c))
            .ok_or_else(|| not_found("Contact", contact_id))
    }

    async fn create(&self, new_contact: NewContact) -> Result<Contact> {
        let mut state = self.lock();
        state.check(Table::Contacts)?;
        let contact = Contact {
            id: new_id(),
            name: new_contact.name,
            role: new_contact.role,
            email: new_contact.email,
            phone: new_contact.phone,
            team_id: new_contact.team_id,
            player_id: None,
            notes: new_contact.notes,
            team_name: None,
            player_name: None,
        };
        state.contacts.push(contact.clone());
        Ok(state.join_contact(&contact))
    }

    async fn update(&self, contact_id: &str, changes: NewContact) -> Result<Contact> {
        let mut state = self.lock();
        state.check(Table::Contacts)?;
        let contact = state
            .contacts
            .iter_mut()
            .find(|c| c.id == contact_id)
            .ok_or_else(|| not_found("Contact", contact_id))?;
        contact.name = changes.name;
        contact.role = changes.role;
        contact.email = changes.email;
        contact.phone = changes.phone;
        contact.team_id = changes.team_id;
        contact.notes = changes.notes;
        let updated = contact.clone();
        Ok(state.join_contact(&updated))
    }

    async fn delete(&self, contact_id: &str) -> Result<usize> {
        let mut state = self.lock();
        state.check(Table::Contacts)?;
        let before = state.contacts.len();
        state.contacts.retain(|c| c.id != contact_id);
        Ok(before - state.contacts.len())
    }
}

#[async_trait]
impl SessionProviderTrait for MemoryBackend {
    async fn get_session(&self, access_token: &str) -> Result<Option<Session>> {
        let state = self.lock();
        let now = self.clock.now().timestamp();
        Ok(state
            .sessions
            .get(access_token)
            .filter(|s| s.expires_at.map_or(true, |exp| exp > now))
            .cloned())
    }

    async fn sign_in(&self, credentials: &Credentials) -> Result<Session> {
        let mut state = self.lock();
        let user = state
            .users
            .iter()
            .find(|u| u.email.eq_ignore_ascii_case(credentials.email.trim()))
            .filter(|u| u.password == credentials.password)
            .cloned()
            .ok_or_else(|| AuthFailure::Rejected("Invalid login credentials".to_string()))?;
        if !user.confirmed {
            return Err(AuthFailure::Rejected("Email not confirmed".to_string()).into());
        }
        let session = issue_session(&user, &self.clock);
        state
            .sessions
            .insert(session.access_token.clone(), session.clone());
        Ok(session)
    }

    async fn sign_up(&self, email: &str, password: &str) -> Result<SignUpOutcome> {
        let mut state = self.lock();
        let valid = email
            .split_once('@')
            .is_some_and(|(local, domain)| !local.is_empty() && domain.contains('.'));
        if !valid {
            return Err(AuthFailure::Rejected(format!(
                "Unable to validate email address: please provide a valid email ({})",
                email
            ))
            .into());
        }
        if state.users.iter().any(|u| u.email.eq_ignore_ascii_case(email)) {
            return Err(AuthFailure::Rejected("User already registered".to_string()).into());
        }
        let user = UserRecord {
            id: new_id(),
            email: email.to_string(),
            password: password.to_string(),
            confirmed: self.auto_confirm,
        };
        state.users.push(user.clone());
        if !user.confirmed {
            return Ok(SignUpOutcome::ConfirmationRequired {
                email: email.to_string(),
            });
        }
        let session = issue_session(&user, &self.clock);
        state
            .sessions
            .insert(session.access_token.clone(), session.clone());
        Ok(SignUpOutcome::SignedIn { session })
    }

    async fn sign_out(&self, access_token: &str) -> Result<()> {
        self.lock().sessions.remove(access_token);
        Ok(())
    }
}
