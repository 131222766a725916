use chrono::NaiveDate;
use log::{debug, error, info};
use std::sync::Arc;

use super::contracts_model::{
    commission_amount, is_contract_active, suggest_retroactive, CommissionPreview, Contract,
    ContractDraft, ContractForm, ContractMode, ContractSaveResult, NewContract,
};
use super::contracts_traits::{ContractRepositoryTrait, ContractServiceTrait};
use crate::context::{OpenContract, PageContext};
use crate::errors::Result;
use crate::payments::{NewPayment, PaymentRepositoryTrait, PaymentStatus};
use crate::players::PlayerRepositoryTrait;
use crate::refresh::{Collection, Mutation, RefreshSet};
use crate::teams::CatalogRepositoryTrait;
use crate::utils::{format_eur, parse_lenient_decimal, Clock};

const HISTORY_ONLY_NOTE: &str = "This contract appears in Contract History only.";

/// Collections a contract save touches, whether or not it succeeded.
pub fn contract_save_refresh() -> RefreshSet {
    RefreshSet::of([
        Collection::Players,
        Collection::TeamDeals,
        Collection::Contracts,
        Collection::Payments,
    ])
}

/// The contract manager: opens the contract form and saves it with its cascade.
pub struct ContractService {
    contracts: Arc<dyn ContractRepositoryTrait>,
    players: Arc<dyn PlayerRepositoryTrait>,
    payments: Arc<dyn PaymentRepositoryTrait>,
    catalog: Arc<dyn CatalogRepositoryTrait>,
    clock: Clock,
}

impl ContractService {
    pub fn new(
        contracts: Arc<dyn ContractRepositoryTrait>,
        players: Arc<dyn PlayerRepositoryTrait>,
        payments: Arc<dyn PaymentRepositoryTrait>,
        catalog: Arc<dyn CatalogRepositoryTrait>,
    ) -> Self {
        Self {
            contracts,
            players,
            payments,
            catalog,
            clock: Clock::System,
        }
    }

    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    /// The active contract, with the backend's "no rows" answer read as none.
    async fn find_active(&self, player_id: &str) -> Result<Option<Contract>> {
        match self.contracts.get_active_for_player(player_id).await {
            Ok(contract) => Ok(Some(contract)),
            Err(err) if err.is_not_found() => Ok(None),
            Err(err) => Err(err),
        }
    }

    /// Player status and payment writes that follow an active contract's creation.
    ///
    /// Each step is an independent call; failures are logged and reported but
    /// the contract row stays in place.
    async fn activate(&self, contract: &Contract) -> Vec<String> {
        let mut failures = Vec::new();

        if let Err(err) = self
            .players
            .mark_signed(&contract.player_id, &contract.id)
            .await
        {
            error!(
                "Contract {} saved but player {} was not marked signed: {}",
                contract.id, contract.player_id, err
            );
            failures.push(format!("Player status was not updated: {}", err));
        }

        let payment = NewPayment {
            contract_id: contract.id.clone(),
            amount: contract.commission(),
            due_date: contract.contract_end_date,
            status: PaymentStatus::Pending,
        };
        if let Err(err) = self.payments.create(payment).await {
            error!(
                "Contract {} saved but its commission payment was not created: {}",
                contract.id, err
            );
            failures.push(format!("Commission payment was not created: {}", err));
        }

        failures
    }

    fn save_message(created: bool, is_active: bool) -> String {
        let verb = if created { "created" } else { "updated" };
        if is_active {
            format!("Active contract {} successfully!", verb)
        } else {
            format!(
                "Historical contract {} successfully! {}",
                verb, HISTORY_ONLY_NOTE
            )
        }
    }
}

#[async_trait::async_trait]
impl ContractServiceTrait for ContractService {
    async fn open_draft(&self, ctx: &mut PageContext, player_id: &str) -> Result<ContractDraft> {
        let teams = self.catalog.list_teams().await?;
        let competitions = self.catalog.list_competitions().await?;
        let existing = self.find_active(player_id).await?;

        let (mode, team_id, competition_id) = match (&existing, &ctx.hand_off) {
            (Some(contract), _) => (
                ContractMode::Edit,
                Some(contract.team_id.clone()),
                Some(contract.competition_id.clone()),
            ),
            (None, Some(hand_off)) => (
                ContractMode::Create,
                Some(hand_off.team_id.clone()),
                hand_off.competition_id.clone(),
            ),
            (None, None) => (ContractMode::Create, None, None),
        };
        debug!("Opening contract form for player {} in {:?} mode", player_id, mode);

        ctx.open_contract = Some(OpenContract {
            player_id: player_id.to_string(),
            existing: existing.clone(),
        });

        Ok(ContractDraft {
            player_id: player_id.to_string(),
            mode,
            contract: existing,
            team_id,
            competition_id,
            team_deal_id: ctx.hand_off.as_ref().map(|h| h.deal_id.clone()),
            teams,
            competitions,
        })
    }

    fn commission_preview(
        &self,
        contract_value: &str,
        commission_percentage: &str,
    ) -> CommissionPreview {
        let amount = commission_amount(
            parse_lenient_decimal(contract_value),
            parse_lenient_decimal(commission_percentage),
        );
        CommissionPreview {
            amount,
            display: format_eur(amount, 2),
        }
    }

    fn suggest_retroactive(&self, end_date: NaiveDate, added_retroactively: bool) -> bool {
        suggest_retroactive(end_date, added_retroactively, self.clock.today())
    }

    async fn save(
        &self,
        ctx: &mut PageContext,
        player_id: &str,
        form: ContractForm,
    ) -> Result<Mutation<ContractSaveResult>> {
        form.validate()?;

        let is_active = is_contract_active(
            form.contract_end_date,
            form.added_retroactively,
            self.clock.today(),
        );
        let existing = match &ctx.open_contract {
            Some(open) if open.player_id == player_id => open.existing.clone(),
            _ => self.find_active(player_id).await?,
        };

        let row = NewContract {
            player_id: player_id.to_string(),
            team_id: form.team_id.trim().to_string(),
            competition_id: form.competition_id.trim().to_string(),
            contract_value: form.contract_value,
            commission_percentage: form.commission_percentage,
            contract_start_date: form.contract_start_date,
            contract_end_date: form.contract_end_date,
            notes: form.cleaned_notes(),
            is_active,
            added_retroactively: form.added_retroactively,
            team_deal_id: ctx.hand_off.as_ref().map(|h| h.deal_id.clone()),
        };

        let (contract, created, cascade_errors) = match existing {
            // Edits update the row only; status and payment are left as they are.
            Some(current) => {
                let contract = self.contracts.update(&current.id, row).await?;
                info!("Updated contract {} for player {}", contract.id, player_id);
                (contract, false, Vec::new())
            }
            None => {
                let contract = self.contracts.create(row).await?;
                info!(
                    "Created {} contract {} for player {}",
                    if is_active { "active" } else { "historical" },
                    contract.id,
                    player_id
                );
                let failures = if is_active {
                    self.activate(&contract).await
                } else {
                    Vec::new()
                };
                (contract, true, failures)
            }
        };

        ctx.hand_off = None;
        ctx.open_contract = None;

        Ok(Mutation::new(
            ContractSaveResult {
                message: Self::save_message(created, is_active),
                contract,
                created,
                is_active,
                cascade_errors,
            },
            contract_save_refresh(),
        ))
    }

    async fn contract_history(&self, player_id: &str) -> Result<Vec<Contract>> {
        let mut history: Vec<Contract> = self
            .contracts
            .list_for_player(player_id)
            .await?
            .into_iter()
            .filter(|contract| !contract.is_active)
            .collect();
        history.sort_by(|a, b| b.contract_end_date.cmp(&a.contract_end_date));
        Ok(history)
    }
}
