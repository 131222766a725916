use async_trait::async_trait;
use chrono::NaiveDate;

use super::contracts_model::{
    CommissionPreview, Contract, ContractDraft, ContractForm, ContractSaveResult, NewContract,
};
use crate::context::PageContext;
use crate::errors::Result;
use crate::refresh::Mutation;

#[async_trait]
pub trait ContractRepositoryTrait: Send + Sync {
    /// The player's active contract. Fails with `NotFound` when there is none.
    async fn get_active_for_player(&self, player_id: &str) -> Result<Contract>;

    /// All contracts of a player, latest end date first.
    async fn list_for_player(&self, player_id: &str) -> Result<Vec<Contract>>;

    async fn create(&self, new_contract: NewContract) -> Result<Contract>;

    async fn update(&self, contract_id: &str, changes: NewContract) -> Result<Contract>;
}

/// The contract manager workflow.
#[async_trait]
pub trait ContractServiceTrait: Send + Sync {
    /// Loads the form for a player, in edit mode when an active contract exists.
    async fn open_draft(&self, ctx: &mut PageContext, player_id: &str) -> Result<ContractDraft>;

    fn commission_preview(&self, contract_value: &str, commission_percentage: &str)
        -> CommissionPreview;

    fn suggest_retroactive(&self, end_date: NaiveDate, added_retroactively: bool) -> bool;

    /// Validates and saves the form, running the activation cascade on creation.
    async fn save(
        &self,
        ctx: &mut PageContext,
        player_id: &str,
        form: ContractForm,
    ) -> Result<Mutation<ContractSaveResult>>;

    /// Inactive contracts of a player.
    async fn contract_history(&self, player_id: &str) -> Result<Vec<Contract>>;
}
