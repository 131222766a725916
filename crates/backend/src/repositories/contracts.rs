use async_trait::async_trait;
use chrono::NaiveDate;
use serde_json::json;

use agentplay_core::constants::Table;
use agentplay_core::contracts::{Contract, ContractRepositoryTrait, NewContract};
use agentplay_core::errors::Result;
use agentplay_core::payments::{NewPayment, Payment, PaymentRepositoryTrait, PaymentStatus};

use super::RemoteRepository;
use crate::query::Query;
use crate::rows::{into_models, ContractRow, PaymentRow, CONTRACT_SELECT, PAYMENT_SELECT};

#[async_trait]
impl ContractRepositoryTrait for RemoteRepository {
    async fn get_active_for_player(&self, player_id: &str) -> Result<Contract> {
        let query = Query::new()
            .select(CONTRACT_SELECT)
            .eq("player_id", player_id)
            .eq("is_active", true)
            .order("created_at", false)
            .limit(1);
        let row: ContractRow = self.rest.select_single(Table::Contracts, &query).await?;
        Ok(row.into())
    }

    async fn list_for_player(&self, player_id: &str) -> Result<Vec<Contract>> {
        let query = Query::new()
            .select(CONTRACT_SELECT)
            .eq("player_id", player_id)
            .order("contract_end_date", false);
        let rows: Vec<ContractRow> = self.rest.select(Table::Contracts, &query).await?;
        Ok(into_models(rows))
    }

    async fn create(&self, new_contract: NewContract) -> Result<Contract> {
        let row: ContractRow = self
            .rest
            .insert(Table::Contracts, &new_contract, &Query::new().select(CONTRACT_SELECT))
            .await?;
        Ok(row.into())
    }

    async fn update(&self, contract_id: &str, changes: NewContract) -> Result<Contract> {
        let query = Query::new().select(CONTRACT_SELECT).eq("id", contract_id);
        let row: ContractRow = self.rest.update(Table::Contracts, &query, &changes).await?;
        Ok(row.into())
    }
}

#[async_trait]
impl PaymentRepositoryTrait for RemoteRepository {
    async fn list(&self) -> Result<Vec<Payment>> {
        let query = Query::new()
            .select(PAYMENT_SELECT)
            .order("due_date", false);
        let rows: Vec<PaymentRow> = self.rest.select(Table::Payments, &query).await?;
        Ok(into_models(rows))
    }

    async fn create(&self, new_payment: NewPayment) -> Result<Payment> {
        let row: PaymentRow = self
            .rest
            .insert(Table::Payments, &new_payment, &Query::new().select(PAYMENT_SELECT))
            .await?;
        Ok(row.into())
    }

    async fn mark_paid(&self, payment_id: &str, paid_date: NaiveDate) -> Result<Payment> {
        let query = Query::new().select(PAYMENT_SELECT).eq("id", payment_id);
        let body = json!({ "status": PaymentStatus::Paid, "paid_date": paid_date });
        let row: PaymentRow = self.rest.update(Table::Payments, &query, &body).await?;
        Ok(row.into())
    }
}
