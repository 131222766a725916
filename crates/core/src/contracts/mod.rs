//! Contracts module - the contract manager and its activation cascade.

mod contracts_model;
mod contracts_service;
mod contracts_traits;

#[cfg(test)]
mod contracts_service_tests;

pub use contracts_model::{
    commission_amount, is_contract_active, suggest_retroactive, CommissionPreview, Contract,
    ContractDraft, ContractForm, ContractMode, ContractSaveResult, NewContract,
};
pub use contracts_service::{contract_save_refresh, ContractService};
pub use contracts_traits::{ContractRepositoryTrait, ContractServiceTrait};
