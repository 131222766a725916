//! Contract domain models and the rules that classify a contract at save time.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::ValidationError;
use crate::teams::{Competition, Team};
use crate::Result;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contract {
    pub id: String,
    pub player_id: String,
    pub team_id: String,
    pub competition_id: String,
    pub contract_value: Decimal,
    pub commission_percentage: Decimal,
    pub contract_start_date: NaiveDate,
    pub contract_end_date: NaiveDate,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub added_retroactively: bool,
    #[serde(default)]
    pub team_deal_id: Option<String>,
    #[serde(default)]
    pub team_name: Option<String>,
    #[serde(default)]
    pub competition_name: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Contract {
    pub fn commission(&self) -> Decimal {
        commission_amount(self.contract_value, self.commission_percentage)
    }
}

/// Row written on create and on edit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewContract {
    pub player_id: String,
    pub team_id: String,
    pub competition_id: String,
    pub contract_value: Decimal,
    pub commission_percentage: Decimal,
    pub contract_start_date: NaiveDate,
    pub contract_end_date: NaiveDate,
    pub notes: Option<String>,
    pub is_active: bool,
    pub added_retroactively: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team_deal_id: Option<String>,
}

/// Contract form as submitted by the user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContractForm {
    pub team_id: String,
    pub competition_id: String,
    pub contract_value: Decimal,
    pub commission_percentage: Decimal,
    pub contract_start_date: NaiveDate,
    pub contract_end_date: NaiveDate,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub added_retroactively: bool,
}

impl ContractForm {
    /// Rejects the form before anything is written.
    pub fn validate(&self) -> Result<()> {
        if self.team_id.trim().is_empty() {
            return Err(ValidationError::MissingField("team_id".to_string()).into());
        }
        if self.competition_id.trim().is_empty() {
            return Err(ValidationError::MissingField("competition_id".to_string()).into());
        }
        if self.contract_value.is_sign_negative() {
            return Err(ValidationError::InvalidInput(
                "Contract value cannot be negative".to_string(),
            )
            .into());
        }
        if self.commission_percentage < Decimal::ZERO
            || self.commission_percentage > Decimal::ONE_HUNDRED
        {
            return Err(ValidationError::InvalidInput(
                "Commission percentage must be between 0 and 100".to_string(),
            )
            .into());
        }
        if self.contract_end_date <= self.contract_start_date {
            return Err(ValidationError::InvalidInput(
                "End date must be after start date!".to_string(),
            )
            .into());
        }
        Ok(())
    }

    pub fn cleaned_notes(&self) -> Option<String> {
        crate::players::clean_optional(self.notes.clone())
    }
}

/// A contract counts as active only if it has not ended and was not entered retroactively.
pub fn is_contract_active(end_date: NaiveDate, added_retroactively: bool, today: NaiveDate) -> bool {
    end_date >= today && !added_retroactively
}

pub fn commission_amount(contract_value: Decimal, commission_percentage: Decimal) -> Decimal {
    contract_value * commission_percentage / Decimal::ONE_HUNDRED
}

/// Advisory only: the form offers to tick the retroactive flag for past end dates.
pub fn suggest_retroactive(end_date: NaiveDate, added_retroactively: bool, today: NaiveDate) -> bool {
    end_date < today && !added_retroactively
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContractMode {
    Create,
    Edit,
}

/// Everything the contract form needs when it opens.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContractDraft {
    pub player_id: String,
    pub mode: ContractMode,
    /// The active contract being edited.
    pub contract: Option<Contract>,
    /// Prefilled from the signed deal in create mode.
    pub team_id: Option<String>,
    pub competition_id: Option<String>,
    pub team_deal_id: Option<String>,
    pub teams: Vec<Team>,
    pub competitions: Vec<Competition>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommissionPreview {
    pub amount: Decimal,
    pub display: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContractSaveResult {
    pub contract: Contract,
    pub created: bool,
    pub is_active: bool,
    pub message: String,
    /// Failed follow-up writes (player status, payment). Never rolled back.
    pub cascade_errors: Vec<String>,
}
