//! Transition table for the two pipeline state machines.
//!
//! Board gestures are translated into [`TransitionCommand`]s; this table
//! decides whether a move is allowed and what it triggers.

use serde::{Deserialize, Serialize};

use super::deals_model::DealStage;
use crate::errors::ValidationError;
use crate::players::PlayerDealStatus;
use crate::Result;

/// A card dropped on another column.
///
/// `from` is the column the client dragged from. The move is decided from the
/// stored status or stage, so a stale `from` is ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TransitionCommand {
    PlayerStatus {
        player_id: String,
        from: PlayerDealStatus,
        to: PlayerDealStatus,
    },
    DealStage {
        deal_id: String,
        from: DealStage,
        to: DealStage,
    },
}

/// What an allowed transition does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransitionEffect {
    /// Source and target are the same column.
    NoOp,
    PersistStatus,
    PersistStage,
    /// Persist the stage, then hand the deal over to the contract manager.
    PersistStageAndOpenContract,
}

const DEAL_STAGE_ARCS: &[(DealStage, DealStage)] = &[
    (DealStage::Ongoing, DealStage::Sent),
    (DealStage::Ongoing, DealStage::Signed),
    (DealStage::Ongoing, DealStage::NotSigned),
    (DealStage::Sent, DealStage::Ongoing),
    (DealStage::Sent, DealStage::Signed),
    (DealStage::Sent, DealStage::NotSigned),
];

/// Every arc between the three player statuses is allowed.
pub fn player_status_effect(
    from: PlayerDealStatus,
    to: PlayerDealStatus,
) -> Result<TransitionEffect> {
    if from == to {
        return Ok(TransitionEffect::NoOp);
    }
    Ok(TransitionEffect::PersistStatus)
}

pub fn deal_stage_effect(from: DealStage, to: DealStage) -> Result<TransitionEffect> {
    if from == to {
        return Ok(TransitionEffect::NoOp);
    }
    if !DEAL_STAGE_ARCS.contains(&(from, to)) {
        return Err(ValidationError::InvalidInput(format!(
            "A deal cannot move from '{}' to '{}'",
            from.label(),
            to.label()
        ))
        .into());
    }
    if to == DealStage::Signed {
        Ok(TransitionEffect::PersistStageAndOpenContract)
    } else {
        Ok(TransitionEffect::PersistStage)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signing_a_deal_opens_the_contract_manager() {
        assert_eq!(
            deal_stage_effect(DealStage::Sent, DealStage::Signed).unwrap(),
            TransitionEffect::PersistStageAndOpenContract
        );
        assert_eq!(
            deal_stage_effect(DealStage::Ongoing, DealStage::Signed).unwrap(),
            TransitionEffect::PersistStageAndOpenContract
        );
    }

    #[test]
    fn terminal_stages_have_no_outgoing_arcs() {
        for stage in DealStage::ALL {
            assert!(deal_stage_effect(DealStage::Signed, stage).is_ok() == (stage == DealStage::Signed));
            assert!(
                deal_stage_effect(DealStage::NotSigned, stage).is_ok()
                    == (stage == DealStage::NotSigned)
            );
        }
    }

    #[test]
    fn non_signing_moves_only_persist() {
        assert_eq!(
            deal_stage_effect(DealStage::Ongoing, DealStage::Sent).unwrap(),
            TransitionEffect::PersistStage
        );
        assert_eq!(
            deal_stage_effect(DealStage::Sent, DealStage::NotSigned).unwrap(),
            TransitionEffect::PersistStage
        );
    }

    #[test]
    fn player_status_allows_every_arc() {
        for from in PlayerDealStatus::ALL {
            for to in PlayerDealStatus::ALL {
                let expected = if from == to {
                    TransitionEffect::NoOp
                } else {
                    TransitionEffect::PersistStatus
                };
                assert_eq!(player_status_effect(from, to).unwrap(), expected);
            }
        }
    }

    #[test]
    fn command_deserializes_from_tagged_json() {
        let json = r#"{"kind":"deal_stage","deal_id":"d1","from":"sent","to":"signed"}"#;
        let command: TransitionCommand = serde_json::from_str(json).unwrap();
        assert_eq!(
            command,
            TransitionCommand::DealStage {
                deal_id: "d1".to_string(),
                from: DealStage::Sent,
                to: DealStage::Signed,
            }
        );
    }
}
