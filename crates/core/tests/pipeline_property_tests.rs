//! Property-based integration tests for the deal pipeline and payments.
//!
//! Universal properties of the boards, the transition rules and the payment
//! summaries, checked over random inputs with `proptest`.

use agentplay_core::deals::{
    build_player_board, deal_stage_effect, player_status_effect, DealStage, TransitionEffect,
};
use agentplay_core::payments::{payment_stats, payment_years, Payment, PaymentStatus};
use agentplay_core::players::{Player, PlayerDealStatus};
use chrono::{Datelike, NaiveDate};
use proptest::prelude::*;
use rust_decimal::Decimal;

// =============================================================================
// Generators
// =============================================================================

fn arb_player_status() -> impl Strategy<Value = PlayerDealStatus> {
    prop_oneof![
        Just(PlayerDealStatus::FreeAgent),
        Just(PlayerDealStatus::InNegotiation),
        Just(PlayerDealStatus::Signed),
    ]
}

fn arb_deal_stage() -> impl Strategy<Value = DealStage> {
    prop_oneof![
        Just(DealStage::Ongoing),
        Just(DealStage::Sent),
        Just(DealStage::Signed),
        Just(DealStage::NotSigned),
    ]
}

fn arb_date() -> impl Strategy<Value = NaiveDate> {
    (2018i32..2030, 1u32..=12, 1u32..=28)
        .prop_map(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d).unwrap())
}

fn arb_player() -> impl Strategy<Value = Player> {
    (
        "[a-f0-9]{8}",
        "[A-Z][a-z]{2,10}",
        "[A-Z][a-z]{2,10}",
        proptest::option::of("(Guard|Forward|Center)"),
        arb_player_status(),
    )
        .prop_map(|(id, first_name, last_name, position, status)| Player {
            id,
            first_name,
            last_name,
            date_of_birth: None,
            position,
            email: None,
            phone: None,
            player_deal_status: status,
            current_contract_id: None,
            current_contract: None,
            team_deals: Vec::new(),
            created_at: None,
        })
}

fn arb_payment() -> impl Strategy<Value = Payment> {
    (
        "[a-f0-9]{8}",
        0i64..10_000_000,
        arb_date(),
        proptest::option::of(arb_date()),
        prop_oneof![
            Just(PaymentStatus::Pending),
            Just(PaymentStatus::Paid),
            Just(PaymentStatus::Overdue),
        ],
    )
        .prop_map(|(id, cents, due_date, paid_date, status)| Payment {
            id,
            contract_id: "contract".to_string(),
            amount: Decimal::new(cents, 2),
            due_date,
            paid_date,
            status,
            player_name: None,
            team_name: None,
            contract_value: None,
            commission_percentage: None,
        })
}

// =============================================================================
// Property Tests
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Every player lands in exactly one column, the one matching its status,
    /// and columns keep the board order.
    #[test]
    fn prop_player_board_partitions_players(
        players in proptest::collection::vec(arb_player(), 0..30),
        today in arb_date(),
    ) {
        let players: Vec<Player> = players
            .into_iter()
            .enumerate()
            .map(|(i, player)| Player { id: format!("player-{}", i), ..player })
            .collect();
        let board = build_player_board(&players, today);

        let statuses: Vec<PlayerDealStatus> = board.columns.iter().map(|c| c.status).collect();
        prop_assert_eq!(statuses, PlayerDealStatus::ALL.to_vec());

        let total: usize = board.columns.iter().map(|c| c.count).sum();
        prop_assert_eq!(total, players.len());

        for column in &board.columns {
            prop_assert_eq!(column.count, column.cards.len());
            prop_assert_eq!(column.placeholder.is_some(), column.cards.is_empty());
            for card in &column.cards {
                let player = players.iter().find(|p| p.id == card.player_id).unwrap();
                prop_assert_eq!(player.player_deal_status, column.status);
            }
        }
    }

    /// Signed and not-signed deals are final; dropping a card on its own
    /// column does nothing; signing always opens the contract form.
    #[test]
    fn prop_deal_stage_rules(from in arb_deal_stage(), to in arb_deal_stage()) {
        let effect = deal_stage_effect(from, to);
        if from == to {
            prop_assert_eq!(effect.unwrap(), TransitionEffect::NoOp);
        } else if from.is_terminal() {
            prop_assert!(effect.is_err());
        } else if to == DealStage::Signed {
            prop_assert_eq!(effect.unwrap(), TransitionEffect::PersistStageAndOpenContract);
        } else {
            prop_assert_eq!(effect.unwrap(), TransitionEffect::PersistStage);
        }
    }

    /// Any player status may move to any other.
    #[test]
    fn prop_player_status_moves_are_free(from in arb_player_status(), to in arb_player_status()) {
        let expected = if from == to {
            TransitionEffect::NoOp
        } else {
            TransitionEffect::PersistStatus
        };
        prop_assert_eq!(player_status_effect(from, to).unwrap(), expected);
    }

    /// The pending total only counts pending payments and the year list is
    /// strictly descending.
    #[test]
    fn prop_payment_summaries(
        payments in proptest::collection::vec(arb_payment(), 0..25),
        year in 2018i32..2030,
    ) {
        let stats = payment_stats(&payments, year);
        let pending: Decimal = payments
            .iter()
            .filter(|p| p.status == PaymentStatus::Pending)
            .map(|p| p.amount)
            .sum();
        prop_assert_eq!(stats.pending_total, pending);
        prop_assert_eq!(stats.count, payments.len());

        let years = payment_years(&payments);
        prop_assert!(years.windows(2).all(|w| w[0] > w[1]));
        for payment in &payments {
            prop_assert!(years.contains(&payment.due_date.year()));
        }
    }
}
