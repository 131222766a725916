#[cfg(test)]
mod tests {
    use crate::constants::Table;
    use crate::context::{DealHandOff, PageContext};
    use crate::contracts::*;
    use crate::memory::MemoryBackend;
    use crate::payments::PaymentStatus;
    use crate::players::{NewPlayer, PlayerDealStatus, PlayerRepositoryTrait};
    use crate::refresh::Collection;
    use crate::utils::Clock;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;
    use std::sync::Arc;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    struct Fixture {
        backend: MemoryBackend,
        service: ContractService,
        player_id: String,
        team_id: String,
        competition_id: String,
    }

    async fn fixture(today: NaiveDate) -> Fixture {
        let backend = MemoryBackend::new().with_clock(Clock::fixed_date(today));
        let competition_id = backend.add_competition("Serie A", Some("Italy"));
        let team_id = backend.add_team("Virtus Bologna", Some("Bologna"), Some(&competition_id));
        let player = PlayerRepositoryTrait::create(
            &backend,
            NewPlayer {
                first_name: "Marco".to_string(),
                last_name: "Rossi".to_string(),
                ..NewPlayer::default()
            },
        )
        .await
        .unwrap();

        let repo = Arc::new(backend.clone());
        let service = ContractService::new(repo.clone(), repo.clone(), repo.clone(), repo)
            .with_clock(Clock::fixed_date(today));

        Fixture {
            backend,
            service,
            player_id: player.id,
            team_id,
            competition_id,
        }
    }

    fn form(f: &Fixture, start: NaiveDate, end: NaiveDate) -> ContractForm {
        ContractForm {
            team_id: f.team_id.clone(),
            competition_id: f.competition_id.clone(),
            contract_value: dec!(100000),
            commission_percentage: dec!(10),
            contract_start_date: start,
            contract_end_date: end,
            notes: None,
            added_retroactively: false,
        }
    }

    fn player_status(f: &Fixture) -> PlayerDealStatus {
        f.backend
            .snapshot_players()
            .into_iter()
            .find(|p| p.id == f.player_id)
            .unwrap()
            .player_deal_status
    }

    #[tokio::test]
    async fn test_active_contract_creates_payment_and_signs_player() {
        let f = fixture(date(2024, 6, 1)).await;
        let mut ctx = PageContext::new("user-1");

        let saved = f
            .service
            .save(&mut ctx, &f.player_id, form(&f, date(2024, 1, 1), date(2024, 12, 31)))
            .await
            .unwrap();

        assert!(saved.value.is_active);
        assert!(saved.value.created);
        assert!(saved.value.cascade_errors.is_empty());
        assert_eq!(saved.value.message, "Active contract created successfully!");
        assert!(saved.refresh.contains(Collection::Payments));
        assert!(saved.refresh.contains(Collection::Players));

        let payments = f.backend.snapshot_payments();
        assert_eq!(payments.len(), 1);
        assert_eq!(payments[0].amount, dec!(10000));
        assert_eq!(payments[0].due_date, date(2024, 12, 31));
        assert_eq!(payments[0].status, PaymentStatus::Pending);
        assert_eq!(payments[0].contract_id, saved.value.contract.id);

        let player = f
            .backend
            .snapshot_players()
            .into_iter()
            .find(|p| p.id == f.player_id)
            .unwrap();
        assert_eq!(player.player_deal_status, PlayerDealStatus::Signed);
        assert_eq!(player.current_contract_id.as_deref(), Some(saved.value.contract.id.as_str()));
        assert_eq!(
            player.current_contract.unwrap().team_name.as_deref(),
            Some("Virtus Bologna")
        );
    }

    #[tokio::test]
    async fn test_expired_contract_is_historical() {
        let f = fixture(date(2024, 6, 1)).await;
        let mut ctx = PageContext::new("user-1");

        let saved = f
            .service
            .save(&mut ctx, &f.player_id, form(&f, date(2023, 1, 1), date(2023, 12, 31)))
            .await
            .unwrap();

        assert!(!saved.value.is_active);
        assert!(saved.value.message.starts_with("Historical contract created successfully!"));
        assert!(saved.value.message.contains("Contract History only"));
        assert!(f.backend.snapshot_payments().is_empty());
        assert_eq!(player_status(&f), PlayerDealStatus::FreeAgent);

        let history = f.service.contract_history(&f.player_id).await.unwrap();
        assert_eq!(history.len(), 1);
    }

    #[tokio::test]
    async fn test_retroactive_future_contract_is_historical() {
        let f = fixture(date(2024, 6, 1)).await;
        let mut ctx = PageContext::new("user-1");
        let mut retro = form(&f, date(2024, 1, 1), date(2025, 6, 30));
        retro.added_retroactively = true;

        let saved = f.service.save(&mut ctx, &f.player_id, retro).await.unwrap();

        assert!(!saved.value.is_active);
        assert!(f.backend.snapshot_payments().is_empty());
    }

    #[tokio::test]
    async fn test_invalid_dates_write_nothing() {
        let f = fixture(date(2024, 6, 1)).await;
        let mut ctx = PageContext::new("user-1");

        let result = f
            .service
            .save(&mut ctx, &f.player_id, form(&f, date(2024, 6, 1), date(2024, 6, 1)))
            .await;

        assert!(result.is_err());
        assert!(f.backend.snapshot_contracts().is_empty());
        assert!(f.backend.snapshot_payments().is_empty());
    }

    #[tokio::test]
    async fn test_editing_active_contract_skips_cascade() {
        let f = fixture(date(2024, 6, 1)).await;
        let mut ctx = PageContext::new("user-1");
        f.service
            .save(&mut ctx, &f.player_id, form(&f, date(2024, 1, 1), date(2024, 12, 31)))
            .await
            .unwrap();

        let draft = f.service.open_draft(&mut ctx, &f.player_id).await.unwrap();
        assert_eq!(draft.mode, ContractMode::Edit);
        assert_eq!(draft.team_id.as_deref(), Some(f.team_id.as_str()));

        let mut changed = form(&f, date(2024, 1, 1), date(2025, 12, 31));
        changed.contract_value = dec!(200000);
        let saved = f.service.save(&mut ctx, &f.player_id, changed).await.unwrap();

        assert!(!saved.value.created);
        assert_eq!(saved.value.message, "Active contract updated successfully!");
        assert_eq!(saved.value.contract.contract_value, dec!(200000));
        assert_eq!(f.backend.snapshot_contracts().len(), 1);

        let payments = f.backend.snapshot_payments();
        assert_eq!(payments.len(), 1);
        assert_eq!(payments[0].amount, dec!(10000));
        assert!(ctx.open_contract.is_none());
    }

    #[tokio::test]
    async fn test_payment_failure_keeps_contract_and_reports() {
        let f = fixture(date(2024, 6, 1)).await;
        f.backend.fail_table(Table::Payments);
        let mut ctx = PageContext::new("user-1");

        let saved = f
            .service
            .save(&mut ctx, &f.player_id, form(&f, date(2024, 1, 1), date(2024, 12, 31)))
            .await
            .unwrap();

        assert!(saved.value.is_active);
        assert_eq!(saved.value.cascade_errors.len(), 1);
        assert_eq!(f.backend.snapshot_contracts().len(), 1);
        assert_eq!(player_status(&f), PlayerDealStatus::Signed);
    }

    #[tokio::test]
    async fn test_hand_off_preselects_team_and_links_deal() {
        let f = fixture(date(2024, 6, 1)).await;
        let mut ctx = PageContext::new("user-1");
        ctx.hand_off = Some(DealHandOff {
            deal_id: "deal-9".to_string(),
            team_id: f.team_id.clone(),
            team_name: "Virtus Bologna".to_string(),
            competition_id: Some(f.competition_id.clone()),
        });

        let draft = f.service.open_draft(&mut ctx, &f.player_id).await.unwrap();
        assert_eq!(draft.mode, ContractMode::Create);
        assert_eq!(draft.team_id.as_deref(), Some(f.team_id.as_str()));
        assert_eq!(draft.competition_id.as_deref(), Some(f.competition_id.as_str()));
        assert_eq!(draft.team_deal_id.as_deref(), Some("deal-9"));
        assert_eq!(draft.teams.len(), 1);

        let saved = f
            .service
            .save(&mut ctx, &f.player_id, form(&f, date(2024, 1, 1), date(2024, 12, 31)))
            .await
            .unwrap();
        assert_eq!(saved.value.contract.team_deal_id.as_deref(), Some("deal-9"));
        assert!(ctx.hand_off.is_none());
    }

    #[test]
    fn test_commission_preview_is_lenient() {
        let backend = MemoryBackend::new();
        let repo = Arc::new(backend);
        let service = ContractService::new(repo.clone(), repo.clone(), repo.clone(), repo);

        let preview = service.commission_preview("100000", "10");
        assert_eq!(preview.amount, dec!(10000));
        assert_eq!(preview.display, "€10.000,00");

        let empty = service.commission_preview("abc", "");
        assert_eq!(empty.display, "€0,00");
    }
}
