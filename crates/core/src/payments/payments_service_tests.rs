#[cfg(test)]
mod tests {
    use crate::contracts::{ContractRepositoryTrait, NewContract};
    use crate::memory::MemoryBackend;
    use crate::payments::*;
    use crate::players::{NewPlayer, PlayerRepositoryTrait};
    use crate::utils::Clock;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use std::sync::Arc;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    async fn seeded() -> (MemoryBackend, PaymentService, Vec<Payment>) {
        let backend = MemoryBackend::new();
        let team = backend.add_team("Virtus Bologna", None, None);
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
        let contract = ContractRepositoryTrait::create(
            &backend,
            NewContract {
                player_id: player.id,
                team_id: team,
                competition_id: "c1".to_string(),
                contract_value: dec!(200000),
                commission_percentage: dec!(5),
                contract_start_date: date(2023, 1, 1),
                contract_end_date: date(2025, 6, 30),
                notes: None,
                is_active: true,
                added_retroactively: false,
                team_deal_id: None,
            },
        )
        .await
        .unwrap();

        let mut payments = Vec::new();
        for (amount, due) in [
            (dec!(10000), date(2024, 6, 30)),
            (dec!(2500), date(2025, 6, 30)),
            (dec!(1234.5), date(2023, 12, 31)),
        ] {
            let payment = PaymentRepositoryTrait::create(
                &backend,
                NewPayment {
                    contract_id: contract.id.clone(),
                    amount,
                    due_date: due,
                    status: PaymentStatus::Pending,
                },
            )
            .await
            .unwrap();
            payments.push(payment);
        }

        let service = PaymentService::new(Arc::new(backend.clone()))
            .with_clock(Clock::fixed_date(date(2024, 9, 15)));
        (backend, service, payments)
    }

    #[tokio::test]
    async fn test_list_joins_contract_and_filters() {
        let (_backend, service, _) = seeded().await;

        let all = service.list_payments(&PaymentFilter::default()).await.unwrap();
        assert_eq!(all.len(), 3);
        assert_eq!(all[0].due_date, date(2025, 6, 30));
        assert_eq!(all[0].player_name.as_deref(), Some("Marco Rossi"));
        assert_eq!(all[0].team_name.as_deref(), Some("Virtus Bologna"));
        assert_eq!(all[0].commission_percentage, Some(dec!(5)));

        let in_2024 = service
            .list_payments(&PaymentFilter {
                year: Some(2024),
                ..PaymentFilter::default()
            })
            .await
            .unwrap();
        assert_eq!(in_2024.len(), 1);
    }

    #[tokio::test]
    async fn test_mark_as_paid_updates_stats() {
        let (_backend, service, payments) = seeded().await;

        let before = service.stats().await.unwrap();
        assert_eq!(before.year, 2024);
        assert_eq!(before.paid_this_year, Decimal::ZERO);
        assert_eq!(before.pending_total, dec!(13734.5));
        assert_eq!(before.pending_total_display, "€13.735");

        let paid = service.mark_as_paid(&payments[0].id).await.unwrap();
        assert_eq!(paid.value.status, PaymentStatus::Paid);
        assert_eq!(paid.value.paid_date, Some(date(2024, 9, 15)));

        let after = service.stats().await.unwrap();
        assert_eq!(after.paid_this_year, dec!(10000));
        assert_eq!(after.paid_this_year_display, "€10.000");
        assert_eq!(after.pending_total, dec!(3734.5));
        assert_eq!(after.count, 3);

        let paid_only = service
            .list_payments(&PaymentFilter {
                status: Some(PaymentStatus::Paid),
                ..PaymentFilter::default()
            })
            .await
            .unwrap();
        assert_eq!(paid_only.len(), 1);
    }

    #[tokio::test]
    async fn test_available_years_newest_first() {
        let (_backend, service, _) = seeded().await;
        assert_eq!(service.available_years().await.unwrap(), vec![2025, 2024, 2023]);
    }

    #[test]
    fn test_legacy_received_status_reads_as_paid() {
        let status: PaymentStatus = serde_json::from_str("\"received\"").unwrap();
        assert_eq!(status, PaymentStatus::Paid);
        assert_eq!(status.label(), "Paid");
    }
}
