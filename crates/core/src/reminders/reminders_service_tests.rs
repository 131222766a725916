#[cfg(test)]
mod tests {
    use crate::memory::MemoryBackend;
    use crate::refresh::Collection;
    use crate::reminders::*;
    use crate::utils::Clock;
    use chrono::NaiveDate;
    use std::sync::Arc;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn service(backend: &MemoryBackend) -> ReminderService {
        ReminderService::new(Arc::new(backend.clone()))
            .with_clock(Clock::fixed_date(date(2024, 2, 14)))
    }

    fn new_reminder(title: &str, due: Option<NaiveDate>) -> NewReminder {
        NewReminder {
            title: title.to_string(),
            due_date: due,
            ..NewReminder::default()
        }
    }

    #[tokio::test]
    async fn test_create_requires_title_and_cleans_fields() {
        let backend = MemoryBackend::new();
        let service = service(&backend);

        assert!(service.create_reminder(new_reminder("  ", None)).await.is_err());

        let created = service
            .create_reminder(NewReminder {
                title: " Call agent ".to_string(),
                description: Some(" ".to_string()),
                ..NewReminder::default()
            })
            .await
            .unwrap();
        assert_eq!(created.value.title, "Call agent");
        assert_eq!(created.value.description, None);
        assert!(!created.value.completed);
        assert!(created.refresh.contains(Collection::DealReminders));
    }

    #[tokio::test]
    async fn test_month_grid_caps_chips_per_day() {
        let backend = MemoryBackend::new();
        let service = service(&backend);
        for n in 0..5 {
            service
                .create_reminder(new_reminder(&format!("R{}", n), Some(date(2024, 2, 20))))
                .await
                .unwrap();
        }

        let grid = service.month(2024, 2).await.unwrap();

        assert_eq!(grid.label, "February 2024");
        assert_eq!(grid.days.len(), 29);
        // 1 February 2024 is a Thursday.
        assert_eq!(grid.leading_blanks, 3);
        let day = &grid.days[19];
        assert_eq!(day.reminders.len(), 3);
        assert_eq!(day.more, 2);
        assert!(grid.days[13].is_today);

        assert!(service.month(2024, 13).await.is_err());
    }

    #[tokio::test]
    async fn test_upcoming_skips_past_and_completed() {
        let backend = MemoryBackend::new();
        let service = service(&backend);
        service.create_reminder(new_reminder("Past", Some(date(2024, 2, 1)))).await.unwrap();
        service.create_reminder(new_reminder("Undated", None)).await.unwrap();
        let done = service
            .create_reminder(new_reminder("Done", Some(date(2024, 2, 15))))
            .await
            .unwrap();
        service.set_completed(&done.value.id, true).await.unwrap();
        service.create_reminder(new_reminder("Later", Some(date(2024, 2, 20)))).await.unwrap();
        service.create_reminder(new_reminder("Today", Some(date(2024, 2, 14)))).await.unwrap();

        let upcoming = service.upcoming().await.unwrap();

        let titles: Vec<&str> = upcoming.iter().map(|u| u.reminder.title.as_str()).collect();
        assert_eq!(titles, vec!["Today", "Later"]);
        assert_eq!(upcoming[0].due_label, "Due today");
        assert_eq!(upcoming[1].due_label, "Due in 6 days");
    }

    #[tokio::test]
    async fn test_delete_reminder() {
        let backend = MemoryBackend::new();
        let service = service(&backend);
        let created = service.create_reminder(new_reminder("Gone", None)).await.unwrap();

        service.delete_reminder(&created.value.id).await.unwrap();

        assert!(service.list_reminders().await.unwrap().is_empty());
    }

    #[test]
    fn test_due_labels() {
        let today = date(2024, 2, 14);
        assert_eq!(due_label(date(2024, 2, 11), today), "Overdue 3 days");
        assert_eq!(due_label(date(2024, 2, 15), today), "Due tomorrow");
    }
}
