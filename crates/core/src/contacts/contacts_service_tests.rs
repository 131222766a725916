#[cfg(test)]
mod tests {
    use crate::contacts::*;
    use crate::memory::MemoryBackend;
    use std::sync::Arc;

    fn new_contact(name: &str, role: &str, phone: &str) -> NewContact {
        NewContact {
            name: name.to_string(),
            role: Some(role.to_string()),
            email: Some(format!("{}@club.it", name.to_lowercase().replace(' ', "."))),
            phone: Some(phone.to_string()),
            team_id: None,
            notes: Some("  ".to_string()),
        }
    }

    #[tokio::test]
    async fn test_create_and_filter_contacts() {
        let backend = MemoryBackend::new();
        let team = backend.add_team("Virtus Bologna", None, None);
        let service = ContactService::new(Arc::new(backend.clone()));

        let mut scout = new_contact("Anna Neri", "Scout", "+39 333 1234567");
        scout.team_id = Some(team.clone());
        let created = service.create_contact(scout).await.unwrap();
        assert_eq!(created.value.notes, None);
        assert_eq!(created.value.team_name.as_deref(), Some("Virtus Bologna"));
        service
            .create_contact(new_contact("Bruno Gialli", "Coach", "0511234"))
            .await
            .unwrap();

        let all = service.list_contacts(&ContactFilter::default()).await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].name, "Anna Neri");

        let by_email = ContactFilter {
            search: Some("BRUNO.GIALLI@".to_string()),
            ..ContactFilter::default()
        };
        assert_eq!(service.list_contacts(&by_email).await.unwrap().len(), 1);

        let by_phone = ContactFilter {
            search: Some("333 12".to_string()),
            ..ContactFilter::default()
        };
        assert_eq!(service.list_contacts(&by_phone).await.unwrap()[0].name, "Anna Neri");

        let by_team = ContactFilter {
            team_id: Some(team),
            role: Some("Scout".to_string()),
            ..ContactFilter::default()
        };
        assert_eq!(service.list_contacts(&by_team).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_contact_needs_name() {
        let backend = MemoryBackend::new();
        let service = ContactService::new(Arc::new(backend));
        assert!(service.create_contact(new_contact(" ", "Scout", "1")).await.is_err());
    }

    #[tokio::test]
    async fn test_player_synced_contacts_are_read_only() {
        let backend = MemoryBackend::new();
        backend.insert_contact(Contact {
            id: "synced".to_string(),
            name: "Marco Rossi".to_string(),
            role: Some("Player".to_string()),
            email: None,
            phone: None,
            team_id: None,
            player_id: Some("p1".to_string()),
            notes: None,
            team_name: None,
            player_name: None,
        });
        let service = ContactService::new(Arc::new(backend.clone()));

        let update = service
            .update_contact("synced", new_contact("Marco Rossi", "Player", "1"))
            .await;
        assert!(update.is_err());
        assert!(service.delete_contact("synced").await.is_err());
        assert_eq!(service.list_contacts(&ContactFilter::default()).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_update_and_delete_contact() {
        let backend = MemoryBackend::new();
        let service = ContactService::new(Arc::new(backend));
        let created = service
            .create_contact(new_contact("Anna Neri", "Scout", "1"))
            .await
            .unwrap()
            .value;

        let updated = service
            .update_contact(&created.id, new_contact("Anna Neri", "Director", "2"))
            .await
            .unwrap();
        assert_eq!(updated.value.role.as_deref(), Some("Director"));

        service.delete_contact(&created.id).await.unwrap();
        assert!(service
            .list_contacts(&ContactFilter::default())
            .await
            .unwrap()
            .is_empty());
    }
}
