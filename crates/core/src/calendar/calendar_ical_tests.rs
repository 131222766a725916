#[cfg(test)]
mod tests {
    use crate::calendar::*;
    use crate::reminders::Reminder;
    use chrono::{NaiveDate, TimeZone, Utc};
    use proptest::prelude::*;

    fn reminder(id: &str, title: &str, due: Option<NaiveDate>, description: Option<&str>) -> Reminder {
        Reminder {
            id: id.to_string(),
            title: title.to_string(),
            description: description.map(str::to_string),
            due_date: due,
            tag: None,
            completed: false,
            auto_generated: false,
            player_id: None,
            team_deal_id: None,
            contract_id: None,
            player_name: None,
            created_at: None,
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_generate_ical_header_and_event() {
        let now = Utc.with_ymd_and_hms(2024, 6, 1, 9, 30, 5).unwrap();
        let doc = generate_ical(
            &[reminder("r1", "Call coach", Some(date(2024, 6, 10)), Some("Re: contract"))],
            now,
        );

        assert!(doc.starts_with("BEGIN:VCALENDAR\r\nVERSION:2.0\r\n"));
        assert!(doc.contains("PRODID:-//AgentPlay//Agent Platform Calendar//IT\r\n"));
        assert!(doc.contains("X-WR-CALNAME:AgentPlay Reminders\r\n"));
        assert!(doc.contains("X-WR-TIMEZONE:Europe/Rome\r\n"));
        assert!(doc.contains("UID:r1@agentplay.app\r\n"));
        assert!(doc.contains("DTSTART;VALUE=DATE:20240610\r\n"));
        assert!(doc.contains("DTEND;VALUE=DATE:20240610\r\n"));
        assert!(doc.contains("DTSTAMP:20240601T093005Z\r\n"));
        assert!(doc.contains("SUMMARY:Call coach\r\n"));
        assert!(doc.contains("DESCRIPTION:Re: contract\r\n"));
        assert!(doc.ends_with("END:VCALENDAR\r\n"));
    }

    #[test]
    fn test_undated_reminders_are_skipped() {
        let now = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
        let doc = generate_ical(&[reminder("r1", "Someday", None, None)], now);
        assert!(!doc.contains("BEGIN:VEVENT"));
        assert!(parse_ical(&doc).unwrap().is_empty());
    }

    #[test]
    fn test_escape_text() {
        assert_eq!(escape_text("a;b,c\\d\ne"), "a\\;b\\,c\\\\d\\ne");
        assert_eq!(escape_text("one\r\ntwo"), "one\\ntwo");
        assert_eq!(unescape_text("a\\;b\\,c\\\\d\\ne\\Nf"), "a;b,c\\d\ne\nf");
    }

    #[test]
    fn test_long_lines_are_folded_at_char_boundaries() {
        let title = "è".repeat(100);
        let now = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
        let doc = generate_ical(&[reminder("r1", &title, Some(date(2024, 6, 2)), None)], now);

        for line in doc.split("\r\n") {
            assert!(line.len() <= 75, "line too long: {} octets", line.len());
        }
        let events = parse_ical(&doc).unwrap();
        assert_eq!(events[0].summary, title);
    }

    #[test]
    fn test_parse_reads_back_reminder_id() {
        let now = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
        let doc = generate_ical(&[reminder("abc-123", "Scout", Some(date(2024, 7, 1)), None)], now);
        let events = parse_ical(&doc).unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].reminder_id(), "abc-123");
        assert_eq!(events[0].start, date(2024, 7, 1));
        assert_eq!(events[0].end, Some(date(2024, 7, 1)));
        assert_eq!(events[0].description, None);
    }

    #[test]
    fn test_parse_rejects_bad_date() {
        let doc = "BEGIN:VCALENDAR\r\nBEGIN:VEVENT\r\nUID:x\r\nDTSTART;VALUE=DATE:2024-13-01\r\nEND:VEVENT\r\nEND:VCALENDAR\r\n";
        assert!(parse_ical(doc).is_err());
    }

    #[test]
    fn test_subscription_urls() {
        let sub = subscription("https://agency.example.com/", "tok en").unwrap();
        assert_eq!(
            sub.feed_url,
            "https://agency.example.com/api/v1/calendar/feed?token=tok%20en"
        );
        assert_eq!(
            sub.webcal_url,
            "webcal://agency.example.com/api/v1/calendar/feed?token=tok%20en"
        );
        assert_eq!(webcal_url("http://localhost:8080/x"), "webcal://localhost:8080/x");
        assert!(subscription("ftp://agency.example.com", "t").is_err());
        assert!(subscription("not a url", "t").is_err());
    }

    #[test]
    fn test_export_filename() {
        assert_eq!(export_filename(date(2024, 3, 9)), "agentplay-reminders-2024-03-09.ics");
    }

    proptest! {
        #[test]
        fn prop_round_trip_restores_text_and_date(
            title in "[a-zA-Z0-9 ,;:\\\\\nàé€ß]{1,160}",
            description in proptest::option::of("[a-zA-Z0-9 ,;:\\\\\nàé€]{1,200}"),
            day_offset in 0i64..3650,
        ) {
            let due = date(2020, 1, 1) + chrono::Duration::days(day_offset);
            let now = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
            let source = reminder("r-1", &title, Some(due), description.as_deref());

            let events = parse_ical(&generate_ical(&[source], now)).unwrap();

            prop_assert_eq!(events.len(), 1);
            prop_assert_eq!(&events[0].summary, &title);
            prop_assert_eq!(&events[0].description, &description);
            prop_assert_eq!(events[0].start, due);
        }
    }
}
