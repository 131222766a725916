//! Display helpers shared by the view builders.

use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};

use super::time_utils::days_between;

/// Formats an amount as euros with Italian grouping, e.g. `€10.000,00`.
pub fn format_eur(amount: Decimal, decimals: u32) -> String {
    let rounded = amount.round_dp_with_strategy(decimals, RoundingStrategy::MidpointAwayFromZero);
    let negative = rounded.is_sign_negative() && !rounded.is_zero();
    let plain = format!("{:.*}", decimals as usize, rounded.abs());
    let (int_part, frac_part) = match plain.split_once('.') {
        Some((i, f)) => (i.to_string(), Some(f.to_string())),
        None => (plain, None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (idx, ch) in int_part.chars().enumerate() {
        if idx > 0 && (int_part.len() - idx) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }

    let mut out = String::new();
    if negative {
        out.push('-');
    }
    out.push('€');
    out.push_str(&grouped);
    if let Some(frac) = frac_part {
        out.push(',');
        out.push_str(&frac);
    }
    out
}

/// Parses the leading numeric part of a form field; anything unparseable is zero.
pub fn parse_lenient_decimal(input: &str) -> Decimal {
    let trimmed = input.trim();
    let mut end = 0;
    let mut seen_dot = false;
    for (idx, ch) in trimmed.char_indices() {
        let accepted = ch.is_ascii_digit()
            || (idx == 0 && (ch == '-' || ch == '+'))
            || (ch == '.' && !seen_dot);
        if !accepted {
            break;
        }
        if ch == '.' {
            seen_dot = true;
        }
        end = idx + ch.len_utf8();
    }
    trimmed[..end]
        .trim_end_matches('.')
        .parse::<Decimal>()
        .unwrap_or(Decimal::ZERO)
}

/// "Today", "1 day ago" or "N days ago".
pub fn days_ago_label(date: NaiveDate, today: NaiveDate) -> String {
    match days_between(date, today) {
        d if d <= 0 => "Today".to_string(),
        1 => "1 day ago".to_string(),
        d => format!("{} days ago", d),
    }
}

/// First `max_chars` characters of `text`, with an ellipsis when cut.
pub fn preview(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let cut: String = text.chars().take(max_chars).collect();
    format!("{}...", cut)
}

/// Upper-case initials from first and last name.
pub fn initials(first_name: &str, last_name: &str) -> String {
    first_name
        .chars()
        .next()
        .into_iter()
        .chain(last_name.chars().next())
        .flat_map(char::to_uppercase)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn formats_italian_grouping() {
        assert_eq!(format_eur(dec!(10000), 2), "€10.000,00");
        assert_eq!(format_eur(dec!(1234567.891), 2), "€1.234.567,89");
        assert_eq!(format_eur(dec!(999.5), 0), "€1.000");
        assert_eq!(format_eur(dec!(0), 2), "€0,00");
        assert_eq!(format_eur(dec!(-1500.25), 2), "-€1.500,25");
    }

    #[test]
    fn lenient_parse_behaves_like_a_form_field() {
        assert_eq!(parse_lenient_decimal("100000"), dec!(100000));
        assert_eq!(parse_lenient_decimal(" 12.5% "), dec!(12.5));
        assert_eq!(parse_lenient_decimal("abc"), Decimal::ZERO);
        assert_eq!(parse_lenient_decimal(""), Decimal::ZERO);
        assert_eq!(parse_lenient_decimal("7."), dec!(7));
    }

    #[test]
    fn days_ago_labels() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 10).unwrap();
        assert_eq!(days_ago_label(today, today), "Today");
        assert_eq!(days_ago_label(today.pred_opt().unwrap(), today), "1 day ago");
        assert_eq!(
            days_ago_label(NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(), today),
            "9 days ago"
        );
    }

    #[test]
    fn preview_cuts_on_characters() {
        assert_eq!(preview("short", 50), "short");
        assert_eq!(preview("àèìòù-àèìòù", 5), "àèìòù...");
    }

    #[test]
    fn initials_are_uppercased() {
        assert_eq!(initials("marco", "belinelli"), "MB");
        assert_eq!(initials("", "Rossi"), "R");
    }
}
