//! Builder for REST table query strings (`select=`, filters, `order=`, `limit=`).

use std::fmt::Display;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    select: Option<String>,
    filters: Vec<(String, String)>,
    order: Vec<String>,
    limit: Option<usize>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    /// Column list, embedded joins included. Whitespace is dropped so selects
    /// can be written across several lines.
    pub fn select(mut self, columns: &str) -> Self {
        self.select = Some(columns.split_whitespace().collect());
        self
    }

    pub fn eq(mut self, column: &str, value: impl Display) -> Self {
        self.filters
            .push((column.to_string(), format!("eq.{}", value)));
        self
    }

    /// `column IN (values)`. Values are quoted so commas inside them survive.
    pub fn in_list(mut self, column: &str, values: &[String]) -> Self {
        let quoted: Vec<String> = values
            .iter()
            .map(|v| format!("\"{}\"", v.replace('"', "\\\"")))
            .collect();
        self.filters
            .push((column.to_string(), format!("in.({})", quoted.join(","))));
        self
    }

    pub fn order(mut self, column: &str, ascending: bool) -> Self {
        let direction = if ascending { "asc" } else { "desc" };
        self.order.push(format!("{}.{}", column, direction));
        self
    }

    /// Ascending with NULLs sorted after every value.
    pub fn order_asc_nulls_last(mut self, column: &str) -> Self {
        self.order.push(format!("{}.asc.nullslast", column));
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Key/value pairs in the order they are sent.
    pub fn pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        if let Some(select) = &self.select {
            pairs.push(("select".to_string(), select.clone()));
        }
        pairs.extend(self.filters.iter().cloned());
        if !self.order.is_empty() {
            pairs.push(("order".to_string(), self.order.join(",")));
        }
        if let Some(limit) = self.limit {
            pairs.push(("limit".to_string(), limit.to_string()));
        }
        pairs
    }

    /// Percent-encoded query string without the leading `?`.
    pub fn to_query_string(&self) -> String {
        self.pairs()
            .iter()
            .map(|(key, value)| format!("{}={}", key, urlencoding::encode(value)))
            .collect::<Vec<_>>()
            .join("&")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pairs_keep_filter_order() {
        let query = Query::new()
            .select("*, team:team_id (\n  name\n)")
            .eq("player_id", "p1")
            .eq("is_active", true)
            .order("created_at", false)
            .order("id", true)
            .limit(1);

        assert_eq!(
            query.pairs(),
            vec![
                ("select".to_string(), "*,team:team_id(name)".to_string()),
                ("player_id".to_string(), "eq.p1".to_string()),
                ("is_active".to_string(), "eq.true".to_string()),
                ("order".to_string(), "created_at.desc,id.asc".to_string()),
                ("limit".to_string(), "1".to_string()),
            ]
        );
    }

    #[test]
    fn test_in_list_quotes_values() {
        let query = Query::new().in_list("team_deal_id", &["a".to_string(), "b,c".to_string()]);
        assert_eq!(
            query.pairs(),
            vec![("team_deal_id".to_string(), "in.(\"a\",\"b,c\")".to_string())]
        );
    }

    #[test]
    fn test_query_string_is_encoded() {
        let query = Query::new()
            .select("*,player:player_id(first_name,last_name)")
            .eq("completed", false)
            .order_asc_nulls_last("due_date");
        assert_eq!(
            query.to_query_string(),
            "select=%2A%2Cplayer%3Aplayer_id%28first_name%2Clast_name%29&completed=eq.false&order=due_date.asc.nullslast"
        );
    }

    #[test]
    fn test_empty_query() {
        assert!(Query::new().pairs().is_empty());
        assert_eq!(Query::new().to_query_string(), "");
    }
}
