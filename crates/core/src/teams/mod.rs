//! Teams module - the read-only club and competition catalog.

mod teams_model;
mod teams_traits;

pub use teams_model::{search_teams, Competition, Team};
pub use teams_traits::CatalogRepositoryTrait;

#[cfg(test)]
mod tests {
    use super::*;

    fn team(id: &str, name: &str) -> Team {
        Team {
            id: id.to_string(),
            name: name.to_string(),
            city: None,
            competition_id: None,
            competition_name: None,
        }
    }

    #[test]
    fn search_is_case_insensitive_substring() {
        let teams = vec![team("1", "Virtus Bologna"), team("2", "Olimpia Milano")];
        let hits = search_teams(&teams, "  bolo ");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, "1");
        assert_eq!(search_teams(&teams, "").len(), 2);
    }
}
