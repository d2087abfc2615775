//! Summary figures over the current employee snapshot.

use crate::employee::EmployeeRow;
use std::collections::{HashMap, HashSet};

/// Label used for employees without a location.
pub const UNKNOWN_LOCATION: &str = "(Unknown)";

/// Headline metrics plus per-location and per-skill counts.
#[derive(Debug, Clone, PartialEq, Eq, Default, serde::Serialize)]
pub struct Insights {
    pub employees: usize,
    pub active: usize,
    pub locations: usize,
    /// `(location, count)`, largest first.
    pub by_location: Vec<(String, usize)>,
    /// `(skill, count)`, largest first.
    pub by_skill: Vec<(String, usize)>,
}

impl Insights {
    /// Compute insights over the rows of a snapshot.
    pub fn from_rows(rows: &[EmployeeRow]) -> Self {
        let distinct_locations: HashSet<&str> = rows.iter().map(|r| r.location.trim()).collect();

        let mut by_location: HashMap<String, usize> = HashMap::new();
        for row in rows {
            let location = row.location.trim();
            let key = if location.is_empty() {
                UNKNOWN_LOCATION
            } else {
                location
            };
            *by_location.entry(key.to_string()).or_default() += 1;
        }

        let mut by_skill: HashMap<String, usize> = HashMap::new();
        for skill in rows
            .iter()
            .flat_map(|r| r.skills.split(','))
            .map(str::trim)
            .filter(|s| !s.is_empty())
        {
            *by_skill.entry(skill.to_string()).or_default() += 1;
        }

        Self {
            employees: rows.len(),
            active: rows.iter().filter(|r| r.active).count(),
            locations: distinct_locations.len(),
            by_location: sorted_counts(by_location),
            by_skill: sorted_counts(by_skill),
        }
    }
}

/// Sort counts by count descending, then label ascending.
fn sorted_counts(counts: HashMap<String, usize>) -> Vec<(String, usize)> {
    let mut counts: Vec<(String, usize)> = counts.into_iter().collect();
    counts.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    counts
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(location: &str, skills: &str, active: bool) -> EmployeeRow {
        EmployeeRow {
            location: location.to_string(),
            skills: skills.to_string(),
            active,
            ..Default::default()
        }
    }

    #[test]
    fn test_headline_metrics() {
        let rows = vec![
            row("Leeds", "SQL", true),
            row("Leeds", "", false),
            row("", "", true),
        ];
        let insights = Insights::from_rows(&rows);
        assert_eq!(insights.employees, 3);
        assert_eq!(insights.active, 2);
        assert_eq!(insights.locations, 2);
    }

    #[test]
    fn test_by_location_groups_blank_as_unknown() {
        let rows = vec![
            row("Leeds", "", true),
            row(" ", "", true),
            row("York", "", true),
            row("Leeds", "", true),
        ];
        let insights = Insights::from_rows(&rows);
        assert_eq!(
            insights.by_location,
            vec![
                ("Leeds".to_string(), 2),
                (UNKNOWN_LOCATION.to_string(), 1),
                ("York".to_string(), 1),
            ]
        );
    }

    #[test]
    fn test_by_skill_splits_and_trims() {
        let rows = vec![
            row("", "SQL, Python, Snowflake", true),
            row("", "Python,,  ", true),
            row("", "sql", true),
        ];
        let insights = Insights::from_rows(&rows);
        assert_eq!(
            insights.by_skill,
            vec![
                ("Python".to_string(), 2),
                ("SQL".to_string(), 1),
                ("Snowflake".to_string(), 1),
                ("sql".to_string(), 1),
            ]
        );
    }

    #[test]
    fn test_empty_snapshot() {
        assert_eq!(Insights::from_rows(&[]), Insights::default());
    }
}
