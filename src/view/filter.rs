//! Filtering and category grouping over the corpus.

use crate::corpus::model::TextRecord;
use crate::view::state::{FilterDim, Filters};

/// The subsequence of `records` passing every filter dimension.
///
/// Relative order is preserved; the input is never mutated.
pub fn apply_filters<'a>(records: &'a [TextRecord], filters: &Filters) -> Vec<&'a TextRecord> {
    records.iter().filter(|r| filters.matches(r)).collect()
}

/// Group records by category, in order of each category's first appearance.
///
/// Record order within a group follows the input sequence. Categories with
/// no records are never emitted.
pub fn group_by_category<'a>(records: &[&'a TextRecord]) -> Vec<(String, Vec<&'a TextRecord>)> {
    let mut groups: Vec<(String, Vec<&'a TextRecord>)> = Vec::new();
    for &record in records {
        match groups.iter_mut().find(|(cat, _)| *cat == record.category) {
            Some((_, members)) => members.push(record),
            None => groups.push((record.category.clone(), vec![record])),
        }
    }
    groups
}

/// Distinct values of one dimension, in first-appearance order.
///
/// Records without the field contribute nothing. Feeds filter cycling in
/// the TUI and value hints on the CLI.
pub fn distinct_values(records: &[TextRecord], dim: FilterDim) -> Vec<String> {
    let mut values: Vec<String> = Vec::new();
    for record in records {
        let field = match dim {
            FilterDim::Category => Some(record.category.as_str()),
            FilterDim::Role => Some(record.role.as_str()),
            FilterDim::Universe => record.universe.as_deref(),
        };
        if let Some(value) = field
            && !values.iter().any(|v| v == value)
        {
            values.push(value.to_string());
        }
    }
    values
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::state::FilterChoice;

    fn record(id: &str, category: &str, role: &str, universe: Option<&str>) -> TextRecord {
        let mut r = TextRecord::new(id, id.to_uppercase(), category, role);
        r.universe = universe.map(String::from);
        r
    }

    fn sample() -> Vec<TextRecord> {
        vec![
            record("a", "Narrative", "Root", Some("Crown Cycle")),
            record("b", "Narrative", "Version", Some("Crown Cycle")),
            record("c", "Essay", "Root", None),
            record("d", "Narrative", "Module", None),
        ]
    }

    fn ids(records: &[&TextRecord]) -> Vec<String> {
        records.iter().map(|r| r.id.clone()).collect()
    }

    #[test]
    fn unfiltered_returns_everything_in_order() {
        let records = sample();
        let filtered = apply_filters(&records, &Filters::default());
        assert_eq!(ids(&filtered), vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn category_filter_keeps_matching_subsequence() {
        let records = sample();
        let filters = Filters {
            category: FilterChoice::Value("Narrative".to_string()),
            ..Filters::default()
        };
        assert_eq!(ids(&apply_filters(&records, &filters)), vec!["a", "b", "d"]);

        let filters = Filters {
            category: FilterChoice::Value("Essay".to_string()),
            ..Filters::default()
        };
        assert_eq!(ids(&apply_filters(&records, &filters)), vec!["c"]);
    }

    #[test]
    fn unknown_value_filters_everything_out() {
        let records = sample();
        let filters = Filters {
            category: FilterChoice::Value("Drama".to_string()),
            ..Filters::default()
        };
        assert!(apply_filters(&records, &filters).is_empty());
    }

    #[test]
    fn records_without_universe_fail_a_universe_filter() {
        let records = sample();
        let filters = Filters {
            universe: FilterChoice::Value("Crown Cycle".to_string()),
            ..Filters::default()
        };
        assert_eq!(ids(&apply_filters(&records, &filters)), vec!["a", "b"]);
    }

    #[test]
    fn pinning_a_filter_only_narrows() {
        // Every record passing the narrow filters also passes the permissive one.
        let records = sample();
        let narrow = Filters {
            category: FilterChoice::Value("Narrative".to_string()),
            role: FilterChoice::Value("Root".to_string()),
            ..Filters::default()
        };
        let permissive = Filters {
            category: FilterChoice::Value("Narrative".to_string()),
            ..Filters::default()
        };
        let narrow_ids = ids(&apply_filters(&records, &narrow));
        let permissive_ids = ids(&apply_filters(&records, &permissive));
        assert!(narrow_ids.iter().all(|id| permissive_ids.contains(id)));
        let all_ids = ids(&apply_filters(&records, &Filters::default()));
        assert!(permissive_ids.iter().all(|id| all_ids.contains(id)));
    }

    #[test]
    fn groups_follow_first_appearance_order() {
        let records = sample();
        let filtered = apply_filters(&records, &Filters::default());
        let groups = group_by_category(&filtered);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].0, "Narrative");
        assert_eq!(ids(&groups[0].1), vec!["a", "b", "d"]);
        assert_eq!(groups[1].0, "Essay");
        assert_eq!(ids(&groups[1].1), vec!["c"]);
    }

    #[test]
    fn empty_categories_are_omitted() {
        let records = sample();
        let filters = Filters {
            role: FilterChoice::Value("Version".to_string()),
            ..Filters::default()
        };
        let filtered = apply_filters(&records, &filters);
        let groups = group_by_category(&filtered);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].0, "Narrative");
    }

    #[test]
    fn distinct_values_keep_first_appearance_order() {
        let records = sample();
        assert_eq!(
            distinct_values(&records, FilterDim::Category),
            vec!["Narrative", "Essay"]
        );
        assert_eq!(
            distinct_values(&records, FilterDim::Role),
            vec!["Root", "Version", "Module"]
        );
        assert_eq!(
            distinct_values(&records, FilterDim::Universe),
            vec!["Crown Cycle"]
        );
    }
}
