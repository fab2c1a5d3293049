//! Direct-lineage resolution: one level up, one level down.
//!
//! Resolution never walks further than one step, so cyclic `depends_on`
//! data cannot loop here; cycle detection is `stemma check`'s job.

use std::collections::HashSet;

use crate::corpus::model::TextRecord;

/// The direct lineage of one focal record.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Lineage {
    /// The focal record's parent, or `None` when absent or dangling.
    pub ancestor_id: Option<String>,
    /// All records depending directly on the focal record, in corpus order.
    pub descendant_ids: Vec<String>,
}

/// Resolve the direct ancestor and direct descendants of `focal_id`.
///
/// An unknown `focal_id` yields an empty lineage. A record depending on
/// itself gets neither an ancestor nor a descendant entry for it.
pub fn resolve_lineage(records: &[TextRecord], focal_id: &str) -> Lineage {
    let Some(focal) = records.iter().find(|r| r.id == focal_id) else {
        return Lineage::default();
    };

    let ancestor_id = focal
        .depends_on
        .as_deref()
        .filter(|target| *target != focal_id)
        .filter(|target| records.iter().any(|r| r.id == *target))
        .map(String::from);

    let descendant_ids = records
        .iter()
        .filter(|r| r.id != focal_id && r.depends_on.as_deref() == Some(focal_id))
        .map(|r| r.id.clone())
        .collect();

    Lineage {
        ancestor_id,
        descendant_ids,
    }
}

/// The set of record ids to keep visible.
///
/// With focus off, every record stays visible. With focus on, only the
/// focal record, its direct ancestor, and its direct descendants remain;
/// the complement is the presentation layer's hidden set.
pub fn visible_set(records: &[TextRecord], focal_id: &str, focus_mode: bool) -> HashSet<String> {
    if !focus_mode {
        return records.iter().map(|r| r.id.clone()).collect();
    }

    let lineage = resolve_lineage(records, focal_id);
    let mut visible = HashSet::new();
    visible.insert(focal_id.to_string());
    if let Some(ancestor) = lineage.ancestor_id {
        visible.insert(ancestor);
    }
    visible.extend(lineage.descendant_ids);
    visible
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
