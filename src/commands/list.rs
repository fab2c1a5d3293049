//! `stemma list` — print the catalog grouped by category.

use std::path::Path;

use anyhow::{Context, Result};
use crossterm::style::Stylize;

use crate::archive;
use crate::corpus::codec;
use crate::corpus::model::TextRecord;
use crate::view::filter::{apply_filters, group_by_category};
use crate::view::state::{FilterChoice, Filters};

/// Entry point called from `main`.
pub fn run(
    category: Option<String>,
    role: Option<String>,
    universe: Option<String>,
    json: bool,
) -> Result<()> {
    let root = archive::find_root()?;
    run_in(&root, category, role, universe, json)
}

pub fn run_in(
    root: &Path,
    category: Option<String>,
    role: Option<String>,
    universe: Option<String>,
    json: bool,
) -> Result<()> {
    let corpus = codec::load_from(&archive::corpus_path(root))?;
    let filters = Filters {
        category: choice(category),
        role: choice(role),
        universe: choice(universe),
    };
    let matched = apply_filters(corpus.all(), &filters);

    if json {
        println!("{}", json_output(&matched)?);
        return Ok(());
    }

    if corpus.is_empty() {
        println!("  Catalog is empty.");
        println!("  {}", "Add texts with `stemma add`.".dark_grey());
        return Ok(());
    }
    if matched.is_empty() {
        println!("  No texts match the filter.");
        return Ok(());
    }

    for (category, members) in group_by_category(&matched) {
        println!("\n  {}", category.to_uppercase().bold());
        for record in members {
            println!("    {:<28} {}", record.slug, meta_line(record).dark_grey());
        }
    }
    Ok(())
}

fn choice(value: Option<String>) -> FilterChoice {
    value.map(FilterChoice::Value).unwrap_or_default()
}

fn meta_line(record: &TextRecord) -> String {
    let mut meta = record.role.clone();
    if let Some(target) = &record.depends_on {
        meta.push_str(&format!(" → {}", target));
    }
    if let Some(universe) = &record.universe {
        meta.push_str(&format!(" · {}", universe));
    }
    meta
}

fn json_output(records: &[&TextRecord]) -> Result<String> {
    serde_json::to_string_pretty(records).context("could not serialize records")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::demo::demo_corpus;

    #[test]
    fn meta_shows_role_dependency_and_universe() {
        let corpus = demo_corpus();
        let restored = corpus.get("the-hollow-crown-restored").unwrap();
        assert_eq!(
            meta_line(restored),
            "Version → the-hollow-crown · Crown Cycle"
        );

        let maps = corpus.get("on-maps").unwrap();
        assert_eq!(meta_line(maps), "Root");

        let annals_thaw = corpus.get("winter-annals-thaw").unwrap();
        assert_eq!(meta_line(annals_thaw), "Module → winter-annals");
    }

    #[test]
    fn json_output_round_trips() {
        let corpus = demo_corpus();
        let refs: Vec<&TextRecord> = corpus.all().iter().collect();
        let text = json_output(&refs).unwrap();
        let parsed: Vec<TextRecord> = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed.len(), corpus.len());
        assert_eq!(parsed[0].id, "the-hollow-crown");
    }
}
