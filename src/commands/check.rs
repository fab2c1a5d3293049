//! `stemma check` — catalog hygiene report (read-only).

use std::collections::HashMap;
use std::path::Path;

use anyhow::Result;
use crossterm::style::Stylize;

use crate::archive;
use crate::corpus::codec;
use crate::corpus::store::Corpus;

// ---------------------------------------------------------------------------
// Public entry points
// ---------------------------------------------------------------------------

pub fn run() -> Result<()> {
    let root = archive::find_root()?;
    run_in(&root)
}

pub fn run_in(root: &Path) -> Result<()> {
    let corpus = codec::load_from(&archive::corpus_path(root))?;
    let report = compute(&corpus);
    print_report(&report, &corpus);
    Ok(())
}

// ---------------------------------------------------------------------------
// Computation (testable, no I/O)
// ---------------------------------------------------------------------------

/// A complete hygiene report for the catalog.
#[derive(Debug, Default)]
pub struct CheckReport {
    /// Dependencies whose target id is absent from the catalog: (source id, target).
    pub dangling: Vec<(String, String)>,
    /// Dependency cycles, each reported once starting from its smallest member id.
    pub cycles: Vec<Vec<String>>,
    /// Slugs carried by more than one record: (slug, ids in catalog order).
    pub duplicate_slugs: Vec<(String, Vec<String>)>,
    /// Ids carried by more than one record (possible if the file was hand-edited).
    pub duplicate_ids: Vec<String>,
}

impl CheckReport {
    pub fn is_clean(&self) -> bool {
        self.dangling.is_empty()
            && self.cycles.is_empty()
            && self.duplicate_slugs.is_empty()
            && self.duplicate_ids.is_empty()
    }
}

/// Compute the hygiene report for an already-loaded catalog.
pub fn compute(corpus: &Corpus) -> CheckReport {
    let dangling = corpus
        .all()
        .iter()
        .filter_map(|record| {
            if let Some(target) = record.depends_on.as_deref()
                && !corpus.contains(target)
            {
                Some((record.id.clone(), target.to_string()))
            } else {
                None
            }
        })
        .collect();

    CheckReport {
        dangling,
        cycles: find_cycles(corpus),
        duplicate_slugs: find_duplicate_slugs(corpus),
        duplicate_ids: find_duplicate_ids(corpus),
    }
}

fn find_cycles(corpus: &Corpus) -> Vec<Vec<String>> {
    let mut cycles = Vec::new();
    for record in corpus.all() {
        let Some(cycle) = walk_cycle(corpus, &record.id) else {
            continue;
        };
        // Every member's walk finds the same loop; keep the one starting
        // from the smallest id so each cycle is reported once.
        if cycle.iter().min().map(String::as_str) == Some(record.id.as_str()) {
            cycles.push(cycle);
        }
    }
    cycles
}

/// Follow `depends_on` links from `start`; `Some` iff the walk comes back to it.
fn walk_cycle<'a>(corpus: &'a Corpus, start: &'a str) -> Option<Vec<String>> {
    let mut path: Vec<&str> = vec![start];
    let mut current = start;
    loop {
        let target = corpus.get(current)?.depends_on.as_deref()?;
        if target == start {
            return Some(path.iter().map(|id| id.to_string()).collect());
        }
        if path.contains(&target) {
            // The walk ran into a loop that does not include `start`;
            // the loop's own members report it.
            return None;
        }
        path.push(target);
        current = target;
    }
}

fn find_duplicate_slugs(corpus: &Corpus) -> Vec<(String, Vec<String>)> {
    let mut by_slug: HashMap<&str, Vec<&str>> = HashMap::new();
    for record in corpus.all() {
        by_slug
            .entry(record.slug.as_str())
            .or_default()
            .push(record.id.as_str());
    }
    let mut duplicates: Vec<(String, Vec<String>)> = by_slug
        .into_iter()
        .filter(|(_, ids)| ids.len() > 1)
        .map(|(slug, ids)| {
            (
                slug.to_string(),
                ids.into_iter().map(str::to_string).collect(),
            )
        })
        .collect();
    duplicates.sort();
    duplicates
}

fn find_duplicate_ids(corpus: &Corpus) -> Vec<String> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for record in corpus.all() {
        *counts.entry(record.id.as_str()).or_insert(0) += 1;
    }
    let mut duplicates: Vec<String> = counts
        .into_iter()
        .filter(|(_, count)| *count > 1)
        .map(|(id, _)| id.to_string())
        .collect();
    duplicates.sort();
    duplicates
}

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

fn print_report(r: &CheckReport, corpus: &Corpus) {
    if !r.dangling.is_empty() {
        println!(
            "\n  {}",
            "Dangling dependencies (target not in catalog):"
                .magenta()
                .bold()
        );
        let mut hint_cache: HashMap<String, Option<String>> = HashMap::new();
        for (source, target) in &r.dangling {
            println!("    {} → {}", source, target);
            let hint = hint_cache
                .entry(target.clone())
                .or_insert_with(|| closest_key_hint(target, corpus));
            if let Some(hint) = hint {
                println!(
                    "      {}",
                    format!("hint: did you mean `{}`?", hint).dark_grey()
                );
            }
        }
    }

    if !r.cycles.is_empty() {
        println!("\n  {}", "Dependency cycles:".red().bold());
        for cycle in &r.cycles {
            if let Some(first) = cycle.first() {
                println!("    {} → {}", cycle.join(" → "), first);
            }
        }
    }

    if !r.duplicate_slugs.is_empty() {
        println!("\n  {}", "Duplicate slugs:".yellow().bold());
        for (slug, ids) in &r.duplicate_slugs {
            println!("    {}  [{}]", slug, ids.join(", "));
        }
        println!(
            "    {}",
            "Links resolve to the earliest record; re-slug with `stemma edit --slug`.".dark_grey()
        );
    }

    if !r.duplicate_ids.is_empty() {
        println!("\n  {}", "Duplicate ids:".red().bold());
        for id in &r.duplicate_ids {
            println!("    {}", id);
        }
    }

    if r.is_clean() {
        println!("\n  {}", "Catalog is clean.".green());
    }
}

/// Best fuzzy match for `key` among all catalog ids and slugs, if close enough.
pub(crate) fn closest_key_hint(key: &str, corpus: &Corpus) -> Option<String> {
    let mut candidates: Vec<&str> = Vec::new();
    for record in corpus.all() {
        candidates.push(record.id.as_str());
        if record.slug != record.id {
            candidates.push(record.slug.as_str());
        }
    }
    closest_match(key, &candidates)
}

fn closest_match(target: &str, candidates: &[&str]) -> Option<String> {
    let mut best: Option<(&str, usize)> = None;
    let target_lc = target.to_ascii_lowercase();
    for &candidate in candidates {
        if candidate == target {
            continue;
        }
        let d = levenshtein(&target_lc, &candidate.to_ascii_lowercase());
        match best {
            None => best = Some((candidate, d)),
            Some((best_cand, best_d)) => {
                if d < best_d || (d == best_d && candidate < best_cand) {
                    best = Some((candidate, d));
                }
            }
        }
    }

    let (candidate, dist) = best?;
    let max_len = target.chars().count().max(candidate.chars().count());
    let threshold = if max_len <= 4 {
        1
    } else if max_len <= 10 {
        2
    } else {
        3
    };
    if dist <= threshold {
        Some(candidate.to_string())
    } else {
        None
    }
}

fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr: Vec<usize> = vec![0; b.len() + 1];

    for (i, &ca) in a.iter().enumerate() {
        curr[0] = i + 1;
        for (j, &cb) in b.iter().enumerate() {
            let cost = if ca == cb { 0 } else { 1 };
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }
    prev[b.len()]
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    use crate::corpus::demo::demo_corpus;
    use crate::corpus::model::TextRecord;

    /// Corpus from `(id, depends_on)` pairs; title doubles as the id.
    fn corpus_from(records: &[(&str, Option<&str>)]) -> Corpus {
        let mut corpus = Corpus::new();
        for (id, depends_on) in records {
            let mut record = TextRecord::new(*id, *id, "Essay", "Root");
            record.depends_on = depends_on.map(str::to_string);
            corpus.upsert(record).unwrap();
        }
        corpus
    }

    #[test]
    fn clean_catalog_reports_nothing() {
        let corpus = corpus_from(&[("a", None), ("b", Some("a"))]);
        let report = compute(&corpus);
        assert!(report.is_clean());
    }

    #[test]
    fn detects_dangling_dependency() {
        let corpus = corpus_from(&[("a", Some("ghost"))]);
        let report = compute(&corpus);
        assert_eq!(
            report.dangling,
            vec![("a".to_string(), "ghost".to_string())]
        );
        assert!(report.cycles.is_empty());
        assert!(!report.is_clean());
    }

    #[test]
    fn detects_self_loop() {
        let corpus = corpus_from(&[("a", Some("a"))]);
        let report = compute(&corpus);
        assert_eq!(report.cycles, vec![vec!["a".to_string()]]);
    }

    #[test]
    fn two_cycle_is_reported_once() {
        let corpus = corpus_from(&[("a", Some("b")), ("b", Some("a"))]);
        let report = compute(&corpus);
        assert_eq!(
            report.cycles,
            vec![vec!["a".to_string(), "b".to_string()]]
        );
    }

    #[test]
    fn tail_into_cycle_reports_only_the_loop() {
        // c hangs off the a <-> b loop but is not part of it.
        let corpus = corpus_from(&[("a", Some("b")), ("b", Some("a")), ("c", Some("a"))]);
        let report = compute(&corpus);
        assert_eq!(
            report.cycles,
            vec![vec!["a".to_string(), "b".to_string()]]
        );
    }

    #[test]
    fn chain_without_cycle_is_clean() {
        let corpus = corpus_from(&[("a", Some("b")), ("b", Some("c")), ("c", None)]);
        let report = compute(&corpus);
        assert!(report.cycles.is_empty());
    }

    #[test]
    fn detects_duplicate_slugs() {
        let mut corpus = Corpus::new();
        corpus
            .upsert(TextRecord::new("first", "Shared Title", "Essay", "Root"))
            .unwrap();
        corpus
            .upsert(TextRecord::new("second", "Shared Title", "Essay", "Root"))
            .unwrap();
        let report = compute(&corpus);
        assert_eq!(
            report.duplicate_slugs,
            vec![(
                "shared-title".to_string(),
                vec!["first".to_string(), "second".to_string()]
            )]
        );
    }

    #[test]
    fn detects_duplicate_ids() {
        // upsert replaces on id collision, so force the state directly.
        let mut corpus = Corpus::new();
        corpus
            .records
            .push(TextRecord::new("twin", "One", "Essay", "Root"));
        corpus
            .records
            .push(TextRecord::new("twin", "Two", "Essay", "Root"));
        let report = compute(&corpus);
        assert_eq!(report.duplicate_ids, vec!["twin".to_string()]);
    }

    #[test]
    fn hint_suggests_close_key() {
        let corpus = demo_corpus();
        assert_eq!(
            closest_key_hint("winter-anals", &corpus),
            Some("winter-annals".to_string())
        );
    }

    #[test]
    fn hint_ignores_distant_key() {
        let corpus = demo_corpus();
        assert!(closest_key_hint("zzzzzzzzzzzzzzzz", &corpus).is_none());
    }

    #[test]
    fn demo_catalog_has_one_dangling_reference() {
        let report = compute(&demo_corpus());
        assert_eq!(report.dangling.len(), 1);
        assert_eq!(report.dangling[0].1, "court-masque");
        assert!(report.cycles.is_empty());
        assert!(report.duplicate_slugs.is_empty());
        assert!(report.duplicate_ids.is_empty());
    }

    #[test]
    fn run_in_reads_the_saved_catalog() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("stemma")).unwrap();
        codec::save_to(&archive::corpus_path(dir.path()), &demo_corpus()).unwrap();

        assert!(run_in(dir.path()).is_ok());
    }
}
