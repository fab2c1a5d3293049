//! Reader and writer for `stemma/corpus.json`.
//!
//! The file is a JSON array of records in corpus order. The central
//! invariant: `parse(serialize(corpus)?) == corpus` for any corpus, so a
//! save/load cycle never reorders records or loses optional fields.

use std::path::Path;

use anyhow::{Context, Result};

use crate::corpus::model::TextRecord;
use crate::corpus::store::Corpus;

/// Parse corpus.json text. Unknown object keys are ignored.
pub fn parse(input: &str) -> Result<Corpus> {
    let records: Vec<TextRecord> =
        serde_json::from_str(input).context("corpus.json is not a valid record array")?;
    Ok(Corpus { records })
}

/// Serialize the corpus as a pretty-printed JSON array with a trailing newline.
pub fn serialize(corpus: &Corpus) -> Result<String> {
    let mut out = serde_json::to_string_pretty(&corpus.records)?;
    out.push('\n');
    Ok(out)
}

pub fn load_from(path: &Path) -> Result<Corpus> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    parse(&content)
}

pub fn save_to(path: &Path, corpus: &Corpus) -> Result<()> {
    let content = serialize(corpus)?;
    std::fs::write(path, content)
        .with_context(|| format!("failed to write {}", path.display()))?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sample() -> Corpus {
        let mut c = Corpus::new();
        c.upsert(TextRecord::new("crown", "The Hollow Crown", "Narrative", "Root"))
            .unwrap();
        let mut child = TextRecord::new("crown-restored", "Crown, Restored", "Narrative", "Version");
        child.universe = Some("Crown Cycle".to_string());
        child.depends_on = Some("crown".to_string());
        child.paragraphs = vec!["Opening **lines**.".to_string()];
        c.upsert(child).unwrap();
        c
    }

    #[test]
    fn round_trip_preserves_records_and_order() {
        let corpus = sample();
        let text = serialize(&corpus).unwrap();
        assert_eq!(parse(&text).unwrap(), corpus);
    }

    #[test]
    fn empty_array_is_an_empty_corpus() {
        let corpus = parse("[]").unwrap();
        assert!(corpus.is_empty());
    }

    #[test]
    fn optional_fields_are_omitted_when_absent() {
        let mut c = Corpus::new();
        c.upsert(TextRecord::new("a", "A", "Essay", "Root")).unwrap();
        let text = serialize(&c).unwrap();
        assert!(!text.contains("universe"));
        assert!(!text.contains("depends_on"));
        assert!(!text.contains("paragraphs"));
    }

    #[test]
    fn unknown_keys_are_tolerated() {
        let text = r#"[{"id":"a","slug":"a","title":"A","category":"Essay","role":"Root","legacy_field":42}]"#;
        let corpus = parse(text).unwrap();
        assert_eq!(corpus.get("a").unwrap().title, "A");
    }

    #[test]
    fn malformed_json_reports_context() {
        let err = parse("{not json").unwrap_err();
        assert!(err.to_string().contains("corpus.json"));
    }

    #[test]
    fn save_and_load_through_disk() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("corpus.json");
        let corpus = sample();
        save_to(&path, &corpus).unwrap();
        assert_eq!(load_from(&path).unwrap(), corpus);
    }

    #[test]
    fn load_missing_file_reports_path() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("corpus.json");
        let err = load_from(&path).unwrap_err();
        assert!(err.to_string().contains("corpus.json"));
    }
}
