use crate::corpus::model::{TextRecord, ValidationError};

/// The full corpus: an ordered collection of text records.
///
/// Insertion order is preserved and is the stable default order for
/// grouping, layout rows, and listings. All derived views (filtering,
/// lineage, layout) read from here and never mutate it.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Corpus {
    pub records: Vec<TextRecord>,
}

impl Corpus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the entire snapshot. An empty list is a valid corpus.
    pub fn load(&mut self, records: Vec<TextRecord>) {
        self.records = records;
    }

    /// Insert a record, or replace the record with the same `id` in place.
    ///
    /// Replacement keeps the record's position so listings stay stable.
    pub fn upsert(&mut self, record: TextRecord) -> Result<(), ValidationError> {
        record.validate()?;
        match self.records.iter_mut().find(|r| r.id == record.id) {
            Some(existing) => *existing = record,
            None => self.records.push(record),
        }
        Ok(())
    }

    /// Remove the record with matching `id`. Absent ids are a no-op.
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.records.len();
        self.records.retain(|r| r.id != id);
        self.records.len() != before
    }

    pub fn get(&self, id: &str) -> Option<&TextRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut TextRecord> {
        self.records.iter_mut().find(|r| r.id == id)
    }

    /// First record with matching `slug`, in corpus order.
    ///
    /// Slug uniqueness is best-effort; when slugs collide the earliest
    /// record wins (duplicates are reported by `stemma check`).
    pub fn get_by_slug(&self, slug: &str) -> Option<&TextRecord> {
        self.records.iter().find(|r| r.slug == slug)
    }

    /// Resolve a CLI argument: exact `id` match first, then `slug`.
    pub fn resolve(&self, key: &str) -> Option<&TextRecord> {
        self.get(key).or_else(|| self.get_by_slug(key))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.records.iter().any(|r| r.id == id)
    }

    pub fn all(&self) -> &[TextRecord] {
        &self.records
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// An id not yet present in the corpus: `base`, else `base-2`, `base-3`…
    pub fn fresh_id(&self, base: &str) -> String {
        if !self.contains(base) {
            return base.to_string();
        }
        let mut n = 2;
        loop {
            let candidate = format!("{}-{}", base, n);
            if !self.contains(&candidate) {
                return candidate;
            }
            n += 1;
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
