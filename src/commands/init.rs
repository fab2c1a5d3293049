//! `stemma init` — create the `stemma/` catalog in the current directory.

use std::fs;
use std::path::Path;

use anyhow::{Result, bail};
use crossterm::style::Stylize;

use crate::archive;
use crate::config;
use crate::corpus::codec;
use crate::corpus::demo;
use crate::corpus::store::Corpus;

// ---------------------------------------------------------------------------
// Public entry points
// ---------------------------------------------------------------------------

/// Entry point called from `main`.
pub fn run(seed: bool) -> Result<()> {
    let root = std::env::current_dir()?;
    run_in(&root, seed)
}

/// Run init inside `root`.
pub fn run_in(root: &Path, seed: bool) -> Result<()> {
    if archive::corpus_path(root).exists() {
        bail!("stemma is already initialised (stemma/corpus.json exists)");
    }

    fs::create_dir_all(archive::stemma_dir(root))?;

    let corpus = if seed {
        demo::demo_corpus()
    } else {
        Corpus::new()
    };
    codec::save_to(&archive::corpus_path(root), &corpus)?;
    if seed {
        println!(
            "  {} stemma/corpus.json with {} demo texts",
            "Created".green().bold(),
            corpus.len().to_string().green()
        );
    } else {
        println!("  {} stemma/corpus.json", "Created".green().bold());
    }

    fs::write(archive::config_path(root), config::DEFAULT_CONTENTS)?;
    println!("  {} stemma/config", "Created".green().bold());

    archive::write_link(root, "/")?;
    println!("  {} stemma/view.link", "Created".green().bold());

    println!(
        "  {}",
        "Add texts with `stemma add`, or browse with `stemma view`.".dark_grey()
    );

    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn creates_empty_catalog() {
        let dir = TempDir::new().unwrap();
        run_in(dir.path(), false).unwrap();

        let content = fs::read_to_string(dir.path().join("stemma/corpus.json")).unwrap();
        assert_eq!(content, "[]\n");
    }

    #[test]
    fn seed_writes_the_demo_corpus() {
        let dir = TempDir::new().unwrap();
        run_in(dir.path(), true).unwrap();

        let corpus = codec::load_from(&dir.path().join("stemma/corpus.json")).unwrap();
        assert!(corpus.contains("the-hollow-crown"));
        assert_eq!(corpus.len(), demo::demo_corpus().len());
    }

    #[test]
    fn creates_default_config() {
        let dir = TempDir::new().unwrap();
        run_in(dir.path(), false).unwrap();

        let content = fs::read_to_string(dir.path().join("stemma/config")).unwrap();
        assert_eq!(
            config::parse(&content).unwrap(),
            config::Config::default()
        );
    }

    #[test]
    fn creates_root_view_link() {
        let dir = TempDir::new().unwrap();
        run_in(dir.path(), false).unwrap();
        assert_eq!(archive::read_link(dir.path()), "/");
    }

    #[test]
    fn error_if_already_initialised() {
        let dir = TempDir::new().unwrap();
        run_in(dir.path(), false).unwrap();
        assert!(run_in(dir.path(), false).is_err());
    }

    #[test]
    fn initialised_root_is_discoverable() {
        let dir = TempDir::new().unwrap();
        run_in(dir.path(), false).unwrap();
        assert_eq!(archive::find_root_from(dir.path()).unwrap(), dir.path());
    }
}
