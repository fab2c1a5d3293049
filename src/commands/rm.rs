//! `stemma rm` — remove a text from the catalog.

use std::path::Path;

use anyhow::{Result, bail};
use crossterm::style::Stylize;

use crate::archive;
use crate::commands::check;
use crate::config;
use crate::corpus::codec;

/// Entry point called from `main`.
pub fn run(key: &str) -> Result<()> {
    let root = archive::find_root()?;
    run_in(&root, key)
}

pub fn run_in(root: &Path, key: &str) -> Result<()> {
    let corpus_path = archive::corpus_path(root);
    let mut corpus = codec::load_from(&corpus_path)?;
    let config = config::load(root)?;

    let Some(record) = corpus.resolve(key) else {
        if let Some(hint) = check::closest_key_hint(key, &corpus) {
            println!(
                "  {}",
                format!("hint: did you mean `{}`?", hint).dark_grey()
            );
        }
        bail!("no text matching `{}`", key);
    };
    let id = record.id.clone();
    let title = record.title.clone();

    // Dependents keep their reference; it dangles from now on.
    let dependents: Vec<String> = corpus
        .all()
        .iter()
        .filter(|r| r.depends_on.as_deref() == Some(id.as_str()))
        .map(|r| r.id.clone())
        .collect();

    corpus.remove(&id);
    codec::save_to(&corpus_path, &corpus)?;

    println!(
        "  {} {} {}",
        "Removed".green().bold(),
        title,
        format!("({})", id).dark_grey()
    );
    if config.warn_dangling && !dependents.is_empty() {
        println!(
            "  {} {} dependent text{} now dangling: {}",
            "Warning:".yellow().bold(),
            dependents.len(),
            if dependents.len() == 1 { "" } else { "s" },
            dependents.join(", ")
        );
        println!("  {}", "Run `stemma check` to review.".dark_grey());
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
