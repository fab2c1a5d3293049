//! `stemma lineage` — show what a text depends on and what depends on it.

use std::path::Path;

use anyhow::{Result, bail};
use crossterm::style::Stylize;

use crate::archive;
use crate::commands::check;
use crate::corpus::codec;
use crate::view::lineage::resolve_lineage;

pub fn run(key: &str) -> Result<()> {
    let root = archive::find_root()?;
    run_in(&root, key)
}

pub fn run_in(root: &Path, key: &str) -> Result<()> {
    let corpus = codec::load_from(&archive::corpus_path(root))?;
    let Some(record) = corpus.resolve(key) else {
        if let Some(hint) = check::closest_key_hint(key, &corpus) {
            println!(
                "  {}",
                format!("hint: did you mean `{}`?", hint).dark_grey()
            );
        }
        bail!("no text matching `{}`", key);
    };

    let lineage = resolve_lineage(corpus.all(), &record.id);

    println!("\n  {}", record.title.as_str().bold());

    match lineage.ancestor_id.as_deref().and_then(|pid| corpus.get(pid)) {
        Some(parent) => {
            println!("\n  {}", "Depends on".cyan().bold());
            println!("    {} ({})", parent.slug, parent.title);
        }
        None => match record.depends_on.as_deref() {
            Some(target) if target == record.id => {
                println!("\n  {}", "Depends on itself.".yellow());
            }
            Some(target) => {
                println!(
                    "\n  {}",
                    format!("Depends on `{}` (not in catalog).", target).yellow()
                );
            }
            None => {
                println!("\n  {}", "Depends on nothing.".dark_grey());
            }
        },
    }

    if lineage.descendant_ids.is_empty() {
        println!("\n  {}", "Nothing depends on it.".dark_grey());
    } else {
        println!("\n  {}", "Depended on by".cyan().bold());
        for id in &lineage.descendant_ids {
            if let Some(child) = corpus.get(id) {
                println!("    {} ({})", child.slug, child.title);
            }
        }
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
