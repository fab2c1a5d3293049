//! `stemma add` — add a text to the catalog.

use std::path::Path;

use anyhow::Result;
use clap::Args;
use crossterm::style::Stylize;

use crate::archive;
use crate::config;
use crate::corpus::codec;
use crate::corpus::model::{TextRecord, slugify};

#[derive(Debug, Args)]
pub struct AddArgs {
    /// Title of the new text.
    pub title: String,
    /// Category group the text belongs to (its layout column).
    #[arg(long)]
    pub category: String,
    /// Role of the text within its lineage, e.g. "Root" or "Version".
    #[arg(long)]
    pub role: String,
    /// Shared universe, if any.
    #[arg(long)]
    pub universe: Option<String>,
    /// Id or slug of the text this one depends on.
    #[arg(long = "depends-on", value_name = "KEY")]
    pub depends_on: Option<String>,
    /// Body paragraph; repeat the flag for more than one.
    #[arg(long = "paragraph", value_name = "TEXT")]
    pub paragraphs: Vec<String>,
    /// Slug for the new text; defaults to one derived from the title.
    #[arg(long)]
    pub slug: Option<String>,
}

/// Entry point called from `main`.
pub fn run(args: &AddArgs) -> Result<()> {
    let root = archive::find_root()?;
    run_in(&root, args)
}

pub fn run_in(root: &Path, args: &AddArgs) -> Result<()> {
    let corpus_path = archive::corpus_path(root);
    let mut corpus = codec::load_from(&corpus_path)?;
    let config = config::load(root)?;

    let slug = match &args.slug {
        Some(given) => slugify(given),
        None => slugify(&args.title),
    };
    let id = corpus.fresh_id(&slug);

    let mut record = TextRecord::new(&id, &args.title, &args.category, &args.role);
    record.slug = slug;
    record.universe = args.universe.clone();
    record.paragraphs = args.paragraphs.clone();

    if let Some(key) = &args.depends_on {
        match corpus.resolve(key) {
            Some(parent) => record.depends_on = Some(parent.id.clone()),
            None => {
                // Stored as given; `stemma check` reports it until the
                // parent appears.
                record.depends_on = Some(key.clone());
                if config.warn_dangling {
                    println!(
                        "  {} `{}` is not in the catalog; the reference will dangle",
                        "Warning:".yellow().bold(),
                        key
                    );
                }
            }
        }
    }

    corpus.upsert(record)?;
    codec::save_to(&corpus_path, &corpus)?;

    println!(
        "  {} {} {}",
        "Added".green().bold(),
        args.title,
        format!("({})", id).dark_grey()
    );
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
