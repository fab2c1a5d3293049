//! `stemma edit` — update fields of an existing text.

use std::path::Path;

use anyhow::{Result, bail};
use clap::Args;
use crossterm::style::Stylize;

use crate::archive;
use crate::commands::check;
use crate::config;
use crate::corpus::codec;
use crate::corpus::model::slugify;

#[derive(Debug, Args)]
pub struct EditArgs {
    /// Id or slug of the text to edit.
    pub key: String,
    #[arg(long)]
    pub title: Option<String>,
    #[arg(long)]
    pub category: Option<String>,
    #[arg(long)]
    pub role: Option<String>,
    #[arg(long, conflicts_with = "clear_universe")]
    pub universe: Option<String>,
    /// Remove the universe field.
    #[arg(long)]
    pub clear_universe: bool,
    /// Id or slug of the new dependency target.
    #[arg(
        long = "depends-on",
        value_name = "KEY",
        conflicts_with = "clear_depends_on"
    )]
    pub depends_on: Option<String>,
    /// Remove the dependency.
    #[arg(long)]
    pub clear_depends_on: bool,
    /// Append a body paragraph; repeat the flag for more than one.
    #[arg(long = "paragraph", value_name = "TEXT")]
    pub paragraphs: Vec<String>,
    /// Drop all existing paragraphs before appending.
    #[arg(long)]
    pub clear_paragraphs: bool,
    /// Replace the slug. A title change alone keeps the old slug, so
    /// shared links stay valid.
    #[arg(long)]
    pub slug: Option<String>,
}

/// Entry point called from `main`.
pub fn run(args: &EditArgs) -> Result<()> {
    let root = archive::find_root()?;
    run_in(&root, args)
}

pub fn run_in(root: &Path, args: &EditArgs) -> Result<()> {
    let corpus_path = archive::corpus_path(root);
    let mut corpus = codec::load_from(&corpus_path)?;
    let config = config::load(root)?;

    let Some(record_id) = corpus.resolve(&args.key).map(|r| r.id.clone()) else {
        if let Some(hint) = check::closest_key_hint(&args.key, &corpus) {
            println!(
                "  {}",
                format!("hint: did you mean `{}`?", hint).dark_grey()
            );
        }
        bail!("no text matching `{}`", args.key);
    };

    // Resolve the new dependency before taking the mutable borrow.
    let new_depends = match &args.depends_on {
        Some(key) => match corpus.resolve(key) {
            Some(parent) => Some(parent.id.clone()),
            None => {
                if config.warn_dangling {
                    println!(
                        "  {} `{}` is not in the catalog; the reference will dangle",
                        "Warning:".yellow().bold(),
                        key
                    );
                }
                Some(key.clone())
            }
        },
        None => None,
    };

    let Some(record) = corpus.get_mut(&record_id) else {
        bail!("no text matching `{}`", args.key);
    };

    if let Some(title) = &args.title {
        record.title = title.clone();
    }
    if let Some(category) = &args.category {
        record.category = category.clone();
    }
    if let Some(role) = &args.role {
        record.role = role.clone();
    }
    if args.clear_universe {
        record.universe = None;
    }
    if let Some(universe) = &args.universe {
        record.universe = Some(universe.clone());
    }
    if args.clear_depends_on {
        record.depends_on = None;
    }
    if let Some(target) = new_depends {
        record.depends_on = Some(target);
    }
    if args.clear_paragraphs {
        record.paragraphs.clear();
    }
    record.paragraphs.extend(args.paragraphs.iter().cloned());
    if let Some(slug) = &args.slug {
        record.slug = slugify(slug);
    }

    record.validate()?;
    let slug_now = record.slug.clone();

    codec::save_to(&corpus_path, &corpus)?;

    println!("  {} {}", "Updated".green().bold(), record_id);
    if args.title.is_some() && args.slug.is_none() {
        println!(
            "  {}",
            format!("Slug stays `{}`; pass --slug to change it.", slug_now).dark_grey()
        );
    }
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

    use crate::corpus::demo::demo_corpus;

    fn setup() -> TempDir {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("stemma")).unwrap();
        codec::save_to(&archive::corpus_path(dir.path()), &demo_corpus()).unwrap();
        dir
    }

    fn args(key: &str) -> EditArgs {
        EditArgs {
            key: key.to_string(),
            title: None,
            category: None,
            role: None,
            universe: None,
            clear_universe: false,
            depends_on: None,
            clear_depends_on: false,
            paragraphs: Vec::new(),
            clear_paragraphs: false,
            slug: None,
        }
    }

    fn reload(dir: &TempDir) -> crate::corpus::store::Corpus {
        codec::load_from(&archive::corpus_path(dir.path())).unwrap()
    }

    #[test]
    fn retitle_keeps_the_slug() {
        let dir = setup();
        let mut edit = args("on-maps");
        edit.title = Some("On Newer Maps".to_string());
        run_in(dir.path(), &edit).unwrap();

        let corpus = reload(&dir);
        let record = corpus.get("on-maps").unwrap();
        assert_eq!(record.title, "On Newer Maps");
        assert_eq!(record.slug, "on-maps");
    }

    #[test]
    fn explicit_slug_is_normalised() {
        let dir = setup();
        let mut edit = args("on-maps");
        edit.slug = Some("Maps & Charts".to_string());
        run_in(dir.path(), &edit).unwrap();

        assert_eq!(reload(&dir).get("on-maps").unwrap().slug, "maps-charts");
    }

    #[test]
    fn clear_universe_removes_the_field() {
        let dir = setup();
        let mut edit = args("the-hollow-crown");
        edit.clear_universe = true;
        run_in(dir.path(), &edit).unwrap();

        assert_eq!(reload(&dir).get("the-hollow-crown").unwrap().universe, None);
    }

    #[test]
    fn depends_on_accepts_slug_and_stores_id() {
        let dir = setup();
        let mut edit = args("on-maps");
        edit.depends_on = Some("on-rivers".to_string());
        run_in(dir.path(), &edit).unwrap();

        assert_eq!(
            reload(&dir).get("on-maps").unwrap().depends_on.as_deref(),
            Some("on-rivers")
        );
    }

    #[test]
    fn clear_depends_on_removes_the_reference() {
        let dir = setup();
        let mut edit = args("winter-annals-thaw");
        edit.clear_depends_on = true;
        run_in(dir.path(), &edit).unwrap();

        assert_eq!(reload(&dir).get("winter-annals-thaw").unwrap().depends_on, None);
    }

    #[test]
    fn paragraphs_append_unless_cleared() {
        let dir = setup();
        let mut append = args("the-hollow-crown");
        append.paragraphs = vec!["A third season passed.".to_string()];
        run_in(dir.path(), &append).unwrap();
        assert_eq!(reload(&dir).get("the-hollow-crown").unwrap().paragraphs.len(), 3);

        let mut replace = args("the-hollow-crown");
        replace.clear_paragraphs = true;
        replace.paragraphs = vec!["Rewritten.".to_string()];
        run_in(dir.path(), &replace).unwrap();
        assert_eq!(
            reload(&dir).get("the-hollow-crown").unwrap().paragraphs,
            vec!["Rewritten.".to_string()]
        );
    }

    #[test]
    fn unknown_key_errors() {
        let dir = setup();
        assert!(run_in(dir.path(), &args("never-written")).is_err());
    }

    #[test]
    fn invalid_result_is_not_saved() {
        let dir = setup();
        let mut edit = args("on-maps");
        edit.category = Some("  ".to_string());
        assert!(run_in(dir.path(), &edit).is_err());

        // The file keeps the previous category.
        assert_eq!(reload(&dir).get("on-maps").unwrap().category, "Essay");
    }
}
