//! `stemma show` — print one text in full, with its markup rendered.

use std::path::Path;

use anyhow::{Result, bail};
use crossterm::style::Stylize;

use crate::archive;
use crate::commands::check;
use crate::corpus::codec;
use crate::corpus::markup::{self, Emphasis, Span};
use crate::corpus::model::TextRecord;
use crate::corpus::store::Corpus;

/// Entry point called from `main`.
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

    println!("\n  {}", record.title.as_str().bold());
    println!("  {}", classification(record).dark_grey());
    println!(
        "  {}",
        format!("id: {} · slug: {}", record.id, record.slug).dark_grey()
    );

    if let Some((line, dangling)) = depends_line(record, &corpus) {
        if dangling {
            println!("  {}", line.yellow());
        } else {
            println!("  {}", line);
        }
    }

    for paragraph in &record.paragraphs {
        println!("\n  {}", render_spans(&markup::parse_spans(paragraph)));
    }

    Ok(())
}

fn classification(record: &TextRecord) -> String {
    let mut line = format!("{} · {}", record.category, record.role);
    if let Some(universe) = &record.universe {
        line.push_str(&format!(" · {}", universe));
    }
    line
}

fn depends_line(record: &TextRecord, corpus: &Corpus) -> Option<(String, bool)> {
    let target = record.depends_on.as_deref()?;
    match corpus.get(target) {
        Some(parent) => Some((format!("depends on: {} ({})", target, parent.title), false)),
        None => Some((format!("depends on: {} (not in catalog)", target), true)),
    }
}

/// Apply emphasis markers as terminal styling.
fn render_spans(spans: &[Span]) -> String {
    spans
        .iter()
        .map(|span| match span.emphasis {
            Emphasis::Plain => span.text.clone(),
            Emphasis::Bold => span.text.as_str().bold().to_string(),
            Emphasis::Italic => span.text.as_str().italic().to_string(),
            Emphasis::Underline => span.text.as_str().underlined().to_string(),
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
