//! `stemma link` — build or inspect shareable view strings without the TUI.

use std::path::Path;

use anyhow::{Result, bail};
use clap::Args;
use crossterm::style::Stylize;

use crate::archive;
use crate::commands::check;
use crate::corpus::codec;
use crate::corpus::store::Corpus;
use crate::view::link;
use crate::view::state::{FilterChoice, FilterDim, ViewState};

#[derive(Args, Debug)]
pub struct LinkArgs {
    /// Decode an existing share string instead of building one.
    #[arg(
        long,
        value_name = "STRING",
        conflicts_with_all = ["select", "category", "role", "universe", "focus", "graph"]
    )]
    pub parse: Option<String>,

    /// Select a text by id or slug.
    #[arg(long, value_name = "KEY")]
    pub select: Option<String>,

    /// Pin the category filter.
    #[arg(long)]
    pub category: Option<String>,

    /// Pin the role filter.
    #[arg(long)]
    pub role: Option<String>,

    /// Pin the universe filter.
    #[arg(long)]
    pub universe: Option<String>,

    /// Turn focus mode on.
    #[arg(long)]
    pub focus: bool,

    /// Turn graph mode on.
    #[arg(long)]
    pub graph: bool,
}

// ---------------------------------------------------------------------------
// Public entry points
// ---------------------------------------------------------------------------

pub fn run(args: &LinkArgs) -> Result<()> {
    let root = archive::find_root()?;
    run_in(&root, args)
}

pub fn run_in(root: &Path, args: &LinkArgs) -> Result<()> {
    let corpus = codec::load_from(&archive::corpus_path(root))?;

    if let Some(input) = &args.parse {
        let state = link::decode(input, &corpus);
        print_state(&state, &corpus);
        return Ok(());
    }

    let state = state_from_args(args, &corpus)?;
    println!("{}", link::encode(&state, &corpus));
    Ok(())
}

// ---------------------------------------------------------------------------
// Computation (testable, no I/O)
// ---------------------------------------------------------------------------

fn state_from_args(args: &LinkArgs, corpus: &Corpus) -> Result<ViewState> {
    let mut state = ViewState::default();
    if let Some(key) = &args.select {
        let Some(record) = corpus.resolve(key) else {
            if let Some(hint) = check::closest_key_hint(key, corpus) {
                println!(
                    "  {}",
                    format!("hint: did you mean `{}`?", hint).dark_grey()
                );
            }
            bail!("no text matching `{}`", key);
        };
        state.selected_id = Some(record.id.clone());
    }
    state.filters.category = args
        .category
        .clone()
        .map(FilterChoice::Value)
        .unwrap_or_default();
    state.filters.role = args.role.clone().map(FilterChoice::Value).unwrap_or_default();
    state.filters.universe = args
        .universe
        .clone()
        .map(FilterChoice::Value)
        .unwrap_or_default();
    state.focus_mode = args.focus;
    state.graph_mode = args.graph;
    Ok(state)
}

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

fn print_state(state: &ViewState, corpus: &Corpus) {
    let selection = state
        .selected_id
        .as_deref()
        .and_then(|id| corpus.get(id))
        .map(|record| format!("{} ({})", record.slug, record.title))
        .unwrap_or_else(|| "none".to_string());

    println!("\n  {} {}", "selection:".dark_grey(), selection);
    for dim in FilterDim::ALL {
        println!(
            "  {} {}",
            format!("{}:", dim.key()).dark_grey(),
            state.filters.get(dim).label()
        );
    }
    println!("  {} {}", "focus:".dark_grey(), on_off(state.focus_mode));
    println!("  {} {}", "graph:".dark_grey(), on_off(state.graph_mode));
    println!(
        "  {} {}",
        "canonical:".dark_grey(),
        link::encode(state, corpus)
    );
}

fn on_off(flag: bool) -> &'static str {
    if flag { "on" } else { "off" }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
