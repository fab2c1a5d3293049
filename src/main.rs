mod archive;
mod commands;
mod config;
mod corpus;
mod tui;
mod view;

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "stemma",
    about = "Catalog and browse a corpus of interdependent texts"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Initialise a stemma catalog in the current directory
    Init {
        /// Start from the built-in demo texts instead of an empty catalog
        #[arg(long)]
        seed: bool,
    },
    /// Add a text to the catalog
    Add(commands::add::AddArgs),
    /// Change fields of an existing text
    Edit(commands::edit::EditArgs),
    /// Remove a text (dependents keep their reference and go dangling)
    Rm {
        /// Id or slug of the text to remove
        key: String,
    },
    /// List texts grouped by category
    List {
        /// Keep only this category
        #[arg(long)]
        category: Option<String>,
        /// Keep only this role
        #[arg(long)]
        role: Option<String>,
        /// Keep only this universe
        #[arg(long)]
        universe: Option<String>,
        /// Print the matching records as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print one text in full
    Show {
        /// Id or slug of the text
        key: String,
    },
    /// Show what a text depends on and what depends on it
    Lineage {
        /// Id or slug of the text
        key: String,
    },
    /// Report dangling dependencies, cycles, and duplicate keys (read-only)
    Check,
    /// Build or inspect shareable view strings
    Link(commands::link::LinkArgs),
    /// Open the interactive catalog browser
    View {
        /// Start from a shareable view string instead of the saved one
        #[arg(long, value_name = "STRING")]
        at: Option<String>,
        /// Browse the built-in demo texts (no catalog required)
        #[arg(long)]
        demo: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Init { seed } => commands::init::run(seed),
        Command::Add(args) => commands::add::run(&args),
        Command::Edit(args) => commands::edit::run(&args),
        Command::Rm { key } => commands::rm::run(&key),
        Command::List {
            category,
            role,
            universe,
            json,
        } => commands::list::run(category, role, universe, json),
        Command::Show { key } => commands::show::run(&key),
        Command::Lineage { key } => commands::lineage::run(&key),
        Command::Check => commands::check::run(),
        Command::Link(args) => commands::link::run(&args),
        Command::View { at, demo } => commands::view::run(at, demo),
    }
}
