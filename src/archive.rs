//! Paths and common operations for the `stemma/` catalog directory.

use std::path::{Path, PathBuf};

use anyhow::{Result, bail};

/// Walk upward from `start` to find the directory containing `stemma/corpus.json`.
pub fn find_root_from(start: &Path) -> Result<PathBuf> {
    let mut dir = start;
    loop {
        if dir.join("stemma").join("corpus.json").exists() {
            return Ok(dir.to_path_buf());
        }
        match dir.parent() {
            Some(parent) => dir = parent,
            None => bail!("no stemma catalog found — run `stemma init` to initialise this directory"),
        }
    }
}

/// Walk upward from the current working directory to find the catalog root.
pub fn find_root() -> Result<PathBuf> {
    let cwd = std::env::current_dir()?;
    find_root_from(&cwd)
}

pub fn stemma_dir(root: &Path) -> PathBuf {
    root.join("stemma")
}

pub fn corpus_path(root: &Path) -> PathBuf {
    root.join("stemma").join("corpus.json")
}

pub fn config_path(root: &Path) -> PathBuf {
    root.join("stemma").join("config")
}

/// The persisted shareable view string, rewritten by the TUI on every
/// state change and read back at startup.
pub fn link_path(root: &Path) -> PathBuf {
    root.join("stemma").join("view.link")
}

/// Read the saved view string, falling back to `/` when the file is
/// absent or unreadable.
pub fn read_link(root: &Path) -> String {
    match std::fs::read_to_string(link_path(root)) {
        Ok(content) => {
            let trimmed = content.trim();
            if trimmed.is_empty() {
                "/".to_string()
            } else {
                trimmed.to_string()
            }
        }
        Err(_) => "/".to_string(),
    }
}

pub fn write_link(root: &Path, link: &str) -> std::io::Result<()> {
    std::fs::write(link_path(root), format!("{}\n", link))
}
