use anyhow::Result;

use crate::archive;
use crate::tui::browse;

pub fn run(at: Option<String>, demo: bool) -> Result<()> {
    if demo {
        return browse::run_demo(at);
    }
    let root = archive::find_root()?;
    browse::run(&root, at)
}
