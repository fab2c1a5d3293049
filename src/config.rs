//! Line-based `key: value` configuration for `stemma/config`.
//!
//! Blank lines and `#` comments are skipped; unknown keys are ignored so
//! older binaries keep working on newer files.

use std::path::Path;

use anyhow::{Result, bail};

use crate::archive;

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Total layout width for the graph view, in abstract units.
    pub layout_width: f64,
    /// Vertical offset of the first row in each category column.
    pub base_offset: f64,
    /// Vertical spacing between rows within a category column.
    pub row_spacing: f64,
    /// Warn when `add`/`edit`/`rm` leaves a dangling `depends_on` reference.
    pub warn_dangling: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            layout_width: 800.0,
            base_offset: 50.0,
            row_spacing: 70.0,
            warn_dangling: true,
        }
    }
}

pub const DEFAULT_CONTENTS: &str = "\
# stemma configuration
# Edit manually; every command reads it at startup.

# Total layout width for the graph view, in abstract units
layout_width: 800

# Vertical offset of the first row in each category column
base_offset: 50

# Vertical spacing between rows within a category column
row_spacing: 70

# Warn when add/edit/rm leaves a dangling depends_on reference
warn_dangling: true
";

/// Parse `stemma/config` text.
pub fn parse(input: &str) -> Result<Config> {
    let mut config = Config::default();

    for (line_num, raw) in input.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let Some((key, value)) = line.split_once(':') else {
            bail!("invalid config line {} (expected `key: value`)", line_num + 1);
        };
        let value = value.trim();
        match key.trim() {
            "layout_width" => config.layout_width = parse_number(value, "layout_width", line_num)?,
            "base_offset" => config.base_offset = parse_number(value, "base_offset", line_num)?,
            "row_spacing" => config.row_spacing = parse_number(value, "row_spacing", line_num)?,
            "warn_dangling" => config.warn_dangling = parse_bool(value, "warn_dangling", line_num)?,
            _ => {}
        }
    }

    Ok(config)
}

pub fn serialize(config: &Config) -> String {
    format!(
        "\
# stemma configuration
# Edit manually; every command reads it at startup.

# Total layout width for the graph view, in abstract units
layout_width: {}

# Vertical offset of the first row in each category column
base_offset: {}

# Vertical spacing between rows within a category column
row_spacing: {}

# Warn when add/edit/rm leaves a dangling depends_on reference
warn_dangling: {}
",
        config.layout_width, config.base_offset, config.row_spacing, config.warn_dangling
    )
}

/// Load the config for the catalog at `root`, or defaults if the file is absent.
pub fn load(root: &Path) -> Result<Config> {
    let path = archive::config_path(root);
    if !path.exists() {
        return Ok(Config::default());
    }
    let content = std::fs::read_to_string(path)?;
    parse(&content)
}

fn parse_number(value: &str, key: &str, line_num: usize) -> Result<f64> {
    match value.parse::<f64>() {
        Ok(n) if n.is_finite() && n > 0.0 => Ok(n),
        _ => bail!(
            "invalid value for {} at line {} (expected a positive number, got `{}`)",
            key,
            line_num + 1,
            value
        ),
    }
}

fn parse_bool(value: &str, key: &str, line_num: usize) -> Result<bool> {
    match value {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => bail!(
            "invalid value for {} at line {} (expected true or false, got `{}`)",
            key,
            line_num + 1,
            value
        ),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
