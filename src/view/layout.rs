//! Deterministic 2-D layout for the graph view.
//!
//! Categories become columns in first-appearance order; records become
//! rows within their column in input order. Pure: repeated calls on the
//! same input produce identical output and the input is never mutated.

use std::collections::HashMap;

use crate::config::Config;
use crate::corpus::model::TextRecord;
use crate::view::filter::group_by_category;

/// Geometry constants for `compute_layout`, usually from `stemma/config`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutOptions {
    pub width: f64,
    pub base_offset: f64,
    pub row_spacing: f64,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            width: 800.0,
            base_offset: 50.0,
            row_spacing: 70.0,
        }
    }
}

impl LayoutOptions {
    pub fn from_config(config: &Config) -> Self {
        Self {
            width: config.layout_width,
            base_offset: config.base_offset,
            row_spacing: config.row_spacing,
        }
    }
}

/// One record placed on the plane.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedNode {
    pub id: String,
    pub x: f64,
    pub y: f64,
}

/// One dependency edge with both endpoints resolved to coordinates.
///
/// Runs from the dependent record (`from_id`) to its parent (`to_id`).
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutEdge {
    pub from_id: String,
    pub to_id: String,
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Layout {
    pub nodes: Vec<PlacedNode>,
    pub edges: Vec<LayoutEdge>,
}

/// Place the filtered records on the plane and resolve their edges.
///
/// Column x = `width / (columns + 1) * (column_index + 1)`, centering the
/// columns with equal margins. Row y = `base_offset + row * row_spacing`.
/// Edges whose parent is filtered out or dangling are omitted, never an
/// error.
pub fn compute_layout(records: &[&TextRecord], options: &LayoutOptions) -> Layout {
    let groups = group_by_category(records);
    let column_width = options.width / (groups.len() as f64 + 1.0);

    let mut nodes = Vec::with_capacity(records.len());
    let mut position_of: HashMap<&str, (f64, f64)> = HashMap::with_capacity(records.len());
    for (column, (_, members)) in groups.iter().enumerate() {
        let x = column_width * (column as f64 + 1.0);
        for (row, member) in members.iter().enumerate() {
            let y = options.base_offset + row as f64 * options.row_spacing;
            nodes.push(PlacedNode {
                id: member.id.clone(),
                x,
                y,
            });
            position_of.insert(member.id.as_str(), (x, y));
        }
    }

    let mut edges = Vec::new();
    for &record in records {
        let Some(target) = record.depends_on.as_deref() else {
            continue;
        };
        if let (Some(&(x1, y1)), Some(&(x2, y2))) = (
            position_of.get(record.id.as_str()),
            position_of.get(target),
        ) {
            edges.push(LayoutEdge {
                from_id: record.id.clone(),
                to_id: target.to_string(),
                x1,
                y1,
                x2,
                y2,
            });
        }
    }

    Layout { nodes, edges }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
