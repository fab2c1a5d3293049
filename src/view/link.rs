//! Encoder and decoder for the shareable view string.
//!
//! A view string is a path segment carrying the selected record's slug
//! (`/` alone when nothing is selected) plus a query component with the
//! stable keys `category`, `role`, `universe` (omitted when "all"),
//! `focus=1` and `graph=1` (omitted when off), in that order.
//!
//! The central invariant: `decode(encode(state, corpus), corpus) == state`
//! for every state whose selection exists in the corpus. Decoding never
//! fails: unknown keys are ignored, a flag value other than exactly `1`
//! means off, malformed percent escapes stay literal, `+` in query values
//! reads as a space, and an unknown slug leaves the selection empty.

use std::borrow::Cow;

use crate::corpus::store::Corpus;
use crate::view::state::{FilterChoice, FilterDim, ViewState};

/// Encode the view state as a shareable string.
///
/// A selection whose id is no longer in the corpus encodes as no
/// selection; everything reachable through the controller has a live
/// selection, so this only matters for hand-built states.
pub fn encode(state: &ViewState, corpus: &Corpus) -> String {
    let mut out = String::from("/");
    if let Some(id) = &state.selected_id
        && let Some(record) = corpus.get(id)
    {
        out.push_str(&urlencoding::encode(&record.slug));
    }

    let mut pairs: Vec<String> = Vec::new();
    for dim in FilterDim::ALL {
        if let Some(value) = state.filters.get(dim).value() {
            pairs.push(format!("{}={}", dim.key(), urlencoding::encode(value)));
        }
    }
    if state.focus_mode {
        pairs.push("focus=1".to_string());
    }
    if state.graph_mode {
        pairs.push("graph=1".to_string());
    }

    if !pairs.is_empty() {
        out.push('?');
        out.push_str(&pairs.join("&"));
    }
    out
}

/// Decode a shareable string against the current corpus.
pub fn decode(input: &str, corpus: &Corpus) -> ViewState {
    let (path, query) = match input.split_once('?') {
        Some((path, query)) => (path, query),
        None => (input, ""),
    };

    let mut state = ViewState::default();

    let slug = decode_component(path.trim_start_matches('/'));
    if !slug.is_empty()
        && let Some(record) = corpus.get_by_slug(&slug)
    {
        state.selected_id = Some(record.id.clone());
    }

    for pair in query.split('&') {
        if pair.is_empty() {
            continue;
        }
        let (key, raw_value) = pair.split_once('=').unwrap_or((pair, ""));
        let value = decode_component(&raw_value.replace('+', " "));
        match key {
            "category" => state.filters.category = choice_from(value),
            "role" => state.filters.role = choice_from(value),
            "universe" => state.filters.universe = choice_from(value),
            "focus" => state.focus_mode = value == "1",
            "graph" => state.graph_mode = value == "1",
            _ => {}
        }
    }

    state
}

/// An empty filter value reads as "all"; encode never emits one.
fn choice_from(value: String) -> FilterChoice {
    if value.is_empty() {
        FilterChoice::All
    } else {
        FilterChoice::Value(value)
    }
}

fn decode_component(raw: &str) -> String {
    urlencoding::decode(raw)
        .map(Cow::into_owned)
        .unwrap_or_else(|_| raw.to_string())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
