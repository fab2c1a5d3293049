//! The view controller: owns the view state and turns a corpus snapshot
//! into render instructions.
//!
//! The controller is synchronous and holds no cache. Callers apply a
//! state transition, then ask for a fresh [`RenderInstruction`]; every
//! instruction reflects exactly the corpus and state passed in.

use std::collections::HashSet;

use crate::corpus::markup::{self, Span};
use crate::corpus::model::TextRecord;
use crate::corpus::store::Corpus;
use crate::view::filter::{apply_filters, group_by_category};
use crate::view::layout::{Layout, LayoutOptions, compute_layout};
use crate::view::lineage::{Lineage, resolve_lineage, visible_set};
use crate::view::link;
use crate::view::state::{FilterChoice, FilterDim, ViewState};

// ---------------------------------------------------------------------------
// Render output
// ---------------------------------------------------------------------------

/// How a record relates to the current selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Highlight {
    None,
    /// The selected record itself.
    Active,
    /// The record the selection depends on.
    Ancestor,
    /// A record that depends on the selection.
    Descendant,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderItem {
    pub id: String,
    pub slug: String,
    pub title: String,
    pub role: String,
    pub universe: Option<String>,
    pub depends_on: Option<String>,
    pub highlight: Highlight,
    /// True when focus mode leaves this record outside the selection's
    /// lineage. The record keeps its list and layout position either way.
    pub hidden: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderGroup {
    pub category: String,
    pub items: Vec<RenderItem>,
}

/// Everything the detail pane needs for the selected record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailView {
    pub title: String,
    pub category: String,
    pub role: String,
    pub universe: Option<String>,
    pub depends_on: Option<String>,
    pub paragraphs: Vec<Vec<Span>>,
}

/// One full frame of view output.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderInstruction {
    /// Filtered records grouped by category, in first-appearance order.
    pub groups: Vec<RenderGroup>,
    /// The selected record, resolved against the whole corpus.
    pub detail: Option<DetailView>,
    /// Node positions and edges; present only in graph mode.
    pub layout: Option<Layout>,
    /// Shareable string for the current state.
    pub link: String,
    pub focus_mode: bool,
    pub graph_mode: bool,
}

// ---------------------------------------------------------------------------
// Controller
// ---------------------------------------------------------------------------

pub struct ViewController {
    pub state: ViewState,
    options: LayoutOptions,
}

impl ViewController {
    pub fn new(options: LayoutOptions) -> Self {
        Self {
            state: ViewState::default(),
            options,
        }
    }

    /// Restore state from a shareable string. Decoding is tolerant, so
    /// this never fails; unusable parts of the string fall back to the
    /// default state.
    pub fn from_link(input: &str, corpus: &Corpus, options: LayoutOptions) -> Self {
        Self {
            state: link::decode(input, corpus),
            options,
        }
    }

    /// Select a record by id. Ids not in the corpus are ignored.
    pub fn select(&mut self, corpus: &Corpus, id: &str) {
        if corpus.contains(id) {
            self.state.selected_id = Some(id.to_string());
        }
    }

    pub fn clear_selection(&mut self) {
        self.state.selected_id = None;
    }

    /// Pin or release one filter dimension. Every filter change drops
    /// the selection.
    pub fn set_filter(&mut self, dim: FilterDim, choice: FilterChoice) {
        self.state.filters.set(dim, choice);
        self.state.selected_id = None;
    }

    pub fn toggle_focus(&mut self) {
        self.state.focus_mode = !self.state.focus_mode;
    }

    pub fn toggle_graph(&mut self) {
        self.state.graph_mode = !self.state.graph_mode;
    }

    /// The shareable string for the current state.
    pub fn link(&self, corpus: &Corpus) -> String {
        link::encode(&self.state, corpus)
    }

    /// Produce one frame of render output.
    pub fn render(&self, corpus: &Corpus) -> RenderInstruction {
        let filtered = apply_filters(corpus.all(), &self.state.filters);

        // A selection can outlive its record, e.g. state restored from a
        // stale link. Treat it as no selection.
        let selected = self
            .state
            .selected_id
            .as_deref()
            .and_then(|id| corpus.get(id));

        let lineage = selected
            .map(|record| resolve_lineage(corpus.all(), &record.id))
            .unwrap_or_default();
        let visible = match (selected, self.state.focus_mode) {
            (Some(record), true) => Some(visible_set(corpus.all(), &record.id, true)),
            _ => None,
        };

        let groups = group_by_category(&filtered)
            .into_iter()
            .map(|(category, members)| RenderGroup {
                category,
                items: members
                    .into_iter()
                    .map(|record| item_for(record, selected, &lineage, visible.as_ref()))
                    .collect(),
            })
            .collect();

        let detail = selected.map(|record| DetailView {
            title: record.title.clone(),
            category: record.category.clone(),
            role: record.role.clone(),
            universe: record.universe.clone(),
            depends_on: record.depends_on.clone(),
            paragraphs: record
                .paragraphs
                .iter()
                .map(|paragraph| markup::parse_spans(paragraph))
                .collect(),
        });

        let layout = self
            .state
            .graph_mode
            .then(|| compute_layout(&filtered, &self.options));

        RenderInstruction {
            groups,
            detail,
            layout,
            link: link::encode(&self.state, corpus),
            focus_mode: self.state.focus_mode,
            graph_mode: self.state.graph_mode,
        }
    }
}

fn item_for(
    record: &TextRecord,
    selected: Option<&TextRecord>,
    lineage: &Lineage,
    visible: Option<&HashSet<String>>,
) -> RenderItem {
    let highlight = if selected.is_some_and(|s| s.id == record.id) {
        Highlight::Active
    } else if lineage.ancestor_id.as_deref() == Some(record.id.as_str()) {
        Highlight::Ancestor
    } else if lineage.descendant_ids.contains(&record.id) {
        Highlight::Descendant
    } else {
        Highlight::None
    };

    RenderItem {
        id: record.id.clone(),
        slug: record.slug.clone(),
        title: record.title.clone(),
        role: record.role.clone(),
        universe: record.universe.clone(),
        depends_on: record.depends_on.clone(),
        highlight,
        hidden: visible.is_some_and(|v| !v.contains(&record.id)),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::demo::demo_corpus;
    use crate::corpus::markup::Emphasis;

    fn controller() -> ViewController {
        ViewController::new(LayoutOptions::default())
    }

    fn item<'a>(frame: &'a RenderInstruction, id: &str) -> &'a RenderItem {
        frame
            .groups
            .iter()
            .flat_map(|g| g.items.iter())
            .find(|i| i.id == id)
            .unwrap_or_else(|| panic!("{} not in frame", id))
    }

    #[test]
    fn select_unknown_id_is_a_noop() {
        let corpus = demo_corpus();
        let mut vc = controller();
        vc.select(&corpus, "ghost");
        assert_eq!(vc.state.selected_id, None);

        vc.select(&corpus, "on-maps");
        vc.select(&corpus, "ghost");
        assert_eq!(vc.state.selected_id.as_deref(), Some("on-maps"));
    }

    #[test]
    fn filter_change_drops_selection() {
        let corpus = demo_corpus();
        let mut vc = controller();
        vc.select(&corpus, "the-hollow-crown");
        vc.set_filter(
            FilterDim::Category,
            FilterChoice::Value("Essay".to_string()),
        );
        assert_eq!(vc.state.selected_id, None);
        assert!(vc.render(&corpus).detail.is_none());
    }

    #[test]
    fn groups_follow_first_appearance_order() {
        let corpus = demo_corpus();
        let frame = controller().render(&corpus);
        let categories: Vec<&str> = frame.groups.iter().map(|g| g.category.as_str()).collect();
        assert_eq!(categories, vec!["Narrative", "Essay"]);
        assert_eq!(frame.groups[0].items.len(), 4);
        assert_eq!(frame.groups[1].items.len(), 3);
    }

    #[test]
    fn filtered_frame_drops_empty_groups() {
        let corpus = demo_corpus();
        let mut vc = controller();
        vc.set_filter(FilterDim::Role, FilterChoice::Value("Version".to_string()));
        let frame = vc.render(&corpus);
        assert_eq!(frame.groups.len(), 1);
        assert_eq!(frame.groups[0].category, "Narrative");
        assert_eq!(frame.groups[0].items[0].id, "the-hollow-crown-restored");
    }

    #[test]
    fn highlights_mark_selection_and_lineage() {
        let corpus = demo_corpus();
        let mut vc = controller();
        vc.select(&corpus, "winter-annals-thaw");
        let frame = vc.render(&corpus);

        assert_eq!(item(&frame, "winter-annals-thaw").highlight, Highlight::Active);
        assert_eq!(item(&frame, "winter-annals").highlight, Highlight::Ancestor);
        assert_eq!(item(&frame, "the-hollow-crown").highlight, Highlight::None);

        vc.select(&corpus, "the-hollow-crown");
        let frame = vc.render(&corpus);
        assert_eq!(item(&frame, "the-hollow-crown").highlight, Highlight::Active);
        assert_eq!(
            item(&frame, "the-hollow-crown-restored").highlight,
            Highlight::Descendant
        );
    }

    #[test]
    fn focus_mode_hides_records_outside_the_lineage() {
        let corpus = demo_corpus();
        let mut vc = controller();
        vc.select(&corpus, "the-hollow-crown");

        let frame = vc.render(&corpus);
        assert!(frame.groups.iter().flat_map(|g| g.items.iter()).all(|i| !i.hidden));

        vc.toggle_focus();
        let frame = vc.render(&corpus);
        assert!(!item(&frame, "the-hollow-crown").hidden);
        assert!(!item(&frame, "the-hollow-crown-restored").hidden);
        assert!(item(&frame, "winter-annals").hidden);
        // Depends on a record that no longer exists, not on the selection.
        assert!(item(&frame, "crown-commentary").hidden);
    }

    #[test]
    fn focus_without_selection_hides_nothing() {
        let corpus = demo_corpus();
        let mut vc = controller();
        vc.toggle_focus();
        let frame = vc.render(&corpus);
        assert!(frame.focus_mode);
        assert!(frame.groups.iter().flat_map(|g| g.items.iter()).all(|i| !i.hidden));
    }

    #[test]
    fn layout_is_present_only_in_graph_mode() {
        let corpus = demo_corpus();
        let mut vc = controller();
        assert!(vc.render(&corpus).layout.is_none());

        vc.toggle_graph();
        let layout = vc.render(&corpus).layout.unwrap();
        assert_eq!(layout.nodes.len(), corpus.len());
    }

    #[test]
    fn detail_parses_markup_paragraphs() {
        let corpus = demo_corpus();
        let mut vc = controller();
        vc.select(&corpus, "the-hollow-crown");
        let detail = vc.render(&corpus).detail.unwrap();

        assert_eq!(detail.title, "The Hollow Crown");
        assert_eq!(detail.paragraphs.len(), 2);
        assert!(
            detail.paragraphs[0]
                .iter()
                .any(|s| s.emphasis == Emphasis::Bold && s.text == "empty")
        );
    }

    #[test]
    fn link_tracks_state() {
        let corpus = demo_corpus();
        let mut vc = controller();
        vc.select(&corpus, "the-hollow-crown-restored");
        vc.toggle_focus();
        assert_eq!(
            vc.render(&corpus).link,
            "/the-hollow-crown-restored?focus=1"
        );
        assert_eq!(vc.link(&corpus), "/the-hollow-crown-restored?focus=1");
    }

    #[test]
    fn from_link_restores_state() {
        let corpus = demo_corpus();
        let vc = ViewController::from_link("/winter-annals?graph=1", &corpus, LayoutOptions::default());
        assert_eq!(vc.state.selected_id.as_deref(), Some("winter-annals"));
        let frame = vc.render(&corpus);
        assert!(frame.graph_mode);
        assert!(frame.layout.is_some());
    }

    #[test]
    fn stale_selection_renders_as_none() {
        let corpus = demo_corpus();
        let mut vc = controller();
        vc.state.selected_id = Some("deleted-long-ago".to_string());
        let frame = vc.render(&corpus);
        assert!(frame.detail.is_none());
        assert_eq!(frame.link, "/");
        assert!(
            frame
                .groups
                .iter()
                .flat_map(|g| g.items.iter())
                .all(|i| i.highlight == Highlight::None)
        );
    }
}
