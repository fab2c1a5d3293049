//! The explicit view state: selection, filters, and mode flags.
//!
//! Fully derivable from and to the shareable string in `view::link`. There
//! is no ambient state anywhere; every transition goes through
//! `view::controller` and receives this value.

use crate::corpus::model::TextRecord;

/// A filterable dimension of a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterDim {
    Category,
    Role,
    Universe,
}

impl FilterDim {
    pub const ALL: [FilterDim; 3] = [Self::Category, Self::Role, Self::Universe];

    /// The stable key used in the shareable string.
    pub fn key(self) -> &'static str {
        match self {
            Self::Category => "category",
            Self::Role => "role",
            Self::Universe => "universe",
        }
    }
}

/// One filter setting: pass everything, or pin one value.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FilterChoice {
    #[default]
    All,
    Value(String),
}

impl FilterChoice {
    pub fn is_all(&self) -> bool {
        matches!(self, Self::All)
    }

    pub fn value(&self) -> Option<&str> {
        match self {
            Self::All => None,
            Self::Value(v) => Some(v),
        }
    }

    /// Whether a record field passes this filter.
    ///
    /// An absent field (`None`) passes only `All`; a pinned value never
    /// matches a record that lacks the field.
    pub fn matches(&self, field: Option<&str>) -> bool {
        match self {
            Self::All => true,
            Self::Value(v) => field == Some(v.as_str()),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Self::All => "all",
            Self::Value(v) => v,
        }
    }
}

/// The three filter dimensions together.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Filters {
    pub category: FilterChoice,
    pub role: FilterChoice,
    pub universe: FilterChoice,
}

impl Filters {
    pub fn get(&self, dim: FilterDim) -> &FilterChoice {
        match dim {
            FilterDim::Category => &self.category,
            FilterDim::Role => &self.role,
            FilterDim::Universe => &self.universe,
        }
    }

    pub fn set(&mut self, dim: FilterDim, choice: FilterChoice) {
        match dim {
            FilterDim::Category => self.category = choice,
            FilterDim::Role => self.role = choice,
            FilterDim::Universe => self.universe = choice,
        }
    }

    pub fn matches(&self, record: &TextRecord) -> bool {
        self.category.matches(Some(&record.category))
            && self.role.matches(Some(&record.role))
            && self.universe.matches(record.universe.as_deref())
    }

    pub fn is_unfiltered(&self) -> bool {
        self.category.is_all() && self.role.is_all() && self.universe.is_all()
    }
}

/// The engine's current view. Equal states encode to equal share strings.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ViewState {
    pub selected_id: Option<String>,
    pub filters: Filters,
    /// When on, records outside the selection's lineage are hidden
    /// rather than merely de-emphasised.
    pub focus_mode: bool,
    /// Whether the 2-D graph layout is shown instead of the plain list.
    pub graph_mode: bool,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
