//! View filter.
//!
//! The filter is never persisted. It is derived once per request and selects
//! which subset of tasks the index page shows.

use serde::{Serialize, Serializer};

/// Name of the query parameter that carries the filter.
pub const FILTER_PARAM: &str = "filter";

/// Subset of tasks shown by the index view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Filter {
    /// Every task. Also the value for "no filter set".
    #[default]
    All,
    /// Tasks that are not completed.
    Active,
    /// Tasks that are completed.
    Completed,
}

impl Filter {
    /// Every variant, in display order.
    pub const VARIANTS: [Self; 3] = [Self::All, Self::Active, Self::Completed];

    /// Interprets a raw query parameter value.
    ///
    /// Only the exact literals `active` and `completed` select a subset;
    /// anything else, `all` included, means `All`.
    #[must_use]
    pub fn from_param(value: &str) -> Self {
        match value {
            "active" => Self::Active,
            "completed" => Self::Completed,
            _ => Self::All,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Active => "active",
            Self::Completed => "completed",
        }
    }

    /// Completion flag selected by this filter, `None` for every task.
    #[must_use]
    pub const fn completion(self) -> Option<bool> {
        match self {
            Self::All => None,
            Self::Active => Some(false),
            Self::Completed => Some(true),
        }
    }

    #[must_use]
    pub const fn is_all(self) -> bool {
        matches!(self, Self::All)
    }
}

impl std::fmt::Display for Filter {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl Serialize for Filter {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}
