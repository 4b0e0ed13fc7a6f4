use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::catalog::ALL_CATEGORIES;
use crate::error::{FaqError, Result};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoryFilter {
    #[default]
    All,
    Only(String),
}

impl CategoryFilter {
    /// `"all"` maps to [`CategoryFilter::All`]; anything else is an exact label.
    pub fn parse(value: &str) -> Self {
        if value == ALL_CATEGORIES {
            CategoryFilter::All
        } else {
            CategoryFilter::Only(value.to_string())
        }
    }

    pub fn admits(&self, category: &str) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(wanted) => wanted == category,
        }
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategoryFilter::All => f.write_str(ALL_CATEGORIES),
            CategoryFilter::Only(category) => f.write_str(category),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortBy {
    /// Catalog order for browsing, best match first for searches.
    #[default]
    Relevance,
    Popular,
    Recent,
    Helpful,
    Alphabetical,
}

impl SortBy {
    pub const ALL: [SortBy; 5] = [
        SortBy::Relevance,
        SortBy::Popular,
        SortBy::Recent,
        SortBy::Helpful,
        SortBy::Alphabetical,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SortBy::Relevance => "relevance",
            SortBy::Popular => "popular",
            SortBy::Recent => "recent",
            SortBy::Helpful => "helpful",
            SortBy::Alphabetical => "alphabetical",
        }
    }
}

impl fmt::Display for SortBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortBy {
    type Err = FaqError;

    fn from_str(s: &str) -> Result<Self> {
        SortBy::ALL
            .into_iter()
            .find(|sort| sort.as_str() == s)
            .ok_or_else(|| FaqError::InvalidSort(s.to_string()))
    }
}

/// Current search and filter intent of a session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryState {
    pub search_term: String,
    pub category: CategoryFilter,
    pub sort: SortBy,
}

impl QueryState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search(term: impl Into<String>) -> Self {
        Self {
            search_term: term.into(),
            ..Self::default()
        }
    }

    pub fn category(category: &str) -> Self {
        Self {
            category: CategoryFilter::parse(category),
            ..Self::default()
        }
    }

    pub fn with_sort(mut self, sort: SortBy) -> Self {
        self.sort = sort;
        self
    }

    /// Builds a state from loose `key=value` filters. Recognized keys are
    /// `search`, `category` and `sort`; later pairs override earlier ones.
    pub fn from_filters<I, K, V>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut state = Self::default();
        for (key, value) in pairs {
            let value = value.as_ref();
            match key.as_ref() {
                "search" => state.search_term = value.to_string(),
                "category" => state.category = CategoryFilter::parse(value),
                "sort" => state.sort = value.parse()?,
                other => return Err(FaqError::UnknownFilter(other.to_string())),
            }
        }
        Ok(state)
    }

    /// The search term with surrounding whitespace removed, if any is left.
    pub fn active_search(&self) -> Option<&str> {
        let term = self.search_term.trim();
        (!term.is_empty()).then_some(term)
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
