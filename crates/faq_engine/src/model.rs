use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FaqRecord {
    pub id: String,
    pub question: String,
    pub answer: String,
    pub category: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub helpful_count: u32,
    #[serde(default)]
    pub not_helpful_count: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Indexed fields of a [`FaqRecord`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchField {
    Question,
    Answer,
    Tags,
}

impl SearchField {
    pub const ALL: [SearchField; 3] = [SearchField::Question, SearchField::Answer, SearchField::Tags];

    pub fn as_str(self) -> &'static str {
        match self {
            SearchField::Question => "question",
            SearchField::Answer => "answer",
            SearchField::Tags => "tags",
        }
    }
}

/// Baseline count plus session votes, as displayed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EffectiveTally {
    pub helpful: u32,
    pub not_helpful: u32,
}

impl EffectiveTally {
    pub fn total(&self) -> u32 {
        self.helpful.saturating_add(self.not_helpful)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct QueryHit<'a> {
    pub record: &'a FaqRecord,
    /// Fuzzy score in `[0, 1]`, lower is better. `None` when no search ran.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
    pub tally: EffectiveTally,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub matched_fields: Vec<SearchField>,
}

impl QueryHit<'_> {
    pub fn relevance(&self) -> Option<f64> {
        self.score.map(|s| 1.0 - s)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct QueryResults<'a> {
    pub hits: Vec<QueryHit<'a>>,
}

impl<'a> QueryResults<'a> {
    pub fn len(&self) -> usize {
        self.hits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hits.is_empty()
    }

    pub fn ids(&self) -> Vec<&'a str> {
        self.hits.iter().map(|h| h.record.id.as_str()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &QueryHit<'a>> {
        self.hits.iter()
    }
}
