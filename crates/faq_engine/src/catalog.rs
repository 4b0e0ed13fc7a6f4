use std::collections::HashSet;
use std::path::Path;

use crate::error::{FaqError, Result};
use crate::model::FaqRecord;
use crate::storage::{load_catalog_jsonl, parse_catalog_jsonl};

/// Sentinel category that disables category filtering.
pub const ALL_CATEGORIES: &str = "all";

const BUILTIN_FAQS: &str = include_str!("../data/faqs.jsonl");

/// Fixed, ordered collection of FAQ records. Never mutated after construction.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    records: Vec<FaqRecord>,
}

impl Catalog {
    pub fn new(records: Vec<FaqRecord>) -> Result<Self> {
        let mut seen = HashSet::with_capacity(records.len());
        for record in &records {
            if !seen.insert(record.id.as_str()) {
                return Err(FaqError::DuplicateId(record.id.clone()));
            }
        }
        Ok(Self { records })
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// The mock help-center catalog shipped with the crate.
    pub fn builtin() -> Result<Self> {
        Self::new(parse_catalog_jsonl(BUILTIN_FAQS.as_bytes())?)
    }

    pub fn from_jsonl(path: &Path) -> Result<Self> {
        Self::new(load_catalog_jsonl(path)?)
    }

    pub fn records(&self) -> &[FaqRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&FaqRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    /// `"all"` followed by each distinct category in first-seen order.
    pub fn categories(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        let mut out = vec![ALL_CATEGORIES.to_string()];
        for record in &self.records {
            if seen.insert(record.category.as_str()) {
                out.push(record.category.clone());
            }
        }
        out
    }

    pub fn featured(&self, limit: usize) -> &[FaqRecord] {
        &self.records[..limit.min(self.records.len())]
    }
}
