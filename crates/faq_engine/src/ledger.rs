use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::model::{EffectiveTally, FaqRecord};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteDelta {
    pub helpful: u32,
    pub not_helpful: u32,
}

/// Votes cast during one session, keyed by record id. Additive only.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteLedger {
    entries: BTreeMap<String, VoteDelta>,
}

impl VoteLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ids are not checked against any catalog.
    pub fn record(&mut self, id: &str, helpful: bool) -> VoteDelta {
        let delta = self.entries.entry(id.to_string()).or_default();
        if helpful {
            delta.helpful = delta.helpful.saturating_add(1);
        } else {
            delta.not_helpful = delta.not_helpful.saturating_add(1);
        }
        *delta
    }

    pub fn delta(&self, id: &str) -> VoteDelta {
        self.entries.get(id).copied().unwrap_or_default()
    }

    pub fn tally_for(&self, record: &FaqRecord) -> EffectiveTally {
        let delta = self.delta(&record.id);
        EffectiveTally {
            helpful: record.helpful_count.saturating_add(delta.helpful),
            not_helpful: record.not_helpful_count.saturating_add(delta.not_helpful),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &VoteDelta)> {
        self.entries.iter().map(|(id, delta)| (id.as_str(), delta))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_entries_are_zero() {
        let ledger = VoteLedger::new();
        assert_eq!(ledger.delta("missing"), VoteDelta::default());
        assert!(ledger.is_empty());
    }

    #[test]
    fn votes_accumulate_per_direction() {
        let mut ledger = VoteLedger::new();
        ledger.record("1", true);
        ledger.record("1", true);
        let delta = ledger.record("1", false);

        assert_eq!(
            delta,
            VoteDelta {
                helpful: 2,
                not_helpful: 1
            }
        );
        assert_eq!(ledger.len(), 1);
    }

    #[test]
    fn unknown_ids_are_recorded() {
        let mut ledger = VoteLedger::new();
        ledger.record("does-not-exist", false);
        assert_eq!(ledger.delta("does-not-exist").not_helpful, 1);
    }
}
