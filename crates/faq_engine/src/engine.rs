use std::cmp::Reverse;

use crate::catalog::Catalog;
use crate::config::EngineConfig;
use crate::ledger::VoteLedger;
use crate::model::{EffectiveTally, FaqRecord, QueryHit, QueryResults};
use crate::notify::{acknowledgment, Notifier};
use crate::query::{QueryState, SortBy};
use crate::retrieval::FuzzyIndex;

/// Read-only catalog plus its fuzzy index. Immutable once built, so one
/// engine can back any number of sessions.
#[derive(Debug, Clone)]
pub struct FaqEngine {
    catalog: Catalog,
    index: FuzzyIndex,
    config: EngineConfig,
}

impl FaqEngine {
    pub fn new(catalog: Catalog, config: EngineConfig) -> Self {
        let index = FuzzyIndex::build(catalog.records(), &config);
        Self {
            catalog,
            index,
            config,
        }
    }

    pub fn with_defaults(catalog: Catalog) -> Self {
        Self::new(catalog, EngineConfig::default())
    }

    /// A new engine over `catalog` with the same configuration.
    pub fn rebuild(&self, catalog: Catalog) -> Self {
        Self::new(catalog, self.config.clone())
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn categories(&self) -> Vec<String> {
        self.catalog.categories()
    }

    /// Preview shown on the help-center landing page.
    pub fn featured<'a>(&'a self, ledger: &VoteLedger) -> Vec<QueryHit<'a>> {
        self.featured_with_limit(self.config.featured_limit, ledger)
    }

    pub fn featured_with_limit<'a>(&'a self, limit: usize, ledger: &VoteLedger) -> Vec<QueryHit<'a>> {
        self.catalog
            .featured(limit)
            .iter()
            .map(|record| browse_hit(record, ledger))
            .collect()
    }

    /// An active search ignores the category filter entirely; the two are
    /// alternatives, not combined.
    pub fn query<'a>(&'a self, state: &QueryState, ledger: &VoteLedger) -> QueryResults<'a> {
        let records = self.catalog.records();
        let mut hits: Vec<QueryHit<'a>> = match state.active_search() {
            Some(term) => self
                .index
                .search(term)
                .into_iter()
                .filter_map(|m| {
                    let record = records.get(m.position)?;
                    Some(QueryHit {
                        record,
                        score: Some(m.score),
                        tally: ledger.tally_for(record),
                        matched_fields: m.fields,
                    })
                })
                .collect(),
            None => records
                .iter()
                .filter(|record| state.category.admits(&record.category))
                .map(|record| browse_hit(record, ledger))
                .collect(),
        };

        sort_hits(&mut hits, state.sort);
        tracing::debug!(
            search = state.search_term.as_str(),
            category = %state.category,
            sort = %state.sort,
            hits = hits.len(),
            "query evaluated"
        );

        QueryResults { hits }
    }

    pub fn tally(&self, ledger: &VoteLedger, id: &str) -> EffectiveTally {
        match self.catalog.get(id) {
            Some(record) => ledger.tally_for(record),
            None => {
                let delta = ledger.delta(id);
                EffectiveTally {
                    helpful: delta.helpful,
                    not_helpful: delta.not_helpful,
                }
            }
        }
    }

    /// Records one vote and returns the updated effective tally. Unknown ids
    /// are accepted; their votes are kept but never shown.
    pub fn cast_vote<N: Notifier>(
        &self,
        ledger: &mut VoteLedger,
        id: &str,
        helpful: bool,
        notifier: &mut N,
    ) -> EffectiveTally {
        ledger.record(id, helpful);
        let tally = self.tally(ledger, id);
        tracing::debug!(id, helpful, helpful_total = tally.helpful, "vote cast");
        notifier.notify(acknowledgment(helpful));
        tally
    }
}

fn browse_hit<'a>(record: &'a FaqRecord, ledger: &VoteLedger) -> QueryHit<'a> {
    QueryHit {
        record,
        score: None,
        tally: ledger.tally_for(record),
        matched_fields: Vec::new(),
    }
}

fn sort_hits(hits: &mut [QueryHit<'_>], sort: SortBy) {
    match sort {
        SortBy::Relevance => {}
        SortBy::Popular => hits.sort_by_key(|h| Reverse(h.tally.total())),
        SortBy::Recent => hits.sort_by_key(|h| Reverse(h.record.updated_at)),
        SortBy::Helpful => hits.sort_by_key(|h| Reverse(h.tally.helpful)),
        SortBy::Alphabetical => hits.sort_by_cached_key(|h| h.record.question.to_lowercase()),
    }
}
