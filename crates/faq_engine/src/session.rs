use std::sync::Arc;

use crate::engine::FaqEngine;
use crate::ledger::VoteLedger;
use crate::model::{EffectiveTally, QueryResults};
use crate::notify::{LogNotifier, Notifier};
use crate::query::{CategoryFilter, QueryState, SortBy};

/// One viewer's query state and votes over a shared engine.
pub struct Session<N = LogNotifier> {
    engine: Arc<FaqEngine>,
    query: QueryState,
    ledger: VoteLedger,
    notifier: N,
}

impl Session<LogNotifier> {
    pub fn new(engine: Arc<FaqEngine>) -> Self {
        Self::with_notifier(engine, LogNotifier)
    }
}

impl<N: Notifier> Session<N> {
    pub fn with_notifier(engine: Arc<FaqEngine>, notifier: N) -> Self {
        Self {
            engine,
            query: QueryState::default(),
            ledger: VoteLedger::new(),
            notifier,
        }
    }

    pub fn engine(&self) -> &FaqEngine {
        &self.engine
    }

    pub fn state(&self) -> &QueryState {
        &self.query
    }

    pub fn set_state(&mut self, state: QueryState) {
        self.query = state;
    }

    pub fn set_search(&mut self, term: impl Into<String>) {
        self.query.search_term = term.into();
    }

    pub fn set_category(&mut self, category: &str) {
        self.query.category = CategoryFilter::parse(category);
    }

    pub fn set_sort(&mut self, sort: SortBy) {
        self.query.sort = sort;
    }

    pub fn clear_filters(&mut self) {
        self.query.clear();
    }

    pub fn query(&self) -> QueryResults<'_> {
        self.engine.query(&self.query, &self.ledger)
    }

    pub fn vote(&mut self, id: &str, helpful: bool) -> EffectiveTally {
        self.engine
            .cast_vote(&mut self.ledger, id, helpful, &mut self.notifier)
    }

    pub fn tally(&self, id: &str) -> EffectiveTally {
        self.engine.tally(&self.ledger, id)
    }

    pub fn ledger(&self) -> &VoteLedger {
        &self.ledger
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::notify::{RecordingNotifier, HELPFUL_ACK, NOT_HELPFUL_ACK};

    fn shared_engine() -> Arc<FaqEngine> {
        Arc::new(FaqEngine::with_defaults(Catalog::builtin().expect("builtin")))
    }

    #[test]
    fn sessions_do_not_share_votes() {
        let engine = shared_engine();
        let mut alice = Session::with_notifier(engine.clone(), RecordingNotifier::new());
        let bob = Session::with_notifier(engine, RecordingNotifier::new());

        assert_eq!(alice.vote("3", true).helpful, 235);
        assert_eq!(alice.tally("3").helpful, 235);
        assert_eq!(bob.tally("3").helpful, 234);
        assert!(bob.ledger().is_empty());
    }

    #[test]
    fn votes_show_up_in_query_results() {
        let mut session = Session::with_notifier(shared_engine(), RecordingNotifier::new());
        session.vote("2", false);
        session.vote("2", true);
        session.set_category("Payments");

        let results = session.query();
        assert_eq!(results.ids(), vec!["2"]);
        assert_eq!(results.hits[0].tally.helpful, 157);
        assert_eq!(results.hits[0].tally.not_helpful, 9);
        assert_eq!(session.notifier().messages(), &[NOT_HELPFUL_ACK, HELPFUL_ACK]);
    }

    #[test]
    fn clear_filters_restores_full_catalog() {
        let mut session = Session::with_notifier(shared_engine(), RecordingNotifier::new());
        session.set_search("zzzzqqqq");
        assert!(session.query().is_empty());

        session.clear_filters();
        assert_eq!(session.query().len(), 6);
        assert_eq!(session.state(), &QueryState::default());
    }

    #[test]
    fn sort_applies_to_session_queries() {
        let mut session = Session::with_notifier(shared_engine(), RecordingNotifier::new());
        for _ in 0..100 {
            session.vote("4", true);
        }
        session.set_sort(SortBy::Popular);
        assert_eq!(session.query().ids().first().copied(), Some("3"));

        for _ in 0..100 {
            session.vote("4", true);
        }
        assert_eq!(session.query().ids().first().copied(), Some("4"));
    }
}
