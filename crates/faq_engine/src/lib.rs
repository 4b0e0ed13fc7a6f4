//! FAQ retrieval for the help center: a fixed catalog, category browsing,
//! typo-tolerant search and per-session helpful / not-helpful voting.

pub mod catalog;
pub mod config;
pub mod engine;
pub mod error;
pub mod fuzzy;
pub mod ledger;
pub mod model;
pub mod notify;
pub mod query;
pub mod retrieval;
pub mod session;
pub mod storage;

pub use catalog::{Catalog, ALL_CATEGORIES};
pub use config::{
    EngineConfig, DEFAULT_DISTANCE, DEFAULT_FEATURED_LIMIT, DEFAULT_LOCATION,
    DEFAULT_MAX_PATTERN_CHUNK, DEFAULT_THRESHOLD,
};
pub use engine::FaqEngine;
pub use error::{FaqError, Result};
pub use ledger::{VoteDelta, VoteLedger};
pub use model::{EffectiveTally, FaqRecord, QueryHit, QueryResults, SearchField};
pub use notify::{
    acknowledgment, LogNotifier, Notifier, RecordingNotifier, HELPFUL_ACK, NOT_HELPFUL_ACK,
};
pub use query::{CategoryFilter, QueryState, SortBy};
pub use retrieval::{FuzzyIndex, ScoredMatch};
pub use session::Session;
pub use storage::{load_catalog_jsonl, parse_catalog_jsonl, save_catalog_jsonl};
