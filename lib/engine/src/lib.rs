//! # autocat Engine
//!
//! Orchestration layer for the autocat categorization engine.
//!
//! - [`HybridCategorizer`] - the single entry point callers use: runs the
//!   rule engine, short-circuits on confident rule hits, consults the
//!   embedding similarity engine otherwise, and resolves the winner through
//!   an explicit decision table
//! - [`decide`] / [`Method`] - the pure rule-vs-embedding decision table
//! - [`OnlineLearner`] - folds user corrections back into the merchant
//!   knowledge base and invalidates the similarity caches
//! - [`categorize_async`] - blocking-worker offload for server callers
//!
//! ## Example
//!
//! ```rust
//! use std::sync::Arc;
//! use autocat_core::{MemoryStore, TransactionInput};
//! use autocat_embed::{HashingEmbedder, SimilarityEngine};
//! use autocat_engine::{HybridCategorizer, Method};
//! use autocat_rules::RuleEngine;
//!
//! let store = Arc::new(MemoryStore::new());
//! store.register_category("dining");
//! let similarity = Arc::new(SimilarityEngine::new(
//!     Arc::new(HashingEmbedder::new()),
//!     store.clone(),
//! ));
//! let categorizer = HybridCategorizer::new(RuleEngine::builtin(), similarity, store);
//!
//! let tx = TransactionInput::new("STARBUCKS COFFEE #12345", "Starbucks", -5.75);
//! let result = categorizer.categorize(&tx);
//! assert_eq!(result.method, Method::RuleBased);
//! assert_eq!(result.confidence, 0.90);
//! ```

pub mod decision;
pub mod hybrid;
pub mod learner;
pub mod task;

pub use decision::{decide, Method};
pub use hybrid::{
    CategorizationResult, HybridCategorizer, ReviewAction, AUTO_APPLY_THRESHOLD,
    REVIEW_THRESHOLD, RULE_ACCEPT_THRESHOLD,
};
pub use learner::{OnlineLearner, TrainingStats};
pub use task::categorize_async;
