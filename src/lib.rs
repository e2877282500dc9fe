//! # autocat
//!
//! A hybrid transaction auto-categorization engine for personal finance
//! applications.
//!
//! autocat assigns a category/subcategory to a bank transaction from its
//! merchant name, description, and amount through a layered pipeline:
//! deterministic keyword rules first, embedding-based nearest-neighbor
//! similarity second, with online learning from user corrections feeding the
//! similarity stage's knowledge base.
//!
//! ## Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//! use autocat::prelude::*;
//!
//! // Wire the engine over an in-memory store.
//! let store = Arc::new(MemoryStore::new());
//! store.register_category("dining");
//! let similarity = Arc::new(SimilarityEngine::new(
//!     Arc::new(HashingEmbedder::new()),
//!     store.clone(),
//! ));
//! let categorizer = HybridCategorizer::new(RuleEngine::builtin(), similarity, store);
//!
//! // Categorize a transaction.
//! let tx = TransactionInput::new("STARBUCKS COFFEE #12345", "Starbucks", -5.75);
//! let result = categorizer.categorize(&tx);
//! assert_eq!(result.method, Method::RuleBased);
//! assert_eq!(result.confidence, 0.90);
//! ```
//!
//! ## Crate Structure
//!
//! autocat is composed of several crates:
//!
//! - [`autocat-core`](https://docs.rs/autocat-core) - Vectors, knowledge-base
//!   types, store and cache seams
//! - [`autocat-normalize`](https://docs.rs/autocat-normalize) - Merchant
//!   statement-line cleanup and canonical aliases
//! - [`autocat-rules`](https://docs.rs/autocat-rules) - Prioritized keyword
//!   rule table and engine
//! - [`autocat-embed`](https://docs.rs/autocat-embed) - Embedding similarity
//!   classification with two-tier training-set caching
//! - [`autocat-engine`](https://docs.rs/autocat-engine) - Hybrid
//!   orchestration, async offload, online learner
//!
//! ## Features
//!
//! - **Layered decisions**: confident rule hits skip the embedding stage;
//!   otherwise the stronger of the two stages wins through an explicit
//!   decision table
//! - **Online learning**: user corrections become high-confidence knowledge
//!   entries and immediately reshape similarity search
//! - **Total entry point**: `categorize` never fails - degraded inputs and
//!   unavailable dependencies produce low-confidence or `none` results
//! - **Injectable seams**: store, cache, and embedding model are all traits,
//!   so servers bring their own database, shared cache, and ML model

// Re-export core types
pub use autocat_core::{
    CategoryId, CorrectedTransaction, Error, KnowledgeSource, MemoryCache, MemoryStore,
    MerchantKnowledgeEntry, Result, Store, TrainingCache, TransactionInput, Vector,
    CORRECTION_CONFIDENCE, SEED_CONFIDENCE,
};

// Re-export normalization
pub use autocat_normalize::{Canonicalizer, Normalizer, UNKNOWN_MERCHANT};

// Re-export rule matching
pub use autocat_rules::{builtin_rules, CategorizationRule, RuleEngine, RuleMatch};

// Re-export embedding similarity
pub use autocat_embed::{
    EmbeddingOutcome, HashingEmbedder, SimilarityConfig, SimilarityEngine, TextEmbedder,
};

// Re-export orchestration
pub use autocat_engine::{
    categorize_async, decide, CategorizationResult, HybridCategorizer, Method, OnlineLearner,
    ReviewAction, TrainingStats, AUTO_APPLY_THRESHOLD, REVIEW_THRESHOLD, RULE_ACCEPT_THRESHOLD,
};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        categorize_async, builtin_rules, Canonicalizer, CategorizationResult, CategorizationRule,
        CategoryId, CorrectedTransaction, EmbeddingOutcome, Error, HashingEmbedder,
        HybridCategorizer, KnowledgeSource, MemoryCache, MemoryStore, MerchantKnowledgeEntry,
        Method, Normalizer, OnlineLearner, Result, ReviewAction, RuleEngine, RuleMatch,
        SimilarityConfig, SimilarityEngine, Store, TextEmbedder, TrainingCache, TrainingStats,
        TransactionInput, Vector, UNKNOWN_MERCHANT,
    };
}
