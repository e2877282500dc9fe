//! # autocat Embed
//!
//! Embedding-similarity classification for the autocat engine.
//!
//! Classifies merchant text by k-nearest-neighbor voting over the classified
//! entries of the merchant knowledge base:
//!
//! - [`TextEmbedder`] - injectable text-to-vector seam, with the
//!   deterministic [`HashingEmbedder`] as the built-in provider
//! - [`TrainingSet`] - point-in-time snapshot of the classified knowledge
//!   base, shareable across processes through the durable cache tier
//! - [`SimilarityEngine`] - lazy two-tier caching, single-flight rebuild,
//!   top-K mean-similarity voting with best-neighbor confidence adjustment
//!
//! ## Example
//!
//! ```rust
//! use std::sync::Arc;
//! use autocat_core::{MemoryStore, MerchantKnowledgeEntry, Store};
//! use autocat_embed::{HashingEmbedder, SimilarityEngine};
//!
//! let store = Arc::new(MemoryStore::new());
//! let coffee = store.register_category("coffee");
//! store.upsert_entry(MerchantKnowledgeEntry::seed(
//!     "TIM HORTONS #3421",
//!     "tim hortons",
//!     Some(coffee),
//!     Some("coffee".to_string()),
//! )).unwrap();
//!
//! let engine = SimilarityEngine::new(Arc::new(HashingEmbedder::new()), store);
//! let outcome = engine.classify("tim hortons downtown").unwrap();
//! assert!(outcome.has_category());
//! ```

pub mod embedder;
pub mod engine;
pub mod training;

pub use embedder::{HashingEmbedder, TextEmbedder, DEFAULT_EMBEDDING_DIM};
pub use engine::{
    EmbeddingOutcome, SimilarityConfig, SimilarityEngine, CONFIDENCE_CAP, DEFAULT_STALENESS,
    STRONG_NEIGHBOR_BOOST, STRONG_NEIGHBOR_SIMILARITY, TOP_K, WEAK_NEIGHBOR_PENALTY,
    WEAK_NEIGHBOR_SIMILARITY,
};
pub use training::{TrainingExample, TrainingSet};
