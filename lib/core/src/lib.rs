//! # autocat Core
//!
//! Core library for the autocat transaction categorization engine.
//!
//! This crate provides the shared vocabulary and the seams to the outside
//! world:
//!
//! - [`Vector`] - Dense vector representation with cosine similarity
//! - [`TransactionInput`] / [`CorrectedTransaction`] - Per-call inputs
//! - [`MerchantKnowledgeEntry`] - The persisted, trainable merchant example
//! - [`Store`] - Persistence seam (knowledge base, corrections, slug lookup)
//! - [`TrainingCache`] - Cache seam for computed training-set embeddings
//!
//! In-memory reference implementations ([`MemoryStore`], [`MemoryCache`])
//! back tests and single-process deployments.

pub mod cache;
pub mod category;
pub mod error;
pub mod knowledge;
pub mod store;
pub mod transaction;
pub mod vector;

pub use cache::{MemoryCache, TrainingCache};
pub use category::CategoryId;
pub use error::{Error, Result};
pub use knowledge::{
    KnowledgeSource, MerchantKnowledgeEntry, CORRECTION_CONFIDENCE, SEED_CONFIDENCE,
};
pub use store::{MemoryStore, Store};
pub use transaction::{CorrectedTransaction, TransactionInput};
pub use vector::Vector;
