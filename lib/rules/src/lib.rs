//! # autocat Rules
//!
//! Deterministic keyword-rule categorization for the autocat engine.
//!
//! A [`RuleEngine`] scans a prioritized table of [`CategorizationRule`]s
//! against a transaction's combined description and merchant text and
//! returns the first hit as a [`RuleMatch`]. Specific, high-precision brand
//! rules preempt generic ones through their priority; priority ties keep
//! declaration order.
//!
//! ## Example
//!
//! ```rust
//! use autocat_core::TransactionInput;
//! use autocat_rules::RuleEngine;
//!
//! let engine = RuleEngine::builtin();
//! let tx = TransactionInput::new("STARBUCKS COFFEE #12345", "Starbucks", -5.75);
//!
//! let m = engine.matches(&tx).unwrap();
//! assert_eq!(m.category_slug, "dining");
//! assert_eq!(m.confidence, 0.90);
//! ```

pub mod engine;
pub mod rule;
pub mod table;

pub use engine::{normalize_search_text, RuleEngine};
pub use rule::{CategorizationRule, RuleMatch};
pub use table::builtin_rules;
