//! # autocat Normalize
//!
//! Merchant-string normalization for the autocat categorization engine.
//!
//! Two stages, usable standalone by import pipelines:
//!
//! - [`Normalizer`] - strips statement-line noise (reference ids, dates,
//!   store numbers, locations, phone numbers, URLs) down to a lowercase
//!   comparable form
//! - [`Canonicalizer`] - maps normalized strings to canonical display names
//!   through a static alias table, with a title-case fallback
//!
//! ## Example
//!
//! ```rust
//! use autocat_normalize::{Canonicalizer, Normalizer};
//!
//! let normalizer = Normalizer::new();
//! let canonicalizer = Canonicalizer::new();
//!
//! let normalized = normalizer.normalize("TIM HORTONS #3421 TORONTO ON");
//! assert_eq!(normalized, "tim hortons");
//! assert_eq!(canonicalizer.canonicalize(&normalized), "Tim Hortons");
//! ```

pub mod alias;
pub mod normalizer;

pub use alias::Canonicalizer;
pub use normalizer::{Normalizer, UNKNOWN_MERCHANT};
