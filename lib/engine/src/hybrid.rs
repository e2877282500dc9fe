//! The hybrid categorizer: the one entry point callers use.

use std::sync::Arc;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use autocat_core::{CategoryId, Store, TransactionInput};
use autocat_embed::{EmbeddingOutcome, SimilarityEngine};
use autocat_rules::{RuleEngine, RuleMatch};

use crate::decision::{decide, Method};

/// Rule confidence at or above which the rule answer is accepted outright
/// and the embedding engine is never invoked. Inclusive boundary.
pub const RULE_ACCEPT_THRESHOLD: f32 = 0.80;

/// Results at or above this confidence may be applied silently.
pub const AUTO_APPLY_THRESHOLD: f32 = 0.90;

/// Results below [`AUTO_APPLY_THRESHOLD`] but at or above this one should be
/// applied and flagged for review; anything lower needs manual attention.
pub const REVIEW_THRESHOLD: f32 = 0.70;

/// What a caller should do with a result, per the confidence policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewAction {
    AutoApply,
    NeedsReview,
    Manual,
}

/// The final categorization decision returned to callers.
///
/// Diagnostic sub-results from every stage actually attempted ride along even
/// when they lost the vote, so callers can observe why a decision was made.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategorizationResult {
    pub category_id: Option<CategoryId>,
    pub subcategory_id: Option<CategoryId>,
    pub category_slug: Option<String>,
    pub subcategory_slug: Option<String>,
    pub confidence: f32,
    pub method: Method,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rule_match: Option<RuleMatch>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub embedding: Option<EmbeddingOutcome>,
}

impl CategorizationResult {
    /// The empty result: nothing matched anywhere.
    #[must_use]
    pub fn none() -> Self {
        Self {
            category_id: None,
            subcategory_id: None,
            category_slug: None,
            subcategory_slug: None,
            confidence: 0.0,
            method: Method::None,
            rule_match: None,
            embedding: None,
        }
    }

    /// Map the confidence onto the caller-facing review policy.
    #[must_use]
    pub fn review_action(&self) -> ReviewAction {
        if self.method == Method::None || self.confidence < REVIEW_THRESHOLD {
            ReviewAction::Manual
        } else if self.confidence < AUTO_APPLY_THRESHOLD {
            ReviewAction::NeedsReview
        } else {
            ReviewAction::AutoApply
        }
    }
}

/// Orchestrates the rule engine and the embedding similarity engine into a
/// single categorization decision.
///
/// Rules run first: they are cheap and deterministic, and a confident rule
/// hit skips the embedding stage entirely. Embedding failures are caught and
/// logged here; `categorize` always returns a result, never an error.
pub struct HybridCategorizer {
    rules: RuleEngine,
    similarity: Arc<SimilarityEngine>,
    store: Arc<dyn Store>,
}

impl HybridCategorizer {
    #[must_use]
    pub fn new(rules: RuleEngine, similarity: Arc<SimilarityEngine>, store: Arc<dyn Store>) -> Self {
        Self {
            rules,
            similarity,
            store,
        }
    }

    /// The shared similarity engine, e.g. for warm-up or invalidation.
    pub fn similarity(&self) -> &Arc<SimilarityEngine> {
        &self.similarity
    }

    /// Categorize one transaction. Total: every failure path degrades to a
    /// valid (possibly low-confidence or `none`) result.
    #[must_use]
    pub fn categorize(&self, input: &TransactionInput) -> CategorizationResult {
        let rule = self.rules.matches(input);

        if let Some(r) = &rule {
            if r.confidence >= RULE_ACCEPT_THRESHOLD {
                return self.rule_result(r.clone(), None, Method::RuleBased);
            }
        }

        let query = format!("{} {}", input.merchant_name, input.description);
        let embedding = match self.similarity.classify(&query) {
            Ok(outcome) => Some(outcome),
            Err(e) => {
                warn!(
                    merchant = %input.merchant_name,
                    error = %e,
                    "embedding stage unavailable, falling back to rule result"
                );
                None
            }
        };

        match decide(rule.as_ref(), embedding.as_ref()) {
            Method::Ml => self.embedding_result(rule, embedding),
            method @ (Method::RuleBased | Method::Hybrid) => match rule {
                Some(r) => self.rule_result(r, embedding, method),
                None => self.none_result(embedding),
            },
            Method::None => self.none_result(embedding),
        }
    }

    /// Categorize a batch. Transactions are independent and read-only with
    /// respect to shared state, so they run in parallel.
    #[must_use]
    pub fn categorize_batch(&self, inputs: &[TransactionInput]) -> Vec<CategorizationResult> {
        inputs.par_iter().map(|tx| self.categorize(tx)).collect()
    }

    fn rule_result(
        &self,
        rule: RuleMatch,
        embedding: Option<EmbeddingOutcome>,
        method: Method,
    ) -> CategorizationResult {
        let category_id = self.store.resolve_category(&rule.category_slug);
        if category_id.is_none() {
            debug!(slug = %rule.category_slug, "category slug not resolvable, returning null id");
        }
        let subcategory_id = rule
            .subcategory_slug
            .as_deref()
            .and_then(|slug| self.store.resolve_subcategory(slug));

        CategorizationResult {
            category_id,
            subcategory_id,
            category_slug: Some(rule.category_slug.clone()),
            subcategory_slug: rule.subcategory_slug.clone(),
            confidence: rule.confidence,
            method,
            rule_match: Some(rule),
            embedding,
        }
    }

    fn embedding_result(
        &self,
        rule: Option<RuleMatch>,
        embedding: Option<EmbeddingOutcome>,
    ) -> CategorizationResult {
        let outcome = match &embedding {
            Some(o) => o.clone(),
            // decide() never picks Ml without an outcome; degrade anyway.
            None => EmbeddingOutcome::none(),
        };

        CategorizationResult {
            category_id: outcome.category_id,
            subcategory_id: None,
            category_slug: outcome.category_slug.clone(),
            subcategory_slug: None,
            confidence: outcome.confidence,
            method: Method::Ml,
            rule_match: rule,
            embedding,
        }
    }

    fn none_result(&self, embedding: Option<EmbeddingOutcome>) -> CategorizationResult {
        CategorizationResult {
            embedding,
            ..CategorizationResult::none()
        }
    }
}
