//! Async offload for server callers.
//!
//! Embedding is the one potentially slow, blocking step in the pipeline.
//! Servers must not run it on a request thread; this helper moves the whole
//! categorization onto a blocking worker so callers can await it.

use std::sync::Arc;

use tracing::warn;

use autocat_core::TransactionInput;

use crate::hybrid::{CategorizationResult, HybridCategorizer};

/// Categorize on a blocking worker thread of the current tokio runtime.
///
/// Degrades to the empty result if the worker task itself dies; `categorize`
/// has no failure path of its own.
pub async fn categorize_async(
    categorizer: Arc<HybridCategorizer>,
    input: TransactionInput,
) -> CategorizationResult {
    match tokio::task::spawn_blocking(move || categorizer.categorize(&input)).await {
        Ok(result) => result,
        Err(e) => {
            warn!(error = %e, "categorization worker task failed");
            CategorizationResult::none()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decision::Method;
    use autocat_core::MemoryStore;
    use autocat_embed::{HashingEmbedder, SimilarityEngine};
    use autocat_rules::RuleEngine;

    #[tokio::test(flavor = "multi_thread")]
    async fn test_categorize_async_matches_sync() {
        let store = Arc::new(MemoryStore::new());
        store.register_category("dining");
        let similarity = Arc::new(SimilarityEngine::new(
            Arc::new(HashingEmbedder::new()),
            store.clone(),
        ));
        let categorizer = Arc::new(HybridCategorizer::new(
            RuleEngine::builtin(),
            similarity,
            store,
        ));

        let input = TransactionInput::new("STARBUCKS COFFEE #12345", "Starbucks", -5.75);
        let sync = categorizer.categorize(&input);
        let result = categorize_async(categorizer.clone(), input).await;

        assert_eq!(result.method, Method::RuleBased);
        assert_eq!(result.method, sync.method);
        assert_eq!(result.confidence, sync.confidence);
    }
}
