//! Online learning from user corrections.
//!
//! The only write path into the merchant knowledge base: user corrections are
//! folded into knowledge entries (most-recent-correction-wins), then the
//! similarity engine's caches are invalidated so the next classification
//! sees the new examples.

use std::sync::Arc;

use ahash::AHashSet;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use autocat_core::{
    CategoryId, CorrectedTransaction, MerchantKnowledgeEntry, Result, Store,
    CORRECTION_CONFIDENCE,
};
use autocat_core::knowledge::KnowledgeSource;
use autocat_embed::SimilarityEngine;
use autocat_normalize::{Canonicalizer, Normalizer, UNKNOWN_MERCHANT};

/// Aggregate outcome of one training run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TrainingStats {
    pub corrections_considered: usize,
    pub entries_created: usize,
    pub entries_updated: usize,
    /// Knowledge-base size after the run.
    pub knowledge_size: usize,
}

enum Applied {
    Created,
    Updated,
    Unchanged,
}

/// Folds user corrections into the knowledge base.
///
/// Idempotent: a second run over the same corrections is a no-op. Runs
/// exclusively per learner instance so two overlapping runs cannot race on
/// the same merchant entry.
pub struct OnlineLearner {
    store: Arc<dyn Store>,
    similarity: Arc<SimilarityEngine>,
    normalizer: Normalizer,
    canonicalizer: Canonicalizer,
    run_lock: Mutex<()>,
}

impl OnlineLearner {
    #[must_use]
    pub fn new(store: Arc<dyn Store>, similarity: Arc<SimilarityEngine>) -> Self {
        Self {
            store,
            similarity,
            normalizer: Normalizer::new(),
            canonicalizer: Canonicalizer::new(),
            run_lock: Mutex::new(()),
        }
    }

    /// Fold all pending user corrections into the knowledge base, optionally
    /// scoped to one user.
    ///
    /// Corrections are deduplicated by normalized merchant name, keeping
    /// only the most recent verdict per merchant, and never overwrite an
    /// entry with an older correction. A failure on one merchant is logged
    /// and skipped; the rest of the run proceeds.
    pub fn train_from_corrections(&self, user_id: Option<&str>) -> Result<TrainingStats> {
        let _guard = self.run_lock.lock();

        let corrections = self.store.corrected_transactions(user_id)?;
        let mut stats = TrainingStats {
            corrections_considered: corrections.len(),
            ..TrainingStats::default()
        };

        // Rows arrive most-recent-first, so the first occurrence per
        // normalized merchant is the latest verdict.
        let mut seen = AHashSet::new();
        let mut changed = false;

        for correction in &corrections {
            let normalized = self.normalizer.normalize(&correction.merchant_name);
            if !seen.insert(normalized.clone()) {
                continue;
            }

            match self.apply_correction(&normalized, correction) {
                Ok(Applied::Created) => {
                    stats.entries_created += 1;
                    changed = true;
                }
                Ok(Applied::Updated) => {
                    stats.entries_updated += 1;
                    changed = true;
                }
                Ok(Applied::Unchanged) => {}
                Err(e) => {
                    warn!(
                        merchant = %correction.merchant_name,
                        error = %e,
                        "skipping correction"
                    );
                }
            }
        }

        if changed {
            self.similarity.invalidate();
        }

        stats.knowledge_size = self.store.knowledge_size()?;
        info!(
            considered = stats.corrections_considered,
            created = stats.entries_created,
            updated = stats.entries_updated,
            knowledge_size = stats.knowledge_size,
            "training from corrections complete"
        );
        Ok(stats)
    }

    /// Record a classification applied during import, creating a seed entry
    /// on first encounter of the merchant. Existing entries are never
    /// touched. Returns whether an entry was created.
    pub fn seed_classification(
        &self,
        merchant_name: &str,
        category_id: CategoryId,
        category_slug: Option<&str>,
    ) -> Result<bool> {
        let normalized = self.normalizer.normalize(merchant_name);
        if normalized == UNKNOWN_MERCHANT {
            return Ok(false);
        }
        if self.store.get_entry(merchant_name)?.is_some() {
            return Ok(false);
        }

        let display = self.canonicalizer.canonicalize(&normalized);
        let entry = MerchantKnowledgeEntry::seed(
            merchant_name,
            display,
            Some(category_id),
            category_slug.map(str::to_string),
        );
        self.store.upsert_entry(entry)?;
        Ok(true)
    }

    /// Drop the similarity engine's caches. Bulk importers call this once
    /// after seeding instead of paying a rebuild per entry.
    pub fn invalidate_cache(&self) {
        self.similarity.invalidate();
    }

    fn apply_correction(
        &self,
        normalized: &str,
        correction: &CorrectedTransaction,
    ) -> Result<Applied> {
        match self.store.get_entry(&correction.merchant_name)? {
            None => {
                let display = self.canonicalizer.canonicalize(normalized);
                let entry = MerchantKnowledgeEntry::from_correction(
                    correction.merchant_name.clone(),
                    display,
                    correction.category_id,
                    correction.category_slug.clone(),
                    correction.corrected_at,
                );
                self.store.upsert_entry(entry)?;
                Ok(Applied::Created)
            }
            Some(mut entry) => {
                if entry.category_id == Some(correction.category_id) {
                    return Ok(Applied::Unchanged);
                }
                if correction.corrected_at <= entry.updated_at {
                    debug!(
                        merchant = %correction.merchant_name,
                        "correction older than entry, not regressing"
                    );
                    return Ok(Applied::Unchanged);
                }

                if let Some(previous) = entry.category_id {
                    entry.record_previous_category(previous);
                }
                entry.category_id = Some(correction.category_id);
                entry.category_slug = correction.category_slug.clone();
                entry.confidence_score = CORRECTION_CONFIDENCE;
                entry.source = KnowledgeSource::UserCorrection;
                entry.updated_at = correction.corrected_at;
                self.store.upsert_entry(entry)?;
                Ok(Applied::Updated)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use autocat_core::{Error, MemoryStore};
    use autocat_embed::HashingEmbedder;
    use chrono::{Duration, Utc};

    fn learner_over(store: Arc<MemoryStore>) -> (OnlineLearner, Arc<SimilarityEngine>) {
        let similarity = Arc::new(SimilarityEngine::new(
            Arc::new(HashingEmbedder::new()),
            store.clone(),
        ));
        (OnlineLearner::new(store, similarity.clone()), similarity)
    }

    #[test]
    fn test_correction_creates_entry() {
        let store = Arc::new(MemoryStore::new());
        let coffee = store.register_category("coffee");
        store.push_correction(
            CorrectedTransaction::new("TIMS #42 TORONTO ON", coffee, Utc::now())
                .with_slug("coffee"),
        );
        let (learner, _) = learner_over(store.clone());

        let stats = learner.train_from_corrections(None).unwrap();
        assert_eq!(stats.corrections_considered, 1);
        assert_eq!(stats.entries_created, 1);
        assert_eq!(stats.entries_updated, 0);
        assert_eq!(stats.knowledge_size, 1);

        let entry = store.get_entry("TIMS #42 TORONTO ON").unwrap().unwrap();
        assert_eq!(entry.category_id, Some(coffee));
        assert_eq!(entry.confidence_score, CORRECTION_CONFIDENCE);
        assert_eq!(entry.source, KnowledgeSource::UserCorrection);
        // Normalized then canonicalized for display.
        assert_eq!(entry.normalized_name, "Tim Hortons");
    }

    #[test]
    fn test_training_is_idempotent() {
        let store = Arc::new(MemoryStore::new());
        let coffee = store.register_category("coffee");
        store.push_correction(CorrectedTransaction::new("STARBUCKS", coffee, Utc::now()));
        let (learner, _) = learner_over(store);

        let first = learner.train_from_corrections(None).unwrap();
        assert_eq!(first.entries_created, 1);

        let second = learner.train_from_corrections(None).unwrap();
        assert_eq!(second.entries_created, 0);
        assert_eq!(second.entries_updated, 0);
        assert_eq!(second.knowledge_size, 1);
    }

    #[test]
    fn test_latest_correction_wins_per_merchant() {
        let store = Arc::new(MemoryStore::new());
        let dining = store.register_category("dining");
        let groceries = store.register_category("groceries");
        let now = Utc::now();

        store.push_correction(CorrectedTransaction::new(
            "COSTCO WHOLESALE",
            dining,
            now - Duration::hours(3),
        ));
        store.push_correction(CorrectedTransaction::new("COSTCO WHOLESALE", groceries, now));
        let (learner, _) = learner_over(store.clone());

        let stats = learner.train_from_corrections(None).unwrap();
        assert_eq!(stats.entries_created, 1);

        let entry = store.get_entry("COSTCO WHOLESALE").unwrap().unwrap();
        assert_eq!(entry.category_id, Some(groceries));
    }

    #[test]
    fn test_stale_correction_does_not_regress_entry() {
        let store = Arc::new(MemoryStore::new());
        let dining = store.register_category("dining");
        let groceries = store.register_category("groceries");
        let now = Utc::now();

        let mut entry = MerchantKnowledgeEntry::from_correction(
            "LOBLAWS 1049",
            "Loblaws",
            groceries,
            Some("groceries".to_string()),
            now,
        );
        entry.updated_at = now;
        store.upsert_entry(entry).unwrap();

        // A correction older than the entry must not win.
        store.push_correction(CorrectedTransaction::new(
            "LOBLAWS 1049",
            dining,
            now - Duration::days(2),
        ));
        let (learner, _) = learner_over(store.clone());

        let stats = learner.train_from_corrections(None).unwrap();
        assert_eq!(stats.entries_updated, 0);
        let entry = store.get_entry("LOBLAWS 1049").unwrap().unwrap();
        assert_eq!(entry.category_id, Some(groceries));
    }

    #[test]
    fn test_newer_correction_overwrites_and_records_audit_trail() {
        let store = Arc::new(MemoryStore::new());
        let dining = store.register_category("dining");
        let groceries = store.register_category("groceries");
        let now = Utc::now();

        store
            .upsert_entry(MerchantKnowledgeEntry::from_correction(
                "FARM BOY 22",
                "Farm Boy",
                dining,
                Some("dining".to_string()),
                now - Duration::days(1),
            ))
            .unwrap();
        store.push_correction(
            CorrectedTransaction::new("FARM BOY 22", groceries, now).with_slug("groceries"),
        );
        let (learner, _) = learner_over(store.clone());

        let stats = learner.train_from_corrections(None).unwrap();
        assert_eq!(stats.entries_updated, 1);

        let entry = store.get_entry("FARM BOY 22").unwrap().unwrap();
        assert_eq!(entry.category_id, Some(groceries));
        assert_eq!(entry.category_slug.as_deref(), Some("groceries"));
        assert_eq!(entry.updated_at, now);
        let meta = entry.metadata.unwrap();
        assert_eq!(
            meta["previous_category_id"],
            serde_json::Value::String(dining.to_string())
        );
    }

    #[test]
    fn test_scope_filters_other_users() {
        let store = Arc::new(MemoryStore::new());
        let coffee = store.register_category("coffee");
        store.push_correction(
            CorrectedTransaction::new("TIM HORTONS", coffee, Utc::now()).with_user("alice"),
        );
        store.push_correction(
            CorrectedTransaction::new("STARBUCKS", coffee, Utc::now()).with_user("bob"),
        );
        let (learner, _) = learner_over(store.clone());

        let stats = learner.train_from_corrections(Some("alice")).unwrap();
        assert_eq!(stats.corrections_considered, 1);
        assert_eq!(stats.entries_created, 1);
        assert!(store.get_entry("STARBUCKS").unwrap().is_none());
    }

    #[test]
    fn test_training_invalidates_similarity_cache() {
        let store = Arc::new(MemoryStore::new());
        let coffee = store.register_category("coffee");
        let (learner, similarity) = learner_over(store.clone());

        // Build an (empty) snapshot first.
        let before = similarity.classify("tim hortons").unwrap();
        assert!(!before.has_category());

        store.push_correction(
            CorrectedTransaction::new("TIM HORTONS #1", coffee, Utc::now()).with_slug("coffee"),
        );
        learner.train_from_corrections(None).unwrap();

        let after = similarity.classify("tim hortons").unwrap();
        assert_eq!(after.category_id, Some(coffee));
    }

    #[test]
    fn test_one_bad_merchant_does_not_abort_the_run() {
        struct FlakyStore {
            inner: MemoryStore,
        }

        impl Store for FlakyStore {
            fn load_classified(&self) -> Result<Vec<MerchantKnowledgeEntry>> {
                self.inner.load_classified()
            }
            fn get_entry(&self, merchant_name: &str) -> Result<Option<MerchantKnowledgeEntry>> {
                if merchant_name == "BAD RECORD" {
                    return Err(Error::Store("row is corrupt".to_string()));
                }
                self.inner.get_entry(merchant_name)
            }
            fn upsert_entry(&self, entry: MerchantKnowledgeEntry) -> Result<()> {
                self.inner.upsert_entry(entry)
            }
            fn corrected_transactions(
                &self,
                user_id: Option<&str>,
            ) -> Result<Vec<CorrectedTransaction>> {
                self.inner.corrected_transactions(user_id)
            }
            fn resolve_category(&self, slug: &str) -> Option<CategoryId> {
                self.inner.resolve_category(slug)
            }
            fn resolve_subcategory(&self, slug: &str) -> Option<CategoryId> {
                self.inner.resolve_subcategory(slug)
            }
            fn knowledge_size(&self) -> Result<usize> {
                self.inner.knowledge_size()
            }
        }

        let inner = MemoryStore::new();
        let coffee = inner.register_category("coffee");
        inner.push_correction(CorrectedTransaction::new("BAD RECORD", coffee, Utc::now()));
        inner.push_correction(CorrectedTransaction::new("GOOD RECORD", coffee, Utc::now()));

        let store: Arc<dyn Store> = Arc::new(FlakyStore { inner });
        let similarity = Arc::new(SimilarityEngine::new(
            Arc::new(HashingEmbedder::new()),
            store.clone(),
        ));
        let learner = OnlineLearner::new(store.clone(), similarity);

        let stats = learner.train_from_corrections(None).unwrap();
        assert_eq!(stats.corrections_considered, 2);
        assert_eq!(stats.entries_created, 1);
        assert!(store.get_entry("GOOD RECORD").unwrap().is_some());
    }

    #[test]
    fn test_seed_classification_only_creates_once() {
        let store = Arc::new(MemoryStore::new());
        let gas = store.register_category("gas");
        let (learner, _) = learner_over(store.clone());

        assert!(learner
            .seed_classification("ESSO CALGARY AB", gas, Some("gas"))
            .unwrap());
        assert!(!learner
            .seed_classification("ESSO CALGARY AB", gas, Some("gas"))
            .unwrap());

        let entry = store.get_entry("ESSO CALGARY AB").unwrap().unwrap();
        assert_eq!(entry.source, KnowledgeSource::Seed);
        assert_eq!(entry.normalized_name, "Esso");
    }

    #[test]
    fn test_seed_classification_skips_unusable_merchants() {
        let store = Arc::new(MemoryStore::new());
        let gas = store.register_category("gas");
        let (learner, _) = learner_over(store.clone());

        assert!(!learner.seed_classification("#123", gas, None).unwrap());
        assert_eq!(store.knowledge_size().unwrap(), 0);
    }
}
