//! Nearest-neighbor similarity classification.

use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::{Mutex, RwLock};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use autocat_core::{CategoryId, Result, Store, TrainingCache};

use crate::embedder::TextEmbedder;
use crate::training::{TrainingExample, TrainingSet};

/// Neighbors consulted per classification.
pub const TOP_K: usize = 5;

/// Best-neighbor similarity above which confidence gets a boost.
/// Empirically tuned thresholds; knobs, not derived truths.
pub const STRONG_NEIGHBOR_SIMILARITY: f32 = 0.85;

/// Confidence boost applied above [`STRONG_NEIGHBOR_SIMILARITY`].
pub const STRONG_NEIGHBOR_BOOST: f32 = 0.10;

/// Ceiling for boosted confidence.
pub const CONFIDENCE_CAP: f32 = 0.95;

/// Best-neighbor similarity below which confidence is penalized.
pub const WEAK_NEIGHBOR_SIMILARITY: f32 = 0.60;

/// Multiplier applied below [`WEAK_NEIGHBOR_SIMILARITY`].
pub const WEAK_NEIGHBOR_PENALTY: f32 = 0.7;

/// Default in-process staleness window for the training set.
pub const DEFAULT_STALENESS: Duration = Duration::from_secs(300);

/// Configuration for a similarity engine
#[derive(Debug, Clone)]
pub struct SimilarityConfig {
    /// Neighbors consulted per query.
    pub top_k: usize,
    /// How long the in-process training set is reused before a re-read.
    pub staleness: Duration,
    /// Durable-cache key for the encoded training set. No TTL: the durable
    /// tier is only ever dropped by explicit invalidation.
    pub cache_key: String,
}

impl Default for SimilarityConfig {
    fn default() -> Self {
        Self {
            top_k: TOP_K,
            staleness: DEFAULT_STALENESS,
            cache_key: "autocat:training-set:v1".to_string(),
        }
    }
}

/// Outcome of an embedding classification. Diagnostic fields are populated
/// even when the hybrid layer discards the prediction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingOutcome {
    pub category_id: Option<CategoryId>,
    pub category_slug: Option<String>,
    pub confidence: f32,
    /// Normalized name of the single best neighbor.
    pub nearest_name: Option<String>,
    /// Raw cosine similarity of the single best neighbor.
    pub nearest_similarity: f32,
}

impl EmbeddingOutcome {
    /// Zero-confidence outcome for an empty training set.
    #[must_use]
    pub fn none() -> Self {
        Self {
            category_id: None,
            category_slug: None,
            confidence: 0.0,
            nearest_name: None,
            nearest_similarity: 0.0,
        }
    }

    #[inline]
    pub fn has_category(&self) -> bool {
        self.category_id.is_some()
    }
}

struct CachedSet {
    set: Arc<TrainingSet>,
    built_at: Instant,
}

/// K-nearest-neighbor classifier over the merchant knowledge base.
///
/// The training set is built lazily from the store and held in two tiers: an
/// in-process snapshot reused within a bounded staleness window, and an
/// optional durable cache shared across process instances. Rebuilds are
/// single-flight: concurrent misses wait on one rebuild instead of each
/// re-embedding the whole knowledge base.
pub struct SimilarityEngine {
    embedder: Arc<dyn TextEmbedder>,
    store: Arc<dyn Store>,
    cache: Option<Arc<dyn TrainingCache>>,
    config: SimilarityConfig,
    training: RwLock<Option<CachedSet>>,
    rebuild_lock: Mutex<()>,
}

impl SimilarityEngine {
    #[must_use]
    pub fn new(embedder: Arc<dyn TextEmbedder>, store: Arc<dyn Store>) -> Self {
        Self::with_config(embedder, store, None, SimilarityConfig::default())
    }

    #[must_use]
    pub fn with_config(
        embedder: Arc<dyn TextEmbedder>,
        store: Arc<dyn Store>,
        cache: Option<Arc<dyn TrainingCache>>,
        config: SimilarityConfig,
    ) -> Self {
        Self {
            embedder,
            store,
            cache,
            config,
            training: RwLock::new(None),
            rebuild_lock: Mutex::new(()),
        }
    }

    /// Initialize the embedder and pre-build the training set.
    pub fn warm_up(&self) -> Result<()> {
        self.embedder.warm_up()?;
        self.training_set().map(|_| ())
    }

    /// Classify text against the knowledge base.
    ///
    /// Embeds the query, votes over the top-K neighbors by per-category mean
    /// similarity, then adjusts the winning mean by the best neighbor's
    /// strength. An empty training set yields a zero-confidence outcome, not
    /// an error.
    pub fn classify(&self, text: &str) -> Result<EmbeddingOutcome> {
        let set = self.training_set()?;
        if set.is_empty() {
            return Ok(EmbeddingOutcome::none());
        }

        let query = self.embedder.embed(text)?;

        let mut scored: Vec<(f32, &TrainingExample)> = set
            .examples
            .iter()
            .map(|ex| (query.cosine_similarity(&ex.embedding), ex))
            .collect();
        scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));
        scored.truncate(self.config.top_k);

        // Vote: group the neighbors by category and weigh each group by its
        // mean similarity, not its best member, so one lucky neighbor cannot
        // outvote a consistent cluster.
        let mut votes: Vec<(CategoryId, f32, usize)> = Vec::new();
        for (sim, ex) in &scored {
            match votes.iter_mut().find(|(id, _, _)| *id == ex.category_id) {
                Some((_, total, count)) => {
                    *total += sim;
                    *count += 1;
                }
                None => votes.push((ex.category_id, *sim, 1)),
            }
        }

        let Some((winner, total, count)) = votes.into_iter().max_by(|a, b| {
            let mean_a = a.1 / a.2 as f32;
            let mean_b = b.1 / b.2 as f32;
            mean_a.partial_cmp(&mean_b).unwrap_or(std::cmp::Ordering::Equal)
        }) else {
            return Ok(EmbeddingOutcome::none());
        };
        let mean = total / count as f32;

        let (best_similarity, best_example) = (scored[0].0, scored[0].1);

        let mut confidence = mean;
        if best_similarity > STRONG_NEIGHBOR_SIMILARITY {
            confidence = (confidence + STRONG_NEIGHBOR_BOOST).min(CONFIDENCE_CAP);
        } else if best_similarity < WEAK_NEIGHBOR_SIMILARITY {
            confidence *= WEAK_NEIGHBOR_PENALTY;
        }
        confidence = confidence.clamp(0.0, 1.0);

        let category_slug = set
            .examples
            .iter()
            .find(|ex| ex.category_id == winner)
            .and_then(|ex| ex.category_slug.clone());

        Ok(EmbeddingOutcome {
            category_id: Some(winner),
            category_slug,
            confidence,
            nearest_name: Some(best_example.normalized_name.clone()),
            nearest_similarity: best_similarity,
        })
    }

    /// Drop both cache tiers so the next classification rebuilds from the
    /// store. Called by the online learner after it mutates the knowledge
    /// base.
    pub fn invalidate(&self) {
        *self.training.write() = None;
        if let Some(cache) = &self.cache {
            cache.invalidate(&self.config.cache_key);
        }
        debug!("training set invalidated");
    }

    /// Number of examples currently cached, if a snapshot is loaded.
    pub fn cached_examples(&self) -> Option<usize> {
        self.training.read().as_ref().map(|c| c.set.len())
    }

    fn training_set(&self) -> Result<Arc<TrainingSet>> {
        if let Some(set) = self.fresh_snapshot() {
            return Ok(set);
        }

        // Single-flight: one rebuild at a time; everyone else queues here
        // and re-checks before doing any work.
        let _guard = self.rebuild_lock.lock();
        if let Some(set) = self.fresh_snapshot() {
            return Ok(set);
        }

        let set = Arc::new(self.rebuild()?);
        *self.training.write() = Some(CachedSet {
            set: set.clone(),
            built_at: Instant::now(),
        });
        Ok(set)
    }

    fn fresh_snapshot(&self) -> Option<Arc<TrainingSet>> {
        let guard = self.training.read();
        match guard.as_ref() {
            Some(cached) if cached.built_at.elapsed() < self.config.staleness => {
                Some(cached.set.clone())
            }
            _ => None,
        }
    }

    fn rebuild(&self) -> Result<TrainingSet> {
        if let Some(cache) = &self.cache {
            if let Some(bytes) = cache.get(&self.config.cache_key) {
                match TrainingSet::decode(&bytes) {
                    Ok(set) => {
                        debug!(examples = set.len(), "training set loaded from durable cache");
                        return Ok(set);
                    }
                    Err(e) => warn!("discarding undecodable cached training set: {e}"),
                }
            }
        }

        let entries = self.store.load_classified()?;
        let mut examples = Vec::with_capacity(entries.len());
        for entry in entries {
            let category_id = match entry.category_id {
                Some(id) => id,
                None => continue,
            };
            // Reuse the entry's cached embedding when it matches the current
            // model; anything else is recomputed from the normalized name.
            let embedding = match entry.embedding {
                Some(v) if v.dim() == self.embedder.dim() => v,
                _ => self.embedder.embed(&entry.normalized_name)?,
            };
            examples.push(TrainingExample {
                normalized_name: entry.normalized_name,
                category_id,
                category_slug: entry.category_slug,
                embedding,
            });
        }

        let set = TrainingSet { examples };
        debug!(examples = set.len(), "training set rebuilt from store");

        if let Some(cache) = &self.cache {
            match set.encode() {
                Ok(bytes) => cache.set(&self.config.cache_key, bytes, None),
                Err(e) => warn!("failed to encode training set for durable cache: {e}"),
            }
        }

        Ok(set)
    }
}
