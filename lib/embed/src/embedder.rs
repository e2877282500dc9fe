//! Text embedding seam.
//!
//! The similarity engine treats the embedding model as a black box: anything
//! producing normalized vectors of consistent dimensionality plugs in. The
//! built-in [`HashingEmbedder`] is deterministic and dependency-free, which
//! makes it the default for tests and for deployments without an ML model;
//! swapping in a sentence-transformer service is a one-impl change.

use autocat_core::{Result, Vector};
use std::collections::HashSet;

/// Default dimension for hash-based embeddings
pub const DEFAULT_EMBEDDING_DIM: usize = 64;

/// A text-to-vector feature extractor.
///
/// Implementations must be deterministic enough that the same text maps to
/// the same region of the space across calls, and must be safe to share
/// across threads. Injected into the similarity engine at construction so
/// tests can substitute fakes without touching global state.
pub trait TextEmbedder: Send + Sync {
    /// Fixed output dimensionality.
    fn dim(&self) -> usize;

    /// Embed text into a fixed-length vector.
    fn embed(&self, text: &str) -> Result<Vector>;

    /// Load or initialize the underlying model. Lazy providers do their
    /// expensive setup here rather than on the first `embed` call.
    fn warm_up(&self) -> Result<()> {
        Ok(())
    }
}

/// Hash-based embedder: character trigrams plus word-level hashing into a
/// normalized fixed-size vector.
///
/// Simple but effective for merchant strings, where near-duplicates differ
/// by store numbers and truncation rather than by vocabulary.
#[derive(Debug, Clone)]
pub struct HashingEmbedder {
    dim: usize,
}

impl HashingEmbedder {
    #[must_use]
    pub fn new() -> Self {
        Self {
            dim: DEFAULT_EMBEDDING_DIM,
        }
    }

    #[must_use]
    pub fn with_dim(dim: usize) -> Self {
        Self { dim }
    }
}

impl Default for HashingEmbedder {
    fn default() -> Self {
        Self::new()
    }
}

impl TextEmbedder for HashingEmbedder {
    fn dim(&self) -> usize {
        self.dim
    }

    fn embed(&self, text: &str) -> Result<Vector> {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};

        let mut components = vec![0.0f32; self.dim];
        let normalized = text.to_lowercase();

        for trigram in generate_trigrams(&normalized) {
            let mut hasher = DefaultHasher::new();
            trigram.hash(&mut hasher);
            let pos = (hasher.finish() as usize) % self.dim;
            components[pos] += 1.0;
        }

        // Whole words carry more signal than individual trigrams.
        for word in normalized.split_whitespace() {
            let mut hasher = DefaultHasher::new();
            word.hash(&mut hasher);
            let pos = (hasher.finish() as usize) % self.dim;
            components[pos] += 2.0;
        }

        let mut vector = Vector::new(components);
        vector.normalize();
        Ok(vector)
    }
}

/// Generate character trigrams from a string, padded so short tokens still
/// produce a signal.
fn generate_trigrams(s: &str) -> HashSet<String> {
    let padded = format!("  {}  ", s);
    let chars: Vec<char> = padded.chars().collect();

    if chars.len() < 3 {
        return HashSet::new();
    }

    chars
        .windows(3)
        .map(|w| w.iter().collect::<String>())
        .collect()
}
