//! Deterministic, offline embedding provider based on feature hashing.
//!
//! Each lower-cased alphanumeric token is hashed into one of `dimensions`
//! buckets with a pseudo-random sign, and the resulting vector is
//! L2-normalized. Texts sharing words land close together, which is enough
//! for a small static corpus and needs no model weights or network.

use async_trait::async_trait;

use crate::embedding::EmbeddingProvider;
use crate::error::Result;

/// Default dimensionality for [`HashEmbeddingProvider`].
pub const DEFAULT_HASH_DIMENSIONS: usize = 256;

/// A bag-of-words feature-hashing [`EmbeddingProvider`].
#[derive(Debug, Clone)]
pub struct HashEmbeddingProvider {
    dimensions: usize,
}

impl Default for HashEmbeddingProvider {
    fn default() -> Self {
        Self { dimensions: DEFAULT_HASH_DIMENSIONS }
    }
}

impl HashEmbeddingProvider {
    /// Create a provider producing vectors of the given size.
    ///
    /// A size of zero is bumped to one so every vector has a component.
    pub fn new(dimensions: usize) -> Self {
        Self { dimensions: dimensions.max(1) }
    }

    fn embed_sync(&self, text: &str) -> Vec<f32> {
        let mut emb = vec![0.0f32; self.dimensions];
        for token in tokens(text) {
            let hash = token.bytes().fold(0xcbf2_9ce4_8422_2325u64, |acc, b| {
                (acc ^ b as u64).wrapping_mul(0x0000_0100_0000_01b3)
            });
            let bucket = (hash % self.dimensions as u64) as usize;
            let sign = if (hash >> 63) == 0 { 1.0 } else { -1.0 };
            emb[bucket] += sign;
        }
        // L2-normalise so distances only depend on word overlap, not text length.
        let norm: f32 = emb.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > 0.0 {
            emb.iter_mut().for_each(|x| *x /= norm);
        }
        emb
    }
}

fn tokens(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(str::to_lowercase)
}

#[async_trait]
impl EmbeddingProvider for HashEmbeddingProvider {
    fn name(&self) -> &str {
        "hash"
    }

    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        Ok(self.embed_sync(text))
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }
}
