use crate::catalog::{Catalog, MovieId};
use crate::features::build_vectors;
use crate::persist::SnapshotPaths;
use crate::similarity::SimilarityMatrix;
use crate::Vocabulary;
use std::cmp::Ordering;
use std::path::Path;
use thiserror::Error;

/// Vocabulary cap used when the caller does not override it.
pub const DEFAULT_MAX_TERMS: usize = 5000;

#[derive(Debug, Error)]
pub enum EngineError {
    /// Query title has no exact match in the catalog. Propagated to the
    /// caller for a user-facing warning, never recovered internally.
    #[error("title not found in catalog: {0:?}")]
    TitleNotFound(String),
    /// Catalog snapshot missing or malformed at startup. Fatal to
    /// initialization; the engine never partially initializes.
    #[error("catalog snapshot unavailable: {0}")]
    SnapshotUnavailable(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Recommendation {
    pub id: MovieId,
    pub title: String,
    pub score: f32,
}

/// One-time-constructed, immutable recommendation context: the catalog, the
/// frozen vocabulary, and the dense similarity matrix. Safe to share across
/// concurrent readers without locks since nothing mutates after `build`.
#[derive(Debug)]
pub struct Engine {
    catalog: Catalog,
    vocabulary: Vocabulary,
    similarity: SimilarityMatrix,
}

impl Engine {
    /// Derives tags, builds the vocabulary and count vectors, and computes
    /// the all-pairs similarity matrix. The compute-heavy step; runs once.
    pub fn build(catalog: Catalog, max_terms: usize) -> Self {
        let tags: Vec<&str> = catalog.movies().iter().map(|m| m.tag.as_str()).collect();
        let (vocabulary, vectors) = build_vectors(tags.iter().copied(), max_terms);
        let similarity = SimilarityMatrix::compute(&vectors);
        tracing::info!(
            movies = catalog.len(),
            vocabulary = vocabulary.len(),
            "similarity matrix built"
        );
        Self {
            catalog,
            vocabulary,
            similarity,
        }
    }

    /// Loads the catalog snapshot from `dir` and builds the engine.
    pub fn from_snapshot(dir: impl AsRef<Path>, max_terms: usize) -> Result<Self, EngineError> {
        let catalog = crate::persist::load_catalog(&SnapshotPaths::new(dir))?;
        Ok(Self::build(catalog, max_terms))
    }

    /// Top-`k` movies most similar to the one titled `title`, score
    /// descending, ties broken by ascending catalog index. The query movie
    /// itself is excluded; a catalog of M < k + 1 movies yields M - 1
    /// results. Pure function over the immutable matrix.
    pub fn recommend(&self, title: &str, k: usize) -> Result<Vec<Recommendation>, EngineError> {
        let query = self
            .catalog
            .index_of_title(title)
            .ok_or_else(|| EngineError::TitleNotFound(title.to_string()))?;

        let mut ranked: Vec<(usize, f32)> = self
            .similarity
            .row(query)
            .iter()
            .copied()
            .enumerate()
            .filter(|&(idx, _)| idx != query)
            .collect();
        ranked.sort_by(|a, b| {
            b.1.partial_cmp(&a.1)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.0.cmp(&b.0))
        });
        ranked.truncate(k);

        Ok(ranked
            .into_iter()
            .map(|(idx, score)| {
                let movie = &self.catalog.movies()[idx];
                Recommendation {
                    id: movie.id,
                    title: movie.title.clone(),
                    score,
                }
            })
            .collect())
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    pub fn similarity(&self) -> &SimilarityMatrix {
        &self.similarity
    }
}
