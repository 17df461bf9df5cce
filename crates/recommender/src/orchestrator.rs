//! # Recommendation Orchestrator
//!
//! Coordinates one recommendation request:
//! 1. Aggregate the rating store
//! 2. Refresh the catalog's cached mean ratings
//! 3. Rank and keep the top N
//! 4. Reorder the ranking (depth-first or breadth-first)
//! 5. Pair each id with its title, genre and mean rating
//!
//! The orchestrator owns the `DataIndex` for the life of the program and
//! lends it to the ranking functions by reference.

use std::collections::HashMap;
use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use data_loader::{DataIndex, Movie, MovieId};
use ranking::{RankedMovie, Traversal, aggregate, mean_ratings, rank, reorder};

/// Genre shown for ranked ids that have no catalog entry
pub const UNKNOWN_GENRE: &str = "Unknown";

/// Tunables for the orchestrator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommenderConfig {
    /// Fixed seed for the reorder shuffle. `None` draws fresh randomness
    /// for every request.
    pub seed: Option<u64>,
    /// Number of recommendations when the caller does not ask for a count
    pub default_limit: usize,
}

impl Default for RecommenderConfig {
    fn default() -> Self {
        Self {
            seed: None,
            default_limit: 5,
        }
    }
}

impl RecommenderConfig {
    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_default_limit(mut self, limit: usize) -> Self {
        self.default_limit = limit;
        self
    }
}

/// Final recommendation handed to the presentation layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieRecommendation {
    pub movie_id: MovieId,
    pub title: String,
    pub genre: String,
    pub mean_rating: f64,
    /// False when the id was rated but never appeared in the catalog;
    /// title and genre are placeholders in that case.
    pub in_catalog: bool,
}

/// Outcome of a recommendation request.
///
/// An empty ranking is a normal outcome, not an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", content = "recommendations", rename_all = "snake_case")]
pub enum Recommendations {
    Found(Vec<MovieRecommendation>),
    NoneAvailable,
}

impl Recommendations {
    pub fn is_empty(&self) -> bool {
        matches!(self, Recommendations::NoneAvailable)
    }

    pub fn as_slice(&self) -> &[MovieRecommendation] {
        match self {
            Recommendations::Found(recs) => recs,
            Recommendations::NoneAvailable => &[],
        }
    }

    pub fn into_vec(self) -> Vec<MovieRecommendation> {
        match self {
            Recommendations::Found(recs) => recs,
            Recommendations::NoneAvailable => Vec::new(),
        }
    }
}

/// Main orchestrator that ties aggregation, ranking and reordering together
#[derive(Debug, Clone)]
pub struct RecommendationOrchestrator {
    data_index: DataIndex,
    config: RecommenderConfig,
}

impl RecommendationOrchestrator {
    /// Create an orchestrator over an already-built index with default config
    pub fn new(data_index: DataIndex) -> Self {
        Self {
            data_index,
            config: RecommenderConfig::default(),
        }
    }

    /// Replace the configuration (builder pattern)
    pub fn with_config(mut self, config: RecommenderConfig) -> Self {
        self.config = config;
        self
    }

    /// Load the catalog and ratings from `data_dir`
    pub fn load(data_dir: &Path) -> Result<Self> {
        let index = DataIndex::load_from_files(data_dir)
            .with_context(|| format!("Failed to load data from {}", data_dir.display()))?;
        Ok(Self::new(index))
    }

    pub fn data_index(&self) -> &DataIndex {
        &self.data_index
    }

    pub fn config(&self) -> &RecommenderConfig {
        &self.config
    }

    /// Every catalog entry, sorted by id
    pub fn catalog(&self) -> Vec<&Movie> {
        self.data_index.catalog()
    }

    /// Current top-N ranking; also refreshes the cached mean ratings
    pub fn top_movies(&mut self, top_n: usize) -> Vec<RankedMovie> {
        self.rank_and_cache(top_n)
    }

    /// Recommend up to `top_n` movies using the configured random source
    pub fn recommend(&mut self, top_n: usize, mode: Traversal) -> Recommendations {
        match self.config.seed {
            Some(seed) => self.recommend_with_rng(top_n, mode, &mut StdRng::seed_from_u64(seed)),
            None => self.recommend_with_rng(top_n, mode, &mut rand::rng()),
        }
    }

    /// Recommend up to `top_n` movies, shuffling with `rng`
    #[instrument(skip(self, rng))]
    pub fn recommend_with_rng<R>(
        &mut self,
        top_n: usize,
        mode: Traversal,
        rng: &mut R,
    ) -> Recommendations
    where
        R: Rng + ?Sized,
    {
        let start_time = Instant::now();

        let ranked = self.rank_and_cache(top_n);
        if ranked.is_empty() {
            info!("No rated movies available for recommendations");
            return Recommendations::NoneAvailable;
        }

        let means: HashMap<MovieId, f64> =
            ranked.iter().map(|r| (r.movie_id, r.mean)).collect();
        let ids: Vec<MovieId> = ranked.iter().map(|r| r.movie_id).collect();

        let mut order = reorder(&ids, mode, rng);
        order.truncate(top_n);

        let recommendations: Vec<MovieRecommendation> = order
            .into_iter()
            .map(|movie_id| {
                let mean = means.get(&movie_id).copied().unwrap_or_default();
                self.build_recommendation(movie_id, mean)
            })
            .collect();

        info!(
            "Produced {} {} recommendations in {:.2?}",
            recommendations.len(),
            mode,
            start_time.elapsed()
        );
        Recommendations::Found(recommendations)
    }

    /// Aggregate, write means back onto the catalog, then rank
    fn rank_and_cache(&mut self, top_n: usize) -> Vec<RankedMovie> {
        let totals = aggregate(&self.data_index);
        let updated = self.data_index.refresh_mean_ratings(mean_ratings(&totals));
        debug!(
            "Refreshed cached means for {} of {} rated movies",
            updated,
            totals.len()
        );

        let ranked = rank(&totals, top_n);
        debug!("Ranked {} movies (requested {})", ranked.len(), top_n);
        ranked
    }

    /// Attach catalog details to a ranked id, substituting placeholders for
    /// ids the catalog does not know
    fn build_recommendation(&self, movie_id: MovieId, mean: f64) -> MovieRecommendation {
        match self.data_index.get_movie(movie_id) {
            Some(movie) => MovieRecommendation {
                movie_id,
                title: movie.title.clone(),
                genre: movie.genre.clone(),
                mean_rating: movie.avg_rating,
                in_catalog: true,
            },
            None => MovieRecommendation {
                movie_id,
                title: format!("Movie #{}", movie_id),
                genre: UNKNOWN_GENRE.to_string(),
                mean_rating: mean,
                in_catalog: false,
            },
        }
    }
}
