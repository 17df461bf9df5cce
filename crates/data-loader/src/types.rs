//! Core domain types for the movie catalog and rating store.
//!
//! Everything downstream (aggregation, ranking, reordering) works from these
//! types. `DataIndex` owns both the catalog and the ratings; the other crates
//! only ever borrow it.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// =============================================================================
// Type Aliases
// =============================================================================

/// Unique identifier for a user
pub type UserId = i32;

/// Unique identifier for a movie
pub type MovieId = i32;

/// Integer score a user gave a movie
pub type Score = i32;

// =============================================================================
// Catalog Types
// =============================================================================

/// A movie in the catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    pub id: MovieId,
    pub title: String,
    pub genre: String,
    /// Mean rating cached by the last ranking request.
    ///
    /// Stays at 0.0 until the movie has been ranked at least once.
    #[serde(default)]
    pub avg_rating: f64,
}

impl Movie {
    pub fn new(id: MovieId, title: impl Into<String>, genre: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            genre: genre.into(),
            avg_rating: 0.0,
        }
    }
}

// =============================================================================
// Rating Type
// =============================================================================

/// A single (user, movie, score) observation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rating {
    pub user_id: UserId,
    pub movie_id: MovieId,
    pub score: Score,
}

// =============================================================================
// DataIndex - Catalog plus Rating Store
// =============================================================================

/// In-memory catalog and rating store.
///
/// Ratings are keyed by user first, then by movie, so a user holds at most
/// one score per movie. Nothing ties a rating to a catalog entry: ratings for
/// unknown movie ids are stored like any other.
#[derive(Debug, Default, Clone)]
pub struct DataIndex {
    pub(crate) movies: HashMap<MovieId, Movie>,
    pub(crate) ratings: HashMap<UserId, HashMap<MovieId, Score>>,
}

impl DataIndex {
    /// Creates a new, empty DataIndex
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a movie by ID
    pub fn get_movie(&self, id: MovieId) -> Option<&Movie> {
        self.movies.get(&id)
    }

    /// Get every score a user has given, keyed by movie
    pub fn get_user_ratings(&self, user_id: UserId) -> Option<&HashMap<MovieId, Score>> {
        self.ratings.get(&user_id)
    }

    /// Iterate over every stored rating exactly once, in no particular order
    pub fn ratings(&self) -> impl Iterator<Item = Rating> + '_ {
        self.ratings.iter().flat_map(|(&user_id, scores)| {
            scores.iter().map(move |(&movie_id, &score)| Rating {
                user_id,
                movie_id,
                score,
            })
        })
    }

    /// All catalog entries sorted by movie id
    pub fn catalog(&self) -> Vec<&Movie> {
        let mut movies: Vec<&Movie> = self.movies.values().collect();
        movies.sort_by_key(|movie| movie.id);
        movies
    }

    /// Insert a movie, replacing any earlier entry with the same id
    pub fn insert_movie(&mut self, movie: Movie) {
        self.movies.insert(movie.id, movie);
    }

    /// Insert a rating, returning the score it replaced (if any)
    pub fn insert_rating(&mut self, rating: Rating) -> Option<Score> {
        self.ratings
            .entry(rating.user_id)
            .or_default()
            .insert(rating.movie_id, rating.score)
    }

    /// Write freshly computed means onto the cached `avg_rating` fields.
    ///
    /// Ids that are not in the catalog are skipped. Returns how many catalog
    /// entries were updated.
    pub fn refresh_mean_ratings<I>(&mut self, means: I) -> usize
    where
        I: IntoIterator<Item = (MovieId, f64)>,
    {
        let mut updated = 0;
        for (movie_id, mean) in means {
            if let Some(movie) = self.movies.get_mut(&movie_id) {
                movie.avg_rating = mean;
                updated += 1;
            }
        }
        updated
    }

    /// Get counts for debugging/validation: (movies, users, ratings)
    pub fn counts(&self) -> (usize, usize, usize) {
        let total_ratings = self.ratings.values().map(|m| m.len()).sum();
        (self.movies.len(), self.ratings.len(), total_ratings)
    }

    /// Number of ratings whose movie id has no catalog entry
    pub fn unknown_movie_references(&self) -> usize {
        self.ratings()
            .filter(|rating| !self.movies.contains_key(&rating.movie_id))
            .count()
    }
}
