//! Building a DataIndex from the files in a data directory.

use crate::error::Result;
use crate::parser::{self, MOVIES_FILE, RATINGS_FILE};
use crate::types::*;
use std::path::Path;
use tracing::{info, warn};

impl DataIndex {
    /// Load the catalog and ratings from `data_dir`.
    ///
    /// Steps:
    /// 1. Parse movies.txt and ratings.txt in parallel
    /// 2. Insert movies (later duplicates win)
    /// 3. Insert ratings (a later score for the same user and movie wins)
    /// 4. Report ratings that reference movies missing from the catalog
    pub fn load_from_files(data_dir: &Path) -> Result<Self> {
        info!("Loading catalog and ratings from {}", data_dir.display());

        let movies_path = data_dir.join(MOVIES_FILE);
        let ratings_path = data_dir.join(RATINGS_FILE);

        let (movies, ratings) = rayon::join(
            || parser::parse_movies(&movies_path),
            || parser::parse_ratings(&ratings_path),
        );
        let movies = movies?;
        let ratings = ratings?;

        info!("Parsed {} movies, {} ratings", movies.len(), ratings.len());

        Ok(Self::from_records(movies, ratings))
    }

    /// Build an index from already-parsed records
    pub fn from_records<M, R>(movies: M, ratings: R) -> Self
    where
        M: IntoIterator<Item = Movie>,
        R: IntoIterator<Item = Rating>,
    {
        let mut index = DataIndex::new();

        for movie in movies {
            index.insert_movie(movie);
        }

        let mut overwritten = 0usize;
        for rating in ratings {
            if index.insert_rating(rating).is_some() {
                overwritten += 1;
            }
        }
        if overwritten > 0 {
            info!("{} duplicate ratings replaced by later scores", overwritten);
        }

        let unknown = index.unknown_movie_references();
        if unknown > 0 {
            warn!("{} ratings reference movies missing from the catalog", unknown);
        }

        index
    }
}
