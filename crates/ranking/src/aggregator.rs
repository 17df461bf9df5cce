//! Rating aggregation.
//!
//! Folds every (user, movie, score) triple in the store into a running
//! (sum, count) per movie. Means are derived from those totals on demand.

use data_loader::{DataIndex, MovieId, Score};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;

/// Running sum and count of the scores recorded for one movie
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatingTotals {
    pub sum: i64,
    pub count: u32,
}

impl RatingTotals {
    /// Fold one more score into the totals
    pub fn add(&mut self, score: Score) {
        self.sum += i64::from(score);
        self.count += 1;
    }

    /// Arithmetic mean of the recorded scores, or 0.0 when nothing was recorded
    pub fn mean(&self) -> f64 {
        if self.count == 0 {
            return 0.0;
        }
        self.sum as f64 / f64::from(self.count)
    }
}

/// Sum and count the scores of every rated movie.
///
/// Movies nobody rated are absent from the result. Ratings for ids missing
/// from the catalog are aggregated like any other. The map has no meaningful
/// iteration order.
pub fn aggregate(index: &DataIndex) -> HashMap<MovieId, RatingTotals> {
    let mut totals: HashMap<MovieId, RatingTotals> = HashMap::new();

    for rating in index.ratings() {
        totals.entry(rating.movie_id).or_default().add(rating.score);
    }

    debug!("Aggregated ratings for {} movies", totals.len());
    totals
}

/// Mean rating of each aggregated movie
pub fn mean_ratings(
    totals: &HashMap<MovieId, RatingTotals>,
) -> impl Iterator<Item = (MovieId, f64)> + '_ {
    totals.iter().map(|(&movie_id, t)| (movie_id, t.mean()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use data_loader::{Rating, UserId};

    fn rating(user_id: UserId, movie_id: MovieId, score: Score) -> Rating {
        Rating { user_id, movie_id, score }
    }

    #[test]
    fn test_aggregate_sums_and_counts() {
        let mut index = DataIndex::new();
        index.insert_rating(rating(1, 1, 5));
        index.insert_rating(rating(2, 1, 3));
        index.insert_rating(rating(1, 2, 4));

        let totals = aggregate(&index);

        assert_eq!(totals.len(), 2);
        assert_eq!(totals[&1], RatingTotals { sum: 8, count: 2 });
        assert_eq!(totals[&1].mean(), 4.0);
        assert_eq!(totals[&2].mean(), 4.0);
    }

    #[test]
    fn test_mean_is_not_truncated() {
        let mut index = DataIndex::new();
        index.insert_rating(rating(1, 7, 4));
        index.insert_rating(rating(2, 7, 5));

        assert_eq!(aggregate(&index)[&7].mean(), 4.5);
    }

    #[test]
    fn test_empty_store() {
        assert!(aggregate(&DataIndex::new()).is_empty());
        assert_eq!(RatingTotals::default().mean(), 0.0);
    }

    #[test]
    fn test_overwritten_score_counts_once() {
        let mut index = DataIndex::new();
        index.insert_rating(rating(1, 3, 1));
        index.insert_rating(rating(1, 3, 5));

        assert_eq!(aggregate(&index)[&3], RatingTotals { sum: 5, count: 1 });
    }

    #[test]
    fn test_mean_ratings() {
        let mut totals = HashMap::new();
        totals.insert(1, RatingTotals { sum: 9, count: 2 });

        let means: Vec<_> = mean_ratings(&totals).collect();
        assert_eq!(means, vec![(1, 4.5)]);
    }
}
