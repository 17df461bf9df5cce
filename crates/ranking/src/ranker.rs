//! Top-N selection by mean rating.
//!
//! ## Ordering
//! Descending mean rating. Equal means are broken by ascending movie id, so
//! the same store always ranks the same way regardless of map iteration
//! order.

use crate::aggregator::{RatingTotals, aggregate};
use data_loader::{DataIndex, MovieId};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashMap;

/// One row of a ranking, recomputed on every request
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RankedMovie {
    pub movie_id: MovieId,
    pub mean: f64,
    pub rating_count: u32,
}

fn by_rank(a: &RankedMovie, b: &RankedMovie) -> Ordering {
    b.mean
        .total_cmp(&a.mean)
        .then_with(|| a.movie_id.cmp(&b.movie_id))
}

/// Rank aggregated movies and keep the best `top_n`.
///
/// Returns fewer than `top_n` rows when fewer movies were rated, and nothing
/// at all for `top_n == 0`.
pub fn rank(totals: &HashMap<MovieId, RatingTotals>, top_n: usize) -> Vec<RankedMovie> {
    if top_n == 0 {
        return Vec::new();
    }

    let mut ranked: Vec<RankedMovie> = totals
        .iter()
        .filter(|(_, t)| t.count > 0)
        .map(|(&movie_id, t)| RankedMovie {
            movie_id,
            mean: t.mean(),
            rating_count: t.count,
        })
        .collect();

    ranked.sort_by(by_rank);
    ranked.truncate(top_n);
    ranked
}

/// Ids of the `top_n` best-rated movies in the store, best first
pub fn top_movies(index: &DataIndex, top_n: usize) -> Vec<MovieId> {
    rank(&aggregate(index), top_n)
        .into_iter()
        .map(|entry| entry.movie_id)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn totals(entries: &[(MovieId, i64, u32)]) -> HashMap<MovieId, RatingTotals> {
        entries
            .iter()
            .map(|&(id, sum, count)| (id, RatingTotals { sum, count }))
            .collect()
    }

    #[test]
    fn test_sorted_by_descending_mean() {
        let t = totals(&[(1, 6, 2), (2, 10, 2), (3, 8, 2)]);
        let ids: Vec<_> = rank(&t, 10).iter().map(|r| r.movie_id).collect();
        assert_eq!(ids, vec![2, 3, 1]);
    }

    #[test]
    fn test_ties_break_by_ascending_id() {
        let t = totals(&[(9, 4, 1), (2, 8, 2), (5, 12, 3)]);
        let ids: Vec<_> = rank(&t, 3).iter().map(|r| r.movie_id).collect();
        assert_eq!(ids, vec![2, 5, 9]);
    }

    #[test]
    fn test_truncates_to_top_n() {
        let t = totals(&[(1, 5, 1), (2, 4, 1), (3, 3, 1)]);
        let ranked = rank(&t, 2);
        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].rating_count, 1);
        assert_eq!(ranked[1].mean, 4.0);
    }

    #[test]
    fn test_zero_top_n_is_empty() {
        let t = totals(&[(1, 5, 1)]);
        assert!(rank(&t, 0).is_empty());
    }

    #[test]
    fn test_top_n_larger_than_rated() {
        let t = totals(&[(1, 5, 1), (2, 4, 1)]);
        assert_eq!(rank(&t, 50).len(), 2);
    }

    #[test]
    fn test_no_ratings() {
        assert!(top_movies(&DataIndex::new(), 5).is_empty());
    }
}
