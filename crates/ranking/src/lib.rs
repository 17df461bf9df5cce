//! # Ranking Crate
//!
//! The scoring core of the recommender:
//!
//! - **aggregator**: per-movie (sum, count) over the whole rating store
//! - **ranker**: top-N movies by mean rating, ties broken by ascending id
//! - **reorder**: shuffle the ranking and emit it through a depth-first or
//!   breadth-first visitation pass
//!
//! ## Example Usage
//!
//! ```ignore
//! use ranking::{aggregate, rank, reorder, Traversal};
//!
//! let totals = aggregate(&index);
//! let ranked = rank(&totals, 5);
//! let ids: Vec<_> = ranked.iter().map(|r| r.movie_id).collect();
//! let order = reorder(&ids, Traversal::DepthFirst, &mut rand::rng());
//! ```

pub mod aggregator;
pub mod ranker;
pub mod reorder;

pub use aggregator::{RatingTotals, aggregate, mean_ratings};
pub use ranker::{RankedMovie, rank, top_movies};
pub use reorder::{Frontier, Traversal, UnknownTraversal, reorder};
