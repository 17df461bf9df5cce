//! Recommender crate for ReelRank.
//!
//! This crate contains the orchestrator that owns the catalog and rating
//! store and runs the aggregate, rank and reorder steps for each request.

pub mod orchestrator;

pub use orchestrator::{
    MovieRecommendation, RecommendationOrchestrator, Recommendations, RecommenderConfig,
    UNKNOWN_GENRE,
};
pub use ranking::{RankedMovie, Traversal};
