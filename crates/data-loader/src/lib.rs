//! # Data Loader Crate
//!
//! Loads the movie catalog and the per-user ratings into a [`DataIndex`].
//!
//! ## Main Components
//!
//! - **types**: Domain types (Movie, Rating, DataIndex)
//! - **parser**: Parse the comma-delimited files into Rust structs
//! - **index**: Assemble a DataIndex from files or parsed records
//! - **error**: Error types for data loading
//!
//! ## Example Usage
//!
//! ```ignore
//! use data_loader::DataIndex;
//! use std::path::Path;
//!
//! let index = DataIndex::load_from_files(Path::new("data"))?;
//! let (movies, users, ratings) = index.counts();
//! println!("{} movies, {} users, {} ratings", movies, users, ratings);
//! ```

pub mod error;
pub mod types;
pub mod parser;
pub mod index;

pub use error::{DataLoadError, Result};
pub use types::{DataIndex, Movie, MovieId, Rating, Score, UserId};
