//! Parser for the comma-delimited catalog and rating files.
//!
//! - movies.txt: movieId,title,genre
//! - ratings.txt: userId,movieId,score
//!
//! The genre column is the remainder of the line, so it may itself contain
//! commas ("Action,Sci-Fi"). Blank lines are skipped; every other line must
//! parse or the whole file is rejected.

use crate::error::{DataLoadError, Result};
use crate::types::*;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use std::str::{FromStr, SplitN};

pub const MOVIES_FILE: &str = "movies.txt";
pub const RATINGS_FILE: &str = "ratings.txt";

/// Read a whole file, reporting a missing file as `FileNotFound`
fn read_file(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => DataLoadError::FileNotFound {
            path: path.display().to_string(),
        },
        _ => DataLoadError::IoError(e),
    })
}

/// Pull the next field off a split line or explain which one is missing
fn next_field<'a>(
    parts: &mut SplitN<'a, char>,
    file: &str,
    line: usize,
    name: &str,
) -> Result<&'a str> {
    parts.next().ok_or_else(|| DataLoadError::ParseError {
        file: file.to_string(),
        line,
        reason: format!("Missing {}", name),
    })
}

fn parse_number<T>(value: &str, file: &str, line: usize, name: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value.trim().parse().map_err(|e| DataLoadError::ParseError {
        file: file.to_string(),
        line,
        reason: format!("Invalid {} '{}': {}", name, value.trim(), e),
    })
}

/// Parse the movies file at `path`
pub fn parse_movies(path: &Path) -> Result<Vec<Movie>> {
    parse_movie_lines(&read_file(path)?)
}

/// Parse catalog records from already-read file content
pub fn parse_movie_lines(content: &str) -> Result<Vec<Movie>> {
    let mut movies = Vec::new();

    for (idx, line) in content.lines().enumerate() {
        let line_no = idx + 1;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let mut parts = line.splitn(3, ',');
        let id = next_field(&mut parts, MOVIES_FILE, line_no, "movieId")?;
        let title = next_field(&mut parts, MOVIES_FILE, line_no, "title")?;
        let genre = next_field(&mut parts, MOVIES_FILE, line_no, "genre")?;

        movies.push(Movie::new(
            parse_number(id, MOVIES_FILE, line_no, "movieId")?,
            title.trim(),
            genre.trim(),
        ));
    }

    Ok(movies)
}

/// Parse the ratings file at `path`
pub fn parse_ratings(path: &Path) -> Result<Vec<Rating>> {
    parse_rating_lines(&read_file(path)?)
}

/// Parse rating records from already-read file content
pub fn parse_rating_lines(content: &str) -> Result<Vec<Rating>> {
    let mut ratings = Vec::new();

    for (idx, line) in content.lines().enumerate() {
        let line_no = idx + 1;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let mut parts = line.splitn(3, ',');
        let user_id = next_field(&mut parts, RATINGS_FILE, line_no, "userId")?;
        let movie_id = next_field(&mut parts, RATINGS_FILE, line_no, "movieId")?;
        let score = next_field(&mut parts, RATINGS_FILE, line_no, "score")?;

        ratings.push(Rating {
            user_id: parse_number(user_id, RATINGS_FILE, line_no, "userId")?,
            movie_id: parse_number(movie_id, RATINGS_FILE, line_no, "movieId")?,
            score: parse_number(score, RATINGS_FILE, line_no, "score")?,
        });
    }

    Ok(ratings)
}
