//! End-to-end tests: files on disk through to recommendations.

use recommender::{RecommendationOrchestrator, Recommendations, RecommenderConfig, Traversal};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

fn write_fixture(dir: &Path, movies: &str, ratings: &str) {
    fs::write(dir.join("movies.txt"), movies).unwrap();
    fs::write(dir.join("ratings.txt"), ratings).unwrap();
}

#[test]
fn test_recommend_from_files() {
    let dir = tempfile::tempdir().unwrap();
    write_fixture(
        dir.path(),
        "1,The Godfather,Crime\n2,Toy Story,Animation,Comedy\n3,Jaws,Thriller\n",
        "1,1,5\n2,1,5\n1,2,4\n2,2,3\n3,3,2\n",
    );

    let mut orchestrator = RecommendationOrchestrator::load(dir.path())
        .unwrap()
        .with_config(RecommenderConfig::default().with_seed(Some(9)));

    let recs = orchestrator.recommend(2, Traversal::BreadthFirst).into_vec();
    let ids: HashSet<_> = recs.iter().map(|r| r.movie_id).collect();
    assert_eq!(ids, HashSet::from([1, 2]));

    let toy_story = recs.iter().find(|r| r.movie_id == 2).unwrap();
    assert_eq!(toy_story.genre, "Animation,Comedy");
    assert_eq!(toy_story.mean_rating, 3.5);
}

#[test]
fn test_no_ratings_file_content() {
    let dir = tempfile::tempdir().unwrap();
    write_fixture(dir.path(), "1,Jaws,Thriller\n", "");

    let mut orchestrator = RecommendationOrchestrator::load(dir.path()).unwrap();

    assert!(orchestrator.top_movies(5).is_empty());
    assert_eq!(
        orchestrator.recommend(5, Traversal::DepthFirst),
        Recommendations::NoneAvailable
    );
    assert_eq!(orchestrator.catalog().len(), 1);
}

#[test]
fn test_malformed_file_is_reported_with_context() {
    let dir = tempfile::tempdir().unwrap();
    write_fixture(dir.path(), "1,Jaws,Thriller\n", "1,1,great\n");

    let err = RecommendationOrchestrator::load(dir.path()).unwrap_err();
    let chain = format!("{:#}", err);
    assert!(chain.contains("Failed to load data"), "{}", chain);
    assert!(chain.contains("line 1 in ratings.txt"), "{}", chain);
}
