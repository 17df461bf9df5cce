use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use data_loader::{DataIndex, Movie, MovieId};
use recommender::{
    RankedMovie, RecommendationOrchestrator, Recommendations, RecommenderConfig, Traversal,
};
use serde::Serialize;
use std::collections::VecDeque;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::time::Instant;
use tracing::info;

/// ReelRank - Movie Recommendation Engine
#[derive(Parser)]
#[command(name = "reel-rank")]
#[command(about = "Movie recommendations from aggregate user ratings", long_about = None)]
struct Cli {
    /// Directory holding movies.txt and ratings.txt
    #[arg(short, long, global = true, default_value = "data", env = "REEL_RANK_DATA_DIR")]
    data_dir: PathBuf,

    /// Fixed seed for the recommendation shuffle (reproducible output)
    #[arg(long, global = true, env = "REEL_RANK_SEED")]
    seed: Option<u64>,

    /// Print JSON instead of colored text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List every movie in the catalog
    Movies,

    /// Show the top movies by mean rating
    Top {
        /// Number of movies to show (zero or negative shows none)
        #[arg(long, allow_negative_numbers = true)]
        limit: Option<i64>,
    },

    /// Get reordered recommendations from the top-rated movies
    Recommend {
        /// Traversal used to reorder the ranking: dfs or bfs
        #[arg(long, default_value = "dfs")]
        mode: Traversal,

        /// Number of recommendations (zero or negative returns none)
        #[arg(long, allow_negative_numbers = true)]
        limit: Option<i64>,
    },

    /// Interactive menu
    Menu,
}

/// Row of the `top` output
#[derive(Serialize)]
struct RankingRow<'a> {
    rank: usize,
    movie_id: MovieId,
    title: Option<&'a str>,
    mean_rating: f64,
    rating_count: u32,
}

fn main() -> Result<()> {
    // Logs go to stderr so they never mix with rendered output
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let start = Instant::now();
    let config = RecommenderConfig::default().with_seed(cli.seed);
    let mut orchestrator = RecommendationOrchestrator::load(&cli.data_dir)
        .context("Failed to load movie data")?
        .with_config(config);
    info!("Loaded data from {} in {:?}", cli.data_dir.display(), start.elapsed());

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Commands::Movies => handle_movies(&orchestrator, cli.json, &mut out)?,
        Commands::Top { limit } => {
            let limit = resolve_limit(limit, orchestrator.config());
            handle_top(&mut orchestrator, limit, cli.json, &mut out)?
        }
        Commands::Recommend { mode, limit } => {
            let limit = resolve_limit(limit, orchestrator.config());
            handle_recommend(&mut orchestrator, limit, mode, cli.json, &mut out)?
        }
        Commands::Menu => {
            let stdin = io::stdin();
            run_menu(&mut orchestrator, stdin.lock(), &mut out)?
        }
    }

    Ok(())
}

/// Signed limit from the command line; anything below one means "none"
fn clamp_limit(limit: i64) -> usize {
    usize::try_from(limit).unwrap_or(0)
}

fn resolve_limit(limit: Option<i64>, config: &RecommenderConfig) -> usize {
    limit.map(clamp_limit).unwrap_or(config.default_limit)
}

/// Handle the 'movies' command
fn handle_movies(
    orchestrator: &RecommendationOrchestrator,
    json: bool,
    out: &mut impl Write,
) -> Result<()> {
    let catalog = orchestrator.catalog();
    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(&catalog)?)?;
    } else {
        print_catalog(&catalog, out)?;
    }
    Ok(())
}

/// Handle the 'top' command
fn handle_top(
    orchestrator: &mut RecommendationOrchestrator,
    limit: usize,
    json: bool,
    out: &mut impl Write,
) -> Result<()> {
    let ranked = orchestrator.top_movies(limit);
    let rows = ranking_rows(&ranked, orchestrator.data_index());

    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(&rows)?)?;
        return Ok(());
    }

    if rows.is_empty() {
        writeln!(out, "{}", "No rated movies yet.".red().bold())?;
        return Ok(());
    }

    writeln!(out, "{}", "Top Rated Movies:".bold().blue())?;
    for row in &rows {
        writeln!(
            out,
            "{}. {} - {} ({} ratings)",
            row.rank.to_string().green(),
            row.title.unwrap_or("<not in catalog>"),
            format_mean(row.mean_rating),
            row.rating_count
        )?;
    }
    Ok(())
}

/// Handle the 'recommend' command
fn handle_recommend(
    orchestrator: &mut RecommendationOrchestrator,
    limit: usize,
    mode: Traversal,
    json: bool,
    out: &mut impl Write,
) -> Result<()> {
    let recommendations = orchestrator.recommend(limit, mode);
    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(&recommendations)?)?;
    } else {
        print_recommendations(&recommendations, mode, out)?;
    }
    Ok(())
}

/// Read menu choices until 4 or end of input.
///
/// Choices are whitespace-separated tokens, so one line may carry several;
/// blank lines are skipped without reprinting the menu.
fn run_menu(
    orchestrator: &mut RecommendationOrchestrator,
    input: impl BufRead,
    out: &mut impl Write,
) -> Result<()> {
    let limit = orchestrator.config().default_limit;
    let mut lines = input.lines();
    let mut pending: VecDeque<String> = VecDeque::new();

    loop {
        print_menu(out)?;
        let choice = loop {
            if let Some(token) = pending.pop_front() {
                break Some(token);
            }
            match lines.next() {
                Some(line) => {
                    let line = line.context("Failed to read menu choice")?;
                    pending.extend(line.split_whitespace().map(str::to_string));
                }
                None => break None,
            }
        };
        let Some(choice) = choice else {
            writeln!(out)?;
            break;
        };

        match choice.parse::<i64>() {
            Ok(1) => handle_movies(orchestrator, false, out)?,
            Ok(2) => handle_recommend(orchestrator, limit, Traversal::DepthFirst, false, out)?,
            Ok(3) => handle_recommend(orchestrator, limit, Traversal::BreadthFirst, false, out)?,
            Ok(4) => {
                writeln!(out, "{}", "Exiting...".red().bold())?;
                break;
            }
            _ => writeln!(out, "{}", "Invalid choice! Please try again.".red().bold())?,
        }
    }
    Ok(())
}

fn print_menu(out: &mut impl Write) -> Result<()> {
    writeln!(
        out,
        "\n{}",
        "=========== Movie Recommendation System ===========".cyan().bold()
    )?;
    writeln!(out, "1. {}", "Show All Movies".yellow().bold())?;
    writeln!(out, "2. {}", "Get DFS Recommendations".yellow().bold())?;
    writeln!(out, "3. {}", "Get BFS Recommendations".yellow().bold())?;
    writeln!(out, "4. {}", "Exit".red().bold())?;
    write!(out, "Enter your choice: ")?;
    out.flush()?;
    Ok(())
}

fn print_catalog(catalog: &[&Movie], out: &mut impl Write) -> Result<()> {
    writeln!(out, "\n{}", "All Movies:".blue().bold())?;
    for movie in catalog {
        writeln!(out, "{}. {}", movie.id, movie.title)?;
    }
    Ok(())
}

/// Helper function to format and print recommendations
fn print_recommendations(
    recommendations: &Recommendations,
    mode: Traversal,
    out: &mut impl Write,
) -> Result<()> {
    if recommendations.is_empty() {
        writeln!(
            out,
            "{}",
            "No movies available for recommendations.".red().bold()
        )?;
        return Ok(());
    }

    writeln!(out, "\n{}", format!("Recommendations ({}):", mode).blue().bold())?;
    for rec in recommendations.as_slice() {
        writeln!(
            out,
            "{} ({}) [Rating: {}]",
            rec.title.green().bold(),
            rec.genre,
            format_mean(rec.mean_rating)
        )?;
    }
    Ok(())
}

/// Render a mean the way a default-formatted C-style stream does: six
/// significant digits with trailing zeros dropped (4.5, 4, 4.33333)
fn format_mean(value: f64) -> String {
    if value == 0.0 || !value.is_finite() {
        return value.to_string();
    }
    let magnitude = value.abs().log10().floor() as i32;
    if !(-5..6).contains(&magnitude) {
        return format!("{:e}", value);
    }
    let decimals = (5 - magnitude).max(0) as usize;
    let text = format!("{:.*}", decimals, value);
    if text.contains('.') {
        text.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        text
    }
}

fn ranking_rows<'a>(ranked: &[RankedMovie], index: &'a DataIndex) -> Vec<RankingRow<'a>> {
    ranked
        .iter()
        .enumerate()
        .map(|(i, entry)| RankingRow {
            rank: i + 1,
            movie_id: entry.movie_id,
            title: index.get_movie(entry.movie_id).map(|m| m.title.as_str()),
            mean_rating: entry.mean,
            rating_count: entry.rating_count,
        })
        .collect()
}
