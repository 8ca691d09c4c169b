use anyhow::{anyhow, Context, Result};
use catalog::{Catalog, ItemId, Style};
use candidates::CandidateSelector;
use clap::{Parser, Subcommand};
use colored::Colorize;
use engine::{RecommendRequest, Recommender};
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

/// BrewRecs - Beer Recommendation Engine
#[derive(Parser)]
#[command(name = "brew-recs")]
#[command(about = "Beer recommendation engine using collaborative filtering", long_about = None)]
struct Cli {
    /// Path to the beer reviews CSV file
    #[arg(short, long, default_value = "data/beer_reviews.csv")]
    data: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Get per-style recommendations from your own ratings
    Recommend {
        /// JSON file mapping beer name to rating, e.g. {"Hop Storm": 4.5}
        #[arg(long)]
        ratings: PathBuf,

        /// Favorite styles to recommend for; omit to infer from the ratings
        #[arg(long = "style")]
        styles: Vec<String>,

        /// Number of recommendations per style
        #[arg(long, default_value = "5")]
        limit: usize,

        /// Factorization seed
        #[arg(long, default_value = "42")]
        seed: u64,
    },

    /// List well-reviewed beers worth rating, grouped by style
    Candidates {
        /// Styles to list candidates for; omit for all styles
        #[arg(long = "style")]
        styles: Vec<String>,

        /// Number of candidates per style
        #[arg(long, default_value = "10")]
        limit: usize,
    },

    /// Search for beers by name
    Search {
        /// Beer name to search for (case-insensitive substring match)
        #[arg(long)]
        name: String,
    },
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    // Load the catalog (this may take a moment)
    println!("Loading beer reviews from {}...", cli.data.display());
    let start = Instant::now();
    let catalog = catalog::cached::get_or_load(&cli.data)
        .context("Failed to load beer review catalog")?;
    println!("{} Loaded catalog in {:?}", "✓".green(), start.elapsed());

    // Dispatch to appropriate command handler
    match cli.command {
        Commands::Recommend {
            ratings,
            styles,
            limit,
            seed,
        } => handle_recommend(catalog, ratings, styles, limit, seed)?,
        Commands::Candidates { styles, limit } => handle_candidates(catalog, styles, limit)?,
        Commands::Search { name } => handle_search(catalog, name)?,
    }

    Ok(())
}

/// Handle the 'recommend' command
fn handle_recommend(
    catalog: Arc<Catalog>,
    ratings_path: PathBuf,
    styles: Vec<String>,
    limit: usize,
    seed: u64,
) -> Result<()> {
    let ratings = read_ratings_file(&ratings_path)?;
    let styles = parse_styles(&styles)?;

    let recommender = Recommender::new(catalog.clone())
        .with_seed(seed)
        .with_top_n(limit);
    let request = RecommendRequest { ratings, styles };

    let start = Instant::now();
    let results = recommender.recommend(&request)?;
    println!(
        "{} Computed recommendations in {:?}",
        "✓".green(),
        start.elapsed()
    );

    for style_recs in &results {
        println!();
        println!(
            "{}",
            format!("Top {} picks:", style_recs.style).bold().blue()
        );
        if style_recs.items.is_empty() {
            println!("  (you have already rated every {} we know)", style_recs.style);
            continue;
        }
        for (rank, item) in style_recs.items.iter().enumerate() {
            let stats = catalog.get_item_stats(&item.id);
            let avg = stats.map(|s| s.avg_rating).unwrap_or(0.0);
            let count = stats.map(|s| s.rating_count).unwrap_or(0);
            println!(
                "{}. {} — {} (community avg {:.2}, {} reviews)",
                (rank + 1).to_string().green(),
                item.id.bold(),
                item.brewery,
                avg,
                count
            );
        }
    }
    Ok(())
}

/// Handle the 'candidates' command
fn handle_candidates(catalog: Arc<Catalog>, styles: Vec<String>, limit: usize) -> Result<()> {
    let styles = parse_styles(&styles)?;
    let selector = CandidateSelector::new(catalog.clone());
    let selected = selector.select(&styles, limit);

    println!("{}", "Beers worth rating:".bold().blue());
    let mut current_style: Option<Style> = None;
    for item in &selected {
        if current_style != Some(item.style) {
            println!("{}", format!("[{}]", item.style).cyan());
            current_style = Some(item.style);
        }
        let count = catalog
            .get_item_stats(&item.id)
            .map(|s| s.rating_count)
            .unwrap_or(0);
        println!("  - {} ({}, {} reviews)", item.id, item.brewery, count);
    }
    if selected.is_empty() {
        println!("  (no beers found for the requested styles)");
    }
    Ok(())
}

/// Handle the 'search' command
fn handle_search(catalog: Arc<Catalog>, name: String) -> Result<()> {
    let name_lower = name.to_lowercase();
    let mut matches: Vec<(&ItemId, Style, f32, u32, usize)> = Vec::new();

    // The style index covers every item, in sorted-id order per style
    for style in catalog.styles_present() {
        for item_id in catalog.items_in_style(style) {
            let item_lower = item_id.to_lowercase();
            let relevance = if item_lower == name_lower {
                0 // exact match
            } else if item_lower.contains(&name_lower) {
                1 // substring match
            } else {
                continue;
            };
            let stats = catalog.get_item_stats(item_id);
            matches.push((
                item_id,
                style,
                stats.map(|s| s.avg_rating).unwrap_or(0.0),
                stats.map(|s| s.rating_count).unwrap_or(0),
                relevance,
            ));
        }
    }

    // Sort by relevance (exact match first), then by average rating
    matches.sort_by(|a, b| {
        a.4.cmp(&b.4)
            .then_with(|| b.2.partial_cmp(&a.2).unwrap_or(std::cmp::Ordering::Equal))
    });

    println!("{}", format!("Search results for '{}':", name).bold().blue());
    for (item_id, style, avg, count, _) in matches.iter().take(20) {
        println!(
            "{} [{}] avg {:.2} ({} reviews)",
            item_id, style, avg, count
        );
    }
    if matches.is_empty() {
        println!("  (no beers matched)");
    }
    Ok(())
}

/// Read a `{beer name -> rating}` JSON file into the request's rating map
fn read_ratings_file(path: &PathBuf) -> Result<BTreeMap<ItemId, f32>> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read ratings file {}", path.display()))?;
    let ratings: BTreeMap<ItemId, f32> = serde_json::from_str(&contents)
        .with_context(|| format!("Invalid ratings JSON in {}", path.display()))?;
    Ok(ratings)
}

/// Parse `--style` labels, failing with the list of known labels
fn parse_styles(labels: &[String]) -> Result<Vec<Style>> {
    labels
        .iter()
        .map(|label| {
            Style::parse_label(label).ok_or_else(|| {
                anyhow!(
                    "Unknown style '{}'; known styles: {}",
                    label,
                    Style::ALL
                        .iter()
                        .map(|s| s.label())
                        .collect::<Vec<_>>()
                        .join(", ")
                )
            })
        })
        .collect()
}
