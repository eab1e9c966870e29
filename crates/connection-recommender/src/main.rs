//! Grid Connection Ranking CLI
//!
//! Scores and ranks candidate grid-connection opportunities for a site.
//!
//! Usage:
//!   rank-connections --candidates data/connection_opportunities.json \
//!                    --context data/site_context.json \
//!                    --output data/recommendations.json

use anyhow::{bail, Result};
use chrono::Utc;
use clap::Parser;
use connection_recommender::{
    loader, RecommendationEngine, RecommendationReport, ReportMetadata, WeightPreset,
};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(
    name = "rank-connections",
    about = "Rank grid-connection opportunities for a prospective site"
)]
struct Args {
    /// Path to the connection opportunities JSON file
    #[arg(short = 'c', long, default_value = "data/connection_opportunities.json")]
    candidates: PathBuf,

    /// Path to the site analysis context JSON file
    #[arg(short = 's', long, default_value = "data/site_context.json")]
    context: PathBuf,

    /// Output JSON file
    #[arg(short, long, default_value = "data/recommendations.json")]
    output: PathBuf,

    /// Weight preset: balanced, aggressive, conservative, cost-optimized
    #[arg(long)]
    preset: Option<String>,

    /// Number of top candidates to print
    #[arg(long, default_value_t = 10)]
    top: usize,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let level = if args.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("{}", "=".repeat(60));
    info!("Grid Connection Recommender");
    info!("{}", "=".repeat(60));

    // Load inputs
    let candidates = loader::load_opportunities(&args.candidates)?;
    let context = loader::load_context(&args.context)?;

    // Configure the engine
    let mut engine = RecommendationEngine::new();
    let preset_name = match &args.preset {
        Some(name) => match WeightPreset::from_name(name) {
            Some(preset) => {
                engine.apply_preset(preset);
                Some(preset.name().to_string())
            }
            None => bail!("unknown preset: {}", name),
        },
        None => None,
    };

    // Score and rank
    let recommendations = engine.generate_recommendations(&candidates, &context);

    info!("\nTop {} candidates by score:", args.top.min(recommendations.len()));
    for scored in recommendations.iter().take(args.top) {
        let name: String = scored.opportunity.name.chars().take(40).collect();
        info!(
            "  {:5.1} | {} | {:40} | {}",
            scored.final_score,
            scored.tier.label(),
            name,
            scored.opportunity.country
        );
    }

    let report = RecommendationReport {
        metadata: ReportMetadata {
            site_name: context.site_name.clone(),
            total_candidates: candidates.len(),
            eligible_candidates: recommendations.len(),
            preset: preset_name,
            generated_at: Utc::now().to_rfc3339(),
        },
        recommendations,
    };

    // Write output
    info!("\nWriting report to {:?}", args.output);
    let file = File::create(&args.output)?;
    let writer = BufWriter::new(file);
    serde_json::to_writer_pretty(writer, &report)?;

    // Summary
    info!("\n{}", "=".repeat(60));
    info!("SUMMARY");
    info!("{}", "=".repeat(60));
    info!("Candidates evaluated: {}", report.metadata.total_candidates);
    info!("Qualified for scoring: {}", report.metadata.eligible_candidates);

    let mut tier_counts: BTreeMap<u8, usize> = BTreeMap::new();
    for scored in &report.recommendations {
        *tier_counts.entry(scored.tier.rank()).or_default() += 1;
    }
    for (rank, count) in tier_counts {
        info!("  Tier {}: {} candidates", rank, count);
    }

    Ok(())
}
