use affinity::{
    cluster_by_theme, rank_by_distance, rank_by_score, similarity_links, top_n, AffinityEngine,
    Connection, ConnectionStats, Coverage, Dataset, Institution, Leaderboards, PresetName, Profile,
};
use anyhow::Context;
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

/// Multi-factor similarity and clustering for art and design schools
#[derive(Parser, Debug)]
#[command(name = "affinity")]
#[command(about = "Find and explain similar institutions", long_about = None)]
struct Args {
    /// Log level
    #[arg(long, default_value = "info", global = true)]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Rank and explain the institutions most similar to a reference
    Connections {
        /// Path to the dataset JSON file
        #[arg(short, long)]
        dataset: PathBuf,

        /// Name of the reference institution
        #[arg(short, long)]
        reference: String,

        /// Scoring preset (general or clustering)
        #[arg(long, default_value = "general")]
        profile: PresetName,

        /// JSON profile overriding the preset
        #[arg(long)]
        profile_file: Option<PathBuf>,

        /// Connections listed by score
        #[arg(long, default_value_t = 15)]
        top: usize,

        /// Connections listed by distance
        #[arg(long, default_value_t = 10)]
        geo_top: usize,

        /// Members shown per cluster
        #[arg(long, default_value_t = 5)]
        preview: usize,

        /// Print JSON instead of a text report
        #[arg(long)]
        json: bool,
    },
    /// Emit weighted links between every admitted pair
    Network {
        /// Path to the dataset JSON file
        #[arg(short, long)]
        dataset: PathBuf,

        /// Scoring preset (general or clustering)
        #[arg(long, default_value = "clustering")]
        profile: PresetName,

        /// JSON profile overriding the preset
        #[arg(long)]
        profile_file: Option<PathBuf>,

        /// Score that maps to full link strength
        #[arg(long, default_value_t = affinity::DEFAULT_STRENGTH_SCALE)]
        strength_scale: f64,

        /// Print JSON instead of one line per link
        #[arg(long)]
        json: bool,
    },
    /// Dataset-wide leaderboards
    Leaderboards {
        /// Path to the dataset JSON file
        #[arg(short, long)]
        dataset: PathBuf,

        /// Rows shown per board
        #[arg(long, default_value_t = 5)]
        top: usize,

        /// Print JSON instead of a text report
        #[arg(long)]
        json: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let log_level = match args.log_level.as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match args.command {
        Command::Connections {
            dataset,
            reference,
            profile,
            profile_file,
            top,
            geo_top,
            preview,
            json,
        } => {
            let dataset = load_dataset(&dataset)?;
            let engine = load_engine(profile, profile_file.as_deref())?;
            let limits = ReportLimits {
                top,
                geo_top,
                preview,
            };
            connections(&dataset, &engine, &reference, &limits, json)
        }
        Command::Network {
            dataset,
            profile,
            profile_file,
            strength_scale,
            json,
        } => {
            anyhow::ensure!(
                strength_scale.is_finite() && strength_scale > 0.0,
                "strength scale must be positive, got {strength_scale}"
            );
            let dataset = load_dataset(&dataset)?;
            let engine = load_engine(profile, profile_file.as_deref())?;
            let links = similarity_links(&engine, &dataset.universities, strength_scale);
            if json {
                println!("{}", serde_json::to_string_pretty(&links)?);
            } else {
                for link in &links {
                    println!(
                        "{} -- {}  score {:.2}  strength {:.2}",
                        link.source, link.target, link.score, link.strength
                    );
                }
            }
            Ok(())
        }
        Command::Leaderboards { dataset, top, json } => {
            let dataset = load_dataset(&dataset)?;
            let mut boards = Leaderboards::compute(&dataset);
            boards.truncate(top);
            if json {
                println!("{}", serde_json::to_string_pretty(&boards)?);
            } else {
                print_leaderboards(&boards, &Coverage::compute(&dataset.universities));
            }
            Ok(())
        }
    }
}

fn load_dataset(path: &Path) -> anyhow::Result<Dataset> {
    let file = File::open(path)
        .with_context(|| format!("failed to open dataset {}", path.display()))?;
    let dataset = Dataset::from_reader(BufReader::new(file))
        .with_context(|| format!("failed to parse dataset {}", path.display()))?;
    info!("Loaded {} institutions from {}", dataset.universities.len(), path.display());
    Ok(dataset)
}

fn load_engine(preset: PresetName, profile_file: Option<&Path>) -> anyhow::Result<AffinityEngine> {
    let profile = match profile_file {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("failed to open profile {}", path.display()))?;
            serde_json::from_reader::<_, Profile>(BufReader::new(file))
                .with_context(|| format!("failed to parse profile {}", path.display()))?
        }
        None => Profile::preset(preset),
    };
    let engine = AffinityEngine::try_new(profile).context("invalid scoring profile")?;
    info!("Admission threshold: {}", engine.profile().admission_threshold);
    Ok(engine)
}

struct ReportLimits {
    top: usize,
    geo_top: usize,
    preview: usize,
}

#[derive(Serialize)]
struct ConnectionsReport<'a> {
    reference: &'a str,
    stats: ConnectionStats,
    by_score: &'a [Connection],
    by_distance: Vec<&'a Connection>,
    clusters: Vec<affinity::ThemeCluster<'a>>,
}

fn connections(
    dataset: &Dataset,
    engine: &AffinityEngine,
    reference: &str,
    limits: &ReportLimits,
    json: bool,
) -> anyhow::Result<()> {
    let catalog = &dataset.universities;
    let ranked = rank_by_score(engine.connections(catalog, reference)?);
    let stats = ConnectionStats::compute(&ranked, catalog.len().saturating_sub(1));
    info!("{} of {} candidates admitted", stats.results_count, stats.candidates_count);

    let by_distance = rank_by_distance(&ranked);
    let clusters = cluster_by_theme(&ranked);

    if json {
        let mut clusters = clusters;
        for cluster in &mut clusters {
            cluster.members.truncate(limits.preview);
        }
        let report = ConnectionsReport {
            reference,
            stats,
            by_score: top_n(&ranked, limits.top),
            by_distance: top_n(&by_distance, limits.geo_top).to_vec(),
            clusters,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    let reference_inst = catalog.reference(reference)?;
    print_profile(reference_inst);

    println!("\nTop connected institutions:");
    println!("{}", "-".repeat(50));
    for (i, conn) in top_n(&ranked, limits.top).iter().enumerate() {
        println!("{:2}. {}", i + 1, conn.candidate);
        println!("    Similarity score: {:.1}", conn.score);
        if let Some(candidate) = catalog.get(&conn.candidate) {
            println!(
                "    Type: {} | Ranking: {} | Students: {}",
                candidate.kind,
                display_or_na(candidate.ranking.national),
                display_or_na(candidate.stats.students)
            );
            println!("    State: {}", candidate.state);
        }
        for line in conn.explanation_trail() {
            println!("    - {line}");
        }
        println!();
    }

    println!("Nearest institutions:");
    println!("{}", "-".repeat(40));
    for (i, conn) in top_n(&by_distance, limits.geo_top).iter().enumerate() {
        if let Some(distance) = conn.distance {
            println!("{:2}. {} (distance: {:.2})", i + 1, conn.candidate, distance);
        }
    }

    println!("\nThematic clusters:");
    println!("{}", "-".repeat(25));
    for cluster in &clusters {
        println!("{}: {} institutions", cluster.theme, cluster.len());
        for conn in cluster.preview(limits.preview) {
            println!("   - {} (score: {:.1})", conn.candidate, conn.score);
        }
    }

    println!("\nSummary:");
    println!(
        "   {} of {} candidates admitted, scores {:.1} to {:.1} (avg {:.1})",
        stats.results_count,
        stats.candidates_count,
        stats.lowest_score,
        stats.best_score,
        stats.avg_score
    );
    if let Some(factor) = stats.top_contributing_factor {
        println!("   Strongest factor of the best match: {factor}");
    }
    Ok(())
}

fn print_profile(inst: &Institution) {
    println!("Profile of {}", inst.name);
    println!("{}", "=".repeat(60));
    println!("   Type: {}", inst.kind);
    println!("   National ranking: {}", display_or_na(inst.ranking.national));
    println!("   Students: {}", display_or_na(inst.stats.students));
    println!("   Acceptance rate: {}", display_or_na(inst.stats.acceptance_rate));
    println!("   Programs: {}", inst.programs.len());
    println!("   Founded: {}", display_or_na(inst.stats.founded));
    println!("   State: {}", inst.state);
    let specializations: Vec<&str> = inst.specializations().take(8).collect();
    if !specializations.is_empty() {
        println!("   Key specializations: {}", specializations.join(", "));
    }
}

fn display_or_na<T: std::fmt::Display>(value: Option<T>) -> String {
    value.map_or_else(|| "n/a".to_string(), |v| v.to_string())
}

fn print_leaderboards(boards: &Leaderboards, coverage: &Coverage) {
    println!(
        "Dataset: {} institutions, {} with ranking and stats ({:.0}%), {} located",
        coverage.institutions,
        coverage.with_profile_data,
        coverage.ratio() * 100.0,
        coverage.with_coordinates
    );

    println!("\nEmployment rate after one year:");
    for (i, row) in boards.employment.iter().enumerate() {
        println!("{:2}. {}: {:.0}%", i + 1, row.institution, row.value * 100.0);
    }

    println!("\nMost affordable cities:");
    for (i, row) in boards.living_costs.iter().enumerate() {
        println!(
            "{:2}. {} ({}): {:.0} EUR/month",
            i + 1,
            row.institution,
            row.city,
            row.monthly_cost
        );
    }

    println!("\nMost international:");
    for (i, row) in boards.international.iter().enumerate() {
        println!(
            "{:2}. {}: {:.0}% international students",
            i + 1,
            row.institution,
            row.value * 100.0
        );
    }

    println!("\nSustainability:");
    for (i, row) in boards.sustainability.iter().enumerate() {
        println!(
            "{:2}. {}: {:.2} (carbon neutral by {})",
            i + 1,
            row.institution,
            row.score,
            row.carbon_neutral_target
        );
    }

    println!("\nResearch:");
    for (i, row) in boards.research.iter().enumerate() {
        println!(
            "{:2}. {}: {:.1} ({} projects, {:.1}M EUR)",
            i + 1,
            row.institution,
            row.score,
            row.active_projects,
            row.funding_millions
        );
    }

    println!("\nDigital infrastructure:");
    for (i, row) in boards.digital.iter().enumerate() {
        println!(
            "{:2}. {}: {:.1} ({} fab labs, {} VR/AR, {:.0} EUR/student)",
            i + 1,
            row.institution,
            row.score,
            row.fab_labs,
            row.vr_ar_facilities,
            row.budget_per_student
        );
    }

    println!("\nCollaboration network: {} partnerships", boards.partnerships);
    for (i, row) in boards.collaboration.iter().enumerate() {
        println!("{:2}. {}: {} partnerships", i + 1, row.institution, row.collaborations);
    }

    println!("\nProgram clusters:");
    for cluster in &boards.clusters {
        println!("{}: {} institutions", cluster.name, cluster.total);
        for member in &cluster.preview {
            println!("   - {member}");
        }
        if cluster.remaining > 0 {
            println!("   ... and {} more", cluster.remaining);
        }
    }
}
