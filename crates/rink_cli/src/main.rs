//! Rink CLI
//!
//! Analyse game files, run season reports over a directory of games,
//! fingerprint movement samples, and export reports as MessagePack+LZ4.

#[cfg(feature = "cli")]
use anyhow::{Context, Result};
#[cfg(feature = "cli")]
use clap::{Args, Parser, Subcommand};
#[cfg(feature = "cli")]
use rink_core::config::{AnalyticsConfig, BucketCount};
#[cfg(feature = "cli")]
use rink_core::models::Subject;
#[cfg(feature = "cli")]
use std::path::{Path, PathBuf};

#[cfg(feature = "cli")]
#[derive(Parser)]
#[command(name = "rink")]
#[command(about = "Derived hockey analytics from play-by-play", long_about = None)]
struct Cli {
    /// Analytics config (YAML or JSON)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[cfg(feature = "cli")]
#[derive(Args)]
struct SubjectArgs {
    /// Team id
    #[arg(long)]
    team: u32,

    /// Player id (analyse one skater instead of the whole team)
    #[arg(long)]
    player: Option<u64>,
}

#[cfg(feature = "cli")]
impl SubjectArgs {
    fn subject(&self) -> Subject {
        match self.player {
            Some(player_id) => Subject::Player {
                player_id,
                team_id: self.team,
            },
            None => Subject::Team { team_id: self.team },
        }
    }
}

#[cfg(feature = "cli")]
#[derive(Subcommand)]
enum Commands {
    /// Analyse one game file
    Game {
        /// Game feed JSON
        file: PathBuf,

        #[command(flatten)]
        subject: SubjectArgs,

        /// Write the analysis here instead of stdout
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Season report over a directory of `<game_id>.json` files
    Season {
        dir: PathBuf,

        #[command(flatten)]
        subject: SubjectArgs,

        /// Override the rolling window from the config
        #[arg(long)]
        window: Option<usize>,

        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Movement fingerprint of a samples file
    Fingerprint {
        /// JSON array of { heading_deg, speed, game_id? }
        file: PathBuf,

        /// 8 or 16
        #[arg(long)]
        buckets: Option<u8>,

        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Export a JSON report as MessagePack+LZ4
    Export {
        #[arg(long)]
        r#in: PathBuf,

        #[arg(long)]
        out: PathBuf,

        /// Verify after writing
        #[arg(long, default_value = "false")]
        verify: bool,

        /// Output metadata JSON file
        #[arg(long)]
        metadata: Option<PathBuf>,
    },

    /// Check an export against its checksum
    Verify {
        file: PathBuf,

        #[arg(long)]
        checksum: String,
    },
}

#[cfg(feature = "cli")]
fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Stderr)
        .init();

    let cli = Cli::parse();
    let mut config = match &cli.config {
        Some(path) => rink_cli::load_config(path)?,
        None => AnalyticsConfig::default(),
    };

    match cli.command {
        Commands::Game { file, subject, out } => {
            let feed = rink_cli::load_game_feed(&file)?;
            let analysis = rink_core::analyze_game(&feed, &subject.subject(), &config)
                .with_context(|| format!("Failed to analyse {}", file.display()))?;
            emit(&analysis, out.as_deref())?;
        }

        Commands::Season {
            dir,
            subject,
            window,
            out,
        } => {
            if let Some(window) = window {
                config.rolling.window = window;
            }
            let source = rink_cli::FileGameSource::new(&dir);
            let request = rink_core::SeasonRequest {
                subject: subject.subject(),
                game_ids: source.game_ids()?,
                config,
            };
            let token = rink_core::CancellationToken::new();
            let outcome = rink_core::run_season(&source, &request, &token)?;
            if let Some(report) = outcome.report() {
                for skipped in &report.skipped_games {
                    log::warn!("game {} skipped: {}", skipped.game_id, skipped.reason);
                }
            }
            emit(&outcome, out.as_deref())?;
        }

        Commands::Fingerprint { file, buckets, out } => {
            if let Some(buckets) = buckets {
                config.fingerprint.bucket_count =
                    BucketCount::try_from(buckets).context("Invalid --buckets")?;
            }
            let samples = rink_cli::load_samples(&file)?;
            let fingerprint = rink_core::calculate_fingerprint(&samples, &config.fingerprint);
            emit(&fingerprint, out.as_deref())?;
        }

        Commands::Export {
            r#in,
            out,
            verify,
            metadata,
        } => {
            log::info!("exporting {} -> {}", r#in.display(), out.display());
            let meta = rink_cli::export_json_file(&r#in, &out)?;
            print_metadata(&meta);

            if verify {
                verify_export_integrity(&out, &meta.checksum)?;
            }
            if let Some(metadata_path) = metadata {
                rink_cli::save_metadata(&metadata_path, &meta)?;
                println!("Metadata saved to: {}", metadata_path.display());
            }
        }

        Commands::Verify { file, checksum } => {
            verify_export_integrity(&file, &checksum)?;
        }
    }

    Ok(())
}

#[cfg(feature = "cli")]
fn emit<T: serde::Serialize>(value: &T, out: Option<&Path>) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    match out {
        Some(path) => {
            std::fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))?;
            log::info!("wrote {}", path.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}

#[cfg(feature = "cli")]
fn print_metadata(meta: &rink_cli::ExportMetadata) {
    println!("Export written");
    println!(
        "   Original size:   {} bytes ({:.2} KB)",
        meta.original_size,
        meta.original_size as f64 / 1024.0
    );
    println!(
        "   Compressed size: {} bytes ({:.2} KB)",
        meta.compressed_size,
        meta.compressed_size as f64 / 1024.0
    );
    println!("   Compression:     {:.1}%", meta.compression_ratio * 100.0);
    println!("   Checksum:        {}", meta.checksum);
    println!("   Created:         {}", meta.created_at);
}

#[cfg(feature = "cli")]
fn verify_export_integrity(path: &Path, checksum: &str) -> Result<()> {
    if rink_cli::verify_export(path, checksum)? {
        println!("Export verification passed");
        Ok(())
    } else {
        anyhow::bail!("Export verification failed - checksum mismatch for {}", path.display())
    }
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("rink CLI is not available. Enable the 'cli' feature to use it.");
    std::process::exit(1);
}
