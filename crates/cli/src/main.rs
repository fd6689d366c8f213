//! brickset CLI
//!
//! Aggregate queries over a Brickset LEGO catalog

mod config;
mod output;

use anyhow::{Context, Result};
use brickset_core::{Error as QueryError, LegoSetRepository};
use brickset_formats::{open_dataset, open_dataset_with_format, DatasetFormat, DatasetReader, FileLoader};
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use config::{DatasetConfig, DatasetSource, QueryConfig};

#[derive(Parser)]
#[command(name = "brickset")]
#[command(version, about = "Aggregate queries over a Brickset LEGO catalog", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Catalog file (JSON array or JSON Lines, optionally gzipped)
    #[arg(short, long, global = true, value_name = "FILE")]
    data: Option<PathBuf>,

    /// Config file with the catalog location (YAML or TOML)
    #[arg(short, long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Catalog format, overriding detection from the file extension
    #[arg(long, global = true, value_name = "json|jsonl")]
    format: Option<DatasetFormat>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output results in JSON format
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Check whether a set with exactly this name exists
    Exists {
        /// Set name (case-sensitive)
        name: String,
    },

    /// List every set name in upper case
    Names,

    /// Print the average piece count (truncated)
    AveragePieces,

    /// Map each catalog number to its piece count
    NumberPieces,

    /// Count how many sets share each name
    NameCounts,

    /// Run every query in turn
    Report {
        /// Name to look up with the existence check
        #[arg(long, default_value = "Heart")]
        name: String,
    },

    /// Show catalog statistics
    Stats,

    /// Print the first sets of the catalog
    Inspect {
        /// Number of sets to show
        #[arg(short = 'n', long, default_value = "10")]
        limit: usize,
    },

    /// Count sets in the catalog
    Count,

    /// Write a config file naming the catalog (YAML or TOML)
    InitConfig {
        /// Config file to create
        #[arg(value_name = "FILE")]
        output: PathBuf,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so stdout carries only results
    let log_level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .with_ansi(!cli.json)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    if let Commands::Completions { shell } = cli.command {
        generate_completions(shell);
        return Ok(());
    }

    if let Commands::InitConfig { output, force } = &cli.command {
        return init_config(output, *force, cli.data.clone(), cli.format);
    }

    let config = match &cli.config {
        Some(path) => Some(QueryConfig::load(path)?),
        None => None,
    };
    let source = config::resolve_source(cli.data.clone(), cli.format, config.as_ref());
    debug!("Catalog source: {:?}", source);

    match cli.command {
        Commands::Exists { name } => exists(&source, &name, cli.json),
        Commands::Names => names(&source, cli.json),
        Commands::AveragePieces => average_pieces(&source, cli.json),
        Commands::NumberPieces => number_pieces(&source, cli.json),
        Commands::NameCounts => name_counts(&source, cli.json),
        Commands::Report { name } => report(&source, &name, cli.json),
        Commands::Stats => stats(&source, cli.json),
        Commands::Inspect { limit } => inspect_dataset(&source, limit),
        Commands::Count => count_dataset(&source, cli.json),
        Commands::InitConfig { .. } | Commands::Completions { .. } => Ok(()),
    }
}

fn open_repository(source: &DatasetSource) -> Result<LegoSetRepository> {
    let loader = match source.format {
        Some(format) => FileLoader::with_format(format),
        None => FileLoader::new(),
    };

    LegoSetRepository::load(&loader, &source.path)
        .with_context(|| format!("Failed to load catalog: {}", source.path.display()))
}

fn open_reader(source: &DatasetSource) -> Result<Box<dyn DatasetReader>> {
    let reader = match source.format {
        Some(format) => open_dataset_with_format(&source.path, format),
        None => open_dataset(&source.path),
    };
    reader.with_context(|| format!("Failed to open catalog: {}", source.path.display()))
}

/// Average piece count, treating an empty catalog as "no data"
fn average_or_none(repo: &LegoSetRepository) -> Result<Option<u32>> {
    match repo.average_pieces() {
        Ok(avg) => Ok(Some(avg)),
        Err(QueryError::EmptyDataset) => {
            warn!("Catalog has no sets; average piece count is undefined");
            Ok(None)
        }
        Err(e) => Err(e.into()),
    }
}

fn exists(source: &DatasetSource, name: &str, json_output: bool) -> Result<()> {
    let repo = open_repository(source)?;
    let found = repo.exists_with_name(name);

    if json_output {
        output::print_json(&serde_json::json!({ "name": name, "exists": found }))?;
    } else {
        println!("{}", found);
    }

    Ok(())
}

fn names(source: &DatasetSource, json_output: bool) -> Result<()> {
    let repo = open_repository(source)?;
    let names = repo.names_upper_case();

    if json_output {
        output::print_json(&names)?;
    } else {
        for name in names {
            println!("{}", name);
        }
    }

    Ok(())
}

fn average_pieces(source: &DatasetSource, json_output: bool) -> Result<()> {
    let repo = open_repository(source)?;
    let average = average_or_none(&repo)?;

    if json_output {
        output::print_json(&serde_json::json!({ "average_pieces": average }))?;
    } else {
        match average {
            Some(avg) => println!("{}", avg),
            None => println!("no data"),
        }
    }

    Ok(())
}

fn number_pieces(source: &DatasetSource, json_output: bool) -> Result<()> {
    let repo = open_repository(source)?;
    let map = output::sorted(repo.number_to_pieces());

    if json_output {
        output::print_json(&map)?;
    } else {
        output::print_map(&map);
    }

    Ok(())
}

fn name_counts(source: &DatasetSource, json_output: bool) -> Result<()> {
    let repo = open_repository(source)?;
    let map = output::sorted(repo.name_occurrences());

    if json_output {
        output::print_json(&map)?;
    } else {
        output::print_map(&map);
    }

    Ok(())
}

fn report(source: &DatasetSource, name: &str, json_output: bool) -> Result<()> {
    let repo = open_repository(source)?;

    info!("Running all queries over {} sets", repo.len());

    let found = repo.exists_with_name(name);
    let names = repo.names_upper_case();
    let average = average_or_none(&repo)?;
    let numbers = output::sorted(repo.number_to_pieces());
    let counts = output::sorted(repo.name_occurrences());

    if json_output {
        let report = serde_json::json!({
            "catalog": source.path.to_string_lossy().to_string(),
            "exists": { "name": name, "found": found },
            "names_upper_case": names,
            "average_pieces": average,
            "number_to_pieces": numbers,
            "name_occurrences": counts,
        });
        output::print_json(&report)?;
    } else {
        println!("Set named {:?} exists: {}", name, found);
        println!("\nNames:");
        for name in &names {
            println!("  {}", name);
        }
        match average {
            Some(avg) => println!("\nAverage pieces: {}", avg),
            None => println!("\nAverage pieces: no data"),
        }
        println!("\nPieces by number:");
        output::print_map(&numbers);
        println!("\nSets per name:");
        output::print_map(&counts);
    }

    Ok(())
}

fn stats(source: &DatasetSource, json_output: bool) -> Result<()> {
    let repo = open_repository(source)?;
    let summary = repo.summary();

    if json_output {
        output::print_json(&summary)?;
    } else {
        output::print_summary_report(&source.path, &summary);
    }

    Ok(())
}

fn inspect_dataset(source: &DatasetSource, limit: usize) -> Result<()> {
    info!("Inspecting catalog: {:?}", source.path);

    let mut reader = open_reader(source)?;
    let mut count = 0;

    while count < limit {
        let Some(result) = reader.next() else { break };
        let set = result?;
        count += 1;
        println!("Set #{}: {}", count, serde_json::to_string_pretty(&set)?);
    }

    info!(
        "Processed {} sets ({} bytes)",
        reader.records_processed(),
        reader.bytes_processed()
    );

    Ok(())
}

fn count_dataset(source: &DatasetSource, json_output: bool) -> Result<()> {
    use indicatif::{ProgressBar, ProgressStyle};

    info!("Counting sets in: {:?}", source.path);

    let mut reader = open_reader(source)?;

    let pb = match reader.total_bytes() {
        Some(total) if !json_output => {
            let pb = ProgressBar::new(total);
            pb.set_style(
                ProgressStyle::default_bar()
                    .template("[{elapsed_precise}] [{bar:40.cyan/blue}] {bytes}/{total_bytes} ({eta})")?
                    .progress_chars("#>-"),
            );
            Some(pb)
        }
        _ => None,
    };

    let mut count = 0;
    while let Some(result) = reader.next() {
        let _set = result?;
        count += 1;

        if let Some(ref pb) = pb {
            pb.set_position(reader.bytes_processed());
        }

        if count % 10000 == 0 {
            debug!("Processed {} sets...", count);
        }
    }

    if let Some(pb) = pb {
        pb.finish();
    }

    if json_output {
        output::print_json(&serde_json::json!({ "total_sets": count }))?;
    } else {
        println!("Total sets: {}", output::format_with_commas(count));
    }
    info!("Processed {} bytes", reader.bytes_processed());

    Ok(())
}

fn init_config(
    output: &Path,
    force: bool,
    data: Option<PathBuf>,
    format: Option<DatasetFormat>,
) -> Result<()> {
    if output.exists() && !force {
        anyhow::bail!(
            "Config file already exists: {} (use --force to overwrite)",
            output.display()
        );
    }

    let source = config::resolve_source(data, format, None);
    let config = QueryConfig {
        dataset: DatasetConfig {
            path: source.path.to_string_lossy().to_string(),
            format: source.format,
        },
    };
    config.save(output)?;

    info!("Wrote config to {:?}", output);
    Ok(())
}

fn generate_completions(shell: Shell) {
    let mut cmd = Cli::command();
    let bin_name = cmd.get_name().to_string();
    generate(shell, &mut cmd, bin_name, &mut std::io::stdout());
}
