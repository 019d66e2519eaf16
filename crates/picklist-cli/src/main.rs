//! Picklist CLI.
//!
//! `picklist solve` loads an inventory file and a search configuration,
//! runs the alternative-solution search with the built-in exhaustive oracle
//! and persists every accepted solution. `picklist show` pretty-prints a
//! stored solution by its discovery index.
//!
//! Run with: `picklist solve inventory.toml --config search.toml`

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use serde::Deserialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

use picklist_config::SearchConfig;
use picklist_core::{InputRow, Inventory};
use picklist_solver::{
    render_solution, AlternativeSearch, ExhaustiveOracle, FsSolutionStore, SolutionStore,
};

#[derive(Parser)]
#[command(name = "picklist", about = "Hierarchical cylinder selection search", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the alternative-solution search over an inventory file.
    Solve {
        /// Inventory TOML file with one [[rows]] entry per cylinder.
        inventory: PathBuf,

        /// Search configuration file (TOML).
        #[arg(long, default_value = "search.toml")]
        config: PathBuf,

        /// Override the configured output directory.
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Pretty-print a stored solution.
    Show {
        /// 1-based discovery index of the solution.
        index: usize,

        /// Directory the solutions were written to.
        #[arg(long, default_value = "solutions")]
        dir: PathBuf,
    },
}

/// Inventory file payload: the input-record boundary.
///
/// A missing required field fails deserialization and is fatal to the whole
/// run — malformed rows are not patched downstream.
#[derive(Debug, Deserialize)]
struct InventoryFile {
    rows: Vec<InputRow>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    match Cli::parse().command {
        Command::Solve {
            inventory,
            config,
            out,
        } => solve(inventory, config, out),
        Command::Show { index, dir } => show(index, dir),
    }
}

fn solve(
    inventory_path: PathBuf,
    config_path: PathBuf,
    out: Option<PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = SearchConfig::load(&config_path)?;
    config.validate()?;

    let contents = std::fs::read_to_string(&inventory_path)?;
    let file: InventoryFile = toml::from_str(&contents)?;
    let inventory = Inventory::from_rows(&file.rows);
    info!(
        event = "inventory_loaded",
        containers = inventory.containers().len(),
        boxes = inventory.boxes().len(),
        cylinders = inventory.cylinders().len(),
    );

    let output_dir = out
        .or_else(|| config.output_dir.clone())
        .unwrap_or_else(|| PathBuf::from("solutions"));
    let store = FsSolutionStore::new(&output_dir)?;

    let mut search =
        AlternativeSearch::new(ExhaustiveOracle::new(), store).with_config(&config);
    let outcome = search.run(&inventory, &config.targets.to_targets())?;

    println!(
        "{} solution(s) written to {} ({:?})",
        outcome.accepted(),
        output_dir.display(),
        outcome.stop,
    );
    Ok(())
}

fn show(index: usize, dir: PathBuf) -> Result<(), Box<dyn std::error::Error>> {
    let store = FsSolutionStore::new(&dir)?;
    match store.load(index)? {
        Some(cylinder_ids) => {
            print!("{}", render_solution(index, &cylinder_ids));
            Ok(())
        }
        None => Err(format!("no solution {index} under {}", dir.display()).into()),
    }
}
