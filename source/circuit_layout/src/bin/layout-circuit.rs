// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use circuit_layout::{Circuit, LayoutConfig, collapse_repetition, group_qubits, layout};
use clap::Parser;
use log::info;
use miette::{Context, IntoDiagnostic, Result};
use std::{
    fs,
    io::{self, Read},
    path::{Path, PathBuf},
};

/// Lays out a quantum circuit diagram and prints the resolved geometry.
#[derive(Parser)]
#[command(name = "layout-circuit", version, long_about = None)]
struct Cli {
    /// Circuit JSON document. Reads standard input when omitted.
    input: Option<PathBuf>,

    /// JSON file overriding the default layout dimensions.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Comma-separated qubit ids to merge into a single register.
    #[arg(long, value_delimiter = ',')]
    group_qubits: Vec<usize>,

    /// Fold repeated runs of operations into groups before layout.
    #[arg(long)]
    loop_detection: bool,

    /// Print a text summary instead of JSON.
    #[arg(long)]
    summary: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => serde_json::from_str(&read_file(path)?)
            .into_diagnostic()
            .with_context(|| format!("invalid layout config in {}", path.display()))?,
        None => LayoutConfig::default(),
    };

    let source = match &cli.input {
        Some(path) => read_file(path)?,
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .into_diagnostic()
                .context("could not read circuit from standard input")?;
            buf
        }
    };
    let mut circuit: Circuit = serde_json::from_str(&source)
        .into_diagnostic()
        .context("invalid circuit JSON")?;

    if !cli.group_qubits.is_empty() {
        circuit = group_qubits(circuit, &cli.group_qubits)?;
        info!("merged qubits {:?} into one register", cli.group_qubits);
    }

    if cli.loop_detection {
        let before = circuit.operations.len();
        circuit.operations = collapse_repetition(circuit.operations);
        info!(
            "collapsed {before} operations into {}",
            circuit.operations.len()
        );
    }

    let layout = layout(&circuit, &config)?;
    if cli.summary {
        print!("{layout}");
    } else {
        let json = serde_json::to_string_pretty(&layout).into_diagnostic()?;
        println!("{json}");
    }
    Ok(())
}

fn read_file(path: &Path) -> Result<String> {
    fs::read_to_string(path)
        .into_diagnostic()
        .with_context(|| format!("could not read {}", path.display()))
}
