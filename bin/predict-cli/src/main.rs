// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # predict-rt
//!
//! Command-line driver for the inference predictor harness.
//!
//! Runs the stub reference engine end to end: binding resolution, device
//! staging, batch execution, result encoding, and (optionally) per-layer
//! profiling — the same path a real backend takes behind the same traits.
//!
//! ## Usage
//! ```bash
//! # Run one batch and print the top classes per example
//! predict-rt run --shape 3,224,224 --classes 1000 --batch 2
//!
//! # Raw JSON records
//! predict-rt run --classes 10 --json
//!
//! # Record a profiling session across several executions
//! predict-rt profile --name run1 --iterations 3
//! ```

mod commands;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "predict-rt",
    about = "Synchronous batch-inference harness with per-layer profiling",
    version,
    author
)]
struct Cli {
    /// Path to a TOML configuration file (overrides defaults).
    #[arg(short, long, global = true)]
    config: Option<std::path::PathBuf>,

    /// Enable verbose logging (repeat for more: -v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run one predict call and print the results.
    Run {
        /// Input shape as channels,height,width.
        #[arg(short, long, default_value = "3,224,224")]
        shape: String,

        /// Number of output classes.
        #[arg(long, default_value_t = 10)]
        classes: usize,

        /// Batch size.
        #[arg(short, long, default_value_t = 1)]
        batch: usize,

        /// Print the raw JSON records instead of a top-k table.
        #[arg(long)]
        json: bool,

        /// Number of top classes to show per example.
        #[arg(long, default_value_t = 5)]
        top: usize,
    },

    /// Run with a profiling session and print the layer timeline.
    Profile {
        /// Input shape as channels,height,width.
        #[arg(short, long, default_value = "3,224,224")]
        shape: String,

        /// Number of output classes.
        #[arg(long, default_value_t = 10)]
        classes: usize,

        /// Batch size.
        #[arg(short, long, default_value_t = 1)]
        batch: usize,

        /// Session name.
        #[arg(short, long, default_value = "run1")]
        name: String,

        /// Session metadata string.
        #[arg(short, long, default_value = "")]
        metadata: String,

        /// Number of predict calls to record in the session.
        #[arg(short, long, default_value_t = 1)]
        iterations: usize,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing/logging based on verbosity.
    commands::init_tracing(cli.verbose);

    let config = commands::load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Run {
            shape,
            classes,
            batch,
            json,
            top,
        } => commands::run::execute(config, shape, classes, batch, json, top),
        Commands::Profile {
            shape,
            classes,
            batch,
            name,
            metadata,
            iterations,
        } => commands::profile::execute(config, shape, classes, batch, name, metadata, iterations),
    }
}
