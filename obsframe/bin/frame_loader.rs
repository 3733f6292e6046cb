/*
 * Copyright (c) 2025-present Dawid Pawlik
 *
 * For educational use only by employees and students of MIMUW.
 * See LICENSE file for details.
 */

//! # OBSFRAME Frame Loader
//!
//! A command-line utility that builds a data frame from a YAML or JSON column config,
//! optionally sorts it, and prints it.
//!
//! ## Usage
//!
//! ```bash
//! # Load a config into a row-major frame and print it
//! cargo run --bin frame_loader -- observations.yaml
//!
//! # Use the column-major layout and sort by latitude, largest first
//! cargo run --bin frame_loader -- observations.json --layout cols --sort lat --descending
//! ```

use anyhow::Result;
use anyhow::bail;
use obsframe::Frame;
use obsframe::FrameCols;
use obsframe::FrameRows;
use obsframe::SortOrder;
use obsframe::config::FrameConfig;
use std::env;
use std::path::PathBuf;
use std::process;
use tracing::error;
use tracing::info;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::FmtSubscriber;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Layout {
    Rows,
    Cols,
}

#[derive(Debug)]
struct Options {
    config_path: PathBuf,
    layout: Layout,
    sort_column: Option<String>,
    order: SortOrder,
}

fn print_usage(program: &str) {
    eprintln!("Usage: {} <config.yaml|config.json> [OPTIONS]", program);
    eprintln!();
    eprintln!("Options:");
    eprintln!("  -l, --layout <rows|cols>  Storage layout of the frame (default: rows)");
    eprintln!("  -s, --sort <COLUMN>       Sort rows by this column before printing");
    eprintln!("  -d, --descending          Sort in descending order");
    eprintln!("  -h, --help                Print this help message");
}

fn parse_args(args: &[String]) -> Result<Options> {
    let mut config_path = None;
    let mut layout = Layout::Rows;
    let mut sort_column = None;
    let mut order = SortOrder::Ascending;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--layout" | "-l" => {
                i += 1;
                layout = match args.get(i).map(String::as_str) {
                    Some("rows") => Layout::Rows,
                    Some("cols") => Layout::Cols,
                    Some(other) => bail!("Unknown layout: {}", other),
                    None => bail!("--layout requires a value"),
                };
            }
            "--sort" | "-s" => {
                i += 1;
                match args.get(i) {
                    Some(column) => sort_column = Some(column.clone()),
                    None => bail!("--sort requires a column name"),
                }
            }
            "--descending" | "-d" => order = SortOrder::Descending,
            other if other.starts_with('-') => bail!("Unknown argument: {}", other),
            path => {
                if config_path.is_some() {
                    bail!("Only one config file can be given");
                }
                config_path = Some(PathBuf::from(path));
            }
        }
        i += 1;
    }

    match config_path {
        Some(config_path) => Ok(Options {
            config_path,
            layout,
            sort_column,
            order,
        }),
        None => bail!("Missing config file"),
    }
}

fn load_and_print<F: Frame + Default>(config: &FrameConfig, options: &Options) -> Result<()> {
    let mut frame: F = config.build()?;
    if let Some(column) = &options.sort_column {
        frame.sort_rows(column, options.order)?;
    }
    frame.print();
    info!(
        rows = frame.row_count(),
        columns = frame.column_count(),
        "Frame printed"
    );
    Ok(())
}

fn run(options: &Options) -> Result<()> {
    info!(path = ?options.config_path, layout = ?options.layout, "Loading frame config");
    let config = FrameConfig::from_path(&options.config_path)?;
    match options.layout {
        Layout::Rows => load_and_print::<FrameRows>(&config, options),
        Layout::Cols => load_and_print::<FrameCols>(&config, options),
    }
}

fn main() {
    // Initialize logging
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder().with_env_filter(filter).finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
    }

    let args: Vec<String> = env::args().collect();
    let program = args.first().map(String::as_str).unwrap_or("frame_loader");
    if args.iter().skip(1).any(|arg| arg == "--help" || arg == "-h") {
        print_usage(program);
        return;
    }

    let options = match parse_args(&args) {
        Ok(options) => options,
        Err(e) => {
            eprintln!("Error: {}", e);
            print_usage(program);
            process::exit(1);
        }
    };

    if let Err(e) = run(&options) {
        error!(error = %format!("{:#}", e), "Failed to load frame");
        process::exit(1);
    }
}
