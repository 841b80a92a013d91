//! # cuekit
//!
//! Converts a RideWithGPS cue export (CSV) into a printable XLSX cuesheet.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Parser;
use cuekit_cue::{LogFacadeSink, read_route_table};
use cuekit_io_xlsx::generate_cuesheet;
use log::{LevelFilter, error, info, warn};

mod config;
mod naming;

use config::{SpecCliOverrides, derive_generation_options, read_config_file};
use naming::{derive_output_file_name, validate_csv_path, validate_route_url};

/// Command-line interface for cuekit
#[derive(Parser, Debug)]
#[command(name = "cuekit", version)]
#[command(about = "Convert RideWithGPS route exports to randonneur-style cuesheets")]
struct Cli {
    /// CSV route export to convert
    #[arg(short, long)]
    filename: Option<String>,

    /// RideWithGPS route URL, e.g. https://ridewithgps.com/routes/1234
    #[arg(short, long)]
    url: Option<String>,

    /// Override output file name
    #[arg(short, long)]
    output: Option<String>,

    /// Directory for XLSX files
    #[arg(short = 'x', long, default_value = "outputs")]
    xlsx_directory: PathBuf,

    /// Add a "distance since last control" column
    #[arg(short, long)]
    island: bool,

    /// Hide the direction column
    #[arg(short = 'd', long)]
    hidedir: bool,

    /// Show cumulative and interval distances with one decimal
    #[arg(long)]
    one_decimal: bool,

    /// Regular rows between page breaks
    #[arg(long)]
    page_break_interval: Option<usize>,

    /// TOML file with [event] and [options] tables
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    if let Err(e) = run() {
        error!("{e:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(if cli.verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        })
        .parse_default_env()
        .target(env_logger::Target::Stderr)
        .init();

    let config = cli.config.as_deref().map(read_config_file).transpose()?;
    let opts = derive_generation_options(
        config.as_ref(),
        &SpecCliOverrides {
            island: cli.island,
            hidedir: cli.hidedir,
            one_decimal: cli.one_decimal,
            verbose: cli.verbose,
            page_break_interval: cli.page_break_interval,
        },
    )?;

    let l_features: Vec<&str> = [
        (opts.include_distance_from_last, "include distance from last control"),
        (opts.hide_direction, "omit direction column"),
    ]
    .into_iter()
    .filter_map(|(if_enabled, c_feature)| if_enabled.then_some(c_feature))
    .collect();
    if !l_features.is_empty() {
        info!("Cuesheet will: {}", l_features.join(", "));
    }

    let route = cli.url.as_deref().map(validate_route_url).transpose()?;
    let path_csv = match (cli.filename.as_deref(), &route) {
        (Some(c_filename), route) => {
            let path_csv = validate_csv_path(c_filename)?;
            if let Some(route) = route {
                warn!(
                    "Using {} as the export of {}",
                    path_csv.display(),
                    route.url
                );
            }
            path_csv
        }
        (None, Some(route)) => bail!(
            "Downloading routes is not supported; save {} and pass it with --filename",
            route.csv_export_url()
        ),
        (None, None) => bail!("Provide a CSV export with --filename"),
    };

    let c_file_name =
        derive_output_file_name(cli.output.as_deref(), route.as_ref(), Some(&path_csv));
    fs::create_dir_all(&cli.xlsx_directory).with_context(|| {
        format!("Failed to create {}", cli.xlsx_directory.display())
    })?;
    let path_out = cli.xlsx_directory.join(c_file_name);
    info!("Output file: {}", path_out.display());

    let l_rows = read_route_table(&path_csv)?;
    generate_cuesheet(&path_out, &l_rows, &opts, &mut LogFacadeSink::default())?;
    Ok(())
}
