//! Raw image scan command
//!
//! This module implements the command that scans an input file for
//! plausible raw images and writes them out as PNG files.

use std::path::PathBuf;
use std::str::FromStr;

use clap::ArgMatches;
use log::{debug, info};

use crate::carve::driver::{ScanConfig, Scanner};
use crate::carve::errors::{CarveError, CarveResult};
use crate::carve::geometry::Presets;
use crate::commands::command_traits::Command;
use crate::io::input::open_input;

/// Command for scanning raw data for images
#[derive(Debug)]
pub struct ScanCommand {
    /// Path to the input file, or `-` for standard input
    input_file: String,
    /// Validated scanner
    scanner: Scanner,
}

impl ScanCommand {
    /// Create a new scan command
    ///
    /// All arguments are parsed and validated here, so a bad mode or number
    /// fails before the input is opened.
    ///
    /// # Arguments
    /// * `args` - CLI argument matches from clap
    ///
    /// # Returns
    /// A new ScanCommand instance or an error
    pub fn new(args: &ArgMatches) -> CarveResult<Self> {
        let input_file = args.get_one::<String>("input")
            .ok_or_else(|| CarveError::InvalidArgument("Missing input file".to_string()))?
            .clone();
        debug!("Input file: {}", input_file);

        let presets = match args.get_one::<String>("presets") {
            Some(path) => Presets::load(path)?,
            None => Presets::default(),
        };

        let config = ScanConfig {
            width: parse_number(args, "width")?,
            height: parse_number(args, "height")?,
            mode: args.get_one::<String>("mode").cloned(),
            output_dir: args.get_one::<String>("out")
                .map(PathBuf::from)
                .unwrap_or_else(|| ScanConfig::default().output_dir),
            count: parse_number(args, "count")?,
            offset: parse_number(args, "offset")?.unwrap_or(0),
            presets,
            show_progress: !args.get_flag("quiet"),
        };
        debug!("Scan configuration: {:?}", config);

        let scanner = Scanner::new(config)?;

        Ok(ScanCommand {
            input_file,
            scanner,
        })
    }
}

impl Command for ScanCommand {
    fn execute(&self) -> CarveResult<()> {
        let mut reader = open_input(&self.input_file)?;
        let reports = self.scanner.scan(&mut reader)?;

        info!("Summary:");
        for report in &reports {
            info!(
                "  {:<6} {}x{}: {} written, {} flat",
                report.job.layout.to_string(),
                report.job.width,
                report.job.height,
                report.summary.written,
                report.summary.skipped
            );
        }

        Ok(())
    }
}

/// Parse an optional numeric argument
fn parse_number<T: FromStr>(args: &ArgMatches, name: &str) -> CarveResult<Option<T>> {
    args.get_one::<String>(name)
        .map(|value| {
            value.trim().parse::<T>().map_err(|_| {
                CarveError::InvalidArgument(format!("--{} expects a non-negative integer, got '{}'", name, value))
            })
        })
        .transpose()
}
