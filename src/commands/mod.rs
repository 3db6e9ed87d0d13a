//! CLI command implementations
//!
//! This module contains the command-line definition and the commands it
//! dispatches to, using the Command pattern.

pub mod command_traits;
pub mod scan_command;

pub use command_traits::{Command, CommandFactory};
pub use scan_command::ScanCommand;

use clap::{Arg, ArgAction, ArgMatches, Command as ClapCommand};
use crate::carve::driver::DEFAULT_OUTPUT_DIR;
use crate::carve::errors::CarveResult;
use crate::io::input::STDIN_PATH;

/// Build the command-line interface
pub fn build_cli() -> ClapCommand {
    ClapCommand::new("rawcarve")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Extract images from raw data by guessing their geometry")
        .arg(
            Arg::new("input")
                .help("Raw data input file ('-' for standard input)")
                .default_value(STDIN_PATH)
                .index(1),
        )
        .arg(
            Arg::new("width")
                .long("width")
                .help("Image width (default: try common display widths)")
                .value_name("PIXELS"),
        )
        .arg(
            Arg::new("height")
                .long("height")
                .help("Image height (default: cover all remaining data)")
                .value_name("PIXELS"),
        )
        .arg(
            Arg::new("mode")
                .long("mode")
                .help("Image mode within data (e.g. RGB, RGBA, ABGR, BGRx)")
                .value_name("MODE"),
        )
        .arg(
            Arg::new("out")
                .short('o')
                .long("out")
                .help("Output directory")
                .value_name("DIR")
                .default_value(DEFAULT_OUTPUT_DIR),
        )
        .arg(
            Arg::new("count")
                .long("count")
                .help("Number of images (max) extracted per setting")
                .value_name("N"),
        )
        .arg(
            Arg::new("offset")
                .long("offset")
                .help("Offset in bytes")
                .value_name("BYTES")
                .default_value("0"),
        )
        .arg(
            Arg::new("presets")
                .long("presets")
                .help("TOML file with preset 'widths' and 'modes' lists")
                .value_name("FILE"),
        )
        .arg(
            Arg::new("log-file")
                .long("log-file")
                .help("Mirror log output to this file")
                .value_name("FILE"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enable verbose output")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("quiet")
                .short('q')
                .long("quiet")
                .help("Do not draw progress bars")
                .action(ArgAction::SetTrue),
        )
}

/// Factory for creating command instances based on CLI arguments
pub struct RawcarveCommandFactory;

impl RawcarveCommandFactory {
    /// Create a new factory instance
    pub fn new() -> Self {
        RawcarveCommandFactory
    }
}

impl Default for RawcarveCommandFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandFactory for RawcarveCommandFactory {
    fn create_command(&self, args: &ArgMatches) -> CarveResult<Box<dyn Command>> {
        Ok(Box::new(ScanCommand::new(args)?))
    }
}
