use std::process;
use log::{error, LevelFilter};

use rawcarve::utils::logger::Logger;
use rawcarve::commands::{build_cli, CommandFactory, RawcarveCommandFactory};

fn main() {
    let matches = build_cli().get_matches();

    let level = if matches.get_flag("verbose") {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    let logger = match matches.get_one::<String>("log-file") {
        Some(log_file) => match Logger::with_file(log_file, level) {
            Ok(l) => l,
            Err(e) => {
                eprintln!("Error initializing logger: {}", e);
                process::exit(1);
            }
        },
        None => Logger::console(level),
    };
    logger.init_global();

    let factory = RawcarveCommandFactory::new();

    let command_result = factory.create_command(&matches);
    match command_result {
        Ok(command) => {
            if let Err(e) = command.execute() {
                error!("Command execution error: {}", e);
                eprintln!("Error: {}", e);
                process::exit(1);
            }
        },
        Err(e) => {
            error!("Failed to create command: {}", e);
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };
}
