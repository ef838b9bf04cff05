// Pi-hole: A black hole for Internet advertisements
// (c) 2019 Pi-hole, LLC (https://pi-hole.net)
// Network-wide ad blocking via your own hardware.
//
// API
// Handle the CLI Arguments
//
// This file is copyright under the latest version of the EUPL.
// Please see LICENSE file for your rights under this license.

use crate::{
    cli::args::{CliArgs, CliCommand},
    env::Config,
    setup::start,
    util::Error
};
use structopt::StructOpt;

/// Parse the CLI arguments and execute the command. If there are no commands,
/// start the API.
pub fn handle_cli() -> Result<(), Error> {
    // Parse the command line arguments
    let args: CliArgs = CliArgs::from_args();

    // Check for commands
    match args.command {
        // Execute the command
        Some(command) => match command {
            CliCommand::Version => println!("{}", get_version()),
            CliCommand::CheckConfig => check_config(&args.config)?
        },
        // No command given, start the API
        None => start(&args.config)?
    }

    Ok(())
}

/// Parse and validate the config, without starting the API
fn check_config(config_location: &str) -> Result<(), Error> {
    Config::parse(config_location)?;
    println!("{} is valid", config_location);

    Ok(())
}

pub fn get_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
