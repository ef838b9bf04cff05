// Pi-hole: A black hole for Internet advertisements
// (c) 2019 Pi-hole, LLC (https://pi-hole.net)
// Network-wide ad blocking via your own hardware.
//
// API
// CLI Arguments and Options
//
// This file is copyright under the latest version of the EUPL.
// Please see LICENSE file for your rights under this license.

use crate::{cli::handler::get_version, env::CONFIG_LOCATION};
use structopt::{clap::AppSettings, StructOpt};

/// This defines the arguments that the CLI can be given
///
/// `AppSettings::VersionlessSubcommands` will remove the `-V` version flag from
/// sub-commands. All sub-commands in this project have the same version.
#[derive(StructOpt)]
#[structopt(
    name = "pihole-group-API",
    about = "HTTP API for managing Pi-hole's groups, clients, domains, and adlists.",
    author = "",
    raw(version = "get_version()"),
    raw(global_setting = "AppSettings::VersionlessSubcommands")
)]
pub struct CliArgs {
    /// Location of the API config file
    #[structopt(
        short = "c",
        long = "config",
        raw(default_value = "CONFIG_LOCATION"),
        raw(global = "true")
    )]
    pub config: String,

    #[structopt(subcommand)]
    pub command: Option<CliCommand>
}

/// The commands that the CLI handles
#[derive(StructOpt)]
pub enum CliCommand {
    /// Prints version information
    #[structopt(name = "version", author = "", raw(version = "get_version()"))]
    Version,
    /// Checks that the config file is valid
    #[structopt(name = "check-config", author = "", raw(version = "get_version()"))]
    CheckConfig
}
