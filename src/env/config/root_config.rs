// Pi-hole: A black hole for Internet advertisements
// (c) 2019 Pi-hole, LLC (https://pi-hole.net)
// Network-wide ad blocking via your own hardware.
//
// API
// Root Level Config
//
// This file is copyright under the latest version of the EUPL.
// Please see LICENSE file for your rights under this license.

use crate::{
    env::config::{
        auth::AuthConfig, file_locations::Files, general::General, reload::ReloadConfig
    },
    util::{Error, ErrorKind}
};
use failure::{Fail, ResultExt};
use std::{fs, io};

/// The default config location
pub const CONFIG_LOCATION: &str = "/etc/pihole/API.toml";

/// The API config options
#[derive(Deserialize, Default, Clone, Debug)]
pub struct Config {
    #[serde(default)]
    pub general: General,
    #[serde(default)]
    pub file_locations: Files,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub reload: ReloadConfig
}

impl Config {
    /// Parse the config from the file located at `config_location`. If it does
    /// not exist, return the default config.
    pub fn parse(config_location: &str) -> Result<Config, Error> {
        let buffer = match fs::read_to_string(config_location) {
            Ok(buffer) => buffer,
            Err(e) => {
                return match e.kind() {
                    io::ErrorKind::NotFound => Ok(Self::default()),
                    _ => Err(Error::from(
                        e.context(ErrorKind::FileRead(config_location.to_owned()))
                    ))
                };
            }
        };

        Self::from_toml(&buffer)
    }

    /// Parse and validate the config from TOML text
    pub fn from_toml(text: &str) -> Result<Config, Error> {
        let config = toml::from_str::<Config>(text).context(ErrorKind::ConfigParsingError)?;

        if config.is_valid() {
            Ok(config)
        } else {
            Err(Error::from(ErrorKind::ConfigParsingError))
        }
    }

    /// Check if the config settings are valid
    pub fn is_valid(&self) -> bool {
        self.general.is_valid()
            && self.file_locations.is_valid()
            && self.auth.is_valid()
            && self.reload.is_valid()
    }
}
