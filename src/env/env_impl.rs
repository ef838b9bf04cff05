// Pi-hole: A black hole for Internet advertisements
// (c) 2019 Pi-hole, LLC (https://pi-hole.net)
// Network-wide ad blocking via your own hardware.
//
// API
// Environment Structure
//
// This file is copyright under the latest version of the EUPL.
// Please see LICENSE file for your rights under this license.

use crate::env::Config;

/// Environment of the API. Stores the config and marks whether side effects
/// on the rest of the system (such as reloading the DNS server) are allowed.
#[derive(Clone, Debug)]
pub enum Env {
    Production(Config),
    #[cfg(test)]
    Test(Config)
}

impl Env {
    /// Get the API config that was loaded
    pub fn config(&self) -> &Config {
        match self {
            Env::Production(config) => config,
            #[cfg(test)]
            Env::Test(config) => config
        }
    }

    /// Check if we're in a testing environment
    pub fn is_test(&self) -> bool {
        match self {
            Env::Production(_) => false,
            #[cfg(test)]
            Env::Test(_) => true
        }
    }
}
