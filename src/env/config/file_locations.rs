// Pi-hole: A black hole for Internet advertisements
// (c) 2019 Pi-hole, LLC (https://pi-hole.net)
// Network-wide ad blocking via your own hardware.
//
// API
// Database File Locations Config
//
// This file is copyright under the latest version of the EUPL.
// Please see LICENSE file for your rights under this license.

use std::path::Path;

/// Locations of the databases used by the API
#[derive(Deserialize, Clone, Debug)]
pub struct Files {
    /// The Gravity database, which holds groups, clients, domains, and adlists
    #[serde(default = "default_gravity")]
    pub gravity: String,

    /// FTL's long term database, which holds the observed network addresses
    #[serde(default = "default_ftl")]
    pub ftl: String
}

impl Default for Files {
    fn default() -> Self {
        Files {
            gravity: default_gravity(),
            ftl: default_ftl()
        }
    }
}

impl Files {
    pub fn is_valid(&self) -> bool {
        Path::new(&self.gravity).is_absolute() && Path::new(&self.ftl).is_absolute()
    }
}

fn default_gravity() -> String {
    "/etc/pihole/gravity.db".to_owned()
}

fn default_ftl() -> String {
    "/etc/pihole/pihole-FTL.db".to_owned()
}
