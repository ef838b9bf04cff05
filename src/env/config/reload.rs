// Pi-hole: A black hole for Internet advertisements
// (c) 2019 Pi-hole, LLC (https://pi-hole.net)
// Network-wide ad blocking via your own hardware.
//
// API
// DNS Reload Config
//
// This file is copyright under the latest version of the EUPL.
// Please see LICENSE file for your rights under this license.

/// Configuration of how the DNS server is told to reload its lists after the
/// Gravity database was changed
#[derive(Deserialize, Clone, Debug)]
pub struct ReloadConfig {
    /// The program and arguments to run
    #[serde(default = "default_command")]
    pub command: Vec<String>
}

impl Default for ReloadConfig {
    fn default() -> Self {
        ReloadConfig {
            command: default_command()
        }
    }
}

impl ReloadConfig {
    pub fn is_valid(&self) -> bool {
        self.command
            .first()
            .map(|program| !program.is_empty())
            .unwrap_or(false)
    }
}

fn default_command() -> Vec<String> {
    vec![
        "sudo".to_owned(),
        "pihole".to_owned(),
        "restartdns".to_owned(),
        "reload-lists".to_owned(),
    ]
}

#[cfg(test)]
mod test {
    use super::ReloadConfig;

    /// The default config is valid
    #[test]
    fn valid_reload() {
        assert!(ReloadConfig::default().is_valid());
    }

    /// A command needs at least a program to run
    #[test]
    fn invalid_empty_command() {
        let reload_config = ReloadConfig {
            command: Vec::new()
        };

        assert!(!reload_config.is_valid());
    }
}
