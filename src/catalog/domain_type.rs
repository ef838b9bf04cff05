// Pi-hole: A black hole for Internet advertisements
// (c) 2019 Pi-hole, LLC (https://pi-hole.net)
// Network-wide ad blocking via your own hardware.
//
// API
// Domain Rule Types
//
// This file is copyright under the latest version of the EUPL.
// Please see LICENSE file for your rights under this license.

use crate::util::{Error, ErrorKind};
use regex::Regex;

/// The kind of a domain rule, as stored in the `type` column of `domainlist`
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DomainType {
    ExactAllow,
    ExactDeny,
    RegexAllow,
    RegexDeny
}

impl DomainType {
    /// Parse the stored/requested numeric type
    pub fn from_value(value: i64) -> Result<Self, Error> {
        match value {
            0 => Ok(DomainType::ExactAllow),
            1 => Ok(DomainType::ExactDeny),
            2 => Ok(DomainType::RegexAllow),
            3 => Ok(DomainType::RegexDeny),
            _ => Err(Error::from(ErrorKind::InvalidDomainType))
        }
    }

    /// The value stored in the database
    pub fn value(self) -> i32 {
        match self {
            DomainType::ExactAllow => 0,
            DomainType::ExactDeny => 1,
            DomainType::RegexAllow => 2,
            DomainType::RegexDeny => 3
        }
    }

    pub fn is_regex(self) -> bool {
        match self {
            DomainType::RegexAllow | DomainType::RegexDeny => true,
            DomainType::ExactAllow | DomainType::ExactDeny => false
        }
    }

    /// Validate the domain for this type and return the form which should be
    /// stored. Exact domains are stored lowercase.
    pub fn normalize(self, domain: &str) -> Result<String, Error> {
        if self.is_regex() {
            if is_valid_regex(domain) {
                Ok(domain.to_owned())
            } else {
                Err(Error::from(ErrorKind::InvalidDomain))
            }
        } else {
            let domain = domain.to_lowercase();

            if is_valid_domain(&domain) {
                Ok(domain)
            } else {
                Err(Error::from(ErrorKind::InvalidDomain))
            }
        }
    }
}

/// Check if a (lowercase) domain is valid
fn is_valid_domain(domain: &str) -> bool {
    let valid_chars = Regex::new(
        "^((-|_)*[a-z0-9]((-|_)*[a-z0-9])*(-|_)*)(\\.(-|_)*([a-z0-9]((-|_)*[a-z0-9])*))*$"
    )
    .map(|regex| regex.is_match(domain))
    .unwrap_or(false);

    valid_chars
        && domain.len() <= 253
        && domain.split('.').all(|label| !label.is_empty() && label.len() <= 63)
}

/// Check if a regex is valid
fn is_valid_regex(regex_str: &str) -> bool {
    Regex::new(regex_str).is_ok()
}
