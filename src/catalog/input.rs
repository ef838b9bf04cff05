// Pi-hole: A black hole for Internet advertisements
// (c) 2019 Pi-hole, LLC (https://pi-hole.net)
// Network-wide ad blocking via your own hardware.
//
// API
// Validated Catalog Input
//
// This file is copyright under the latest version of the EUPL.
// Please see LICENSE file for your rights under this license.

use crate::{
    catalog::DomainType,
    util::{Error, ErrorKind}
};

/// Empty text is stored as NULL
pub fn optional_text(text: Option<String>) -> Option<String> {
    text.filter(|text| !text.is_empty())
}

/// Text which must be present and not blank. The stored value is trimmed.
pub fn required_text(text: Option<String>, field: &str) -> Result<String, Error> {
    match text {
        Some(ref text) if !text.trim().is_empty() => Ok(text.trim().to_owned()),
        _ => Err(Error::from(ErrorKind::MissingField(field.to_owned())))
    }
}

/// Any nonzero status means enabled
pub fn coerce_enabled(status: i64) -> bool {
    status != 0
}

/// A group to create
#[derive(Clone, Debug, PartialEq)]
pub struct NewGroup {
    pub name: String,
    pub description: Option<String>
}

impl NewGroup {
    pub fn new(name: Option<String>, description: Option<String>) -> Result<Self, Error> {
        Ok(NewGroup {
            name: required_text(name, "name")?,
            description: optional_text(description)
        })
    }
}

/// The editable fields of a group
#[derive(Clone, Debug, PartialEq)]
pub struct GroupChanges {
    pub enabled: bool,
    pub name: String,
    pub description: Option<String>
}

impl GroupChanges {
    pub fn new(
        status: i64,
        name: Option<String>,
        description: Option<String>
    ) -> Result<Self, Error> {
        Ok(GroupChanges {
            enabled: coerce_enabled(status),
            name: required_text(name, "name")?,
            description: optional_text(description)
        })
    }
}

/// A client to create
#[derive(Clone, Debug, PartialEq)]
pub struct NewClient {
    pub ip: String
}

impl NewClient {
    pub fn new(ip: Option<String>) -> Result<Self, Error> {
        Ok(NewClient {
            ip: required_text(ip, "ip")?
        })
    }
}

/// A domain rule to create
#[derive(Clone, Debug, PartialEq)]
pub struct NewDomainRule {
    pub domain: String,
    pub domain_type: DomainType,
    pub comment: Option<String>
}

impl NewDomainRule {
    pub fn new(
        domain: Option<String>,
        domain_type: i64,
        comment: Option<String>
    ) -> Result<Self, Error> {
        let domain_type = DomainType::from_value(domain_type)?;
        let domain = domain_type.normalize(&required_text(domain, "domain")?)?;

        Ok(NewDomainRule {
            domain,
            domain_type,
            comment: optional_text(comment)
        })
    }
}

/// The editable fields of a domain rule. The domain text itself can not be
/// edited.
#[derive(Clone, Debug, PartialEq)]
pub struct DomainRuleChanges {
    pub domain_type: DomainType,
    pub enabled: bool,
    pub comment: Option<String>
}

impl DomainRuleChanges {
    pub fn new(domain_type: i64, status: i64, comment: Option<String>) -> Result<Self, Error> {
        Ok(DomainRuleChanges {
            domain_type: DomainType::from_value(domain_type)?,
            enabled: coerce_enabled(status),
            comment: optional_text(comment)
        })
    }
}

/// An adlist to create
#[derive(Clone, Debug, PartialEq)]
pub struct NewAdlist {
    pub address: String,
    pub comment: Option<String>
}

impl NewAdlist {
    pub fn new(address: Option<String>, comment: Option<String>) -> Result<Self, Error> {
        Ok(NewAdlist {
            address: required_text(address, "address")?,
            comment: optional_text(comment)
        })
    }
}

/// The editable fields of an adlist. The address can not be edited.
#[derive(Clone, Debug, PartialEq)]
pub struct AdlistChanges {
    pub enabled: bool,
    pub comment: Option<String>
}

impl AdlistChanges {
    pub fn new(status: i64, comment: Option<String>) -> Self {
        AdlistChanges {
            enabled: coerce_enabled(status),
            comment: optional_text(comment)
        }
    }
}
