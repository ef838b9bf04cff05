// Pi-hole: A black hole for Internet advertisements
// (c) 2019 Pi-hole, LLC (https://pi-hole.net)
// Network-wide ad blocking via your own hardware.
//
// API
// Gravity Database Models
//
// This file is copyright under the latest version of the EUPL.
// Please see LICENSE file for your rights under this license.

use crate::databases::connection::SqliteFKConnection;

#[database("gravity_database")]
pub struct GravityDatabase(SqliteFKConnection);

/// A group which clients, domains, and adlists can be assigned to
#[derive(Queryable, Serialize, Clone, Debug, PartialEq)]
pub struct Group {
    pub id: i32,
    pub enabled: bool,
    pub name: String,
    pub date_added: i32,
    pub date_modified: i32,
    pub description: Option<String>
}

/// A network client, identified by its IP address
#[derive(Queryable, Serialize, Clone, Debug, PartialEq)]
pub struct Client {
    pub id: i32,
    pub ip: String,
    pub date_added: i32,
    pub date_modified: i32
}

/// An exact or regex domain which is allowed or denied
#[derive(Queryable, Serialize, Clone, Debug, PartialEq)]
pub struct DomainRule {
    pub id: i32,
    #[serde(rename = "type")]
    pub domain_type: i32,
    pub domain: String,
    pub enabled: bool,
    pub date_added: i32,
    pub date_modified: i32,
    pub comment: Option<String>
}

/// A block list source which Gravity downloads domains from
#[derive(Queryable, Serialize, Clone, Debug, PartialEq)]
pub struct Adlist {
    pub id: i32,
    pub address: String,
    pub enabled: bool,
    pub date_added: i32,
    pub date_modified: i32,
    pub comment: Option<String>
}
