// Pi-hole: A black hole for Internet advertisements
// (c) 2019 Pi-hole, LLC (https://pi-hole.net)
// Network-wide ad blocking via your own hardware.
//
// API
// Common database functions
//
// This file is copyright under the latest version of the EUPL.
// Please see LICENSE file for your rights under this license.

use crate::env::Env;
use rocket::config::Value;
use std::collections::HashMap;

#[cfg(test)]
use crate::databases::{
    connection::{SqliteFKConnection, SqliteFKConnectionManager},
    gravity::TEST_GRAVITY_DATABASE_SCHEMA
};
#[cfg(test)]
use diesel::r2d2::Pool;
#[cfg(test)]
use rocket_contrib::databases::{DatabaseConfig, Poolable};
#[cfg(test)]
use std::collections::BTreeMap;

/// Load the database URLs from the API config into the Rocket config format.
/// Only Gravity is pooled; the FTL database is opened on demand.
pub fn load_databases(env: &Env) -> HashMap<&str, HashMap<&str, Value>> {
    let mut databases = HashMap::new();
    let mut gravity_database = HashMap::new();

    gravity_database.insert(
        "url",
        Value::from(env.config().file_locations.gravity.as_str())
    );
    databases.insert("gravity_database", gravity_database);

    databases
}

/// Load test database URLs into the Rocket config format. The Gravity
/// database is a single in-memory connection built from the test schema,
/// followed by `extra_sql`.
#[cfg(test)]
pub fn load_test_databases(extra_sql: &str) -> HashMap<&'static str, HashMap<&'static str, Value>> {
    let mut databases = HashMap::new();
    let mut gravity_database = HashMap::new();

    gravity_database.insert("url", Value::from(":memory:"));
    gravity_database.insert("pool_size", Value::from(1));
    gravity_database.insert(
        "test_schema",
        Value::from(format!("{}\n{}", TEST_GRAVITY_DATABASE_SCHEMA, extra_sql))
    );

    databases.insert("gravity_database", gravity_database);

    databases
}

/// Create an in-memory SQLite database with the given schema (SQL commands)
#[cfg(test)]
pub fn create_memory_db(schema: &str, pool_size: u32) -> Pool<SqliteFKConnectionManager> {
    let mut extras = BTreeMap::new();
    extras.insert("test_schema".to_owned(), Value::from(schema));

    let config = DatabaseConfig {
        url: ":memory:",
        pool_size,
        extras
    };

    SqliteFKConnection::pool(config).unwrap()
}
