// Pi-hole: A black hole for Internet advertisements
// (c) 2019 Pi-hole, LLC (https://pi-hole.net)
// Network-wide ad blocking via your own hardware.
//
// API
// Foreign Key Enabled SQLite Connection
//
// This file is copyright under the latest version of the EUPL.
// Please see LICENSE file for your rights under this license.

use diesel::{
    connection::SimpleConnection,
    r2d2::{self, ConnectionManager, CustomizeConnection, ManageConnection, Pool},
    Connection, ConnectionError, SqliteConnection
};
use rocket::config::Value;
use rocket_contrib::databases::{DatabaseConfig, Poolable};
use std::{
    ops::{Deref, DerefMut},
    path::Path
};

/// How long a connection waits on a locked database before giving up, in
/// milliseconds
const BUSY_TIMEOUT_MS: u32 = 1000;

/// A wrapper around `SqliteConnection` for use by `SqliteFKConnectionManager`
pub struct SqliteFKConnection(SqliteConnection);

// Implement the dereference traits so it can be used in place of a normal
// SqliteConnection
impl Deref for SqliteFKConnection {
    type Target = SqliteConnection;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for SqliteFKConnection {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl Poolable for SqliteFKConnection {
    type Manager = SqliteFKConnectionManager;
    type Error = rocket_contrib::databases::r2d2::Error;

    fn pool(config: DatabaseConfig) -> Result<Pool<Self::Manager>, Self::Error> {
        let manager = SqliteFKConnectionManager {
            manager: ConnectionManager::new(config.url),
            database_url: config.url.to_owned()
        };
        let mut builder = Pool::builder().max_size(config.pool_size);

        // When testing, run the schema SQL to build the database
        if cfg!(test) {
            if let Some(Value::String(schema)) = config.extras.get("test_schema").cloned() {
                builder = builder.connection_customizer(Box::new(DatabaseSchemaApplier { schema }));
            }
        }

        builder.build(manager)
    }
}

/// A SQLite connection manager which turns on foreign key enforcement, adds a
/// busy timeout, and refuses to create databases which do not exist yet
pub struct SqliteFKConnectionManager {
    manager: ConnectionManager<SqliteConnection>,
    database_url: String
}

impl ManageConnection for SqliteFKConnectionManager {
    type Connection = SqliteFKConnection;
    type Error = r2d2::Error;

    fn connect(&self) -> Result<Self::Connection, Self::Error> {
        // Connecting to a missing file would create an empty database without
        // a schema
        if self.database_url != ":memory:" && !Path::new(&self.database_url).exists() {
            return Err(r2d2::Error::ConnectionError(ConnectionError::BadConnection(
                format!("{} does not exist", self.database_url)
            )));
        }

        let conn = self.manager.connect()?;

        // Association rows must always reference existing rows
        conn.execute("PRAGMA foreign_keys = ON")
            .map_err(r2d2::Error::QueryError)?;
        conn.execute(&format!("PRAGMA busy_timeout = {}", BUSY_TIMEOUT_MS))
            .map_err(r2d2::Error::QueryError)?;

        Ok(SqliteFKConnection(conn))
    }

    fn is_valid(&self, conn: &mut Self::Connection) -> Result<(), Self::Error> {
        self.manager.is_valid(conn)
    }

    fn has_broken(&self, conn: &mut Self::Connection) -> bool {
        self.manager.has_broken(conn)
    }
}

/// Applies a schema to the database after connecting
#[derive(Debug)]
struct DatabaseSchemaApplier {
    schema: String
}

impl CustomizeConnection<SqliteFKConnection, r2d2::Error> for DatabaseSchemaApplier {
    fn on_acquire(&self, conn: &mut SqliteFKConnection) -> Result<(), r2d2::Error> {
        // Apply the schema in a transaction
        conn.transaction(|| conn.batch_execute(&self.schema))
            .map_err(r2d2::Error::QueryError)
    }
}
