// Pi-hole: A black hole for Internet advertisements
// (c) 2019 Pi-hole, LLC (https://pi-hole.net)
// Network-wide ad blocking via your own hardware.
//
// API
// FTL Database Test Functions
//
// This file is copyright under the latest version of the EUPL.
// Please see LICENSE file for your rights under this license.

use diesel::{connection::SimpleConnection, Connection, SqliteConnection};
use tempfile::NamedTempFile;

pub const TEST_FTL_DATABASE_SCHEMA: &str = include_str!("../../../test/FTL.sql");

/// Create an FTL database file filled with the test data. The database is
/// deleted when the returned file is dropped.
pub fn create_ftl_test_db() -> NamedTempFile {
    let file = NamedTempFile::new().unwrap();

    SqliteConnection::establish(file.path().to_str().unwrap())
        .unwrap()
        .batch_execute(TEST_FTL_DATABASE_SCHEMA)
        .unwrap();

    file
}
