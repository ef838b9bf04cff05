// Pi-hole: A black hole for Internet advertisements
// (c) 2019 Pi-hole, LLC (https://pi-hole.net)
// Network-wide ad blocking via your own hardware.
//
// API
// FTL Database Support
//
// This file is copyright under the latest version of the EUPL.
// Please see LICENSE file for your rights under this license.

use crate::util::{Error, ErrorKind};
use diesel::{connection::SimpleConnection, Connection, SqliteConnection};
use failure::{Fail, ResultExt};
use std::{io, path::Path};

mod schema;

#[cfg(test)]
mod testing;

pub use self::schema::*;

#[cfg(test)]
pub use self::testing::*;

/// Open a read-only connection to FTL's database. The connection is not
/// pooled: it is closed when dropped.
///
/// FTL owns this database, so a missing file is an error instead of being
/// created empty.
pub fn connect_read_only(path: &str) -> Result<SqliteConnection, Error> {
    if !Path::new(path).is_file() {
        return Err(Error::from(
            io::Error::from(io::ErrorKind::NotFound).context(ErrorKind::FtlDatabase)
        ));
    }

    let db = SqliteConnection::establish(path).context(ErrorKind::FtlDatabase)?;
    db.batch_execute("PRAGMA query_only = ON; PRAGMA busy_timeout = 1000;")
        .context(ErrorKind::FtlDatabase)?;

    Ok(db)
}
