// Pi-hole: A black hole for Internet advertisements
// (c) 2019 Pi-hole, LLC (https://pi-hole.net)
// Network-wide ad blocking via your own hardware.
//
// API
// Generic Entity Store
//
// This file is copyright under the latest version of the EUPL.
// Please see LICENSE file for your rights under this license.

use crate::{
    catalog::{Editable, Entity, Mutation},
    util::{Error, ErrorKind}
};
use diesel::{prelude::*, sql_query, sql_types::Integer};
use failure::ResultExt;
use std::{
    convert::TryFrom,
    marker::PhantomData,
    time::{SystemTime, UNIX_EPOCH}
};

no_arg_sql_function!(last_insert_rowid, Integer);

/// Current UNIX time, as stored in the `date_modified` columns
pub fn current_timestamp() -> Result<i32, Error> {
    unix_timestamp(SystemTime::now())
}

/// The columns hold 32 bit seconds, so times before 1970 or after 2038 are
/// errors
fn unix_timestamp(time: SystemTime) -> Result<i32, Error> {
    let seconds = time
        .duration_since(UNIX_EPOCH)
        .context(ErrorKind::Unknown)?
        .as_secs();

    Ok(i32::try_from(seconds).context(ErrorKind::Unknown)?)
}

/// Lists, adds, edits, and deletes entities of one kind
pub struct EntityStore<'a, E> {
    db: &'a SqliteConnection,
    entity: PhantomData<E>
}

impl<'a, E: Entity> EntityStore<'a, E> {
    pub fn new(db: &'a SqliteConnection) -> Self {
        EntityStore {
            db,
            entity: PhantomData
        }
    }

    pub fn list(&self) -> Result<Vec<E>, Error> {
        Ok(E::load_all(self.db)?)
    }

    /// Add an entity and return its new ID
    pub fn add(&self, new: &E::New) -> Result<Mutation<i32>, Error> {
        let entity_id = self.db.transaction::<_, Error, _>(|| {
            E::insert(self.db, new)?;
            Ok(diesel::select(last_insert_rowid).get_result::<i32>(self.db)?)
        })?;

        Ok(Mutation::changed(entity_id))
    }

    /// Delete an entity. Deleting an entity which does not exist succeeds.
    pub fn delete(&self, entity_id: i32) -> Result<Mutation, Error> {
        sql_query(format!("DELETE FROM \"{}\" WHERE id = ?", E::TABLE))
            .bind::<Integer, _>(entity_id)
            .execute(self.db)?;

        Ok(Mutation::changed(()))
    }
}

impl<'a, E: Editable> EntityStore<'a, E> {
    /// Update the editable fields of an entity. Editing an entity which does
    /// not exist succeeds.
    pub fn edit(&self, entity_id: i32, changes: &E::Changes) -> Result<Mutation, Error> {
        E::update(self.db, entity_id, changes, current_timestamp()?)?;

        Ok(Mutation::changed(()))
    }
}
