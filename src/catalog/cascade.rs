// Pi-hole: A black hole for Internet advertisements
// (c) 2019 Pi-hole, LLC (https://pi-hole.net)
// Network-wide ad blocking via your own hardware.
//
// API
// Cascading Deletes
//
// This file is copyright under the latest version of the EUPL.
// Please see LICENSE file for your rights under this license.

use crate::{
    catalog::{delete_all_for_group, AssociationManager, EntityStore, Grouped, Mutation},
    databases::gravity::Group,
    util::Error
};
use diesel::{Connection, SqliteConnection};

/// Delete an entity after removing it from its groups
pub fn delete_entity<E: Grouped>(db: &SqliteConnection, entity_id: i32) -> Result<Mutation, Error> {
    db.transaction::<_, Error, _>(|| {
        let cleared = AssociationManager::new(db, E::ASSOCIATION).delete_all_for(entity_id)?;
        let deleted = EntityStore::<E>::new(db).delete(entity_id)?;

        Ok(cleared.and(deleted))
    })
}

/// Delete a group after removing every client, domain, and adlist from it
pub fn delete_group(db: &SqliteConnection, group_id: i32) -> Result<Mutation, Error> {
    db.transaction::<_, Error, _>(|| {
        let cleared = delete_all_for_group(db, group_id)?;
        let deleted = EntityStore::<Group>::new(db).delete(group_id)?;

        Ok(cleared.and(deleted))
    })
}
