// Pi-hole: A black hole for Internet advertisements
// (c) 2019 Pi-hole, LLC (https://pi-hole.net)
// Network-wide ad blocking via your own hardware.
//
// API
// Entities With Group Memberships
//
// This file is copyright under the latest version of the EUPL.
// Please see LICENSE file for your rights under this license.

use crate::{
    catalog::{AssociationManager, Editable, EntityStore, Grouped, Mutation},
    util::Error
};
use diesel::{Connection, SqliteConnection};
use std::collections::BTreeSet;

/// An entity listed together with the groups it belongs to
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct WithGroups<E> {
    #[serde(flatten)]
    pub entity: E,
    pub groups: Vec<i32>
}

/// List all entities of a kind with their groups
pub fn list_with_groups<E: Grouped>(db: &SqliteConnection) -> Result<Vec<WithGroups<E>>, Error> {
    let entities = EntityStore::<E>::new(db).list()?;
    let mut groups = AssociationManager::new(db, E::ASSOCIATION).groups_by_entity()?;

    Ok(entities
        .into_iter()
        .map(|entity| {
            let entity_groups = groups.remove(&entity.id()).unwrap_or_default();

            WithGroups {
                entity,
                groups: entity_groups
            }
        })
        .collect())
}

/// Edit an entity and replace its groups. Either both happen or neither.
pub fn edit_with_groups<E: Editable + Grouped>(
    db: &SqliteConnection,
    entity_id: i32,
    changes: &E::Changes,
    group_ids: &BTreeSet<i32>
) -> Result<Mutation, Error> {
    db.transaction::<_, Error, _>(|| {
        let edited = EntityStore::<E>::new(db).edit(entity_id, changes)?;
        let replaced = AssociationManager::new(db, E::ASSOCIATION).replace_all(entity_id, group_ids)?;

        Ok(edited.and(replaced))
    })
}
