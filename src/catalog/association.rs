// Pi-hole: A black hole for Internet advertisements
// (c) 2019 Pi-hole, LLC (https://pi-hole.net)
// Network-wide ad blocking via your own hardware.
//
// API
// Group Membership Management
//
// This file is copyright under the latest version of the EUPL.
// Please see LICENSE file for your rights under this license.

use crate::{catalog::Mutation, util::Error};
use diesel::{prelude::*, sql_query, sql_types::Integer};
use std::collections::{BTreeMap, BTreeSet};

/// The join tables which assign entities to groups
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum AssociationKind {
    Client,
    Domain,
    Adlist
}

impl AssociationKind {
    pub const ALL: [AssociationKind; 3] = [
        AssociationKind::Client,
        AssociationKind::Domain,
        AssociationKind::Adlist
    ];

    /// The join table
    pub fn table(self) -> &'static str {
        match self {
            AssociationKind::Client => "client_by_group",
            AssociationKind::Domain => "domainlist_by_group",
            AssociationKind::Adlist => "adlist_by_group"
        }
    }

    /// The join table column which references the entity
    pub fn entity_column(self) -> &'static str {
        match self {
            AssociationKind::Client => "client_id",
            AssociationKind::Domain => "domainlist_id",
            AssociationKind::Adlist => "adlist_id"
        }
    }
}

#[derive(QueryableByName)]
struct GroupIdRow {
    #[sql_type = "Integer"]
    group_id: i32
}

#[derive(QueryableByName)]
struct AssociationRow {
    #[sql_type = "Integer"]
    entity_id: i32,
    #[sql_type = "Integer"]
    group_id: i32
}

/// Reads and replaces the group memberships of one kind of entity
pub struct AssociationManager<'a> {
    db: &'a SqliteConnection,
    kind: AssociationKind
}

impl<'a> AssociationManager<'a> {
    pub fn new(db: &'a SqliteConnection, kind: AssociationKind) -> Self {
        AssociationManager { db, kind }
    }

    /// The groups of an entity, ascending
    pub fn list_groups_for(&self, entity_id: i32) -> Result<Vec<i32>, Error> {
        let rows = sql_query(format!(
            "SELECT group_id FROM {} WHERE {} = ? ORDER BY group_id",
            self.kind.table(),
            self.kind.entity_column()
        ))
        .bind::<Integer, _>(entity_id)
        .load::<GroupIdRow>(self.db)?;

        Ok(rows.into_iter().map(|row| row.group_id).collect())
    }

    /// The groups of every entity which has at least one group
    pub fn groups_by_entity(&self) -> Result<BTreeMap<i32, Vec<i32>>, Error> {
        let rows = sql_query(format!(
            "SELECT {} AS entity_id, group_id FROM {} ORDER BY entity_id, group_id",
            self.kind.entity_column(),
            self.kind.table()
        ))
        .load::<AssociationRow>(self.db)?;

        let mut groups: BTreeMap<i32, Vec<i32>> = BTreeMap::new();
        for row in rows {
            groups.entry(row.entity_id).or_default().push(row.group_id);
        }

        Ok(groups)
    }

    /// Replace the groups of an entity. If any group can not be assigned, the
    /// previous groups are kept.
    pub fn replace_all(&self, entity_id: i32, group_ids: &BTreeSet<i32>) -> Result<Mutation, Error> {
        let insert = format!(
            "INSERT INTO {} ({}, group_id) VALUES (?, ?)",
            self.kind.table(),
            self.kind.entity_column()
        );

        self.db.transaction::<_, Error, _>(|| {
            self.delete_rows(entity_id)?;

            for group_id in group_ids {
                sql_query(insert.as_str())
                    .bind::<Integer, _>(entity_id)
                    .bind::<Integer, _>(*group_id)
                    .execute(self.db)?;
            }

            Ok(())
        })?;

        Ok(Mutation::changed(()))
    }

    /// Remove the entity from all of its groups
    pub fn delete_all_for(&self, entity_id: i32) -> Result<Mutation, Error> {
        self.delete_rows(entity_id)?;

        Ok(Mutation::changed(()))
    }

    fn delete_rows(&self, entity_id: i32) -> QueryResult<usize> {
        sql_query(format!(
            "DELETE FROM {} WHERE {} = ?",
            self.kind.table(),
            self.kind.entity_column()
        ))
        .bind::<Integer, _>(entity_id)
        .execute(self.db)
    }
}

/// Remove every membership of the group, for all kinds of entities
pub fn delete_all_for_group(db: &SqliteConnection, group_id: i32) -> Result<Mutation, Error> {
    db.transaction::<_, Error, _>(|| {
        for kind in AssociationKind::ALL.iter() {
            sql_query(format!("DELETE FROM {} WHERE group_id = ?", kind.table()))
                .bind::<Integer, _>(group_id)
                .execute(db)?;
        }

        Ok(())
    })?;

    Ok(Mutation::changed(()))
}
