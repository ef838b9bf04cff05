// Pi-hole: A black hole for Internet advertisements
// (c) 2019 Pi-hole, LLC (https://pi-hole.net)
// Network-wide ad blocking via your own hardware.
//
// API
// Catalog Entity Kinds
//
// This file is copyright under the latest version of the EUPL.
// Please see LICENSE file for your rights under this license.

use crate::{
    catalog::{
        AdlistChanges, AssociationKind, DomainRuleChanges, GroupChanges, NewAdlist, NewClient,
        NewDomainRule, NewGroup
    },
    databases::gravity::{Adlist, Client, DomainRule, Group},
    util::Error
};
use diesel::{insert_into, prelude::*, update};

/// A kind of row stored in the Gravity database
pub trait Entity: Sized {
    /// The table which holds the entities
    const TABLE: &'static str;

    /// Validated input for creating an entity
    type New;

    fn id(&self) -> i32;

    /// Load all entities in stored order
    fn load_all(db: &SqliteConnection) -> QueryResult<Vec<Self>>;

    fn insert(db: &SqliteConnection, new: &Self::New) -> QueryResult<usize>;
}

/// An entity with fields which can be edited in place
pub trait Editable: Entity {
    type Changes;

    /// Update the editable fields of the entity and stamp it with `now`
    fn update(
        db: &SqliteConnection,
        entity_id: i32,
        changes: &Self::Changes,
        now: i32
    ) -> Result<usize, Error>;
}

/// An entity which can be assigned to groups
pub trait Grouped: Entity {
    const ASSOCIATION: AssociationKind;
}

impl Entity for Group {
    const TABLE: &'static str = "group";
    type New = NewGroup;

    fn id(&self) -> i32 {
        self.id
    }

    fn load_all(db: &SqliteConnection) -> QueryResult<Vec<Self>> {
        use crate::databases::gravity::group::dsl::*;

        group.order(id).load(db)
    }

    fn insert(db: &SqliteConnection, new: &NewGroup) -> QueryResult<usize> {
        use crate::databases::gravity::group::dsl::*;

        insert_into(group)
            .values((name.eq(&new.name), description.eq(&new.description)))
            .execute(db)
    }
}

impl Editable for Group {
    type Changes = GroupChanges;

    fn update(
        db: &SqliteConnection,
        entity_id: i32,
        changes: &GroupChanges,
        now: i32
    ) -> Result<usize, Error> {
        use crate::databases::gravity::group::dsl::*;

        Ok(update(group.find(entity_id))
            .set((
                enabled.eq(changes.enabled),
                name.eq(&changes.name),
                description.eq(&changes.description),
                date_modified.eq(now)
            ))
            .execute(db)?)
    }
}

impl Entity for Client {
    const TABLE: &'static str = "client";
    type New = NewClient;

    fn id(&self) -> i32 {
        self.id
    }

    fn load_all(db: &SqliteConnection) -> QueryResult<Vec<Self>> {
        use crate::databases::gravity::client::dsl::*;

        client.order(id).load(db)
    }

    fn insert(db: &SqliteConnection, new: &NewClient) -> QueryResult<usize> {
        use crate::databases::gravity::client::dsl::*;

        insert_into(client).values(ip.eq(&new.ip)).execute(db)
    }
}

impl Grouped for Client {
    const ASSOCIATION: AssociationKind = AssociationKind::Client;
}

impl Entity for DomainRule {
    const TABLE: &'static str = "domainlist";
    type New = NewDomainRule;

    fn id(&self) -> i32 {
        self.id
    }

    fn load_all(db: &SqliteConnection) -> QueryResult<Vec<Self>> {
        use crate::databases::gravity::domainlist::dsl::*;

        domainlist.order(id).load(db)
    }

    fn insert(db: &SqliteConnection, new: &NewDomainRule) -> QueryResult<usize> {
        use crate::databases::gravity::domainlist::dsl::*;

        insert_into(domainlist)
            .values((
                domain_type.eq(new.domain_type.value()),
                domain.eq(&new.domain),
                comment.eq(&new.comment)
            ))
            .execute(db)
    }
}

impl Editable for DomainRule {
    type Changes = DomainRuleChanges;

    fn update(
        db: &SqliteConnection,
        entity_id: i32,
        changes: &DomainRuleChanges,
        now: i32
    ) -> Result<usize, Error> {
        use crate::databases::gravity::domainlist::dsl::*;

        db.transaction::<_, Error, _>(|| {
            let stored: Option<String> = domainlist
                .find(entity_id)
                .select(domain)
                .first(db)
                .optional()?;

            let stored = match stored {
                Some(stored) => stored,
                None => return Ok(0)
            };

            // The domain must stay valid under its new type
            let normalized = changes.domain_type.normalize(&stored)?;

            Ok(update(domainlist.find(entity_id))
                .set((
                    domain_type.eq(changes.domain_type.value()),
                    domain.eq(normalized),
                    enabled.eq(changes.enabled),
                    comment.eq(&changes.comment),
                    date_modified.eq(now)
                ))
                .execute(db)?)
        })
    }
}

impl Grouped for DomainRule {
    const ASSOCIATION: AssociationKind = AssociationKind::Domain;
}

impl Entity for Adlist {
    const TABLE: &'static str = "adlist";
    type New = NewAdlist;

    fn id(&self) -> i32 {
        self.id
    }

    fn load_all(db: &SqliteConnection) -> QueryResult<Vec<Self>> {
        use crate::databases::gravity::adlist::dsl::*;

        adlist.order(id).load(db)
    }

    fn insert(db: &SqliteConnection, new: &NewAdlist) -> QueryResult<usize> {
        use crate::databases::gravity::adlist::dsl::*;

        insert_into(adlist)
            .values((address.eq(&new.address), comment.eq(&new.comment)))
            .execute(db)
    }
}

impl Editable for Adlist {
    type Changes = AdlistChanges;

    fn update(
        db: &SqliteConnection,
        entity_id: i32,
        changes: &AdlistChanges,
        now: i32
    ) -> Result<usize, Error> {
        use crate::databases::gravity::adlist::dsl::*;

        Ok(update(adlist.find(entity_id))
            .set((
                enabled.eq(changes.enabled),
                comment.eq(&changes.comment),
                date_modified.eq(now)
            ))
            .execute(db)?)
    }
}

impl Grouped for Adlist {
    const ASSOCIATION: AssociationKind = AssociationKind::Adlist;
}
