// Pi-hole: A black hole for Internet advertisements
// (c) 2019 Pi-hole, LLC (https://pi-hole.net)
// Network-wide ad blocking via your own hardware.
//
// API
// Group Management Action Handlers
//
// This file is copyright under the latest version of the EUPL.
// Please see LICENSE file for your rights under this license.

use crate::{
    catalog::{
        delete_entity, delete_group, edit_with_groups, list_unconfigured, list_with_groups,
        AssociationManager, ChangeTracker, EntityStore, Grouped, WithGroups
    },
    databases::gravity::{Adlist, Client, DomainRule, Group},
    routes::groups::Action,
    services::network::NetworkRepository,
    util::Error
};
use diesel::SqliteConnection;

/// The reply to a successful action
#[derive(Serialize, Debug, PartialEq)]
#[serde(untagged)]
pub enum ActionReply {
    Groups { data: Vec<Group> },
    Clients { data: Vec<WithGroups<Client>> },
    Domains { data: Vec<WithGroups<DomainRule>> },
    Adlists { data: Vec<WithGroups<Adlist>> },
    Unconfigured(Vec<String>),
    Done {
        success: bool,
        message: Option<String>
    }
}

impl ActionReply {
    fn done() -> Self {
        ActionReply::Done {
            success: true,
            message: None
        }
    }
}

/// Run an action. Every committed change is recorded in `tracker`, even if a
/// later step of the action fails.
pub fn dispatch(
    action: Action,
    db: &SqliteConnection,
    network: &dyn NetworkRepository,
    tracker: &mut ChangeTracker
) -> Result<ActionReply, Error> {
    match action {
        Action::GetGroups => Ok(ActionReply::Groups {
            data: EntityStore::<Group>::new(db).list()?
        }),
        Action::AddGroup(new) => {
            tracker.record(EntityStore::<Group>::new(db).add(&new)?);
            Ok(ActionReply::done())
        }
        Action::EditGroup { id, changes } => {
            tracker.record(EntityStore::<Group>::new(db).edit(id, &changes)?);
            Ok(ActionReply::done())
        }
        Action::DeleteGroup { id } => {
            tracker.record(delete_group(db, id)?);
            Ok(ActionReply::done())
        }
        Action::GetClients => Ok(ActionReply::Clients {
            data: list_with_groups(db)?
        }),
        Action::GetUnconfiguredClients => {
            Ok(ActionReply::Unconfigured(list_unconfigured(db, network)?))
        }
        Action::AddClient(new) => {
            tracker.record(EntityStore::<Client>::new(db).add(&new)?);
            Ok(ActionReply::done())
        }
        Action::EditClient { id, groups } => {
            tracker.record(AssociationManager::new(db, Client::ASSOCIATION).replace_all(id, &groups)?);
            Ok(ActionReply::done())
        }
        Action::DeleteClient { id } => {
            tracker.record(delete_entity::<Client>(db, id)?);
            Ok(ActionReply::done())
        }
        Action::GetDomains => Ok(ActionReply::Domains {
            data: list_with_groups(db)?
        }),
        Action::AddDomain(new) => {
            tracker.record(EntityStore::<DomainRule>::new(db).add(&new)?);
            Ok(ActionReply::done())
        }
        Action::EditDomain {
            id,
            changes,
            groups
        } => {
            tracker.record(edit_with_groups::<DomainRule>(db, id, &changes, &groups)?);
            Ok(ActionReply::done())
        }
        Action::DeleteDomain { id } => {
            tracker.record(delete_entity::<DomainRule>(db, id)?);
            Ok(ActionReply::done())
        }
        Action::GetAdlists => Ok(ActionReply::Adlists {
            data: list_with_groups(db)?
        }),
        Action::AddAdlist(new) => {
            tracker.record(EntityStore::<Adlist>::new(db).add(&new)?);
            Ok(ActionReply::done())
        }
        Action::EditAdlist {
            id,
            changes,
            groups
        } => {
            tracker.record(edit_with_groups::<Adlist>(db, id, &changes, &groups)?);
            Ok(ActionReply::done())
        }
        Action::DeleteAdlist { id } => {
            tracker.record(delete_entity::<Adlist>(db, id)?);
            Ok(ActionReply::done())
        }
    }
}

#[cfg(test)]
mod test {
    use super::{dispatch, ActionReply};
    use crate::{
        catalog::{ChangeTracker, NewClient, NewGroup},
        databases::gravity::connect_to_gravity_test_db,
        routes::groups::Action,
        services::network::NetworkRepositoryMock,
        util::ErrorKind
    };

    /// Reads do not record changes
    #[test]
    fn reads_unchanged() {
        let db = connect_to_gravity_test_db();
        let mut tracker = ChangeTracker::new();

        let reply = dispatch(
            Action::GetGroups,
            &db,
            &NetworkRepositoryMock::default(),
            &mut tracker
        )
        .unwrap();

        match reply {
            ActionReply::Groups { data } => assert_eq!(data.len(), 3),
            other => panic!("Unexpected reply: {:?}", other)
        }
        assert!(!tracker.has_changes());
    }

    /// Successful mutations reply with success and record the change
    #[test]
    fn mutation_recorded() {
        let db = connect_to_gravity_test_db();
        let mut tracker = ChangeTracker::new();

        let reply = dispatch(
            Action::AddGroup(NewGroup::new(Some("Office".to_owned()), None).unwrap()),
            &db,
            &NetworkRepositoryMock::default(),
            &mut tracker
        )
        .unwrap();

        assert_eq!(
            reply,
            ActionReply::Done {
                success: true,
                message: None
            }
        );
        assert!(tracker.has_changes());
    }

    /// Failed mutations do not record a change
    #[test]
    fn failure_unchanged() {
        let db = connect_to_gravity_test_db();
        let mut tracker = ChangeTracker::new();

        let error = dispatch(
            Action::AddClient(NewClient::new(Some("10.0.0.5".to_owned())).unwrap()),
            &db,
            &NetworkRepositoryMock::default(),
            &mut tracker
        )
        .unwrap_err();

        assert_eq!(error.kind(), ErrorKind::AlreadyExists);
        assert!(!tracker.has_changes());
    }

    /// Client edits replace the client's groups
    #[test]
    fn edit_client_groups() {
        let db = connect_to_gravity_test_db();
        let mut tracker = ChangeTracker::new();

        dispatch(
            Action::EditClient {
                id: 2,
                groups: vec![2, 3].into_iter().collect()
            },
            &db,
            &NetworkRepositoryMock::default(),
            &mut tracker
        )
        .unwrap();

        match dispatch(
            Action::GetClients,
            &db,
            &NetworkRepositoryMock::default(),
            &mut tracker
        )
        .unwrap()
        {
            ActionReply::Clients { data } => assert_eq!(data[1].groups, vec![2, 3]),
            other => panic!("Unexpected reply: {:?}", other)
        }
    }
}
