// Pi-hole: A black hole for Internet advertisements
// (c) 2019 Pi-hole, LLC (https://pi-hole.net)
// Network-wide ad blocking via your own hardware.
//
// API
// Group Management Actions
//
// This file is copyright under the latest version of the EUPL.
// Please see LICENSE file for your rights under this license.

use crate::{
    catalog::{
        AdlistChanges, DomainRuleChanges, GroupChanges, NewAdlist, NewClient, NewDomainRule,
        NewGroup
    },
    util::{Error, ErrorKind}
};
use failure::Fail;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::{
    collections::BTreeSet,
    fmt::{self, Display},
    str::FromStr
};

/// The actions which can be requested from the group management endpoint
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ActionKind {
    GetGroups,
    AddGroup,
    EditGroup,
    DeleteGroup,
    GetClients,
    GetUnconfiguredClients,
    AddClient,
    EditClient,
    DeleteClient,
    GetDomains,
    AddDomain,
    EditDomain,
    DeleteDomain,
    GetAdlists,
    AddAdlist,
    EditAdlist,
    DeleteAdlist
}

impl ActionKind {
    pub const ALL: [ActionKind; 17] = [
        ActionKind::GetGroups,
        ActionKind::AddGroup,
        ActionKind::EditGroup,
        ActionKind::DeleteGroup,
        ActionKind::GetClients,
        ActionKind::GetUnconfiguredClients,
        ActionKind::AddClient,
        ActionKind::EditClient,
        ActionKind::DeleteClient,
        ActionKind::GetDomains,
        ActionKind::AddDomain,
        ActionKind::EditDomain,
        ActionKind::DeleteDomain,
        ActionKind::GetAdlists,
        ActionKind::AddAdlist,
        ActionKind::EditAdlist,
        ActionKind::DeleteAdlist
    ];

    /// The name of the action in requests
    pub fn as_str(self) -> &'static str {
        match self {
            ActionKind::GetGroups => "get_groups",
            ActionKind::AddGroup => "add_group",
            ActionKind::EditGroup => "edit_group",
            ActionKind::DeleteGroup => "delete_group",
            ActionKind::GetClients => "get_clients",
            ActionKind::GetUnconfiguredClients => "get_unconfigured_clients",
            ActionKind::AddClient => "add_client",
            ActionKind::EditClient => "edit_client",
            ActionKind::DeleteClient => "delete_client",
            ActionKind::GetDomains => "get_domains",
            ActionKind::AddDomain => "add_domain",
            ActionKind::EditDomain => "edit_domain",
            ActionKind::DeleteDomain => "delete_domain",
            ActionKind::GetAdlists => "get_adlists",
            ActionKind::AddAdlist => "add_adlist",
            ActionKind::EditAdlist => "edit_adlist",
            ActionKind::DeleteAdlist => "delete_adlist"
        }
    }

    /// Read the action name from a request body
    pub fn from_body(body: &Value) -> Result<Self, Error> {
        body.get("action")
            .and_then(Value::as_str)
            .ok_or_else(|| Error::from(ErrorKind::MissingField("action".to_owned())))?
            .parse()
    }
}

impl FromStr for ActionKind {
    type Err = Error;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        ActionKind::ALL
            .iter()
            .find(|kind| kind.as_str() == name)
            .copied()
            .ok_or_else(|| Error::from(ErrorKind::UnsupportedAction(name.to_owned())))
    }
}

impl Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A requested action with its validated input
#[derive(Clone, Debug, PartialEq)]
pub enum Action {
    GetGroups,
    AddGroup(NewGroup),
    EditGroup {
        id: i32,
        changes: GroupChanges
    },
    DeleteGroup {
        id: i32
    },
    GetClients,
    GetUnconfiguredClients,
    AddClient(NewClient),
    EditClient {
        id: i32,
        groups: BTreeSet<i32>
    },
    DeleteClient {
        id: i32
    },
    GetDomains,
    AddDomain(NewDomainRule),
    EditDomain {
        id: i32,
        changes: DomainRuleChanges,
        groups: BTreeSet<i32>
    },
    DeleteDomain {
        id: i32
    },
    GetAdlists,
    AddAdlist(NewAdlist),
    EditAdlist {
        id: i32,
        changes: AdlistChanges,
        groups: BTreeSet<i32>
    },
    DeleteAdlist {
        id: i32
    }
}

#[derive(Deserialize)]
struct IdInput {
    id: i32
}

#[derive(Deserialize)]
struct AddGroupInput {
    name: Option<String>,
    desc: Option<String>
}

#[derive(Deserialize)]
struct EditGroupInput {
    id: i32,
    status: i64,
    name: Option<String>,
    desc: Option<String>
}

#[derive(Deserialize)]
struct AddClientInput {
    ip: Option<String>
}

#[derive(Deserialize)]
struct EditClientInput {
    id: i32,
    #[serde(default)]
    groups: BTreeSet<i32>
}

#[derive(Deserialize)]
struct AddDomainInput {
    domain: Option<String>,
    #[serde(rename = "type")]
    domain_type: i64,
    comment: Option<String>
}

#[derive(Deserialize)]
struct EditDomainInput {
    id: i32,
    #[serde(rename = "type")]
    domain_type: i64,
    status: i64,
    comment: Option<String>,
    #[serde(default)]
    groups: BTreeSet<i32>
}

#[derive(Deserialize)]
struct AddAdlistInput {
    address: Option<String>,
    comment: Option<String>
}

#[derive(Deserialize)]
struct EditAdlistInput {
    id: i32,
    status: i64,
    comment: Option<String>,
    #[serde(default)]
    groups: BTreeSet<i32>
}

/// Read the fields of an action from the request body
fn fields<T: DeserializeOwned>(body: Value) -> Result<T, Error> {
    serde_json::from_value(body).map_err(|e| Error::from(e.context(ErrorKind::BadRequest)))
}

impl Action {
    /// Validate the fields of the requested action
    pub fn parse(kind: ActionKind, body: Value) -> Result<Self, Error> {
        Ok(match kind {
            ActionKind::GetGroups => Action::GetGroups,
            ActionKind::AddGroup => {
                let input: AddGroupInput = fields(body)?;
                Action::AddGroup(NewGroup::new(input.name, input.desc)?)
            }
            ActionKind::EditGroup => {
                let input: EditGroupInput = fields(body)?;
                Action::EditGroup {
                    id: input.id,
                    changes: GroupChanges::new(input.status, input.name, input.desc)?
                }
            }
            ActionKind::DeleteGroup => Action::DeleteGroup {
                id: fields::<IdInput>(body)?.id
            },
            ActionKind::GetClients => Action::GetClients,
            ActionKind::GetUnconfiguredClients => Action::GetUnconfiguredClients,
            ActionKind::AddClient => {
                let input: AddClientInput = fields(body)?;
                Action::AddClient(NewClient::new(input.ip)?)
            }
            ActionKind::EditClient => {
                let input: EditClientInput = fields(body)?;
                Action::EditClient {
                    id: input.id,
                    groups: input.groups
                }
            }
            ActionKind::DeleteClient => Action::DeleteClient {
                id: fields::<IdInput>(body)?.id
            },
            ActionKind::GetDomains => Action::GetDomains,
            ActionKind::AddDomain => {
                let input: AddDomainInput = fields(body)?;
                Action::AddDomain(NewDomainRule::new(
                    input.domain,
                    input.domain_type,
                    input.comment
                )?)
            }
            ActionKind::EditDomain => {
                let input: EditDomainInput = fields(body)?;
                Action::EditDomain {
                    id: input.id,
                    changes: DomainRuleChanges::new(
                        input.domain_type,
                        input.status,
                        input.comment
                    )?,
                    groups: input.groups
                }
            }
            ActionKind::DeleteDomain => Action::DeleteDomain {
                id: fields::<IdInput>(body)?.id
            },
            ActionKind::GetAdlists => Action::GetAdlists,
            ActionKind::AddAdlist => {
                let input: AddAdlistInput = fields(body)?;
                Action::AddAdlist(NewAdlist::new(input.address, input.comment)?)
            }
            ActionKind::EditAdlist => {
                let input: EditAdlistInput = fields(body)?;
                Action::EditAdlist {
                    id: input.id,
                    changes: AdlistChanges::new(input.status, input.comment),
                    groups: input.groups
                }
            }
            ActionKind::DeleteAdlist => Action::DeleteAdlist {
                id: fields::<IdInput>(body)?.id
            }
        })
    }
}
