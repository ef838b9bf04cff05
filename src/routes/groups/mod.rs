// Pi-hole: A black hole for Internet advertisements
// (c) 2019 Pi-hole, LLC (https://pi-hole.net)
// Network-wide ad blocking via your own hardware.
//
// API
// Group Management Endpoint
//
// This file is copyright under the latest version of the EUPL.
// Please see LICENSE file for your rights under this license.

mod action;
mod dispatch;

pub use self::{action::*, dispatch::*};

use crate::{
    catalog::ChangeTracker,
    databases::gravity::GravityDatabase,
    routes::auth::User,
    services::{network::NetworkRepositoryGuard, reload::DnsReloaderGuard},
    util::{reply_data, Error, ErrorKind, Reply}
};
use rocket_contrib::json::Json;
use serde_json::Value;

/// The reply to a failed action. The request itself was handled, so this is
/// sent with a successful HTTP status.
#[derive(Serialize)]
struct ActionFailure {
    success: bool,
    message: String,
    action: &'static str
}

/// Run a group management action. The action is chosen by the `action` field
/// of the body and its input is read from the other fields.
#[post("/groups", data = "<body>")]
pub fn groups(
    _auth: User,
    db: Option<GravityDatabase>,
    network: NetworkRepositoryGuard,
    reloader: DnsReloaderGuard,
    body: Json<Value>
) -> Reply {
    let body = body.into_inner();
    let kind = ActionKind::from_body(&body).map_err(|e| {
        warn!("Rejected group management request: {}", e.message());
        e
    })?;
    let mut tracker = ChangeTracker::new();

    let result = db
        .ok_or_else(|| Error::from(ErrorKind::GravityDatabase))
        .and_then(|db| {
            let action = Action::parse(kind, body)?;
            dispatch(action, &db, &*network, &mut tracker)
        });

    if tracker.has_changes() {
        info!("Configuration changed by {}", kind);

        if let Err(e) = reloader.reload_lists() {
            error!("Failed to reload the DNS server after {}: {}", kind, e.message());
        }
    }

    match result {
        Ok(reply) => reply_data(reply),
        Err(e) => {
            warn!("Action {} failed: {}", kind, e.message());

            reply_data(ActionFailure {
                success: false,
                message: e.message(),
                action: kind.as_str()
            })
        }
    }
}

#[cfg(test)]
mod test {
    use crate::{
        services::{network::NetworkRepositoryMock, reload::DnsReloaderMock},
        testing::TestBuilder,
        util::{Error, ErrorKind}
    };
    use mock_it::verify;
    use rocket::http::{Method, Status};

    fn builder() -> TestBuilder {
        TestBuilder::new()
            .endpoint("/admin/api/groups")
            .method(Method::Post)
    }

    fn reloader() -> DnsReloaderMock {
        DnsReloaderMock::default()
    }

    /// Groups are listed under `data`
    #[test]
    fn get_groups() {
        builder()
            .body(serde_json::json!({ "action": "get_groups" }))
            .expect_json(serde_json::json!({
                "data": [
                    {
                        "id": 1,
                        "enabled": true,
                        "name": "Default",
                        "date_added": 1_559_928_803,
                        "date_modified": 1_559_928_803,
                        "description": null
                    },
                    {
                        "id": 2,
                        "enabled": true,
                        "name": "Kids",
                        "date_added": 1_559_928_803,
                        "date_modified": 1_559_928_803,
                        "description": "Devices of the kids"
                    },
                    {
                        "id": 3,
                        "enabled": false,
                        "name": "Guests",
                        "date_added": 1_559_928_803,
                        "date_modified": 1_559_928_803,
                        "description": null
                    }
                ]
            }))
            .test();
    }

    /// Domains are listed with their type and groups
    #[test]
    fn get_domains() {
        builder()
            .body(serde_json::json!({ "action": "get_domains" }))
            .expect_json(serde_json::json!({
                "data": [
                    {
                        "id": 1,
                        "type": 0,
                        "domain": "allowed.com",
                        "enabled": true,
                        "date_added": 1_559_928_803,
                        "date_modified": 1_559_928_803,
                        "comment": null,
                        "groups": [1]
                    },
                    {
                        "id": 2,
                        "type": 1,
                        "domain": "blocked.com",
                        "enabled": true,
                        "date_added": 1_559_928_803,
                        "date_modified": 1_559_928_803,
                        "comment": "Ads",
                        "groups": [1, 2]
                    },
                    {
                        "id": 3,
                        "type": 3,
                        "domain": "(^|\\.)tracker\\.net$",
                        "enabled": false,
                        "date_added": 1_559_928_803,
                        "date_modified": 1_559_928_803,
                        "comment": null,
                        "groups": []
                    }
                ]
            }))
            .test();
    }

    /// Clients are listed with their groups
    #[test]
    fn get_clients() {
        builder()
            .body(serde_json::json!({ "action": "get_clients" }))
            .expect_json(serde_json::json!({
                "data": [
                    {
                        "id": 1,
                        "ip": "10.0.0.2",
                        "date_added": 1_559_928_803,
                        "date_modified": 1_559_928_803,
                        "groups": [1, 2]
                    },
                    {
                        "id": 2,
                        "ip": "10.0.0.5",
                        "date_added": 1_559_928_803,
                        "date_modified": 1_559_928_803,
                        "groups": [1]
                    }
                ]
            }))
            .test();
    }

    /// Unconfigured clients are a plain list of addresses
    #[test]
    fn get_unconfigured_clients() {
        let network = NetworkRepositoryMock::default();
        network.observed_addresses.given(()).will_return(Ok(vec![
            "10.0.0.1".to_owned(),
            "10.0.0.2".to_owned(),
            "10.0.0.3".to_owned(),
        ]));

        builder()
            .body(serde_json::json!({ "action": "get_unconfigured_clients" }))
            .mock_service(network)
            .expect_json(serde_json::json!(["10.0.0.1", "10.0.0.3"]))
            .test();
    }

    /// A telemetry failure is reported as a failed action
    #[test]
    fn unconfigured_clients_telemetry_failure() {
        let network = NetworkRepositoryMock::default();
        network
            .observed_addresses
            .given(())
            .will_return(Err(Error::from(ErrorKind::FtlDatabase)));

        builder()
            .body(serde_json::json!({ "action": "get_unconfigured_clients" }))
            .mock_service(network)
            .expect_json(serde_json::json!({
                "success": false,
                "message": "Error reading from the FTL database",
                "action": "get_unconfigured_clients"
            }))
            .test();
    }

    /// A successful mutation replies with success and reloads the DNS server
    #[test]
    fn add_group_reloads() {
        let reloader = reloader();

        builder()
            .body(serde_json::json!({
                "action": "add_group",
                "name": "Office",
                "desc": ""
            }))
            .mock_service(reloader.clone())
            .expect_json(serde_json::json!({
                "success": true,
                "message": null
            }))
            .test();

        assert!(verify(reloader.reload_lists.was_called_with(())));
    }

    /// Reads never reload the DNS server
    #[test]
    fn read_does_not_reload() {
        let reloader = reloader();

        builder()
            .body(serde_json::json!({ "action": "get_adlists" }))
            .mock_service(reloader.clone())
            .test();

        assert!(!verify(reloader.reload_lists.was_called_with(())));
    }

    /// A failed mutation is reported with its action and does not reload
    #[test]
    fn duplicate_group_fails() {
        let reloader = reloader();

        builder()
            .body(serde_json::json!({
                "action": "add_group",
                "name": "Kids"
            }))
            .mock_service(reloader.clone())
            .expect_json(serde_json::json!({
                "success": false,
                "message": "Item already exists: UNIQUE constraint failed: group.name",
                "action": "add_group"
            }))
            .test();

        assert!(!verify(reloader.reload_lists.was_called_with(())));
    }

    /// Validation errors are reported as failed actions
    #[test]
    fn missing_field_fails() {
        builder()
            .body(serde_json::json!({
                "action": "add_domain",
                "type": 0
            }))
            .expect_json(serde_json::json!({
                "success": false,
                "message": "Missing required field: domain",
                "action": "add_domain"
            }))
            .test();
    }

    /// A reload failure does not fail the committed change
    #[test]
    fn reload_failure_still_succeeds() {
        let reloader = reloader();
        reloader
            .reload_lists
            .given(())
            .will_return(Err(Error::from(ErrorKind::ReloadError)));

        builder()
            .body(serde_json::json!({
                "action": "delete_domain",
                "id": 2
            }))
            .mock_service(reloader.clone())
            .expect_json(serde_json::json!({
                "success": true,
                "message": null
            }))
            .test();

        assert!(verify(reloader.reload_lists.was_called_with(())));
    }

    /// Deleting a group which is in use removes its memberships
    #[test]
    fn delete_group_in_use() {
        builder()
            .body(serde_json::json!({
                "action": "delete_group",
                "id": 1
            }))
            .expect_json(serde_json::json!({
                "success": true,
                "message": null
            }))
            .follow_up(
                serde_json::json!({ "action": "get_clients" }),
                serde_json::json!({
                    "data": [
                        {
                            "id": 1,
                            "ip": "10.0.0.2",
                            "date_added": 1_559_928_803,
                            "date_modified": 1_559_928_803,
                            "groups": [2]
                        },
                        {
                            "id": 2,
                            "ip": "10.0.0.5",
                            "date_added": 1_559_928_803,
                            "date_modified": 1_559_928_803,
                            "groups": []
                        }
                    ]
                })
            )
            .follow_up(
                serde_json::json!({ "action": "get_domains" }),
                serde_json::json!({
                    "data": [
                        {
                            "id": 1,
                            "type": 0,
                            "domain": "allowed.com",
                            "enabled": true,
                            "date_added": 1_559_928_803,
                            "date_modified": 1_559_928_803,
                            "comment": null,
                            "groups": []
                        },
                        {
                            "id": 2,
                            "type": 1,
                            "domain": "blocked.com",
                            "enabled": true,
                            "date_added": 1_559_928_803,
                            "date_modified": 1_559_928_803,
                            "comment": "Ads",
                            "groups": [2]
                        },
                        {
                            "id": 3,
                            "type": 3,
                            "domain": "(^|\\.)tracker\\.net$",
                            "enabled": false,
                            "date_added": 1_559_928_803,
                            "date_modified": 1_559_928_803,
                            "comment": null,
                            "groups": []
                        }
                    ]
                })
            )
            .follow_up(
                serde_json::json!({ "action": "get_adlists" }),
                serde_json::json!({
                    "data": [
                        {
                            "id": 1,
                            "address": "https://hosts-file.net/ad_servers.txt",
                            "enabled": true,
                            "date_added": 1_559_928_803,
                            "date_modified": 1_559_928_803,
                            "comment": "Main list",
                            "groups": []
                        },
                        {
                            "id": 2,
                            "address": "https://example.com/hosts",
                            "enabled": false,
                            "date_added": 1_559_928_803,
                            "date_modified": 1_559_928_803,
                            "comment": null,
                            "groups": []
                        }
                    ]
                })
            )
            .test();
    }

    /// A regex rule holding a pattern can not be turned into an exact rule
    #[test]
    fn edit_domain_invalid_for_type() {
        let reloader = reloader();

        builder()
            .body(serde_json::json!({
                "action": "edit_domain",
                "id": 3,
                "type": 0,
                "status": 1,
                "groups": [1]
            }))
            .mock_service(reloader.clone())
            .expect_json(serde_json::json!({
                "success": false,
                "message": "Invalid domain",
                "action": "edit_domain"
            }))
            .test();

        assert!(!verify(reloader.reload_lists.was_called_with(())));
    }

    /// Edits with an unknown group keep the previous state
    #[test]
    fn edit_adlist_unknown_group() {
        builder()
            .body(serde_json::json!({
                "action": "edit_adlist",
                "id": 1,
                "status": 0,
                "groups": [1, 42]
            }))
            .expect_json(serde_json::json!({
                "success": false,
                "message": "Referenced item does not exist: FOREIGN KEY constraint failed",
                "action": "edit_adlist"
            }))
            .test();
    }

    /// Adlists without groups list an empty set of groups
    #[test]
    fn get_adlists_without_groups() {
        builder()
            .body(serde_json::json!({ "action": "get_adlists" }))
            .gravity_sql(
                "UPDATE adlist SET enabled = 0, comment = NULL WHERE id = 1;
                 DELETE FROM adlist_by_group;"
            )
            .expect_json(serde_json::json!({
                "data": [
                    {
                        "id": 1,
                        "address": "https://hosts-file.net/ad_servers.txt",
                        "enabled": false,
                        "date_added": 1_559_928_803,
                        "date_modified": 1_559_928_803,
                        "comment": null,
                        "groups": []
                    },
                    {
                        "id": 2,
                        "address": "https://example.com/hosts",
                        "enabled": false,
                        "date_added": 1_559_928_803,
                        "date_modified": 1_559_928_803,
                        "comment": null,
                        "groups": []
                    }
                ]
            }))
            .test();
    }

    /// Unknown actions fail the whole request
    #[test]
    fn unsupported_action() {
        builder()
            .body(serde_json::json!({ "action": "drop_everything" }))
            .expect_status(Status::BadRequest)
            .expect_json(serde_json::json!({
                "error": {
                    "key": "unsupported_action",
                    "message": "Requested action not supported: drop_everything"
                }
            }))
            .test();
    }

    /// A request without an action fails
    #[test]
    fn missing_action() {
        builder()
            .body(serde_json::json!({ "id": 1 }))
            .expect_status(Status::BadRequest)
            .expect_json(serde_json::json!({
                "error": {
                    "key": "missing_field",
                    "message": "Missing required field: action"
                }
            }))
            .test();
    }

    /// The endpoint requires authentication
    #[test]
    fn unauthenticated() {
        builder()
            .body(serde_json::json!({ "action": "get_groups" }))
            .should_auth(false)
            .expect_status(Status::Unauthorized)
            .expect_json(serde_json::json!({
                "error": {
                    "key": "unauthorized",
                    "message": "Unauthorized"
                }
            }))
            .test();
    }
}
