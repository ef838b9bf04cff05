// Pi-hole: A black hole for Internet advertisements
// (c) 2019 Pi-hole, LLC (https://pi-hole.net)
// Network-wide ad blocking via your own hardware.
//
// API
// Unconfigured Clients
//
// This file is copyright under the latest version of the EUPL.
// Please see LICENSE file for your rights under this license.

use crate::{
    catalog::EntityStore,
    databases::gravity::Client,
    services::network::NetworkRepository,
    util::Error
};
use diesel::SqliteConnection;
use std::collections::HashSet;

/// Addresses seen on the network which are not configured as clients, in the
/// order the network reports them
pub fn list_unconfigured(
    db: &SqliteConnection,
    network: &dyn NetworkRepository
) -> Result<Vec<String>, Error> {
    let observed = network.observed_addresses()?;
    let configured: HashSet<String> = EntityStore::<Client>::new(db)
        .list()?
        .into_iter()
        .map(|client| client.ip)
        .collect();

    Ok(observed
        .into_iter()
        .filter(|address| !configured.contains(address))
        .collect())
}
