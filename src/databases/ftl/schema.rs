// Pi-hole: A black hole for Internet advertisements
// (c) 2018 Pi-hole, LLC (https://pi-hole.net)
// Network-wide ad blocking via your own hardware.
//
// API
// FTL Database Schema
//
// This file is copyright under the latest version of the EUPL.
// Please see LICENSE file for your rights under this license.

table! {
    network_addresses (ip) {
        network_id -> Integer,
        ip -> Text,
        #[sql_name = "lastSeen"]
        last_seen -> Integer,
    }
}
