// Pi-hole: A black hole for Internet advertisements
// (c) 2019 Pi-hole, LLC (https://pi-hole.net)
// Network-wide ad blocking via your own hardware.
//
// API
// Gravity Database Schema
//
// This file is copyright under the latest version of the EUPL.
// Please see LICENSE file for your rights under this license.

table! {
    adlist (id) {
        id -> Integer,
        address -> Text,
        enabled -> Bool,
        date_added -> Integer,
        date_modified -> Integer,
        comment -> Nullable<Text>,
    }
}

table! {
    adlist_by_group (adlist_id, group_id) {
        adlist_id -> Integer,
        group_id -> Integer,
    }
}

table! {
    client (id) {
        id -> Integer,
        ip -> Text,
        date_added -> Integer,
        date_modified -> Integer,
    }
}

table! {
    client_by_group (client_id, group_id) {
        client_id -> Integer,
        group_id -> Integer,
    }
}

table! {
    domainlist (id) {
        id -> Integer,
        #[sql_name = "type"]
        domain_type -> Integer,
        domain -> Text,
        enabled -> Bool,
        date_added -> Integer,
        date_modified -> Integer,
        comment -> Nullable<Text>,
    }
}

table! {
    domainlist_by_group (domainlist_id, group_id) {
        domainlist_id -> Integer,
        group_id -> Integer,
    }
}

table! {
    group (id) {
        id -> Integer,
        enabled -> Bool,
        name -> Text,
        date_added -> Integer,
        date_modified -> Integer,
        description -> Nullable<Text>,
    }
}

joinable!(adlist_by_group -> adlist (adlist_id));
joinable!(adlist_by_group -> group (group_id));
joinable!(client_by_group -> client (client_id));
joinable!(client_by_group -> group (group_id));
joinable!(domainlist_by_group -> domainlist (domainlist_id));
joinable!(domainlist_by_group -> group (group_id));

allow_tables_to_appear_in_same_query!(
    adlist,
    adlist_by_group,
    client,
    client_by_group,
    domainlist,
    domainlist_by_group,
    group,
);
