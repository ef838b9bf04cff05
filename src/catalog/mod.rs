// Pi-hole: A black hole for Internet advertisements
// (c) 2019 Pi-hole, LLC (https://pi-hole.net)
// Network-wide ad blocking via your own hardware.
//
// API
// Gravity Catalog: groups, clients, domains, adlists, and their memberships
//
// This file is copyright under the latest version of the EUPL.
// Please see LICENSE file for your rights under this license.

//! The catalog keeps the Gravity database consistent. Every entity which can
//! belong to groups has its memberships replaced atomically, and every delete
//! removes the membership rows before the row they reference.

mod association;
mod cascade;
mod change;
mod domain_type;
mod entity;
mod grouped;
mod input;
mod store;
mod unconfigured;

pub use self::{
    association::*, cascade::*, change::*, domain_type::*, entity::*, grouped::*, input::*,
    store::*, unconfigured::*
};
