// Pi-hole: A black hole for Internet advertisements
// (c) 2019 Pi-hole, LLC (https://pi-hole.net)
// Network-wide ad blocking via your own hardware.
//
// API
// Configuration Change Tracking
//
// This file is copyright under the latest version of the EUPL.
// Please see LICENSE file for your rights under this license.

/// The result of an operation which writes to the Gravity database. Holding a
/// `Mutation` means the write was committed and the DNS server needs to
/// reload its lists.
#[derive(Debug, PartialEq)]
pub struct Mutation<T = ()> {
    value: T,
    changed: bool
}

impl<T> Mutation<T> {
    /// A committed change which produced `value`
    pub fn changed(value: T) -> Self {
        Mutation {
            value,
            changed: true
        }
    }

    pub fn is_changed(&self) -> bool {
        self.changed
    }

    pub fn into_value(self) -> T {
        self.value
    }

    /// Combine two mutations which happened in the same operation. The value
    /// of `other` is kept.
    pub fn and<U>(self, other: Mutation<U>) -> Mutation<U> {
        Mutation {
            value: other.value,
            changed: self.changed || other.changed
        }
    }
}

/// Collects the mutations of one request so the DNS server is reloaded at
/// most once, after the request's work is done
#[derive(Debug, Default)]
pub struct ChangeTracker {
    changed: bool
}

impl ChangeTracker {
    pub fn new() -> Self {
        ChangeTracker::default()
    }

    /// Record the mutation and unwrap its value
    pub fn record<T>(&mut self, mutation: Mutation<T>) -> T {
        self.changed |= mutation.is_changed();
        mutation.into_value()
    }

    /// Check if any recorded mutation changed the configuration
    pub fn has_changes(&self) -> bool {
        self.changed
    }
}
