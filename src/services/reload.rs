// Pi-hole: A black hole for Internet advertisements
// (c) 2019 Pi-hole, LLC (https://pi-hole.net)
// Network-wide ad blocking via your own hardware.
//
// API
// DNS Server List Reloading
//
// This file is copyright under the latest version of the EUPL.
// Please see LICENSE file for your rights under this license.

use crate::{
    env::Env,
    util::{Error, ErrorKind}
};
use failure::ResultExt;
use rocket::{
    request::{self, FromRequest},
    Outcome, Request, State
};
use std::process::{Command, Stdio};

#[cfg(test)]
use mock_it::Mock;

/// Tells the DNS server to reload its lists after the configuration changed
pub trait DnsReloader {
    fn reload_lists(&self) -> Result<(), Error>;
}

service!(
    DnsReloaderGuard,
    DnsReloader,
    DnsReloaderImpl,
    DnsReloaderMock
);

/// The implementation of `DnsReloader`. It runs the configured reload
/// command.
pub struct DnsReloaderImpl<'r> {
    env: &'r Env
}

impl<'a, 'r> FromRequest<'a, 'r> for DnsReloaderImpl<'r> {
    type Error = ();

    fn from_request(request: &'a Request<'r>) -> request::Outcome<Self, Self::Error> {
        let env = request.guard::<State<Env>>()?.inner();

        Outcome::Success(DnsReloaderImpl { env })
    }
}

impl<'r> DnsReloader for DnsReloaderImpl<'r> {
    fn reload_lists(&self) -> Result<(), Error> {
        // Don't actually reload the DNS server during testing
        if self.env.is_test() {
            return Ok(());
        }

        let command = &self.env.config().reload.command;
        let (program, args) = command
            .split_first()
            .ok_or_else(|| Error::from(ErrorKind::ReloadError))?;

        info!("Reloading DNS server lists: {}", command.join(" "));

        let status = Command::new(program)
            .args(args)
            // Ignore stdin, stdout, and stderr
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .context(ErrorKind::ReloadError)?;

        if status.success() {
            Ok(())
        } else {
            Err(Error::from(ErrorKind::ReloadError))
        }
    }
}

#[cfg(test)]
#[derive(Clone)]
pub struct DnsReloaderMock {
    pub reload_lists: Mock<(), Result<(), Error>>
}

#[cfg(test)]
impl Default for DnsReloaderMock {
    fn default() -> Self {
        DnsReloaderMock {
            reload_lists: Mock::new(Ok(()))
        }
    }
}

#[cfg(test)]
impl DnsReloader for DnsReloaderMock {
    fn reload_lists(&self) -> Result<(), Error> {
        self.reload_lists.called(())
    }
}
