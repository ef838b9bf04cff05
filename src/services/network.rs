// Pi-hole: A black hole for Internet advertisements
// (c) 2019 Pi-hole, LLC (https://pi-hole.net)
// Network-wide ad blocking via your own hardware.
//
// API
// Network Telemetry Repository
//
// This file is copyright under the latest version of the EUPL.
// Please see LICENSE file for your rights under this license.

use crate::{
    databases::ftl::connect_read_only,
    env::Env,
    util::{Error, ErrorKind}
};
use diesel::prelude::*;
use failure::ResultExt;
use rocket::{
    request::{self, FromRequest},
    Outcome, Request, State
};

#[cfg(test)]
use mock_it::Mock;

/// Describes what FTL has observed on the network
pub trait NetworkRepository {
    /// Every address FTL has seen on the network, ascending and without
    /// duplicates
    fn observed_addresses(&self) -> Result<Vec<String>, Error>;
}

service!(
    NetworkRepositoryGuard,
    NetworkRepository,
    NetworkRepositoryImpl,
    NetworkRepositoryMock
);

/// The implementation of `NetworkRepository`. FTL's database is opened for
/// each read.
pub struct NetworkRepositoryImpl<'r> {
    env: &'r Env
}

impl<'a, 'r> FromRequest<'a, 'r> for NetworkRepositoryImpl<'r> {
    type Error = ();

    fn from_request(request: &'a Request<'r>) -> request::Outcome<Self, Self::Error> {
        let env = request.guard::<State<Env>>()?.inner();

        Outcome::Success(NetworkRepositoryImpl { env })
    }
}

impl<'r> NetworkRepository for NetworkRepositoryImpl<'r> {
    fn observed_addresses(&self) -> Result<Vec<String>, Error> {
        use crate::databases::ftl::network_addresses::dsl::*;

        let db = connect_read_only(&self.env.config().file_locations.ftl)?;

        let addresses: Vec<String> = network_addresses
            .select(ip)
            .distinct()
            .order(ip.asc())
            .load(&db)
            .context(ErrorKind::FtlDatabase)?;

        Ok(addresses)
    }
}

#[cfg(test)]
#[derive(Clone)]
pub struct NetworkRepositoryMock {
    pub observed_addresses: Mock<(), Result<Vec<String>, Error>>
}

#[cfg(test)]
impl Default for NetworkRepositoryMock {
    fn default() -> Self {
        NetworkRepositoryMock {
            observed_addresses: Mock::new(Ok(Vec::new()))
        }
    }
}

#[cfg(test)]
impl NetworkRepository for NetworkRepositoryMock {
    fn observed_addresses(&self) -> Result<Vec<String>, Error> {
        self.observed_addresses.called(())
    }
}

#[cfg(test)]
mod test {
    use super::{NetworkRepository, NetworkRepositoryImpl};
    use crate::{
        databases::ftl::create_ftl_test_db,
        env::{Config, Env},
        util::ErrorKind
    };

    fn test_env(ftl: &str) -> Env {
        let mut config = Config::default();
        config.file_locations.ftl = ftl.to_owned();

        Env::Test(config)
    }

    /// Addresses are read in ascending order
    #[test]
    fn observed_addresses_sorted() {
        let ftl = create_ftl_test_db();
        let env = test_env(ftl.path().to_str().unwrap());
        let repo = NetworkRepositoryImpl { env: &env };

        assert_eq!(
            repo.observed_addresses().unwrap(),
            vec![
                "10.0.0.1".to_owned(),
                "10.0.0.2".to_owned(),
                "10.0.0.3".to_owned()
            ]
        );
    }

    /// A missing FTL database fails the read
    #[test]
    fn missing_database() {
        let env = test_env("/this/database/does/not/exist.db");
        let repo = NetworkRepositoryImpl { env: &env };

        assert_eq!(
            repo.observed_addresses().unwrap_err().kind(),
            ErrorKind::FtlDatabase
        );
    }
}
