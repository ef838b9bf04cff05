// Pi-hole: A black hole for Internet advertisements
// (c) 2019 Pi-hole, LLC (https://pi-hole.net)
// Network-wide ad blocking via your own hardware.
//
// API
// Mockable Service Code
//
// This file is copyright under the latest version of the EUPL.
// Please see LICENSE file for your rights under this license.

//! Request guards for the services which reach outside of the Gravity
//! database: FTL's network table and the DNS server. Endpoint tests swap a
//! service for its mock by putting the mock into Rocket's state.
//!
//! Handlers take the guard and pass the service on as a trait object:
//! ```ignore
//! service!(
//!     NetworkRepositoryGuard,
//!     NetworkRepository,
//!     NetworkRepositoryImpl,
//!     NetworkRepositoryMock
//! );
//!
//! #[post("/clients")]
//! fn clients(network: NetworkRepositoryGuard) -> Reply {
//!     reply_data(observed(&*network)?)
//! }
//!
//! fn observed(network: &dyn NetworkRepository) -> Result<Vec<String>, Error> {
//!     network.observed_addresses()
//! }
//! ```

use rocket::{
    request::{self, FromRequest},
    Outcome, Request
};
use std::{
    marker::{PhantomData, Unsize},
    ops::Deref
};

#[cfg(test)]
use rocket::State;

/// Declare `$guard` as the request guard of `$service`. Outside of tests the
/// guard always builds `$service_impl`; in tests a managed `$service_mock`
/// takes its place.
macro_rules! service {
    ($guard:ident, $service:ident, $service_impl:ident, $service_mock:ident) => {
        #[cfg(not(test))]
        pub type $guard<'r> = $crate::services::Service<'r, dyn $service, $service_impl<'r>>;

        #[cfg(test)]
        pub type $guard<'r> =
            $crate::services::Service<'r, dyn $service, $service_impl<'r>, $service_mock>;

        #[cfg(test)]
        impl std::ops::Deref for $service_mock {
            type Target = dyn $service;

            fn deref(&self) -> &Self::Target {
                self
            }
        }
    };
}

/// A service built for the current request
#[cfg(not(test))]
pub struct Service<'r, Trait, Impl>
where
    Trait: ?Sized + 'r,
    Impl: Unsize<Trait>
{
    live: Impl,
    service: PhantomData<&'r Trait>
}

/// A service built for the current request, or the mock a test put into
/// Rocket's state
#[cfg(test)]
pub enum Service<'r, Trait, Impl, Mock>
where
    Trait: ?Sized + 'r,
    Impl: Unsize<Trait>,
    Mock: Send + Sync + 'static,
    <State<'r, Mock> as Deref>::Target: Unsize<Trait>
{
    Live(Impl, PhantomData<&'r Trait>),
    Mocked(State<'r, Mock>)
}

#[cfg(not(test))]
impl<'r, Trait, Impl> Deref for Service<'r, Trait, Impl>
where
    Trait: ?Sized + 'r,
    Impl: Unsize<Trait>
{
    type Target = Trait;

    fn deref(&self) -> &Trait {
        &self.live
    }
}

#[cfg(test)]
impl<'r, Trait, Impl, Mock> Deref for Service<'r, Trait, Impl, Mock>
where
    Trait: ?Sized + 'r,
    Impl: Unsize<Trait>,
    Mock: Send + Sync + 'static,
    <State<'r, Mock> as Deref>::Target: Unsize<Trait>
{
    type Target = Trait;

    fn deref(&self) -> &Trait {
        match self {
            Service::Live(live, _) => live,
            Service::Mocked(mock) => mock.inner()
        }
    }
}

#[cfg(not(test))]
impl<'a, 'r, Trait, Impl> FromRequest<'a, 'r> for Service<'r, Trait, Impl>
where
    Trait: ?Sized + 'r,
    Impl: Unsize<Trait> + FromRequest<'a, 'r>
{
    type Error = Impl::Error;

    fn from_request(request: &'a Request<'r>) -> request::Outcome<Self, Self::Error> {
        let live = Impl::from_request(request)?;

        Outcome::Success(Service {
            live,
            service: PhantomData
        })
    }
}

#[cfg(test)]
impl<'a, 'r, Trait, Impl, Mock> FromRequest<'a, 'r> for Service<'r, Trait, Impl, Mock>
where
    Trait: ?Sized + 'r,
    Impl: Unsize<Trait> + FromRequest<'a, 'r>,
    Mock: Send + Sync + 'static,
    <State<'r, Mock> as Deref>::Target: Unsize<Trait>
{
    type Error = Impl::Error;

    fn from_request(request: &'a Request<'r>) -> request::Outcome<Self, Self::Error> {
        // A managed mock wins over the implementation
        match request.guard::<State<Mock>>().succeeded() {
            Some(mock) => Outcome::Success(Service::Mocked(mock)),
            None => Impl::from_request(request).map(|live| Service::Live(live, PhantomData))
        }
    }
}
