// Pi-hole: A black hole for Internet advertisements
// (c) 2019 Pi-hole, LLC (https://pi-hole.net)
// Network-wide ad blocking via your own hardware.
//
// API
// Authentication Functions And Routes
//
// This file is copyright under the latest version of the EUPL.
// Please see LICENSE file for your rights under this license.

use crate::{
    env::config::AuthConfig,
    util::{reply_success, Error, ErrorKind, Reply}
};
use rocket::{
    http::{Cookie, Cookies},
    request::{self, FromRequest, Request, State},
    Outcome
};
use std::sync::atomic::{AtomicUsize, Ordering};

const SESSION_COOKIE: &str = "user_id";
const KEY_HEADER: &str = "X-Pi-hole-Authenticate";

/// When used as a request guard, requests must be authenticated. Requests are
/// authenticated by the session cookie or by the API key header, which opens
/// a new session.
#[derive(Debug)]
pub struct User {
    pub id: usize
}

/// The API key and the next session ID, stored in the server state
pub struct AuthData {
    key: Option<String>,
    next_id: AtomicUsize
}

impl User {
    /// Load the session from the private cookie
    fn from_session(cookies: &mut Cookies) -> Option<Self> {
        cookies
            .get_private(SESSION_COOKIE)
            .and_then(|cookie| cookie.value().parse().ok())
            .map(|id| User { id })
    }

    /// Store the session in a private cookie
    fn store_session(&self, cookies: &mut Cookies) {
        cookies.add_private(
            Cookie::build(SESSION_COOKIE, self.id.to_string())
                // Allow the web interface to read the cookie
                .http_only(false)
                .finish()
        );
    }

    /// End the session by removing the cookie
    fn logout(&self, mut cookies: Cookies) {
        cookies.remove_private(Cookie::named(SESSION_COOKIE));
    }
}

impl<'a, 'r> FromRequest<'a, 'r> for User {
    type Error = Error;

    fn from_request(request: &'a Request<'r>) -> request::Outcome<Self, Self::Error> {
        if let Some(user) = User::from_session(&mut request.cookies()) {
            return Outcome::Success(user);
        }

        let auth_data = match request.guard::<State<AuthData>>().succeeded() {
            Some(auth_data) => auth_data,
            None => return Error::from(ErrorKind::Unknown).into_outcome()
        };

        match auth_data.authenticate(request.headers().get_one(KEY_HEADER)) {
            Ok(user) => {
                user.store_session(&mut request.cookies());
                Outcome::Success(user)
            }
            Err(e) => {
                warn!("Rejected unauthenticated request to {}", request.uri());
                e.into_outcome()
            }
        }
    }
}

impl AuthData {
    pub fn new(config: &AuthConfig) -> AuthData {
        AuthData {
            key: config.key.clone(),
            next_id: AtomicUsize::new(1)
        }
    }

    /// Open a session if the given key matches. Without a configured key,
    /// every request opens a session.
    fn authenticate(&self, given_key: Option<&str>) -> Result<User, Error> {
        match (&self.key, given_key) {
            (None, _) => Ok(self.create_user()),
            (Some(key), Some(given_key)) if key == given_key => Ok(self.create_user()),
            _ => Err(Error::from(ErrorKind::Unauthorized))
        }
    }

    fn create_user(&self) -> User {
        User {
            id: self.next_id.fetch_add(1, Ordering::Relaxed)
        }
    }
}

/// Provides an endpoint to authenticate or check if already authenticated
#[get("/auth")]
pub fn check(_user: User) -> Reply {
    reply_success()
}

/// Clears the user's authentication
#[delete("/auth")]
pub fn logout(user: User, cookies: Cookies) -> Reply {
    user.logout(cookies);
    reply_success()
}
