// Pi-hole: A black hole for Internet advertisements
// (c) 2019 Pi-hole, LLC (https://pi-hole.net)
// Network-wide ad blocking via your own hardware.
//
// API
// Common Test Functions
//
// This file is copyright under the latest version of the EUPL.
// Please see LICENSE file for your rights under this license.

use crate::{
    env::{Config, Env},
    setup
};
use rocket::{
    http::{ContentType, Header, Method, Status},
    Rocket
};
use serde_json::Value;

/// The API key used by the test server
const TEST_KEY: &str = "test_key";

/// Builds an endpoint test against a server with a fresh in-memory Gravity
/// database
pub struct TestBuilder {
    endpoint: String,
    method: Method,
    headers: Vec<Header<'static>>,
    should_auth: bool,
    auth_required: bool,
    body_data: Option<Value>,
    gravity_sql: String,
    services: Vec<Box<dyn FnOnce(Rocket) -> Rocket>>,
    expected_json: Option<Value>,
    expected_status: Status,
    follow_ups: Vec<(Value, Value)>
}

impl TestBuilder {
    pub fn new() -> TestBuilder {
        TestBuilder {
            endpoint: "/".to_owned(),
            method: Method::Get,
            headers: Vec::new(),
            should_auth: true,
            auth_required: true,
            body_data: None,
            gravity_sql: String::new(),
            services: Vec::new(),
            expected_json: None,
            expected_status: Status::Ok,
            follow_ups: Vec::new()
        }
    }

    pub fn endpoint(mut self, endpoint: &str) -> Self {
        self.endpoint = endpoint.to_owned();
        self
    }

    pub fn method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    pub fn header<H: Into<Header<'static>>>(mut self, header: H) -> Self {
        self.headers.push(header.into());
        self
    }

    /// Send the API key with the request
    pub fn should_auth(mut self, should_auth: bool) -> Self {
        self.should_auth = should_auth;
        self
    }

    /// Configure the server with an API key
    pub fn auth_required(mut self, auth_required: bool) -> Self {
        self.auth_required = auth_required;
        self
    }

    pub fn body<T: Into<Value>>(mut self, body: T) -> Self {
        self.body_data = Some(body.into());
        self
    }

    /// SQL to run after the test data is loaded into the Gravity database
    pub fn gravity_sql(mut self, sql: &str) -> Self {
        self.gravity_sql.push_str(sql);
        self.gravity_sql.push('\n');
        self
    }

    /// Use `mock` instead of the service's implementation
    pub fn mock_service<M: Send + Sync + 'static>(mut self, mock: M) -> Self {
        self.services
            .push(Box::new(move |server: Rocket| server.manage(mock)));
        self
    }

    pub fn expect_json(mut self, expected_json: Value) -> Self {
        self.expected_json = Some(expected_json);
        self
    }

    pub fn expect_status(mut self, status: Status) -> Self {
        self.expected_status = status;
        self
    }

    /// After the main request, send `body` to the same server and expect
    /// `expected_json` back. The server keeps its database between requests.
    pub fn follow_up(mut self, body: Value, expected_json: Value) -> Self {
        self.follow_ups.push((body, expected_json));
        self
    }

    /// Run the request and check the response
    pub fn test(self) {
        let mut config = Config::default();
        config.auth.key = if self.auth_required {
            Some(TEST_KEY.to_owned())
        } else {
            None
        };

        let client = setup::test(Env::Test(config), &self.gravity_sql, self.services);
        let mut request = client.req(self.method, self.endpoint.clone());

        if self.should_auth {
            request.add_header(Header::new("X-Pi-hole-Authenticate", TEST_KEY));
        }

        for header in self.headers {
            request.add_header(header);
        }

        if let Some(body) = self.body_data {
            request.add_header(ContentType::JSON);
            request.set_body(body.to_string());
        }

        let mut response = request.dispatch();

        assert_eq!(self.expected_status, response.status());

        if let Some(expected_json) = self.expected_json {
            let body = response.body_string();
            assert!(body.is_some());

            let parsed: Value = serde_json::from_str(&body.unwrap()).unwrap();
            assert_eq!(expected_json, parsed);
        }

        for (body, expected_json) in self.follow_ups {
            let mut request = client
                .req(self.method, self.endpoint.clone())
                .header(ContentType::JSON)
                .body(body.to_string());

            if self.should_auth {
                request.add_header(Header::new("X-Pi-hole-Authenticate", TEST_KEY));
            }

            let mut response = request.dispatch();
            assert_eq!(Status::Ok, response.status());

            let parsed: Value = serde_json::from_str(&response.body_string().unwrap()).unwrap();
            assert_eq!(expected_json, parsed);
        }
    }
}
