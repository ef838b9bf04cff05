// Pi-hole: A black hole for Internet advertisements
// (c) 2019 Pi-hole, LLC (https://pi-hole.net)
// Network-wide ad blocking via your own hardware.
//
// API
// Server Setup Functions
//
// This file is copyright under the latest version of the EUPL.
// Please see LICENSE file for your rights under this license.

use crate::{
    databases::{gravity::GravityDatabase, load_databases},
    env::{Config, Env},
    routes::{
        auth::{self, AuthData},
        groups
    },
    util::{Error, ErrorKind}
};
use failure::err_msg;
use rocket::config::{ConfigBuilder, Environment};
use rocket_cors::CorsOptions;

#[cfg(test)]
use crate::databases::load_test_databases;
#[cfg(test)]
use rocket::{config::LoggingLevel, local::Client, Rocket};

#[catch(404)]
fn not_found() -> Error {
    Error::from(ErrorKind::NotFound)
}

#[catch(401)]
fn unauthorized() -> Error {
    Error::from(ErrorKind::Unauthorized)
}

/// Run the API with the config at `config_location`
pub fn start(config_location: &str) -> Result<(), Error> {
    let config = Config::parse(config_location)?;
    let env = Env::Production(config);

    let server_config = ConfigBuilder::new(Environment::Production)
        .address(env.config().general.address.as_str())
        .port(env.config().general.port)
        .log_level(env.config().general.log_level)
        .extra("databases", load_databases(&env))
        .finalize()
        .map_err(|e| Error::from(err_msg(e.to_string()).context(ErrorKind::ConfigParsingError)))?;

    // Launching only returns if the server could not start
    let launch_error = setup(rocket::custom(server_config), env)?.launch();

    Err(Error::from(
        err_msg(launch_error.kind().to_string()).context(ErrorKind::Unknown)
    ))
}

/// Setup the API with the testing data and return a Client to test with.
/// `extra_sql` runs after the test Gravity data is loaded and `services` add
/// mocks to the server state.
#[cfg(test)]
pub fn test(env: Env, extra_sql: &str, services: Vec<Box<dyn FnOnce(Rocket) -> Rocket>>) -> Client {
    let server = rocket::custom(
        ConfigBuilder::new(Environment::Development)
            .log_level(LoggingLevel::Debug)
            .extra("databases", load_test_databases(extra_sql))
            .finalize()
            .unwrap()
    );
    let server = services
        .into_iter()
        .fold(server, |server, manage| manage(server));

    Client::new(setup(server, env).unwrap()).unwrap()
}

/// General server setup
fn setup(server: rocket::Rocket, env: Env) -> Result<rocket::Rocket, Error> {
    // Set up CORS
    let cors = CorsOptions {
        allow_credentials: true,
        ..CorsOptions::default()
    }
    .to_cors()
    .map_err(|e| Error::from(err_msg(e.to_string()).context(ErrorKind::Unknown)))?;

    let auth_data = AuthData::new(&env.config().auth);
    let api_mount_path = env.config().general.path.to_string_lossy().into_owned();

    info!("Mounting the API on {}", api_mount_path);

    Ok(server
        // Attach CORS handler
        .attach(cors)
        // Attach the Gravity database pool
        .attach(GravityDatabase::fairing())
        // Add custom error handlers
        .register(catchers![not_found, unauthorized])
        // Manage the environment
        .manage(env)
        // Manage the API key
        .manage(auth_data)
        // Mount the API
        .mount(&api_mount_path, routes![auth::check, auth::logout, groups::groups]))
}
