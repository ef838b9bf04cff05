// Pi-hole: A black hole for Internet advertisements
// (c) 2019 Pi-hole, LLC (https://pi-hole.net)
// Network-wide ad blocking via your own hardware.
//
// API
// General API Utilities
//
// This file is copyright under the latest version of the EUPL.
// Please see LICENSE file for your rights under this license.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use failure::{Backtrace, Context, Fail};
use rocket::{
    http::Status,
    request,
    response::{self, Responder, Response},
    Outcome, Request
};
use rocket_contrib::json::Json;
use serde::Serialize;
use serde_json::{json, Value};
use std::{
    env,
    fmt::{self, Display}
};

/// Type alias for the most common return type of the API methods
pub type Reply = Result<SetStatus<Json<Value>>, Error>;

/// The most general reply builder. It takes in data/errors and status to
/// construct the JSON reply.
pub fn reply<D: Serialize>(data: ReplyType<D>, status: Status) -> Reply {
    let json_data = match data {
        ReplyType::Data(d) => {
            serde_json::to_value(d).map_err(|e| Error::from(e.context(ErrorKind::Unknown)))?
        }
        ReplyType::Error(e) => {
            // Only print out the error if it's not a common error
            match e.kind() {
                ErrorKind::Unauthorized | ErrorKind::NotFound => (),
                _ => e.print_stacktrace()
            }

            let mut error = serde_json::Map::new();
            error.insert("key".to_owned(), Value::from(e.key()));
            error.insert("message".to_owned(), Value::from(e.to_string()));

            let mut body = serde_json::Map::new();
            body.insert("error".to_owned(), Value::Object(error));

            Value::Object(body)
        }
    };

    Ok(SetStatus(Json(json_data), status))
}

/// Create a reply from some serializable data. The reply will have a status
/// code of 200.
pub fn reply_data<D: Serialize>(data: D) -> Reply {
    reply(ReplyType::Data(data), Status::Ok)
}

/// Create a reply with a successful status
pub fn reply_success() -> Reply {
    reply_data(json!({
        "status": "success"
    }))
}

/// Create a reply with an error. The status will taken from `error.status()`.
pub fn reply_error<E: Into<Error>>(error: E) -> Reply {
    let error = error.into();
    let status = error.status();
    reply::<()>(ReplyType::Error(error), status)
}

/// The type of reply which should be sent.
pub enum ReplyType<D: Serialize> {
    Data(D),
    Error(Error)
}

/// Wraps `ErrorKind` to provide context via `Context`.
///
/// See https://boats.gitlab.io/failure/error-errorkind.html
#[derive(Debug)]
pub struct Error {
    inner: Context<ErrorKind>
}

/// The `ErrorKind` enum represents all the possible errors that the API can
/// return.
#[derive(Clone, Eq, PartialEq, Debug, Fail)]
pub enum ErrorKind {
    #[fail(display = "Unknown error")]
    Unknown,
    #[fail(display = "Error accessing the Gravity database")]
    GravityDatabase,
    #[fail(display = "Error reading from the FTL database")]
    FtlDatabase,
    #[fail(display = "Not found")]
    NotFound,
    #[fail(display = "Item already exists")]
    AlreadyExists,
    #[fail(display = "Referenced item does not exist")]
    InvalidReference,
    #[fail(display = "Missing required field: {}", _0)]
    MissingField(String),
    #[fail(display = "Invalid domain")]
    InvalidDomain,
    #[fail(display = "Invalid domain type")]
    InvalidDomainType,
    #[fail(display = "Bad request")]
    BadRequest,
    #[fail(display = "Requested action not supported: {}", _0)]
    UnsupportedAction(String),
    #[fail(display = "Unauthorized")]
    Unauthorized,
    #[fail(display = "Error reading from {}", _0)]
    FileRead(String),
    #[fail(display = "Error parsing the config")]
    ConfigParsingError,
    #[fail(display = "Failed to reload the DNS server lists")]
    ReloadError
}

impl Error {
    pub fn print_stacktrace(&self) {
        eprintln!("Error: {}", self);

        // Only print the backtrace if requested, to avoid a gap between error and
        // causes
        let backtrace_enabled = env::var("RUST_BACKTRACE").is_ok();
        if backtrace_enabled {
            if let Some(backtrace) = self.backtrace() {
                eprintln!("{}", backtrace);
            }
        }

        // Print out each cause
        for (i, cause) in (self as &dyn Fail).iter_causes().enumerate() {
            eprintln!("Cause #{}: {}", i + 1, cause);

            if backtrace_enabled {
                if let Some(backtrace) = cause.backtrace() {
                    eprintln!("{}", backtrace);
                }
            }
        }
    }

    /// Get the wrapped [`ErrorKind`]
    ///
    /// [`ErrorKind`]: enum.ErrorKind.html
    pub fn kind(&self) -> ErrorKind {
        self.inner.get_context().clone()
    }

    /// See [`ErrorKind::key`]
    ///
    /// [`ErrorKind::key`]: enum.ErrorKind.html#method.key
    pub fn key(&self) -> &'static str {
        self.kind().key()
    }

    /// See [`ErrorKind::status`]
    ///
    /// [`ErrorKind::status`]: enum.ErrorKind.html#method.status
    pub fn status(&self) -> Status {
        self.kind().status()
    }

    /// A human readable message made of the error and its first cause, if
    /// there is one. Used when the failure is reported inside a successful
    /// HTTP response.
    pub fn message(&self) -> String {
        match (self as &dyn Fail).iter_causes().next() {
            Some(cause) => format!("{}: {}", self, cause),
            None => self.to_string()
        }
    }

    pub fn into_outcome<S>(self) -> request::Outcome<S, Self> {
        Outcome::Failure((self.status(), self))
    }
}

impl ErrorKind {
    /// Get the error key. This should be used by clients to determine the
    /// error type instead of using the message because it will not change.
    pub fn key(&self) -> &'static str {
        match self {
            ErrorKind::Unknown => "unknown",
            ErrorKind::GravityDatabase => "gravity_database",
            ErrorKind::FtlDatabase => "ftl_database",
            ErrorKind::NotFound => "not_found",
            ErrorKind::AlreadyExists => "already_exists",
            ErrorKind::InvalidReference => "invalid_reference",
            ErrorKind::MissingField(_) => "missing_field",
            ErrorKind::InvalidDomain => "invalid_domain",
            ErrorKind::InvalidDomainType => "invalid_domain_type",
            ErrorKind::BadRequest => "bad_request",
            ErrorKind::UnsupportedAction(_) => "unsupported_action",
            ErrorKind::Unauthorized => "unauthorized",
            ErrorKind::FileRead(_) => "file_read",
            ErrorKind::ConfigParsingError => "config_parsing_error",
            ErrorKind::ReloadError => "reload_error"
        }
    }

    /// Get the error HTTP status. This will be used when calling `reply_error`
    pub fn status(&self) -> Status {
        match self {
            ErrorKind::Unknown => Status::InternalServerError,
            ErrorKind::GravityDatabase => Status::InternalServerError,
            ErrorKind::FtlDatabase => Status::InternalServerError,
            ErrorKind::NotFound => Status::NotFound,
            ErrorKind::AlreadyExists => Status::Conflict,
            ErrorKind::InvalidReference => Status::BadRequest,
            ErrorKind::MissingField(_) => Status::BadRequest,
            ErrorKind::InvalidDomain => Status::BadRequest,
            ErrorKind::InvalidDomainType => Status::BadRequest,
            ErrorKind::BadRequest => Status::BadRequest,
            ErrorKind::UnsupportedAction(_) => Status::BadRequest,
            ErrorKind::Unauthorized => Status::Unauthorized,
            ErrorKind::FileRead(_) => Status::InternalServerError,
            ErrorKind::ConfigParsingError => Status::InternalServerError,
            ErrorKind::ReloadError => Status::InternalServerError
        }
    }
}

impl Fail for Error {
    fn cause(&self) -> Option<&dyn Fail> {
        self.inner.cause()
    }

    fn backtrace(&self) -> Option<&Backtrace> {
        self.inner.backtrace()
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        Display::fmt(&self.inner, f)
    }
}

// Mocks hand out clones of their configured results. The cause chain is not
// carried over to the clone.
impl Clone for Error {
    fn clone(&self) -> Self {
        Error::from(self.kind())
    }
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Error {
        Error {
            inner: Context::new(kind)
        }
    }
}

impl From<Context<ErrorKind>> for Error {
    fn from(inner: Context<ErrorKind>) -> Error {
        Error { inner }
    }
}

impl From<DieselError> for Error {
    /// Classify a Gravity database error. Constraint violations keep their
    /// own kinds so callers can tell a rejected write from a broken database.
    fn from(e: DieselError) -> Self {
        let kind = match &e {
            DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                ErrorKind::AlreadyExists
            }
            DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, _) => {
                ErrorKind::InvalidReference
            }
            _ => ErrorKind::GravityDatabase
        };

        Error::from(e.context(kind))
    }
}

impl<'r> Responder<'r> for Error {
    fn respond_to(self, request: &Request) -> response::Result<'r> {
        // This allows us to automatically use `reply_error` when we return an Error in
        // the API
        match reply_error(self) {
            Ok(reply) => reply.respond_to(request),
            Err(_) => Err(Status::InternalServerError)
        }
    }
}

/// This wraps another Responder and sets the HTTP status
#[derive(Debug)]
pub struct SetStatus<R>(R, Status);

impl<'r, R: Responder<'r>> Responder<'r> for SetStatus<R> {
    fn respond_to(self, request: &Request) -> response::Result<'r> {
        // Set the status of the response
        Ok(Response::build_from(self.0.respond_to(request)?)
            .status(self.1)
            .finalize())
    }
}
