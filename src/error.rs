use diesel::result::Error as DieselError;
use log::{error, warn};
use rocket::http::Status;
use rocket::response::{self, Redirect, Responder};
use rocket::Request;

use crate::auth::LOGIN_PATH;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("database error: {0}")]
    Database(#[source] DieselError),
    #[error("database connection unavailable")]
    Unavailable,
    #[error("password hashing failed: {0}")]
    Password(String),
    #[error("record not found")]
    NotFound,
    #[error("permission denied")]
    Forbidden,
    #[error("login required")]
    LoginRequired,
}

impl From<DieselError> for Error {
    fn from(e: DieselError) -> Self {
        match e {
            DieselError::NotFound => Error::NotFound,
            e => Error::Database(e),
        }
    }
}

impl From<argon2::password_hash::Error> for Error {
    fn from(e: argon2::password_hash::Error) -> Self {
        Error::Password(e.to_string())
    }
}

impl<'r> Responder<'r, 'static> for Error {
    fn respond_to(self, req: &'r Request<'_>) -> response::Result<'static> {
        match self {
            Error::NotFound => Err(Status::NotFound),
            Error::Forbidden => {
                warn!("{} {}: {}", req.method(), req.uri(), self);
                Err(Status::Forbidden)
            }
            Error::LoginRequired => Redirect::to(LOGIN_PATH).respond_to(req),
            e => {
                error!("{} {}: {}", req.method(), req.uri(), e);
                Err(Status::InternalServerError)
            }
        }
    }
}
