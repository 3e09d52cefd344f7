//! Accounts: password hashing, registration, login and the `User` guard.

use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use chrono::Utc;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use diesel::SqliteConnection;
use rand::RngCore;
use rocket::http::Status;
use rocket::outcome::Outcome;
use rocket::request::{self, FromRequest};
use rocket::Request;

use crate::db::Conn;
use crate::error::{Error, Result};
use crate::models::{NewUser, User};
use crate::operations;

/// Private cookie holding the logged-in user's id.
pub const USER_COOKIE: &str = "user_id";
pub const LOGIN_PATH: &str = "/accounts/login";
pub const MAX_USERNAME_LEN: usize = 150;

pub fn hash_password(password: &str) -> Result<String> {
    let mut salt = [0u8; 16];
    rand::thread_rng().fill_bytes(&mut salt);
    let salt = SaltString::encode_b64(&salt)?;

    let hash = Argon2::default().hash_password(password.as_bytes(), &salt)?;
    Ok(hash.to_string())
}

/// `Ok(false)` on a wrong password; an error only if `hash` is malformed.
pub fn verify_password(password: &str, hash: &str) -> Result<bool> {
    let parsed = PasswordHash::new(hash)?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}

/// Letters, digits and `@.+-_`, at most 150 characters.
pub fn validate_username(username: &str) -> std::result::Result<(), &'static str> {
    if username.is_empty() {
        return Err("Username cannot be empty.");
    }
    if username.chars().count() > MAX_USERNAME_LEN {
        return Err("Username must be 150 characters or fewer.");
    }
    if !username
        .chars()
        .all(|c| c.is_alphanumeric() || "@.+-_".contains(c))
    {
        return Err("Username may contain only letters, digits and @/./+/-/_ characters.");
    }
    Ok(())
}

/// Creates the account, or returns `None` if the username is taken.
pub fn register(
    db: &mut SqliteConnection,
    username: &str,
    password: &str,
) -> Result<Option<User>> {
    if operations::find_user_by_name(db, username)?.is_some() {
        return Ok(None);
    }

    let new_user = NewUser {
        username: username.to_owned(),
        password_hash: hash_password(password)?,
        date_joined: Utc::now().naive_utc(),
    };
    match operations::insert_user(db, &new_user) {
        Ok(user) => Ok(Some(user)),
        Err(DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _)) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

pub fn authenticate(
    db: &mut SqliteConnection,
    username: &str,
    password: &str,
) -> Result<Option<User>> {
    let user = match operations::find_user_by_name(db, username)? {
        Some(user) => user,
        None => return Ok(None),
    };
    Ok(verify_password(password, &user.password_hash)?.then_some(user))
}

pub fn require_login(user: Option<User>) -> Result<User> {
    user.ok_or(Error::LoginRequired)
}

pub fn require_author(user: &User, author_id: i32) -> Result<()> {
    if user.id == author_id {
        Ok(())
    } else {
        Err(Error::Forbidden)
    }
}

#[rocket::async_trait]
impl<'r> FromRequest<'r> for User {
    type Error = Error;

    async fn from_request(req: &'r Request<'_>) -> request::Outcome<Self, Self::Error> {
        let user_id = match req
            .cookies()
            .get_private(USER_COOKIE)
            .and_then(|cookie| cookie.value().parse::<i32>().ok())
        {
            Some(id) => id,
            None => return Outcome::Forward(Status::Unauthorized),
        };

        let db = match req.guard::<Conn>().await {
            Outcome::Success(db) => db,
            Outcome::Error((status, ())) => return Outcome::Error((status, Error::Unavailable)),
            Outcome::Forward(status) => return Outcome::Forward(status),
        };

        match db.run(move |c| operations::find_user(c, user_id)).await {
            Ok(Some(user)) => Outcome::Success(user),
            Ok(None) => Outcome::Forward(Status::Unauthorized),
            Err(e) => Outcome::Error((Status::InternalServerError, e.into())),
        }
    }
}
