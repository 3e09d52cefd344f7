use log::{info, warn};
use rocket::form::{self, Contextual, Form};
use rocket::http::{Cookie, CookieJar};
use rocket::request::FlashMessage;
use rocket::response::{Flash, Redirect};
use rocket::{get, post, routes, FromForm, Route};
use rocket_dyn_templates::Template;
use serde::Serialize;

use super::{form_errors, Reply};
use crate::auth::{self, LOGIN_PATH, USER_COOKIE};
use crate::db::Conn;
use crate::error::Result;
use crate::routes::blog;

pub const BASE: &str = "/accounts";
pub const MIN_PASSWORD_LEN: usize = 8;

fn valid_username<'v>(value: &str) -> form::Result<'v, ()> {
    auth::validate_username(value).map_err(|msg| form::Error::validation(msg).into())
}

/// Counted in characters, like the username limit.
fn long_enough<'v>(value: &str) -> form::Result<'v, ()> {
    if value.chars().count() < MIN_PASSWORD_LEN {
        Err(form::Error::validation(format!(
            "This password is too short. It must contain at least {} characters.",
            MIN_PASSWORD_LEN
        )))?;
    }
    Ok(())
}

#[derive(FromForm)]
struct Signup<'r> {
    #[field(validate = valid_username())]
    username: &'r str,
    #[field(validate = long_enough())]
    #[field(validate = eq(self.password2))]
    password1: &'r str,
    password2: &'r str,
}

#[derive(FromForm)]
struct Login<'r> {
    username: &'r str,
    password: &'r str,
}

#[derive(Serialize)]
struct AccountContext<'a> {
    username: &'a str,
    errors: Vec<String>,
    flash: Option<String>,
    user: Option<()>,
}

fn render(name: &'static str, username: &str, errors: Vec<String>) -> Template {
    render_with_flash(name, username, errors, None)
}

fn render_with_flash(
    name: &'static str,
    username: &str,
    errors: Vec<String>,
    flash: Option<String>,
) -> Template {
    Template::render(
        name,
        AccountContext {
            username,
            errors,
            flash,
            user: None,
        },
    )
}

#[get("/signup")]
fn signup_page() -> Template {
    render("accounts/signup", "", vec![])
}

#[post("/signup", data = "<form>")]
async fn signup<'r>(db: Conn, mut form: Form<Contextual<'r, Signup<'r>>>) -> Result<Reply> {
    let signup = match form.value.take() {
        Some(signup) => signup,
        None => {
            let username = form.context.field_value("username").unwrap_or_default();
            let errors = form_errors(&form.context);
            return Ok(Reply::Invalid(render("accounts/signup", username, errors)));
        }
    };

    let name = signup.username.to_owned();
    let password = signup.password1.to_owned();
    let created = db
        .run(move |c| auth::register(c, &name, &password))
        .await?;

    match created {
        Some(user) => {
            info!("new account {} ({})", user.username, user.id);
            Ok(Reply::Redirect(Flash::success(
                Redirect::to(LOGIN_PATH),
                "Account created. Please log in.",
            )))
        }
        None => {
            form.context.push_error(
                form::Error::validation("A user with that username already exists.")
                    .with_name("username"),
            );
            let errors = form_errors(&form.context);
            Ok(Reply::Invalid(render(
                "accounts/signup",
                signup.username,
                errors,
            )))
        }
    }
}

#[get("/login")]
fn login_page(flash: Option<FlashMessage<'_>>) -> Template {
    let flash = flash.map(|f| f.message().to_owned());
    render_with_flash("accounts/login", "", vec![], flash)
}

#[post("/login", data = "<form>")]
async fn login(db: Conn, cookies: &CookieJar<'_>, form: Form<Login<'_>>) -> Result<Reply> {
    let name = form.username.to_owned();
    let password = form.password.to_owned();
    let user = db
        .run(move |c| auth::authenticate(c, &name, &password))
        .await?;

    match user {
        Some(user) => {
            cookies.add_private(Cookie::new(USER_COOKIE, user.id.to_string()));
            info!("{} logged in", user.username);
            Ok(Reply::Redirect(Flash::success(
                Redirect::to(blog::BASE),
                format!("Welcome back, {}.", user.username),
            )))
        }
        None => {
            warn!("failed login for {:?}", form.username);
            let errors = vec!["Please enter a correct username and password.".to_owned()];
            Ok(Reply::Unauthorized(render(
                "accounts/login",
                form.username,
                errors,
            )))
        }
    }
}

#[post("/logout")]
fn logout(cookies: &CookieJar<'_>) -> Flash<Redirect> {
    cookies.remove_private(USER_COOKIE);
    Flash::success(Redirect::to(blog::BASE), "You have been logged out.")
}

pub fn routes() -> Vec<Route> {
    routes![signup_page, signup, login_page, login, logout]
}
