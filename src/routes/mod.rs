use std::path::{Path, PathBuf};

use rocket::form::{self, Context};
use rocket::fs::NamedFile;
use rocket::http::Status;
use rocket::response::{Flash, Redirect};
use rocket::{catch, catchers, get, Catcher, Request, Responder};
use rocket_dyn_templates::Template;
use serde::Serialize;

use crate::models::User;

pub mod accounts;
pub mod blog;
pub mod board;
pub mod news;
pub mod pages;

#[derive(Responder)]
pub enum Reply {
    Page(Template),
    #[response(status = 422)]
    Invalid(Template),
    #[response(status = 401)]
    Unauthorized(Template),
    Redirect(Flash<Redirect>),
}

/// Field values a form template is re-rendered with, plus the messages to show.
#[derive(Serialize, Default)]
pub struct FormState {
    pub title: String,
    pub body: String,
    pub errors: Vec<String>,
}

impl FormState {
    pub fn filled(title: &str, body: &str) -> Self {
        FormState {
            title: title.to_owned(),
            body: body.to_owned(),
            errors: vec![],
        }
    }

    pub fn rejected(context: &Context<'_>) -> Self {
        FormState {
            title: context.field_value("title").unwrap_or_default().to_owned(),
            body: context.field_value("body").unwrap_or_default().to_owned(),
            errors: form_errors(context),
        }
    }
}

pub fn form_errors(context: &Context<'_>) -> Vec<String> {
    context
        .errors()
        .map(|e| match &e.name {
            Some(name) => format!("{}: {}", name, e.kind),
            None => e.kind.to_string(),
        })
        .collect()
}

pub fn not_blank<'v>(value: &str) -> form::Result<'v, ()> {
    if value.trim().is_empty() {
        Err(form::Error::validation("This field cannot be blank."))?;
    }
    Ok(())
}

/// Characters of the trimmed value, which is what gets stored.
pub fn max_chars<'v>(value: &str, max: usize) -> form::Result<'v, ()> {
    if value.trim().chars().count() > max {
        Err(form::Error::validation(format!(
            "Ensure this value has at most {} characters.",
            max
        )))?;
    }
    Ok(())
}

#[derive(Serialize)]
struct ErrorContext {
    uri: String,
    flash: Option<String>,
    user: Option<User>,
}

async fn error_page(code: u16, req: &Request<'_>) -> Template {
    let user = req.guard::<Option<User>>().await.succeeded().flatten();
    Template::render(
        format!("error/{}", code),
        ErrorContext {
            uri: req.uri().to_string(),
            flash: None,
            user,
        },
    )
}

#[catch(403)]
async fn forbidden(req: &Request<'_>) -> Template {
    error_page(403, req).await
}

#[catch(404)]
async fn not_found(req: &Request<'_>) -> Template {
    error_page(404, req).await
}

#[catch(422)]
async fn unprocessable(req: &Request<'_>) -> Template {
    error_page(422, req).await
}

#[catch(500)]
async fn internal_error(req: &Request<'_>) -> Template {
    error_page(500, req).await
}

#[catch(default)]
fn default_catcher(status: Status, _req: &Request<'_>) -> String {
    format!("{}", status)
}

pub fn catchers() -> Vec<Catcher> {
    catchers![forbidden, not_found, unprocessable, internal_error, default_catcher]
}

#[get("/<file..>")]
pub async fn files(file: PathBuf) -> Option<NamedFile> {
    NamedFile::open(Path::new("static/").join(file)).await.ok()
}
