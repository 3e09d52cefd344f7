//! Message board: a paginated list of short text posts.

use log::info;
use rocket::form::{Contextual, Form};
use rocket::request::FlashMessage;
use rocket::response::{Flash, Redirect};
use rocket::{get, post, routes, FromForm, Route, State};
use rocket_dyn_templates::Template;
use serde::Serialize;

use super::{form_errors, not_blank, Reply};
use crate::config::Settings;
use crate::db::Conn;
use crate::error::Result;
use crate::models::{NewPost, User};
use crate::operations;
use crate::pagination::{Page, Paginator};

pub const BASE: &str = "/mb";

#[derive(FromForm)]
struct PostForm<'r> {
    #[field(validate = not_blank())]
    text: &'r str,
}

#[derive(Serialize)]
struct PostSummary {
    id: i32,
    excerpt: String,
}

#[derive(Serialize)]
struct HomeContext {
    posts: Vec<PostSummary>,
    page: Page,
    flash: Option<String>,
    user: Option<User>,
}

#[get("/?<page>")]
async fn home(
    db: Conn,
    settings: &State<Settings>,
    page: Option<u64>,
    flash: Option<FlashMessage<'_>>,
    user: Option<User>,
) -> Result<Template> {
    let per_page = settings.per_page;
    let (page, posts) = db
        .run(move |c| -> Result<_> {
            let page = Paginator::new(operations::count_posts(c)?, per_page).page(page)?;
            let posts = operations::list_posts(c, page.offset(), page.limit())?;
            Ok((page, posts))
        })
        .await?;

    let posts = posts
        .iter()
        .map(|post| PostSummary {
            id: post.id,
            excerpt: post.to_string(),
        })
        .collect();
    Ok(Template::render(
        "board/home",
        HomeContext {
            posts,
            page,
            flash: flash.map(|f| f.message().to_owned()),
            user,
        },
    ))
}

#[post("/", data = "<form>")]
async fn create<'r>(db: Conn, form: Form<Contextual<'r, PostForm<'r>>>) -> Result<Reply> {
    let text = match form.value {
        Some(ref post) => post.text.to_owned(),
        None => {
            let message = form_errors(&form.context).join(" ");
            return Ok(Reply::Redirect(Flash::error(Redirect::to(BASE), message)));
        }
    };

    let post = db
        .run(move |c| operations::insert_post(c, &NewPost { text }))
        .await?;
    info!("board post {} created", post.id);

    Ok(Reply::Redirect(Flash::success(
        Redirect::to(BASE),
        "Message posted.",
    )))
}

pub fn routes() -> Vec<Route> {
    routes![home, create]
}
