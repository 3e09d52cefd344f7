//! Blog: list, detail, create, edit and delete posts.

use chrono::Utc;
use log::info;
use rocket::form::{Contextual, Form};
use rocket::request::FlashMessage;
use rocket::response::{Flash, Redirect};
use rocket::{get, post, routes, FromForm, Route, State};
use rocket_dyn_templates::Template;
use serde::Serialize;

use super::{max_chars, not_blank, FormState, Reply};
use crate::auth::{require_author, require_login};
use crate::config::Settings;
use crate::db::Conn;
use crate::error::Result;
use crate::models::{BlogPost, NewBlogPost, User};
use crate::operations;
use crate::pagination::{Page, Paginator};

pub const BASE: &str = "/blog";
pub const MAX_TITLE_LEN: usize = 200;

#[derive(FromForm)]
struct PostForm<'r> {
    #[field(validate = not_blank())]
    #[field(validate = max_chars(MAX_TITLE_LEN))]
    title: &'r str,
    #[field(validate = not_blank())]
    body: &'r str,
}

#[derive(Serialize)]
struct PostView {
    #[serde(flatten)]
    post: BlogPost,
    author: String,
}

#[derive(Serialize)]
struct ListContext {
    posts: Vec<PostView>,
    page: Page,
    flash: Option<String>,
    user: Option<User>,
}

#[derive(Serialize)]
struct DetailContext {
    post: PostView,
    flash: Option<String>,
    user: Option<User>,
}

#[derive(Serialize)]
struct FormContext {
    post_id: Option<i32>,
    form: FormState,
    flash: Option<String>,
    user: User,
}

fn post_url(id: i32) -> String {
    format!("{}/{}", BASE, id)
}

fn render_form(post_id: Option<i32>, form: FormState, user: User) -> Template {
    let name = if post_id.is_some() { "blog/edit" } else { "blog/new" };
    Template::render(
        name,
        FormContext {
            post_id,
            form,
            flash: None,
            user,
        },
    )
}

#[get("/?<page>")]
async fn list(
    db: Conn,
    settings: &State<Settings>,
    page: Option<u64>,
    flash: Option<FlashMessage<'_>>,
    user: Option<User>,
) -> Result<Template> {
    let per_page = settings.per_page;
    let (page, posts) = db
        .run(move |c| -> Result<_> {
            let page = Paginator::new(operations::count_blog_posts(c)?, per_page).page(page)?;
            let posts = operations::list_blog_posts(c, page.offset(), page.limit())?;
            Ok((page, posts))
        })
        .await?;

    let posts = posts
        .into_iter()
        .map(|(post, author)| PostView { post, author })
        .collect();
    Ok(Template::render(
        "blog/list",
        ListContext {
            posts,
            page,
            flash: flash.map(|f| f.message().to_owned()),
            user,
        },
    ))
}

#[get("/<id>")]
async fn detail(
    db: Conn,
    id: i32,
    flash: Option<FlashMessage<'_>>,
    user: Option<User>,
) -> Result<Template> {
    let (post, author) = db.run(move |c| operations::get_blog_post(c, id)).await?;
    Ok(Template::render(
        "blog/detail",
        DetailContext {
            post: PostView { post, author },
            flash: flash.map(|f| f.message().to_owned()),
            user,
        },
    ))
}

#[get("/new")]
fn new(user: Option<User>) -> Result<Template> {
    let user = require_login(user)?;
    Ok(render_form(None, FormState::default(), user))
}

#[post("/new", data = "<form>")]
async fn create<'r>(
    db: Conn,
    user: Option<User>,
    form: Form<Contextual<'r, PostForm<'r>>>,
) -> Result<Reply> {
    let user = require_login(user)?;
    let new_post = match form.value {
        Some(ref post) => NewBlogPost {
            title: post.title.trim().to_owned(),
            body: post.body.to_owned(),
            author_id: user.id,
            created_at: Utc::now().naive_utc(),
        },
        None => {
            let state = FormState::rejected(&form.context);
            return Ok(Reply::Invalid(render_form(None, state, user)));
        }
    };

    let id = db
        .run(move |c| operations::insert_blog_post(c, &new_post))
        .await?;
    info!("{} created blog post {}", user.username, id);

    Ok(Reply::Redirect(Flash::success(
        Redirect::to(post_url(id)),
        "Post created.",
    )))
}

#[get("/<id>/edit")]
async fn edit(db: Conn, id: i32, user: Option<User>) -> Result<Template> {
    let user = require_login(user)?;
    let (post, _) = db.run(move |c| operations::get_blog_post(c, id)).await?;
    require_author(&user, post.author_id)?;

    Ok(render_form(
        Some(id),
        FormState::filled(&post.title, &post.body),
        user,
    ))
}

#[post("/<id>/edit", data = "<form>")]
async fn update<'r>(
    db: Conn,
    id: i32,
    user: Option<User>,
    form: Form<Contextual<'r, PostForm<'r>>>,
) -> Result<Reply> {
    let user = require_login(user)?;
    let (post, _) = db.run(move |c| operations::get_blog_post(c, id)).await?;
    require_author(&user, post.author_id)?;

    let (title, body) = match form.value {
        Some(ref post) => (post.title.trim().to_owned(), post.body.to_owned()),
        None => {
            let state = FormState::rejected(&form.context);
            return Ok(Reply::Invalid(render_form(Some(id), state, user)));
        }
    };

    db.run(move |c| operations::update_blog_post(c, id, &title, &body))
        .await?;
    info!("{} updated blog post {}", user.username, id);

    Ok(Reply::Redirect(Flash::success(
        Redirect::to(post_url(id)),
        "Post updated.",
    )))
}

#[get("/<id>/delete")]
async fn confirm_delete(db: Conn, id: i32, user: Option<User>) -> Result<Template> {
    let user = require_login(user)?;
    let (post, author) = db.run(move |c| operations::get_blog_post(c, id)).await?;
    require_author(&user, post.author_id)?;

    Ok(Template::render(
        "blog/delete",
        DetailContext {
            post: PostView { post, author },
            flash: None,
            user: Some(user),
        },
    ))
}

#[post("/<id>/delete")]
async fn delete(db: Conn, id: i32, user: Option<User>) -> Result<Flash<Redirect>> {
    let user = require_login(user)?;
    let (post, _) = db.run(move |c| operations::get_blog_post(c, id)).await?;
    require_author(&user, post.author_id)?;

    db.run(move |c| operations::delete_blog_post(c, id)).await?;
    info!("{} deleted blog post {}", user.username, id);

    Ok(Flash::success(Redirect::to(BASE), "Post deleted."))
}

pub fn routes() -> Vec<Route> {
    routes![list, detail, new, create, edit, update, confirm_delete, delete]
}
