//! News site: articles with list, detail, new, edit and delete pages.

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
use crate::models::{Article, NewArticle, User};
use crate::operations;
use crate::pagination::{Page, Paginator};

pub const BASE: &str = "/articles";
pub const MAX_TITLE_LEN: usize = 255;

/// Only `title` and `body` are editable; date and author are fixed at creation.
#[derive(FromForm)]
struct ArticleForm<'r> {
    #[field(validate = not_blank())]
    #[field(validate = max_chars(MAX_TITLE_LEN))]
    title: &'r str,
    #[field(validate = not_blank())]
    body: &'r str,
}

#[derive(Serialize)]
struct ArticleView {
    #[serde(flatten)]
    article: Article,
    author: String,
}

#[derive(Serialize)]
struct ListContext {
    articles: Vec<ArticleView>,
    page: Page,
    flash: Option<String>,
    user: Option<User>,
}

#[derive(Serialize)]
struct DetailContext {
    article: ArticleView,
    flash: Option<String>,
    user: Option<User>,
}

#[derive(Serialize)]
struct FormContext {
    article_id: Option<i32>,
    form: FormState,
    flash: Option<String>,
    user: User,
}

fn article_url(id: i32) -> String {
    format!("{}/{}", BASE, id)
}

fn render_form(article_id: Option<i32>, form: FormState, user: User) -> Template {
    let name = match article_id {
        Some(_) => "news/article_edit",
        None => "news/article_new",
    };
    Template::render(
        name,
        FormContext {
            article_id,
            form,
            flash: None,
            user,
        },
    )
}

async fn load_own_article(db: &Conn, id: i32, user: &User) -> Result<(Article, String)> {
    let (article, author) = db.run(move |c| operations::get_article(c, id)).await?;
    require_author(user, article.author_id)?;
    Ok((article, author))
}

#[get("/?<page>")]
async fn article_list(
    db: Conn,
    settings: &State<Settings>,
    page: Option<u64>,
    flash: Option<FlashMessage<'_>>,
    user: Option<User>,
) -> Result<Template> {
    let per_page = settings.per_page;
    let (page, articles) = db
        .run(move |c| -> Result<_> {
            let page = Paginator::new(operations::count_articles(c)?, per_page).page(page)?;
            let articles = operations::list_articles(c, page.offset(), page.limit())?;
            Ok((page, articles))
        })
        .await?;

    let articles = articles
        .into_iter()
        .map(|(article, author)| ArticleView { article, author })
        .collect();
    Ok(Template::render(
        "news/article_list",
        ListContext {
            articles,
            page,
            flash: flash.map(|f| f.message().to_owned()),
            user,
        },
    ))
}

#[get("/<id>")]
async fn article_detail(
    db: Conn,
    id: i32,
    flash: Option<FlashMessage<'_>>,
    user: Option<User>,
) -> Result<Template> {
    let (article, author) = db.run(move |c| operations::get_article(c, id)).await?;
    Ok(Template::render(
        "news/article_detail",
        DetailContext {
            article: ArticleView { article, author },
            flash: flash.map(|f| f.message().to_owned()),
            user,
        },
    ))
}

#[get("/new")]
fn article_new(user: Option<User>) -> Result<Template> {
    let user = require_login(user)?;
    Ok(render_form(None, FormState::default(), user))
}

#[post("/new", data = "<form>")]
async fn article_create<'r>(
    db: Conn,
    user: Option<User>,
    form: Form<Contextual<'r, ArticleForm<'r>>>,
) -> Result<Reply> {
    let user = require_login(user)?;
    let new_article = match form.value {
        Some(ref article) => NewArticle {
            title: article.title.trim().to_owned(),
            body: article.body.to_owned(),
            date: Utc::now().naive_utc(),
            author_id: user.id,
        },
        None => {
            let state = FormState::rejected(&form.context);
            return Ok(Reply::Invalid(render_form(None, state, user)));
        }
    };

    let id = db
        .run(move |c| operations::insert_article(c, &new_article))
        .await?;
    info!("{} published article {}", user.username, id);

    Ok(Reply::Redirect(Flash::success(
        Redirect::to(article_url(id)),
        "Article published.",
    )))
}

#[get("/<id>/edit")]
async fn article_edit(db: Conn, id: i32, user: Option<User>) -> Result<Template> {
    let user = require_login(user)?;
    let (article, _) = load_own_article(&db, id, &user).await?;

    Ok(render_form(
        Some(id),
        FormState::filled(&article.title, &article.body),
        user,
    ))
}

#[post("/<id>/edit", data = "<form>")]
async fn article_update<'r>(
    db: Conn,
    id: i32,
    user: Option<User>,
    form: Form<Contextual<'r, ArticleForm<'r>>>,
) -> Result<Reply> {
    let user = require_login(user)?;
    load_own_article(&db, id, &user).await?;

    let (title, body) = match form.value {
        Some(ref article) => (article.title.trim().to_owned(), article.body.to_owned()),
        None => {
            let state = FormState::rejected(&form.context);
            return Ok(Reply::Invalid(render_form(Some(id), state, user)));
        }
    };

    db.run(move |c| operations::update_article(c, id, &title, &body))
        .await?;
    info!("{} edited article {}", user.username, id);

    Ok(Reply::Redirect(Flash::success(
        Redirect::to(article_url(id)),
        "Article updated.",
    )))
}

#[get("/<id>/delete")]
async fn article_delete(db: Conn, id: i32, user: Option<User>) -> Result<Template> {
    let user = require_login(user)?;
    let (article, author) = load_own_article(&db, id, &user).await?;

    Ok(Template::render(
        "news/article_delete",
        DetailContext {
            article: ArticleView { article, author },
            flash: None,
            user: Some(user),
        },
    ))
}

#[post("/<id>/delete")]
async fn article_destroy(db: Conn, id: i32, user: Option<User>) -> Result<Flash<Redirect>> {
    let user = require_login(user)?;
    load_own_article(&db, id, &user).await?;

    db.run(move |c| operations::delete_article(c, id)).await?;
    info!("{} deleted article {}", user.username, id);

    Ok(Flash::success(Redirect::to(BASE), "Article deleted."))
}

pub fn routes() -> Vec<Route> {
    routes![
        article_list,
        article_detail,
        article_new,
        article_create,
        article_edit,
        article_update,
        article_delete,
        article_destroy
    ]
}
