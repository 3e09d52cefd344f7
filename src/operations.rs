use diesel::prelude::*;
use diesel::result::QueryResult;
use diesel::SqliteConnection;

use crate::db::schema::{articles, blog_posts, board_posts, users};
use crate::models::{Article, BlogPost, NewArticle, NewBlogPost, NewPost, NewUser, Post, User};

pub fn insert_user(db: &mut SqliteConnection, new_user: &NewUser) -> QueryResult<User> {
    diesel::insert_into(users::table)
        .values(new_user)
        .returning(User::as_returning())
        .get_result(db)
}

pub fn find_user(db: &mut SqliteConnection, user_id: i32) -> QueryResult<Option<User>> {
    users::table
        .find(user_id)
        .select(User::as_select())
        .first(db)
        .optional()
}

pub fn find_user_by_name(db: &mut SqliteConnection, name: &str) -> QueryResult<Option<User>> {
    users::table
        .filter(users::username.eq(name))
        .select(User::as_select())
        .first(db)
        .optional()
}

pub fn count_posts(db: &mut SqliteConnection) -> QueryResult<i64> {
    board_posts::table.count().get_result(db)
}

pub fn list_posts(db: &mut SqliteConnection, offset: i64, limit: i64) -> QueryResult<Vec<Post>> {
    board_posts::table
        .order(board_posts::id.asc())
        .limit(limit)
        .offset(offset)
        .select(Post::as_select())
        .load(db)
}

pub fn insert_post(db: &mut SqliteConnection, new_post: &NewPost) -> QueryResult<Post> {
    diesel::insert_into(board_posts::table)
        .values(new_post)
        .returning(Post::as_returning())
        .get_result(db)
}

pub fn count_blog_posts(db: &mut SqliteConnection) -> QueryResult<i64> {
    blog_posts::table.count().get_result(db)
}

/// Newest first, each paired with its author's username.
pub fn list_blog_posts(
    db: &mut SqliteConnection,
    offset: i64,
    limit: i64,
) -> QueryResult<Vec<(BlogPost, String)>> {
    blog_posts::table
        .inner_join(users::table)
        .order((blog_posts::created_at.desc(), blog_posts::id.desc()))
        .limit(limit)
        .offset(offset)
        .select((BlogPost::as_select(), users::username))
        .load(db)
}

pub fn get_blog_post(db: &mut SqliteConnection, post_id: i32) -> QueryResult<(BlogPost, String)> {
    blog_posts::table
        .inner_join(users::table)
        .filter(blog_posts::id.eq(post_id))
        .select((BlogPost::as_select(), users::username))
        .first(db)
}

pub fn insert_blog_post(db: &mut SqliteConnection, new_post: &NewBlogPost) -> QueryResult<i32> {
    diesel::insert_into(blog_posts::table)
        .values(new_post)
        .returning(blog_posts::id)
        .get_result(db)
}

pub fn update_blog_post(
    db: &mut SqliteConnection,
    post_id: i32,
    title: &str,
    body: &str,
) -> QueryResult<usize> {
    diesel::update(blog_posts::table.find(post_id))
        .set((blog_posts::title.eq(title), blog_posts::body.eq(body)))
        .execute(db)
}

pub fn delete_blog_post(db: &mut SqliteConnection, post_id: i32) -> QueryResult<usize> {
    diesel::delete(blog_posts::table.find(post_id)).execute(db)
}

pub fn count_articles(db: &mut SqliteConnection) -> QueryResult<i64> {
    articles::table.count().get_result(db)
}

/// Newest first, each paired with its author's username.
pub fn list_articles(
    db: &mut SqliteConnection,
    offset: i64,
    limit: i64,
) -> QueryResult<Vec<(Article, String)>> {
    articles::table
        .inner_join(users::table)
        .order((articles::date.desc(), articles::id.desc()))
        .limit(limit)
        .offset(offset)
        .select((Article::as_select(), users::username))
        .load(db)
}

pub fn get_article(db: &mut SqliteConnection, article_id: i32) -> QueryResult<(Article, String)> {
    articles::table
        .inner_join(users::table)
        .filter(articles::id.eq(article_id))
        .select((Article::as_select(), users::username))
        .first(db)
}

pub fn insert_article(db: &mut SqliteConnection, new_article: &NewArticle) -> QueryResult<i32> {
    diesel::insert_into(articles::table)
        .values(new_article)
        .returning(articles::id)
        .get_result(db)
}

pub fn update_article(
    db: &mut SqliteConnection,
    article_id: i32,
    title: &str,
    body: &str,
) -> QueryResult<usize> {
    diesel::update(articles::table.find(article_id))
        .set((articles::title.eq(title), articles::body.eq(body)))
        .execute(db)
}

pub fn delete_article(db: &mut SqliteConnection, article_id: i32) -> QueryResult<usize> {
    diesel::delete(articles::table.find(article_id)).execute(db)
}
