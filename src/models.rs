use std::fmt;

use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::Serialize;

use crate::db::schema::*;

/// Number of characters a board post shows in listings.
pub const EXCERPT_LEN: usize = 50;

#[derive(Queryable, Selectable, PartialEq, Eq, Clone, Debug, Serialize)]
#[diesel(table_name = users)]
pub struct User {
    pub id: i32,
    pub username: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub date_joined: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = users)]
pub struct NewUser {
    pub username: String,
    pub password_hash: String,
    pub date_joined: NaiveDateTime,
}

#[derive(Queryable, Selectable, PartialEq, Eq, Clone, Debug, Serialize)]
#[diesel(table_name = board_posts)]
pub struct Post {
    pub id: i32,
    pub text: String,
}

impl Post {
    pub fn excerpt(&self) -> &str {
        match self.text.char_indices().nth(EXCERPT_LEN) {
            Some((end, _)) => &self.text[..end],
            None => &self.text,
        }
    }
}

impl fmt::Display for Post {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.excerpt())
    }
}

#[derive(Insertable)]
#[diesel(table_name = board_posts)]
pub struct NewPost {
    pub text: String,
}

#[derive(Queryable, Selectable, PartialEq, Eq, Clone, Debug, Serialize)]
#[diesel(table_name = blog_posts)]
pub struct BlogPost {
    pub id: i32,
    pub title: String,
    pub body: String,
    pub author_id: i32,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = blog_posts)]
pub struct NewBlogPost {
    pub title: String,
    pub body: String,
    pub author_id: i32,
    pub created_at: NaiveDateTime,
}

#[derive(Queryable, Selectable, PartialEq, Eq, Clone, Debug, Serialize)]
#[diesel(table_name = articles)]
pub struct Article {
    pub id: i32,
    pub title: String,
    pub body: String,
    pub date: NaiveDateTime,
    pub author_id: i32,
}

#[derive(Insertable)]
#[diesel(table_name = articles)]
pub struct NewArticle {
    pub title: String,
    pub body: String,
    pub date: NaiveDateTime,
    pub author_id: i32,
}
