mod auth;
mod config;
mod db;
mod error;
mod models;
mod operations;
mod pagination;
mod routes;

#[cfg(test)]
mod tests;

use rocket::fairing::AdHoc;
use rocket::figment::Figment;
use rocket::{launch, routes, Build, Rocket};
use rocket_dyn_templates::Template;

use routes::{accounts, blog, board, news, pages};

pub fn build(figment: Figment) -> Rocket<Build> {
    rocket::custom(figment)
        .attach(db::stage())
        .attach(AdHoc::config::<config::Settings>())
        .attach(Template::fairing())
        .mount("/", pages::routes())
        .mount(board::BASE, board::routes())
        .mount(blog::BASE, blog::routes())
        .mount(accounts::BASE, accounts::routes())
        .mount(news::BASE, news::routes())
        .mount("/static", routes![routes::files])
        .register("/", routes::catchers())
}

#[launch]
fn rocket() -> _ {
    dotenvy::dotenv().ok();
    build(config::figment())
}
