use std::env;

use rocket::figment::Figment;
use serde::Deserialize;

pub const DATABASE_URL_ENV: &str = "MINISITES_DATABASE_URL";
pub const DEFAULT_DATABASE_URL: &str = "minisites.db";

/// Application settings read from the top level of the Rocket figment.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub per_page: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Settings { per_page: 10 }
    }
}

/// Rocket's own figment (`Rocket.toml`, `ROCKET_*`), with the database path
/// taken from `MINISITES_DATABASE_URL` when it is set.
pub fn figment() -> Figment {
    let figment = rocket::Config::figment()
        .join(("databases.minisites.url", DEFAULT_DATABASE_URL))
        .join(("template_dir", "templates"));

    match env::var(DATABASE_URL_ENV) {
        Ok(url) => figment.merge(("databases.minisites.url", url)),
        Err(_) => figment,
    }
}
