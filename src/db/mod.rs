use diesel::SqliteConnection;
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use log::{error, info};
use rocket::fairing::{self, AdHoc};
use rocket::{Build, Rocket};
use rocket_sync_db_pools::database;

pub mod schema;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

#[database("minisites")]
pub struct Conn(SqliteConnection);

async fn run_migrations(rocket: Rocket<Build>) -> fairing::Result {
    let conn = match Conn::get_one(&rocket).await {
        Some(conn) => conn,
        None => {
            error!("no database connection available for migrations");
            return Err(rocket);
        }
    };

    let applied = conn
        .run(|c| {
            c.run_pending_migrations(MIGRATIONS)
                .map(|versions| versions.len())
                .map_err(|e| e.to_string())
        })
        .await;

    match applied {
        Ok(0) => Ok(rocket),
        Ok(n) => {
            info!("applied {} pending migration(s)", n);
            Ok(rocket)
        }
        Err(e) => {
            error!("failed to run migrations: {}", e);
            Err(rocket)
        }
    }
}

/// Connection pool plus schema migrations, run once on ignite.
pub fn stage() -> AdHoc {
    AdHoc::on_ignite("SQLite database", |rocket| async {
        rocket
            .attach(Conn::fairing())
            .attach(AdHoc::try_on_ignite("Diesel migrations", run_migrations))
    })
}
