use rocket::figment::Figment;
use rocket::http::{ContentType, Status};
use rocket::local::blocking::{Client, LocalResponse};
use tempfile::TempDir;

mod blog;
mod news;

/// A site backed by its own SQLite file, removed on drop.
pub struct TestSite {
    pub client: Client,
    _dir: TempDir,
}

pub fn site() -> TestSite {
    let dir = tempfile::tempdir().expect("temporary directory");
    let database = dir.path().join("minisites.db");

    let figment = Figment::from(rocket::Config::debug_default())
        .merge(("databases.minisites.url", database.display().to_string()))
        .merge(("databases.minisites.pool_size", 2))
        .merge((
            "template_dir",
            concat!(env!("CARGO_MANIFEST_DIR"), "/templates"),
        ))
        .merge(("per_page", 2))
        .merge(("log_level", "off"));

    let client = Client::tracked(crate::build(figment)).expect("valid rocket instance");
    TestSite { client, _dir: dir }
}

impl TestSite {
    pub fn post_form(&self, uri: &str, body: &str) -> LocalResponse<'_> {
        self.client
            .post(uri.to_owned())
            .header(ContentType::Form)
            .body(body.to_owned())
            .dispatch()
    }

    pub fn get_body(&self, uri: &str) -> String {
        let response = self.client.get(uri.to_owned()).dispatch();
        assert_eq!(response.status(), Status::Ok, "GET {}", uri);
        response.into_string().expect("response body")
    }

    pub fn signup(&self, username: &str) {
        let body = format!(
            "username={}&password1=s3cret-pass&password2=s3cret-pass",
            username
        );
        let response = self.post_form("/accounts/signup", &body);
        assert_eq!(response.status(), Status::SeeOther);
    }

    pub fn login(&self, username: &str) {
        let body = format!("username={}&password=s3cret-pass", username);
        let response = self.post_form("/accounts/login", &body);
        assert_eq!(response.status(), Status::SeeOther);
    }

    pub fn logout(&self) {
        let response = self.client.post("/accounts/logout").dispatch();
        assert_eq!(response.status(), Status::SeeOther);
    }

    pub fn signup_and_login(&self, username: &str) {
        self.signup(username);
        self.login(username);
    }
}

pub fn location(response: &LocalResponse<'_>) -> String {
    response
        .headers()
        .get_one("Location")
        .expect("Location header")
        .to_owned()
}
