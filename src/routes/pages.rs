use rocket::{get, routes, Route};

#[get("/")]
fn home() -> &'static str {
    "Hello, World!"
}

pub fn routes() -> Vec<Route> {
    routes![home]
}
