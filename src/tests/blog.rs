use rocket::http::Status;

use super::{location, site};

#[test]
fn creating_requires_login() {
    let site = site();
    let response = site.client.get("/blog/new").dispatch();
    assert_eq!(response.status(), Status::SeeOther);
    assert_eq!(location(&response), "/accounts/login");

    let response = site.post_form("/blog/new", "title=Hi&body=There");
    assert_eq!(response.status(), Status::SeeOther);
    assert_eq!(location(&response), "/accounts/login");
    assert!(site.get_body("/blog").contains("Nothing posted yet."));
}

#[test]
fn post_lifecycle() {
    let site = site();
    site.signup_and_login("alice");

    let response = site.post_form("/blog/new", "title=First+post&body=Hello+blog");
    assert_eq!(response.status(), Status::SeeOther);
    let url = location(&response);
    assert_eq!(url, "/blog/1");

    let body = site.get_body(&url);
    assert!(body.contains("First post"));
    assert!(body.contains("by alice"));
    assert!(body.contains("Post created."));

    let body = site.get_body("/blog/1/edit");
    assert!(body.contains("value=\"First post\""));

    let response = site.post_form("/blog/1/edit", "title=Edited+post&body=New+body");
    assert_eq!(response.status(), Status::SeeOther);
    assert_eq!(location(&response), "/blog/1");
    let body = site.get_body("/blog/1");
    assert!(body.contains("Edited post"));
    assert!(body.contains("New body"));

    assert!(site.get_body("/blog/1/delete").contains("Are you sure"));
    let response = site.client.post("/blog/1/delete").dispatch();
    assert_eq!(response.status(), Status::SeeOther);
    assert_eq!(location(&response), "/blog");

    assert_eq!(site.client.get("/blog/1").dispatch().status(), Status::NotFound);
    assert!(site.get_body("/blog").contains("Post deleted."));
}

#[test]
fn list_shows_newest_first() {
    let site = site();
    site.signup_and_login("alice");
    site.post_form("/blog/new", "title=Older&body=one");
    site.post_form("/blog/new", "title=Newer&body=two");

    let body = site.get_body("/blog");
    let newer = body.find("Newer").unwrap();
    let older = body.find("Older").unwrap();
    assert!(newer < older);
}

#[test]
fn invalid_posts_are_rerendered() {
    let site = site();
    site.signup_and_login("alice");

    let response = site.post_form("/blog/new", "title=+&body=Kept+body");
    assert_eq!(response.status(), Status::UnprocessableEntity);
    let body = response.into_string().unwrap();
    assert!(body.contains("cannot be blank"));
    assert!(body.contains("Kept body"));

    let long_title = "t".repeat(201);
    let response = site.post_form("/blog/new", &format!("title={}&body=x", long_title));
    assert_eq!(response.status(), Status::UnprocessableEntity);
}

#[test]
fn only_the_author_may_change_a_post() {
    let site = site();
    site.signup_and_login("alice");
    site.post_form("/blog/new", "title=Mine&body=Hands+off");
    site.logout();

    site.signup_and_login("mallory");
    assert_eq!(site.client.get("/blog/1/edit").dispatch().status(), Status::Forbidden);
    let response = site.post_form("/blog/1/edit", "title=Taken&body=over");
    assert_eq!(response.status(), Status::Forbidden);
    let response = site.client.post("/blog/1/delete").dispatch();
    assert_eq!(response.status(), Status::Forbidden);

    let body = site.get_body("/blog/1");
    assert!(body.contains("Mine"));
    assert!(!body.contains("/blog/1/edit"));
}

#[test]
fn missing_posts_are_not_found() {
    let site = site();
    assert_eq!(site.client.get("/blog/42").dispatch().status(), Status::NotFound);

    site.signup_and_login("alice");
    assert_eq!(site.client.get("/blog/42/edit").dispatch().status(), Status::NotFound);
    assert_eq!(site.client.post("/blog/42/delete").dispatch().status(), Status::NotFound);
}

#[test]
fn title_limit_counts_characters() {
    let site = site();
    site.signup_and_login("alice");

    let response = site.post_form("/blog/new", &format!("title={}&body=x", "%C3%A9".repeat(200)));
    assert_eq!(response.status(), Status::SeeOther);

    let response = site.post_form("/blog/new", &format!("title={}&body=x", "%C3%A9".repeat(201)));
    assert_eq!(response.status(), Status::UnprocessableEntity);
    assert!(response.into_string().unwrap().contains("at most 200 characters"));

    let padded = format!("title=++{}&body=x", "t".repeat(200));
    assert_eq!(site.post_form("/blog/new", &padded).status(), Status::SeeOther);
}
