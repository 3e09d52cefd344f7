use rocket::http::Status;

use super::{location, site};

#[test]
fn article_list_starts_empty() {
    let site = site();
    assert!(site.get_body("/articles").contains("No articles yet."));
}

#[test]
fn article_lifecycle() {
    let site = site();
    site.signup_and_login("reporter");

    assert!(site.get_body("/articles/new").contains("New article"));
    let response = site.post_form("/articles/new", "title=Big+news&body=Something+happened");
    assert_eq!(response.status(), Status::SeeOther);
    assert_eq!(location(&response), "/articles/1");

    let body = site.get_body("/articles/1");
    assert!(body.contains("Big news"));
    assert!(body.contains("by reporter"));

    let list = site.get_body("/articles");
    assert!(list.contains("Big news"));
    assert!(list.contains("/articles/1/edit"));

    let response = site.post_form("/articles/1/edit", "title=Bigger+news&body=Updated");
    assert_eq!(response.status(), Status::SeeOther);
    assert_eq!(location(&response), "/articles/1");
    let body = site.get_body("/articles/1");
    assert!(body.contains("Bigger news"));
    assert!(body.contains("Article updated."));

    assert!(site.get_body("/articles/1/delete").contains("Are you sure"));
    let response = site.client.post("/articles/1/delete").dispatch();
    assert_eq!(response.status(), Status::SeeOther);
    assert_eq!(location(&response), "/articles");

    assert_eq!(site.client.get("/articles/1").dispatch().status(), Status::NotFound);
    let list = site.get_body("/articles");
    assert!(list.contains("Article deleted."));
    assert!(list.contains("No articles yet."));
}

#[test]
fn edit_ignores_fields_other_than_title_and_body() {
    let site = site();
    site.signup_and_login("reporter");
    site.post_form("/articles/new", "title=Original&body=Text");

    let response = site.post_form(
        "/articles/1/edit",
        "title=Renamed&body=Text&author_id=99&date=2000-01-01",
    );
    assert_eq!(response.status(), Status::SeeOther);
    assert!(site.get_body("/articles/1").contains("by reporter"));
}

#[test]
fn anonymous_visitors_can_read_but_not_write() {
    let site = site();
    site.signup_and_login("reporter");
    site.post_form("/articles/new", "title=Public&body=Read+me");
    site.logout();

    assert!(site.get_body("/articles/1").contains("Public"));
    for uri in ["/articles/new", "/articles/1/edit", "/articles/1/delete"] {
        let response = site.client.get(uri).dispatch();
        assert_eq!(response.status(), Status::SeeOther, "GET {}", uri);
        assert_eq!(location(&response), "/accounts/login");
    }
}

#[test]
fn other_users_are_forbidden() {
    let site = site();
    site.signup_and_login("reporter");
    site.post_form("/articles/new", "title=Scoop&body=Exclusive");
    site.logout();

    site.signup_and_login("rival");
    assert_eq!(site.client.get("/articles/1/edit").dispatch().status(), Status::Forbidden);
    assert_eq!(site.client.get("/articles/1/delete").dispatch().status(), Status::Forbidden);
    let response = site.client.post("/articles/1/delete").dispatch();
    assert_eq!(response.status(), Status::Forbidden);
    assert!(site.get_body("/articles/1").contains("Scoop"));
}

#[test]
fn articles_are_paginated() {
    let site = site();
    site.signup_and_login("reporter");
    for i in 1..=3 {
        site.post_form("/articles/new", &format!("title=Story+{}&body=text", i));
    }

    let first = site.get_body("/articles");
    assert!(first.contains("Story 3"));
    assert!(first.contains("Story 2"));
    assert!(!first.contains("Story 1"));

    let second = site.get_body("/articles?page=2");
    assert!(second.contains("Story 1"));
    assert_eq!(site.client.get("/articles?page=3").dispatch().status(), Status::NotFound);
}

#[test]
fn title_limit_counts_characters() {
    let site = site();
    site.signup_and_login("reporter");

    let response = site.post_form("/articles/new", &format!("title={}&body=x", "%C3%A9".repeat(255)));
    assert_eq!(response.status(), Status::SeeOther);

    let response = site.post_form("/articles/new", &format!("title={}&body=x", "%C3%A9".repeat(256)));
    assert_eq!(response.status(), Status::UnprocessableEntity);
    assert!(response.into_string().unwrap().contains("at most 255 characters"));
}

#[test]
fn error_pages_know_the_logged_in_user() {
    let site = site();
    site.signup_and_login("reporter");
    site.post_form("/articles/new", "title=Scoop&body=Exclusive");
    site.logout();
    site.signup_and_login("rival");

    let response = site.client.get("/articles/1/edit").dispatch();
    assert_eq!(response.status(), Status::Forbidden);
    assert!(response.into_string().unwrap().contains("Logged in as rival"));

    let response = site.client.get("/articles/99").dispatch();
    assert_eq!(response.status(), Status::NotFound);
    assert!(response.into_string().unwrap().contains("Logged in as rival"));
}
