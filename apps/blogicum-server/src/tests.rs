//! End-to-end tests of the HTTP surface against the in-memory store.

use actix_web::cookie::Cookie;
use actix_web::http::{StatusCode, header};
use actix_web::{App, test, web};
use chrono::{SubsecRound, TimeDelta, Utc};
use serde_json::Value;

use blogicum_core::domain::{Category, NewCategory, NewPost, NewUser, Post, PostDraft, User};
use blogicum_infra::JwtConfig;
use blogicum_shared::dto::PostForm;

use crate::config::SeedConfig;
use crate::handlers::configure_routes;
use crate::middleware::flash::FLASH_COOKIE;
use crate::state::AppState;

macro_rules! app {
    ($state:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new($state.clone()))
                .configure(configure_routes),
        )
        .await
    };
}

struct Blog {
    state: AppState,
    alice: User,
    bob: User,
    category: Category,
}

async fn seed() -> Blog {
    let state = AppState::in_memory(JwtConfig::default());
    let alice = user(&state, "alice").await;
    let bob = user(&state, "bob").await;
    let category = state
        .categories
        .create(NewCategory::new("Travel", "travel"))
        .await
        .unwrap();

    Blog {
        state,
        alice,
        bob,
        category,
    }
}

async fn user(state: &AppState, username: &str) -> User {
    state
        .users
        .create(NewUser::new(username.to_string(), None, "unused".to_string()))
        .await
        .unwrap()
}

async fn post(
    state: &AppState,
    author: &User,
    category_id: i64,
    is_published: bool,
    offset: TimeDelta,
) -> Post {
    let draft = PostDraft {
        title: format!("Post by {}", author.username),
        text: "Some text".to_string(),
        image: None,
        pub_date: Utc::now() + offset,
        is_published,
        category_id,
        location_id: None,
    };

    state
        .posts
        .create(NewPost::new(draft, author.id))
        .await
        .unwrap()
}

async fn published(blog: &Blog, author: &User) -> Post {
    post(&blog.state, author, blog.category.id, true, -TimeDelta::hours(1)).await
}

fn bearer(state: &AppState, user: &User) -> (header::HeaderName, String) {
    let token = state.tokens.generate_token(user.id, &user.username).unwrap();
    (header::AUTHORIZATION, format!("Bearer {token}"))
}

fn location(resp: &actix_web::dev::ServiceResponse) -> &str {
    resp.headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
}

fn item_ids(body: &Value) -> Vec<i64> {
    body["page"]["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|item| item["id"].as_i64().unwrap())
        .collect()
}

fn post_form(title: &str, category: i64) -> Vec<(&'static str, String)> {
    vec![
        ("title", title.to_string()),
        ("text", "Edited text".to_string()),
        ("pub_date", "2024-05-01T10:30".to_string()),
        ("category", category.to_string()),
        ("is_published", "on".to_string()),
    ]
}

#[actix_web::test]
async fn test_index_shows_only_visible_posts() {
    let blog = seed().await;
    let hidden = blog
        .state
        .categories
        .create(NewCategory::new("Hidden", "hidden").unpublished())
        .await
        .unwrap();

    let visible = published(&blog, &blog.alice).await;
    post(&blog.state, &blog.alice, blog.category.id, false, -TimeDelta::hours(1)).await;
    post(&blog.state, &blog.alice, blog.category.id, true, TimeDelta::days(1)).await;
    post(&blog.state, &blog.alice, hidden.id, true, -TimeDelta::hours(1)).await;

    let app = app!(blog.state);
    let body: Value =
        test::call_and_read_body_json(&app, test::TestRequest::get().uri("/").to_request()).await;

    assert_eq!(item_ids(&body), vec![visible.id]);
    assert_eq!(body["page"]["items"][0]["author"]["username"], "alice");
    assert_eq!(body["page"]["items"][0]["category"]["slug"], "travel");
}

#[actix_web::test]
async fn test_index_paginates_by_ten() {
    let blog = seed().await;
    for i in 0..12 {
        post(&blog.state, &blog.alice, blog.category.id, true, -TimeDelta::minutes(i + 1)).await;
    }
    let app = app!(blog.state);

    let first: Value =
        test::call_and_read_body_json(&app, test::TestRequest::get().uri("/").to_request()).await;
    assert_eq!(first["page"]["items"].as_array().unwrap().len(), 10);
    assert_eq!(first["page"]["total_pages"], 2);
    assert_eq!(first["page"]["has_next"], true);

    let last: Value = test::call_and_read_body_json(
        &app,
        test::TestRequest::get().uri("/?page=last").to_request(),
    )
    .await;
    assert_eq!(last["page"]["number"], 2);
    assert_eq!(last["page"]["items"].as_array().unwrap().len(), 2);

    for uri in ["/?page=3", "/?page=abc", "/?page=0"] {
        let resp = test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND, "{uri}");
    }
}

#[actix_web::test]
async fn test_unpublished_post_detail_is_hidden_from_others() {
    let blog = seed().await;
    let draft = post(&blog.state, &blog.alice, blog.category.id, false, -TimeDelta::hours(1)).await;
    let uri = format!("/posts/{}/", draft.id);
    let app = app!(blog.state);

    let anonymous = test::call_service(&app, test::TestRequest::get().uri(&uri).to_request()).await;
    assert_eq!(anonymous.status(), StatusCode::NOT_FOUND);

    let other = test::call_service(
        &app,
        test::TestRequest::get()
            .uri(&uri)
            .insert_header(bearer(&blog.state, &blog.bob))
            .to_request(),
    )
    .await;
    assert_eq!(other.status(), StatusCode::NOT_FOUND);

    let owner = test::call_service(
        &app,
        test::TestRequest::get()
            .uri(&uri)
            .insert_header(bearer(&blog.state, &blog.alice))
            .to_request(),
    )
    .await;
    assert_eq!(owner.status(), StatusCode::OK);
}

#[actix_web::test]
async fn test_future_post_is_hidden_from_others() {
    let blog = seed().await;
    published(&blog, &blog.alice).await;
    let scheduled = post(&blog.state, &blog.alice, blog.category.id, true, TimeDelta::days(1)).await;
    let uri = format!("/posts/{}/", scheduled.id);
    let app = app!(blog.state);

    let other = test::call_service(
        &app,
        test::TestRequest::get()
            .uri(&uri)
            .insert_header(bearer(&blog.state, &blog.bob))
            .to_request(),
    )
    .await;
    assert_eq!(other.status(), StatusCode::NOT_FOUND);

    let owner = test::call_service(
        &app,
        test::TestRequest::get()
            .uri(&uri)
            .insert_header(bearer(&blog.state, &blog.alice))
            .to_request(),
    )
    .await;
    assert_eq!(owner.status(), StatusCode::OK);

    let profile: Value = test::call_and_read_body_json(
        &app,
        test::TestRequest::get()
            .uri("/profile/alice/")
            .insert_header(bearer(&blog.state, &blog.bob))
            .to_request(),
    )
    .await;
    assert_eq!(profile["page"]["total_items"], 1);
    assert!(!item_ids(&profile).contains(&scheduled.id));

    let own_profile: Value = test::call_and_read_body_json(
        &app,
        test::TestRequest::get()
            .uri("/profile/alice/")
            .insert_header(bearer(&blog.state, &blog.alice))
            .to_request(),
    )
    .await;
    assert!(item_ids(&own_profile).contains(&scheduled.id));
}

#[actix_web::test]
async fn test_detail_includes_comments_and_blank_form() {
    let blog = seed().await;
    let entry = published(&blog, &blog.alice).await;
    let app = app!(blog.state);

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri(&format!("/posts/{}/comment/", entry.id))
            .insert_header(bearer(&blog.state, &blog.bob))
            .set_form([("text", "Nice trip")])
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), format!("/posts/{}/", entry.id));

    let body: Value = test::call_and_read_body_json(
        &app,
        test::TestRequest::get()
            .uri(&format!("/posts/{}/", entry.id))
            .to_request(),
    )
    .await;
    assert_eq!(body["post"]["comment_count"], 1);
    assert_eq!(body["comments"][0]["text"], "Nice trip");
    assert_eq!(body["comments"][0]["author"]["username"], "bob");
    assert_eq!(body["form"]["text"], "");
}

#[actix_web::test]
async fn test_profile_owner_sees_all_posts() {
    let blog = seed().await;
    for _ in 0..3 {
        published(&blog, &blog.alice).await;
    }
    for _ in 0..2 {
        post(&blog.state, &blog.alice, blog.category.id, false, -TimeDelta::hours(1)).await;
    }
    let app = app!(blog.state);

    let owner: Value = test::call_and_read_body_json(
        &app,
        test::TestRequest::get()
            .uri("/profile/alice/")
            .insert_header(bearer(&blog.state, &blog.alice))
            .to_request(),
    )
    .await;
    assert_eq!(owner["page"]["total_items"], 5);
    assert_eq!(owner["profile"]["username"], "alice");

    let other: Value = test::call_and_read_body_json(
        &app,
        test::TestRequest::get()
            .uri("/profile/alice/")
            .insert_header(bearer(&blog.state, &blog.bob))
            .to_request(),
    )
    .await;
    assert_eq!(other["page"]["total_items"], 3);

    let missing =
        test::call_service(&app, test::TestRequest::get().uri("/profile/nobody/").to_request())
            .await;
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_category_page_checks_category_itself() {
    let blog = seed().await;
    let hidden = blog
        .state
        .categories
        .create(NewCategory::new("Hidden", "hidden").unpublished())
        .await
        .unwrap();
    post(&blog.state, &blog.alice, hidden.id, true, -TimeDelta::hours(1)).await;
    let app = app!(blog.state);

    let resp =
        test::call_service(&app, test::TestRequest::get().uri("/category/hidden/").to_request())
            .await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let resp =
        test::call_service(&app, test::TestRequest::get().uri("/category/unknown/").to_request())
            .await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let empty: Value = test::call_and_read_body_json(
        &app,
        test::TestRequest::get().uri("/category/travel/").to_request(),
    )
    .await;
    assert_eq!(empty["category"]["title"], "Travel");
    assert_eq!(empty["page"]["total_items"], 0);
}

#[actix_web::test]
async fn test_non_owner_edit_redirects_with_flash() {
    let blog = seed().await;
    let entry = published(&blog, &blog.alice).await;
    let app = app!(blog.state);

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri(&format!("/posts/{}/edit/", entry.id))
            .insert_header(bearer(&blog.state, &blog.bob))
            .set_form(post_form("Hijacked", blog.category.id))
            .to_request(),
    )
    .await;

    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), format!("/posts/{}/", entry.id));
    let flash = resp
        .response()
        .cookies()
        .find(|c| c.name() == FLASH_COOKIE)
        .unwrap();
    assert_eq!(flash.value(), "not-post-author");

    let stored = blog.state.posts.find_by_id(entry.id).await.unwrap().unwrap();
    assert_eq!(stored, entry);

    let body: Value = test::call_and_read_body_json(
        &app,
        test::TestRequest::get()
            .uri(&format!("/posts/{}/", entry.id))
            .cookie(Cookie::new(FLASH_COOKIE, "not-post-author"))
            .to_request(),
    )
    .await;
    assert_eq!(body["messages"][0], "You can only change your own posts.");
}

#[actix_web::test]
async fn test_owner_edits_post() {
    let blog = seed().await;
    let entry = published(&blog, &blog.alice).await;
    let app = app!(blog.state);

    let form: Value = test::call_and_read_body_json(
        &app,
        test::TestRequest::get()
            .uri(&format!("/posts/{}/edit/", entry.id))
            .insert_header(bearer(&blog.state, &blog.alice))
            .to_request(),
    )
    .await;
    assert_eq!(form["form"]["title"], entry.title);

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri(&format!("/posts/{}/edit/", entry.id))
            .insert_header(bearer(&blog.state, &blog.alice))
            .set_form(post_form("Renamed", blog.category.id))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), format!("/posts/{}/", entry.id));

    let stored = blog.state.posts.find_by_id(entry.id).await.unwrap().unwrap();
    assert_eq!(stored.title, "Renamed");
    assert_eq!(stored.author_id, blog.alice.id);
}

#[actix_web::test]
async fn test_resubmitted_edit_form_keeps_pub_date() {
    let blog = seed().await;
    let entry = published(&blog, &blog.alice).await;
    let app = app!(blog.state);

    let body: Value = test::call_and_read_body_json(
        &app,
        test::TestRequest::get()
            .uri(&format!("/posts/{}/edit/", entry.id))
            .insert_header(bearer(&blog.state, &blog.alice))
            .to_request(),
    )
    .await;
    let form: PostForm = serde_json::from_value(body["form"].clone()).unwrap();

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri(&format!("/posts/{}/edit/", entry.id))
            .insert_header(bearer(&blog.state, &blog.alice))
            .set_form(&form)
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);

    let stored = blog.state.posts.find_by_id(entry.id).await.unwrap().unwrap();
    assert_eq!(stored.pub_date, entry.pub_date.trunc_subsecs(0));
    assert_eq!(stored.title, entry.title);
}

#[actix_web::test]
async fn test_create_post() {
    let blog = seed().await;
    let app = app!(blog.state);

    let blank: Value = test::call_and_read_body_json(
        &app,
        test::TestRequest::get()
            .uri("/posts/new/")
            .insert_header(bearer(&blog.state, &blog.alice))
            .to_request(),
    )
    .await;
    assert!(!blank["form"]["pub_date"].as_str().unwrap().is_empty());

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/posts/new/")
            .insert_header(bearer(&blog.state, &blog.alice))
            .set_form(post_form("Fresh", blog.category.id))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/profile/alice/");

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/posts/new/")
            .insert_header(bearer(&blog.state, &blog.alice))
            .set_form(post_form("", 999))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = test::read_body_json(resp).await;
    assert!(body["errors"]["title"].is_array());
    assert_eq!(body["values"]["category"], "999");

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/posts/new/")
            .insert_header(bearer(&blog.state, &blog.alice))
            .set_form(post_form("Orphan", 999))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["errors"]["category"][0], "Select a valid choice.");
}

#[actix_web::test]
async fn test_seeded_categories_accept_posts() {
    let state = AppState::in_memory(JwtConfig::default());
    let author = user(&state, "dana").await;
    let seed = SeedConfig {
        categories: vec![
            ("travel".to_string(), "Travel".to_string()),
            ("bad slug".to_string(), "Broken".to_string()),
        ],
        locations: vec!["Lisbon".to_string()],
    };

    assert_eq!(state.seed(&seed).await, 2);
    // Existing slugs are left alone.
    assert_eq!(state.seed(&SeedConfig { locations: vec![], ..seed }).await, 0);

    let category = state.categories.find_by_slug("travel").await.unwrap().unwrap();
    assert_eq!(category.name, "Travel");
    assert!(state.categories.find_by_slug("bad slug").await.unwrap().is_none());

    let app = app!(state);
    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/posts/new/")
            .insert_header(bearer(&state, &author))
            .set_form(post_form("Lisbon trams", category.id))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/profile/dana/");
}

#[actix_web::test]
async fn test_login_required_redirects_to_login() {
    let blog = seed().await;
    let entry = published(&blog, &blog.alice).await;
    let app = app!(blog.state);

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri(&format!("/posts/{}/comment/", entry.id))
            .set_form([("text", "Anonymous")])
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        location(&resp),
        format!("/auth/login/?next=/posts/{}/comment/", entry.id)
    );
    assert!(
        blog.state
            .comments
            .list_for_post(entry.id)
            .await
            .unwrap()
            .is_empty()
    );

    let resp = test::call_service(&app, test::TestRequest::get().uri("/posts/new/").to_request())
        .await;
    assert_eq!(location(&resp), "/auth/login/?next=/posts/new/");

    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/posts/new/")
            .insert_header((header::AUTHORIZATION, "Bearer not-a-token"))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_comment_on_hidden_post_is_not_found() {
    let blog = seed().await;
    let draft = post(&blog.state, &blog.alice, blog.category.id, false, -TimeDelta::hours(1)).await;
    let app = app!(blog.state);

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri(&format!("/posts/{}/comment/", draft.id))
            .insert_header(bearer(&blog.state, &blog.bob))
            .set_form([("text", "Hello")])
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri(&format!("/posts/{}/comment/", draft.id))
            .insert_header(bearer(&blog.state, &blog.alice))
            .set_form([("text", "   ")])
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[actix_web::test]
async fn test_comment_changes_are_owner_only() {
    let blog = seed().await;
    let entry = published(&blog, &blog.alice).await;
    let other = published(&blog, &blog.alice).await;
    let app = app!(blog.state);

    test::call_service(
        &app,
        test::TestRequest::post()
            .uri(&format!("/posts/{}/comment/", entry.id))
            .insert_header(bearer(&blog.state, &blog.alice))
            .set_form([("text", "Original")])
            .to_request(),
    )
    .await;
    let comment = blog.state.comments.list_for_post(entry.id).await.unwrap()[0]
        .comment
        .clone();
    let edit_uri = format!("/posts/{}/comment/{}/edit/", entry.id, comment.id);
    let delete_uri = format!("/posts/{}/comment/{}/delete/", entry.id, comment.id);

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri(&edit_uri)
            .insert_header(bearer(&blog.state, &blog.bob))
            .set_form([("text", "Vandalised")])
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), format!("/posts/{}/", entry.id));

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri(&delete_uri)
            .insert_header(bearer(&blog.state, &blog.bob))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    let stored = blog.state.comments.find_by_id(comment.id).await.unwrap().unwrap();
    assert_eq!(stored.text, "Original");

    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri(&format!("/posts/{}/comment/{}/edit/", other.id, comment.id))
            .insert_header(bearer(&blog.state, &blog.alice))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri(&edit_uri)
            .insert_header(bearer(&blog.state, &blog.alice))
            .set_form([("text", "Revised")])
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    let stored = blog.state.comments.find_by_id(comment.id).await.unwrap().unwrap();
    assert_eq!(stored.text, "Revised");
    assert_eq!(stored.post_id, entry.id);

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri(&delete_uri)
            .insert_header(bearer(&blog.state, &blog.alice))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert!(blog.state.comments.find_by_id(comment.id).await.unwrap().is_none());
}

#[actix_web::test]
async fn test_post_delete_is_owner_only() {
    let blog = seed().await;
    let entry = published(&blog, &blog.alice).await;
    let uri = format!("/posts/{}/delete/", entry.id);
    let app = app!(blog.state);

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri(&uri)
            .insert_header(bearer(&blog.state, &blog.bob))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), format!("/posts/{}/", entry.id));
    assert!(blog.state.posts.find_by_id(entry.id).await.unwrap().is_some());

    let confirm = test::call_service(
        &app,
        test::TestRequest::get()
            .uri(&uri)
            .insert_header(bearer(&blog.state, &blog.alice))
            .to_request(),
    )
    .await;
    assert_eq!(confirm.status(), StatusCode::OK);

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri(&uri)
            .insert_header(bearer(&blog.state, &blog.alice))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/");
    assert!(blog.state.posts.find_by_id(entry.id).await.unwrap().is_none());
}

#[actix_web::test]
async fn test_register_login_and_cookie_auth() {
    let blog = seed().await;
    let app = app!(blog.state);
    let credentials = [
        ("username", "carol"),
        ("email", "carol@example.com"),
        ("password", "correct-horse"),
    ];

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/auth/registration/")
            .set_form(credentials)
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/auth/registration/")
            .set_form(credentials)
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/auth/login/")
            .set_form([("username", "carol"), ("password", "wrong-password")])
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/auth/login/")
            .set_form([("username", "carol"), ("password", "correct-horse")])
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let token = resp
        .response()
        .cookies()
        .find(|c| c.name() == "access_token")
        .unwrap()
        .value()
        .to_string();

    let me: Value = test::call_and_read_body_json(
        &app,
        test::TestRequest::get()
            .uri("/auth/me/")
            .cookie(Cookie::new("access_token", token))
            .to_request(),
    )
    .await;
    assert_eq!(me["data"]["username"], "carol");

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/auth/login/?next=/posts/new/")
            .set_form([("username", "carol"), ("password", "correct-horse")])
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/posts/new/");

    for next in ["/%5Cevil.example", "//evil.example", "/%09evil.example"] {
        let resp = test::call_service(
            &app,
            test::TestRequest::post()
                .uri(&format!("/auth/login/?next={next}"))
                .set_form([("username", "carol"), ("password", "correct-horse")])
                .to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::OK, "next={next}");
        assert!(resp.headers().get(header::LOCATION).is_none());
    }
}

#[actix_web::test]
async fn test_registration_validation() {
    let blog = seed().await;
    let app = app!(blog.state);

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/auth/registration/")
            .set_form([("username", "bad name"), ("password", "short")])
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = test::read_body_json(resp).await;
    assert!(body["errors"]["username"].is_array());
    assert!(body["errors"]["password"].is_array());
    assert!(body["values"].get("password").is_none());
}

#[actix_web::test]
async fn test_unknown_route_and_health() {
    let blog = seed().await;
    let app = app!(blog.state);

    let resp =
        test::call_service(&app, test::TestRequest::get().uri("/nowhere/").to_request()).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], 404);

    let health: Value = test::call_and_read_body_json(
        &app,
        test::TestRequest::get().uri("/health/").to_request(),
    )
    .await;
    assert_eq!(health["status"], "ok");
    assert_eq!(health["storage"], "memory");
}
