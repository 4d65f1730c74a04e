//! Endpoint tests: the full handler stack over in-memory repositories and
//! a fixed clock, so every visibility decision is deterministic.

use std::sync::Arc;

use actix_http::Request;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::{StatusCode, header};
use actix_web::{App, Error, test, web};
use chrono::{DateTime, TimeDelta, Utc};
use serde_json::json;
use uuid::Uuid;

use blog_server::handlers;
use blog_server::state::AppState;
use quill_core::domain::{Category, Comment, Page, Post, PostPreview, User};
use quill_core::ports::{Clock, PasswordService, TokenService};
use quill_infra::auth::{Argon2PasswordService, JwtConfig, JwtTokenService};
use quill_infra::database::InMemoryDb;

#[derive(Clone, Copy)]
struct FixedClock(DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

fn base_time() -> DateTime<Utc> {
    "2025-06-01T12:00:00Z".parse().unwrap()
}

struct TestApp {
    state: AppState,
    tokens: Arc<dyn TokenService>,
}

fn test_env() -> TestApp {
    let clock: Arc<dyn Clock> = Arc::new(FixedClock(base_time()));
    TestApp {
        state: AppState::in_memory(InMemoryDb::new(), clock),
        tokens: Arc::new(JwtTokenService::new(JwtConfig {
            secret: "test-secret".to_string(),
            expiration_hours: 1,
            issuer: "test".to_string(),
        })),
    }
}

impl TestApp {
    async fn service(&self) -> impl Service<Request, Response = ServiceResponse, Error = Error> {
        let password_service: Arc<dyn PasswordService> = Arc::new(Argon2PasswordService::new());
        test::init_service(
            App::new()
                .app_data(web::Data::new(self.state.clone()))
                .app_data(web::Data::new(self.tokens.clone()))
                .app_data(web::Data::new(password_service))
                .configure(handlers::configure_routes),
        )
        .await
    }

    fn bearer(&self, user: &User) -> (&'static str, String) {
        let token = self.tokens.generate_token(user.id, &user.username).unwrap();
        ("Authorization", format!("Bearer {token}"))
    }

    async fn seed_user(&self, username: &str) -> User {
        let user = User::new(
            username.to_string(),
            format!("{username}@example.com"),
            "hash".to_string(),
            String::new(),
            String::new(),
            base_time(),
        );
        self.state.users.insert(user).await.unwrap()
    }

    async fn seed_category(&self, slug: &str, is_published: bool) -> Category {
        let category = Category::new(
            slug.to_uppercase(),
            format!("About {slug}"),
            slug.to_string(),
            is_published,
            base_time(),
        );
        self.state.categories.insert(category).await.unwrap()
    }

    async fn seed_post(
        &self,
        author: &User,
        category: Option<Uuid>,
        pub_date: DateTime<Utc>,
        is_published: bool,
    ) -> Post {
        let post = Post::new(
            author.id,
            category,
            None,
            "A post".to_string(),
            "Some text".to_string(),
            pub_date,
            is_published,
            base_time(),
        );
        self.state.posts.insert(post).await.unwrap()
    }
}

fn location<B>(resp: &ServiceResponse<B>) -> &str {
    resp.headers()
        .get(header::LOCATION)
        .expect("redirect should carry a Location header")
        .to_str()
        .unwrap()
}

fn post_form(title: &str, category: Option<Uuid>, pub_date: DateTime<Utc>) -> serde_json::Value {
    json!({
        "title": title,
        "text": "Some text",
        "pub_date": pub_date,
        "is_published": true,
        "category_id": category,
        "location_id": null,
    })
}

// --- index ---

#[actix_web::test]
async fn index_lists_only_visible_posts_newest_first() {
    let env = test_env();
    let alice = env.seed_user("alice").await;
    let news = env.seed_category("news", true).await;
    let now = base_time();

    let old = env
        .seed_post(&alice, Some(news.id), now - TimeDelta::days(2), true)
        .await;
    let fresh = env
        .seed_post(&alice, Some(news.id), now - TimeDelta::days(1), true)
        .await;
    // None of these may surface: future-dated, draft, uncategorized
    env.seed_post(&alice, Some(news.id), now + TimeDelta::days(1), true)
        .await;
    env.seed_post(&alice, Some(news.id), now - TimeDelta::days(1), false)
        .await;
    env.seed_post(&alice, None, now - TimeDelta::days(1), true)
        .await;

    let app = env.service().await;
    let resp = test::call_service(&app, test::TestRequest::get().uri("/api/posts").to_request())
        .await;

    assert_eq!(resp.status(), StatusCode::OK);
    let page: Page<PostPreview> = test::read_body_json(resp).await;
    assert_eq!(page.total_items, 2);
    assert_eq!(page.items[0].id, fresh.id);
    assert_eq!(page.items[1].id, old.id);
    assert_eq!(page.items[0].author_username, "alice");
}

#[actix_web::test]
async fn index_paginates_at_ten_per_page() {
    let env = test_env();
    let alice = env.seed_user("alice").await;
    let news = env.seed_category("news", true).await;
    let now = base_time();

    for i in 0..15 {
        env.seed_post(&alice, Some(news.id), now - TimeDelta::hours(i + 1), true)
            .await;
    }

    let app = env.service().await;
    let first: Page<PostPreview> = test::read_body_json(
        test::call_service(&app, test::TestRequest::get().uri("/api/posts").to_request()).await,
    )
    .await;
    let second: Page<PostPreview> = test::read_body_json(
        test::call_service(
            &app,
            test::TestRequest::get().uri("/api/posts?page=2").to_request(),
        )
        .await,
    )
    .await;

    assert_eq!(first.items.len(), 10);
    assert_eq!(second.items.len(), 5);
    assert_eq!(first.total_pages, 2);
    assert!(first.items.last().unwrap().pub_date >= second.items[0].pub_date);
}

// --- detail ---

#[actix_web::test]
async fn detail_hides_future_post_from_everyone_but_the_author() {
    let env = test_env();
    let alice = env.seed_user("alice").await;
    let bob = env.seed_user("bob").await;
    let news = env.seed_category("news", true).await;
    let scheduled = env
        .seed_post(&alice, Some(news.id), base_time() + TimeDelta::days(1), true)
        .await;

    let app = env.service().await;
    let uri = format!("/api/posts/{}", scheduled.id);

    let anonymous = test::call_service(&app, test::TestRequest::get().uri(&uri).to_request()).await;
    assert_eq!(anonymous.status(), StatusCode::NOT_FOUND);

    let as_bob = test::call_service(
        &app,
        test::TestRequest::get()
            .uri(&uri)
            .insert_header(env.bearer(&bob))
            .to_request(),
    )
    .await;
    assert_eq!(as_bob.status(), StatusCode::NOT_FOUND);

    let as_alice = test::call_service(
        &app,
        test::TestRequest::get()
            .uri(&uri)
            .insert_header(env.bearer(&alice))
            .to_request(),
    )
    .await;
    assert_eq!(as_alice.status(), StatusCode::OK);
}

#[actix_web::test]
async fn detail_carries_comments_oldest_first_and_an_empty_form() {
    let env = test_env();
    let alice = env.seed_user("alice").await;
    let bob = env.seed_user("bob").await;
    let news = env.seed_category("news", true).await;
    let now = base_time();
    let post = env
        .seed_post(&alice, Some(news.id), now - TimeDelta::days(1), true)
        .await;

    env.state
        .comments
        .insert(Comment::new(bob.id, post.id, "second".into(), now))
        .await
        .unwrap();
    env.state
        .comments
        .insert(Comment::new(
            alice.id,
            post.id,
            "first".into(),
            now - TimeDelta::hours(1),
        ))
        .await
        .unwrap();

    let app = env.service().await;
    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri(&format!("/api/posts/{}", post.id))
            .to_request(),
    )
    .await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["comments"][0]["text"], "first");
    assert_eq!(body["comments"][0]["author_username"], "alice");
    assert_eq!(body["comments"][1]["text"], "second");
    assert_eq!(body["comment_form"]["text"], "");
    assert_eq!(body["author_username"], "alice");
}

#[actix_web::test]
async fn detail_of_unknown_post_is_not_found() {
    let env = test_env();
    let app = env.service().await;

    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri(&format!("/api/posts/{}", Uuid::new_v4()))
            .to_request(),
    )
    .await;

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// --- post create ---

#[actix_web::test]
async fn unauthenticated_writes_redirect_to_login() {
    let env = test_env();
    let app = env.service().await;

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/posts")
            .set_json(post_form("Hello", None, base_time()))
            .to_request(),
    )
    .await;

    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/api/auth/login");
    // Nothing was persisted
    let page = env
        .state
        .posts
        .list_by_author(Uuid::new_v4(), 1)
        .await
        .unwrap();
    assert_eq!(page.total_items, 0);
}

#[actix_web::test]
async fn create_assigns_the_requester_as_author_and_redirects_to_profile() {
    let env = test_env();
    let alice = env.seed_user("alice").await;
    let bob = env.seed_user("bob").await;
    let news = env.seed_category("news", true).await;

    // The payload cannot smuggle in another author
    let mut body = post_form("Hello", Some(news.id), base_time() - TimeDelta::days(1));
    body["author_id"] = json!(bob.id);

    let app = env.service().await;
    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/posts")
            .insert_header(env.bearer(&alice))
            .set_json(body)
            .to_request(),
    )
    .await;

    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/api/profile/alice");

    let own = env.state.posts.list_by_author(alice.id, 1).await.unwrap();
    assert_eq!(own.total_items, 1);
    assert_eq!(own.items[0].title, "Hello");
}

#[actix_web::test]
async fn create_with_invalid_form_persists_nothing() {
    let env = test_env();
    let alice = env.seed_user("alice").await;

    let app = env.service().await;
    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/posts")
            .insert_header(env.bearer(&alice))
            .set_json(post_form("", None, base_time()))
            .to_request(),
    )
    .await;

    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let own = env.state.posts.list_by_author(alice.id, 1).await.unwrap();
    assert_eq!(own.total_items, 0);
}

// --- post update / delete ---

#[actix_web::test]
async fn update_by_non_author_changes_nothing_and_redirects_to_detail() {
    let env = test_env();
    let alice = env.seed_user("alice").await;
    let bob = env.seed_user("bob").await;
    let news = env.seed_category("news", true).await;
    let post = env
        .seed_post(&alice, Some(news.id), base_time() - TimeDelta::days(1), true)
        .await;

    let app = env.service().await;
    let resp = test::call_service(
        &app,
        test::TestRequest::put()
            .uri(&format!("/api/posts/{}", post.id))
            .insert_header(env.bearer(&bob))
            .set_json(post_form("Hijacked", Some(news.id), base_time()))
            .to_request(),
    )
    .await;

    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), format!("/api/posts/{}", post.id));

    let stored = env.state.posts.find_by_id(post.id).await.unwrap().unwrap();
    assert_eq!(stored.title, "A post");
}

#[actix_web::test]
async fn update_by_author_applies_and_redirects_to_detail() {
    let env = test_env();
    let alice = env.seed_user("alice").await;
    let news = env.seed_category("news", true).await;
    let post = env
        .seed_post(&alice, Some(news.id), base_time() - TimeDelta::days(1), true)
        .await;

    let app = env.service().await;
    let resp = test::call_service(
        &app,
        test::TestRequest::put()
            .uri(&format!("/api/posts/{}", post.id))
            .insert_header(env.bearer(&alice))
            .set_json(post_form(
                "Updated",
                Some(news.id),
                base_time() - TimeDelta::days(1),
            ))
            .to_request(),
    )
    .await;

    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), format!("/api/posts/{}", post.id));

    let stored = env.state.posts.find_by_id(post.id).await.unwrap().unwrap();
    assert_eq!(stored.title, "Updated");
}

#[actix_web::test]
async fn delete_by_non_author_keeps_the_post_but_redirects_to_index() {
    let env = test_env();
    let alice = env.seed_user("alice").await;
    let bob = env.seed_user("bob").await;
    let news = env.seed_category("news", true).await;
    let post = env
        .seed_post(&alice, Some(news.id), base_time() - TimeDelta::days(1), true)
        .await;

    let app = env.service().await;
    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri(&format!("/api/posts/{}/delete", post.id))
            .insert_header(env.bearer(&bob))
            .to_request(),
    )
    .await;

    // Same redirect as a successful delete; the denial is silent
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/api/posts");
    assert!(env.state.posts.find_by_id(post.id).await.unwrap().is_some());
}

#[actix_web::test]
async fn delete_by_author_removes_the_post() {
    let env = test_env();
    let alice = env.seed_user("alice").await;
    let news = env.seed_category("news", true).await;
    let post = env
        .seed_post(&alice, Some(news.id), base_time() - TimeDelta::days(1), true)
        .await;

    let app = env.service().await;
    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri(&format!("/api/posts/{}/delete", post.id))
            .insert_header(env.bearer(&alice))
            .to_request(),
    )
    .await;

    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/api/posts");
    assert!(env.state.posts.find_by_id(post.id).await.unwrap().is_none());
}

// --- comments ---

#[actix_web::test]
async fn comment_on_missing_post_is_not_found_and_not_persisted() {
    let env = test_env();
    let bob = env.seed_user("bob").await;
    let ghost = Uuid::new_v4();

    let app = env.service().await;
    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri(&format!("/api/posts/{ghost}/comments"))
            .insert_header(env.bearer(&bob))
            .set_json(json!({"text": "hello?"}))
            .to_request(),
    )
    .await;

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert!(env.state.comments.list_for_post(ghost).await.unwrap().is_empty());
}

#[actix_web::test]
async fn comments_attach_to_invisible_posts_too() {
    let env = test_env();
    let alice = env.seed_user("alice").await;
    let bob = env.seed_user("bob").await;
    let news = env.seed_category("news", true).await;
    // Scheduled for tomorrow, so not publicly visible
    let post = env
        .seed_post(&alice, Some(news.id), base_time() + TimeDelta::days(1), true)
        .await;

    let app = env.service().await;
    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri(&format!("/api/posts/{}/comments", post.id))
            .insert_header(env.bearer(&bob))
            .set_json(json!({"text": "early!"}))
            .to_request(),
    )
    .await;

    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), format!("/api/posts/{}", post.id));

    let comments = env.state.comments.list_for_post(post.id).await.unwrap();
    assert_eq!(comments.len(), 1);
    assert_eq!(comments[0].author_username, "bob");
}

#[actix_web::test]
async fn comment_edit_by_non_author_is_a_silent_redirect() {
    let env = test_env();
    let alice = env.seed_user("alice").await;
    let bob = env.seed_user("bob").await;
    let news = env.seed_category("news", true).await;
    let post = env
        .seed_post(&alice, Some(news.id), base_time() - TimeDelta::days(1), true)
        .await;
    let comment = env
        .state
        .comments
        .insert(Comment::new(alice.id, post.id, "original".into(), base_time()))
        .await
        .unwrap();

    let app = env.service().await;
    let resp = test::call_service(
        &app,
        test::TestRequest::put()
            .uri(&format!("/api/comments/{}", comment.id))
            .insert_header(env.bearer(&bob))
            .set_json(json!({"text": "defaced"}))
            .to_request(),
    )
    .await;

    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), format!("/api/posts/{}", post.id));

    let stored = env
        .state
        .comments
        .find_by_id(comment.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.text, "original");
}

#[actix_web::test]
async fn comment_author_can_edit_and_delete() {
    let env = test_env();
    let alice = env.seed_user("alice").await;
    let news = env.seed_category("news", true).await;
    let post = env
        .seed_post(&alice, Some(news.id), base_time() - TimeDelta::days(1), true)
        .await;
    let comment = env
        .state
        .comments
        .insert(Comment::new(alice.id, post.id, "original".into(), base_time()))
        .await
        .unwrap();

    let app = env.service().await;

    let edited = test::call_service(
        &app,
        test::TestRequest::put()
            .uri(&format!("/api/comments/{}", comment.id))
            .insert_header(env.bearer(&alice))
            .set_json(json!({"text": "revised"}))
            .to_request(),
    )
    .await;
    assert_eq!(edited.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        env.state
            .comments
            .find_by_id(comment.id)
            .await
            .unwrap()
            .unwrap()
            .text,
        "revised"
    );

    let deleted = test::call_service(
        &app,
        test::TestRequest::post()
            .uri(&format!("/api/comments/{}/delete", comment.id))
            .insert_header(env.bearer(&alice))
            .to_request(),
    )
    .await;
    assert_eq!(deleted.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&deleted), format!("/api/posts/{}", post.id));
    assert!(
        env.state
            .comments
            .find_by_id(comment.id)
            .await
            .unwrap()
            .is_none()
    );
}

// --- profiles ---

#[actix_web::test]
async fn profile_shows_drafts_only_to_its_owner() {
    let env = test_env();
    let alice = env.seed_user("alice").await;
    let news = env.seed_category("news", true).await;
    let now = base_time();

    env.seed_post(&alice, Some(news.id), now - TimeDelta::days(1), true)
        .await;
    env.seed_post(&alice, Some(news.id), now + TimeDelta::days(1), true)
        .await;
    env.seed_post(&alice, Some(news.id), now - TimeDelta::days(1), false)
        .await;

    let app = env.service().await;

    let public = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/profile/alice")
            .to_request(),
    )
    .await;
    let public_body: serde_json::Value = test::read_body_json(public).await;
    assert_eq!(public_body["posts"]["total_items"], 1);

    let own = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/profile/alice")
            .insert_header(env.bearer(&alice))
            .to_request(),
    )
    .await;
    let own_body: serde_json::Value = test::read_body_json(own).await;
    assert_eq!(own_body["posts"]["total_items"], 3);
    assert_eq!(own_body["profile"]["username"], "alice");
}

#[actix_web::test]
async fn profile_of_unknown_user_is_not_found() {
    let env = test_env();
    let app = env.service().await;

    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/profile/nobody")
            .to_request(),
    )
    .await;

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn profile_edit_renames_and_redirects_to_the_new_name() {
    let env = test_env();
    let alice = env.seed_user("alice").await;

    let app = env.service().await;
    let resp = test::call_service(
        &app,
        test::TestRequest::put()
            .uri("/api/profile/edit")
            .insert_header(env.bearer(&alice))
            .set_json(json!({
                "username": "alicia",
                "first_name": "Alice",
                "last_name": "Liddell",
                "email": "alicia@example.com",
            }))
            .to_request(),
    )
    .await;

    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/api/profile/alicia");

    let stored = env
        .state
        .users
        .find_by_id(alice.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.username, "alicia");
    assert_eq!(stored.email, "alicia@example.com");
}

// --- categories ---

#[actix_web::test]
async fn category_listing_requires_a_published_category() {
    let env = test_env();
    let alice = env.seed_user("alice").await;
    let hidden = env.seed_category("drafts", false).await;
    let news = env.seed_category("news", true).await;
    let now = base_time();

    env.seed_post(&alice, Some(hidden.id), now - TimeDelta::days(1), true)
        .await;
    let visible = env
        .seed_post(&alice, Some(news.id), now - TimeDelta::days(1), true)
        .await;
    env.seed_post(&alice, Some(news.id), now + TimeDelta::days(1), true)
        .await;

    let app = env.service().await;

    let gone = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/categories/drafts")
            .to_request(),
    )
    .await;
    assert_eq!(gone.status(), StatusCode::NOT_FOUND);

    let ok = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/categories/news")
            .to_request(),
    )
    .await;
    assert_eq!(ok.status(), StatusCode::OK);
    let body: serde_json::Value = test::read_body_json(ok).await;
    assert_eq!(body["category"]["slug"], "news");
    assert_eq!(body["posts"]["total_items"], 1);
    assert_eq!(body["posts"]["items"][0]["id"], json!(visible.id));
}

// --- auth ---

#[actix_web::test]
async fn register_login_and_me_round_trip() {
    let env = test_env();
    let app = env.service().await;

    let registered = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/auth/register")
            .set_json(json!({
                "username": "carol",
                "email": "carol@example.com",
                "password": "s3cret-enough",
            }))
            .to_request(),
    )
    .await;
    assert_eq!(registered.status(), StatusCode::CREATED);

    let logged_in = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/auth/login")
            .set_json(json!({"username": "carol", "password": "s3cret-enough"}))
            .to_request(),
    )
    .await;
    assert_eq!(logged_in.status(), StatusCode::OK);
    let auth: serde_json::Value = test::read_body_json(logged_in).await;
    let token = auth["access_token"].as_str().unwrap();

    let me = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/auth/me")
            .insert_header(("Authorization", format!("Bearer {token}")))
            .to_request(),
    )
    .await;
    assert_eq!(me.status(), StatusCode::OK);
    let body: serde_json::Value = test::read_body_json(me).await;
    assert_eq!(body["username"], "carol");
}

#[actix_web::test]
async fn register_rejects_taken_usernames() {
    let env = test_env();
    env.seed_user("alice").await;

    let app = env.service().await;
    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/auth/register")
            .set_json(json!({
                "username": "alice",
                "email": "fresh@example.com",
                "password": "s3cret-enough",
            }))
            .to_request(),
    )
    .await;

    assert_eq!(resp.status(), StatusCode::CONFLICT);
}

#[actix_web::test]
async fn login_with_wrong_password_is_unauthorized() {
    let env = test_env();
    let app = env.service().await;

    // Register through the API so the stored hash is real
    test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/auth/register")
            .set_json(json!({
                "username": "carol",
                "email": "carol@example.com",
                "password": "s3cret-enough",
            }))
            .to_request(),
    )
    .await;

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/auth/login")
            .set_json(json!({"username": "carol", "password": "wrong"}))
            .to_request(),
    )
    .await;

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}
