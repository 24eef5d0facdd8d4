//! End-to-end API tests driving the real route configuration over the
//! in-memory store.

use std::sync::Arc;

use actix_web::http::header;
use actix_web::{App, test, web};
use serde_json::json;
use uuid::Uuid;

use bloglist_core::domain::{Blog, NewBlog, User};
use bloglist_core::ports::{PasswordService, TokenService};
use bloglist_infra::auth::{Argon2PasswordService, JwtConfig, JwtTokenService};
use bloglist_shared::ErrorBody;
use bloglist_shared::dto::{BlogResponse, LoginResponse, UserResponse};

use crate::handlers::configure_routes;
use crate::state::AppState;

/// Build the same App main() builds, minus the request logger.
macro_rules! test_app {
    ($ctx:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new($ctx.state.clone()))
                .app_data(web::Data::new($ctx.token_service.clone()))
                .app_data(web::Data::new($ctx.password_service.clone()))
                .configure(configure_routes)
                .default_service(web::route().to(crate::unknown_endpoint)),
        )
        .await
    };
}

struct TestContext {
    state: AppState,
    token_service: Arc<dyn TokenService>,
    password_service: Arc<dyn PasswordService>,
}

impl TestContext {
    fn new() -> Self {
        Self {
            state: AppState::in_memory(),
            token_service: Arc::new(JwtTokenService::new(JwtConfig {
                secret: "test-secret-key".to_string(),
                expiration_hours: 1,
                issuer: "bloglist-test".to_string(),
            })),
            password_service: Arc::new(Argon2PasswordService::new()),
        }
    }

    async fn seed_user(&self, username: &str, password: &str) -> User {
        let hash = self.password_service.hash(password).unwrap();
        let user = User::new(username.to_string(), None, hash);
        self.state.users.save(user).await.unwrap()
    }

    fn token_for(&self, user: &User) -> String {
        self.token_service
            .generate_token(user.id, &user.username)
            .unwrap()
    }

    async fn seed_blog(&self, title: &str, likes: i64, owner: Option<Uuid>) -> Blog {
        let blog = Blog::create(
            NewBlog {
                title: Some(title.to_string()),
                author: Some(format!("author of {title}")),
                url: Some(format!("https://{title}.example")),
                likes: Some(likes),
            },
            owner,
        )
        .unwrap();
        self.state.blogs.save(blog).await.unwrap()
    }

    async fn blog_count(&self) -> usize {
        self.state.blogs.find_all().await.unwrap().len()
    }
}

fn bearer(token: &str) -> (header::HeaderName, String) {
    (header::AUTHORIZATION, format!("Bearer {token}"))
}

// --- GET /api/blogs ---

#[actix_web::test]
async fn blogs_are_returned_with_ids() {
    let ctx = TestContext::new();
    ctx.seed_blog("blog1", 1, None).await;
    ctx.seed_blog("blog2", 2, None).await;
    ctx.seed_blog("blog3", 3, None).await;
    let app = test_app!(ctx);

    let resp = test::call_service(&app, test::TestRequest::get().uri("/api/blogs").to_request())
        .await;

    assert_eq!(resp.status(), 200);
    let blogs: Vec<BlogResponse> = test::read_body_json(resp).await;
    assert_eq!(blogs.len(), 3);
    for blog in &blogs {
        assert!(!blog.id.is_nil());
    }
}

#[actix_web::test]
async fn listed_blogs_carry_their_owner() {
    let ctx = TestContext::new();
    let owner = ctx.seed_user("root", "salainen").await;
    ctx.seed_blog("owned", 5, Some(owner.id)).await;
    ctx.seed_blog("legacy", 1, None).await;
    let app = test_app!(ctx);

    let resp = test::call_service(&app, test::TestRequest::get().uri("/api/blogs").to_request())
        .await;

    let blogs: Vec<BlogResponse> = test::read_body_json(resp).await;
    let owned = blogs.iter().find(|b| b.title == "owned").unwrap();
    let legacy = blogs.iter().find(|b| b.title == "legacy").unwrap();
    assert_eq!(owned.user.as_ref().unwrap().username, "root");
    assert!(legacy.user.is_none());
}

// --- POST /api/blogs ---

#[actix_web::test]
async fn posting_a_blog_stores_it() {
    let ctx = TestContext::new();
    ctx.seed_blog("blog1", 1, None).await;
    ctx.seed_blog("blog2", 2, None).await;
    ctx.seed_blog("blog3", 3, None).await;
    let user = ctx.seed_user("root", "salainen").await;
    let token = ctx.token_for(&user);
    let app = test_app!(ctx);

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/blogs")
            .insert_header(bearer(&token))
            .set_json(json!({
                "title": "blog4",
                "author": "Author4",
                "url": "https://blog4.example",
                "likes": 4,
            }))
            .to_request(),
    )
    .await;

    assert_eq!(resp.status(), 201);
    let created: BlogResponse = test::read_body_json(resp).await;
    assert_eq!(created.title, "blog4");
    assert_eq!(created.likes, 4);
    assert_eq!(created.user.as_ref().unwrap().username, "root");

    let resp = test::call_service(&app, test::TestRequest::get().uri("/api/blogs").to_request())
        .await;
    let blogs: Vec<BlogResponse> = test::read_body_json(resp).await;
    assert_eq!(blogs.len(), 4);
    let stored = blogs.iter().find(|b| b.id == created.id).unwrap();
    assert_eq!(stored.title, "blog4");
    assert_eq!(stored.author.as_deref(), Some("Author4"));
    assert_eq!(stored.url, "https://blog4.example");
}

#[actix_web::test]
async fn likes_default_to_zero() {
    let ctx = TestContext::new();
    let user = ctx.seed_user("root", "salainen").await;
    let token = ctx.token_for(&user);
    let app = test_app!(ctx);

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/blogs")
            .insert_header(bearer(&token))
            .set_json(json!({"title": "no likes", "url": "https://x.example"}))
            .to_request(),
    )
    .await;

    assert_eq!(resp.status(), 201);
    let created: BlogResponse = test::read_body_json(resp).await;
    assert_eq!(created.likes, 0);
}

#[actix_web::test]
async fn blog_without_title_and_url_is_rejected() {
    let ctx = TestContext::new();
    let user = ctx.seed_user("root", "salainen").await;
    let token = ctx.token_for(&user);
    let app = test_app!(ctx);

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/blogs")
            .insert_header(bearer(&token))
            .set_json(json!({"author": "nobody", "likes": 2}))
            .to_request(),
    )
    .await;

    assert_eq!(resp.status(), 400);
    assert_eq!(ctx.blog_count().await, 0);
}

#[actix_web::test]
async fn blog_creation_requires_a_token() {
    let ctx = TestContext::new();
    let app = test_app!(ctx);

    let payload = json!({"title": "t", "url": "https://t.example"});

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/blogs")
            .set_json(&payload)
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), 401);

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/blogs")
            .insert_header(bearer("garbage"))
            .set_json(&payload)
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), 401);
    assert_eq!(ctx.blog_count().await, 0);
}

#[actix_web::test]
async fn lowercase_bearer_scheme_is_accepted() {
    let ctx = TestContext::new();
    let user = ctx.seed_user("root", "salainen").await;
    let token = ctx.token_for(&user);
    let app = test_app!(ctx);

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/blogs")
            .insert_header((header::AUTHORIZATION, format!("bearer {token}")))
            .set_json(json!({"title": "t", "url": "https://t.example"}))
            .to_request(),
    )
    .await;

    assert_eq!(resp.status(), 201);
}

// --- PUT /api/blogs/{id} ---

#[actix_web::test]
async fn updating_likes_changes_nothing_else() {
    let ctx = TestContext::new();
    let user = ctx.seed_user("root", "salainen").await;
    let token = ctx.token_for(&user);
    let blog = ctx.seed_blog("stable", 7, Some(user.id)).await;
    let app = test_app!(ctx);

    let resp = test::call_service(
        &app,
        test::TestRequest::put()
            .uri(&format!("/api/blogs/{}", blog.id))
            .insert_header(bearer(&token))
            .set_json(json!({"likes": 42}))
            .to_request(),
    )
    .await;

    assert_eq!(resp.status(), 200);
    let updated: BlogResponse = test::read_body_json(resp).await;
    assert_eq!(updated.likes, 42);
    assert_eq!(updated.title, blog.title);
    assert_eq!(updated.author, blog.author);
    assert_eq!(updated.url, blog.url);
}

#[actix_web::test]
async fn updating_an_unknown_id_is_404() {
    let ctx = TestContext::new();
    let user = ctx.seed_user("root", "salainen").await;
    let token = ctx.token_for(&user);
    let app = test_app!(ctx);

    let resp = test::call_service(
        &app,
        test::TestRequest::put()
            .uri(&format!("/api/blogs/{}", Uuid::new_v4()))
            .insert_header(bearer(&token))
            .set_json(json!({"likes": 1}))
            .to_request(),
    )
    .await;

    assert_eq!(resp.status(), 404);
}

#[actix_web::test]
async fn updating_someone_elses_blog_is_forbidden() {
    let ctx = TestContext::new();
    let owner = ctx.seed_user("owner", "salainen").await;
    let intruder = ctx.seed_user("intruder", "salainen").await;
    let blog = ctx.seed_blog("mine", 1, Some(owner.id)).await;
    let token = ctx.token_for(&intruder);
    let app = test_app!(ctx);

    let resp = test::call_service(
        &app,
        test::TestRequest::put()
            .uri(&format!("/api/blogs/{}", blog.id))
            .insert_header(bearer(&token))
            .set_json(json!({"likes": 999}))
            .to_request(),
    )
    .await;

    assert_eq!(resp.status(), 403);
    let stored = ctx.state.blogs.find_by_id(blog.id).await.unwrap().unwrap();
    assert_eq!(stored.likes, 1);
}

// --- DELETE /api/blogs/{id} ---

#[actix_web::test]
async fn owner_can_delete_their_blog() {
    let ctx = TestContext::new();
    let owner = ctx.seed_user("owner", "salainen").await;
    let blog = ctx.seed_blog("short-lived", 1, Some(owner.id)).await;
    ctx.seed_blog("survivor", 2, Some(owner.id)).await;
    let token = ctx.token_for(&owner);
    let app = test_app!(ctx);

    let resp = test::call_service(
        &app,
        test::TestRequest::delete()
            .uri(&format!("/api/blogs/{}", blog.id))
            .insert_header(bearer(&token))
            .to_request(),
    )
    .await;

    assert_eq!(resp.status(), 204);
    let body = test::read_body(resp).await;
    assert!(body.is_empty());
    assert_eq!(ctx.blog_count().await, 1);
}

#[actix_web::test]
async fn non_owner_cannot_delete() {
    let ctx = TestContext::new();
    let owner = ctx.seed_user("owner", "salainen").await;
    let intruder = ctx.seed_user("intruder", "salainen").await;
    let blog = ctx.seed_blog("contested", 1, Some(owner.id)).await;
    let token = ctx.token_for(&intruder);
    let app = test_app!(ctx);

    let resp = test::call_service(
        &app,
        test::TestRequest::delete()
            .uri(&format!("/api/blogs/{}", blog.id))
            .insert_header(bearer(&token))
            .to_request(),
    )
    .await;

    assert_eq!(resp.status(), 403);
    assert_eq!(ctx.blog_count().await, 1);
}

#[actix_web::test]
async fn deleting_an_unknown_id_is_404() {
    let ctx = TestContext::new();
    let user = ctx.seed_user("root", "salainen").await;
    let token = ctx.token_for(&user);
    let app = test_app!(ctx);

    let resp = test::call_service(
        &app,
        test::TestRequest::delete()
            .uri(&format!("/api/blogs/{}", Uuid::new_v4()))
            .insert_header(bearer(&token))
            .to_request(),
    )
    .await;

    assert_eq!(resp.status(), 404);
}

// --- /api/users ---

#[actix_web::test]
async fn registration_rejects_short_passwords() {
    let ctx = TestContext::new();
    let app = test_app!(ctx);

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/users")
            .set_json(json!({"username": "newbie", "password": "pw"}))
            .to_request(),
    )
    .await;

    assert_eq!(resp.status(), 400);
    let body: ErrorBody = test::read_body_json(resp).await;
    assert!(body.error.contains("password"));

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/users")
            .set_json(json!({"username": "newbie"}))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), 400);
}

#[actix_web::test]
async fn registration_rejects_duplicate_usernames() {
    let ctx = TestContext::new();
    ctx.seed_user("root", "salainen").await;
    let app = test_app!(ctx);

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/users")
            .set_json(json!({"username": "root", "password": "salainen"}))
            .to_request(),
    )
    .await;

    assert_eq!(resp.status(), 400);
    let body: ErrorBody = test::read_body_json(resp).await;
    assert!(body.error.contains("username"));
    assert!(body.error.contains("unique"));
}

#[actix_web::test]
async fn registration_never_exposes_the_hash() {
    let ctx = TestContext::new();
    let app = test_app!(ctx);

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/users")
            .set_json(json!({"username": "root", "name": "Superuser", "password": "salainen"}))
            .to_request(),
    )
    .await;

    assert_eq!(resp.status(), 201);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["username"], "root");
    assert!(body.get("passwordHash").is_none());
    assert!(body.get("password_hash").is_none());

    let resp = test::call_service(&app, test::TestRequest::get().uri("/api/users").to_request())
        .await;
    assert_eq!(resp.status(), 200);
    let users: Vec<UserResponse> = test::read_body_json(resp).await;
    assert_eq!(users.len(), 1);
}

// --- /api/login ---

#[actix_web::test]
async fn login_rejects_bad_credentials() {
    let ctx = TestContext::new();
    ctx.seed_user("root", "salainen").await;
    let app = test_app!(ctx);

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/login")
            .set_json(json!({"username": "root", "password": "wrong"}))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), 401);
    let body: ErrorBody = test::read_body_json(resp).await;
    assert_eq!(body.error, "invalid username or password");

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/login")
            .set_json(json!({"username": "ghost", "password": "salainen"}))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), 401);
}

#[actix_web::test]
async fn login_token_authorizes_a_post() {
    let ctx = TestContext::new();
    let app = test_app!(ctx);

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/users")
            .set_json(json!({"username": "root", "name": "Superuser", "password": "salainen"}))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), 201);

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/login")
            .set_json(json!({"username": "root", "password": "salainen"}))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), 200);
    let login: LoginResponse = test::read_body_json(resp).await;
    assert_eq!(login.username, "root");
    assert_eq!(login.name.as_deref(), Some("Superuser"));

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/blogs")
            .insert_header(bearer(&login.token))
            .set_json(json!({"title": "fresh", "url": "https://fresh.example"}))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), 201);
    assert_eq!(ctx.blog_count().await, 1);
}

// --- misc ---

#[actix_web::test]
async fn unknown_routes_get_a_json_404() {
    let ctx = TestContext::new();
    let app = test_app!(ctx);

    let resp = test::call_service(
        &app,
        test::TestRequest::get().uri("/api/nothing").to_request(),
    )
    .await;

    assert_eq!(resp.status(), 404);
    let body: ErrorBody = test::read_body_json(resp).await;
    assert_eq!(body.error, "unknown endpoint");
}

#[actix_web::test]
async fn health_endpoint_answers() {
    let ctx = TestContext::new();
    let app = test_app!(ctx);

    let resp = test::call_service(
        &app,
        test::TestRequest::get().uri("/api/health").to_request(),
    )
    .await;

    assert_eq!(resp.status(), 200);
}
