// ABOUTME: Common test utilities for integration tests
// ABOUTME: Spawns a real server over an in-memory database and drives it with reqwest

use samrat_api::{DbOptions, DbState};
use samrat_auth::hash_password;
use samrat_profiles::{Membership, ProfileCreateInput};
use serde_json::json;
use tempfile::TempDir;

/// Test context containing server URL and shared state
pub struct TestContext {
    pub base_url: String,
    pub db: DbState,
    pub _temp_dir: TempDir,
}

/// Spawn a test server with default options
pub async fn setup_test_server() -> TestContext {
    setup_test_server_with(None).await
}

/// Spawn a test server, optionally capping the blob store object size
pub async fn setup_test_server_with(max_upload_bytes: Option<u64>) -> TestContext {
    let temp_dir = TempDir::new().unwrap();

    let db = DbState::init_in_memory(DbOptions {
        database_path: None,
        blob_dir: Some(temp_dir.path().join("blobs")),
        max_upload_bytes,
        session_ttl_hours: Some(24),
    })
    .await
    .expect("Failed to initialize test state");

    let app = samrat_api::create_router(db.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let base_url = format!("http://{}", addr);

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    tokio::time::sleep(tokio::time::Duration::from_millis(50)).await;

    TestContext {
        base_url,
        db,
        _temp_dir: temp_dir,
    }
}

/// Insert a profile directly through storage, returning its id.
/// The password is always "secret".
pub async fn seed_profile(db: &DbState, role: &str, name: &str, email: &str) -> String {
    let hash = hash_password("secret").unwrap();
    let profile = db
        .profile_storage
        .create_profile(
            ProfileCreateInput {
                role: role.to_string(),
                full_name: name.to_string(),
                email: email.to_string(),
                membership: Some(Membership::Basic),
            },
            &hash,
        )
        .await
        .expect("Failed to seed profile");
    profile.id
}

/// Log in through the API, returning the bearer token
pub async fn login(base_url: &str, email: &str, surface: &str) -> String {
    let response = post_json(
        base_url,
        "/api/auth/login",
        &json!({"email": email, "password": "secret", "surface": surface}),
        None,
    )
    .await;
    assert_eq!(response.status(), 200, "login failed for {}", email);

    let body: serde_json::Value = response.json().await.unwrap();
    body["data"]["token"].as_str().unwrap().to_string()
}

/// Seed an admin and log them in
pub async fn seed_admin_and_login(ctx: &TestContext) -> (String, String) {
    let id = seed_profile(&ctx.db, "admin", "Root Admin", "admin@example.com").await;
    let token = login(&ctx.base_url, "admin@example.com", "admin").await;
    (id, token)
}

/// Seed a customer and log them in
#[allow(dead_code)]
pub async fn seed_customer_and_login(ctx: &TestContext, email: &str) -> (String, String) {
    let id = seed_profile(&ctx.db, "customer", "Test Customer", email).await;
    let token = login(&ctx.base_url, email, "customer").await;
    (id, token)
}

fn with_auth(builder: reqwest::RequestBuilder, token: Option<&str>) -> reqwest::RequestBuilder {
    match token {
        Some(token) => builder.bearer_auth(token),
        None => builder,
    }
}

/// Helper to make GET requests
pub async fn get(base_url: &str, path: &str, token: Option<&str>) -> reqwest::Response {
    let client = reqwest::Client::new();
    with_auth(client.get(format!("{}{}", base_url, path)), token)
        .send()
        .await
        .expect("Failed to make GET request")
}

/// Helper to make POST requests with JSON body
pub async fn post_json<T: serde::Serialize>(
    base_url: &str,
    path: &str,
    body: &T,
    token: Option<&str>,
) -> reqwest::Response {
    let client = reqwest::Client::new();
    with_auth(client.post(format!("{}{}", base_url, path)), token)
        .json(body)
        .send()
        .await
        .expect("Failed to make POST request")
}

/// Helper to make PUT requests with JSON body
#[allow(dead_code)]
pub async fn put_json<T: serde::Serialize>(
    base_url: &str,
    path: &str,
    body: &T,
    token: Option<&str>,
) -> reqwest::Response {
    let client = reqwest::Client::new();
    with_auth(client.put(format!("{}{}", base_url, path)), token)
        .json(body)
        .send()
        .await
        .expect("Failed to make PUT request")
}

/// Helper to POST a multipart file batch
#[allow(dead_code)]
pub async fn post_files(
    base_url: &str,
    path: &str,
    files: Vec<(&str, Vec<u8>)>,
    token: Option<&str>,
) -> reqwest::Response {
    let mut form = reqwest::multipart::Form::new();
    for (name, bytes) in files {
        let part = reqwest::multipart::Part::bytes(bytes).file_name(name.to_string());
        form = form.part("files", part);
    }

    let client = reqwest::Client::new();
    with_auth(client.post(format!("{}{}", base_url, path)), token)
        .multipart(form)
        .send()
        .await
        .expect("Failed to make multipart POST request")
}
