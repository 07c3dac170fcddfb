// ABOUTME: Integration tests for file upload, listing, and download
// ABOUTME: Verifies the per-file outcome contract for multipart batches

mod common;

use common::{
    get, post_files, seed_admin_and_login, seed_customer_and_login, setup_test_server,
    setup_test_server_with,
};

#[tokio::test]
async fn test_upload_and_list() {
    let ctx = setup_test_server().await;
    let (customer_id, token) = seed_customer_and_login(&ctx, "cust@example.com").await;

    let response = post_files(
        &ctx.base_url,
        &format!("/api/customers/{}/files", customer_id),
        vec![
            ("report.pdf", b"pdf bytes".to_vec()),
            ("logo.png", b"png bytes".to_vec()),
        ],
        Some(&token),
    )
    .await;
    assert_eq!(response.status(), 200);

    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["data"]["uploaded"], 2);
    assert_eq!(body["data"]["failed"], 0);

    let response = get(
        &ctx.base_url,
        &format!("/api/customers/{}/files", customer_id),
        Some(&token),
    )
    .await;
    let body: serde_json::Value = response.json().await.unwrap();
    let files = body["data"].as_array().unwrap();
    assert_eq!(files.len(), 2);
    let names: Vec<&str> = files.iter().map(|f| f["name"].as_str().unwrap()).collect();
    assert!(names.contains(&"report.pdf"));
    assert!(names.contains(&"logo.png"));
}

#[tokio::test]
async fn test_oversized_file_fails_without_sinking_the_batch() {
    // Blob store capped at 16 bytes: the second file alone is rejected
    let ctx = setup_test_server_with(Some(16)).await;
    let (customer_id, token) = seed_customer_and_login(&ctx, "cust@example.com").await;

    let response = post_files(
        &ctx.base_url,
        &format!("/api/customers/{}/files", customer_id),
        vec![
            ("small.txt", b"tiny".to_vec()),
            ("big.bin", vec![0u8; 64]),
            ("small2.txt", b"also tiny".to_vec()),
        ],
        Some(&token),
    )
    .await;
    assert_eq!(response.status(), 200);

    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["data"]["uploaded"], 2);
    assert_eq!(body["data"]["failed"], 1);

    let outcomes = body["data"]["outcomes"].as_array().unwrap();
    assert_eq!(outcomes.len(), 3);
    assert_eq!(outcomes[0]["success"], true);
    assert_eq!(outcomes[1]["success"], false);
    assert!(outcomes[1]["error"]
        .as_str()
        .unwrap()
        .contains("too large"));
    assert_eq!(outcomes[2]["success"], true);

    // Only the successful files have metadata rows
    let response = get(
        &ctx.base_url,
        &format!("/api/customers/{}/files", customer_id),
        Some(&token),
    )
    .await;
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["data"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_download_roundtrip() {
    let ctx = setup_test_server().await;
    let (customer_id, token) = seed_customer_and_login(&ctx, "cust@example.com").await;

    let payload = b"the quick brown fox".to_vec();
    let response = post_files(
        &ctx.base_url,
        &format!("/api/customers/{}/files", customer_id),
        vec![("fox.txt", payload.clone())],
        Some(&token),
    )
    .await;
    let body: serde_json::Value = response.json().await.unwrap();
    let file_id = body["data"]["outcomes"][0]["file"]["id"]
        .as_str()
        .unwrap()
        .to_string();

    let response = get(
        &ctx.base_url,
        &format!("/api/files/{}/download", file_id),
        Some(&token),
    )
    .await;
    assert_eq!(response.status(), 200);
    assert!(response
        .headers()
        .get("content-disposition")
        .unwrap()
        .to_str()
        .unwrap()
        .contains("fox.txt"));
    assert_eq!(response.bytes().await.unwrap().to_vec(), payload);
}

#[tokio::test]
async fn test_download_denied_for_other_customers() {
    let ctx = setup_test_server().await;
    let (first_id, first_token) = seed_customer_and_login(&ctx, "first@example.com").await;
    let (_, second_token) = seed_customer_and_login(&ctx, "second@example.com").await;

    let response = post_files(
        &ctx.base_url,
        &format!("/api/customers/{}/files", first_id),
        vec![("private.txt", b"mine".to_vec())],
        Some(&first_token),
    )
    .await;
    let body: serde_json::Value = response.json().await.unwrap();
    let file_id = body["data"]["outcomes"][0]["file"]["id"]
        .as_str()
        .unwrap()
        .to_string();

    let response = get(
        &ctx.base_url,
        &format!("/api/files/{}/download", file_id),
        Some(&second_token),
    )
    .await;
    assert_eq!(response.status(), 403);
}

#[tokio::test]
async fn test_admin_can_download_customer_files() {
    let ctx = setup_test_server().await;
    let (_, admin_token) = seed_admin_and_login(&ctx).await;
    let (customer_id, customer_token) = seed_customer_and_login(&ctx, "cust@example.com").await;

    let response = post_files(
        &ctx.base_url,
        &format!("/api/customers/{}/files", customer_id),
        vec![("shared.txt", b"hello".to_vec())],
        Some(&customer_token),
    )
    .await;
    let body: serde_json::Value = response.json().await.unwrap();
    let file_id = body["data"]["outcomes"][0]["file"]["id"]
        .as_str()
        .unwrap()
        .to_string();

    let response = get(
        &ctx.base_url,
        &format!("/api/files/{}/download", file_id),
        Some(&admin_token),
    )
    .await;
    assert_eq!(response.status(), 200);
}

#[tokio::test]
async fn test_download_of_unknown_file_is_not_found() {
    let ctx = setup_test_server().await;
    let (_, token) = seed_customer_and_login(&ctx, "cust@example.com").await;

    let response = get(
        &ctx.base_url,
        "/api/files/no-such-file/download",
        Some(&token),
    )
    .await;
    assert_eq!(response.status(), 404);
}
