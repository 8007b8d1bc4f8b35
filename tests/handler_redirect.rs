mod common;

use axum::http::StatusCode;

#[tokio::test]
async fn test_redirect_to_original_url() {
    let server = common::make_server();

    let created = server.post("/").text("https://example.com/target").await;
    let code = common::code_of(&created.text());

    let response = server.get(&format!("/{code}")).await;

    response.assert_status(StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(
        response.header("location").to_str().unwrap(),
        "https://example.com/target"
    );
}

#[tokio::test]
async fn test_unknown_code_returns_not_found() {
    let server = common::make_server();

    let response = server.get("/zzz999zzz999zzz999zz").await;

    response.assert_status(StatusCode::NOT_FOUND);

    let body = response.json::<serde_json::Value>();
    assert_eq!(body["error"]["code"], "not_found");
}

#[tokio::test]
async fn test_redirect_is_visible_across_identities() {
    let repository =
        std::sync::Arc::new(urlcut::infrastructure::persistence::InMemoryRepository::new());

    let creator = common::server_with(repository.clone());
    let visitor = common::server_with(repository);

    let created = creator.post("/").text("https://example.com/shared").await;
    let code = common::code_of(&created.text());

    // Redirect is public, not partitioned by identity.
    let response = visitor.get(&format!("/{code}")).await;
    response.assert_status(StatusCode::TEMPORARY_REDIRECT);
}
