//! Identity Toolkit client against a mock HTTP server

use cookbook::adapters::auth::{AuthClient, IdentityToolkitClient};
use cookbook::config::{load_config_str, PlatformConfig};
use cookbook::domain::{AuthError, CookbookError};
use mockito::Matcher;
use serde_json::json;

fn platform(endpoint: &str) -> PlatformConfig {
    let toml = format!(
        r#"
database_target = "memory"
auth_target = "identity_toolkit"

[platform]
api_key = "AIza-test"
project_id = "cookbook-dev"
app_id = "1:123:web:abc"
identity_endpoint = "{endpoint}"
request_timeout_seconds = 5
"#
    );
    load_config_str(&toml).unwrap().platform
}

fn client(server: &mockito::ServerGuard) -> IdentityToolkitClient {
    IdentityToolkitClient::new(reqwest::Client::new(), &platform(&server.url()))
}

#[tokio::test]
async fn test_sign_up_sends_key_and_body() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/v1/accounts:signUp")
        .match_query(Matcher::UrlEncoded("key".into(), "AIza-test".into()))
        .match_body(Matcher::Json(json!({
            "email": "alice@example.com",
            "password": "secret1",
            "returnSecureToken": true
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "localId": "uid-alice",
                "email": "alice@example.com",
                "idToken": "id-token",
                "refreshToken": "refresh-token",
                "expiresIn": "3600"
            })
            .to_string(),
        )
        .create_async()
        .await;

    let client = client(&server);
    let mut sessions = client.subscribe();

    let session = client.register("alice@example.com", "secret1").await.unwrap();
    mock.assert_async().await;

    assert_eq!(session.uid.as_str(), "uid-alice");
    assert!(!session.is_expired());
    assert!(sessions.has_changed().unwrap());
    assert_eq!(
        sessions.borrow_and_update().as_ref().map(|s| s.uid.as_str().to_string()),
        Some("uid-alice".to_string())
    );
}

#[tokio::test]
async fn test_sign_in_invalid_credentials() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/v1/accounts:signInWithPassword")
        .match_query(Matcher::Any)
        .with_status(400)
        .with_header("content-type", "application/json")
        .with_body(
            json!({"error": {"code": 400, "message": "INVALID_LOGIN_CREDENTIALS"}}).to_string(),
        )
        .create_async()
        .await;

    let client = client(&server);
    let err = client.sign_in("alice@example.com", "wrong").await.unwrap_err();
    mock.assert_async().await;

    assert!(matches!(err, CookbookError::Auth(AuthError::InvalidCredentials)));
    assert!(client.current_session().is_none());
}

#[tokio::test]
async fn test_sign_up_email_exists() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/v1/accounts:signUp")
        .match_query(Matcher::Any)
        .with_status(400)
        .with_body(json!({"error": {"code": 400, "message": "EMAIL_EXISTS"}}).to_string())
        .create_async()
        .await;

    let err = client(&server)
        .register("alice@example.com", "secret1")
        .await
        .unwrap_err();

    match err {
        CookbookError::Auth(AuthError::EmailExists(email)) => assert_eq!(email, "alice@example.com"),
        other => panic!("unexpected {other:?}"),
    }
}

#[tokio::test]
async fn test_malformed_success_body() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/v1/accounts:signInWithPassword")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body("{\"unexpected\": true}")
        .create_async()
        .await;

    let err = client(&server)
        .sign_in("alice@example.com", "secret1")
        .await
        .unwrap_err();
    assert!(matches!(err, CookbookError::Auth(AuthError::InvalidResponse(_))));
}

#[tokio::test]
async fn test_sign_out_publishes_none() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/v1/accounts:signInWithPassword")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(json!({"localId": "uid-bob", "idToken": "t"}).to_string())
        .create_async()
        .await;

    let client = client(&server);
    client.sign_in("bob@example.com", "secret1").await.unwrap();
    assert_eq!(client.current_session().unwrap().email, "bob@example.com");

    client.sign_out().await.unwrap();
    assert!(client.current_session().is_none());
}

#[tokio::test]
async fn test_delete_account_sends_id_token() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/v1/accounts:signInWithPassword")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(json!({"localId": "uid-carol", "idToken": "carol-token"}).to_string())
        .create_async()
        .await;
    let delete = server
        .mock("POST", "/v1/accounts:delete")
        .match_query(Matcher::UrlEncoded("key".into(), "AIza-test".into()))
        .match_body(Matcher::Json(json!({"idToken": "carol-token"})))
        .with_status(200)
        .with_body("{}")
        .create_async()
        .await;

    let client = client(&server);

    // Nothing to delete while signed out
    client.delete_account().await.unwrap();

    client.sign_in("carol@example.com", "secret1").await.unwrap();
    client.delete_account().await.unwrap();
    delete.assert_async().await;
    assert!(client.current_session().is_none());
}
