use std::sync::Arc;

use crate::api::ApiClient;
use crate::storage::sqlite::Sqlite;
use crate::storage::{ArcStorage, TOKEN_KEY};

use super::*;

async fn setup_session(server: &mockito::ServerGuard, token: Option<&str>) -> Session {
    let storage: ArcStorage = Arc::new(Sqlite::new(None).await.unwrap());
    if let Some(token) = token {
        storage.set(TOKEN_KEY, token).await.unwrap();
    }
    let mut session = Session::new(
        ApiClient::new(format!("{}/api", server.url())),
        storage,
    );
    session.restore().await.unwrap();
    session
}

async fn mock_me(server: &mut mockito::ServerGuard, must_change_password: bool) -> mockito::Mock {
    server
        .mock("GET", "/api/auth/me")
        .with_status(200)
        .with_body(format!(
            r#"{{"id":1,"username":"admin","is_admin":true,"enabled":true,"must_change_password":{}}}"#,
            must_change_password
        ))
        .create_async()
        .await
}

#[test]
fn test_parse_routes() {
    assert_eq!("/".parse::<Route>().unwrap(), Route::Home);
    assert_eq!("".parse::<Route>().unwrap(), Route::Home);
    assert_eq!(
        "/chat/abc-123".parse::<Route>().unwrap(),
        Route::Chat("abc-123".to_string())
    );
    assert_eq!(
        "/chat/abc/?x=1".parse::<Route>().unwrap(),
        Route::Chat("abc".to_string())
    );
    assert_eq!("/settings".parse::<Route>().unwrap(), Route::Settings);
    assert_eq!("/login".parse::<Route>().unwrap(), Route::Login);
    assert_eq!(
        "/reset-password".parse::<Route>().unwrap(),
        Route::ResetPassword
    );

    assert!("/chat/".parse::<Route>().is_err());
    assert!("/chat/a/b".parse::<Route>().is_err());
    assert!("/admin".parse::<Route>().is_err());
}

#[test]
fn test_route_path() {
    for route in [
        Route::Home,
        Route::Chat("42".to_string()),
        Route::Settings,
        Route::Login,
        Route::ResetPassword,
    ] {
        assert_eq!(route.path().parse::<Route>().unwrap(), route);
    }
    assert_eq!(Route::Chat("42".to_string()).to_string(), "/chat/42");
    assert_eq!(Route::Chat("42".to_string()).conversation_id(), Some("42"));
    assert_eq!(Route::ResetPassword.name(), "reset-password");
}

#[tokio::test]
async fn test_guard_without_token_redirects_to_login() {
    let server = mockito::Server::new_async().await;
    let mut session = setup_session(&server, None).await;

    assert_eq!(guard(&mut session, Route::Home).await.unwrap(), Route::Login);
    assert_eq!(
        guard(&mut session, Route::Login).await.unwrap(),
        Route::Login
    );
}

#[tokio::test]
async fn test_guard_restores_session() {
    let mut server = mockito::Server::new_async().await;
    let me = mock_me(&mut server, false).await;
    let mut session = setup_session(&server, Some("jwt")).await;

    let chat = Route::Chat("abc".to_string());
    assert_eq!(guard(&mut session, chat.clone()).await.unwrap(), chat);
    assert_eq!(guard(&mut session, Route::Login).await.unwrap(), Route::Home);
    me.assert_async().await;
}

#[tokio::test]
async fn test_guard_forces_password_reset() {
    let mut server = mockito::Server::new_async().await;
    mock_me(&mut server, true).await;
    let mut session = setup_session(&server, Some("jwt")).await;

    assert_eq!(
        guard(&mut session, Route::Settings).await.unwrap(),
        Route::ResetPassword
    );
    assert_eq!(
        guard(&mut session, Route::ResetPassword).await.unwrap(),
        Route::ResetPassword
    );
    // Login stays reachable while the change is pending
    assert_eq!(guard(&mut session, Route::Login).await.unwrap(), Route::Login);
}

#[tokio::test]
async fn test_guard_invalid_token() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/api/auth/me")
        .with_status(401)
        .create_async()
        .await;
    let mut session = setup_session(&server, Some("bad")).await;

    assert_eq!(
        guard(&mut session, Route::Settings).await.unwrap(),
        Route::Login
    );
    assert_eq!(session.token(), None);
}
