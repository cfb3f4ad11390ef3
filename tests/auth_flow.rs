//! Tests de integración del guardia de sesión contra un mock del API
//! de autenticación levantado en proceso.

use std::time::Duration;

use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};

use vapelife_storefront::utils::constants::{KEY_ACCESS_TOKEN, KEY_LOGIN_TIME, KEY_TOKEN_TYPE};
use vapelife_storefront::{AuthService, AuthStatus, FileStore, MemoryStore, SessionStore};

async fn login_handler(Json(body): Json<Value>) -> Response {
    if body["username"] == "admin" && body["password"] == "secret" {
        Json(json!({ "access_token": "tok-123", "token_type": "bearer" })).into_response()
    } else {
        (StatusCode::UNAUTHORIZED, "Invalid credentials").into_response()
    }
}

async fn me_handler(headers: HeaderMap) -> Response {
    let auth = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");

    match auth {
        "Bearer tok-123" => Json(json!({
            "id": 1,
            "username": "admin",
            "email": "admin@vapelife.shop",
            "is_active": 1,
            "created_at": "2024-01-01T00:00:00Z",
        }))
        .into_response(),
        // Token que simula un backend colgado
        "Bearer slow-tok" => {
            tokio::time::sleep(Duration::from_secs(5)).await;
            StatusCode::OK.into_response()
        }
        // Token que simula un fallo del servidor
        "Bearer err-tok" => (StatusCode::INTERNAL_SERVER_ERROR, "boom").into_response(),
        _ => (StatusCode::UNAUTHORIZED, "Invalid token").into_response(),
    }
}

/// Levanta el mock del API de auth en un puerto aleatorio
async fn spawn_mock_api() -> String {
    let app = Router::new()
        .route("/api/auth/login", post(login_handler))
        .route("/api/auth/me", get(me_handler));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind");
    let addr = listener.local_addr().expect("Failed to get addr");

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{}", addr)
}

fn assert_store_empty(store: &impl SessionStore) {
    assert_eq!(store.get(KEY_ACCESS_TOKEN), None);
    assert_eq!(store.get(KEY_TOKEN_TYPE), None);
    assert_eq!(store.get(KEY_LOGIN_TIME), None);
}

#[tokio::test]
async fn login_success_persists_session() {
    let base_url = spawn_mock_api().await;
    let service = AuthService::with_base_url(MemoryStore::new(), &base_url);

    assert!(service.login("admin", "secret").await);
    assert!(service.is_authenticated());

    assert_eq!(service.store().get(KEY_ACCESS_TOKEN), Some("tok-123".to_string()));
    assert_eq!(service.store().get(KEY_TOKEN_TYPE), Some("bearer".to_string()));
    assert!(service.store().get(KEY_LOGIN_TIME).is_some());
    assert_eq!(service.access_token(), Some("tok-123".to_string()));
}

#[tokio::test]
async fn login_wrong_password_leaves_store_untouched() {
    let base_url = spawn_mock_api().await;
    let service = AuthService::with_base_url(MemoryStore::new(), &base_url);

    assert!(!service.login("admin", "wrong").await);
    assert!(!service.is_authenticated());
    assert_store_empty(service.store());
}

#[tokio::test]
async fn login_against_unreachable_backend_fails_cleanly() {
    // Puerto reservado: la conexión falla en el transporte
    let service = AuthService::with_base_url(MemoryStore::new(), "http://127.0.0.1:1");

    assert!(!service.login("admin", "secret").await);
    assert_store_empty(service.store());
}

#[tokio::test]
async fn logout_clears_session() {
    let base_url = spawn_mock_api().await;
    let service = AuthService::with_base_url(MemoryStore::new(), &base_url);

    assert!(service.login("admin", "secret").await);
    service.logout();

    assert!(!service.is_authenticated());
    assert_store_empty(service.store());
}

#[tokio::test]
async fn current_user_returns_profile_with_valid_token() {
    let base_url = spawn_mock_api().await;
    let service = AuthService::with_base_url(MemoryStore::new(), &base_url);

    assert!(service.login("admin", "secret").await);

    match service.current_user().await {
        AuthStatus::Authenticated(user) => {
            assert_eq!(user.username, "admin");
            assert_eq!(user.is_active, 1);
        }
        other => panic!("esperaba Authenticated, fue {:?}", other),
    }
}

#[tokio::test]
async fn rejected_token_forces_logout() {
    let base_url = spawn_mock_api().await;
    let store = MemoryStore::new();
    // Sesión con un token que el backend ya no reconoce
    store.set(KEY_ACCESS_TOKEN, "stale-tok").unwrap();
    store.set(KEY_TOKEN_TYPE, "bearer").unwrap();
    store
        .set(KEY_LOGIN_TIME, &chrono::Utc::now().timestamp_millis().to_string())
        .unwrap();
    let service = AuthService::with_base_url(store, &base_url);

    assert_eq!(service.current_user().await, AuthStatus::Unauthenticated);

    // El 401 deja la sesión cerrada de forma observable
    assert!(!service.is_authenticated());
    assert_store_empty(service.store());
}

#[tokio::test]
async fn server_error_is_transient_and_keeps_session() {
    let base_url = spawn_mock_api().await;
    let store = MemoryStore::new();
    store.set(KEY_ACCESS_TOKEN, "err-tok").unwrap();
    store
        .set(KEY_LOGIN_TIME, &chrono::Utc::now().timestamp_millis().to_string())
        .unwrap();
    let service = AuthService::with_base_url(store, &base_url);

    match service.current_user().await {
        AuthStatus::TransientError(message) => assert!(message.contains("500")),
        other => panic!("esperaba TransientError, fue {:?}", other),
    }
    // Un fallo transitorio no cierra la sesión
    assert!(service.is_authenticated());
}

#[tokio::test]
async fn timed_out_request_is_transient_and_keeps_session() {
    let base_url = spawn_mock_api().await;
    let store = MemoryStore::new();
    store.set(KEY_ACCESS_TOKEN, "slow-tok").unwrap();
    store
        .set(KEY_LOGIN_TIME, &chrono::Utc::now().timestamp_millis().to_string())
        .unwrap();
    // Timeout acortado para no esperar los 10 segundos de producción
    let service = AuthService::with_base_url(store, &base_url)
        .with_user_timeout(Duration::from_millis(200));

    match service.current_user().await {
        AuthStatus::TransientError(_) => {}
        other => panic!("esperaba TransientError, fue {:?}", other),
    }
    assert!(service.is_authenticated());
}

#[tokio::test]
async fn current_user_without_session_is_unauthenticated() {
    let base_url = spawn_mock_api().await;
    let service = AuthService::with_base_url(MemoryStore::new(), &base_url);

    assert_eq!(service.current_user().await, AuthStatus::Unauthenticated);
}

#[tokio::test]
async fn file_store_session_survives_restart() {
    let base_url = spawn_mock_api().await;
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.json");

    let service = AuthService::with_base_url(FileStore::open(&path), &base_url);
    assert!(service.login("admin", "secret").await);
    drop(service);

    // Reapertura simula un reinicio del proceso
    let reopened = AuthService::with_base_url(FileStore::open(&path), &base_url);
    assert!(reopened.is_authenticated());
    assert_eq!(reopened.access_token(), Some("tok-123".to_string()));
}
