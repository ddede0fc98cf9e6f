//! 认证仓库契约测试
//!
//! 使用 wiremock 模拟后端,验证:
//! - 成功登录写入会话,后续请求携带 Bearer 令牌
//! - 状态码翻译为固定提示
//! - 信封 success=false 时使用后端 message
//! - 输入校验失败时不发起请求
//! - 管理员创建生产者不影响当前会话

mod common;

use std::path::PathBuf;
use std::sync::Arc;

use common::{auth_json, failed_envelope, in_memory_state, ok_envelope, user_json};
use saborlocal_client::dto::{CreateProductorUserRequest, RegisterRequest};
use saborlocal_client::models::{ApiError, ApiResult};
use saborlocal_client::services::SessionManager;
use saborlocal_client::{AppConfig, AppState};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn mount_login_ok(server: &MockServer, token: &str, role: &str) {
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(ok_envelope(auth_json(token, "u1", "ana@example.com", role))),
        )
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_login_success_saves_session() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .and(body_json(json!({"email": "ana@example.com", "password": "secreto1"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(ok_envelope(auth_json(
            "jwt.login",
            "u1",
            "ana@example.com",
            "PRODUCTOR",
        ))))
        .expect(1)
        .mount(&server)
        .await;

    let state = in_memory_state(&server);
    let result = state.auth.login(" ana@example.com ", "secreto1", true).await;

    let user = result.data().expect("login should succeed");
    assert_eq!(user.id, "u1");
    assert_eq!(user.nombre.as_deref(), Some("Ana Pérez"));
    assert_eq!(user.telefono.as_deref(), Some("+56 9 1234 5678"));

    assert!(state.auth.is_logged_in());
    assert_eq!(state.auth.token().as_deref(), Some("jwt.login"));
    assert_eq!(state.session.current_role().as_deref(), Some("PRODUCTOR"));
    assert!(state.session.remember_me());
}

#[tokio::test]
async fn test_requests_after_login_carry_bearer_token() {
    let server = MockServer::start().await;
    mount_login_ok(&server, "jwt.bearer", "ADMIN").await;
    Mock::given(method("GET"))
        .and(path("/api/auth/users"))
        .and(header("authorization", "Bearer jwt.bearer"))
        .respond_with(ResponseTemplate::new(200).set_body_json(ok_envelope(json!([
            user_json("u1", "ana@example.com", "ADMIN"),
            {"_id": "u2", "email": "luis@example.com", "role": "CLIENTE"}
        ]))))
        .expect(1)
        .mount(&server)
        .await;

    let state = in_memory_state(&server);
    assert!(state.auth.login("ana@example.com", "secreto1", false).await.is_success());

    let users = state.auth.get_all_users().await;
    let users = users.data().expect("admin can list users");
    assert_eq!(users.len(), 2);
    assert!(users[1].nombre.is_none());
}

#[tokio::test]
async fn test_anonymous_requests_have_no_authorization_header() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/auth/profile"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let state = in_memory_state(&server);
    let result = state.auth.get_profile().await;
    assert_eq!(result.error_message(), Some("Sesión expirada"));

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert!(requests[0].headers.get("authorization").is_none());
}

#[tokio::test]
async fn test_login_status_messages() {
    for (status, expected) in [
        (401, "Credenciales inválidas"),
        (404, "Usuario no encontrado"),
        (500, "Error HTTP 500"),
    ] {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/auth/login"))
            .respond_with(ResponseTemplate::new(status))
            .mount(&server)
            .await;

        let state = in_memory_state(&server);
        let result = state.auth.login("ana@example.com", "secreto1", false).await;

        match result {
            ApiResult::Error { message, cause } => {
                assert_eq!(message, expected);
                match cause {
                    Some(ApiError::HttpStatusError { status: got, .. }) => assert_eq!(got, status),
                    other => panic!("Expected HttpStatusError, got {:?}", other),
                }
            }
            other => panic!("Expected Error, got {:?}", other),
        }
        assert!(!state.auth.is_logged_in());
    }
}

#[tokio::test]
async fn test_login_business_failure_uses_backend_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(failed_envelope("Cuenta bloqueada")))
        .mount(&server)
        .await;

    let state = in_memory_state(&server);
    let result = state.auth.login("ana@example.com", "secreto1", false).await;
    assert_eq!(result.error_message(), Some("Cuenta bloqueada"));
}

#[tokio::test]
async fn test_login_without_data_falls_back_to_default_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
        .mount(&server)
        .await;

    let state = in_memory_state(&server);
    let result = state.auth.login("ana@example.com", "secreto1", false).await;
    assert_eq!(result.error_message(), Some("Error en login"));
}

#[tokio::test]
async fn test_invalid_input_is_rejected_before_request() {
    let server = MockServer::start().await;
    let state = in_memory_state(&server);

    let result = state.auth.login("no-es-un-email", "secreto1", false).await;
    assert_eq!(result.error_message(), Some("El formato del email no es válido"));

    let mut request = RegisterRequest::cliente(
        "luis@example.com".to_string(),
        "123".to_string(),
        "Luis".to_string(),
    );
    let result = state.auth.register(request.clone()).await;
    assert!(result.is_error());

    request.password = "secreto1".to_string();
    request.role = "PRODUCTOR".to_string();
    let result = state.auth.register(request).await;
    assert_eq!(
        result.error_message(),
        Some("El nombre del negocio es obligatorio para productores")
    );

    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_register_conflict_and_success() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/register"))
        .respond_with(ResponseTemplate::new(409))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/auth/register"))
        .respond_with(ResponseTemplate::new(201).set_body_json(ok_envelope(auth_json(
            "jwt.new",
            "u9",
            "luis@example.com",
            "CLIENTE",
        ))))
        .mount(&server)
        .await;

    let state = in_memory_state(&server);
    let request = RegisterRequest::cliente(
        "luis@example.com".to_string(),
        "secreto1".to_string(),
        "Luis".to_string(),
    );

    let conflict = state.auth.register(request.clone()).await;
    assert_eq!(conflict.error_message(), Some("El email ya está registrado"));

    let created = state.auth.register(request).await;
    assert_eq!(created.data().map(|u| u.id.as_str()), Some("u9"));
    assert_eq!(state.auth.token().as_deref(), Some("jwt.new"));
    assert!(!state.session.remember_me());
}

#[tokio::test]
async fn test_create_productor_user_keeps_admin_session() {
    let server = MockServer::start().await;
    mount_login_ok(&server, "jwt.admin", "ADMIN").await;
    Mock::given(method("POST"))
        .and(path("/api/auth/create-productor"))
        .and(header("authorization", "Bearer jwt.admin"))
        .respond_with(ResponseTemplate::new(201).set_body_json(ok_envelope(auth_json(
            "jwt.productor",
            "u_prod",
            "quesos@example.com",
            "PRODUCTOR",
        ))))
        .expect(1)
        .mount(&server)
        .await;

    let state = in_memory_state(&server);
    assert!(state.auth.login("ana@example.com", "secreto1", false).await.is_success());

    let result = state
        .auth
        .create_productor_user(CreateProductorUserRequest {
            nombre: "Quesos del Valle".to_string(),
            email: "quesos@example.com".to_string(),
            password: "secreto1".to_string(),
            ubicacion: "Valdivia".to_string(),
            telefono: "+56 9 8765 4321".to_string(),
        })
        .await;

    assert_eq!(result.data().map(|u| u.role.as_str()), Some("PRODUCTOR"));
    assert_eq!(state.auth.token().as_deref(), Some("jwt.admin"));
    assert_eq!(state.auth.current_user().unwrap().id, "u1");
}

#[tokio::test]
async fn test_create_productor_user_forbidden() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/create-productor"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;

    let state = in_memory_state(&server);
    let result = state
        .auth
        .create_productor_user(CreateProductorUserRequest {
            nombre: "Quesos del Valle".to_string(),
            email: "quesos@example.com".to_string(),
            password: "secreto1".to_string(),
            ubicacion: "Valdivia".to_string(),
            telefono: "+56 9 8765 4321".to_string(),
        })
        .await;

    assert_eq!(
        result.error_message(),
        Some("No tienes permisos para crear productores (requiere rol ADMIN)")
    );
}

#[tokio::test]
async fn test_get_profile_refreshes_stored_identity() {
    let server = MockServer::start().await;
    mount_login_ok(&server, "jwt.login", "CLIENTE").await;
    Mock::given(method("GET"))
        .and(path("/api/auth/profile"))
        .respond_with(ResponseTemplate::new(200).set_body_json(ok_envelope(json!({
            "_id": "u1",
            "nombre": "Ana María",
            "email": "ana@example.com",
            "role": "PRODUCTOR"
        }))))
        .mount(&server)
        .await;

    let state = in_memory_state(&server);
    assert!(state.auth.login("ana@example.com", "secreto1", false).await.is_success());

    let profile = state.auth.get_profile().await;
    assert!(profile.is_success());

    let stored = state.auth.current_user().unwrap();
    assert_eq!(stored.nombre.as_deref(), Some("Ana María"));
    assert_eq!(stored.role, "PRODUCTOR");
    assert_eq!(state.auth.token().as_deref(), Some("jwt.login"));
}

#[tokio::test]
async fn test_get_all_users_forbidden() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/auth/users"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;

    let state = in_memory_state(&server);
    let result = state.auth.get_all_users().await;
    assert_eq!(
        result.error_message(),
        Some("No tienes permisos para ver usuarios (requiere rol ADMIN)")
    );
}

#[tokio::test]
async fn test_logout_clears_token() {
    let server = MockServer::start().await;
    mount_login_ok(&server, "jwt.login", "CLIENTE").await;

    let state = in_memory_state(&server);
    assert!(state.auth.login("ana@example.com", "secreto1", false).await.is_success());
    assert!(state.auth.logout().await.is_success());

    assert!(!state.auth.is_logged_in());
    assert!(state.auth.token().is_none());
    assert!(state.auth.current_user().is_none());
}

#[tokio::test]
async fn test_unreachable_backend_is_network_error() {
    let config = AppConfig::new(PathBuf::from("/nonexistent/saborlocal"))
        .with_api_base_url("http://127.0.0.1:9/api/")
        .with_timeouts(1, 2);
    let state = AppState::with_session(config, Arc::new(SessionManager::in_memory())).unwrap();

    let result = state.auth.login("ana@example.com", "secreto1", false).await;
    match result {
        ApiResult::Error { message, cause } => {
            assert!(message.starts_with("Error de red"));
            assert!(matches!(cause, Some(ApiError::NetworkFailed(_))));
        }
        other => panic!("Expected Error, got {:?}", other),
    }
    assert!(!state.auth.is_logged_in());
}
