//! 会话存储集成测试
//!
//! 验证加密凭证存储与偏好存储的落盘行为:
//! - 令牌不以明文落盘
//! - 同一密钥重新打开可恢复
//! - 错误密钥 / 损坏文件以 StorageError 报告
//! - 清除会话的两种策略 (记住我 / 不记住)

use std::path::Path;
use std::sync::Arc;

use futures::{Stream, StreamExt};
use saborlocal_client::models::{StorageError, User, DEFAULT_ROLE};
use saborlocal_client::services::credential_store::{ENCRYPTED_STORE_NAME, MASTER_KEY_NAME};
use saborlocal_client::services::preference_store::{AVATAR_STORE_NAME, SESSION_STORE_NAME};
use saborlocal_client::services::{CredentialStore, MasterKey, PreferenceStore, SessionManager};

const TOKEN: &str = "eyJhbGciOiJIUzI1NiJ9.secret-payload.signature";

fn ana() -> User {
    User::new(
        "u_ana".to_string(),
        Some("Ana".to_string()),
        "ana@example.com".to_string(),
        "CLIENTE".to_string(),
    )
}

/// 流的当前值
async fn current<S: Stream>(stream: S) -> S::Item {
    Box::pin(stream)
        .next()
        .await
        .expect("store streams emit the current value first")
}

async fn open_session(dir: &Path) -> SessionManager {
    let credentials = Arc::new(CredentialStore::open_in(dir).unwrap());
    let preferences = PreferenceStore::open(dir.join(SESSION_STORE_NAME))
        .await
        .unwrap();
    let avatar = PreferenceStore::open(dir.join(AVATAR_STORE_NAME))
        .await
        .unwrap();
    SessionManager::new(credentials, preferences, avatar)
}

#[test]
fn test_encrypted_file_never_contains_plaintext_token() {
    let dir = tempfile::tempdir().unwrap();
    let store = CredentialStore::open_in(dir.path()).unwrap();
    store.save_token(TOKEN, &ana()).unwrap();

    let raw = std::fs::read(dir.path().join(ENCRYPTED_STORE_NAME)).unwrap();
    let text = String::from_utf8_lossy(&raw);
    assert!(!text.contains(TOKEN));
    assert!(!text.contains("ana@example.com"));
    assert!(dir.path().join(MASTER_KEY_NAME).exists());
}

#[test]
fn test_reopen_with_same_key_restores_record() {
    let dir = tempfile::tempdir().unwrap();
    {
        let store = CredentialStore::open_in(dir.path()).unwrap();
        store.save_token(TOKEN, &ana()).unwrap();
    }

    let reopened = CredentialStore::open_in(dir.path()).unwrap();
    assert_eq!(reopened.get_token().as_deref(), Some(TOKEN));
    assert_eq!(reopened.get_current_user(), Some(ana()));
}

#[test]
fn test_wrong_key_is_storage_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(ENCRYPTED_STORE_NAME);
    {
        let store = CredentialStore::open(path.clone(), &MasterKey::generate()).unwrap();
        store.save_token(TOKEN, &ana()).unwrap();
    }

    let result = CredentialStore::open(path, &MasterKey::generate());
    assert!(matches!(result, Err(StorageError::CryptoFailed(_))));
}

#[test]
fn test_corrupt_file_is_storage_error() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join(ENCRYPTED_STORE_NAME), b"not json at all").unwrap();

    let result = CredentialStore::open_in(dir.path());
    assert!(matches!(result, Err(StorageError::SerializationError(_))));
}

#[test]
fn test_clear_token_then_get_token_is_none() {
    let dir = tempfile::tempdir().unwrap();
    let store = CredentialStore::open_in(dir.path()).unwrap();
    store.save_token(TOKEN, &ana()).unwrap();
    store.clear_token().unwrap();
    assert!(store.get_token().is_none());

    let reopened = CredentialStore::open_in(dir.path()).unwrap();
    assert!(reopened.get_token().is_none());
    assert!(reopened.get_current_user().is_none());
}

#[tokio::test]
async fn test_session_survives_restart() {
    let dir = tempfile::tempdir().unwrap();
    {
        let session = open_session(dir.path()).await;
        session
            .save_user_session("u_ana", "ana@example.com", "Ana", TOKEN, true, "PRODUCTOR")
            .await
            .unwrap();
        session.save_theme_mode("dark").await.unwrap();
    }

    let session = open_session(dir.path()).await;
    let restored = current(session.user_session()).await.unwrap();
    assert_eq!(restored.user_id, "u_ana");
    assert_eq!(restored.email, "ana@example.com");
    assert_eq!(restored.name, "Ana");
    assert_eq!(restored.role, "PRODUCTOR");
    assert!(restored.remember_me);
    assert_eq!(session.current_theme_mode(), "dark");
    assert_eq!(session.get_auth_token().as_deref(), Some(TOKEN));
}

#[tokio::test]
async fn test_preference_file_holds_no_credentials() {
    let dir = tempfile::tempdir().unwrap();
    let session = open_session(dir.path()).await;
    session
        .save_user_session("u_ana", "ana@example.com", "Ana", TOKEN, false, "CLIENTE")
        .await
        .unwrap();

    let prefs = std::fs::read_to_string(dir.path().join(SESSION_STORE_NAME)).unwrap();
    assert!(!prefs.contains(TOKEN));
    assert!(!prefs.contains("ana@example.com"));
    assert!(prefs.contains("is_logged_in"));
}

#[tokio::test]
async fn test_clear_session_without_remember_me() {
    let dir = tempfile::tempdir().unwrap();
    let session = open_session(dir.path()).await;
    session.save_theme_mode("dark").await.unwrap();
    session
        .save_user_session("u_ana", "ana@example.com", "Ana", TOKEN, false, "CLIENTE")
        .await
        .unwrap();

    session.clear_session().await.unwrap();

    assert!(session.preferences_snapshot().is_empty());
    assert!(!current(session.is_logged_in()).await);
    assert!(current(session.user_session()).await.is_none());
    assert_eq!(current(session.theme_mode()).await, "system");
    assert!(session.get_auth_token().is_none());
}

#[tokio::test]
async fn test_clear_session_with_remember_me() {
    let dir = tempfile::tempdir().unwrap();
    let session = open_session(dir.path()).await;
    session
        .save_user_session("u_ana", "ana@example.com", "Ana", TOKEN, true, "CLIENTE")
        .await
        .unwrap();

    session.clear_session().await.unwrap();

    assert!(!current(session.is_logged_in()).await);
    assert!(session.remember_me());
    assert!(session.current_user().is_none());
    assert!(!session.is_authenticated());
}

#[tokio::test]
async fn test_user_session_stream_follows_login_and_logout() {
    let session = SessionManager::in_memory();
    let mut stream = Box::pin(session.user_session());
    assert_eq!(stream.next().await, Some(None));

    session
        .save_user_session("u1", "a@b.cl", "", TOKEN, false, DEFAULT_ROLE)
        .await
        .unwrap();

    // 两个存储各自广播,取最后一次组合
    let mut latest = None;
    while let Ok(Some(value)) =
        tokio::time::timeout(std::time::Duration::from_millis(50), stream.next()).await
    {
        latest = value;
    }
    let logged_in = latest.expect("session should be visible after login");
    assert_eq!(logged_in.user_id, "u1");
    assert_eq!(logged_in.name, "");

    session.clear_session().await.unwrap();
    let mut after = Some(logged_in);
    while let Ok(Some(value)) =
        tokio::time::timeout(std::time::Duration::from_millis(50), stream.next()).await
    {
        after = value;
    }
    assert!(after.is_none());
}

#[tokio::test]
async fn test_token_without_identity_is_not_a_user() {
    let session = SessionManager::in_memory();
    session.save_auth_token(TOKEN).await.unwrap();

    assert!(session.is_authenticated());
    assert!(session.current_user().is_none());
    assert!(session.current_role().is_none());
}
