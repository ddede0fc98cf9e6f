//! 会话管理器
//!
//! 职责: 组合加密凭证存储与偏好存储,对外提供统一的会话视图
//! 策略: 令牌与身份只存加密存储;偏好存储只保留登录标志、记住我、主题

use std::sync::Arc;

use futures::stream::{Stream, StreamExt};

use crate::models::{StorageError, User, UserSession, DEFAULT_ROLE};
use crate::services::credential_store::{CredentialRecord, CredentialStore};
use crate::services::preference_store::{PrefKey, PreferenceStore, Preferences};
use crate::utils::watch_stream::watch_pair_stream;

const KEY_IS_LOGGED_IN: PrefKey<bool> = PrefKey::new("is_logged_in");
const KEY_REMEMBER_ME: PrefKey<bool> = PrefKey::new("remember_me");
const KEY_THEME_MODE: PrefKey<String> = PrefKey::new("theme_mode");
const KEY_AVATAR_URI: PrefKey<String> = PrefKey::new("avatar_uri");

/// 默认主题: 跟随系统
pub const DEFAULT_THEME_MODE: &str = "system";

/// 会话管理器
///
/// 两个存储之间没有事务: 中途失败时可能短暂不一致,不做修复
pub struct SessionManager {
    credentials: Arc<CredentialStore>,
    preferences: PreferenceStore,

    /// 头像单独存放,退出登录不清除
    avatar: PreferenceStore,
}

impl SessionManager {
    /// 创建新的会话管理器
    pub fn new(
        credentials: Arc<CredentialStore>,
        preferences: PreferenceStore,
        avatar: PreferenceStore,
    ) -> Self {
        Self {
            credentials,
            preferences,
            avatar,
        }
    }

    /// 纯内存会话 (测试用)
    pub fn in_memory() -> Self {
        Self::new(
            Arc::new(CredentialStore::in_memory()),
            PreferenceStore::in_memory(),
            PreferenceStore::in_memory(),
        )
    }

    pub fn credentials(&self) -> Arc<CredentialStore> {
        Arc::clone(&self.credentials)
    }

    /// 保存登录会话
    ///
    /// # 副作用
    /// - 令牌与身份写入加密存储
    /// - `is_logged_in = true`、`remember_me` 写入偏好存储
    pub async fn save_user_session(
        &self,
        user_id: &str,
        email: &str,
        name: &str,
        token: &str,
        remember_me: bool,
        role: &str,
    ) -> Result<(), StorageError> {
        let nombre = if name.is_empty() {
            None
        } else {
            Some(name.to_string())
        };
        let user = User::new(
            user_id.to_string(),
            nombre,
            email.to_string(),
            role.to_string(),
        );
        self.credentials.save_token(token, &user)?;

        self.preferences
            .edit(|prefs| {
                prefs.set(KEY_IS_LOGGED_IN, true);
                prefs.set(KEY_REMEMBER_ME, remember_me);
            })
            .await?;

        tracing::info!(
            user_id = %user_id,
            role = %role,
            remember_me = remember_me,
            "User session saved"
        );
        Ok(())
    }

    /// 登录标志流,缺省为 false
    pub fn is_logged_in(&self) -> impl Stream<Item = bool> + Send + 'static {
        self.preferences
            .observe(KEY_IS_LOGGED_IN)
            .map(|flag| flag.unwrap_or(false))
    }

    /// 会话快照流
    ///
    /// 登录标志为 true 时推送 `Some`,各字段单独回退默认值
    pub fn user_session(&self) -> impl Stream<Item = Option<UserSession>> + Send + 'static {
        watch_pair_stream(self.preferences.subscribe(), self.credentials.subscribe())
            .map(|(prefs, record)| session_from(&prefs, record))
    }

    /// 只替换令牌
    pub async fn save_auth_token(&self, token: &str) -> Result<(), StorageError> {
        self.credentials.update_token(token)
    }

    pub fn get_auth_token(&self) -> Option<String> {
        self.credentials.get_token()
    }

    /// 刷新身份 (个人资料接口返回后调用)
    pub fn update_user_data(&self, user: &User) -> Result<(), StorageError> {
        self.credentials.update_user_data(user)
    }

    /// 清除会话
    ///
    /// - 移除令牌与身份,登录标志置为 false
    /// - 未勾选"记住我"时清空整个偏好存储 (包括主题)
    pub async fn clear_session(&self) -> Result<(), StorageError> {
        self.credentials.clear_token()?;

        let prefs = self
            .preferences
            .edit(|prefs| {
                prefs.set(KEY_IS_LOGGED_IN, false);
                if prefs.get(KEY_REMEMBER_ME) != Some(true) {
                    prefs.clear();
                }
            })
            .await?;

        tracing::info!(
            remembered = prefs.get(KEY_REMEMBER_ME).unwrap_or(false),
            "User session cleared"
        );
        Ok(())
    }

    pub async fn save_theme_mode(&self, mode: &str) -> Result<(), StorageError> {
        let mode = mode.to_string();
        self.preferences
            .edit(move |prefs| prefs.set(KEY_THEME_MODE, mode))
            .await?;
        Ok(())
    }

    /// 主题流,缺省为 `system`
    pub fn theme_mode(&self) -> impl Stream<Item = String> + Send + 'static {
        self.preferences
            .observe(KEY_THEME_MODE)
            .map(|mode| mode.unwrap_or_else(|| DEFAULT_THEME_MODE.to_string()))
    }

    pub fn current_theme_mode(&self) -> String {
        self.preferences
            .snapshot()
            .get(KEY_THEME_MODE)
            .unwrap_or_else(|| DEFAULT_THEME_MODE.to_string())
    }

    pub fn remember_me(&self) -> bool {
        self.preferences
            .snapshot()
            .get(KEY_REMEMBER_ME)
            .unwrap_or(false)
    }

    /// 偏好存储的当前快照
    pub fn preferences_snapshot(&self) -> Preferences {
        self.preferences.snapshot()
    }

    // ---- 同步快照访问 ----

    pub fn current_user(&self) -> Option<User> {
        self.credentials.get_current_user()
    }

    pub fn current_role(&self) -> Option<String> {
        self.credentials.record().user_role
    }

    pub fn token(&self) -> Option<String> {
        self.credentials.get_token()
    }

    pub fn is_authenticated(&self) -> bool {
        self.credentials.is_logged_in()
    }

    // ---- 头像 ----

    /// 保存头像URI,`None` 等同于清除
    pub async fn save_avatar_uri(&self, uri: Option<&str>) -> Result<(), StorageError> {
        let uri = uri.map(str::to_string);
        self.avatar
            .edit(move |prefs| match uri {
                Some(uri) => prefs.set(KEY_AVATAR_URI, uri),
                None => prefs.remove(KEY_AVATAR_URI),
            })
            .await?;
        Ok(())
    }

    pub fn avatar_uri(&self) -> impl Stream<Item = Option<String>> + Send + 'static {
        self.avatar.observe(KEY_AVATAR_URI)
    }

    pub async fn clear_avatar_uri(&self) -> Result<(), StorageError> {
        self.save_avatar_uri(None).await
    }
}

fn session_from(prefs: &Preferences, record: CredentialRecord) -> Option<UserSession> {
    if prefs.get(KEY_IS_LOGGED_IN) != Some(true) {
        return None;
    }
    Some(UserSession {
        user_id: record.user_id.unwrap_or_default(),
        email: record.user_email.unwrap_or_default(),
        name: record.user_name.unwrap_or_default(),
        remember_me: prefs.get(KEY_REMEMBER_ME).unwrap_or(false),
        role: record.user_role.unwrap_or_else(|| DEFAULT_ROLE.to_string()),
    })
}
