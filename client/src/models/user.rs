use serde::{Deserialize, Serialize};

/// 默认角色
///
/// 会话字段缺失时回退为普通客户
pub const DEFAULT_ROLE: &str = "CLIENTE";

/// 已认证用户
///
/// 来源有二: 登录/注册/个人资料接口的响应,或加密凭证存储的快照。
/// 后者只恢复 `id`、`nombre`、`email`、`role`,其余联系字段为 `None`。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,

    /// 部分后端用户没有姓名
    pub nombre: Option<String>,

    pub email: String,

    /// CLIENTE / PRODUCTOR / ADMIN / REPARTIDOR
    pub role: String,

    pub telefono: Option<String>,
    pub ubicacion: Option<String>,
    pub direccion: Option<String>,
}

impl User {
    /// 仅含身份字段的最小用户
    pub fn new(id: String, nombre: Option<String>, email: String, role: String) -> Self {
        Self {
            id,
            nombre,
            email,
            role,
            telefono: None,
            ubicacion: None,
            direccion: None,
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role.eq_ignore_ascii_case("ADMIN")
    }

    pub fn is_productor(&self) -> bool {
        self.role.eq_ignore_ascii_case("PRODUCTOR")
    }
}

/// 本地缓存的会话快照
///
/// 由 `SessionManager::user_session` 推送,字段逐个回退默认值,
/// 与 `User` 的全有或全无规则不同。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSession {
    pub user_id: String,
    pub email: String,
    pub name: String,
    pub remember_me: bool,
    pub role: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_helpers_ignore_case() {
        let admin = User::new("u1".into(), None, "a@b.cl".into(), "admin".into());
        assert!(admin.is_admin());
        assert!(!admin.is_productor());

        let productor = User::new("u2".into(), None, "p@b.cl".into(), "PRODUCTOR".into());
        assert!(productor.is_productor());
    }
}
