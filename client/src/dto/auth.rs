use serde::{Deserialize, Serialize};

/// 登录请求
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// 注册请求
///
/// `nombre_negocio` 对 PRODUCTOR 必填,`descripcion` 可选
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,

    /// CLIENTE 或 PRODUCTOR
    pub role: String,

    pub nombre: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub telefono: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub direccion: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nombre_negocio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub descripcion: Option<String>,
}

impl RegisterRequest {
    /// 客户注册的最小请求
    pub fn cliente(email: String, password: String, nombre: String) -> Self {
        Self {
            email,
            password,
            role: "CLIENTE".to_string(),
            nombre,
            telefono: None,
            direccion: None,
            nombre_negocio: None,
            descripcion: None,
        }
    }

    pub fn is_productor(&self) -> bool {
        self.role.eq_ignore_ascii_case("PRODUCTOR")
    }
}

/// 管理员创建生产者账户的请求
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateProductorUserRequest {
    pub nombre: String,
    pub email: String,
    pub password: String,
    pub ubicacion: String,
    pub telefono: String,
}

/// 后端用户
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDto {
    #[serde(rename = "_id")]
    pub id: String,

    /// 部分用户没有姓名
    #[serde(default)]
    pub nombre: Option<String>,

    pub email: String,

    /// CLIENTE, PRODUCTOR, ADMIN
    pub role: String,

    #[serde(default)]
    pub telefono: Option<String>,
    #[serde(default)]
    pub direccion: Option<String>,
    #[serde(default)]
    pub ubicacion: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// 登录/注册成功时的 `data`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthData {
    pub access_token: String,
    pub user: UserDto,
}
