use serde::{Deserialize, Serialize};
use thiserror::Error;

/// API调用相关错误
///
/// 处理与SaborLocal后端交互时的各种失败场景。
/// 仓库层会将其折叠为 `ApiResult::Error`,并作为 cause 保留。
#[derive(Debug, Error, Serialize, Deserialize)]
#[serde(tag = "error", content = "details")]
pub enum ApiError {
    /// 网络请求失败
    ///
    /// 可能原因:
    /// - 网络连接中断
    /// - 后端不可达 (Render实例休眠时较常见)
    /// - DNS解析失败
    #[error("网络请求失败: {0}")]
    NetworkFailed(String),

    /// HTTP状态码错误
    ///
    /// 后端返回了非2xx状态码
    #[error("HTTP错误 {status}: {message}")]
    HttpStatusError { status: u16, message: String },

    /// JSON解析失败
    ///
    /// 响应体不是预期的信封结构
    #[error("响应数据解析失败: {0}")]
    JsonParseFailed(String),

    /// 业务失败
    ///
    /// 信封中 `success=false`
    #[error("业务处理失败: {0}")]
    BusinessFailure(String),

    /// 领域映射失败
    ///
    /// 后端数据不完整,无法构造领域模型
    #[error("数据映射失败: {0}")]
    MappingFailed(#[from] MappingError),

    /// 请求构造失败
    ///
    /// 无效的URL、无法读取上传文件等
    #[error("请求构造失败: {0}")]
    InvalidRequest(String),

    /// 本地会话存储失败
    ///
    /// 请求本身成功,但写入会话时出错
    #[error("会话存储失败: {0}")]
    SessionStorage(String),
}

/// 本地存储相关错误
///
/// 凭证存储与偏好存储共用。按约定不做修复,直接向上传播。
#[derive(Debug, Error, Serialize, Deserialize)]
#[serde(tag = "error", content = "details")]
pub enum StorageError {
    /// 文件读写失败
    #[error("存储I/O失败: {0}")]
    Io(String),

    /// 序列化/反序列化失败
    #[error("数据序列化失败: {0}")]
    SerializationError(String),

    /// 加解密失败
    ///
    /// 密文损坏或主密钥不匹配
    #[error("加解密失败: {0}")]
    CryptoFailed(String),

    /// 主密钥不可用
    #[error("主密钥不可用: {0}")]
    KeyUnavailable(String),
}

/// DTO → 领域模型映射错误
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(tag = "error", content = "details")]
pub enum MappingError {
    /// 缺少必需字段
    #[error("缺少必需字段: {0}")]
    MissingField(String),

    /// 时间戳无法解析
    #[error("无效的时间戳: {0}")]
    InvalidTimestamp(String),

    /// 生产者引用缺少ID
    #[error("生产者引用缺少ID (商品 {producto_id})")]
    MissingProductorId { producto_id: String },
}

/// 配置错误
#[derive(Debug, Error, Serialize, Deserialize)]
#[serde(tag = "error", content = "details")]
pub enum ConfigError {
    /// 无效的URL
    #[error("无效的URL ({key}): {value}")]
    InvalidUrl { key: String, value: String },

    /// 无效的数值
    #[error("无效的数值 ({key}): {value}")]
    InvalidNumber { key: String, value: String },

    /// 无法确定数据目录
    #[error("无法确定数据目录")]
    DataDirUnavailable,
}

/// 应用级错误
///
/// 启动阶段 (`AppState::new`) 的统一错误出口
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Api(#[from] ApiError),
}

/// 实现从reqwest::Error到ApiError的转换
impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ApiError::NetworkFailed("请求超时".to_string())
        } else if err.is_connect() {
            ApiError::NetworkFailed("无法连接到服务器".to_string())
        } else if err.is_decode() {
            ApiError::JsonParseFailed(err.to_string())
        } else {
            ApiError::NetworkFailed(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::JsonParseFailed(err.to_string())
    }
}

impl From<StorageError> for ApiError {
    fn from(err: StorageError) -> Self {
        ApiError::SessionStorage(err.to_string())
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(err: serde_json::Error) -> Self {
        StorageError::SerializationError(err.to_string())
    }
}

impl From<std::io::Error> for StorageError {
    fn from(err: std::io::Error) -> Self {
        StorageError::Io(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_serialization_is_tagged() {
        let err = ApiError::HttpStatusError {
            status: 401,
            message: "Unauthorized".to_string(),
        };
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["error"], "HttpStatusError");
        assert_eq!(json["details"]["status"], 401);
    }

    #[test]
    fn test_mapping_error_wraps_into_api_error() {
        let err: ApiError = MappingError::MissingField("createdAt".to_string()).into();
        match err {
            ApiError::MappingFailed(MappingError::MissingField(field)) => {
                assert_eq!(field, "createdAt")
            }
            other => panic!("Expected MappingFailed, got {:?}", other),
        }
    }
}
