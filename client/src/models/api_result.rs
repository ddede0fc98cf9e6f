use serde::Serialize;

use crate::models::errors::ApiError;

/// 仓库层统一返回类型
///
/// 所有仓库操作都返回它而不是 `Result`: 网络失败、非2xx状态、
/// 信封 `success=false`、映射失败,全部折叠为 `Error`。
/// UI层只需区分成功与失败。
#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ApiResult<T> {
    Success {
        data: T,
    },
    Error {
        message: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        cause: Option<ApiError>,
    },
}

impl<T> ApiResult<T> {
    pub fn success(data: T) -> Self {
        ApiResult::Success { data }
    }

    /// 仅携带用户可读消息的错误
    pub fn error(message: impl Into<String>) -> Self {
        ApiResult::Error {
            message: message.into(),
            cause: None,
        }
    }

    /// 携带底层原因的错误
    pub fn error_with_cause(message: impl Into<String>, cause: ApiError) -> Self {
        ApiResult::Error {
            message: message.into(),
            cause: Some(cause),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ApiResult::Success { .. })
    }

    pub fn is_error(&self) -> bool {
        !self.is_success()
    }

    /// 成功时的数据引用
    pub fn data(&self) -> Option<&T> {
        match self {
            ApiResult::Success { data } => Some(data),
            ApiResult::Error { .. } => None,
        }
    }

    /// 失败时的用户可读消息
    pub fn error_message(&self) -> Option<&str> {
        match self {
            ApiResult::Success { .. } => None,
            ApiResult::Error { message, .. } => Some(message.as_str()),
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ApiResult<U> {
        match self {
            ApiResult::Success { data } => ApiResult::Success { data: f(data) },
            ApiResult::Error { message, cause } => ApiResult::Error { message, cause },
        }
    }

    /// 转换为标准 `Result`,便于在调用方使用 `?`
    pub fn into_result(self) -> Result<T, (String, Option<ApiError>)> {
        match self {
            ApiResult::Success { data } => Ok(data),
            ApiResult::Error { message, cause } => Err((message, cause)),
        }
    }
}
