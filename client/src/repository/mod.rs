//! 仓库层
//!
//! 每个操作: 发起一次请求 → 检查 `{success, data, message}` 信封 → 映射 → `ApiResult`。
//! 状态码按接口翻译为固定的西语提示,传输失败保留原因。

pub mod auth_repository;
pub mod cliente_repository;
pub mod endpoints;
pub mod entrega_repository;
pub mod pedido_repository;
pub mod producto_repository;
pub mod productor_repository;

pub use auth_repository::AuthRepository;
pub use cliente_repository::ClienteRepository;
pub use entrega_repository::EntregaRepository;
pub use pedido_repository::PedidoRepository;
pub use producto_repository::ProductoRepository;
pub use productor_repository::ProductorRepository;

use crate::models::{ApiError, ApiResult, MappingError};
use crate::services::ApiReply;

/// 映射失败的默认提示
pub(crate) const MAPPING_FAILURE: &str = "Datos incompletos recibidos del servidor";

/// 会话写入失败的提示
pub(crate) const SESSION_SAVE_FAILURE: &str = "No se pudo guardar la sesión";

/// 单个接口的错误文案
pub(crate) struct Endpoint {
    /// 日志中的接口名
    pub name: &'static str,

    /// 信封 `success=false` 或缺少 `data` 时的回退文案
    pub failure: &'static str,

    /// 业务失败时优先使用后端的 message
    pub backend_message: bool,

    pub mapping_failure: &'static str,

    /// 传输失败文案前缀
    pub network_prefix: &'static str,

    /// 非2xx状态码 → 提示 (参数: 状态码、原因短语)
    pub status_message: fn(u16, &str) -> String,
}

/// `Error HTTP 500`
pub(crate) fn http_status(status: u16, _reason: &str) -> String {
    format!("Error HTTP {}", status)
}

/// `Error HTTP 500: Internal Server Error`
pub(crate) fn http_status_with_reason(status: u16, reason: &str) -> String {
    format!("Error HTTP {}: {}", status, reason)
}

/// `Error en el servidor: 500`
pub(crate) fn server_status(status: u16, _reason: &str) -> String {
    format!("Error en el servidor: {}", status)
}

/// 传输失败的用户提示
fn transport_message(prefix: &str, err: &ApiError) -> String {
    let detail = match err {
        ApiError::NetworkFailed(_) => "no se pudo conectar con el servidor",
        ApiError::InvalidRequest(_) => "solicitud inválida",
        _ => "error inesperado",
    };
    format!("{}: {}", prefix, detail)
}

/// 往返未拿到可用回复
///
/// 响应体无法解码属于映射失败,其余归为传输失败
fn outcome_failure<U>(endpoint: &Endpoint, err: ApiError) -> ApiResult<U> {
    if let ApiError::JsonParseFailed(_) = err {
        tracing::warn!(endpoint = endpoint.name, error = %err, "Response decoding failed");
        return ApiResult::error_with_cause(endpoint.mapping_failure, err);
    }
    tracing::warn!(endpoint = endpoint.name, error = %err, "API transport failure");
    ApiResult::error_with_cause(transport_message(endpoint.network_prefix, &err), err)
}

/// 不做映射
pub(crate) fn identity<T>(data: T) -> Result<T, MappingError> {
    Ok(data)
}

/// 把一次往返折叠为 `ApiResult`
pub(crate) fn settle<T, U, F>(
    endpoint: &Endpoint,
    outcome: Result<ApiReply<T>, ApiError>,
    map: F,
) -> ApiResult<U>
where
    F: FnOnce(T) -> Result<U, MappingError>,
{
    let reply = match outcome {
        Ok(reply) => reply,
        Err(err) => return outcome_failure(endpoint, err),
    };

    if !reply.is_success() {
        return status_failure(endpoint, reply);
    }

    let envelope = reply.envelope;
    let (success, message, data) = match envelope {
        Some(env) => (env.success, env.message, env.data),
        None => (false, None, None),
    };

    let data = match data {
        Some(data) if success => data,
        _ => {
            let message = business_message(endpoint, message);
            tracing::warn!(endpoint = endpoint.name, message = %message, "API business failure");
            return ApiResult::error_with_cause(message.clone(), ApiError::BusinessFailure(message));
        }
    };

    match map(data) {
        Ok(mapped) => ApiResult::success(mapped),
        Err(err) => {
            tracing::warn!(endpoint = endpoint.name, error = %err, "Response mapping failed");
            ApiResult::error_with_cause(endpoint.mapping_failure, err.into())
        }
    }
}

/// 无返回数据的操作 (删除等)
///
/// 2xx 即成功,除非信封明确 `success=false`
pub(crate) fn settle_unit<T>(
    endpoint: &Endpoint,
    outcome: Result<ApiReply<T>, ApiError>,
) -> ApiResult<()> {
    let reply = match outcome {
        Ok(reply) => reply,
        Err(err) => return outcome_failure(endpoint, err),
    };

    if !reply.is_success() {
        return status_failure(endpoint, reply);
    }

    match reply.envelope {
        Some(env) if !env.success => {
            let message = business_message(endpoint, env.message);
            ApiResult::error_with_cause(message.clone(), ApiError::BusinessFailure(message))
        }
        _ => ApiResult::success(()),
    }
}

fn business_message(endpoint: &Endpoint, backend: Option<String>) -> String {
    match backend {
        Some(message) if endpoint.backend_message && !message.is_empty() => message,
        _ => endpoint.failure.to_string(),
    }
}

fn status_failure<T, U>(endpoint: &Endpoint, reply: ApiReply<T>) -> ApiResult<U> {
    let message = (endpoint.status_message)(reply.status, &reply.reason);
    tracing::warn!(
        endpoint = endpoint.name,
        status = reply.status,
        message = %message,
        "API status failure"
    );
    let detail = reply.error_message.unwrap_or(reply.reason);
    ApiResult::error_with_cause(
        message,
        ApiError::HttpStatusError {
            status: reply.status,
            message: detail,
        },
    )
}

/// 提前返回错误分支
macro_rules! try_api {
    ($result:expr) => {
        match $result {
            $crate::models::ApiResult::Success { data } => data,
            $crate::models::ApiResult::Error { message, cause } => {
                return $crate::models::ApiResult::Error { message, cause }
            }
        }
    };
}
pub(crate) use try_api;
