//! SaborLocal REST 传输层
//!
//! 负责URL拼接、超时、Bearer令牌注入与信封解码。
//! 不解释业务含义: 状态码与信封交给仓库层翻译为 `ApiResult`。

use std::path::Path;
use std::sync::Arc;

use reqwest::{multipart, Client, Method, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::dto::ApiEnvelope;
use crate::models::{ApiError, AppConfig};

/// 令牌提供者
///
/// 每次请求前同步查询,返回 `None` 时不附加 Authorization 头
pub trait TokenProvider: Send + Sync {
    fn bearer_token(&self) -> Option<String>;
}

/// 无令牌 (匿名访问)
pub struct NoToken;

impl TokenProvider for NoToken {
    fn bearer_token(&self) -> Option<String> {
        None
    }
}

/// 一次HTTP往返的结果
#[derive(Debug)]
pub struct ApiReply<T> {
    pub status: u16,

    /// 状态码的标准原因短语
    pub reason: String,

    /// 仅2xx且响应体非空时解码
    pub envelope: Option<ApiEnvelope<T>>,

    /// 非2xx响应中信封携带的message (若有)
    pub error_message: Option<String>,
}

impl<T> ApiReply<T> {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// 错误响应只读取 message 字段
#[derive(serde::Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
}

/// API客户端
pub struct ApiClient {
    http: Client,
    base_url: Url,
    tokens: Arc<dyn TokenProvider>,
}

impl ApiClient {
    /// 创建新的API客户端
    ///
    /// # 参数
    /// - `config`: 提供基础URL与超时
    /// - `tokens`: 令牌来源,通常是加密凭证存储
    pub fn new(config: &AppConfig, tokens: Arc<dyn TokenProvider>) -> Result<Self, ApiError> {
        let base_url = Url::parse(&config.api_base_url).map_err(|e| {
            ApiError::InvalidRequest(format!("无效的基础URL {}: {}", config.api_base_url, e))
        })?;

        let http = Client::builder()
            .connect_timeout(config.connect_timeout())
            .timeout(config.request_timeout())
            .user_agent(concat!("saborlocal-client/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ApiError::InvalidRequest(format!("HTTP客户端初始化失败: {}", e)))?;

        tracing::info!(
            base_url = %base_url,
            connect_timeout_secs = config.connect_timeout_secs,
            request_timeout_secs = config.request_timeout_secs,
            "API client initialized"
        );

        Ok(Self {
            http,
            base_url,
            tokens,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<ApiReply<T>, ApiError> {
        let request = self.request(Method::GET, path)?;
        self.send(request, Method::GET, path).await
    }

    pub async fn post<B, T>(&self, path: &str, body: &B) -> Result<ApiReply<T>, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self.request(Method::POST, path)?.json(body);
        self.send(request, Method::POST, path).await
    }

    pub async fn put<B, T>(&self, path: &str, body: &B) -> Result<ApiReply<T>, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self.request(Method::PUT, path)?.json(body);
        self.send(request, Method::PUT, path).await
    }

    pub async fn patch<B, T>(&self, path: &str, body: &B) -> Result<ApiReply<T>, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self.request(Method::PATCH, path)?.json(body);
        self.send(request, Method::PATCH, path).await
    }

    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<ApiReply<T>, ApiError> {
        let request = self.request(Method::DELETE, path)?;
        self.send(request, Method::DELETE, path).await
    }

    /// multipart上传单个文件
    ///
    /// # 参数
    /// - `field`: 表单字段名 (后端约定为 `file`)
    /// - `file_path`: 本地文件路径
    pub async fn upload_file<T: DeserializeOwned>(
        &self,
        path: &str,
        field: &str,
        file_path: &Path,
    ) -> Result<ApiReply<T>, ApiError> {
        let bytes = tokio::fs::read(file_path).await.map_err(|e| {
            ApiError::InvalidRequest(format!("无法读取文件 {}: {}", file_path.display(), e))
        })?;

        let file_name = file_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload".to_string());

        tracing::debug!(
            path = %path,
            file_name = %file_name,
            size = bytes.len(),
            "Uploading file"
        );

        let part = multipart::Part::bytes(bytes)
            .file_name(file_name)
            .mime_str(guess_image_mime(file_path))
            .map_err(|e| ApiError::InvalidRequest(format!("无效的MIME类型: {}", e)))?;
        let form = multipart::Form::new().part(field.to_string(), part);

        let request = self.request(Method::POST, path)?.multipart(form);
        self.send(request, Method::POST, path).await
    }

    fn url(&self, path: &str) -> Result<Url, ApiError> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(|e| ApiError::InvalidRequest(format!("无效的请求路径 {}: {}", path, e)))
    }

    /// 构造请求并注入Bearer令牌
    fn request(&self, method: Method, path: &str) -> Result<RequestBuilder, ApiError> {
        let url = self.url(path)?;
        let builder = self.http.request(method, url);

        match self.tokens.bearer_token() {
            Some(token) if !token.is_empty() => Ok(builder.bearer_auth(token)),
            _ => Ok(builder),
        }
    }

    async fn send<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        method: Method,
        path: &str,
    ) -> Result<ApiReply<T>, ApiError> {
        let response = request.send().await.map_err(|e| {
            tracing::warn!(method = %method, path = %path, error = %e, "Request failed");
            ApiError::from(e)
        })?;

        let status = response.status();
        let reason = status.canonical_reason().unwrap_or("").to_string();
        let body = response.bytes().await?;

        tracing::debug!(
            method = %method,
            path = %path,
            status = status.as_u16(),
            body_len = body.len(),
            "API response"
        );

        if !status.is_success() {
            let error_message = serde_json::from_slice::<ErrorBody>(&body)
                .ok()
                .and_then(|b| b.message);
            return Ok(ApiReply {
                status: status.as_u16(),
                reason,
                envelope: None,
                error_message,
            });
        }

        let envelope = if body.iter().all(u8::is_ascii_whitespace) {
            None
        } else {
            Some(serde_json::from_slice::<ApiEnvelope<T>>(&body).map_err(|e| {
                tracing::warn!(path = %path, error = %e, "Envelope decode failed");
                ApiError::from(e)
            })?)
        };

        Ok(ApiReply {
            status: status.as_u16(),
            reason,
            envelope,
            error_message: None,
        })
    }
}

fn guess_image_mime(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "webp" => "image/webp",
        "gif" => "image/gif",
        _ => "image/*",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_url_join_keeps_api_prefix() {
        let config = AppConfig::new(PathBuf::from("/tmp/saborlocal"));
        let client = ApiClient::new(&config, Arc::new(NoToken)).unwrap();

        let url = client.url("/productos/abc").unwrap();
        assert_eq!(
            url.as_str(),
            "https://saborlocal-api.onrender.com/api/productos/abc"
        );
    }

    #[test]
    fn test_invalid_base_url_is_rejected() {
        let config =
            AppConfig::new(PathBuf::from("/tmp/saborlocal")).with_api_base_url("not a url");
        let result = ApiClient::new(&config, Arc::new(NoToken));
        assert!(matches!(result, Err(ApiError::InvalidRequest(_))));
    }

    #[test]
    fn test_guess_image_mime() {
        assert_eq!(guess_image_mime(Path::new("foto.PNG")), "image/png");
        assert_eq!(guess_image_mime(Path::new("foto.jpeg")), "image/jpeg");
        assert_eq!(guess_image_mime(Path::new("foto")), "image/*");
    }
}
