use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// 默认API地址 (结尾斜杠不可省略,相对路径基于它拼接)
pub const DEFAULT_API_BASE_URL: &str = "https://saborlocal-api.onrender.com/api/";

/// 默认图片主机
pub const DEFAULT_IMAGE_BASE_URL: &str = "https://saborlocal-api.onrender.com";

pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 60;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 90;

/// 应用配置
///
/// 由 `ConfigService` 从环境变量 (及 `.env`) 加载。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// REST API基础地址,始终以 `/` 结尾
    pub api_base_url: String,

    /// 图片相对路径的前缀主机,不含结尾 `/`
    pub image_base_url: String,

    /// 本地存储目录 (偏好文件、加密凭证、主密钥)
    pub data_dir: PathBuf,

    /// 日志目录
    pub log_dir: PathBuf,

    pub connect_timeout_secs: u64,
    pub request_timeout_secs: u64,
}

impl AppConfig {
    /// 以默认地址创建配置
    ///
    /// # 参数
    /// - `data_dir`: 本地存储目录
    pub fn new(data_dir: PathBuf) -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            image_base_url: DEFAULT_IMAGE_BASE_URL.to_string(),
            log_dir: data_dir.join("logs"),
            data_dir,
            connect_timeout_secs: DEFAULT_CONNECT_TIMEOUT_SECS,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }

    /// 设置API地址 (构建器模式),自动补齐结尾 `/`
    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        let mut url = url.into();
        if !url.ends_with('/') {
            url.push('/');
        }
        self.api_base_url = url;
        self
    }

    /// 设置图片主机 (构建器模式),去掉结尾 `/`
    pub fn with_image_base_url(mut self, url: impl Into<String>) -> Self {
        self.image_base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_log_dir(mut self, log_dir: PathBuf) -> Self {
        self.log_dir = log_dir;
        self
    }

    pub fn with_timeouts(mut self, connect_secs: u64, request_secs: u64) -> Self {
        self.connect_timeout_secs = connect_secs;
        self.request_timeout_secs = request_secs;
        self
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// 用于日志的摘要
    pub fn summary_for_logging(&self) -> String {
        format!(
            "api={} images={} data_dir={}",
            self.api_base_url,
            self.image_base_url,
            self.data_dir.display()
        )
    }
}
