use crate::models::app_config::{DEFAULT_CONNECT_TIMEOUT_SECS, DEFAULT_REQUEST_TIMEOUT_SECS};
use crate::models::{AppConfig, ConfigError};
use reqwest::Url;
use std::collections::HashMap;
use std::path::PathBuf;

pub const ENV_API_URL: &str = "SABORLOCAL_API_URL";
pub const ENV_IMAGE_BASE_URL: &str = "SABORLOCAL_IMAGE_BASE_URL";
pub const ENV_DATA_DIR: &str = "SABORLOCAL_DATA_DIR";
pub const ENV_LOG_DIR: &str = "SABORLOCAL_LOG_DIR";
pub const ENV_CONNECT_TIMEOUT: &str = "SABORLOCAL_CONNECT_TIMEOUT_SECS";
pub const ENV_REQUEST_TIMEOUT: &str = "SABORLOCAL_REQUEST_TIMEOUT_SECS";

const ENV_PREFIX: &str = "SABORLOCAL_";

/// 配置服务
///
/// 从环境变量加载应用配置,职责单一:
/// - 读取 .env 文件 (存在时) 注入进程环境
/// - 解析 `SABORLOCAL_*` 变量为 `AppConfig`
/// - 未设置的项使用默认值
pub struct ConfigService;

impl ConfigService {
    /// 从 .env 与进程环境加载配置
    ///
    /// # 错误处理
    /// - .env 不存在时忽略 (不报错)
    /// - URL/数值格式错误时返回对应的 `ConfigError`
    pub fn load_app_config() -> Result<AppConfig, ConfigError> {
        match dotenvy::dotenv() {
            Ok(path) => tracing::info!(path = %path.display(), "已加载 .env 文件"),
            Err(e) if e.not_found() => tracing::debug!(".env 文件不存在,仅使用进程环境"),
            Err(e) => tracing::warn!(error = %e, ".env 文件解析失败,已忽略"),
        }

        let vars: HashMap<String, String> = std::env::vars()
            .filter(|(key, _)| key.starts_with(ENV_PREFIX))
            .collect();

        let config = Self::from_vars(&vars)?;
        tracing::info!(config = %config.summary_for_logging(), "已加载应用配置");
        Ok(config)
    }

    /// 从变量表构造配置
    ///
    /// 空字符串视为未设置
    pub fn from_vars(vars: &HashMap<String, String>) -> Result<AppConfig, ConfigError> {
        let get = |key: &str| {
            vars.get(key)
                .map(|v| v.trim())
                .filter(|v| !v.is_empty())
        };

        let data_dir = match get(ENV_DATA_DIR) {
            Some(dir) => PathBuf::from(dir),
            None => Self::default_data_dir()?,
        };
        let mut config = AppConfig::new(data_dir);

        if let Some(url) = get(ENV_API_URL) {
            config = config.with_api_base_url(Self::parse_url(ENV_API_URL, url)?);
        }
        if let Some(url) = get(ENV_IMAGE_BASE_URL) {
            config = config.with_image_base_url(Self::parse_url(ENV_IMAGE_BASE_URL, url)?);
        }
        if let Some(dir) = get(ENV_LOG_DIR) {
            config = config.with_log_dir(PathBuf::from(dir));
        }

        let connect = match get(ENV_CONNECT_TIMEOUT) {
            Some(v) => Self::parse_secs(ENV_CONNECT_TIMEOUT, v)?,
            None => DEFAULT_CONNECT_TIMEOUT_SECS,
        };
        let request = match get(ENV_REQUEST_TIMEOUT) {
            Some(v) => Self::parse_secs(ENV_REQUEST_TIMEOUT, v)?,
            None => DEFAULT_REQUEST_TIMEOUT_SECS,
        };

        Ok(config.with_timeouts(connect, request))
    }

    /// 默认数据目录: `<系统数据目录>/saborlocal`
    pub fn default_data_dir() -> Result<PathBuf, ConfigError> {
        dirs::data_dir()
            .map(|dir| dir.join("saborlocal"))
            .ok_or(ConfigError::DataDirUnavailable)
    }

    fn parse_url(key: &str, value: &str) -> Result<String, ConfigError> {
        let invalid = || ConfigError::InvalidUrl {
            key: key.to_string(),
            value: value.to_string(),
        };
        let url = Url::parse(value).map_err(|_| invalid())?;
        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(invalid());
        }
        Ok(value.to_string())
    }

    fn parse_secs(key: &str, value: &str) -> Result<u64, ConfigError> {
        value
            .parse::<u64>()
            .ok()
            .filter(|secs| *secs > 0)
            .ok_or_else(|| ConfigError::InvalidNumber {
                key: key.to_string(),
                value: value.to_string(),
            })
    }
}
