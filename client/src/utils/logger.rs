use std::io;
use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// 初始化日志系统
///
/// 配置结构化日志输出:
/// - JSON格式文件: 便于机器解析和日志分析
/// - 按天轮转: 文件命名 `saborlocal.2025-10-05.log`
/// - 双输出: 控制台(开发) + 文件(生产)
/// - 环境变量控制: RUST_LOG=debug 可调整日志级别
///
/// # 日志安全
/// 令牌与密码永不写入日志,只记录是否存在或长度。
///
/// # 重要提示
/// 返回的guard必须被调用者保存,直到应用退出。
/// 如果guard被drop,文件写入器将被关闭。
///
/// # 错误
/// - 无法创建日志目录或文件时返回 `io::Error`
/// - 全局订阅器已被设置时返回 `io::ErrorKind::AlreadyExists`
pub fn init(log_dir: &Path) -> Result<WorkerGuard, io::Error> {
    std::fs::create_dir_all(log_dir)?;

    let file_appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix("saborlocal")
        .filename_suffix("log")
        .build(log_dir)
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e.to_string()))?;

    // 避免日志I/O阻塞请求
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    // 默认: INFO级别
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let file_layer = fmt::layer()
        .json()
        .with_writer(non_blocking)
        .with_target(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_file(false)
        .with_line_number(false);

    let console_layer = fmt::layer()
        .with_writer(io::stdout)
        .with_target(true)
        .with_level(true)
        .with_ansi(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .with(console_layer)
        .try_init()
        .map_err(|e| io::Error::new(io::ErrorKind::AlreadyExists, e.to_string()))?;

    Ok(guard)
}

/// 日志宏辅助模块
///
/// 提供结构化日志的便捷宏
pub mod macros {
    /// 记录业务事件
    ///
    /// 使用示例:
    /// ```no_run
    /// use saborlocal_client::log_event;
    /// log_event!(
    ///     "LoginSucceeded",
    ///     user_id = "u_abc123",
    ///     role = "CLIENTE"
    /// );
    /// ```
    #[macro_export]
    macro_rules! log_event {
        ($event_type:expr, $($field:tt = $value:expr),* $(,)?) => {
            tracing::info!(
                event_type = $event_type,
                $($field = $value),*
            );
        };
    }

    /// 记录错误事件
    ///
    /// 使用示例:
    /// ```no_run
    /// use saborlocal_client::log_error;
    /// log_error!(
    ///     "RequestFailed",
    ///     endpoint = "productos",
    ///     error = "connection timeout"
    /// );
    /// ```
    #[macro_export]
    macro_rules! log_error {
        ($event_type:expr, $($field:tt = $value:expr),* $(,)?) => {
            tracing::error!(
                event_type = $event_type,
                $($field = $value),*
            );
        };
    }
}
