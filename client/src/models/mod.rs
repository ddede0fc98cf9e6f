//! 数据模型模块
//!
//! 包含所有核心数据结构:
//! - errors: 错误类型定义 (API、存储、映射、配置、应用级错误)
//! - api_result: 仓库层统一返回类型
//! - user: 用户与会话快照
//! - producto / pedido / entrega: 领域模型
//! - app_config: 应用配置

pub mod api_result;
pub mod app_config;
pub mod entrega;
pub mod errors;
pub mod pedido;
pub mod producto;
pub mod user;

// 重导出常用类型,简化外部引用
pub use api_result::ApiResult;
pub use app_config::AppConfig;
pub use entrega::Entrega;
pub use errors::{ApiError, AppError, ConfigError, MappingError, StorageError};
pub use pedido::{Cliente, EstadoPedido, Pedido, PedidoItem};
pub use producto::{Producto, Productor};
pub use user::{User, UserSession, DEFAULT_ROLE};
