//! SaborLocal 客户端核心
//!
//! 本地市集应用的非UI部分:
//! - `services`: 加密凭证存储、偏好存储、会话管理、REST传输、配置与校验
//! - `dto` / `mapper`: 后端JSON结构与领域模型之间的转换
//! - `repository`: 面向UI的仓库,统一返回 `ApiResult`
//! - `state`: 依赖注入根 `AppState`

pub mod dto;
pub mod mapper;
pub mod models;
pub mod repository;
pub mod services;
pub mod state;
pub mod utils;

pub use models::{ApiResult, AppConfig};
pub use state::AppState;
