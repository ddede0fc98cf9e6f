use crate::models::{AppConfig, AppError};
use crate::repository::{
    AuthRepository, ClienteRepository, EntregaRepository, PedidoRepository, ProductoRepository,
    ProductorRepository,
};
use crate::services::preference_store::{AVATAR_STORE_NAME, SESSION_STORE_NAME};
use crate::services::{ApiClient, CredentialStore, PreferenceStore, SessionManager, TokenProvider};
use std::sync::Arc;

/// 应用全局状态
///
/// 依赖注入的根: 配置 → 存储 → 会话 → 传输 → 仓库,显式组装,没有全局单例
/// - session: 令牌与会话的唯一入口
/// - api: 唯一的后端通信渠道,令牌来自加密凭证存储
/// - 各仓库: 面向UI的 `ApiResult` 接口
pub struct AppState {
    pub config: AppConfig,

    /// 会话管理器: 加密凭证 + 偏好
    pub session: Arc<SessionManager>,

    /// API客户端: 所有仓库共享
    pub api: Arc<ApiClient>,

    pub auth: AuthRepository,
    pub productos: ProductoRepository,
    pub productores: ProductorRepository,
    pub clientes: ClienteRepository,
    pub pedidos: PedidoRepository,
    pub entregas: EntregaRepository,
}

impl AppState {
    /// 从配置初始化应用状态
    ///
    /// 存储文件位于 `config.data_dir`,主密钥不存在时自动生成
    ///
    /// # 错误处理
    /// 任何存储或客户端初始化失败都导致启动失败,不做降级
    pub async fn new(config: AppConfig) -> Result<Self, AppError> {
        let credentials = Arc::new(CredentialStore::open_in(&config.data_dir)?);
        let preferences = PreferenceStore::open(config.data_dir.join(SESSION_STORE_NAME)).await?;
        let avatar = PreferenceStore::open(config.data_dir.join(AVATAR_STORE_NAME)).await?;

        let session = Arc::new(SessionManager::new(credentials, preferences, avatar));
        Self::with_session(config, session)
    }

    /// 以现成的会话组装 (测试中使用内存存储)
    pub fn with_session(config: AppConfig, session: Arc<SessionManager>) -> Result<Self, AppError> {
        let tokens: Arc<dyn TokenProvider> = session.credentials();
        let api = Arc::new(ApiClient::new(&config, tokens)?);

        let state = Self {
            auth: AuthRepository::new(Arc::clone(&api), Arc::clone(&session)),
            productos: ProductoRepository::new(Arc::clone(&api), config.image_base_url.clone()),
            productores: ProductorRepository::new(Arc::clone(&api)),
            clientes: ClienteRepository::new(Arc::clone(&api)),
            pedidos: PedidoRepository::new(Arc::clone(&api)),
            entregas: EntregaRepository::new(Arc::clone(&api)),
            config,
            session,
            api,
        };

        tracing::info!(
            config = %state.config.summary_for_logging(),
            authenticated = state.session.is_authenticated(),
            "AppState initialized"
        );

        Ok(state)
    }
}
