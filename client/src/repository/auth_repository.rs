use std::sync::Arc;

use super::endpoints;
use super::{http_status, identity, settle, try_api, Endpoint, MAPPING_FAILURE, SESSION_SAVE_FAILURE};
use crate::dto::{
    accept_all, AuthData, CreateProductorUserRequest, Lenient, LoginRequest, RegisterRequest,
    UserDto,
};
use crate::mapper::{to_user, to_user_list};
use crate::models::{ApiError, ApiResult, User};
use crate::services::{ApiClient, InputError, SessionManager, ValidationService};
use crate::{log_error, log_event};

fn login_status(status: u16, reason: &str) -> String {
    match status {
        401 => "Credenciales inválidas".to_string(),
        404 => "Usuario no encontrado".to_string(),
        _ => http_status(status, reason),
    }
}

fn register_status(status: u16, reason: &str) -> String {
    match status {
        409 => "El email ya está registrado".to_string(),
        400 => "Datos inválidos".to_string(),
        _ => http_status(status, reason),
    }
}

fn create_productor_status(status: u16, reason: &str) -> String {
    match status {
        409 => "El email ya está registrado".to_string(),
        403 => "No tienes permisos para crear productores (requiere rol ADMIN)".to_string(),
        400 => "Datos inválidos".to_string(),
        _ => http_status(status, reason),
    }
}

fn profile_status(status: u16, reason: &str) -> String {
    match status {
        401 => "Sesión expirada".to_string(),
        _ => http_status(status, reason),
    }
}

fn users_status(status: u16, reason: &str) -> String {
    match status {
        401 => "Sesión expirada".to_string(),
        403 => "No tienes permisos para ver usuarios (requiere rol ADMIN)".to_string(),
        _ => http_status(status, reason),
    }
}

const LOGIN: Endpoint = Endpoint {
    name: endpoints::AUTH_LOGIN,
    failure: "Error en login",
    backend_message: true,
    mapping_failure: MAPPING_FAILURE,
    network_prefix: "Error de red",
    status_message: login_status,
};

const REGISTER: Endpoint = Endpoint {
    name: endpoints::AUTH_REGISTER,
    failure: "Error en registro",
    backend_message: true,
    mapping_failure: MAPPING_FAILURE,
    network_prefix: "Error de red",
    status_message: register_status,
};

const CREATE_PRODUCTOR: Endpoint = Endpoint {
    name: endpoints::AUTH_CREATE_PRODUCTOR,
    failure: "Error al crear productor",
    backend_message: true,
    mapping_failure: MAPPING_FAILURE,
    network_prefix: "Error de red",
    status_message: create_productor_status,
};

const PROFILE: Endpoint = Endpoint {
    name: endpoints::AUTH_PROFILE,
    failure: "Error obteniendo perfil",
    backend_message: true,
    mapping_failure: MAPPING_FAILURE,
    network_prefix: "Error de red",
    status_message: profile_status,
};

const USERS: Endpoint = Endpoint {
    name: endpoints::AUTH_USERS,
    failure: "Error obteniendo usuarios",
    backend_message: true,
    mapping_failure: MAPPING_FAILURE,
    network_prefix: "Error de red",
    status_message: users_status,
};

fn rejected<T>(err: InputError) -> ApiResult<T> {
    let message = err.to_string();
    ApiResult::error_with_cause(message.clone(), ApiError::InvalidRequest(message))
}

/// 认证仓库
///
/// 登录/注册成功后写入会话;管理员创建生产者账户不影响当前会话。
pub struct AuthRepository {
    api: Arc<ApiClient>,
    session: Arc<SessionManager>,
}

impl AuthRepository {
    pub fn new(api: Arc<ApiClient>, session: Arc<SessionManager>) -> Self {
        Self { api, session }
    }

    /// 登录
    ///
    /// # 参数
    /// - `remember_me`: 退出登录时是否保留偏好 (主题等)
    pub async fn login(&self, email: &str, password: &str, remember_me: bool) -> ApiResult<User> {
        if let Err(e) = ValidationService::validate_login(email, password) {
            return rejected(e);
        }

        let request = LoginRequest {
            email: email.trim().to_string(),
            password: password.to_string(),
        };
        let outcome = self.api.post::<_, AuthData>(endpoints::AUTH_LOGIN, &request).await;
        let auth = try_api!(settle(&LOGIN, outcome, identity));

        let user = try_api!(self.start_session(auth, remember_me).await);
        log_event!(
            "LoginSucceeded",
            user_id = user.id.as_str(),
            role = user.role.as_str(),
            remember_me = remember_me
        );
        ApiResult::success(user)
    }

    /// 注册并直接登录
    pub async fn register(&self, request: RegisterRequest) -> ApiResult<User> {
        if let Err(e) = ValidationService::validate_register(&request) {
            return rejected(e);
        }

        let outcome = self
            .api
            .post::<_, AuthData>(endpoints::AUTH_REGISTER, &request)
            .await;
        let auth = try_api!(settle(&REGISTER, outcome, identity));

        let user = try_api!(self.start_session(auth, false).await);
        log_event!(
            "RegisterSucceeded",
            user_id = user.id.as_str(),
            role = user.role.as_str()
        );
        ApiResult::success(user)
    }

    /// 管理员创建生产者账户
    ///
    /// 不保存会话: 管理员仍保持登录
    pub async fn create_productor_user(&self, request: CreateProductorUserRequest) -> ApiResult<User> {
        if let Err(e) = ValidationService::validate_email(&request.email)
            .and_then(|_| ValidationService::validate_password(&request.password))
        {
            return rejected(e);
        }

        let outcome = self
            .api
            .post::<_, AuthData>(endpoints::AUTH_CREATE_PRODUCTOR, &request)
            .await;
        settle(&CREATE_PRODUCTOR, outcome, |auth| Ok(to_user(auth.user)))
    }

    /// 获取当前用户资料,并刷新本地身份
    pub async fn get_profile(&self) -> ApiResult<User> {
        let outcome = self.api.get::<UserDto>(endpoints::AUTH_PROFILE).await;
        let user = try_api!(settle(&PROFILE, outcome, |dto| Ok(to_user(dto))));

        if let Err(e) = self.session.update_user_data(&user) {
            let error = e.to_string();
            log_error!("ProfileRefreshFailed", user_id = user.id.as_str(), error = error.as_str());
            return ApiResult::error_with_cause(SESSION_SAVE_FAILURE, e.into());
        }
        ApiResult::success(user)
    }

    /// 所有用户 (仅ADMIN)
    pub async fn get_all_users(&self) -> ApiResult<Vec<User>> {
        let outcome = self
            .api
            .get::<Vec<Lenient<UserDto>>>(endpoints::AUTH_USERS)
            .await;
        settle(&USERS, outcome, |items| Ok(to_user_list(accept_all(items, "user"))))
    }

    /// 退出登录
    pub async fn logout(&self) -> ApiResult<()> {
        match self.session.clear_session().await {
            Ok(()) => {
                log_event!("LogoutCompleted", remember_me = self.session.remember_me());
                ApiResult::success(())
            }
            Err(e) => {
                let error = e.to_string();
                log_error!("LogoutFailed", error = error.as_str());
                ApiResult::error_with_cause("No se pudo cerrar la sesión", e.into())
            }
        }
    }

    pub fn is_logged_in(&self) -> bool {
        self.session.is_authenticated()
    }

    pub fn current_user(&self) -> Option<User> {
        self.session.current_user()
    }

    pub fn token(&self) -> Option<String> {
        self.session.token()
    }

    async fn start_session(&self, auth: AuthData, remember_me: bool) -> ApiResult<User> {
        let user = to_user(auth.user);
        let saved = self
            .session
            .save_user_session(
                &user.id,
                &user.email,
                user.nombre.as_deref().unwrap_or(""),
                &auth.access_token,
                remember_me,
                &user.role,
            )
            .await;

        match saved {
            Ok(()) => ApiResult::success(user),
            Err(e) => {
                let error = e.to_string();
                log_error!("SessionSaveFailed", user_id = user.id.as_str(), error = error.as_str());
                ApiResult::error_with_cause(SESSION_SAVE_FAILURE, e.into())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_messages() {
        assert_eq!(login_status(401, ""), "Credenciales inválidas");
        assert_eq!(login_status(404, ""), "Usuario no encontrado");
        assert_eq!(login_status(500, ""), "Error HTTP 500");
        assert_eq!(register_status(409, ""), "El email ya está registrado");
        assert_eq!(
            create_productor_status(403, ""),
            "No tienes permisos para crear productores (requiere rol ADMIN)"
        );
        assert_eq!(profile_status(401, ""), "Sesión expirada");
        assert_eq!(
            users_status(403, ""),
            "No tienes permisos para ver usuarios (requiere rol ADMIN)"
        );
    }
}
