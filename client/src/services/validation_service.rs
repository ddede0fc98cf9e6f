use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

use crate::dto::RegisterRequest;

/// 密码最小长度
pub const MIN_PASSWORD_LEN: usize = 6;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+\-]+@[A-Za-z0-9.\-]+\.[A-Za-z]{2,}$").expect("email regex is valid")
});

/// 输入校验错误
///
/// Display 即面向用户的提示文案
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("El email es obligatorio")]
    EmailRequired,

    #[error("El formato del email no es válido")]
    InvalidEmail,

    #[error("La contraseña es obligatoria")]
    PasswordRequired,

    #[error("La contraseña debe tener al menos {0} caracteres")]
    PasswordTooShort(usize),

    #[error("El nombre es obligatorio")]
    NameRequired,

    #[error("El nombre del negocio es obligatorio para productores")]
    BusinessNameRequired,
}

/// 输入校验服务
///
/// 职责: 在发起登录/注册请求前拦截明显无效的输入,避免无谓的网络往返。
/// 只做格式检查,账户是否存在等由后端判断。
pub struct ValidationService;

impl ValidationService {
    pub fn validate_email(email: &str) -> Result<(), InputError> {
        let email = email.trim();
        if email.is_empty() {
            return Err(InputError::EmailRequired);
        }
        if !EMAIL_RE.is_match(email) {
            return Err(InputError::InvalidEmail);
        }
        Ok(())
    }

    /// 登录只检查非空,长度规则由注册负责
    pub fn validate_login(email: &str, password: &str) -> Result<(), InputError> {
        Self::validate_email(email)?;
        if password.is_empty() {
            return Err(InputError::PasswordRequired);
        }
        Ok(())
    }

    pub fn validate_password(password: &str) -> Result<(), InputError> {
        if password.is_empty() {
            return Err(InputError::PasswordRequired);
        }
        if password.chars().count() < MIN_PASSWORD_LEN {
            return Err(InputError::PasswordTooShort(MIN_PASSWORD_LEN));
        }
        Ok(())
    }

    pub fn validate_register(request: &RegisterRequest) -> Result<(), InputError> {
        Self::validate_email(&request.email)?;
        Self::validate_password(&request.password)?;
        if request.nombre.trim().is_empty() {
            return Err(InputError::NameRequired);
        }
        if request.is_productor() {
            let business = request.nombre_negocio.as_deref().unwrap_or("").trim();
            if business.is_empty() {
                return Err(InputError::BusinessNameRequired);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn register(role: &str) -> RegisterRequest {
        let mut request = RegisterRequest::cliente(
            "ana@example.com".to_string(),
            "secreto1".to_string(),
            "Ana".to_string(),
        );
        request.role = role.to_string();
        request
    }

    #[test]
    fn test_email_format() {
        assert!(ValidationService::validate_email("ana@example.com").is_ok());
        assert!(ValidationService::validate_email(" ana.p+tag@mail.example.cl ").is_ok());
        assert_eq!(
            ValidationService::validate_email("ana@"),
            Err(InputError::InvalidEmail)
        );
        assert_eq!(
            ValidationService::validate_email(""),
            Err(InputError::EmailRequired)
        );
    }

    #[test]
    fn test_login_requires_password() {
        assert_eq!(
            ValidationService::validate_login("ana@example.com", ""),
            Err(InputError::PasswordRequired)
        );
        assert!(ValidationService::validate_login("ana@example.com", "x").is_ok());
    }

    #[test]
    fn test_register_password_length() {
        let mut request = register("CLIENTE");
        request.password = "corta".to_string();
        assert_eq!(
            ValidationService::validate_register(&request),
            Err(InputError::PasswordTooShort(MIN_PASSWORD_LEN))
        );
    }

    #[test]
    fn test_productor_needs_business_name() {
        let mut request = register("PRODUCTOR");
        assert_eq!(
            ValidationService::validate_register(&request),
            Err(InputError::BusinessNameRequired)
        );

        request.nombre_negocio = Some("Quesos del Valle".to_string());
        assert!(ValidationService::validate_register(&request).is_ok());
    }

    #[test]
    fn test_error_messages_are_user_facing() {
        assert_eq!(
            InputError::PasswordTooShort(6).to_string(),
            "La contraseña debe tener al menos 6 caracteres"
        );
    }
}
