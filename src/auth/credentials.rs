//! 登录凭据与登录方式选择

use std::fmt;

use crate::auth::selectors::{ProviderSelectors, SelectorTable};
use crate::error::{AppResult, ConfigError};
use crate::utils::logging::mask_secret;

/// 一组账号密码
#[derive(Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    pub id: String,
    pub password: String,
}

impl LoginCredentials {
    pub fn new(id: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            password: password.into(),
        }
    }

    /// 账号和密码都不为空
    pub fn is_complete(&self) -> bool {
        !self.id.is_empty() && !self.password.is_empty()
    }
}

impl fmt::Debug for LoginCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginCredentials")
            .field("id", &self.id)
            .field("password", &mask_secret(&self.password))
            .finish()
    }
}

/// 登录方式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentityProvider {
    /// Kakao 账号
    Kakao,
    /// Tistory 账号
    Tistory,
}

impl IdentityProvider {
    pub fn name(self) -> &'static str {
        match self {
            IdentityProvider::Kakao => "Kakao",
            IdentityProvider::Tistory => "Tistory",
        }
    }

    /// 从选择器表中取出该登录方式的选择器
    pub fn selectors(self, table: &SelectorTable) -> &ProviderSelectors {
        match self {
            IdentityProvider::Kakao => &table.kakao,
            IdentityProvider::Tistory => &table.tistory,
        }
    }
}

/// 选定的登录方式和对应的凭据
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderLogin {
    pub provider: IdentityProvider,
    pub credentials: LoginCredentials,
}

impl ProviderLogin {
    /// 选择登录方式
    ///
    /// Kakao 凭据完整时优先使用 Kakao，否则使用 Tistory 凭据；
    /// 两者都不完整时返回 [`ConfigError::MissingLoginCredentials`]。
    pub fn select(
        kakao: Option<LoginCredentials>,
        tistory: Option<LoginCredentials>,
    ) -> AppResult<Self> {
        if let Some(credentials) = kakao.filter(LoginCredentials::is_complete) {
            return Ok(Self {
                provider: IdentityProvider::Kakao,
                credentials,
            });
        }
        if let Some(credentials) = tistory.filter(LoginCredentials::is_complete) {
            return Ok(Self {
                provider: IdentityProvider::Tistory,
                credentials,
            });
        }
        Err(ConfigError::MissingLoginCredentials.into())
    }
}
