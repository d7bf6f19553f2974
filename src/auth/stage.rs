//! 授权码获取流程的阶段

use std::fmt::{self, Display};

/// 授权码获取流程所处的阶段
///
/// 流程严格按顺序推进：
///
/// ```text
/// NotStarted → LoginPageLoaded → IdentityProviderChosen → CredentialsSubmitted
///            → LoggedIn → AuthPageLoaded → ConsentGiven → CodeExtracted
/// ```
///
/// 失败时错误里携带的是"正在进入"的那个阶段。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AuthStage {
    NotStarted,
    LoginPageLoaded,
    IdentityProviderChosen,
    CredentialsSubmitted,
    LoggedIn,
    AuthPageLoaded,
    ConsentGiven,
    CodeExtracted,
}

impl AuthStage {
    /// 下一个阶段（终态返回自身）
    pub fn next(self) -> Self {
        match self {
            AuthStage::NotStarted => AuthStage::LoginPageLoaded,
            AuthStage::LoginPageLoaded => AuthStage::IdentityProviderChosen,
            AuthStage::IdentityProviderChosen => AuthStage::CredentialsSubmitted,
            AuthStage::CredentialsSubmitted => AuthStage::LoggedIn,
            AuthStage::LoggedIn => AuthStage::AuthPageLoaded,
            AuthStage::AuthPageLoaded => AuthStage::ConsentGiven,
            AuthStage::ConsentGiven | AuthStage::CodeExtracted => AuthStage::CodeExtracted,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            AuthStage::NotStarted => "未开始",
            AuthStage::LoginPageLoaded => "加载登录页",
            AuthStage::IdentityProviderChosen => "选择登录方式",
            AuthStage::CredentialsSubmitted => "提交账号密码",
            AuthStage::LoggedIn => "登录完成",
            AuthStage::AuthPageLoaded => "加载授权页",
            AuthStage::ConsentGiven => "同意授权",
            AuthStage::CodeExtracted => "提取授权码",
        }
    }
}

impl Display for AuthStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stages_advance_in_order() {
        let mut stage = AuthStage::NotStarted;
        let mut visited = vec![stage];
        while stage != AuthStage::CodeExtracted {
            stage = stage.next();
            visited.push(stage);
        }
        assert_eq!(visited.len(), 8);
        assert_eq!(AuthStage::CodeExtracted.next(), AuthStage::CodeExtracted);
    }
}
