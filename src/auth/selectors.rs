//! 登录页 / 授权页的元素选择器
//!
//! 页面结构随时可能变化，所有 XPath 集中在这里，也可以通过配置文件的
//! `[selectors]` 段覆盖。

use serde::Deserialize;

/// Tistory 登录页
pub const LOGIN_URL: &str = "https://www.tistory.com/auth/login";
/// 登录成功后应该跳转到的地址
pub const LOGIN_AFTER_URL: &str = "https://www.tistory.com/";
/// 授权页上的"同意"按钮
pub const AUTH_BUTTON_XPATH: &str = r#"//*[@id="contents"]/div[4]/button[1]"#;

/// 单个登录方式用到的选择器
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderSelectors {
    /// 登录页上选择该登录方式的按钮
    pub login_button: String,
    pub id_input: String,
    pub password_input: String,
    pub submit_button: String,
}

impl ProviderSelectors {
    /// Kakao 账号登录
    pub fn kakao() -> Self {
        Self {
            login_button: r#"//*[@id="cMain"]/div/div/div/a[2]"#.to_string(),
            id_input: r#"//*[@id="loginId--1"]"#.to_string(),
            password_input: r#"//*[@id="password--2"]"#.to_string(),
            submit_button: r#"//*[@id="mainContent"]/div/div/form/div[4]/button[1]"#.to_string(),
        }
    }

    /// Tistory 账号登录
    pub fn tistory() -> Self {
        Self {
            login_button: r#"//*[@id="cMain"]/div/div/div/a[3]"#.to_string(),
            id_input: r#"//*[@id="loginId"]"#.to_string(),
            password_input: r#"//*[@id="loginPw"]"#.to_string(),
            submit_button: r#"//*[@id="authForm"]/fieldset/button"#.to_string(),
        }
    }

    /// 所有选择器，方便测试中检查是否被访问过
    pub fn all(&self) -> [&str; 4] {
        [
            &self.login_button,
            &self.id_input,
            &self.password_input,
            &self.submit_button,
        ]
    }
}

/// 整个登录脚本用到的选择器表
///
/// 从配置读取时，没写的字段（包括 `[kakao]` / `[tistory]` 里没写的字段）保留默认值。
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "SelectorOverrides")]
pub struct SelectorTable {
    pub login_url: String,
    pub login_after_url: String,
    pub auth_button: String,
    pub kakao: ProviderSelectors,
    pub tistory: ProviderSelectors,
}

impl Default for SelectorTable {
    fn default() -> Self {
        Self {
            login_url: LOGIN_URL.to_string(),
            login_after_url: LOGIN_AFTER_URL.to_string(),
            auth_button: AUTH_BUTTON_XPATH.to_string(),
            kakao: ProviderSelectors::kakao(),
            tistory: ProviderSelectors::tistory(),
        }
    }
}

/// 配置文件里的 `[selectors]` 段
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct SelectorOverrides {
    login_url: Option<String>,
    login_after_url: Option<String>,
    auth_button: Option<String>,
    kakao: ProviderOverrides,
    tistory: ProviderOverrides,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ProviderOverrides {
    login_button: Option<String>,
    id_input: Option<String>,
    password_input: Option<String>,
    submit_button: Option<String>,
}

impl ProviderOverrides {
    fn apply(self, base: ProviderSelectors) -> ProviderSelectors {
        ProviderSelectors {
            login_button: self.login_button.unwrap_or(base.login_button),
            id_input: self.id_input.unwrap_or(base.id_input),
            password_input: self.password_input.unwrap_or(base.password_input),
            submit_button: self.submit_button.unwrap_or(base.submit_button),
        }
    }
}

impl From<SelectorOverrides> for SelectorTable {
    fn from(overrides: SelectorOverrides) -> Self {
        let base = SelectorTable::default();
        Self {
            login_url: overrides.login_url.unwrap_or(base.login_url),
            login_after_url: overrides.login_after_url.unwrap_or(base.login_after_url),
            auth_button: overrides.auth_button.unwrap_or(base.auth_button),
            kakao: overrides.kakao.apply(base.kakao),
            tistory: overrides.tistory.apply(base.tistory),
        }
    }
}
