use std::fmt;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use serde::Deserialize;

use crate::auth::{LoginCredentials, SelectorTable, WaitPolicy};
use crate::error::{AppResult, ConfigError};
use crate::session::DEFAULT_API_BASE_URL;
use crate::utils::logging::mask_secret;

/// 程序配置
///
/// 加载顺序：默认值 → TOML 配置文件（可选）→ 环境变量
#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 博客地址，如 `https://example.tistory.com`
    pub blog_url: String,
    /// App ID
    pub client_id: String,
    /// Secret Key
    pub client_secret: String,
    // --- 登录凭据（二选一）---
    pub kakao_id: Option<String>,
    pub kakao_password: Option<String>,
    pub tistory_id: Option<String>,
    pub tistory_password: Option<String>,
    // --- 浏览器配置 ---
    /// 是否使用无头模式
    pub headless: bool,
    /// 浏览器可执行文件路径，为空时自动查找
    pub browser_executable: Option<String>,
    /// 浏览器调试端口，设置后连接已有浏览器而不是启动新的
    pub browser_debug_port: Option<u16>,
    /// 等待元素 / 跳转的超时时间（毫秒）
    pub wait_timeout_ms: u64,
    /// 轮询间隔（毫秒）
    pub poll_interval_ms: u64,
    // --- API 配置 ---
    pub api_base_url: String,
    /// HTTP 请求超时（秒）
    pub http_timeout_secs: u64,
    /// 是否显示详细日志
    pub verbose_logging: bool,
    /// 登录页选择器
    pub selectors: SelectorTable,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            blog_url: String::new(),
            client_id: String::new(),
            client_secret: String::new(),
            kakao_id: None,
            kakao_password: None,
            tistory_id: None,
            tistory_password: None,
            headless: true,
            browser_executable: None,
            browser_debug_port: None,
            wait_timeout_ms: 10_000,
            poll_interval_ms: 200,
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            http_timeout_secs: 30,
            verbose_logging: false,
            selectors: SelectorTable::default(),
        }
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let masked = |secret: &Option<String>| secret.as_deref().map(mask_secret);
        f.debug_struct("Config")
            .field("blog_url", &self.blog_url)
            .field("client_id", &self.client_id)
            .field("client_secret", &mask_secret(&self.client_secret))
            .field("kakao_id", &self.kakao_id)
            .field("kakao_password", &masked(&self.kakao_password))
            .field("tistory_id", &self.tistory_id)
            .field("tistory_password", &masked(&self.tistory_password))
            .field("headless", &self.headless)
            .field("browser_executable", &self.browser_executable)
            .field("browser_debug_port", &self.browser_debug_port)
            .field("wait_timeout_ms", &self.wait_timeout_ms)
            .field("poll_interval_ms", &self.poll_interval_ms)
            .field("api_base_url", &self.api_base_url)
            .field("http_timeout_secs", &self.http_timeout_secs)
            .field("verbose_logging", &self.verbose_logging)
            .field("selectors", &self.selectors)
            .finish()
    }
}

impl Config {
    /// 只从环境变量加载
    pub fn from_env() -> AppResult<Self> {
        Self::default().merge_env()
    }

    /// 从 TOML 文件加载，缺省字段使用默认值
    pub fn from_toml_file(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|source| ConfigError::FileReadFailed {
                path: path.display().to_string(),
                source,
            })?;
        toml::from_str(&content).map_err(|source| {
            ConfigError::TomlParseFailed {
                path: path.display().to_string(),
                source,
            }
            .into()
        })
    }

    /// 加载配置：有文件时先读文件，再用环境变量覆盖
    pub fn load(path: Option<&Path>) -> AppResult<Self> {
        let config = match path {
            Some(path) => Self::from_toml_file(path)?,
            None => Self::default(),
        };
        config.merge_env()
    }

    /// 用进程环境变量覆盖当前配置
    pub fn merge_env(self) -> AppResult<Self> {
        self.merge_vars(|name| std::env::var(name).ok())
    }

    /// 用给定的变量来源覆盖当前配置
    pub fn merge_vars(mut self, lookup: impl Fn(&str) -> Option<String>) -> AppResult<Self> {
        let string = |name: &str, target: &mut String| {
            if let Some(value) = lookup(name) {
                *target = value;
            }
        };
        string("TISTORY_BLOG_URL", &mut self.blog_url);
        string("CLIENT_ID", &mut self.client_id);
        string("SECRET_KEY", &mut self.client_secret);
        string("TISTORY_API_BASE_URL", &mut self.api_base_url);

        let optional = |name: &str, target: &mut Option<String>| {
            if let Some(value) = lookup(name) {
                *target = Some(value);
            }
        };
        optional("KAKAO_ID", &mut self.kakao_id);
        optional("KAKAO_PASSWORD", &mut self.kakao_password);
        optional("TISTORY_ID", &mut self.tistory_id);
        optional("TISTORY_PASSWORD", &mut self.tistory_password);
        optional("BROWSER_EXECUTABLE", &mut self.browser_executable);

        if let Some(value) = parse_var(&lookup, "HEADLESS", "bool")? {
            self.headless = value;
        }
        if let Some(port) = parse_var(&lookup, "BROWSER_DEBUG_PORT", "u16")? {
            self.browser_debug_port = Some(port);
        }
        if let Some(value) = parse_var(&lookup, "WAIT_TIMEOUT_MS", "u64")? {
            self.wait_timeout_ms = value;
        }
        if let Some(value) = parse_var(&lookup, "POLL_INTERVAL_MS", "u64")? {
            self.poll_interval_ms = value;
        }
        if let Some(value) = parse_var(&lookup, "HTTP_TIMEOUT_SECS", "u64")? {
            self.http_timeout_secs = value;
        }
        if let Some(value) = parse_var(&lookup, "VERBOSE_LOGGING", "bool")? {
            self.verbose_logging = value;
        }
        Ok(self)
    }

    /// Kakao 登录凭据
    pub fn kakao_credentials(&self) -> Option<LoginCredentials> {
        credentials(&self.kakao_id, &self.kakao_password)
    }

    /// Tistory 登录凭据
    pub fn tistory_credentials(&self) -> Option<LoginCredentials> {
        credentials(&self.tistory_id, &self.tistory_password)
    }

    pub fn wait_policy(&self) -> WaitPolicy {
        WaitPolicy {
            timeout: Duration::from_millis(self.wait_timeout_ms),
            poll_interval: Duration::from_millis(self.poll_interval_ms),
        }
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }
}

fn credentials(id: &Option<String>, password: &Option<String>) -> Option<LoginCredentials> {
    match (id, password) {
        (Some(id), Some(password)) => Some(LoginCredentials::new(id, password)),
        _ => None,
    }
}

fn parse_var<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &str,
    expected_type: &'static str,
) -> AppResult<Option<T>> {
    match lookup(name) {
        None => Ok(None),
        Some(value) => value.trim().parse().map(Some).map_err(|_| {
            ConfigError::EnvVarParseFailed {
                var_name: name.to_string(),
                value,
                expected_type,
            }
            .into()
        }),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::error::AppError;

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert!(config.headless);
        assert_eq!(config.api_base_url, "https://www.tistory.com");
        assert_eq!(config.wait_policy(), WaitPolicy::default());
        assert!(config.kakao_credentials().is_none());
    }

    #[test]
    fn test_merge_vars_overrides_fields() {
        let config = Config::default()
            .merge_vars(vars(&[
                ("TISTORY_BLOG_URL", "https://sub.tistory.com"),
                ("CLIENT_ID", "id"),
                ("SECRET_KEY", "secret"),
                ("TISTORY_ID", "me"),
                ("TISTORY_PASSWORD", "pw"),
                ("HEADLESS", "false"),
                ("BROWSER_DEBUG_PORT", "9222"),
                ("WAIT_TIMEOUT_MS", "500"),
            ]))
            .unwrap();

        assert_eq!(config.blog_url, "https://sub.tistory.com");
        assert_eq!(config.client_id, "id");
        assert_eq!(config.client_secret, "secret");
        assert!(!config.headless);
        assert_eq!(config.browser_debug_port, Some(9222));
        assert_eq!(config.wait_policy().timeout, Duration::from_millis(500));
        assert!(config.kakao_credentials().is_none());
        assert_eq!(
            config.tistory_credentials(),
            Some(LoginCredentials::new("me", "pw"))
        );
    }

    #[test]
    fn test_debug_masks_secrets() {
        let config = Config {
            client_secret: "client-secret-value".to_string(),
            kakao_id: Some("me@kakao.com".to_string()),
            kakao_password: Some("kakao-password".to_string()),
            tistory_password: Some("tistory-password".to_string()),
            ..Config::default()
        };
        let printed = format!("{:?}", config);
        assert!(printed.contains("me@kakao.com"));
        assert!(!printed.contains("client-secret-value"));
        assert!(!printed.contains("kakao-password"));
        assert!(!printed.contains("tistory-password"));
    }

    #[test]
    fn test_merge_vars_rejects_bad_number() {
        let err = Config::default()
            .merge_vars(vars(&[("BROWSER_DEBUG_PORT", "not-a-port")]))
            .unwrap_err();
        match err {
            AppError::Config(ConfigError::EnvVarParseFailed { var_name, .. }) => {
                assert_eq!(var_name, "BROWSER_DEBUG_PORT")
            }
            other => panic!("期望环境变量解析错误, 实际: {other:?}"),
        }
    }

    #[test]
    fn test_from_toml_file() {
        let path = std::env::temp_dir().join(format!("tistory-config-{}.toml", std::process::id()));
        std::fs::write(
            &path,
            r#"
            blog_url = "https://sub.tistory.com"
            client_id = "id"
            client_secret = "secret"
            kakao_id = "me@kakao.com"
            kakao_password = "pw"
            poll_interval_ms = 50

            [selectors]
            auth_button = "//button[@id='agree']"

            [selectors.tistory]
            submit_button = "//button[@type='submit']"
            "#,
        )
        .unwrap();

        let result = Config::from_toml_file(&path);
        std::fs::remove_file(&path).unwrap();
        let config = result.unwrap();

        assert_eq!(config.blog_url, "https://sub.tistory.com");
        assert_eq!(config.wait_policy().poll_interval, Duration::from_millis(50));
        assert_eq!(config.selectors.auth_button, "//button[@id='agree']");
        assert_eq!(config.selectors.login_url, SelectorTable::default().login_url);
        assert_eq!(config.selectors.tistory.submit_button, "//button[@type='submit']");
        assert_eq!(
            config.selectors.tistory.id_input,
            SelectorTable::default().tistory.id_input
        );
        assert!(config.kakao_credentials().is_some());
        assert!(config.headless);
    }

    #[test]
    fn test_from_toml_file_missing() {
        let err = Config::from_toml_file("/definitely/not/here.toml").unwrap_err();
        assert!(matches!(
            err,
            AppError::Config(ConfigError::FileReadFailed { .. })
        ));
    }
}
