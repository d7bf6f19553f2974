//! 授权码获取流程
//!
//! Tistory 没有提供程序化的授权方式，这里驱动浏览器走一遍登录页和授权页，
//! 再从授权后的跳转地址中截取授权码。
//!
//! 流程顺序：
//! 1. 打开登录页
//! 2. 选择登录方式（Kakao / Tistory）
//! 3. 输入账号密码并提交
//! 4. 确认跳转到登录后的页面
//! 5. 打开授权页
//! 6. 点击同意并读取跳转地址
//! 7. 截取授权码

use std::future::Future;
use std::time::{Duration, Instant};

use tokio::time::sleep;
use tracing::{error, info, warn};

use crate::auth::credentials::{LoginCredentials, ProviderLogin};
use crate::auth::extract::extract_authorization_code;
use crate::auth::selectors::SelectorTable;
use crate::auth::stage::AuthStage;
use crate::error::{AppError, AppResult, BrowserError};
use crate::infrastructure::BrowserDriver;
use crate::session::Session;
use crate::utils::logging::mask_secret;

/// 等待策略：轮询元素或地址，直到满足条件或超时
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaitPolicy {
    pub timeout: Duration,
    pub poll_interval: Duration,
}

impl Default for WaitPolicy {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(10),
            poll_interval: Duration::from_millis(200),
        }
    }
}

/// 授权码获取器
///
/// 职责：
/// - 按固定顺序驱动页面
/// - 只尝试一次，不重试
/// - 不持有浏览器资源
pub struct AuthorizationCodeAcquirer<'a, D> {
    driver: &'a D,
    selectors: &'a SelectorTable,
    wait: WaitPolicy,
}

impl<'a, D: BrowserDriver> AuthorizationCodeAcquirer<'a, D> {
    pub fn new(driver: &'a D, selectors: &'a SelectorTable, wait: WaitPolicy) -> Self {
        Self {
            driver,
            selectors,
            wait,
        }
    }

    /// 登录并获取授权码
    ///
    /// # 参数
    /// - `session`: 当前会话（提供授权页地址）
    /// - `login`: 已选定的登录方式和凭据
    ///
    /// # 返回
    /// 返回带有授权码的新会话
    pub async fn acquire(&self, session: &Session, login: &ProviderLogin) -> AppResult<Session> {
        let selectors = login.provider.selectors(self.selectors);
        let credentials = &login.credentials;
        info!(
            "🔐 开始获取授权码 (登录方式: {}, 账号: {})",
            login.provider.name(),
            credentials.id
        );

        // ========== 打开登录页 ==========
        let stage = self.enter(AuthStage::NotStarted);
        self.step(stage, "打开登录页", self.driver.navigate(&self.selectors.login_url))
            .await?;

        // ========== 选择登录方式 ==========
        let stage = self.enter(stage);
        self.wait_for_element(stage, &selectors.login_button).await?;
        self.step(stage, "点击登录方式按钮", self.driver.click(&selectors.login_button))
            .await?;

        // ========== 提交账号密码 ==========
        let stage = self.enter(stage);
        self.wait_for_element(stage, &selectors.id_input).await?;
        self.step(
            stage,
            "输入账号",
            self.driver.type_text(&selectors.id_input, &credentials.id),
        )
        .await?;
        self.wait_for_element(stage, &selectors.password_input).await?;
        self.step(
            stage,
            "输入密码",
            self.driver
                .type_text(&selectors.password_input, &credentials.password),
        )
        .await?;
        self.step(stage, "点击登录按钮", self.driver.click(&selectors.submit_button))
            .await?;

        // ========== 确认登录成功 ==========
        let stage = self.enter(stage);
        let expected = self.selectors.login_after_url.as_str();
        let location = self.settle_location(stage, |url| url == expected).await?;
        if location != expected {
            error!("❌ 登录失败，当前地址: {}", location);
            return Err(AppError::LoginRejected {
                expected: expected.to_string(),
                actual: location,
            });
        }

        // ========== 打开授权页 ==========
        let stage = self.enter(stage);
        self.step(stage, "打开授权页", self.driver.navigate(session.authorization_url()))
            .await?;
        self.wait_for_element(stage, &self.selectors.auth_button)
            .await?;

        // ========== 同意授权 ==========
        let stage = self.enter(stage);
        self.step(stage, "点击同意按钮", self.driver.click(&self.selectors.auth_button))
            .await?;
        let location = self
            .settle_location(stage, |url| url.contains("code="))
            .await?;
        if location.is_empty() {
            error!("❌ 授权后的跳转地址为空");
            return Err(BrowserError::EmptyRedirect { stage }.into());
        }

        // ========== 提取授权码 ==========
        self.enter(stage);
        let code = extract_authorization_code(&location).map_err(|e| {
            error!("❌ 无法提取授权码: {}", e);
            e
        })?;
        info!("✅ 授权码获取成功: {}", mask_secret(&code));

        Ok(session.with_authorization_code(code))
    }

    /// 进入下一个阶段
    fn enter(&self, current: AuthStage) -> AuthStage {
        let next = current.next();
        info!("➡️ [{}]", next);
        next
    }

    /// 执行一个页面动作，失败时带上阶段信息
    async fn step<T>(
        &self,
        stage: AuthStage,
        action: &str,
        command: impl Future<Output = anyhow::Result<T>>,
    ) -> AppResult<T> {
        command.await.map_err(|e| {
            error!("[{}] {} 失败: {}", stage, action, e);
            AppError::browser_command_failed(stage, action, e)
        })
    }

    /// 轮询直到元素出现
    async fn wait_for_element(&self, stage: AuthStage, selector: &str) -> AppResult<()> {
        let started = Instant::now();
        loop {
            let present = self
                .step(stage, "查找元素", self.driver.is_present(selector))
                .await?;
            if present {
                return Ok(());
            }
            if started.elapsed() >= self.wait.timeout {
                warn!("[{}] 等待元素超时: {}", stage, selector);
                return Err(BrowserError::WaitTimedOut {
                    stage,
                    target: selector.to_string(),
                    waited_ms: started.elapsed().as_millis() as u64,
                }
                .into());
            }
            sleep(self.wait.poll_interval).await;
        }
    }

    /// 轮询当前地址，直到满足条件或超时，返回最后读到的地址
    async fn settle_location(
        &self,
        stage: AuthStage,
        done: impl Fn(&str) -> bool,
    ) -> AppResult<String> {
        let started = Instant::now();
        loop {
            let location = self
                .step(stage, "读取当前地址", self.driver.current_url())
                .await?;
            if done(&location) {
                return Ok(location);
            }
            if started.elapsed() >= self.wait.timeout {
                warn!("[{}] 等待跳转超时，当前地址: {}", stage, location);
                return Ok(location);
            }
            sleep(self.wait.poll_interval).await;
        }
    }
}

/// 选择登录方式后获取授权码
///
/// 两组凭据都不完整时，在任何浏览器操作之前返回配置错误。
pub async fn acquire_authorization_code<D: BrowserDriver>(
    driver: &D,
    selectors: &SelectorTable,
    wait: WaitPolicy,
    session: &Session,
    kakao: Option<LoginCredentials>,
    tistory: Option<LoginCredentials>,
) -> AppResult<Session> {
    let login = ProviderLogin::select(kakao, tistory)?;
    AuthorizationCodeAcquirer::new(driver, selectors, wait)
        .acquire(session, &login)
        .await
}

#[cfg(test)]
mod tests {
    use std::collections::{HashMap, HashSet};
    use std::sync::Mutex;

    use anyhow::anyhow;

    use super::*;
    use crate::error::{ConfigError, ParseError};

    const REDIRECT: &str = "https://sub.example.com/?code=ABC123&state=xyz";

    /// 记录所有动作的假驱动
    struct FakeDriver {
        actions: Mutex<Vec<String>>,
        location: Mutex<String>,
        /// 点击某个元素后地址变成什么
        redirects: HashMap<String, String>,
        missing: HashSet<String>,
        broken: HashSet<String>,
    }

    impl FakeDriver {
        fn new(table: &SelectorTable) -> Self {
            let mut redirects = HashMap::new();
            for provider in [&table.kakao, &table.tistory] {
                redirects.insert(
                    provider.submit_button.clone(),
                    table.login_after_url.clone(),
                );
            }
            redirects.insert(table.auth_button.clone(), REDIRECT.to_string());
            Self {
                actions: Mutex::new(Vec::new()),
                location: Mutex::new(String::new()),
                redirects,
                missing: HashSet::new(),
                broken: HashSet::new(),
            }
        }

        fn actions(&self) -> Vec<String> {
            self.actions.lock().unwrap().clone()
        }

        fn touched(&self, selector: &str) -> bool {
            self.actions().iter().any(|a| a.ends_with(selector))
        }

        fn record(&self, action: String) {
            self.actions.lock().unwrap().push(action);
        }
    }

    impl BrowserDriver for FakeDriver {
        async fn navigate(&self, url: &str) -> anyhow::Result<()> {
            self.record(format!("navigate {url}"));
            *self.location.lock().unwrap() = url.to_string();
            Ok(())
        }

        async fn click(&self, selector: &str) -> anyhow::Result<()> {
            self.record(format!("click {selector}"));
            if self.broken.contains(selector) {
                return Err(anyhow!("element is detached"));
            }
            if let Some(target) = self.redirects.get(selector) {
                *self.location.lock().unwrap() = target.clone();
            }
            Ok(())
        }

        async fn type_text(&self, selector: &str, _text: &str) -> anyhow::Result<()> {
            self.record(format!("type {selector}"));
            Ok(())
        }

        async fn is_present(&self, selector: &str) -> anyhow::Result<bool> {
            self.record(format!("find {selector}"));
            Ok(!self.missing.contains(selector))
        }

        async fn current_url(&self) -> anyhow::Result<String> {
            Ok(self.location.lock().unwrap().clone())
        }
    }

    fn fast_wait() -> WaitPolicy {
        WaitPolicy {
            timeout: Duration::from_millis(30),
            poll_interval: Duration::from_millis(5),
        }
    }

    fn session() -> Session {
        Session::new("https://sub.example.com", "client", "secret").unwrap()
    }

    fn creds() -> Option<LoginCredentials> {
        Some(LoginCredentials::new("user", "password"))
    }

    #[tokio::test]
    async fn test_kakao_login_extracts_code() {
        let table = SelectorTable::default();
        let driver = FakeDriver::new(&table);

        let session = acquire_authorization_code(
            &driver,
            &table,
            fast_wait(),
            &session(),
            creds(),
            None,
        )
        .await
        .unwrap();

        assert_eq!(session.authorization_code(), Some("ABC123"));
        for selector in table.kakao.all() {
            assert!(driver.touched(selector), "未访问 {selector}");
        }
        for selector in table.tistory.all() {
            assert!(!driver.touched(selector), "不应访问 {selector}");
        }

        let actions = driver.actions();
        assert_eq!(actions[0], format!("navigate {}", table.login_url));
        assert!(actions.contains(&format!("navigate {}", session.authorization_url())));
        assert_eq!(
            actions.last().unwrap(),
            &format!("click {}", table.auth_button)
        );
    }

    #[tokio::test]
    async fn test_tistory_login_never_touches_kakao_selectors() {
        let table = SelectorTable::default();
        let driver = FakeDriver::new(&table);

        let session = acquire_authorization_code(
            &driver,
            &table,
            fast_wait(),
            &session(),
            None,
            creds(),
        )
        .await
        .unwrap();

        assert_eq!(session.authorization_code(), Some("ABC123"));
        for selector in table.tistory.all() {
            assert!(driver.touched(selector));
        }
        for selector in table.kakao.all() {
            assert!(!driver.touched(selector));
        }
    }

    #[tokio::test]
    async fn test_missing_credentials_fail_before_browser() {
        let table = SelectorTable::default();
        let driver = FakeDriver::new(&table);

        let err = acquire_authorization_code(&driver, &table, fast_wait(), &session(), None, None)
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            AppError::Config(ConfigError::MissingLoginCredentials)
        ));
        assert!(driver.actions().is_empty());
    }

    #[tokio::test]
    async fn test_wrong_post_login_location_is_login_rejected() {
        let table = SelectorTable::default();
        let mut driver = FakeDriver::new(&table);
        driver.redirects.insert(
            table.kakao.submit_button.clone(),
            "https://accounts.kakao.com/login?error=1".to_string(),
        );

        let login = ProviderLogin::select(creds(), None).unwrap();
        let err = AuthorizationCodeAcquirer::new(&driver, &table, fast_wait())
            .acquire(&session(), &login)
            .await
            .unwrap_err();

        match err {
            AppError::LoginRejected { expected, actual } => {
                assert_eq!(expected, "https://www.tistory.com/");
                assert_eq!(actual, "https://accounts.kakao.com/login?error=1");
            }
            other => panic!("期望登录失败, 实际: {other:?}"),
        }
        assert!(!driver.touched(&table.auth_button));
    }

    #[tokio::test]
    async fn test_redirect_without_code_is_parse_error() {
        let table = SelectorTable::default();
        let mut driver = FakeDriver::new(&table);
        driver.redirects.insert(
            table.auth_button.clone(),
            "https://sub.example.com/?error=access_denied".to_string(),
        );

        let err = acquire_authorization_code(
            &driver,
            &table,
            fast_wait(),
            &session(),
            creds(),
            None,
        )
        .await
        .unwrap_err();

        assert!(matches!(
            err,
            AppError::Parse(ParseError::AuthorizationCode { .. })
        ));
    }

    #[tokio::test]
    async fn test_empty_redirect() {
        let table = SelectorTable::default();
        let mut driver = FakeDriver::new(&table);
        driver
            .redirects
            .insert(table.auth_button.clone(), String::new());

        let err = acquire_authorization_code(
            &driver,
            &table,
            fast_wait(),
            &session(),
            creds(),
            None,
        )
        .await
        .unwrap_err();

        assert!(matches!(
            err,
            AppError::Browser(BrowserError::EmptyRedirect {
                stage: AuthStage::ConsentGiven
            })
        ));
    }

    #[tokio::test]
    async fn test_missing_element_times_out_with_stage() {
        let table = SelectorTable::default();
        let mut driver = FakeDriver::new(&table);
        driver.missing.insert(table.kakao.login_button.clone());

        let err = acquire_authorization_code(
            &driver,
            &table,
            fast_wait(),
            &session(),
            creds(),
            None,
        )
        .await
        .unwrap_err();

        match err {
            AppError::Browser(e) => {
                assert!(matches!(e, BrowserError::WaitTimedOut { .. }));
                assert_eq!(e.stage(), Some(AuthStage::IdentityProviderChosen));
            }
            other => panic!("期望浏览器错误, 实际: {other:?}"),
        }
        assert!(!driver.touched(&table.kakao.id_input));
    }

    #[tokio::test]
    async fn test_failed_click_stops_flow() {
        let table = SelectorTable::default();
        let mut driver = FakeDriver::new(&table);
        driver.broken.insert(table.auth_button.clone());

        let err = acquire_authorization_code(
            &driver,
            &table,
            fast_wait(),
            &session(),
            creds(),
            None,
        )
        .await
        .unwrap_err();

        match err {
            AppError::Browser(e) => {
                assert!(matches!(e, BrowserError::CommandFailed { .. }));
                assert_eq!(e.stage(), Some(AuthStage::ConsentGiven));
            }
            other => panic!("期望浏览器错误, 实际: {other:?}"),
        }
    }
}
