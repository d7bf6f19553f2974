use tracing::{error, info};

use crate::api::TistoryClient;
use crate::auth::{exchange_access_token, AuthorizationCodeAcquirer, ProviderLogin};
use crate::browser;
use crate::config::Config;
use crate::error::AppResult;
use crate::infrastructure::{ChromiumDriver, ReqwestTransport};
use crate::session::Session;
use crate::utils::logging::log_startup;

/// 应用主结构
///
/// 串联整个登录流程：浏览器拿授权码 → 换 access token → 返回 API 客户端
pub struct App {
    config: Config,
}

impl App {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// 完成登录，返回可以直接调用接口的客户端
    pub async fn authorize(&self) -> AppResult<TistoryClient<ReqwestTransport>> {
        let config = &self.config;
        let session = Session::with_api_base(
            &config.blog_url,
            &config.client_id,
            &config.client_secret,
            &config.api_base_url,
        )?;

        // 凭据缺失时不启动浏览器
        let login = ProviderLogin::select(config.kakao_credentials(), config.tistory_credentials())?;
        log_startup(session.blog_url(), login.provider.name());

        let session = self.acquire_code(&session, &login).await?;

        let transport = ReqwestTransport::with_timeout(config.http_timeout())?;
        let session = exchange_access_token(&transport, &session, &config.api_base_url).await?;
        info!("🎉 登录完成，博客: {}", session.blog_name());

        Ok(TistoryClient::with_api_base(
            transport,
            session,
            &config.api_base_url,
        ))
    }

    /// 打开浏览器获取授权码，结束后总是关闭浏览器
    async fn acquire_code(&self, session: &Session, login: &ProviderLogin) -> AppResult<Session> {
        let handle = browser::open(&self.config).await?;
        let driver = ChromiumDriver::new(handle.page().clone());

        let result = AuthorizationCodeAcquirer::new(
            &driver,
            &self.config.selectors,
            self.config.wait_policy(),
        )
        .acquire(session, login)
        .await;

        handle.close().await;

        if let Err(e) = &result {
            error!("❌ 获取授权码失败: {}", e);
        }
        result
    }
}
