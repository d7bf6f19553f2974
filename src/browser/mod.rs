//! 浏览器生命周期
//!
//! 启动新浏览器，或者连接已开启调试端口的浏览器。
//! 无论登录成功还是失败，调用方都要执行 [`BrowserHandle::close`]。

mod connection;
mod headless;

use chromiumoxide::{Browser, Page};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::AppResult;

pub use connection::connect_to_browser;
pub use headless::launch_browser;

/// 一个打开的浏览器及其工作页面
pub struct BrowserHandle {
    browser: Browser,
    page: Page,
    handler: JoinHandle<()>,
    /// 是否由本程序启动（连接到的浏览器不能关闭）
    owned: bool,
}

impl BrowserHandle {
    fn new(browser: Browser, page: Page, handler: JoinHandle<()>, owned: bool) -> Self {
        Self {
            browser,
            page,
            handler,
            owned,
        }
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    /// 关闭浏览器（或只关闭页面），关闭失败只记录警告
    pub async fn close(mut self) {
        if self.owned {
            if let Err(e) = self.browser.close().await {
                warn!("关闭浏览器失败: {}", e);
            }
            if let Err(e) = self.browser.wait().await {
                warn!("等待浏览器退出失败: {}", e);
            }
        } else if let Err(e) = self.page.close().await {
            warn!("关闭页面失败: {}", e);
        }
        self.handler.abort();
        debug!("浏览器已关闭");
    }
}

/// 按配置打开浏览器：设置了调试端口就连接，否则启动新浏览器
pub async fn open(config: &Config) -> AppResult<BrowserHandle> {
    match config.browser_debug_port {
        Some(port) => connect_to_browser(port).await,
        None => launch_browser(config.headless, config.browser_executable.as_deref()).await,
    }
}
