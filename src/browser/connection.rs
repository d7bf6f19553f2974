use chromiumoxide::Browser;
use futures::StreamExt;
use tracing::{debug, error, info};

use crate::browser::BrowserHandle;
use crate::error::{AppError, AppResult};

/// 连接到已开启调试端口的浏览器，并新建一个空白页面
///
/// 浏览器本身不归本程序所有，关闭时只关闭新建的页面。
pub async fn connect_to_browser(port: u16) -> AppResult<BrowserHandle> {
    let browser_url = format!("http://localhost:{}", port);
    info!("正在连接到浏览器: {}", browser_url);

    let (browser, mut handler) = Browser::connect(&browser_url).await.map_err(|e| {
        error!("连接浏览器失败: {}", e);
        AppError::browser_connection_failed(port, e)
    })?;
    debug!("浏览器连接成功");

    // 在后台处理浏览器事件
    let handler = tokio::spawn(async move {
        while let Some(h) = handler.next().await {
            if h.is_err() {
                break;
            }
        }
    });

    debug!("创建空白页面");
    let page = match browser.new_page("about:blank").await {
        Ok(page) => page,
        Err(e) => {
            error!("创建空白页面失败: {}", e);
            handler.abort();
            return Err(AppError::browser_connection_failed(port, e));
        }
    };

    Ok(BrowserHandle::new(browser, page, handler, false))
}
