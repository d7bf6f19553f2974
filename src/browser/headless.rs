use std::path::Path;

use chromiumoxide::{Browser, BrowserConfig};
use futures::StreamExt;
use tracing::{debug, error, info};

use crate::browser::BrowserHandle;
use crate::error::{AppResult, BrowserError};

/// 启动浏览器并打开一个空白页面
///
/// # 参数
/// - `headless`: 是否使用无头模式
/// - `executable`: 浏览器可执行文件路径，为 `None` 时由 chromiumoxide 自动查找
pub async fn launch_browser(headless: bool, executable: Option<&str>) -> AppResult<BrowserHandle> {
    info!(
        "🚀 启动{}浏览器...",
        if headless { "无头" } else { "有界面" }
    );

    let mut builder = BrowserConfig::builder();
    builder = if headless {
        builder.new_headless_mode()
    } else {
        builder.with_head()
    };
    if let Some(path) = executable {
        debug!("浏览器路径: {}", path);
        builder = builder.chrome_executable(Path::new(path));
    }

    let config = builder
        .args(vec![
            "--disable-gpu",           // 无头模式下禁用 GPU
            "--no-sandbox",            // 容器里没有沙盒权限
            "--disable-dev-shm-usage", // 防止共享内存不足
        ])
        .build()
        .map_err(|e| {
            error!("配置浏览器失败: {}", e);
            BrowserError::LaunchFailed { source: e.into() }
        })?;

    let (browser, mut handler) = Browser::launch(config).await.map_err(|e| {
        error!("启动浏览器失败: {}", e);
        BrowserError::LaunchFailed {
            source: Box::new(e),
        }
    })?;
    debug!("浏览器启动成功");

    // 在后台处理浏览器事件
    let handler = tokio::spawn(async move {
        while let Some(h) = handler.next().await {
            if h.is_err() {
                break;
            }
        }
    });

    let page = match browser.new_page("about:blank").await {
        Ok(page) => page,
        Err(e) => {
            error!("创建页面失败: {}", e);
            handler.abort();
            return Err(BrowserError::LaunchFailed {
                source: Box::new(e),
            }
            .into());
        }
    };

    info!("✅ 浏览器已就绪");
    Ok(BrowserHandle::new(browser, page, handler, true))
}
