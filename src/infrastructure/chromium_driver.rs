//! Chromium 驱动 - 基础设施层
//!
//! 持有唯一的 page 资源，只暴露页面操作能力

use anyhow::{anyhow, Result};
use chromiumoxide::element::Element;
use chromiumoxide::error::CdpError;
use chromiumoxide::Page;
use tracing::debug;

use crate::infrastructure::driver::BrowserDriver;

/// 基于 chromiumoxide 的浏览器驱动
///
/// 职责：
/// - 持有唯一的 Page 资源
/// - 暴露导航 / 点击 / 输入 / 读取地址能力
/// - 不认识登录流程
pub struct ChromiumDriver {
    page: Page,
}

impl ChromiumDriver {
    /// 创建新的驱动
    pub fn new(page: Page) -> Self {
        Self { page }
    }

    /// 获取 page 的引用（用于其他操作）
    pub fn page(&self) -> &Page {
        &self.page
    }

    /// 查找第一个匹配的元素
    async fn element(&self, selector: &str) -> Result<Element> {
        self.page
            .find_xpaths(selector)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| anyhow!("找不到元素: {}", selector))
    }
}

/// 查询结果为空时，Chrome 会返回协议错误或 NotFound；连接层面的错误不算
fn is_missing_element(err: &CdpError) -> bool {
    matches!(err, CdpError::NotFound | CdpError::Chrome(_))
}

impl BrowserDriver for ChromiumDriver {
    async fn navigate(&self, url: &str) -> Result<()> {
        debug!("导航到: {}", url);
        self.page.goto(url).await?;
        Ok(())
    }

    async fn click(&self, selector: &str) -> Result<()> {
        debug!("点击: {}", selector);
        self.element(selector).await?.click().await?;
        Ok(())
    }

    async fn type_text(&self, selector: &str, text: &str) -> Result<()> {
        debug!("输入: {} ({} 字符)", selector, text.chars().count());
        self.element(selector)
            .await?
            .click()
            .await?
            .type_str(text)
            .await?;
        Ok(())
    }

    async fn is_present(&self, selector: &str) -> Result<bool> {
        match self.page.find_xpaths(selector).await {
            Ok(elements) => Ok(!elements.is_empty()),
            Err(e) if is_missing_element(&e) => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    async fn current_url(&self) -> Result<String> {
        Ok(self.page.url().await?.unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_lookup_errors_count_as_missing() {
        assert!(is_missing_element(&CdpError::NotFound));
        assert!(!is_missing_element(&CdpError::NoResponse));
        assert!(!is_missing_element(&CdpError::Timeout));
        assert!(!is_missing_element(&CdpError::msg("websocket closed")));
    }
}
