//! 浏览器驱动能力 - 基础设施层
//!
//! 登录流程只依赖这里定义的几个动作，测试中可以用假的驱动替换真实浏览器。

use anyhow::Result;

/// 浏览器驱动
///
/// 所有选择器都是 XPath。
#[allow(async_fn_in_trait)]
pub trait BrowserDriver {
    /// 导航到指定地址并等待页面加载
    async fn navigate(&self, url: &str) -> Result<()>;

    /// 点击元素
    async fn click(&self, selector: &str) -> Result<()>;

    /// 向输入框输入文本
    async fn type_text(&self, selector: &str, text: &str) -> Result<()>;

    /// 元素当前是否存在于页面上
    async fn is_present(&self, selector: &str) -> Result<bool>;

    /// 当前页面地址（没有地址时返回空字符串）
    async fn current_url(&self) -> Result<String>;
}
