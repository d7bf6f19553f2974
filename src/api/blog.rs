//! 博客信息接口

use tracing::info;

use crate::api::client::{ApiDocument, TistoryClient};
use crate::api::endpoints;
use crate::error::AppResult;
use crate::infrastructure::HttpTransport;

impl<T: HttpTransport> TistoryClient<T> {
    /// 博客信息
    ///
    /// 返回当前 access token 对应账号下所有博客的信息。
    /// https://tistory.github.io/document-tistory-apis/apis/v1/blog/list.html
    pub async fn blog_info(&self) -> AppResult<ApiDocument> {
        info!("📖 获取博客信息");
        self.call(&endpoints::BLOG_INFO, Vec::new()).await
    }
}
