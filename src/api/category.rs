//! 分类接口

use crate::api::client::{ApiDocument, TistoryClient};
use crate::api::endpoints;
use crate::error::AppResult;
use crate::infrastructure::HttpTransport;

impl<T: HttpTransport> TistoryClient<T> {
    /// 分类列表
    ///
    /// 每个分类包含 id、name、parent、label（含父分类的完整名称，以 `/` 分隔）、entries（文章数）。
    pub async fn category_list(&self) -> AppResult<ApiDocument> {
        self.call(&endpoints::CATEGORY_LIST, Vec::new()).await
    }
}
