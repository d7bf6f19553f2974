//! 文章接口

use std::path::Path;

use tracing::info;

use crate::api::client::{stringify_fields, ApiDocument, TistoryClient};
use crate::api::endpoints;
use crate::error::{ApiError, AppResult};
use crate::infrastructure::{HttpTransport, RequestBody};

impl<T: HttpTransport> TistoryClient<T> {
    /// 文章列表
    ///
    /// # 参数
    /// - `page`: 页码
    pub async fn post_list(&self, page: u32) -> AppResult<ApiDocument> {
        self.call(
            &endpoints::POST_LIST,
            vec![("page".to_string(), page.to_string())],
        )
        .await
    }

    /// 读取文章
    ///
    /// # 参数
    /// - `post_id`: 文章编号
    pub async fn post_read(&self, post_id: u64) -> AppResult<ApiDocument> {
        self.call(
            &endpoints::POST_READ,
            vec![("postId".to_string(), post_id.to_string())],
        )
        .await
    }

    /// 发表文章
    ///
    /// # 参数
    /// - `options`: 文章字段
    ///   - `title`: 标题（必填）
    ///   - `content`: 内容
    ///   - `visibility`: 0 私密（默认）/ 1 保护 / 3 公开
    ///   - `category`: 分类 ID（默认 0）
    ///   - `published`: 发表时间戳，未来时间为预约发表
    ///   - `slogan`: 文章地址
    ///   - `tag`: 标签，以 `,` 分隔
    ///   - `acceptComment`: 是否允许评论（0 / 1，默认 1）
    ///   - `password`: 保护文章的密码
    pub async fn post_write(&self, options: &ApiDocument) -> AppResult<ApiDocument> {
        info!("✏️ 发表文章");
        self.call(&endpoints::POST_WRITE, stringify_fields(options))
            .await
    }

    /// 修改文章
    ///
    /// 字段与 [`post_write`](Self::post_write) 相同，另外需要 `postId`。
    pub async fn post_modify(&self, options: &ApiDocument) -> AppResult<ApiDocument> {
        info!("✏️ 修改文章");
        self.call(&endpoints::POST_MODIFY, stringify_fields(options))
            .await
    }

    /// 上传附件
    ///
    /// 文件内容直接作为请求体边读边发，Content-Type 声明为 `multipart/form-data`。
    pub async fn post_attach(&self, path: impl AsRef<Path>) -> AppResult<ApiDocument> {
        let path = path.as_ref();
        let file = tokio::fs::File::open(path)
            .await
            .map_err(|source| ApiError::AttachmentRead {
                path: path.display().to_string(),
                source,
            })?;
        info!("📎 上传附件: {}", path.display());
        self.call_with_body(&endpoints::POST_ATTACH, RequestBody::File(file))
            .await
    }

    /// 上传已经读入内存的附件
    pub async fn post_attach_bytes(&self, content: Vec<u8>) -> AppResult<ApiDocument> {
        self.call_with_body(&endpoints::POST_ATTACH, RequestBody::Bytes(content))
            .await
    }
}
