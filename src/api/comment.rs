//! 评论接口

use tracing::info;

use crate::api::client::{stringify_fields, ApiDocument, TistoryClient};
use crate::api::endpoints;
use crate::error::AppResult;
use crate::infrastructure::HttpTransport;

impl<T: HttpTransport> TistoryClient<T> {
    /// 最新评论列表
    ///
    /// # 参数
    /// - `page`: 页码（默认 1）
    /// - `count`: 每页评论数（默认 10，最大 10）
    pub async fn comment_newest(&self, page: u32, count: u32) -> AppResult<ApiDocument> {
        self.call(
            &endpoints::COMMENT_NEWEST,
            vec![
                ("page".to_string(), page.to_string()),
                ("count".to_string(), count.to_string()),
            ],
        )
        .await
    }

    /// 某篇文章的评论列表
    pub async fn comment_list(&self, post_id: u64) -> AppResult<ApiDocument> {
        self.call(
            &endpoints::COMMENT_LIST,
            vec![("postId".to_string(), post_id.to_string())],
        )
        .await
    }

    /// 发表评论
    ///
    /// # 参数
    /// - `options`: 评论字段
    ///   - `postId`: 文章 ID（必填）
    ///   - `parentId`: 父评论 ID（回复时使用）
    ///   - `content`: 内容
    ///   - `secret`: 1 私密评论 / 0 公开（默认）
    pub async fn comment_write(&self, options: &ApiDocument) -> AppResult<ApiDocument> {
        info!("💬 发表评论");
        self.call(&endpoints::COMMENT_WRITE, stringify_fields(options))
            .await
    }

    /// 修改评论
    ///
    /// 字段与 [`comment_write`](Self::comment_write) 相同，另外需要 `commentId`。
    pub async fn comment_modify(&self, options: &ApiDocument) -> AppResult<ApiDocument> {
        info!("💬 修改评论");
        self.call(&endpoints::COMMENT_MODIFY, stringify_fields(options))
            .await
    }

    /// 删除评论
    ///
    /// 需要 `postId` 和 `commentId`。
    pub async fn comment_delete(&self, options: &ApiDocument) -> AppResult<ApiDocument> {
        info!("🗑️ 删除评论");
        self.call(&endpoints::COMMENT_DELETE, stringify_fields(options))
            .await
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::api::TistoryClient;
    use crate::session::Session;
    use crate::testing::FakeTransport;

    fn client() -> TistoryClient<FakeTransport> {
        let session = Session::new("https://sub.example.com", "client", "secret")
            .unwrap()
            .with_access_token("TOKEN42");
        TistoryClient::new(
            FakeTransport::respond(200, r#"{"tistory":{"status":"200"}}"#),
            session,
        )
    }

    #[tokio::test]
    async fn test_comment_newest_sends_paging() {
        let client = client();
        client.comment_newest(1, 10).await.unwrap();

        let request = client.transport().last();
        assert_eq!(request.method, "GET");
        assert_eq!(request.url, "https://www.tistory.com/apis/comment/newest");
        assert_eq!(request.param("page"), Some("1"));
        assert_eq!(request.param("count"), Some("10"));
    }

    #[tokio::test]
    async fn test_comment_list_sends_post_id() {
        let client = client();
        client.comment_list(5).await.unwrap();

        let request = client.transport().last();
        assert_eq!(request.url, "https://www.tistory.com/apis/comment/list");
        assert_eq!(request.param("postId"), Some("5"));
    }

    #[tokio::test]
    async fn test_comment_writes_are_form_posts() {
        let client = client();
        let options = json!({ "postId": 5, "commentId": 9, "content": "감사합니다", "secret": 0 });
        let options = options.as_object().unwrap();

        client.comment_write(options).await.unwrap();
        client.comment_modify(options).await.unwrap();
        client.comment_delete(options).await.unwrap();

        let requests = client.transport().requests();
        let urls: Vec<&str> = requests.iter().map(|r| r.url.as_str()).collect();
        assert_eq!(
            urls,
            vec![
                "https://www.tistory.com/apis/comment/write",
                "https://www.tistory.com/apis/comment/modify",
                "https://www.tistory.com/apis/comment/delete",
            ]
        );
        for request in &requests {
            assert_eq!(request.method, "POST");
            assert_eq!(request.param("access_token"), Some("TOKEN42"));
            assert_eq!(request.param("blogName"), Some("sub"));
            assert_eq!(request.param("content"), Some("감사합니다"));
            assert_eq!(request.param("commentId"), Some("9"));
        }
    }
}
