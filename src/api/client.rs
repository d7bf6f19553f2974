//! Tistory API 客户端
//!
//! 所有资源接口都是同一个形状：
//! 1. 用 access token（以及博客名、`output=json`）作为基础参数
//! 2. 合并调用方传入的字段（全部转成字符串）
//! 3. GET（读）或表单 POST（写）到固定路径
//! 4. 要求状态码 200，响应体按 JSON 对象原样返回
//!
//! 各资源的接口分别在 `blog` / `post` / `category` / `comment` 模块中以
//! `impl TistoryClient` 的形式实现。

use std::fmt;

use serde_json::{Map, Value};
use tracing::{debug, error};

use crate::api::endpoints::{Endpoint, Method};
use crate::error::{ApiError, AppError, AppResult};
use crate::infrastructure::{HttpResponse, HttpTransport, RequestBody, ReqwestTransport};
use crate::session::{Session, DEFAULT_API_BASE_URL};

/// 接口返回的 JSON 对象，客户端不约束其结构
pub type ApiDocument = Map<String, Value>;

/// 附件上传时声明的 Content-Type
pub const MULTIPART_CONTENT_TYPE: &str = "multipart/form-data";

/// Tistory API 客户端
pub struct TistoryClient<T = ReqwestTransport> {
    transport: T,
    session: Session,
    api_base: String,
}

impl<T> fmt::Debug for TistoryClient<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TistoryClient")
            .field("session", &self.session)
            .field("api_base", &self.api_base)
            .finish_non_exhaustive()
    }
}

impl<T: HttpTransport> TistoryClient<T> {
    /// 创建新的客户端，请求发往 Tistory
    pub fn new(transport: T, session: Session) -> Self {
        Self::with_api_base(transport, session, DEFAULT_API_BASE_URL)
    }

    /// 创建自定义服务地址的客户端
    pub fn with_api_base(transport: T, session: Session, api_base: impl Into<String>) -> Self {
        let api_base = api_base.into().trim_end_matches('/').to_string();
        Self {
            transport,
            session,
            api_base,
        }
    }

    /// 获取会话的引用
    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// 调用一个资源接口
    ///
    /// # 参数
    /// - `endpoint`: 接口描述
    /// - `fields`: 调用方字段，追加在基础参数之后
    ///
    /// # 返回
    /// 返回接口的 JSON 对象
    pub(crate) async fn call(
        &self,
        endpoint: &Endpoint,
        fields: Vec<(String, String)>,
    ) -> AppResult<ApiDocument> {
        let mut params = self.seed_params(endpoint)?;
        params.extend(fields);
        self.send(endpoint, params, RequestBody::empty()).await
    }

    /// 以原始请求体调用接口（附件上传）
    pub(crate) async fn call_with_body(
        &self,
        endpoint: &Endpoint,
        body: RequestBody,
    ) -> AppResult<ApiDocument> {
        let params = self.seed_params(endpoint)?;
        self.send(endpoint, params, body).await
    }

    async fn send(
        &self,
        endpoint: &Endpoint,
        params: Vec<(String, String)>,
        body: RequestBody,
    ) -> AppResult<ApiDocument> {
        let url = self.url(endpoint);
        debug!("{} -> {} {}", endpoint.name, endpoint.method.as_str(), url);

        let response = match endpoint.method {
            Method::Get => self.transport.get(&url, &params).await?,
            Method::PostForm => self.transport.post_form(&url, &params).await?,
            Method::PostBody => {
                self.transport
                    .post_body(&url, &params, MULTIPART_CONTENT_TYPE, body)
                    .await?
            }
        };
        decode_document(endpoint.name, response)
    }

    /// 基础参数：access_token、output=json，需要时再加 blogName
    fn seed_params(&self, endpoint: &Endpoint) -> AppResult<Vec<(String, String)>> {
        let token = self.session.require_access_token()?;
        let mut params = vec![
            ("access_token".to_string(), token.to_string()),
            ("output".to_string(), "json".to_string()),
        ];
        if endpoint.blog_name {
            params.push(("blogName".to_string(), self.session.blog_name().to_string()));
        }
        Ok(params)
    }

    fn url(&self, endpoint: &Endpoint) -> String {
        format!("{}{}", self.api_base, endpoint.path)
    }
}

/// 把调用方字段转成字符串参数
///
/// 字符串原样使用，`null` 变成空字符串，其余值使用 JSON 文本（如 `3`、`true`）。
pub fn stringify_fields(options: &ApiDocument) -> Vec<(String, String)> {
    options
        .iter()
        .map(|(key, value)| {
            let value = match value {
                Value::String(s) => s.clone(),
                Value::Null => String::new(),
                other => other.to_string(),
            };
            (key.clone(), value)
        })
        .collect()
}

/// 检查状态码并把响应体解析为 JSON 对象
pub fn decode_document(endpoint: &str, response: HttpResponse) -> AppResult<ApiDocument> {
    if response.status != 200 {
        error!("❌ {} 失败 (status: {})", endpoint, response.status);
        return Err(AppError::http_status(endpoint, response.status));
    }

    serde_json::from_str::<ApiDocument>(&response.body).map_err(|source| {
        error!("❌ {} 响应不是 JSON 对象: {}", endpoint, source);
        AppError::Api(ApiError::Decode {
            endpoint: endpoint.to_string(),
            source,
        })
    })
}
