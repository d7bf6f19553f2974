//! HTTP 传输 - 基础设施层
//!
//! 只负责把请求发出去、把状态码和响应体拿回来，不关心响应内容。

use std::time::Duration;

use reqwest::header::CONTENT_TYPE;
use reqwest::{Body, Client};
use tokio::fs::File;
use tokio::io::AsyncReadExt;
use tracing::debug;

use crate::error::{AppError, AppResult};

const USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) \
    AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36";

/// 一次请求的原始结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

/// 原始请求体
///
/// 文件不会预先读入内存，由传输层边读边发。
#[derive(Debug)]
pub enum RequestBody {
    Bytes(Vec<u8>),
    File(File),
}

impl RequestBody {
    pub fn empty() -> Self {
        RequestBody::Bytes(Vec::new())
    }

    /// 把请求体全部读出来
    pub async fn into_bytes(self) -> std::io::Result<Vec<u8>> {
        match self {
            RequestBody::Bytes(bytes) => Ok(bytes),
            RequestBody::File(mut file) => {
                let mut bytes = Vec::new();
                file.read_to_end(&mut bytes).await?;
                Ok(bytes)
            }
        }
    }
}

impl From<Vec<u8>> for RequestBody {
    fn from(bytes: Vec<u8>) -> Self {
        RequestBody::Bytes(bytes)
    }
}

impl From<File> for RequestBody {
    fn from(file: File) -> Self {
        RequestBody::File(file)
    }
}

impl From<RequestBody> for Body {
    fn from(body: RequestBody) -> Self {
        match body {
            RequestBody::Bytes(bytes) => Body::from(bytes),
            RequestBody::File(file) => Body::from(file),
        }
    }
}

/// HTTP 传输能力
///
/// 参数都是已经字符串化的键值对，允许重复的键。
#[allow(async_fn_in_trait)]
pub trait HttpTransport {
    /// GET，参数放在查询字符串里
    async fn get(&self, url: &str, query: &[(String, String)]) -> AppResult<HttpResponse>;

    /// 表单编码的 POST
    async fn post_form(&self, url: &str, form: &[(String, String)]) -> AppResult<HttpResponse>;

    /// 以原始字节作为请求体的 POST，参数放在查询字符串里
    async fn post_body(
        &self,
        url: &str,
        query: &[(String, String)],
        content_type: &str,
        body: RequestBody,
    ) -> AppResult<HttpResponse>;
}

/// 基于 reqwest 的传输实现
#[derive(Clone)]
pub struct ReqwestTransport {
    http: Client,
}

impl ReqwestTransport {
    /// 创建新的传输，使用默认超时
    pub fn new() -> AppResult<Self> {
        Self::with_timeout(Duration::from_secs(30))
    }

    pub fn with_timeout(timeout: Duration) -> AppResult<Self> {
        let http = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::api_request_failed("http client", e))?;
        Ok(Self { http })
    }

    async fn read(url: &str, response: reqwest::Response) -> AppResult<HttpResponse> {
        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| AppError::api_request_failed(url, e))?;
        debug!("{} -> {} ({} 字节)", url, status, body.len());
        Ok(HttpResponse { status, body })
    }
}

impl HttpTransport for ReqwestTransport {
    async fn get(&self, url: &str, query: &[(String, String)]) -> AppResult<HttpResponse> {
        let response = self
            .http
            .get(url)
            .query(query)
            .send()
            .await
            .map_err(|e| AppError::api_request_failed(url, e))?;
        Self::read(url, response).await
    }

    async fn post_form(&self, url: &str, form: &[(String, String)]) -> AppResult<HttpResponse> {
        let response = self
            .http
            .post(url)
            .form(form)
            .send()
            .await
            .map_err(|e| AppError::api_request_failed(url, e))?;
        Self::read(url, response).await
    }

    async fn post_body(
        &self,
        url: &str,
        query: &[(String, String)],
        content_type: &str,
        body: RequestBody,
    ) -> AppResult<HttpResponse> {
        let response = self
            .http
            .post(url)
            .query(query)
            .header(CONTENT_TYPE, content_type)
            .body(Body::from(body))
            .send()
            .await
            .map_err(|e| AppError::api_request_failed(url, e))?;
        Self::read(url, response).await
    }
}
