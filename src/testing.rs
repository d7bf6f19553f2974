//! 单元测试共用的假 HTTP 传输

use std::sync::Mutex;

use crate::error::{ApiError, AppResult};
use crate::infrastructure::{HttpResponse, HttpTransport, RequestBody};

/// 被记录下来的一次请求
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRequest {
    pub method: &'static str,
    pub url: String,
    pub params: Vec<(String, String)>,
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

impl RecordedRequest {
    /// 第一个同名参数的值
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn keys(&self) -> Vec<&str> {
        self.params.iter().map(|(k, _)| k.as_str()).collect()
    }
}

/// 总是返回同一个响应，并记录所有请求
pub struct FakeTransport {
    response: HttpResponse,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl FakeTransport {
    pub fn respond(status: u16, body: &str) -> Self {
        Self {
            response: HttpResponse::new(status, body),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn last(&self) -> RecordedRequest {
        self.requests().pop().expect("没有任何请求")
    }

    fn record(&self, request: RecordedRequest) -> AppResult<HttpResponse> {
        self.requests.lock().unwrap().push(request);
        Ok(self.response.clone())
    }
}

impl HttpTransport for FakeTransport {
    async fn get(&self, url: &str, query: &[(String, String)]) -> AppResult<HttpResponse> {
        self.record(RecordedRequest {
            method: "GET",
            url: url.to_string(),
            params: query.to_vec(),
            content_type: None,
            body: Vec::new(),
        })
    }

    async fn post_form(&self, url: &str, form: &[(String, String)]) -> AppResult<HttpResponse> {
        self.record(RecordedRequest {
            method: "POST",
            url: url.to_string(),
            params: form.to_vec(),
            content_type: Some("application/x-www-form-urlencoded".to_string()),
            body: Vec::new(),
        })
    }

    async fn post_body(
        &self,
        url: &str,
        query: &[(String, String)],
        content_type: &str,
        body: RequestBody,
    ) -> AppResult<HttpResponse> {
        let body = body
            .into_bytes()
            .await
            .map_err(|source| ApiError::AttachmentRead {
                path: url.to_string(),
                source,
            })?;
        self.record(RecordedRequest {
            method: "POST",
            url: url.to_string(),
            params: query.to_vec(),
            content_type: Some(content_type.to_string()),
            body,
        })
    }
}
