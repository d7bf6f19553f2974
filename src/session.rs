//! 会话
//!
//! 保存博客地址、客户端凭据以及登录过程中拿到的授权码和 access token。
//! 会话是不可变值：拿到授权码或 token 后返回一个新的会话。

use std::fmt;

use url::Url;

use crate::error::{AppResult, ConfigError};
use crate::utils::logging::mask_secret;

/// Tistory 服务地址
pub const DEFAULT_API_BASE_URL: &str = "https://www.tistory.com";

const HTTPS_PREFIX: &str = "https://";

/// 登录会话
#[derive(Clone, PartialEq, Eq)]
pub struct Session {
    blog_url: String,
    blog_name: String,
    client_id: String,
    client_secret: String,
    authorization_url: String,
    authorization_code: Option<String>,
    access_token: Option<String>,
}

impl Session {
    /// 创建新的会话，授权地址指向 Tistory
    ///
    /// # 参数
    /// - `blog_url`: 博客地址，必须是 `https://` 开头
    /// - `client_id`: App ID
    /// - `client_secret`: Secret Key
    pub fn new(
        blog_url: impl Into<String>,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
    ) -> AppResult<Self> {
        Self::with_api_base(blog_url, client_id, client_secret, DEFAULT_API_BASE_URL)
    }

    /// 创建新的会话，授权地址为 `{api_base}/oauth/authorize`
    pub fn with_api_base(
        blog_url: impl Into<String>,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        api_base: &str,
    ) -> AppResult<Self> {
        let blog_url = blog_url.into();
        let client_id = client_id.into();
        let client_secret = client_secret.into();

        if blog_url.is_empty() {
            return Err(ConfigError::MissingField { field: "blog_url" }.into());
        }
        if client_id.is_empty() {
            return Err(ConfigError::MissingField { field: "client_id" }.into());
        }
        if client_secret.is_empty() {
            return Err(ConfigError::MissingField {
                field: "client_secret",
            }
            .into());
        }

        let blog_name = parse_blog_name(&blog_url)?;
        let authorization_url = build_authorization_url(api_base, &client_id, &blog_url)?;

        Ok(Self {
            blog_url,
            blog_name,
            client_id,
            client_secret,
            authorization_url,
            authorization_code: None,
            access_token: None,
        })
    }

    /// 返回带有授权码的新会话
    pub fn with_authorization_code(&self, code: impl Into<String>) -> Self {
        Self {
            authorization_code: Some(code.into()),
            ..self.clone()
        }
    }

    /// 返回带有 access token 的新会话
    pub fn with_access_token(&self, token: impl Into<String>) -> Self {
        Self {
            access_token: Some(token.into()),
            ..self.clone()
        }
    }

    pub fn blog_url(&self) -> &str {
        &self.blog_url
    }

    /// 博客名（博客域名的第一段）
    pub fn blog_name(&self) -> &str {
        &self.blog_name
    }

    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    pub fn client_secret(&self) -> &str {
        &self.client_secret
    }

    /// 浏览器需要打开的授权页地址
    pub fn authorization_url(&self) -> &str {
        &self.authorization_url
    }

    pub fn authorization_code(&self) -> Option<&str> {
        self.authorization_code.as_deref()
    }

    pub fn access_token(&self) -> Option<&str> {
        self.access_token.as_deref()
    }

    /// 取出授权码，没有时返回配置错误
    pub fn require_authorization_code(&self) -> AppResult<&str> {
        self.authorization_code()
            .filter(|code| !code.is_empty())
            .ok_or_else(|| ConfigError::MissingAuthorizationCode.into())
    }

    /// 取出 access token，没有时返回配置错误
    pub fn require_access_token(&self) -> AppResult<&str> {
        self.access_token()
            .filter(|token| !token.is_empty())
            .ok_or_else(|| ConfigError::MissingAccessToken.into())
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("blog_url", &self.blog_url)
            .field("blog_name", &self.blog_name)
            .field("client_id", &self.client_id)
            .field("client_secret", &mask_secret(&self.client_secret))
            .field(
                "authorization_code",
                &self.authorization_code.as_deref().map(mask_secret),
            )
            .field("access_token", &self.access_token.as_deref().map(mask_secret))
            .finish()
    }
}

/// 从博客地址解析博客名
///
/// `https://sub.example.com/path` 的博客名为 `sub`。
fn parse_blog_name(blog_url: &str) -> AppResult<String> {
    let invalid = |reason| ConfigError::InvalidBlogUrl {
        url: blog_url.to_string(),
        reason,
    };

    let rest = blog_url
        .strip_prefix(HTTPS_PREFIX)
        .ok_or_else(|| invalid("必须以 https:// 开头"))?;

    let authority = rest.split(['/', '?', '#']).next().unwrap_or_default();
    let host = authority.split(':').next().unwrap_or_default();
    if host.is_empty() {
        return Err(invalid("缺少域名").into());
    }

    let name = host.split('.').next().unwrap_or_default();
    if name.is_empty() {
        return Err(invalid("域名格式不正确").into());
    }
    Ok(name.to_string())
}

fn build_authorization_url(api_base: &str, client_id: &str, blog_url: &str) -> AppResult<String> {
    let endpoint = format!("{}/oauth/authorize", api_base.trim_end_matches('/'));
    let mut url = Url::parse(&endpoint).map_err(|source| ConfigError::InvalidEndpoint {
        url: endpoint.clone(),
        source,
    })?;
    url.query_pairs_mut()
        .append_pair("client_id", client_id)
        .append_pair("redirect_uri", blog_url)
        .append_pair("response_type", "code");
    Ok(url.to_string())
}
