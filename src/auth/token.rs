//! access token 换取
//!
//! 用授权码换 access token，响应体不是 JSON，而是 `access_token=<value>` 形式的纯文本。

use tracing::{error, info};

use crate::auth::extract::extract_access_token;
use crate::error::{AppError, AppResult};
use crate::infrastructure::HttpTransport;
use crate::session::Session;
use crate::utils::logging::mask_secret;

const TOKEN_PATH: &str = "/oauth/access_token";
const GRANT_TYPE: &str = "authorization_code";

/// 用授权码换取 access token
///
/// # 参数
/// - `transport`: HTTP 传输
/// - `session`: 带有授权码的会话
/// - `api_base`: 服务地址，如 `https://www.tistory.com`
///
/// # 返回
/// 返回带有 access token 的新会话
pub async fn exchange_access_token<T: HttpTransport>(
    transport: &T,
    session: &Session,
    api_base: &str,
) -> AppResult<Session> {
    let code = session.require_authorization_code()?;
    let url = format!("{}{}", api_base.trim_end_matches('/'), TOKEN_PATH);

    let params = vec![
        ("client_id".to_string(), session.client_id().to_string()),
        ("client_secret".to_string(), session.client_secret().to_string()),
        ("redirect_uri".to_string(), session.blog_url().to_string()),
        ("code".to_string(), code.to_string()),
        ("grant_type".to_string(), GRANT_TYPE.to_string()),
    ];

    info!("🔄 正在换取 access token...");
    let response = transport.get(&url, &params).await?;
    if response.status != 200 {
        error!("❌ 换取 access token 失败 (status: {})", response.status);
        return Err(AppError::http_status("GetAccessToken", response.status));
    }

    let token = extract_access_token(&response.body)?;
    info!("✅ access token 获取成功: {}", mask_secret(&token));

    Ok(session.with_access_token(token))
}
