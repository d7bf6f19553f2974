//! 授权码 / access token 的字符串截取
//!
//! 服务端返回的格式是固定的，这里刻意不用 URL 解析，
//! 按分隔符原样截取，与实际响应保持兼容。

use crate::error::{AppResult, ParseError};
use crate::utils::logging::truncate_text;

const CODE_MARKER: &str = "code=";
const STATE_MARKER: &str = "&state";
const ACCESS_TOKEN_PREFIX: &str = "access_token";

/// 从授权后的跳转地址中截取授权码
///
/// 授权码是 `code=` 与其后第一个 `&state` 之间的文本，两个分隔符缺一不可。
///
/// ```
/// use tistory_client::auth::extract_authorization_code;
///
/// let code = extract_authorization_code("http://x?code=ABC123&state=xyz").unwrap();
/// assert_eq!(code, "ABC123");
/// ```
pub fn extract_authorization_code(location: &str) -> AppResult<String> {
    let (_, after_code) =
        location
            .split_once(CODE_MARKER)
            .ok_or_else(|| ParseError::AuthorizationCode {
                location: location.to_string(),
                missing: CODE_MARKER,
            })?;

    let (code, _) =
        after_code
            .split_once(STATE_MARKER)
            .ok_or_else(|| ParseError::AuthorizationCode {
                location: location.to_string(),
                missing: STATE_MARKER,
            })?;

    Ok(code.to_string())
}

/// 从 token 接口的响应体中截取 access token
///
/// 响应体形如 `access_token=<value>`，必须以 `access_token` 开头并且包含 `=`，
/// token 为第一个 `=` 之后的全部文本。
pub fn extract_access_token(body: &str) -> AppResult<String> {
    let (_, token) = body.split_once('=').ok_or_else(|| ParseError::AccessToken {
        reason: "缺少 '='",
        preview: truncate_text(body, 40),
    })?;

    if !body.starts_with(ACCESS_TOKEN_PREFIX) {
        return Err(ParseError::AccessToken {
            reason: "不是以 access_token 开头",
            preview: truncate_text(body, 40),
        }
        .into());
    }

    Ok(token.to_string())
}
