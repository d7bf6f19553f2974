//! 认证模块
//!
//! - `code_flow` - 驱动浏览器登录并获取授权码
//! - `token` - 用授权码换取 access token
//! - `extract` - 授权码 / token 的字符串截取
//! - `selectors` - 登录页元素选择器表
//! - `credentials` - 登录凭据与登录方式选择

pub mod code_flow;
pub mod credentials;
pub mod extract;
pub mod selectors;
pub mod stage;
pub mod token;

pub use code_flow::{acquire_authorization_code, AuthorizationCodeAcquirer, WaitPolicy};
pub use credentials::{IdentityProvider, LoginCredentials, ProviderLogin};
pub use extract::{extract_access_token, extract_authorization_code};
pub use selectors::{ProviderSelectors, SelectorTable};
pub use stage::AuthStage;
pub use token::exchange_access_token;
