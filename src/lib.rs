//! # Tistory Client
//!
//! Tistory 博客开放接口的 Rust 客户端
//!
//! ## 架构设计
//!
//! ### ① 基础设施层（Infrastructure）
//! - `infrastructure/` - 持有稀缺资源（Page、HTTP 连接），只暴露能力
//! - `BrowserDriver` - 导航 / 点击 / 输入 / 读取地址
//! - `HttpTransport` - GET / 表单 POST / 原始请求体 POST
//!
//! ### ② 授权层（Auth）
//! - `auth/` - 浏览器登录拿授权码，再用授权码换 access token
//! - `AuthorizationCodeAcquirer` - 按阶段驱动登录页面
//! - `exchange_access_token` - token 换取
//!
//! ### ③ 接口层（Api）
//! - `api/` - 博客、文章、分类、评论接口，返回原始 JSON 对象
//!
//! ### ④ 编排层（App）
//! - `app` - 管理浏览器生命周期，串联登录流程
//!
//! ## 模块结构

pub mod api;
pub mod app;
pub mod auth;
pub mod browser;
pub mod config;
pub mod error;
pub mod infrastructure;
pub mod session;
pub mod utils;

#[cfg(test)]
mod testing;

// 重新导出常用类型
pub use api::{ApiDocument, TistoryClient};
pub use app::App;
pub use auth::{AuthStage, IdentityProvider, LoginCredentials, SelectorTable, WaitPolicy};
pub use config::Config;
pub use error::{AppError, AppResult};
pub use infrastructure::{
    BrowserDriver, ChromiumDriver, HttpResponse, HttpTransport, RequestBody, ReqwestTransport,
};
pub use session::Session;
