//! API 模块
//!
//! 负责所有与 Tistory 资源接口的交互

pub mod blog;
pub mod category;
pub mod client;
pub mod comment;
pub mod endpoints;
pub mod post;

// 重新导出常用类型
pub use client::{decode_document, stringify_fields, ApiDocument, TistoryClient};
