//! 基础设施层
//!
//! 持有稀缺资源（浏览器页面、HTTP 连接），只暴露能力

pub mod chromium_driver;
pub mod driver;
pub mod http_transport;

pub use chromium_driver::ChromiumDriver;
pub use driver::BrowserDriver;
pub use http_transport::{HttpResponse, HttpTransport, RequestBody, ReqwestTransport};
