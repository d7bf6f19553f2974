use thiserror::Error;

use crate::auth::AuthStage;

/// 应用程序错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// 配置错误（构造参数缺失/非法、登录凭据缺失）
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),
    /// 浏览器自动化错误
    #[error("浏览器错误: {0}")]
    Browser(#[from] BrowserError),
    /// 登录后没有跳转到预期页面（凭据被拒绝）
    #[error("登录失败: 期望跳转到 {expected}, 实际停留在 {actual}")]
    LoginRejected { expected: String, actual: String },
    /// 授权码 / access token 解析错误
    #[error("解析错误: {0}")]
    Parse(#[from] ParseError),
    /// API 调用错误
    #[error("API错误: {0}")]
    Api(#[from] ApiError),
}

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 必填字段为空
    #[error("{field} 不能为空")]
    MissingField { field: &'static str },
    /// 博客地址不合法
    #[error("博客地址 '{url}' 不合法: {reason}")]
    InvalidBlogUrl { url: String, reason: &'static str },
    /// 两组登录凭据都没有提供
    #[error("缺少登录凭据: 需要提供 KAKAO_ID/KAKAO_PASSWORD 或 TISTORY_ID/TISTORY_PASSWORD")]
    MissingLoginCredentials,
    /// 会话中还没有授权码
    #[error("会话中没有授权码，请先完成浏览器登录")]
    MissingAuthorizationCode,
    /// 会话中还没有 access token
    #[error("会话中没有 access token，请先换取 token")]
    MissingAccessToken,
    /// 端点地址无法解析
    #[error("端点地址 '{url}' 无法解析: {source}")]
    InvalidEndpoint {
        url: String,
        #[source]
        source: url::ParseError,
    },
    /// 环境变量解析失败
    #[error("环境变量 {var_name} 解析失败: 值 '{value}' 无法转换为 {expected_type}")]
    EnvVarParseFailed {
        var_name: String,
        value: String,
        expected_type: &'static str,
    },
    /// 读取配置文件失败
    #[error("读取配置文件失败 ({path}): {source}")]
    FileReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// TOML 解析失败
    #[error("TOML解析失败 ({path}): {source}")]
    TomlParseFailed {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

/// 浏览器相关错误
#[derive(Debug, Error)]
pub enum BrowserError {
    /// 启动浏览器失败
    #[error("启动无头浏览器失败: {source}")]
    LaunchFailed {
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// 连接浏览器失败
    #[error("无法连接到浏览器 (端口: {port}): {source}")]
    ConnectionFailed {
        port: u16,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// 某个页面操作失败
    #[error("[{stage}] {action} 失败: {source}")]
    CommandFailed {
        stage: AuthStage,
        action: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// 等待元素或跳转超时
    #[error("[{stage}] 等待 {target} 超时 ({waited_ms}ms)")]
    WaitTimedOut {
        stage: AuthStage,
        target: String,
        waited_ms: u64,
    },
    /// 同意授权后没有拿到跳转地址
    #[error("[{stage}] 授权后的跳转地址为空")]
    EmptyRedirect { stage: AuthStage },
}

impl BrowserError {
    /// 失败发生在哪个阶段（与阶段无关的错误返回 `None`）
    pub fn stage(&self) -> Option<AuthStage> {
        match self {
            BrowserError::CommandFailed { stage, .. }
            | BrowserError::WaitTimedOut { stage, .. }
            | BrowserError::EmptyRedirect { stage } => Some(*stage),
            _ => None,
        }
    }
}

/// 授权码 / token 解析错误
#[derive(Debug, Error)]
pub enum ParseError {
    /// 跳转地址里找不到授权码
    #[error("跳转地址中没有授权码 (缺少 '{missing}'): {location}")]
    AuthorizationCode {
        location: String,
        missing: &'static str,
    },
    /// token 响应体格式不对
    #[error("无法从响应体解析 access token ({reason}): {preview}")]
    AccessToken {
        reason: &'static str,
        preview: String,
    },
}

/// API 调用错误
#[derive(Debug, Error)]
pub enum ApiError {
    /// 网络请求失败
    #[error("API请求失败 ({endpoint}): {source}")]
    RequestFailed {
        endpoint: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// 返回了非 200 状态码
    #[error("{endpoint} 失败 (status: {status})")]
    Http { endpoint: String, status: u16 },
    /// 响应体不是 JSON 对象
    #[error("{endpoint} 响应解析失败: {source}")]
    Decode {
        endpoint: String,
        #[source]
        source: serde_json::Error,
    },
    /// 读取附件失败
    #[error("读取附件失败 ({path}): {source}")]
    AttachmentRead {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

// ========== 便捷构造函数 ==========

impl AppError {
    /// 创建页面操作失败错误
    pub fn browser_command_failed(
        stage: AuthStage,
        action: impl Into<String>,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        AppError::Browser(BrowserError::CommandFailed {
            stage,
            action: action.into(),
            source: source.into(),
        })
    }

    /// 创建浏览器连接错误
    pub fn browser_connection_failed(
        port: u16,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        AppError::Browser(BrowserError::ConnectionFailed {
            port,
            source: Box::new(source),
        })
    }

    /// 创建API请求失败错误
    pub fn api_request_failed(
        endpoint: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        AppError::Api(ApiError::RequestFailed {
            endpoint: endpoint.into(),
            source: Box::new(source),
        })
    }

    /// 创建非 200 状态码错误
    pub fn http_status(endpoint: impl Into<String>, status: u16) -> Self {
        AppError::Api(ApiError::Http {
            endpoint: endpoint.into(),
            status,
        })
    }

    /// 如果是 HTTP 状态码错误，返回状态码
    pub fn http_status_code(&self) -> Option<u16> {
        match self {
            AppError::Api(ApiError::Http { status, .. }) => Some(*status),
            _ => None,
        }
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;
