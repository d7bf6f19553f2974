//! 资源接口表
//!
//! 参考: https://tistory.github.io/document-tistory-apis/apis/

/// 请求方式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    /// 参数放在查询字符串里
    Get,
    /// 表单编码的 POST
    PostForm,
    /// 原始字节作为请求体，参数放在查询字符串里
    PostBody,
}

impl Method {
    pub fn as_str(self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::PostForm | Method::PostBody => "POST",
        }
    }
}

/// 一个资源接口
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Endpoint {
    /// 用于日志和错误信息
    pub name: &'static str,
    pub path: &'static str,
    pub method: Method,
    /// 是否需要 blogName 参数
    pub blog_name: bool,
}

const fn endpoint(name: &'static str, path: &'static str, method: Method, blog_name: bool) -> Endpoint {
    Endpoint {
        name,
        path,
        method,
        blog_name,
    }
}

pub const BLOG_INFO: Endpoint = endpoint("GetBlogInfo", "/apis/blog/info", Method::Get, false);

pub const POST_LIST: Endpoint = endpoint("GetPostList", "/apis/post/list", Method::Get, true);
pub const POST_READ: Endpoint = endpoint("GetPost", "/apis/post/read", Method::Get, true);
pub const POST_WRITE: Endpoint = endpoint("WritePost", "/apis/post/write", Method::PostForm, true);
pub const POST_MODIFY: Endpoint =
    endpoint("ModifyPost", "/apis/post/modify", Method::PostForm, true);
pub const POST_ATTACH: Endpoint =
    endpoint("AttachPost", "/apis/post/attach", Method::PostBody, true);

pub const CATEGORY_LIST: Endpoint =
    endpoint("CategoryList", "/apis/category/list", Method::Get, true);

pub const COMMENT_NEWEST: Endpoint =
    endpoint("GetNewCommentList", "/apis/comment/newest", Method::Get, true);
pub const COMMENT_LIST: Endpoint =
    endpoint("GetCommentList", "/apis/comment/list", Method::Get, true);
pub const COMMENT_WRITE: Endpoint =
    endpoint("WriteComment", "/apis/comment/write", Method::PostForm, true);
pub const COMMENT_MODIFY: Endpoint =
    endpoint("ModifyComment", "/apis/comment/modify", Method::PostForm, true);
pub const COMMENT_DELETE: Endpoint =
    endpoint("DeleteComment", "/apis/comment/delete", Method::PostForm, true);
