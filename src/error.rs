//! 错误类型
//!
//! 错误分三层：
//! - `ResolveError`：单个字段解析失败，对当前课程是致命的
//! - `EnrollError`：单门课程报名失败，只影响该课程，不中断整轮
//! - `SessionError`：会话/导航级失败，共享页面状态已不可信，整轮终止

use thiserror::Error;

use crate::models::field::FieldKey;

/// 字段解析错误
#[derive(Debug, Error)]
pub enum ResolveError {
    /// 当前选项列表中找不到目标文本（多半是数据问题：该选项确实不存在）
    #[error("{field}下拉框中找不到选项: {target}")]
    NoMatch { field: FieldKey, target: String },

    /// 后继下拉框在时限内未就绪（多半是页面/导航问题而非数据问题）
    #[error("{field}提交后，后继下拉框超时未就绪")]
    Timeout { field: FieldKey },

    /// 页面操作本身失败
    #[error("页面操作失败: {0}")]
    Page(#[source] anyhow::Error),
}

impl ResolveError {
    /// 出错的字段（页面操作失败时无法归属到具体字段）
    pub fn field(&self) -> Option<FieldKey> {
        match self {
            ResolveError::NoMatch { field, .. } | ResolveError::Timeout { field } => Some(*field),
            ResolveError::Page(_) => None,
        }
    }
}

/// 单门课程报名错误
#[derive(Debug, Error)]
pub enum EnrollError {
    /// 某个字段解析失败
    #[error("[{class}] {field}解析失败: {source}")]
    Resolve {
        class: String,
        field: FieldKey,
        #[source]
        source: ResolveError,
    },

    /// 保存按钮点击或提交后的页面跳转失败
    #[error("[{class}] 提交失败: {source}")]
    Submit {
        class: String,
        #[source]
        source: anyhow::Error,
    },
}

/// 会话级错误，终止整轮报名
#[derive(Debug, Error)]
pub enum SessionError {
    /// 浏览器会话无法建立
    #[error("启动浏览器会话失败: {0}")]
    Launch(#[source] anyhow::Error),

    /// 登录或进入选课入口失败
    #[error("登录选课系统失败: {0}")]
    Login(#[source] anyhow::Error),

    /// 两门课程之间入口页重置失败，后续课程无法从已知状态开始
    #[error("返回选课入口页失败: {0}")]
    Navigation(#[source] anyhow::Error),
}
