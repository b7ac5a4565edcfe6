//! 课程处理上下文
//!
//! 封装"我正在报第几门、哪一门课"这一信息

use std::fmt::Display;

/// 课程处理上下文
#[derive(Debug, Clone)]
pub struct ClassCtx {
    /// 课程在列表中的序号（从1开始，仅用于日志显示）
    pub class_index: usize,

    /// 课程标签，如 "Ma 001C 班次07"
    pub label: String,
}

impl ClassCtx {
    /// 创建新的课程上下文
    pub fn new(class_index: usize, label: String) -> Self {
        Self { class_index, label }
    }
}

impl Display for ClassCtx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[课程 {}] {}", self.class_index, self.label)
    }
}
