//! 选课表单的字段链定义
//!
//! 选课页面是一组级联下拉框：院系 → 课程 → 班次，最后以成绩方案
//! 下拉框出现选项作为"可以提交"的信号。字段必须按声明顺序解析，
//! 后一个字段的选项列表只有在前一个字段提交并就绪后才有效。

use std::fmt;

use serde::Deserialize;

use crate::utils::matching::MatchMode;

/// 成绩方案下拉框的选择器（终点就绪信号，本身不做选择）
pub const GRADE_SCHEME_SELECTOR: &str = "select#P63_GRADE_SCHEME";

/// 字段标识
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKey {
    Department,
    Offering,
    Section,
}

impl fmt::Display for FieldKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldKey::Department => write!(f, "院系"),
            FieldKey::Offering => write!(f, "课程"),
            FieldKey::Section => write!(f, "班次"),
        }
    }
}

/// 下拉框中的一个选项快照
///
/// 从页面实时读取，只在单次解析期间有效，不做缓存。
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SelectOption {
    pub label: String,
    pub value: String,
}

/// 后继字段的就绪条件：指定下拉框的选项数达到下限
#[derive(Debug, Clone, Copy)]
pub struct ReadyCheck {
    pub selector: &'static str,
    pub min_options: usize,
}

/// 单个字段的静态配置
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub key: FieldKey,
    /// 该字段对应的 select 元素选择器
    pub selector: &'static str,
    /// 目标文本与选项文本的匹配模式
    pub mode: MatchMode,
    /// 提交本字段后需要等待的后继就绪条件
    pub next_ready: ReadyCheck,
}

/// 固定的字段解析顺序
///
/// 非终点字段的就绪下限是 2：级联下拉框未填充时只有一个占位选项。
/// 终点（成绩方案）下限是 1：出现任何选项即可提交。
pub const FIELD_CHAIN: [FieldSpec; 3] = [
    FieldSpec {
        key: FieldKey::Department,
        selector: "select#P63_DEPARTMENT",
        mode: MatchMode::Exact,
        next_ready: ReadyCheck {
            selector: "select#P63_OFFERING_NAME",
            min_options: 2,
        },
    },
    FieldSpec {
        key: FieldKey::Offering,
        selector: "select#P63_OFFERING_NAME",
        mode: MatchMode::Substring,
        next_ready: ReadyCheck {
            selector: "select#P63_SECTION_INSTRUCTOR",
            min_options: 2,
        },
    },
    FieldSpec {
        key: FieldKey::Section,
        selector: "select#P63_SECTION_INSTRUCTOR",
        mode: MatchMode::Substring,
        next_ready: ReadyCheck {
            selector: GRADE_SCHEME_SELECTOR,
            min_options: 1,
        },
    },
];
