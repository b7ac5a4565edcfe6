//! 目标课程
//!
//! 用户在 classes.toml 中声明想报的课程，归一化之后不可变，
//! 每次报名尝试消费一次，不做持久化。

use serde::Deserialize;

use crate::models::field::FieldKey;
use crate::utils::format::normalize;

/// 课程号的固定数字位数，如 `1c` → `001C`
pub const OFFERING_CODE_DIGITS: usize = 3;

/// 班次号的固定数字位数，如 `7` → `07`
pub const SECTION_CODE_DIGITS: usize = 2;

/// 一门待报名的课程
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DesiredClass {
    /// 院系缩写，如 "Ma"
    pub department: String,
    /// 课程号，如 "1c"（归一化后 "001C"）
    pub offering_code: String,
    /// 班次号，如 "7"（归一化后 "07"）
    pub section_code: String,
}

impl DesiredClass {
    /// 返回归一化后的副本：课程号补到 3 位数字、班次号补到 2 位，
    /// 院系缩写原样保留
    pub fn normalized(&self) -> Self {
        Self {
            department: self.department.clone(),
            offering_code: normalize(&self.offering_code, OFFERING_CODE_DIGITS),
            section_code: normalize(&self.section_code, SECTION_CODE_DIGITS),
        }
    }

    /// 取某个字段要匹配的目标文本
    pub fn target_for(&self, key: FieldKey) -> &str {
        match key {
            FieldKey::Department => &self.department,
            FieldKey::Offering => &self.offering_code,
            FieldKey::Section => &self.section_code,
        }
    }

    /// 用于日志和错误信息的课程标签
    pub fn display_label(&self) -> String {
        format!(
            "{} {} 班次{}",
            self.department, self.offering_code, self.section_code
        )
    }
}

/// classes.toml 的顶层结构
#[derive(Debug, Clone, Deserialize)]
pub struct ClassList {
    #[serde(default)]
    pub classes: Vec<DesiredClass>,
}
