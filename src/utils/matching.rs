//! 下拉选项匹配
//!
//! 把人类可读的目标文本（如 `"Ma"`、`"001C"`、`"07"`）匹配到下拉框中
//! 某个选项的底层 value。按页面渲染顺序扫描，取第一个命中的选项。

use crate::models::field::SelectOption;

/// 匹配模式
///
/// 由调用方针对每个字段显式选择：
/// - `Exact`：选项文本与目标完全相等（区分大小写），用于已归一化的短编号
/// - `Substring`：选项文本包含目标（不区分大小写），用于带教师名等
///   附加信息的长选项文本
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchMode {
    Exact,
    Substring,
}

/// 在选项列表中查找第一个匹配目标的选项
///
/// 列表顺序即页面渲染顺序；存在重复文本时第一个出现的选项胜出。
/// 没有任何选项匹配时返回 `None`。
pub fn find_option<'a>(
    options: &'a [SelectOption],
    target: &str,
    mode: MatchMode,
) -> Option<&'a SelectOption> {
    match mode {
        MatchMode::Exact => options.iter().find(|opt| opt.label == target),
        MatchMode::Substring => {
            let target_lower = target.to_lowercase();
            options
                .iter()
                .find(|opt| opt.label.to_lowercase().contains(&target_lower))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opt(label: &str, value: &str) -> SelectOption {
        SelectOption {
            label: label.to_string(),
            value: value.to_string(),
        }
    }

    #[test]
    fn test_exact_first_match_wins() {
        // 重复文本时取第一个出现的选项
        let options = vec![opt("Ma", "142"), opt("Ch", "99"), opt("Ma", "999")];
        let hit = find_option(&options, "Ma", MatchMode::Exact).unwrap();
        assert_eq!(hit.value, "142");
    }

    #[test]
    fn test_exact_is_case_sensitive() {
        let options = vec![opt("Ma", "142")];
        assert!(find_option(&options, "ma", MatchMode::Exact).is_none());
        assert!(find_option(&options, "Ma", MatchMode::Exact).is_some());
    }

    #[test]
    fn test_exact_no_match() {
        let options = vec![opt("Ma", "142"), opt("Ch", "99")];
        assert!(find_option(&options, "Ph", MatchMode::Exact).is_none());
    }

    #[test]
    fn test_substring_case_insensitive() {
        let options = vec![opt("Chemistry", "7")];
        let hit = find_option(&options, "chem", MatchMode::Substring).unwrap();
        assert_eq!(hit.value, "7");
    }

    #[test]
    fn test_substring_matches_section_with_instructor() {
        // 班次选项通常带教师名，如 "07 Yu, T"
        let options = vec![opt("01 Smith, J", "11"), opt("07 Yu, T", "17")];
        let hit = find_option(&options, "07", MatchMode::Substring).unwrap();
        assert_eq!(hit.value, "17");
    }

    #[test]
    fn test_empty_options() {
        assert!(find_option(&[], "Ma", MatchMode::Exact).is_none());
        assert!(find_option(&[], "Ma", MatchMode::Substring).is_none());
    }
}
