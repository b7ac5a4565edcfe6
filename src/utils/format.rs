//! 课程编号格式化
//!
//! 选课页面的下拉选项对编号有固定位数要求（课程号 3 位、班次号 2 位），
//! 否则 "11" 和 "111" 这类编号会产生歧义。这里把用户输入的编号统一补零。

/// 格式化课程/班次编号，例如 `"Ma 1c"` → `"Ma 001C"`
///
/// 规则：
/// 1. 找到第一个数字，之前的部分视为字母前缀，原样保留
/// 2. 统计全串数字个数，不足 `min_digits` 时在第一个数字前补 `'0'`
/// 3. 第一个数字之后的部分整体转大写（归一化 `c` → `C` 这类字母后缀）
///
/// 整串没有数字时原样返回（全部视为前缀，不补零、不转大写）
pub fn normalize(label: &str, min_digits: usize) -> String {
    let Some((first_digit, _)) = label
        .char_indices()
        .find(|(_, c)| c.is_ascii_digit())
    else {
        return label.to_string();
    };

    let digit_count = label.chars().filter(|c| c.is_ascii_digit()).count();
    let padding = min_digits.saturating_sub(digit_count);

    let prefix = &label[..first_digit];
    let rest = label[first_digit..].to_uppercase();

    format!("{}{}{}", prefix, "0".repeat(padding), rest)
}
