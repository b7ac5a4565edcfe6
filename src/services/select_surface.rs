//! 下拉框操作面 - 业务能力层
//!
//! 把"读选项 / 提交选择 / 数选项"抽象成一个最小接口，
//! 真实实现走 JsExecutor，测试里用内存中的假页面替代。

use anyhow::{Context, Result};

use crate::infrastructure::JsExecutor;
use crate::models::field::SelectOption;

/// 单个 select 元素的操作面
///
/// 同一会话上的调用必须串行：级联下拉框在前序提交完成前读取
/// 后继选项是逻辑错误，不只是竞态。
#[allow(async_fn_in_trait)]
pub trait SelectSurface {
    /// 读取当前渲染的选项列表（实时快照，不缓存）
    async fn read_options(&self, selector: &str) -> Result<Vec<SelectOption>>;

    /// 把 select 的值设为指定选项的底层 value 并触发 change 事件
    ///
    /// 重复提交同一个值是幂等的。
    async fn commit_value(&self, selector: &str, value: &str) -> Result<()>;

    /// 当前选项个数（就绪判断用）
    async fn option_count(&self, selector: &str) -> Result<usize>;
}

/// 转义嵌入到单引号 JS 字符串字面量中的文本
pub(crate) fn escape_js(text: &str) -> String {
    text.replace('\\', "\\\\").replace('\'', "\\'")
}

impl SelectSurface for JsExecutor {
    async fn read_options(&self, selector: &str) -> Result<Vec<SelectOption>> {
        let js_code = format!(
            r#"
            Array.from(document.querySelectorAll('{} option')).map((o) => ({{
                label: o.textContent.trim(),
                value: o.value,
            }}))
            "#,
            selector
        );

        self.eval_as(js_code)
            .await
            .with_context(|| format!("读取 {} 的选项列表失败", selector))
    }

    async fn commit_value(&self, selector: &str, value: &str) -> Result<()> {
        let js_code = format!(
            r#"
            (() => {{
                const el = document.querySelector('{selector}');
                if (!el) return false;
                el.value = '{value}';
                el.dispatchEvent(new Event('change', {{ bubbles: true }}));
                return true;
            }})()
            "#,
            selector = selector,
            value = escape_js(value),
        );

        let committed: bool = self
            .eval_as(js_code)
            .await
            .with_context(|| format!("向 {} 提交选择失败", selector))?;

        if !committed {
            anyhow::bail!("页面上找不到下拉框: {}", selector);
        }

        Ok(())
    }

    async fn option_count(&self, selector: &str) -> Result<usize> {
        let js_code = format!(
            "document.querySelectorAll('{} option').length",
            selector
        );

        self.eval_as(js_code)
            .await
            .with_context(|| format!("统计 {} 的选项个数失败", selector))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_js() {
        assert_eq!(escape_js("Yu, T"), "Yu, T");
        assert_eq!(escape_js("O'Brien"), "O\\'Brien");
        assert_eq!(escape_js(r"a\b"), r"a\\b");
    }
}
