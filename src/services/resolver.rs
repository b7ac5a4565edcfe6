//! 选择器解析 - 业务能力层
//!
//! 核心职责：在一个级联下拉框内，把归一化后的目标文本匹配到
//! 底层 value，提交选择，然后阻塞到后继下拉框就绪为止。
//!
//! 提交是触发后继字段填充选项的唯一手段，因此解析必须严格按
//! 字段链顺序串行执行。

use std::time::Duration;

use tracing::{debug, info};

use crate::config::Config;
use crate::error::ResolveError;
use crate::models::field::FieldSpec;
use crate::services::select_surface::SelectSurface;
use crate::utils::matching::find_option;
use crate::utils::wait::wait_until;

/// 选择器解析器
///
/// 无状态，只携带等待参数；同一会话上一次只允许一个 resolve 在途。
pub struct SelectorResolver {
    timeout: Duration,
    poll_interval: Duration,
}

impl SelectorResolver {
    /// 按配置创建解析器
    pub fn new(config: &Config) -> Self {
        Self {
            timeout: Duration::from_millis(config.resolve_timeout_ms),
            poll_interval: Duration::from_millis(config.poll_interval_ms),
        }
    }

    /// 解析一个字段：枚举选项 → 匹配 → 提交 → 等后继就绪
    ///
    /// 找不到匹配返回 `NoMatch`，后继下拉框超时未就绪返回 `Timeout`，
    /// 两者对当前课程都是致命的，但不应中断整轮报名。
    pub async fn resolve<S: SelectSurface>(
        &self,
        surface: &S,
        spec: &FieldSpec,
        target: &str,
    ) -> Result<(), ResolveError> {
        let options = surface
            .read_options(spec.selector)
            .await
            .map_err(ResolveError::Page)?;

        debug!("{}下拉框当前有 {} 个选项", spec.key, options.len());

        let hit = find_option(&options, target, spec.mode).ok_or_else(|| {
            ResolveError::NoMatch {
                field: spec.key,
                target: target.to_string(),
            }
        })?;

        info!("✓ {}匹配到选项 \"{}\" (value={})", spec.key, hit.label, hit.value);

        surface
            .commit_value(spec.selector, &hit.value)
            .await
            .map_err(ResolveError::Page)?;

        let ready = spec.next_ready;
        let became_ready = wait_until(self.timeout, self.poll_interval, || async move {
            Ok(surface.option_count(ready.selector).await? >= ready.min_options)
        })
        .await
        .map_err(ResolveError::Page)?;

        if !became_ready {
            return Err(ResolveError::Timeout { field: spec.key });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::cell::RefCell;
    use std::collections::HashMap;

    use anyhow::Result;

    use crate::models::field::{FieldKey, ReadyCheck, SelectOption};
    use crate::utils::matching::MatchMode;

    const DEPARTMENT: &str = "select#P63_DEPARTMENT";
    const OFFERING: &str = "select#P63_OFFERING_NAME";

    /// 内存中的假选课页面：提交院系后才填充课程下拉框
    struct FakePage {
        options: RefCell<HashMap<&'static str, Vec<SelectOption>>>,
        committed: RefCell<Vec<(String, String)>>,
        /// (选择器, value) → 提交后新增的选项
        populate_on_commit: Vec<((&'static str, &'static str), (&'static str, Vec<SelectOption>))>,
    }

    impl FakePage {
        fn new() -> Self {
            Self {
                options: RefCell::new(HashMap::new()),
                committed: RefCell::new(Vec::new()),
                populate_on_commit: Vec::new(),
            }
        }

        fn with_options(self, selector: &'static str, options: Vec<SelectOption>) -> Self {
            self.options.borrow_mut().insert(selector, options);
            self
        }
    }

    impl SelectSurface for FakePage {
        async fn read_options(&self, selector: &str) -> Result<Vec<SelectOption>> {
            Ok(self
                .options
                .borrow()
                .get(selector)
                .cloned()
                .unwrap_or_default())
        }

        async fn commit_value(&self, selector: &str, value: &str) -> Result<()> {
            self.committed
                .borrow_mut()
                .push((selector.to_string(), value.to_string()));

            // 模拟级联：匹配的提交触发后继下拉框填充
            for ((sel, val), (dependent, options)) in &self.populate_on_commit {
                if *sel == selector && *val == value {
                    self.options.borrow_mut().insert(*dependent, options.clone());
                }
            }

            Ok(())
        }

        async fn option_count(&self, selector: &str) -> Result<usize> {
            Ok(self
                .options
                .borrow()
                .get(selector)
                .map(Vec::len)
                .unwrap_or(0))
        }
    }

    fn opt(label: &str, value: &str) -> SelectOption {
        SelectOption {
            label: label.to_string(),
            value: value.to_string(),
        }
    }

    fn resolver(timeout_ms: u64) -> SelectorResolver {
        SelectorResolver {
            timeout: Duration::from_millis(timeout_ms),
            poll_interval: Duration::from_millis(5),
        }
    }

    fn department_spec() -> FieldSpec {
        FieldSpec {
            key: FieldKey::Department,
            selector: DEPARTMENT,
            mode: MatchMode::Exact,
            next_ready: ReadyCheck {
                selector: OFFERING,
                min_options: 2,
            },
        }
    }

    #[tokio::test]
    async fn test_resolve_commits_matched_value_and_waits_ready() {
        let mut page = FakePage::new()
            .with_options(DEPARTMENT, vec![opt("Ma", "142"), opt("Ch", "99")]);
        // 提交 "142" 之后课程下拉框才会有真实选项
        page.populate_on_commit.push((
            (DEPARTMENT, "142"),
            (OFFERING, vec![opt("请选择", ""), opt("Ma 001C", "77")]),
        ));

        let result = resolver(500).resolve(&page, &department_spec(), "Ma").await;

        assert!(result.is_ok());
        assert_eq!(
            page.committed.borrow().as_slice(),
            &[(DEPARTMENT.to_string(), "142".to_string())]
        );
    }

    #[tokio::test]
    async fn test_no_match_is_error_and_nothing_committed() {
        let page = FakePage::new()
            .with_options(DEPARTMENT, vec![opt("Ma", "142"), opt("Ch", "99")]);

        let result = resolver(100).resolve(&page, &department_spec(), "Ph").await;

        match result {
            Err(ResolveError::NoMatch { field, target }) => {
                assert_eq!(field, FieldKey::Department);
                assert_eq!(target, "Ph");
            }
            other => panic!("期望 NoMatch，实际: {:?}", other),
        }
        assert!(page.committed.borrow().is_empty());
    }

    #[tokio::test]
    async fn test_dependent_never_populates_times_out() {
        // 页面静默失败：提交后课程下拉框永远不填充
        let page = FakePage::new()
            .with_options(DEPARTMENT, vec![opt("Ma", "142")]);

        let start = std::time::Instant::now();
        let result = resolver(30).resolve(&page, &department_spec(), "Ma").await;

        match result {
            Err(ResolveError::Timeout { field }) => assert_eq!(field, FieldKey::Department),
            other => panic!("期望 Timeout，实际: {:?}", other),
        }
        // 必须有界返回，不能无限挂起
        assert!(start.elapsed() < Duration::from_secs(2));
    }

    #[tokio::test]
    async fn test_terminal_ready_threshold_is_one() {
        let spec = FieldSpec {
            key: FieldKey::Section,
            selector: DEPARTMENT,
            mode: MatchMode::Substring,
            next_ready: ReadyCheck {
                selector: OFFERING,
                min_options: 1,
            },
        };

        let mut page = FakePage::new()
            .with_options(DEPARTMENT, vec![opt("07 Yu, T", "17")]);
        page.populate_on_commit
            .push(((DEPARTMENT, "17"), (OFFERING, vec![opt("PASS", "p")])));

        let result = resolver(500).resolve(&page, &spec, "07").await;
        assert!(result.is_ok());
    }
}
