//! 单门课程报名流程 - 流程层
//!
//! 核心职责：在选课入口页上完成"一门课"的完整报名
//!
//! 流程顺序：
//! 1. 按字段链依次解析：院系 → 课程 → 班次
//! 2. 班次解析成功即意味着成绩方案下拉框已就绪
//! 3. 点击 Save 提交，等待页面跳转确认

use std::time::Duration;

use anyhow::{anyhow, Result};
use tokio::time::sleep;
use tracing::info;

use crate::config::Config;
use crate::error::EnrollError;
use crate::infrastructure::JsExecutor;
use crate::models::desired_class::DesiredClass;
use crate::models::field::FIELD_CHAIN;
use crate::services::portal::{text_click_js, HtmlTag};
use crate::services::resolver::SelectorResolver;
use crate::workflow::class_ctx::ClassCtx;

/// 提交按钮文本
const SAVE_BUTTON_TEXT: &str = "Save";

/// 单门课程报名流程
///
/// - 编排字段链解析和提交
/// - 不持有任何资源（page）
/// - 只依赖业务能力（resolver）
pub struct EnrollFlow {
    resolver: SelectorResolver,
    action_delay: Duration,
    nav_timeout: Duration,
}

impl EnrollFlow {
    /// 创建新的报名流程
    pub fn new(config: &Config) -> Self {
        Self {
            resolver: SelectorResolver::new(config),
            action_delay: Duration::from_millis(config.action_delay_ms),
            nav_timeout: Duration::from_millis(config.navigation_timeout_ms),
        }
    }

    /// 报名一门课：解析字段链，然后提交
    ///
    /// 课程必须已归一化；任何字段解析失败都会带上字段和课程信息
    /// 立即返回，调用方决定是否继续下一门课。
    pub async fn run(
        &self,
        executor: &JsExecutor,
        class: &DesiredClass,
        ctx: &ClassCtx,
    ) -> Result<(), EnrollError> {
        info!("{} 开始报名", ctx);

        for spec in FIELD_CHAIN.iter() {
            let target = class.target_for(spec.key);
            info!("{} 正在选择{}: {}", ctx, spec.key, target);

            self.resolver
                .resolve(executor, spec, target)
                .await
                .map_err(|source| EnrollError::Resolve {
                    class: ctx.label.clone(),
                    field: spec.key,
                    source,
                })?;

            if !self.action_delay.is_zero() {
                sleep(self.action_delay).await;
            }
        }

        // 班次解析成功即终点就绪信号已满足（成绩方案下拉框有选项）
        self.submit(executor, ctx)
            .await
            .map_err(|source| EnrollError::Submit {
                class: ctx.label.clone(),
                source,
            })?;

        info!("{} ✅ 报名提交完成", ctx);
        Ok(())
    }

    /// 点击 Save 并等待提交后的页面跳转
    ///
    /// 只观察跳转完成，不校验服务端的确认内容。
    async fn submit(&self, executor: &JsExecutor, ctx: &ClassCtx) -> Result<()> {
        info!("{} 📤 正在提交...", ctx);

        let clicked: bool = executor
            .eval_as(text_click_js(HtmlTag::Span, SAVE_BUTTON_TEXT))
            .await?;
        if !clicked {
            return Err(anyhow!("页面上找不到 Save 按钮"));
        }

        tokio::time::timeout(self.nav_timeout, executor.page().wait_for_navigation())
            .await
            .map_err(|_| anyhow!("提交后等待页面跳转超时"))??;

        Ok(())
    }
}
