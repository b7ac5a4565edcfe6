//! 批量报名处理器 - 编排层
//!
//! ## 职责
//!
//! 本模块是整个应用的入口，负责会话生命周期和课程列表的批量报名。
//!
//! 1. **应用初始化**：启动浏览器、登录门户、打开选课入口页
//! 2. **批量加载**：读取 classes.toml 中的目标课程
//! 3. **失败不中断**：一门课失败只记录结果，继续报下一门
//! 4. **状态复位**：每门课之间回到入口页，复位失败终止整轮
//! 5. **资源所有者**：唯一持有 Browser 和 JsExecutor 的模块

use std::time::Duration;

use anyhow::{anyhow, Result};
use chromiumoxide::Browser;
use tracing::{error, info, warn};

use crate::browser::launch_browser;
use crate::config::Config;
use crate::error::{EnrollError, SessionError};
use crate::infrastructure::JsExecutor;
use crate::models::desired_class::DesiredClass;
use crate::models::load_classes;
use crate::services::portal::PortalNavigator;
use crate::utils::logging;
use crate::workflow::{ClassCtx, EnrollFlow};

/// 一轮报名的报名目标
///
/// 把"报一门课"和"回到入口页"抽象出来，真实实现驱动浏览器，
/// 测试里用脚本化的假目标验证失败不中断的语义。
#[allow(async_fn_in_trait)]
pub trait EnrollmentTarget {
    /// 尝试报一门课
    async fn enroll(&mut self, ctx: &ClassCtx, class: &DesiredClass) -> Result<(), EnrollError>;

    /// 回到选课入口页，让下一门课从已知状态开始
    async fn reset_entry(&mut self) -> Result<(), SessionError>;
}

/// 按声明顺序报名所有课程
///
/// 一门课的失败只体现在它自己的 Result 里，不影响其余课程；
/// 入口页复位失败则共享页面状态已不可信，整轮终止。
/// 返回的序列与 `classes` 等长且顺序一致。
pub async fn enroll_all<T: EnrollmentTarget>(
    target: &mut T,
    classes: &[DesiredClass],
) -> Result<Vec<Result<(), EnrollError>>, SessionError> {
    let mut results = Vec::with_capacity(classes.len());

    for (idx, class) in classes.iter().enumerate() {
        let ctx = ClassCtx::new(idx + 1, class.display_label());

        let outcome = target.enroll(&ctx, class).await;
        match &outcome {
            Ok(()) => info!("{} ✅ 报名成功", ctx),
            Err(e) => error!("{} ❌ 报名失败: {}", ctx, e),
        }
        results.push(outcome);

        // 无论成败都复位，防止上一门课的残留状态污染下一门
        target.reset_entry().await?;
    }

    Ok(results)
}

/// 驱动真实浏览器会话的报名目标
struct PortalSession<'a> {
    executor: &'a JsExecutor,
    flow: &'a EnrollFlow,
    entry_url: &'a str,
    nav_timeout: Duration,
}

impl EnrollmentTarget for PortalSession<'_> {
    async fn enroll(&mut self, ctx: &ClassCtx, class: &DesiredClass) -> Result<(), EnrollError> {
        self.flow.run(self.executor, class, ctx).await
    }

    async fn reset_entry(&mut self) -> Result<(), SessionError> {
        tokio::time::timeout(self.nav_timeout, self.executor.page().goto(self.entry_url))
            .await
            .map_err(|_| SessionError::Navigation(anyhow!("返回选课入口页超时")))?
            .map_err(|e| SessionError::Navigation(e.into()))?;
        Ok(())
    }
}

/// 一轮报名的统计
#[derive(Debug, Default)]
pub struct RunStats {
    pub success: usize,
    pub failed: usize,
    pub total: usize,
}

impl RunStats {
    /// 从逐课程结果汇总
    pub fn from_results(results: &[Result<(), EnrollError>]) -> Self {
        let success = results.iter().filter(|r| r.is_ok()).count();
        Self {
            success,
            failed: results.len() - success,
            total: results.len(),
        }
    }
}

/// 应用主结构
pub struct App {
    config: Config,
    _browser: Browser,
    executor: JsExecutor,
    entry_url: String,
    flow: EnrollFlow,
}

impl App {
    /// 初始化应用：启动浏览器、登录、打开选课入口页
    pub async fn initialize(config: Config) -> Result<Self, SessionError> {
        logging::init_log_file(&config.output_log_file).map_err(SessionError::Launch)?;
        logging::log_startup(&config);

        let (browser, portal_page) = launch_browser(
            &config.portal_url,
            config.visible_browser,
            config.chrome_path.as_deref(),
        )
        .await
        .map_err(SessionError::Launch)?;

        let navigator = PortalNavigator::new(&config);

        navigator
            .sign_in(&portal_page)
            .await
            .map_err(SessionError::Login)?;

        let regis_page = navigator
            .open_regis(&browser, &portal_page)
            .await
            .map_err(SessionError::Login)?;

        let entry_url = navigator
            .open_enroll_entry(&regis_page)
            .await
            .map_err(SessionError::Login)?;

        // 入口页单独开一个标签页，之后每门课之间重新 goto 它
        let entry_page = browser
            .new_page(entry_url.as_str())
            .await
            .map_err(|e| SessionError::Navigation(e.into()))?;

        let flow = EnrollFlow::new(&config);

        Ok(Self {
            config,
            _browser: browser,
            executor: JsExecutor::new(entry_page),
            entry_url,
            flow,
        })
    }

    /// 运行应用主逻辑
    pub async fn run(&self) -> Result<()> {
        let classes = load_classes(&self.config.classes_file).await?;

        if classes.is_empty() {
            warn!("⚠️ {} 中没有声明任何课程，程序结束", self.config.classes_file);
            return Ok(());
        }

        logging::log_classes_loaded(classes.len());

        let mut session = PortalSession {
            executor: &self.executor,
            flow: &self.flow,
            entry_url: &self.entry_url,
            nav_timeout: Duration::from_millis(self.config.navigation_timeout_ms),
        };

        let results = enroll_all(&mut session, &classes).await?;

        logging::append_results_log(&self.config.output_log_file, &classes, &results)?;

        let stats = RunStats::from_results(&results);
        logging::print_final_stats(&stats, &self.config.output_log_file);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::error::ResolveError;
    use crate::models::field::FieldKey;

    /// 脚本化的假报名目标
    #[derive(Default)]
    struct MockTarget {
        /// 这些序号（从0开始）的课程报名失败
        fail_on: Vec<usize>,
        /// 第几次复位开始失败（None 表示复位永远成功）
        fail_reset_from: Option<usize>,
        enrolled: Vec<String>,
        resets: usize,
    }

    impl EnrollmentTarget for MockTarget {
        async fn enroll(
            &mut self,
            ctx: &ClassCtx,
            class: &DesiredClass,
        ) -> Result<(), EnrollError> {
            let idx = ctx.class_index - 1;
            self.enrolled.push(class.display_label());

            if self.fail_on.contains(&idx) {
                return Err(EnrollError::Resolve {
                    class: ctx.label.clone(),
                    field: FieldKey::Section,
                    source: ResolveError::NoMatch {
                        field: FieldKey::Section,
                        target: class.section_code.clone(),
                    },
                });
            }
            Ok(())
        }

        async fn reset_entry(&mut self) -> Result<(), SessionError> {
            self.resets += 1;
            if let Some(from) = self.fail_reset_from {
                if self.resets >= from {
                    return Err(SessionError::Navigation(anyhow!("入口页打不开")));
                }
            }
            Ok(())
        }
    }

    fn classes(n: usize) -> Vec<DesiredClass> {
        (0..n)
            .map(|i| DesiredClass {
                department: "Ma".to_string(),
                offering_code: format!("00{}C", i + 1),
                section_code: "07".to_string(),
            })
            .collect()
    }

    #[tokio::test]
    async fn test_one_failure_does_not_stop_the_rest() {
        let classes = classes(3);
        let mut target = MockTarget {
            fail_on: vec![1],
            ..Default::default()
        };

        let results = enroll_all(&mut target, &classes).await.unwrap();

        // 结果序列与课程列表等长，失败只落在第二门课上
        assert_eq!(results.len(), 3);
        assert!(results[0].is_ok());
        assert!(results[1].is_err());
        assert!(results[2].is_ok());

        // 三门课都尝试过，每门课之后都复位过
        assert_eq!(target.enrolled.len(), 3);
        assert_eq!(target.resets, 3);
    }

    #[tokio::test]
    async fn test_all_classes_attempted_in_order() {
        let classes = classes(2);
        let mut target = MockTarget::default();

        let results = enroll_all(&mut target, &classes).await.unwrap();

        assert_eq!(results.len(), 2);
        assert_eq!(
            target.enrolled,
            vec!["Ma 001C 班次07".to_string(), "Ma 002C 班次07".to_string()]
        );
    }

    #[tokio::test]
    async fn test_reset_failure_aborts_the_run() {
        let classes = classes(3);
        let mut target = MockTarget {
            fail_reset_from: Some(1),
            ..Default::default()
        };

        let result = enroll_all(&mut target, &classes).await;

        // 第一门课之后复位失败，整轮终止，后续课程不再尝试
        assert!(matches!(result, Err(SessionError::Navigation(_))));
        assert_eq!(target.enrolled.len(), 1);
    }

    #[test]
    fn test_run_stats_from_results() {
        let results: Vec<Result<(), EnrollError>> = vec![
            Ok(()),
            Err(EnrollError::Submit {
                class: "x".to_string(),
                source: anyhow!("跳转超时"),
            }),
            Ok(()),
        ];

        let stats = RunStats::from_results(&results);
        assert_eq!(stats.success, 2);
        assert_eq!(stats.failed, 1);
        assert_eq!(stats.total, 3);
    }
}
