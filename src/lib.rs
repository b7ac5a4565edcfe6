//! # Class Signup Bot
//!
//! 一个用于自动选课报名的 Rust 应用程序
//!
//! ## 架构设计
//!
//! 本系统采用严格的四层架构：
//!
//! ### ① 基础设施层（Infrastructure）
//! - `infrastructure/` - 持有稀缺资源（Page），只暴露能力
//! - `JsExecutor` - 唯一的 page owner，提供 eval() 能力
//!
//! ### ② 业务能力层（Services）
//! - `services/` - 描述"我能做什么"，只处理单个字段/页面动作
//! - `SelectorResolver` - 级联下拉框的匹配、提交与就绪等待能力
//! - `PortalNavigator` - 登录与逐级进入选课页面的能力
//! - `SelectSurface` - 下拉框读写的最小接口（可 mock）
//!
//! ### ③ 流程层（Workflow）
//! - `workflow/` - 定义"一门课"的完整报名流程
//! - `ClassCtx` - 上下文封装（第几门、哪门课）
//! - `EnrollFlow` - 流程编排（院系 → 课程 → 班次 → 提交）
//!
//! ### ④ 编排层（Orchestration）
//! - `orchestrator/enroll_processor` - 批量报名处理器，管理会话资源，
//!   失败不中断，每门课之间复位入口页
//!
//! ## 模块结构

pub mod browser;
pub mod config;
pub mod error;
pub mod infrastructure;

pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use config::Config;
pub use error::{EnrollError, ResolveError, SessionError};
pub use infrastructure::JsExecutor;
pub use models::{load_classes, DesiredClass, FieldKey, SelectOption, FIELD_CHAIN};
pub use orchestrator::{enroll_all, App, EnrollmentTarget};
pub use utils::{find_option, normalize, MatchMode};
pub use workflow::{ClassCtx, EnrollFlow};
