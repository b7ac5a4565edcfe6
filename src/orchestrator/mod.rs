//! 编排层（Orchestration Layer）
//!
//! ## 职责
//!
//! 本层负责整轮报名的调度，是整个系统的"指挥中心"。
//!
//! ## 层次关系
//!
//! ```text
//! enroll_processor (处理 Vec<DesiredClass>，失败不中断)
//!     ↓
//! workflow::EnrollFlow (处理单门课程)
//!     ↓
//! services (能力层：resolver / portal / select_surface)
//!     ↓
//! infrastructure (基础设施：JsExecutor)
//! ```
//!
//! ## 设计原则
//!
//! 1. **资源隔离**：只有编排层持有 Browser 和 JsExecutor
//! 2. **向下依赖**：编排层 → workflow → services → infrastructure
//! 3. **无业务逻辑**：只做调度、复位和统计，不做字段匹配

pub mod enroll_processor;

pub use enroll_processor::{enroll_all, App, EnrollmentTarget, RunStats};
