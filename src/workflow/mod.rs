//! 流程层：定义"一门课"的完整报名流程

pub mod class_ctx;
pub mod enroll_flow;

pub use class_ctx::ClassCtx;
pub use enroll_flow::EnrollFlow;
