//! 工具模块：编号格式化、选项匹配、轮询等待、日志

pub mod format;
pub mod logging;
pub mod matching;
pub mod wait;

pub use format::normalize;
pub use matching::{find_option, MatchMode};
pub use wait::wait_until;
