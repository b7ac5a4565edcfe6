//! 浏览器会话：启动与新标签页发现

pub mod launch;
pub mod tab_watch;

pub use launch::launch_browser;
pub use tab_watch::wait_for_new_page;
