//! 新标签页等待
//!
//! REGIS 链接会在新标签页打开，这里把"等待下一个标签页出现"
//! 做成一次性的有界等待：轮询 page 列表，数量超过基准值就取最新的。

use std::time::Duration;

use anyhow::Result;
use chromiumoxide::{Browser, Page};
use tokio::time::{sleep, Instant};
use tracing::debug;

const POLL_INTERVAL: Duration = Duration::from_millis(200);

/// 等待浏览器出现第 `pages_before + 1` 个标签页并返回它
///
/// 在点击会开新标签页的链接之前记录 `pages_before`，点击之后调用本函数。
/// 超时返回错误，不会无限等待。
pub async fn wait_for_new_page(
    browser: &Browser,
    pages_before: usize,
    timeout: Duration,
) -> Result<Page> {
    let deadline = Instant::now() + timeout;

    loop {
        let mut pages = browser.pages().await?;
        debug!("当前共 {} 个标签页（基准 {}）", pages.len(), pages_before);

        if pages.len() > pages_before {
            // 新标签页追加在列表末尾
            if let Some(page) = pages.pop() {
                return Ok(page);
            }
        }

        if Instant::now() >= deadline {
            anyhow::bail!("等待新标签页出现超时");
        }

        sleep(POLL_INTERVAL).await;
    }
}
