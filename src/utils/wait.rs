//! 有界轮询等待
//!
//! 级联下拉框在前序选择提交后需要一段时间才会重新填充选项，
//! 这里以固定间隔轮询就绪条件，到达截止时间仍未满足则返回未就绪。
//! 无界等待是设计缺陷：远端页面可能静默地永远不更新。

use std::future::Future;
use std::time::Duration;

use anyhow::Result;
use tokio::time::{sleep, Instant};

/// 轮询 `probe` 直到其返回 `true` 或超时
///
/// 返回 `Ok(true)` 表示条件在时限内满足，`Ok(false)` 表示超时；
/// `probe` 自身出错时立即向上传播。
pub async fn wait_until<F, Fut>(timeout: Duration, interval: Duration, mut probe: F) -> Result<bool>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<bool>>,
{
    let deadline = Instant::now() + timeout;

    loop {
        if probe().await? {
            return Ok(true);
        }

        if Instant::now() >= deadline {
            return Ok(false);
        }

        sleep(interval).await;
    }
}
