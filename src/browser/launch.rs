//! 浏览器启动

use std::path::Path;
use std::time::Duration;

use anyhow::Result;
use chromiumoxide::{Browser, BrowserConfig, Page};
use futures::StreamExt;
use tokio::time::sleep;
use tracing::{debug, error, info};

/// 启动浏览器并导航到门户首页
///
/// `visible` 为 true 时带界面运行，方便人工观察报名过程。
pub async fn launch_browser(
    url: &str,
    visible: bool,
    chrome_path: Option<&str>,
) -> Result<(Browser, Page)> {
    info!("🚀 启动浏览器...");
    debug!("目标 URL: {}, 可见: {}", url, visible);

    let mut builder = BrowserConfig::builder().args(vec![
        "--disable-gpu",           // 无头模式必须禁用 GPU
        "--no-sandbox",            // 禁用沙盒，防止权限问题导致的崩溃
        "--disable-dev-shm-usage", // 防止共享内存不足
    ]);

    if visible {
        builder = builder.with_head();
    } else {
        builder = builder.new_headless_mode();
    }

    if let Some(path) = chrome_path {
        builder = builder.chrome_executable(Path::new(path));
    }

    let config = builder.build().map_err(|e| {
        error!("配置浏览器失败: {}", e);
        anyhow::anyhow!("配置浏览器失败: {}", e)
    })?;

    let (browser, mut handler) = Browser::launch(config).await.map_err(|e| {
        error!("启动浏览器失败: {}", e);
        anyhow::anyhow!("启动浏览器失败: {}", e)
    })?;
    debug!("浏览器启动成功");

    // 在后台处理浏览器事件
    tokio::spawn(async move {
        while let Some(h) = handler.next().await {
            if h.is_err() {
                break;
            }
        }
    });

    // 添加短暂延迟以等待浏览器状态同步
    sleep(Duration::from_millis(300)).await;

    let page = browser.new_page(url).await.map_err(|e| {
        error!("创建页面失败: {}", e);
        anyhow::anyhow!("创建页面失败: {}", e)
    })?;

    info!("✓ 已打开: {}", url);

    Ok((browser, page))
}
