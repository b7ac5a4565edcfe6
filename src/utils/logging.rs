//! 日志工具模块
//!
//! 提供 tracing 初始化和运行日志的格式化输出

use std::fs;

use anyhow::Result;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::error::EnrollError;
use crate::models::desired_class::DesiredClass;
use crate::orchestrator::enroll_processor::RunStats;

/// 初始化 tracing 日志（RUST_LOG 可覆盖，默认 info）
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// 初始化日志文件，写入带时间戳的表头
pub fn init_log_file(log_file_path: &str) -> Result<()> {
    let log_header = format!(
        "{}\n选课报名日志 - {}\n{}\n\n",
        "=".repeat(60),
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
        "=".repeat(60)
    );
    fs::write(log_file_path, log_header)?;
    Ok(())
}

/// 记录程序启动信息
pub fn log_startup(config: &Config) {
    info!("{}", "=".repeat(60));
    info!("🚀 程序启动 - 自动选课报名模式");
    info!("📋 课程清单: {}", config.classes_file);
    info!("{}", "=".repeat(60));
}

/// 记录课程加载信息
pub fn log_classes_loaded(total: usize) {
    info!("✓ 找到 {} 门待报名的课程", total);
    info!("💡 按声明顺序逐门报名，一门失败不影响其余\n");
}

/// 把逐课程结果追加到日志文件
pub fn append_results_log(
    log_file_path: &str,
    classes: &[DesiredClass],
    results: &[Result<(), EnrollError>],
) -> Result<()> {
    let mut lines = String::new();
    for (class, result) in classes.iter().zip(results) {
        match result {
            Ok(()) => lines.push_str(&format!("成功  {}\n", class.display_label())),
            Err(e) => lines.push_str(&format!("失败  {} ({})\n", class.display_label(), e)),
        }
    }

    let existing = fs::read_to_string(log_file_path).unwrap_or_default();
    fs::write(log_file_path, existing + &lines)?;
    Ok(())
}

/// 打印最终统计信息
pub fn print_final_stats(stats: &RunStats, log_file_path: &str) {
    info!("\n{}", "=".repeat(60));
    info!("📊 全部报名完成统计");
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
    info!("✅ 成功: {}/{}", stats.success, stats.total);
    info!("❌ 失败: {}", stats.failed);
    info!("{}", "=".repeat(60));
    info!("\n日志已保存至: {}", log_file_path);
}
