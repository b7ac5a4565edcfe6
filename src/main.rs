use anyhow::Result;
use tracing::warn;

use class_signup_bot::config::Config;
use class_signup_bot::orchestrator::App;
use class_signup_bot::utils::logging;

#[tokio::main]
async fn main() -> Result<()> {
    // 读取 .env（凭据 USERNAME / PASSWORD）
    dotenvy::dotenv().ok();

    // 初始化日志
    logging::init();

    // 加载配置
    let config = Config::from_env();

    // 初始化应用
    let app = App::initialize(config).await?;

    // 运行主逻辑，Ctrl-C 可随时中断；每步选择提交都是幂等的，
    // 中途停下不需要回滚
    tokio::select! {
        result = app.run() => result?,
        _ = tokio::signal::ctrl_c() => {
            warn!("⚠️ 收到中断信号，停止报名");
        }
    }

    Ok(())
}
