//! BMI Coach
//!
//! 入口：加载配置、初始化日志、运行 TUI 主循环。第一个命令行参数可指定额外的配置文件。

use anyhow::Context;
use bmi_coach::{config::load_config, observability, ui::run_app};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config_path = std::env::args().nth(1).map(std::path::PathBuf::from);
    let cfg = load_config(config_path).context("Failed to load config")?;

    // guard 持有到 main 结束，保证退出前日志写完
    let _log_guard = observability::init(&cfg.log).context("Failed to init logging")?;
    tracing::info!(title = %cfg.app.title, "starting");

    run_app(&cfg).await.context("App run failed")?;

    tracing::info!("shutdown complete");
    Ok(())
}
