use std::path::PathBuf;

use anyhow::Result;
use tistory_client::{utils::logging, App, Config};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // 第一个参数为可选的 TOML 配置文件
    let config_path = std::env::args().nth(1).map(PathBuf::from);
    let config = Config::load(config_path.as_deref())?;

    // 初始化日志
    logging::init(config.verbose_logging);

    let client = App::new(config).authorize().await?;

    let info = client.blog_info().await?;
    info!("📚 博客信息获取成功");
    println!("{}", serde_json::to_string_pretty(&info)?);

    Ok(())
}
