use order_server::{Config, Server, ServerState, print_banner, setup_environment};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. 加载 .env 和配置
    dotenv::dotenv().ok();
    let config = Config::from_env();

    // 2. 日志等运行环境
    setup_environment(&config);
    print_banner();

    tracing::info!(
        environment = %config.environment,
        port = config.port,
        "🍔 {} v{} starting...",
        config.app_name,
        config.app_version
    );

    // 3. 初始化服务器状态 (数据库、Socket.IO)
    let state = ServerState::initialize(&config).await?;

    // 4. 启动 HTTP 服务器
    let server = Server::with_state(config, state);
    if let Err(e) = server.run().await {
        tracing::error!("Server error: {}", e);
        return Err(e.into());
    }

    Ok(())
}
