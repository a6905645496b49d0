use lokal_server::{Config, Server, ServerState, print_banner, setup_environment};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    // 1. .env + logging
    setup_environment();

    print_banner();

    // 2. Configuration
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Invalid configuration: {}", e);
            return Err(e.into());
        }
    };

    tracing::info!("MarketLokal backend starting (env: {})", config.environment);

    // 3. Shared state (store, JWT, Firebase connector)
    let state = ServerState::initialize(&config);

    // 4. HTTP server (also starts background maintenance)
    let server = Server::with_state(config, state);

    if let Err(e) = server.run().await {
        tracing::error!("Server error: {}", e);
        return Err(e.into());
    }

    Ok(())
}
