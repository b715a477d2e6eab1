//! `mentora serve` — Start the HTTP gateway server.

use mentora_config::AppConfig;

pub async fn run(port: Option<u16>) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;

    if let Some(p) = port {
        config.gateway.port = p;
    }

    println!(
        "Starting Mentora gateway on {}:{} ...",
        config.gateway.host, config.gateway.port
    );

    mentora_gateway::start(config).await
}
