//! `mentora ask` — Single-message mode.

use mentora_config::AppConfig;

pub async fn run(user: &str, message: &str) -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;
    let advisor = super::build_advisor(&config).await?;

    eprint!("  Thinking...");
    let outcome = advisor.chat(user, message).await;
    eprint!("\r              \r");

    println!("{}", outcome.answer);

    Ok(())
}
