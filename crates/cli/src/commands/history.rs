//! `mentora history` / `mentora clear-history` — Chat log inspection.

use mentora_config::AppConfig;
use mentora_core::turn::UserId;

pub async fn run(user: &str, limit: usize) -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;
    let (_, history) = super::build_stores(&config).await?;

    let records = history.list(&UserId::new(user), limit).await?;

    if records.is_empty() {
        println!("No history recorded for '{user}' yet.");
        return Ok(());
    }

    println!("Last {} turn(s) for '{}', newest first:\n", records.len(), user);
    for record in &records {
        println!("[{}]", record.created_at.format("%Y-%m-%d %H:%M:%S UTC"));
        println!("  You     > {}", record.question);
        println!("  Mentora > {}", record.answer);
        println!();
    }

    Ok(())
}

pub async fn clear(user: &str) -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;
    let (_, history) = super::build_stores(&config).await?;

    let deleted = history.clear(&UserId::new(user)).await?;
    println!("Deleted {deleted} turn(s) for '{user}'.");

    Ok(())
}
