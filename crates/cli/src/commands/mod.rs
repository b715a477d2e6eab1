pub mod ask;
pub mod chat;
pub mod history;
pub mod onboard;
pub mod serve;

use mentora_agent::Advisor;
use mentora_config::AppConfig;
use mentora_core::history::HistoryStore;
use mentora_core::profile::ProfileStore;
use mentora_providers::OpenAiCompatDecider;
use mentora_store::{InMemoryStore, SqliteStore};
use std::sync::Arc;

/// Build the storage backend the config asks for.
pub(crate) async fn build_stores(
    config: &AppConfig,
) -> Result<(Arc<dyn ProfileStore>, Arc<dyn HistoryStore>), Box<dyn std::error::Error>> {
    match config.storage.backend.as_str() {
        "in_memory" => {
            let store = Arc::new(InMemoryStore::new());
            Ok((Arc::clone(&store) as _, store as _))
        }
        _ => {
            let path = config.resolved_db_path();
            if let Some(parent) = std::path::Path::new(&path).parent() {
                std::fs::create_dir_all(parent)?;
            }
            let store = Arc::new(SqliteStore::new(&path).await?);
            Ok((Arc::clone(&store) as _, store as _))
        }
    }
}

/// Build a ready-to-use advisor from config: decision service, storage,
/// and the loop itself.
pub(crate) async fn build_advisor(
    config: &AppConfig,
) -> Result<Advisor, Box<dyn std::error::Error>> {
    if config.api_key.is_none() {
        eprintln!();
        eprintln!("  ERROR: No API key configured!");
        eprintln!();
        eprintln!("  Set one of these environment variables:");
        eprintln!("    MENTORA_API_KEY  (generic)");
        eprintln!("    OPENAI_API_KEY   (for OpenAI direct)");
        eprintln!();
        eprintln!("  Or add it to your config file:");
        eprintln!("    {}", AppConfig::config_dir().join("config.toml").display());
        eprintln!();
        return Err("No API key found. See above for setup instructions.".into());
    }

    let decider = Arc::new(OpenAiCompatDecider::from_config(config)?);
    let (profiles, history) = build_stores(config).await?;
    Ok(Advisor::new(decider, profiles, history, config))
}
