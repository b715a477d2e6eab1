//! `mentora chat` — Interactive advisory session.

use mentora_config::AppConfig;
use mentora_core::turn::UserId;
use std::io::Write;
use tokio::io::{AsyncBufReadExt, BufReader};

/// In-session commands recognized alongside free-text messages.
#[derive(Debug, PartialEq, Eq)]
enum ReplCommand {
    Exit,
    History,
    ClearHistory,
}

impl ReplCommand {
    fn parse(input: &str) -> Option<Self> {
        let normalized = input.trim().to_lowercase();
        match normalized.as_str() {
            "exit" | "quit" => Some(Self::Exit),
            "history" => Some(Self::History),
            "clear history" | "clear-history" => Some(Self::ClearHistory),
            _ => None,
        }
    }
}

pub async fn run(user: &str) -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;
    let advisor = super::build_advisor(&config).await?;
    let uid = UserId::new(user);

    let first_time = advisor
        .history()
        .is_first_time(&uid)
        .await
        .unwrap_or(true);

    println!();
    if first_time {
        println!("  👋 Welcome, {user}! It's your first time here. Let's get started!");
    } else {
        println!("  🤖 Welcome back, {user}! Your advisor is ready.");
    }
    println!();
    println!("  Model:  {}", config.model);
    println!("  Type your message and press Enter.");
    println!("  Commands: 'history', 'clear history', 'exit' to leave.");
    println!();

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    print!("  You > ");
    std::io::stdout().flush()?;

    while let Some(line) = lines.next_line().await? {
        let input = line.trim();

        match ReplCommand::parse(input) {
            Some(ReplCommand::Exit) => break,
            Some(ReplCommand::History) => {
                match advisor.history().list(&uid, 10).await {
                    Ok(records) if records.is_empty() => {
                        println!("  No history recorded yet.");
                    }
                    Ok(records) => {
                        println!();
                        for record in &records {
                            println!("  [{}]", record.created_at.format("%Y-%m-%d %H:%M"));
                            println!("    You     > {}", record.question);
                            println!("    Mentora > {}", record.answer);
                        }
                        println!();
                    }
                    Err(e) => println!("  Could not load history: {e}"),
                }
            }
            Some(ReplCommand::ClearHistory) => {
                match advisor.history().clear(&uid).await {
                    Ok(deleted) => {
                        advisor.reset_session(user);
                        println!("  Cleared {deleted} turn(s). Fresh start!");
                    }
                    Err(e) => println!("  Could not clear history: {e}"),
                }
            }
            None if input.is_empty() => {}
            None => {
                eprint!("  ...");
                let outcome = advisor.chat(user, input).await;
                eprint!("\r     \r");

                println!();
                for line in outcome.answer.lines() {
                    println!("  Mentora > {line}");
                }
                println!();
            }
        }

        print!("  You > ");
        std::io::stdout().flush()?;
    }

    println!();
    println!("  Goodbye! Every career path is valid. 👋");
    println!();

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_words_recognized() {
        assert_eq!(ReplCommand::parse("exit"), Some(ReplCommand::Exit));
        assert_eq!(ReplCommand::parse("QUIT"), Some(ReplCommand::Exit));
        assert_eq!(ReplCommand::parse("  exit  "), Some(ReplCommand::Exit));
    }

    #[test]
    fn history_commands_recognized() {
        assert_eq!(ReplCommand::parse("history"), Some(ReplCommand::History));
        assert_eq!(ReplCommand::parse("History"), Some(ReplCommand::History));
        assert_eq!(
            ReplCommand::parse("clear history"),
            Some(ReplCommand::ClearHistory)
        );
        assert_eq!(
            ReplCommand::parse("clear-history"),
            Some(ReplCommand::ClearHistory)
        );
    }

    #[test]
    fn ordinary_messages_pass_through() {
        assert_eq!(ReplCommand::parse("what jobs fit me?"), None);
        assert_eq!(ReplCommand::parse("tell me my history options"), None);
    }
}
