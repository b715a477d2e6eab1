//! Career document search tool — keyword retrieval over guide passages.
//!
//! Holds a small in-memory corpus of career guide excerpts and scores them
//! against the query with simple keyword matching. The top passages are
//! returned verbatim so the advisor can ground its answer in them.

use async_trait::async_trait;
use mentora_core::error::ToolError;
use mentora_core::tool::Tool;
use tracing::debug;

const NO_DOCS: &str = "No career documents available right now.";
const TOP_K: usize = 3;

pub struct CareerDocSearchTool {
    passages: Vec<String>,
}

impl CareerDocSearchTool {
    /// Tool backed by the built-in career guide excerpts.
    pub fn new() -> Self {
        Self::with_passages(default_passages())
    }

    /// Tool backed by a caller-provided corpus. An empty corpus is allowed;
    /// every query then reports that no documents are available.
    pub fn with_passages(passages: Vec<String>) -> Self {
        Self { passages }
    }

    /// Keyword relevance: occurrences of each query word, normalized by
    /// passage length so short focused passages outrank long rambling ones.
    fn score(passage: &str, query_words: &[String]) -> f32 {
        let passage_lower = passage.to_lowercase();
        let occurrences: usize = query_words
            .iter()
            .map(|w| passage_lower.matches(w.as_str()).count())
            .sum();
        occurrences as f32 / (passage.len() as f32 / 100.0).max(1.0)
    }
}

impl Default for CareerDocSearchTool {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Tool for CareerDocSearchTool {
    fn name(&self) -> &str {
        "career_doc_search"
    }

    fn description(&self) -> &str {
        "Searches career guides, HR reports, and industry docs to give informed answers."
    }

    async fn invoke(&self, input: &str) -> Result<String, ToolError> {
        let query = input.trim();
        if query.is_empty() {
            return Err(ToolError::MalformedInput(
                "career_doc_search needs a search query".into(),
            ));
        }

        if self.passages.is_empty() {
            return Ok(NO_DOCS.to_string());
        }

        let query_words: Vec<String> = query
            .to_lowercase()
            .split_whitespace()
            .filter(|w| w.len() > 2)
            .map(str::to_string)
            .collect();

        let mut scored: Vec<(f32, &String)> = self
            .passages
            .iter()
            .map(|p| (Self::score(p, &query_words), p))
            .filter(|(score, _)| *score > 0.0)
            .collect();
        scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));
        scored.truncate(TOP_K);

        debug!(query, hits = scored.len(), "Career doc search");

        if scored.is_empty() {
            return Ok(NO_DOCS.to_string());
        }

        Ok(scored
            .iter()
            .map(|(_, p)| p.as_str())
            .collect::<Vec<_>>()
            .join("\n\n"))
    }
}

/// Built-in excerpts standing in for the career guide corpus.
fn default_passages() -> Vec<String> {
    [
        "Data roles: data analysts turn raw data into reports and dashboards; data engineers \
         build the pipelines feeding them; data scientists model and predict. Entry into the \
         field most commonly starts from the analyst side.",
        "Switching industries mid-career works best in two moves: first change role within \
         your industry, then change industry within your new role. Changing both at once \
         roughly doubles the time to a comparable salary.",
        "Certifications carry the most weight in cloud computing, project management, and \
         accounting. In software engineering and design, a portfolio of real work outweighs \
         any certificate.",
        "Interview preparation: most hiring processes weigh structured examples of past work \
         (situation, action, result) more heavily than open-ended self-description. Prepare \
         six such stories covering delivery, conflict, and failure.",
        "Remote and hybrid arrangements are most common in software, design, writing, and \
         customer support, and least common in healthcare, education, and skilled trades.",
        "Negotiation: candidates who counter a first salary offer receive an improved offer \
         in the majority of cases; the counter should cite a specific market range rather \
         than a personal need.",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn finds_relevant_passage() {
        let tool = CareerDocSearchTool::new();
        let output = tool.invoke("data engineer pipelines").await.unwrap();
        assert!(output.contains("pipelines"));
        assert_ne!(output, NO_DOCS);
    }

    #[tokio::test]
    async fn unrelated_query_reports_no_docs() {
        let tool = CareerDocSearchTool::new();
        let output = tool.invoke("xylophone maintenance").await.unwrap();
        assert_eq!(output, NO_DOCS);
    }

    #[tokio::test]
    async fn empty_corpus_reports_no_docs() {
        let tool = CareerDocSearchTool::with_passages(vec![]);
        let output = tool.invoke("data engineer").await.unwrap();
        assert_eq!(output, NO_DOCS);
    }

    #[tokio::test]
    async fn returns_at_most_top_k() {
        let passages: Vec<String> = (0..10)
            .map(|i| format!("career passage number {i} about careers"))
            .collect();
        let tool = CareerDocSearchTool::with_passages(passages);
        let output = tool.invoke("career").await.unwrap();
        assert_eq!(output.split("\n\n").count(), TOP_K);
    }

    #[tokio::test]
    async fn empty_query_rejected() {
        let tool = CareerDocSearchTool::new();
        assert!(tool.invoke("   ").await.is_err());
    }

    #[tokio::test]
    async fn best_match_comes_first() {
        let tool = CareerDocSearchTool::with_passages(vec![
            "negotiation negotiation negotiation".into(),
            "one mention of negotiation in a much longer passage about other things \
             entirely, diluting the match"
                .into(),
        ]);
        let output = tool.invoke("negotiation").await.unwrap();
        assert!(output.starts_with("negotiation negotiation"));
    }
}
