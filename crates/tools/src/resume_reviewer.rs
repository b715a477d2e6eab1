//! Resume reviewer tool — stub feedback keyed off the target career.

use crate::stub::fingerprint;
use async_trait::async_trait;
use mentora_core::error::ToolError;
use mentora_core::tool::Tool;

pub struct ResumeReviewerTool;

const STRENGTHS: [&str; 5] = [
    "your hands-on project experience comes through clearly",
    "the progression between roles is easy to follow",
    "quantified achievements make the impact concrete",
    "the skills section maps well onto the target role",
    "the summary states a clear direction",
];

const IMPROVEMENTS: [&str; 5] = [
    "lead each bullet with the outcome, not the task",
    "trim older roles to one or two lines each",
    "mirror the vocabulary of the job descriptions you are targeting",
    "move certifications relevant to the target role above the fold",
    "add one line of context (team size, scope) to each position",
];

#[async_trait]
impl Tool for ResumeReviewerTool {
    fn name(&self) -> &str {
        "resume_reviewer"
    }

    fn description(&self) -> &str {
        "Gives constructive feedback on the user's resume or portfolio based on target career."
    }

    async fn invoke(&self, input: &str) -> Result<String, ToolError> {
        let query = input.trim();
        if query.is_empty() {
            return Err(ToolError::MalformedInput(
                "resume_reviewer needs a target career or resume summary".into(),
            ));
        }

        let hash = fingerprint(query) as usize;
        let strength = STRENGTHS[hash % STRENGTHS.len()];
        let improvement = IMPROVEMENTS[(hash / 7) % IMPROVEMENTS.len()];

        Ok(format!(
            "Resume feedback for '{query}': strongest point — {strength}. \
             Main improvement — {improvement}. \
             Keep the document to one page until you pass ten years of experience."
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn gives_feedback() {
        let tool = ResumeReviewerTool;
        let output = tool.invoke("product manager").await.unwrap();
        assert!(output.contains("Resume feedback for 'product manager'"));
        assert!(output.contains("improvement"));
    }

    #[tokio::test]
    async fn deterministic_results() {
        let tool = ResumeReviewerTool;
        let a = tool.invoke("product manager").await.unwrap();
        let b = tool.invoke("product manager").await.unwrap();
        assert_eq!(a, b);
    }

    #[tokio::test]
    async fn empty_input_rejected() {
        let tool = ResumeReviewerTool;
        assert!(tool.invoke("").await.is_err());
    }
}
