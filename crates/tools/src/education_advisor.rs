//! Education advisor tool — stub learning-path recommendations.

use crate::stub::fingerprint;
use async_trait::async_trait;
use mentora_core::error::ToolError;
use mentora_core::tool::Tool;

pub struct EducationAdvisorTool;

const PATHS: [&str; 4] = [
    "a focused online certificate followed by a portfolio project",
    "an evening or part-time degree program combined with on-the-job practice",
    "a structured bootcamp plus an industry-recognized certification",
    "self-study with a published curriculum, validated by one credential exam",
];

#[async_trait]
impl Tool for EducationAdvisorTool {
    fn name(&self) -> &str {
        "education_advisor"
    }

    fn description(&self) -> &str {
        "Recommends degrees, courses, or certifications based on the user's goals."
    }

    async fn invoke(&self, input: &str) -> Result<String, ToolError> {
        let goal = input.trim();
        if goal.is_empty() {
            return Err(ToolError::MalformedInput(
                "education_advisor needs a goal, e.g. 'become a cloud engineer'".into(),
            ));
        }

        let hash = fingerprint(goal) as usize;
        Ok(format!(
            "Suggested learning path for '{goal}': start with {}. \
             Budget roughly {} months before applying for roles that require it.",
            PATHS[hash % PATHS.len()],
            3 + (hash % 10),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn suggests_a_path() {
        let tool = EducationAdvisorTool;
        let output = tool.invoke("become a cloud engineer").await.unwrap();
        assert!(output.contains("Suggested learning path for 'become a cloud engineer'"));
        assert!(output.contains("months"));
    }

    #[tokio::test]
    async fn empty_input_rejected() {
        let tool = EducationAdvisorTool;
        assert!(tool.invoke("").await.is_err());
    }
}
