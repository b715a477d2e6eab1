//! Job explainer tool — stub description of what a job title involves.

use crate::stub::fingerprint;
use async_trait::async_trait;
use mentora_core::error::ToolError;
use mentora_core::tool::Tool;

pub struct JobExplainerTool;

const DAILY_WORK: [&str; 4] = [
    "collaborating with a small cross-functional team and reviewing each other's work",
    "splitting time between deep individual work and coordination meetings",
    "talking to stakeholders in the morning and executing in the afternoon",
    "working through a prioritized queue of tasks with weekly planning",
];

const GROWTH: [&str; 4] = [
    "senior individual-contributor tracks and team leadership both open up after a few years",
    "specialists in this field often move into consulting or advisory roles",
    "the common path leads through mentoring juniors into managing a team",
    "adjacent roles in strategy and operations become reachable with experience",
];

#[async_trait]
impl Tool for JobExplainerTool {
    fn name(&self) -> &str {
        "job_explainer"
    }

    fn description(&self) -> &str {
        "Explains what a specific job title involves, daily tasks, and long-term growth."
    }

    async fn invoke(&self, input: &str) -> Result<String, ToolError> {
        let title = input.trim();
        if title.is_empty() {
            return Err(ToolError::MalformedInput(
                "job_explainer needs a job title, e.g. 'data engineer'".into(),
            ));
        }

        let hash = fingerprint(title) as usize;
        Ok(format!(
            "Job explanation for '{title}': day to day this means {}. \
             Long term, {}.",
            DAILY_WORK[hash % DAILY_WORK.len()],
            GROWTH[(hash / 5) % GROWTH.len()],
        ))
    }
}
