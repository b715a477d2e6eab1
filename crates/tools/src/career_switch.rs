//! Career switch advisor tool — stub transition advice.

use crate::stub::fingerprint;
use async_trait::async_trait;
use mentora_core::error::ToolError;
use mentora_core::tool::Tool;

pub struct CareerSwitchAdvisorTool;

const FIRST_STEPS: [&str; 4] = [
    "map which of your current skills transfer directly and lead with those",
    "take on one project in the target area inside your current job first",
    "talk to three people already working in the target field before committing",
    "build a small public portfolio piece in the new domain",
];

#[async_trait]
impl Tool for CareerSwitchAdvisorTool {
    fn name(&self) -> &str {
        "career_switch_advisor"
    }

    fn description(&self) -> &str {
        "Provides personalized advice for users looking to transition into new industries."
    }

    async fn invoke(&self, input: &str) -> Result<String, ToolError> {
        let query = input.trim();
        if query.is_empty() {
            return Err(ToolError::MalformedInput(
                "career_switch_advisor needs a description of the switch, \
                 e.g. 'accounting to data analysis'"
                    .into(),
            ));
        }

        let hash = fingerprint(query) as usize;
        Ok(format!(
            "Career switch advice for '{query}': {}. \
             Most successful switchers keep their current income for 6–12 months of overlap \
             while building credibility in the new field.",
            FIRST_STEPS[hash % FIRST_STEPS.len()],
        ))
    }
}
