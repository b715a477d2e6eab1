//! Salary benchmark tool — stub that returns plausible salary figures.
//!
//! In production this would query a compensation data provider. The stub
//! derives a deterministic range from the query so the advisor loop can be
//! exercised end-to-end without network access.

use crate::stub::fingerprint;
use async_trait::async_trait;
use mentora_core::error::ToolError;
use mentora_core::tool::Tool;

pub struct SalaryBenchmarkTool;

#[async_trait]
impl Tool for SalaryBenchmarkTool {
    fn name(&self) -> &str {
        "salary_benchmark"
    }

    fn description(&self) -> &str {
        "Provides average salaries by job role, experience level, and region."
    }

    async fn invoke(&self, input: &str) -> Result<String, ToolError> {
        let query = input.trim();
        if query.is_empty() {
            return Err(ToolError::MalformedInput(
                "salary_benchmark needs a job role or query, e.g. 'data engineer, senior, EU'"
                    .into(),
            ));
        }

        let hash = fingerprint(query);
        let base = 42_000 + (hash % 90) * 1_000;
        let spread = 12_000 + (hash % 25) * 1_000;
        let median = base + spread / 2;

        Ok(format!(
            "Salary information for '{query}': typical range ${}–${} per year, median around ${}. \
             Figures vary with region, company size, and experience level.",
            group_thousands(base),
            group_thousands(base + spread),
            group_thousands(median),
        ))
    }
}

/// Format 84000 as "84,000".
fn group_thousands(n: u32) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
