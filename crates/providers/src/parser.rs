//! Parser for the decision line protocol.
//!
//! The model is instructed to reply in one of two shapes:
//!
//! ```text
//! TOOL: <tool name>
//! INPUT: <single-line input for the tool>
//! ```
//!
//! or plain text, optionally prefixed with `FINAL:`. Anything else is a
//! `DecisionError::Parse`, which the advisor loop absorbs as a retryable
//! observation rather than an abort.

use mentora_core::decision::Decision;
use mentora_core::error::DecisionError;

/// Parse raw model output into a typed decision.
pub fn parse_decision(raw: &str) -> Result<Decision, DecisionError> {
    let text = raw.trim();
    if text.is_empty() {
        return Err(DecisionError::Parse("model returned empty output".into()));
    }

    // A TOOL: line anywhere in the output wins over surrounding prose;
    // models often wrap the protocol lines in explanation.
    let mut lines = text.lines();
    while let Some(line) = lines.next() {
        let Some(name) = line.trim().strip_prefix("TOOL:") else {
            continue;
        };
        let name = name.trim();
        if name.is_empty() {
            return Err(DecisionError::Parse("TOOL: line with empty name".into()));
        }

        // INPUT: is expected on the next non-empty line; remaining lines
        // belong to the input (tool inputs may contain newlines).
        let mut input_lines: Vec<&str> = Vec::new();
        for rest in lines.by_ref() {
            let rest = rest.trim();
            if input_lines.is_empty() {
                if rest.is_empty() {
                    continue;
                }
                let Some(first) = rest.strip_prefix("INPUT:") else {
                    return Err(DecisionError::Parse(format!(
                        "expected INPUT: after TOOL: {name}, got '{rest}'"
                    )));
                };
                input_lines.push(first.trim());
            } else {
                input_lines.push(rest);
            }
        }

        return Ok(Decision::ToolCall {
            name: name.to_string(),
            input: input_lines.join("\n").trim().to_string(),
        });
    }

    // No TOOL: line — this is a final answer. Tolerate a FINAL: prefix.
    let answer = text.strip_prefix("FINAL:").unwrap_or(text).trim();
    if answer.is_empty() {
        return Err(DecisionError::Parse(
            "FINAL: with no answer text".into(),
        ));
    }
    Ok(Decision::Final {
        text: answer.to_string(),
    })
}
