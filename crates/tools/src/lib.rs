//! Built-in career tool implementations for Mentora.
//!
//! Tools give the advisor the ability to consult data mid-conversation:
//! salary benchmarks, resume feedback, job role explanations, education
//! paths, career-switch advice, career guide retrieval, and the user's
//! stored profile.
//!
//! The advisory tools are deterministic stubs: they return plausible,
//! templated guidance derived from the input so the whole loop can be
//! exercised end-to-end without external services. The profile tools are
//! the only ones with side effects.

pub mod career_switch;
pub mod doc_search;
pub mod education_advisor;
pub mod job_explainer;
pub mod profile;
pub mod resume_reviewer;
pub mod salary_benchmark;

mod stub;

use mentora_core::error::ToolError;
use mentora_core::profile::ProfileStore;
use mentora_core::tool::{Tool, ToolRegistry, ToolSpec};
use mentora_core::turn::UserId;
use std::sync::Arc;

pub use profile::{GetUserProfileTool, UpdateUserProfileTool};

/// Create the default tool registry for one user session.
///
/// The profile tools are bound to the given user and store; everything
/// else is stateless and shared-nothing.
pub fn default_registry(
    profiles: Arc<dyn ProfileStore>,
    user_id: UserId,
) -> Result<ToolRegistry, ToolError> {
    let mut registry = ToolRegistry::new();
    registry.register(Box::new(salary_benchmark::SalaryBenchmarkTool))?;
    registry.register(Box::new(resume_reviewer::ResumeReviewerTool))?;
    registry.register(Box::new(job_explainer::JobExplainerTool))?;
    registry.register(Box::new(education_advisor::EducationAdvisorTool))?;
    registry.register(Box::new(career_switch::CareerSwitchAdvisorTool))?;
    registry.register(Box::new(doc_search::CareerDocSearchTool::new()))?;
    registry.register(Box::new(GetUserProfileTool::new(
        profiles.clone(),
        user_id.clone(),
    )))?;
    registry.register(Box::new(UpdateUserProfileTool::new(profiles, user_id)))?;
    Ok(registry)
}

/// The default tool catalog as specs, without binding to any user or store.
///
/// Matches what `default_registry` would expose via `ToolRegistry::specs`:
/// same names, same descriptions, sorted by name. Useful for surfaces that
/// only describe the tools (the gateway's tool listing) and have no session
/// at hand.
pub fn default_specs() -> Vec<ToolSpec> {
    let mut specs = vec![
        salary_benchmark::SalaryBenchmarkTool.to_spec(),
        resume_reviewer::ResumeReviewerTool.to_spec(),
        job_explainer::JobExplainerTool.to_spec(),
        education_advisor::EducationAdvisorTool.to_spec(),
        career_switch::CareerSwitchAdvisorTool.to_spec(),
        doc_search::CareerDocSearchTool::new().to_spec(),
        ToolSpec {
            name: profile::GET_PROFILE_NAME.to_string(),
            description: profile::GET_PROFILE_DESCRIPTION.to_string(),
        },
        ToolSpec {
            name: profile::UPDATE_PROFILE_NAME.to_string(),
            description: profile::UPDATE_PROFILE_DESCRIPTION.to_string(),
        },
    ];
    specs.sort_by(|a, b| a.name.cmp(&b.name));
    specs
}
