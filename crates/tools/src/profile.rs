//! Profile tools — the only tools with side effects.
//!
//! `get_user_profile` renders the stored profile as text;
//! `update_user_profile` parses a `key=value` input and upserts one
//! attribute. Both are constructed per session with an explicit store
//! handle and user identity.

use async_trait::async_trait;
use mentora_core::error::ToolError;
use mentora_core::profile::ProfileStore;
use mentora_core::tool::Tool;
use mentora_core::turn::UserId;
use std::sync::Arc;
use tracing::info;

pub const GET_PROFILE_NAME: &str = "get_user_profile";
pub const GET_PROFILE_DESCRIPTION: &str =
    "Retrieves the user's current career profile. The input is ignored.";
pub const UPDATE_PROFILE_NAME: &str = "update_user_profile";
pub const UPDATE_PROFILE_DESCRIPTION: &str =
    "Updates the user's career profile. Input format: field=value";

pub struct GetUserProfileTool {
    profiles: Arc<dyn ProfileStore>,
    user_id: UserId,
}

impl GetUserProfileTool {
    pub fn new(profiles: Arc<dyn ProfileStore>, user_id: UserId) -> Self {
        Self { profiles, user_id }
    }
}

#[async_trait]
impl Tool for GetUserProfileTool {
    fn name(&self) -> &str {
        GET_PROFILE_NAME
    }

    fn description(&self) -> &str {
        GET_PROFILE_DESCRIPTION
    }

    async fn invoke(&self, _input: &str) -> Result<String, ToolError> {
        let profile = self.profiles.get(&self.user_id).await.map_err(|e| {
            ToolError::ExecutionFailed {
                tool_name: "get_user_profile".into(),
                reason: e.to_string(),
            }
        })?;
        Ok(profile.to_text())
    }
}

pub struct UpdateUserProfileTool {
    profiles: Arc<dyn ProfileStore>,
    user_id: UserId,
}

impl UpdateUserProfileTool {
    pub fn new(profiles: Arc<dyn ProfileStore>, user_id: UserId) -> Self {
        Self { profiles, user_id }
    }
}

#[async_trait]
impl Tool for UpdateUserProfileTool {
    fn name(&self) -> &str {
        UPDATE_PROFILE_NAME
    }

    fn description(&self) -> &str {
        UPDATE_PROFILE_DESCRIPTION
    }

    async fn invoke(&self, input: &str) -> Result<String, ToolError> {
        // Split on the first '=' only; values may contain '=' themselves.
        let (key, value) = input.split_once('=').ok_or_else(|| {
            ToolError::MalformedInput("Invalid format. Use 'field=value'.".into())
        })?;

        let key = key.trim().to_lowercase();
        let value = value.trim();
        if key.is_empty() {
            return Err(ToolError::MalformedInput(
                "Invalid format. The field name before '=' is empty.".into(),
            ));
        }

        self.profiles
            .set(&self.user_id, &key, value)
            .await
            .map_err(|e| ToolError::ExecutionFailed {
                tool_name: "update_user_profile".into(),
                reason: e.to_string(),
            })?;

        info!(user = self.user_id.as_str(), key = %key, "Profile updated via tool");

        let profile = self.profiles.get(&self.user_id).await.map_err(|e| {
            ToolError::ExecutionFailed {
                tool_name: "update_user_profile".into(),
                reason: e.to_string(),
            }
        })?;

        Ok(format!(
            "Updated {key} to '{value}'.\n\nCurrent profile:\n{}",
            profile.to_text()
        ))
    }
}
