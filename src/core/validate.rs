//! Cross-check of the stored configuration against the remote service.
//!
//! Must run before any remote write that trusts the stored project/user ids. A
//! mismatch means the file was copied from another project or the key was reissued.

use crate::core::config::Config;
use crate::core::error::LearnsyncError;
use crate::core::remote::{ApiKeyIdentity, RemoteClient};

pub fn validate_config(
    config: &Config,
    client: &RemoteClient,
) -> Result<ApiKeyIdentity, LearnsyncError> {
    let identity = client
        .validate_api_key(&config.api_key)
        .map_err(|e| LearnsyncError::ValidationFailed(Box::new(e)))?;
    check_identity(config, &identity)?;
    Ok(identity)
}

/// Compare a remote identity with the stored ids.
pub fn check_identity(config: &Config, identity: &ApiKeyIdentity) -> Result<(), LearnsyncError> {
    if identity.user_id != config.user_id {
        return Err(LearnsyncError::ConfigMismatch {
            field: "userId",
            stored: config.user_id.to_string(),
            remote: identity.user_id.to_string(),
        });
    }
    if identity.project_id != config.project_id.trim() {
        return Err(LearnsyncError::ConfigMismatch {
            field: "projectId",
            stored: config.project_id.clone(),
            remote: identity.project_id.clone(),
        });
    }
    Ok(())
}
