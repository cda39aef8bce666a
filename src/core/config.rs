//! Credential store: the per-project configuration record.
//!
//! The record ties a working directory to a remote project through an API key.
//! `user_id` is captured at init time and never rewritten; it exists only so the
//! validator can detect a configuration copied from another account.

use crate::core::error::LearnsyncError;
use crate::core::store::Store;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::io::ErrorKind;

#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    pub project_id: String,
    pub api_key: String,
    pub user_id: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github_repo: Option<String>,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("project_id", &self.project_id)
            .field("api_key", &mask_secret(&self.api_key))
            .field("user_id", &self.user_id)
            .field("github_repo", &self.github_repo)
            .finish()
    }
}

/// A single amendable field. `user_id` is deliberately absent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigField {
    ProjectId(String),
    ApiKey(String),
    GithubRepo(Option<String>),
}

pub fn exists(store: &Store) -> bool {
    store.config_path().is_file()
}

/// Read the configuration. Absent or malformed files are `ConfigMissing`.
pub fn load(store: &Store) -> Result<Config, LearnsyncError> {
    let path = store.config_path();
    let raw = match fs::read_to_string(&path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(LearnsyncError::ConfigMissing(format!(
                "no configuration at {}",
                path.display()
            )));
        }
        Err(e) => return Err(LearnsyncError::IoError(e)),
    };

    let config: Config = serde_json::from_str(&raw).map_err(|e| {
        LearnsyncError::ConfigMissing(format!("{} is malformed: {}", path.display(), e))
    })?;

    if config.project_id.trim().is_empty() || config.api_key.trim().is_empty() {
        return Err(LearnsyncError::ConfigMissing(format!(
            "{} is malformed: projectId and apiKey must be non-empty",
            path.display()
        )));
    }

    Ok(config)
}

/// Write the configuration in full, creating `.learnsync/` when needed.
pub fn save(store: &Store, config: &Config) -> Result<(), LearnsyncError> {
    let path = store.config_path();
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut body = serde_json::to_string_pretty(config)?;
    body.push('\n');
    fs::write(&path, body)?;

    // The file carries a bearer credential.
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mut perms = fs::metadata(&path)?.permissions();
        perms.set_mode(0o600);
        fs::set_permissions(&path, perms)?;
    }

    tracing::debug!(path = %path.display(), "configuration saved");
    Ok(())
}

/// Read-modify-write of one field. Not safe against concurrent invocations.
pub fn update(store: &Store, field: ConfigField) -> Result<Config, LearnsyncError> {
    let mut config = load(store)?;
    match field {
        ConfigField::ProjectId(value) => config.project_id = value,
        ConfigField::ApiKey(value) => config.api_key = value,
        ConfigField::GithubRepo(value) => config.github_repo = value,
    }
    save(store, &config)?;
    Ok(config)
}

/// Show only the last four characters of a secret.
pub fn mask_secret(secret: &str) -> String {
    let chars: Vec<char> = secret.chars().collect();
    if chars.len() <= 4 {
        return "*".repeat(chars.len());
    }
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}{}", "*".repeat(chars.len().min(12) - 4), tail)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn sample() -> Config {
        Config {
            project_id: "42".to_string(),
            api_key: "sk_live_abcdef123456".to_string(),
            user_id: 7,
            github_repo: None,
        }
    }

    #[test]
    fn save_then_load_creates_state_dir() {
        let tmp = tempdir().expect("tempdir");
        let store = Store::new(tmp.path());
        save(&store, &sample()).expect("save");
        assert!(store.state_dir().is_dir());
        assert_eq!(load(&store).expect("load"), sample());
    }

    #[test]
    fn on_disk_shape_is_camel_case_without_unset_repo() {
        let tmp = tempdir().expect("tempdir");
        let store = Store::new(tmp.path());
        save(&store, &sample()).expect("save");
        let raw = fs::read_to_string(store.config_path()).expect("read");
        let value: serde_json::Value = serde_json::from_str(&raw).expect("json");
        assert_eq!(value["projectId"], "42");
        assert_eq!(value["userId"], 7);
        assert!(value.get("githubRepo").is_none());
    }

    #[test]
    fn missing_file_is_config_missing() {
        let tmp = tempdir().expect("tempdir");
        let err = load(&Store::new(tmp.path())).expect_err("should fail");
        assert!(matches!(err, LearnsyncError::ConfigMissing(_)));
    }

    #[test]
    fn malformed_file_is_config_missing() {
        let tmp = tempdir().expect("tempdir");
        let store = Store::new(tmp.path());
        fs::create_dir_all(store.state_dir()).expect("mkdir");

        for body in [
            "not json",
            r#"{"projectId":"42","apiKey":"k"}"#,
            r#"{"projectId":42,"apiKey":"k","userId":7}"#,
            r#"{"projectId":"","apiKey":"k","userId":7}"#,
        ] {
            fs::write(store.config_path(), body).expect("write");
            let err = load(&store).expect_err("should fail");
            assert!(
                matches!(err, LearnsyncError::ConfigMissing(_)),
                "body {body} gave {err:?}"
            );
        }
    }

    #[test]
    fn update_keeps_user_id() {
        let tmp = tempdir().expect("tempdir");
        let store = Store::new(tmp.path());
        save(&store, &sample()).expect("save");

        let updated = update(
            &store,
            ConfigField::GithubRepo(Some("https://github.com/acme/app".to_string())),
        )
        .expect("update");
        assert_eq!(updated.user_id, 7);
        assert_eq!(
            load(&store).expect("load").github_repo.as_deref(),
            Some("https://github.com/acme/app")
        );

        update(&store, ConfigField::GithubRepo(None)).expect("clear");
        assert_eq!(load(&store).expect("load").github_repo, None);
    }

    #[test]
    fn update_without_config_fails() {
        let tmp = tempdir().expect("tempdir");
        let err = update(
            &Store::new(tmp.path()),
            ConfigField::ApiKey("new".to_string()),
        )
        .expect_err("should fail");
        assert!(matches!(err, LearnsyncError::ConfigMissing(_)));
    }

    #[test]
    fn debug_output_masks_api_key() {
        let rendered = format!("{:?}", sample());
        assert!(!rendered.contains("sk_live_abcdef123456"));
        assert!(rendered.contains("3456"));
    }

    #[test]
    fn mask_secret_keeps_last_four() {
        assert_eq!(mask_secret("abc"), "***");
        assert_eq!(mask_secret("abcdefgh"), "****efgh");
        assert_eq!(mask_secret("a-very-long-secret-value"), "********alue");
    }
}
