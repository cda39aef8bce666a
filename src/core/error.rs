use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LearnsyncError {
    #[error("Configuration unavailable: {0}. Run `learnsync init` first.")]
    ConfigMissing(String),
    #[error(
        "Configuration mismatch: {field} is '{stored}' locally but the API key belongs to '{remote}'"
    )]
    ConfigMismatch {
        field: &'static str,
        stored: String,
        remote: String,
    },
    #[error("Authentication failed: {0}")]
    AuthFailed(String),
    #[error("Project {project_id} is not accessible with this account: {detail}")]
    ProjectNotOwned { project_id: String, detail: String },
    #[error("Failed to generate API key: {0}")]
    KeyIssuanceFailed(String),
    #[error("Invalid API key: {0}")]
    InvalidApiKey(String),
    #[error("Submission failed (HTTP {status}): {detail}")]
    SubmissionFailed { status: u16, detail: String },
    #[error("Not a git repository: {0}")]
    NotAGitRepo(String),
    #[error("Failed to parse learning record: {0}")]
    RecordParseFailed(String),
    #[error("Configuration validation failed: {0}")]
    ValidationFailed(Box<LearnsyncError>),
    #[error("Invalid repository URL: {0}")]
    InvalidRepoUrl(String),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Prompt failed: {0}")]
    PromptFailed(String),
    #[error("Settings error: {0}")]
    SettingsError(String),
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),
    #[error("I/O error: {0}")]
    IoError(#[from] io::Error),
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}
