#![allow(dead_code)]

use learnsync::core::config::{self, Config};
use learnsync::core::error::LearnsyncError;
use learnsync::core::pending::LearningRecord;
use learnsync::core::prompt::Prompter;
use learnsync::core::store::Store;
use serde_json::json;
use std::cell::RefCell;
use std::collections::VecDeque;
use std::fs;
use std::path::{Path, PathBuf};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const API_KEY: &str = "lsk_test_0123456789";
pub const PROJECT_ID: &str = "42";
pub const USER_ID: u64 = 7;

/// Prompter that replays canned answers in order.
#[derive(Default)]
pub struct ScriptedPrompter {
    answers: RefCell<VecDeque<String>>,
    confirms: RefCell<VecDeque<bool>>,
    pub asked: RefCell<Vec<(String, Option<String>)>>,
}

impl ScriptedPrompter {
    pub fn new(answers: &[&str]) -> Self {
        Self {
            answers: RefCell::new(answers.iter().map(|a| a.to_string()).collect()),
            ..Default::default()
        }
    }

    pub fn with_confirms(self, confirms: &[bool]) -> Self {
        *self.confirms.borrow_mut() = confirms.iter().copied().collect();
        self
    }

    fn next(&self, label: &str) -> Result<String, LearnsyncError> {
        self.answers
            .borrow_mut()
            .pop_front()
            .ok_or_else(|| LearnsyncError::PromptFailed(format!("no answer for {label}")))
    }
}

impl Prompter for ScriptedPrompter {
    fn input(&self, label: &str, default: Option<&str>) -> Result<String, LearnsyncError> {
        self.asked
            .borrow_mut()
            .push((label.to_string(), default.map(str::to_string)));
        self.next(label)
    }

    fn secret(&self, label: &str) -> Result<String, LearnsyncError> {
        self.asked.borrow_mut().push((label.to_string(), None));
        self.next(label)
    }

    fn confirm(&self, label: &str, default: bool) -> Result<bool, LearnsyncError> {
        self.asked.borrow_mut().push((label.to_string(), None));
        Ok(self.confirms.borrow_mut().pop_front().unwrap_or(default))
    }
}

pub fn sample_config() -> Config {
    Config {
        project_id: PROJECT_ID.to_string(),
        api_key: API_KEY.to_string(),
        user_id: USER_ID,
        github_repo: None,
    }
}

pub fn write_config(store: &Store) {
    config::save(store, &sample_config()).expect("save config");
}

pub fn record(title: Option<&str>, function_name: &str) -> LearningRecord {
    LearningRecord {
        file_path: "src/lib.rs".to_string(),
        function_name: function_name.to_string(),
        library_name: "serde".to_string(),
        description: format!("how {function_name} uses serde"),
        code_snippet: format!("fn {function_name}() {{}}"),
        title: title.map(str::to_string),
    }
}

pub fn init_git_dir(root: &Path) {
    fs::create_dir_all(root.join(".git").join("hooks")).expect("mkdir .git/hooks");
}

pub fn pending_files(store: &Store) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = match fs::read_dir(store.pending_dir()) {
        Ok(entries) => entries
            .map(|e| e.expect("dir entry").path())
            .collect(),
        Err(_) => Vec::new(),
    };
    files.sort();
    files
}

/// Mount `GET /auth/test-api-key` answering with the given identity.
pub async fn mount_identity(server: &MockServer, user_id: u64, project_id: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path("/auth/test-api-key"))
        .and(header("Authorization", format!("ApiKey {API_KEY}").as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": "API key is valid",
            "user": { "user_id": user_id, "project_id": project_id }
        })))
        .mount(server)
        .await;
}

pub async fn submission_count(server: &MockServer) -> usize {
    server
        .received_requests()
        .await
        .expect("request recording enabled")
        .iter()
        .filter(|r| r.url.path().ends_with("/learnings"))
        .count()
}
