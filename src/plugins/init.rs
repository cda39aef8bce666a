//! `init`: exchange account credentials for a project API key and store it.

use crate::core::config::{self, Config};
use crate::core::error::LearnsyncError;
use crate::core::prompt::Prompter;
use crate::core::remote::RemoteClient;
use crate::core::settings::Settings;
use crate::core::store::{CONFIG_FILE, STATE_DIR, Store};
use crate::core::tui::{self, BoxStyle, ItemStatus};
use std::fs;
use std::io::Write;

#[derive(Clone)]
pub struct InitRequest {
    pub email: String,
    pub password: String,
    pub project_id: String,
}

/// Log in, confirm project ownership, issue a key, and persist the configuration.
///
/// A `githubRepo` recorded by an earlier `link` survives re-initialisation.
pub fn initialize(
    store: &Store,
    client: &RemoteClient,
    request: &InitRequest,
) -> Result<Config, LearnsyncError> {
    let project_id = request.project_id.trim();
    if project_id.is_empty() || !project_id.chars().all(|c| c.is_ascii_digit()) {
        return Err(LearnsyncError::InvalidInput(format!(
            "project id must be a number, got '{}'",
            project_id
        )));
    }

    let session = client.login(request.email.trim(), &request.password)?;
    client.verify_project_ownership(&session.access_token, project_id)?;
    let api_key = client.issue_api_key(&session.access_token, project_id)?;

    let github_repo = config::load(store).ok().and_then(|c| c.github_repo);
    let config = Config {
        project_id: project_id.to_string(),
        api_key,
        user_id: session.user_id,
        github_repo,
    };
    config::save(store, &config)?;
    fs::create_dir_all(store.pending_dir())?;
    ensure_config_ignored(store)?;

    Ok(config)
}

/// Add the config file to `.gitignore` in git working trees. Returns true if added.
pub fn ensure_config_ignored(store: &Store) -> Result<bool, LearnsyncError> {
    if !store.is_git_work_tree() {
        return Ok(false);
    }

    let entry = format!("{}/{}", STATE_DIR, CONFIG_FILE);
    let path = store.root.join(".gitignore");
    let existing = match fs::read_to_string(&path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => String::new(),
        Err(e) => return Err(LearnsyncError::IoError(e)),
    };

    let covered = existing.lines().map(str::trim).any(|line| {
        let line = line.trim_start_matches('/').trim_end_matches('/');
        line == entry || line == STATE_DIR
    });
    if covered {
        return Ok(false);
    }

    let mut file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)?;
    if !existing.is_empty() && !existing.ends_with('\n') {
        writeln!(file)?;
    }
    writeln!(file, "{}", entry)?;
    Ok(true)
}

pub fn run_init_cli(
    store: &Store,
    settings: &Settings,
    prompter: &dyn Prompter,
) -> Result<(), LearnsyncError> {
    tui::render_box("LEARNSYNC INIT", "Connect this project", BoxStyle::Info);

    if config::exists(store)
        && !prompter.confirm(
            "This project is already initialized. Replace its configuration?",
            false,
        )?
    {
        tui::print_status_line("Kept existing configuration", ItemStatus::Skipped);
        return Ok(());
    }

    let request = InitRequest {
        email: prompter.input("Email", None)?,
        password: prompter.secret("Password")?,
        project_id: prompter.input("Project ID", None)?,
    };

    let client = RemoteClient::new(settings)?;
    let config = initialize(store, &client, &request)?;

    tui::render_box(
        "PROJECT CONNECTED",
        &format!("Project {}", config.project_id),
        BoxStyle::Success,
    );
    tui::print_status_line(
        &format!("API key: {}", config::mask_secret(&config.api_key)),
        ItemStatus::Created,
    );
    tui::print_status_line(
        &format!("Configuration: {}", store.config_path().display()),
        ItemStatus::Created,
    );
    tui::print_status_line(
        "Run `learnsync link` to sync automatically before each push",
        ItemStatus::Info,
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn gitignore_is_untouched_outside_git() {
        let tmp = tempdir().expect("tempdir");
        let store = Store::new(tmp.path());
        assert!(!ensure_config_ignored(&store).expect("ignore"));
        assert!(!tmp.path().join(".gitignore").exists());
    }

    #[test]
    fn gitignore_entry_added_once() {
        let tmp = tempdir().expect("tempdir");
        fs::create_dir(tmp.path().join(".git")).expect("mkdir .git");
        fs::write(tmp.path().join(".gitignore"), "target").expect("write");
        let store = Store::new(tmp.path());

        assert!(ensure_config_ignored(&store).expect("first"));
        assert!(!ensure_config_ignored(&store).expect("second"));
        let content = fs::read_to_string(tmp.path().join(".gitignore")).expect("read");
        assert_eq!(content, "target\n.learnsync/config.json\n");
    }

    #[test]
    fn ignored_state_dir_counts_as_covered() {
        let tmp = tempdir().expect("tempdir");
        fs::create_dir(tmp.path().join(".git")).expect("mkdir .git");
        fs::write(tmp.path().join(".gitignore"), "/.learnsync/\n").expect("write");
        assert!(!ensure_config_ignored(&Store::new(tmp.path())).expect("ignore"));
    }
}
