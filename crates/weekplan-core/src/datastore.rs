use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, anyhow};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tempfile::NamedTempFile;
use tracing::{debug, info, warn};

use crate::task::Task;

const TASKS_KEY: &str = "tasks.json";
const THEME_KEY: &str = "theme.json";

/// File-backed key-value store with two fixed keys: the serialized task
/// collection and the dark-mode preference. Reads never fail: malformed
/// or unreadable content is logged and replaced by the default.
#[derive(Debug)]
pub struct DataStore {
    pub data_dir: PathBuf,
    pub tasks_path: PathBuf,
    pub theme_path: PathBuf,
}

impl DataStore {
    #[tracing::instrument(skip(data_dir))]
    pub fn open(data_dir: &Path) -> anyhow::Result<Self> {
        let data_dir = data_dir.to_path_buf();
        fs::create_dir_all(&data_dir)
            .with_context(|| format!("failed to create {}", data_dir.display()))?;

        let tasks_path = data_dir.join(TASKS_KEY);
        let theme_path = data_dir.join(THEME_KEY);

        if !tasks_path.exists() {
            fs::write(&tasks_path, "[]")?;
        }
        if !theme_path.exists() {
            fs::write(&theme_path, "false")?;
        }

        info!(
            data_dir = %data_dir.display(),
            tasks = %tasks_path.display(),
            theme = %theme_path.display(),
            "opened datastore"
        );

        Ok(Self {
            data_dir,
            tasks_path,
            theme_path,
        })
    }

    #[tracing::instrument(skip(self))]
    pub fn load_tasks(&self) -> Vec<Task> {
        let tasks: Vec<Task> = load_json_or_default(&self.tasks_path);
        debug!(count = tasks.len(), "loaded task collection");
        tasks
    }

    #[tracing::instrument(skip(self, tasks))]
    pub fn save_tasks(&self, tasks: &[Task]) -> anyhow::Result<()> {
        save_json_atomic(&self.tasks_path, &tasks).context("failed to save tasks.json")
    }

    #[tracing::instrument(skip(self))]
    pub fn load_dark_mode(&self) -> bool {
        load_json_or_default(&self.theme_path)
    }

    #[tracing::instrument(skip(self))]
    pub fn save_dark_mode(&self, dark: bool) -> anyhow::Result<()> {
        save_json_atomic(&self.theme_path, &dark).context("failed to save theme.json")
    }
}

fn load_json_or_default<T: DeserializeOwned + Default>(path: &Path) -> T {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(err) => {
            warn!(file = %path.display(), error = %err, "unreadable store key; using default");
            return T::default();
        }
    };

    match serde_json::from_str(&raw) {
        Ok(value) => value,
        Err(err) => {
            warn!(file = %path.display(), error = %err, "malformed store key; using default");
            T::default()
        }
    }
}

#[tracing::instrument(skip(path, value))]
fn save_json_atomic<T: Serialize>(path: &Path, value: &T) -> anyhow::Result<()> {
    debug!(file = %path.display(), "saving json atomically");

    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    let mut temp = NamedTempFile::new_in(dir)?;
    serde_json::to_writer_pretty(&mut temp, value)?;
    temp.flush()?;

    temp.persist(path)
        .map_err(|err| anyhow!("failed to persist {}: {}", path.display(), err))?;

    Ok(())
}
