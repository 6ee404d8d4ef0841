//! JSON task file: the whole task collection as one array of records.

use std::path::{Path, PathBuf};

use super::data_dir;
use crate::error::{CoreError, Result};
use crate::task::Task;

/// Task collection persisted as pretty-printed JSON.
#[derive(Debug, Clone)]
pub struct TaskFile {
    path: PathBuf,
}

impl TaskFile {
    /// `tasks.json` inside [`data_dir`].
    pub fn open_default() -> Result<Self> {
        Ok(Self::at(data_dir()?.join("tasks.json")))
    }

    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read every record. A missing file is an empty collection.
    pub fn load(&self) -> Result<Vec<Task>> {
        match std::fs::read_to_string(&self.path) {
            Ok(content) if content.trim().is_empty() => Ok(Vec::new()),
            Ok(content) => Ok(serde_json::from_str(&content)?),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Vec::new()),
            Err(err) => Err(err.into()),
        }
    }

    /// Replace the stored collection with `tasks`.
    ///
    /// Writes a sibling temp file, then renames it into place.
    pub fn save(&self, tasks: &[Task]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, serde_json::to_string_pretty(tasks)?)?;
        std::fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    pub fn get(&self, id: &str) -> Result<Task> {
        self.load()?
            .into_iter()
            .find(|t| t.id == id)
            .ok_or_else(|| CoreError::TaskNotFound(id.to_string()))
    }

    /// Insert or overwrite by id.
    pub fn upsert(&self, task: Task) -> Result<()> {
        let mut tasks = self.load()?;
        match tasks.iter_mut().find(|t| t.id == task.id) {
            Some(existing) => *existing = task,
            None => tasks.push(task),
        }
        self.save(&tasks)
    }

    /// Remove by id, returning the removed record.
    pub fn remove(&self, id: &str) -> Result<Task> {
        let mut tasks = self.load()?;
        let pos = tasks
            .iter()
            .position(|t| t.id == id)
            .ok_or_else(|| CoreError::TaskNotFound(id.to_string()))?;
        let removed = tasks.remove(pos);
        self.save(&tasks)?;
        Ok(removed)
    }
}
