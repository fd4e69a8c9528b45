use std::path::Path;

use chrono::Utc;
use tracing::{debug, info};
use uuid::Uuid;

use crate::datastore::DataStore;
use crate::task::{Day, Task, WEEK};
use crate::view::Filter;

/// Why a mutation was refused. Carries the message shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    EmptyText,
    DuplicateText,
}

impl Rejection {
    pub fn user_message(&self) -> &'static str {
        match self {
            Rejection::EmptyText => "a task cannot be empty",
            Rejection::DuplicateText => "that task already exists on this day",
        }
    }
}

/// Outcome of a validated mutation. `NotFound` is the benign case of a
/// stale id: nothing changed, nothing to report as an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub enum Mutation {
    Applied,
    Rejected(Rejection),
    NotFound,
}

impl Mutation {
    pub fn applied(&self) -> bool {
        matches!(self, Mutation::Applied)
    }
}

/// Owner of the authoritative task collection. Every mutator follows the
/// same two steps: change the in-memory vector, then persist the whole
/// collection through the datastore. IO failure surfaces as the outer
/// `anyhow::Result`; validation failure as `Mutation::Rejected`.
#[derive(Debug)]
pub struct TaskStore {
    store: DataStore,
    tasks: Vec<Task>,
}

impl TaskStore {
    #[tracing::instrument(skip(data_dir))]
    pub fn open(data_dir: &Path) -> anyhow::Result<Self> {
        let store = DataStore::open(data_dir)?;
        let tasks = store.load_tasks();
        info!(count = tasks.len(), "task store ready");
        Ok(Self { store, tasks })
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn datastore(&self) -> &DataStore {
        &self.store
    }

    pub fn find(&self, id: Uuid) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == id)
    }

    #[tracing::instrument(skip(self, text))]
    pub fn add_task(&mut self, text: &str, day: Day) -> anyhow::Result<Mutation> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Ok(Mutation::Rejected(Rejection::EmptyText));
        }
        if self.day_has_text(day, trimmed, None) {
            debug!(%day, "duplicate text in day; rejecting add");
            return Ok(Mutation::Rejected(Rejection::DuplicateText));
        }

        self.tasks.push(Task::new(trimmed.to_string(), day, Utc::now()));
        self.store.save_tasks(&self.tasks)?;
        info!(%day, "added task");
        Ok(Mutation::Applied)
    }

    #[tracing::instrument(skip(self, new_text), fields(id = %id))]
    pub fn edit_task(&mut self, id: Uuid, new_text: &str) -> anyhow::Result<Mutation> {
        let trimmed = new_text.trim();
        if trimmed.is_empty() {
            return Ok(Mutation::Rejected(Rejection::EmptyText));
        }

        let Some(day) = self.find(id).map(|task| task.day) else {
            debug!("edit on unknown id; ignoring");
            return Ok(Mutation::NotFound);
        };
        if self.day_has_text(day, trimmed, Some(id)) {
            debug!(%day, "duplicate text in day; rejecting edit");
            return Ok(Mutation::Rejected(Rejection::DuplicateText));
        }

        if let Some(task) = self.tasks.iter_mut().find(|task| task.id == id) {
            task.text = trimmed.to_string();
        }
        self.store.save_tasks(&self.tasks)?;
        Ok(Mutation::Applied)
    }

    #[tracing::instrument(skip(self), fields(id = %id))]
    pub fn toggle_task(&mut self, id: Uuid) -> anyhow::Result<()> {
        let Some(task) = self.tasks.iter_mut().find(|task| task.id == id) else {
            debug!("toggle on unknown id; ignoring");
            return Ok(());
        };
        task.completed = !task.completed;
        self.store.save_tasks(&self.tasks)
    }

    #[tracing::instrument(skip(self), fields(id = %id))]
    pub fn delete_task(&mut self, id: Uuid) -> anyhow::Result<()> {
        let before = self.tasks.len();
        self.tasks.retain(|task| task.id != id);
        if self.tasks.len() == before {
            debug!("delete on unknown id; ignoring");
            return Ok(());
        }
        self.store.save_tasks(&self.tasks)
    }

    /// Reassigns `day` on the matching task. Moving onto the task's own
    /// day is an idempotent no-op; the duplicate scan always excludes the
    /// moving task itself.
    #[tracing::instrument(skip(self), fields(id = %id))]
    pub fn move_task(&mut self, id: Uuid, new_day: Day) -> anyhow::Result<Mutation> {
        let Some(task) = self.find(id) else {
            debug!("move on unknown id; ignoring");
            return Ok(Mutation::NotFound);
        };
        if task.day == new_day {
            return Ok(Mutation::Applied);
        }

        let text = task.text.clone();
        if self.day_has_text(new_day, &text, Some(id)) {
            debug!(%new_day, "duplicate text in target day; rejecting move");
            return Ok(Mutation::Rejected(Rejection::DuplicateText));
        }

        if let Some(task) = self.tasks.iter_mut().find(|task| task.id == id) {
            task.day = new_day;
        }
        self.store.save_tasks(&self.tasks)?;
        Ok(Mutation::Applied)
    }

    /// Copies the task's text into every other day that does not already
    /// hold equal text, as a fresh pending sibling. Occupied days are
    /// skipped individually. Returns the number of siblings created;
    /// persists only when that number is nonzero.
    #[tracing::instrument(skip(self), fields(id = %id))]
    pub fn replicate_to_all_days(&mut self, id: Uuid) -> anyhow::Result<usize> {
        let Some(source) = self.find(id).cloned() else {
            debug!("replicate on unknown id; ignoring");
            return Ok(0);
        };

        let now = Utc::now();
        let mut created = Vec::new();
        for day in WEEK {
            if day == source.day {
                continue;
            }
            if self.day_has_text(day, &source.text, None) {
                continue;
            }
            created.push(Task::new(source.text.clone(), day, now));
        }

        if created.is_empty() {
            return Ok(0);
        }

        let count = created.len();
        self.tasks.extend(created);
        self.store.save_tasks(&self.tasks)?;
        info!(count, "replicated task across the week");
        Ok(count)
    }

    pub fn tasks_for_day(&self, day: Day) -> Vec<&Task> {
        self.tasks.iter().filter(|task| task.day == day).collect()
    }

    pub fn filtered_tasks_for_day(&self, day: Day, filter: Filter) -> Vec<&Task> {
        self.tasks
            .iter()
            .filter(|task| task.day == day && filter.keeps(task))
            .collect()
    }

    pub fn count_for_day(&self, day: Day) -> usize {
        self.tasks.iter().filter(|task| task.day == day).count()
    }

    fn day_has_text(&self, day: Day, text: &str, exclude: Option<Uuid>) -> bool {
        let needle = text.to_lowercase();
        self.tasks.iter().any(|task| {
            task.day == day && Some(task.id) != exclude && task.text.to_lowercase() == needle
        })
    }
}
