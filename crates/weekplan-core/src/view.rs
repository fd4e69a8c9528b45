use anyhow::anyhow;

use crate::datetime;
use crate::task::{Day, Task};

/// View-level completion predicate. Never persisted, never touches the
/// underlying collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Filter {
    #[default]
    All,
    Pending,
    Completed,
}

impl Filter {
    pub fn keeps(&self, task: &Task) -> bool {
        match self {
            Filter::All => true,
            Filter::Pending => !task.completed,
            Filter::Completed => task.completed,
        }
    }
}

impl std::str::FromStr for Filter {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(Filter::All),
            "pending" => Ok(Filter::Pending),
            "completed" | "done" => Ok(Filter::Completed),
            other => Err(anyhow!("unknown filter: {other}")),
        }
    }
}

/// Ephemeral per-session navigation state: selected day, active filter,
/// and whether the statistics panel is showing. Selecting a day leaves
/// the statistics panel; the two are mutually exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewState {
    current_day: Day,
    filter: Filter,
    showing_stats: bool,
}

impl ViewState {
    /// Fresh state for a new session: today's day of the week, no filter.
    pub fn new() -> Self {
        Self::starting_on(datetime::today())
    }

    pub fn starting_on(day: Day) -> Self {
        Self {
            current_day: day,
            filter: Filter::All,
            showing_stats: false,
        }
    }

    pub fn current_day(&self) -> Day {
        self.current_day
    }

    pub fn filter(&self) -> Filter {
        self.filter
    }

    pub fn showing_stats(&self) -> bool {
        self.showing_stats
    }

    pub fn select_day(&mut self, day: Day) {
        self.current_day = day;
        self.showing_stats = false;
    }

    pub fn set_filter(&mut self, filter: Filter) {
        self.filter = filter;
    }

    pub fn show_statistics(&mut self) {
        self.showing_stats = true;
    }
}

impl Default for ViewState {
    fn default() -> Self {
        Self::new()
    }
}
