use anyhow::anyhow;
use chrono::{DateTime, Datelike, Local, NaiveDate};

use crate::datetime::{month_bounds, week_bounds};
use crate::task::{Day, Task};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatMode {
    Daily,
    Weekly,
    Monthly,
}

impl StatMode {
    pub fn label(&self) -> &'static str {
        match self {
            StatMode::Daily => "Today",
            StatMode::Weekly => "This week",
            StatMode::Monthly => "This month",
        }
    }
}

impl std::str::FromStr for StatMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "daily" | "day" => Ok(StatMode::Daily),
            "weekly" | "week" => Ok(StatMode::Weekly),
            "monthly" | "month" => Ok(StatMode::Monthly),
            other => Err(anyhow!("unknown statistics mode: {other}")),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    pub total: usize,
    pub completed: usize,
    pub pending: usize,
    pub percentage: u32,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct StatsOptions {
    /// Restrict weekly/monthly to tasks created inside the current
    /// calendar week/month. Off by default: the original planner counted
    /// the whole collection in both modes, the label being the only
    /// distinction, and that behavior is kept until opted out of.
    pub calendar_windows: bool,
}

/// Derived completion figures for one reporting mode. Pure: owns no
/// state, mutates nothing.
pub fn summarize(tasks: &[Task], mode: StatMode, now: DateTime<Local>, opts: StatsOptions) -> Summary {
    let today = Day::from_weekday(now.weekday());

    let selected: Vec<&Task> = match mode {
        StatMode::Daily => tasks.iter().filter(|task| task.day == today).collect(),
        StatMode::Weekly if opts.calendar_windows => {
            let (start, end) = week_bounds(now.date_naive());
            tasks
                .iter()
                .filter(|task| entered_between(task, start, end))
                .collect()
        }
        StatMode::Monthly if opts.calendar_windows => {
            let (start, end) = month_bounds(now.date_naive());
            tasks
                .iter()
                .filter(|task| entered_between(task, start, end))
                .collect()
        }
        StatMode::Weekly | StatMode::Monthly => tasks.iter().collect(),
    };

    let total = selected.len();
    let completed = selected.iter().filter(|task| task.completed).count();
    let pending = total - completed;
    let percentage = if total == 0 {
        0
    } else {
        ((completed as f64 / total as f64) * 100.0).round() as u32
    };

    Summary {
        total,
        completed,
        pending,
        percentage,
    }
}

fn entered_between(task: &Task, start: NaiveDate, end: NaiveDate) -> bool {
    let date = task.entry.with_timezone(&Local).date_naive();
    start <= date && date <= end
}
