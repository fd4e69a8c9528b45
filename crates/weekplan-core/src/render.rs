use std::io::{self, IsTerminal, Write};

use chrono::Local;
use unicode_width::UnicodeWidthStr;

use crate::datetime;
use crate::stats::{StatMode, Summary};
use crate::store::TaskStore;
use crate::task::{Day, WEEK};
use crate::view::Filter;

#[derive(Debug, Clone)]
pub struct Renderer {
    color: bool,
}

impl Renderer {
    pub fn new() -> Self {
        Self {
            color: io::stdout().is_terminal(),
        }
    }

    pub fn print_header(&mut self) -> anyhow::Result<()> {
        let mut out = io::stdout().lock();
        writeln!(out, "{}", datetime::format_timestamp(Local::now()))?;
        writeln!(out)?;
        Ok(())
    }

    #[tracing::instrument(skip(self, store))]
    pub fn print_day(&mut self, store: &TaskStore, day: Day, filter: Filter) -> anyhow::Result<()> {
        let mut out = io::stdout().lock();

        let badge = store.count_for_day(day);
        let title = format!("{} ({badge} tasks)", day.label());
        writeln!(out, "{}", self.paint(&title, "1"))?;

        let tasks = store.filtered_tasks_for_day(day, filter);
        if tasks.is_empty() {
            writeln!(out, "  no tasks")?;
            return Ok(());
        }

        let headers = ["ID", "Done", "Task"];
        let rows: Vec<[String; 3]> = tasks
            .iter()
            .map(|task| {
                [
                    short_id(&task.id.to_string()),
                    if task.completed { "[x]" } else { "[ ]" }.to_string(),
                    task.text.clone(),
                ]
            })
            .collect();

        write_table(&mut out, &headers, &rows)?;
        Ok(())
    }

    #[tracing::instrument(skip(self, store))]
    pub fn print_week(&mut self, store: &TaskStore, filter: Filter) -> anyhow::Result<()> {
        for (idx, day) in WEEK.into_iter().enumerate() {
            if idx > 0 {
                let mut out = io::stdout().lock();
                writeln!(out)?;
            }
            self.print_day(store, day, filter)?;
        }
        Ok(())
    }

    pub fn print_notice(&mut self, message: &str) -> anyhow::Result<()> {
        let mut out = io::stdout().lock();
        writeln!(out, "{message}")?;
        Ok(())
    }

    #[tracing::instrument(skip(self, summary))]
    pub fn print_summary(&mut self, mode: StatMode, summary: &Summary) -> anyhow::Result<()> {
        let mut out = io::stdout().lock();

        writeln!(out, "{}", self.paint(mode.label(), "1"))?;
        writeln!(out, "  total      {}", summary.total)?;
        writeln!(out, "  completed  {}", summary.completed)?;
        writeln!(out, "  pending    {}", summary.pending)?;

        let filled = (summary.percentage as usize) / 10;
        let bar: String = (0..10).map(|i| if i < filled { '#' } else { '-' }).collect();
        writeln!(out, "  progress   [{bar}] {}%", summary.percentage)?;
        Ok(())
    }

    fn paint(&self, text: &str, code: &str) -> String {
        if !self.color {
            return text.to_string();
        }
        format!("\x1b[{code}m{text}\x1b[0m")
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

fn short_id(full: &str) -> String {
    full.chars().take(8).collect()
}

fn write_table<W: Write>(mut writer: W, headers: &[&str], rows: &[[String; 3]]) -> anyhow::Result<()> {
    let mut widths: Vec<usize> = headers.iter().map(|h| UnicodeWidthStr::width(*h)).collect();
    for row in rows {
        for (idx, cell) in row.iter().enumerate() {
            widths[idx] = widths[idx].max(UnicodeWidthStr::width(cell.as_str()));
        }
    }

    write!(writer, "  ")?;
    for (idx, header) in headers.iter().enumerate() {
        write!(writer, "{:width$}  ", header, width = widths[idx])?;
    }
    writeln!(writer)?;

    for row in rows {
        write!(writer, "  ")?;
        for (idx, cell) in row.iter().enumerate() {
            let padding = widths[idx].saturating_sub(UnicodeWidthStr::width(cell.as_str()));
            write!(writer, "{}{}  ", cell, " ".repeat(padding))?;
        }
        writeln!(writer)?;
    }

    Ok(())
}
