use anyhow::anyhow;
use chrono::Local;
use tracing::{debug, instrument};
use uuid::Uuid;

use crate::cli::Command;
use crate::render::Renderer;
use crate::stats::{self, StatsOptions};
use crate::store::{Mutation, TaskStore};
use crate::view::ViewState;

#[instrument(skip(store, view, renderer, command))]
pub fn dispatch(
    store: &mut TaskStore,
    view: &mut ViewState,
    renderer: &mut Renderer,
    command: Command,
) -> anyhow::Result<()> {
    debug!(?command, "dispatching");

    match command {
        Command::Add { text, day } => {
            let day = day.unwrap_or_else(|| view.current_day());
            view.select_day(day);
            let outcome = store.add_task(&text, day)?;
            report(renderer, outcome)?;
            if outcome.applied() {
                renderer.print_day(store, day, view.filter())?;
            }
        }

        Command::List { day, filter, week } => {
            view.set_filter(filter);
            renderer.print_header()?;
            if week {
                renderer.print_week(store, filter)?;
            } else {
                let day = day.unwrap_or_else(|| view.current_day());
                view.select_day(day);
                renderer.print_day(store, day, filter)?;
            }
        }

        Command::Edit { id, text } => {
            let id = resolve_id(store, &id)?;
            let outcome = store.edit_task(id, &text)?;
            report(renderer, outcome)?;
        }

        Command::Toggle { id } => {
            let id = resolve_id(store, &id)?;
            store.toggle_task(id)?;
        }

        Command::Delete { id } => {
            let id = resolve_id(store, &id)?;
            store.delete_task(id)?;
        }

        Command::Move { id, day } => {
            let id = resolve_id(store, &id)?;
            let outcome = store.move_task(id, day)?;
            report(renderer, outcome)?;
            if outcome.applied() {
                renderer.print_day(store, day, view.filter())?;
            }
        }

        Command::Replicate { id } => {
            let id = resolve_id(store, &id)?;
            let created = store.replicate_to_all_days(id)?;
            renderer.print_notice(&format!("created {created} task(s)"))?;
        }

        Command::Stats { mode, windowed } => {
            view.show_statistics();
            let summary = stats::summarize(
                store.tasks(),
                mode,
                Local::now(),
                StatsOptions {
                    calendar_windows: windowed,
                },
            );
            renderer.print_summary(mode, &summary)?;
        }

        Command::Theme { toggle } => {
            let dark = store.datastore().load_dark_mode();
            let dark = if toggle {
                store.datastore().save_dark_mode(!dark)?;
                !dark
            } else {
                dark
            };
            renderer.print_notice(if dark { "dark mode: on" } else { "dark mode: off" })?;
        }
    }

    Ok(())
}

fn report(renderer: &mut Renderer, outcome: Mutation) -> anyhow::Result<()> {
    match outcome {
        Mutation::Applied => Ok(()),
        Mutation::Rejected(rejection) => renderer.print_notice(rejection.user_message()),
        Mutation::NotFound => renderer.print_notice("no such task"),
    }
}

/// Accepts a full uuid or an unambiguous hex prefix of one.
fn resolve_id(store: &TaskStore, token: &str) -> anyhow::Result<Uuid> {
    if let Ok(id) = token.parse::<Uuid>() {
        return Ok(id);
    }

    let needle = token.to_ascii_lowercase();
    let mut candidates = store
        .tasks()
        .iter()
        .filter(|task| task.id.to_string().starts_with(&needle));

    let first = candidates
        .next()
        .ok_or_else(|| anyhow!("no task matches id {token}"))?;
    if candidates.next().is_some() {
        return Err(anyhow!("id prefix {token} is ambiguous"));
    }

    Ok(first.id)
}
