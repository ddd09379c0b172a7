//! Replay a recorded event log through the store

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;

use crate::cli::output::{OutputFormat, print_error, print_formatted};
use crate::config::Config;
use crate::store::{Store, StoreEvent, TasksState, TasksView};

/// An event the store refused
#[derive(Debug, Serialize)]
pub struct RejectedEvent {
    pub index: usize,
    pub error: String,
}

/// Store contents after a replay
#[derive(Debug, Serialize)]
pub struct ReplayReport {
    pub applied: usize,
    pub rejected: Vec<RejectedEvent>,
    pub state: TasksState,
    pub view: TasksView,
}

pub async fn run(file: PathBuf, format: OutputFormat, _quiet: bool) -> Result<()> {
    let config = Config::load()?;
    let events = load_events(&file).await?;

    let report = replay(events, config.downloads.start_paused);

    // Rejections are errors, so --quiet does not hide them
    for line in rejection_lines(&report) {
        print_error(&line);
    }

    print_formatted(&report, format, format_report_text);
    Ok(())
}

fn rejection_lines(report: &ReplayReport) -> Vec<String> {
    report
        .rejected
        .iter()
        .map(|rejected| format!("event #{}: {}", rejected.index, rejected.error))
        .collect()
}

/// Read a JSON array of events
pub async fn load_events(path: &Path) -> Result<Vec<StoreEvent>> {
    let content = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read event log {}", path.display()))?;
    serde_json::from_str(&content).context("Failed to parse event log")
}

/// Apply events in order, skipping the ones the store rejects
pub fn replay(events: Vec<StoreEvent>, start_paused: bool) -> ReplayReport {
    let mut store = Store::new(TasksState::with_paused(start_paused));
    let mut applied = 0;
    let mut rejected = Vec::new();

    for (index, event) in events.into_iter().enumerate() {
        match store.dispatch(event) {
            Ok(()) => applied += 1,
            Err(e) => rejected.push(RejectedEvent {
                index,
                error: e.to_string(),
            }),
        }
    }

    ReplayReport {
        applied,
        rejected,
        state: store.state().clone(),
        view: store.view().clone(),
    }
}

fn format_report_text(report: &ReplayReport) -> String {
    let state = &report.state;
    let mut lines = vec![format!(
        "Applied {} events ({} rejected)",
        report.applied,
        report.rejected.len()
    )];

    lines.push(format!("Live tasks: {}", state.tasks.len()));
    for task in state.tasks.values() {
        lines.push(format!(
            "  {} [{}] game {} {:.0}%",
            task.id,
            task.status,
            task.game_id.map_or_else(|| "-".to_string(), |id| id.to_string()),
            task.progress * 100.0
        ));
    }
    lines.push(format!("Finished tasks: {}", state.finished_tasks.len()));

    lines.push(format!(
        "Downloads{}: {}",
        if state.downloads_paused { " (paused)" } else { "" },
        report.view.downloads_by_order.len()
    ));
    for (position, id) in report.view.downloads_by_order.iter().enumerate() {
        if let Some(download) = state.downloads.get(id) {
            lines.push(format!(
                "  {}. {} [{}] priority {} {:.0}%",
                position + 1,
                download.id,
                download.status,
                download.priority,
                download.progress * 100.0
            ));
        }
    }
    lines.push(format!(
        "Finished downloads: {}",
        state.finished_downloads.len()
    ));

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn events() -> Vec<StoreEvent> {
        serde_json::from_value(json!([
            {"type": "DOWNLOAD_STARTED", "payload": {"id": "a", "gameId": 1, "order": 1, "priority": 5}},
            {"type": "DOWNLOAD_STARTED", "payload": {"id": "b", "gameId": 2, "order": 2, "priority": 10}},
            {"type": "DOWNLOAD_PRIORITIZE", "payload": {"id": "b"}},
            {"type": "TASK_STARTED", "payload": {"gameId": 3}},
            {"type": "TASK_STARTED", "payload": {"id": "t1", "gameId": 3, "status": "launch"}},
            {"type": "PAUSE_DOWNLOADS"}
        ]))
        .unwrap()
    }

    #[test]
    fn test_replay_applies_and_reports_rejections() {
        let report = replay(events(), false);

        assert_eq!(report.applied, 5);
        assert_eq!(report.rejected.len(), 1);
        assert_eq!(report.rejected[0].index, 3);
        assert_eq!(report.state.downloads["b"].priority, 4);
        assert!(report.state.downloads_paused);
        assert_eq!(report.view.downloads_by_order, vec!["a", "b"]);
        assert!(report.view.tasks_by_game_id.contains_key(&3));
    }

    #[test]
    fn test_rejection_lines() {
        let report = replay(events(), false);
        assert_eq!(
            rejection_lines(&report),
            vec!["event #3: invalid TASK_STARTED event: valid task id in started"]
        );
        assert!(rejection_lines(&replay(vec![], false)).is_empty());
    }

    #[test]
    fn test_replay_starts_paused() {
        let report = replay(vec![], true);
        assert!(report.state.downloads_paused);
        assert_eq!(report.applied, 0);
    }

    #[test]
    fn test_report_text() {
        let text = format_report_text(&replay(events(), false));
        assert!(text.starts_with("Applied 5 events (1 rejected)"));
        assert!(text.contains("Downloads (paused): 2"));
        assert!(text.contains("  1. a [idle] priority 5 0%"));
        assert!(text.contains("  2. b [idle] priority 4 0%"));
    }

    #[tokio::test]
    async fn test_load_events_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("events.json");
        std::fs::write(&path, serde_json::to_string(&events()).unwrap()).unwrap();

        let loaded = load_events(&path).await.unwrap();
        assert_eq!(loaded, events());

        std::fs::write(&path, "{not json").unwrap();
        assert!(load_events(&path).await.is_err());
    }
}
