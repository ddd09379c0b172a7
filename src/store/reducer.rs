//! Task/download reducer
//!
//! `reduce` is a pure function: it never mutates the state it is given and
//! either returns the next snapshot or rejects the event.

use std::collections::BTreeMap;

use serde::Serialize;

use super::events::{RecordRef, StoreError, StoreEvent};
use super::records::{Download, Task, Tracked};
use super::selectors::downloads_by_order;

/// Everything the store tracks
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TasksState {
    /// Live tasks keyed by id
    pub tasks: BTreeMap<String, Task>,
    /// Ended tasks, most recent first
    pub finished_tasks: Vec<Task>,
    /// Live downloads keyed by id
    pub downloads: BTreeMap<String, Download>,
    /// Ended downloads, most recent first
    pub finished_downloads: Vec<Download>,
    pub downloads_paused: bool,
}

impl TasksState {
    /// Initial state with the pause flag preset
    pub fn with_paused(downloads_paused: bool) -> Self {
        Self {
            downloads_paused,
            ..Default::default()
        }
    }
}

/// Apply one event to a state snapshot
pub fn reduce(state: &TasksState, event: &StoreEvent) -> Result<TasksState, StoreError> {
    let kind = event.kind();
    let mut next = state.clone();

    match event {
        StoreEvent::TaskStarted(task) => {
            require_id(kind, &task.id, "valid task id in started")?;
            started(&mut next.tasks, task);
        }
        StoreEvent::TaskProgress(patch) => {
            require_id(kind, &patch.id, "valid task id in progress")?;
            progressed(&mut next.tasks, &patch.id, patch);
        }
        StoreEvent::TaskEnded(RecordRef { id }) => {
            require_id(kind, id, "valid task id in ended")?;
            ended(&mut next.tasks, &mut next.finished_tasks, id);
        }
        StoreEvent::DownloadStarted(download) => {
            require_id(kind, &download.id, "valid download id in started")?;
            started(&mut next.downloads, download);
        }
        StoreEvent::DownloadProgress(patch) => {
            require_id(kind, &patch.id, "valid download id in progress")?;
            progressed(&mut next.downloads, &patch.id, patch);
        }
        StoreEvent::DownloadEnded(RecordRef { id }) => {
            require_id(kind, id, "valid download id in ended")?;
            ended(&mut next.downloads, &mut next.finished_downloads, id);
        }
        StoreEvent::DownloadPrioritize(RecordRef { id }) => {
            prioritize(&mut next.downloads, id);
        }
        StoreEvent::ClearFinishedDownloads => {
            next.finished_downloads.clear();
        }
        StoreEvent::PauseDownloads => {
            next.downloads_paused = true;
        }
        StoreEvent::ResumeDownloads => {
            next.downloads_paused = false;
        }
    }

    Ok(next)
}

fn require_id(kind: &'static str, id: &str, message: &'static str) -> Result<(), StoreError> {
    if id.is_empty() {
        return Err(StoreError::InvalidEvent { kind, message });
    }
    Ok(())
}

fn started<T: Tracked>(live: &mut BTreeMap<String, T>, record: &T) {
    live.insert(record.id().to_string(), record.clone());
}

fn progressed<T: Tracked>(live: &mut BTreeMap<String, T>, id: &str, patch: &T::Patch) {
    live.entry(id.to_string())
        .or_insert_with(|| T::blank(id))
        .merge(patch);
}

fn ended<T: Tracked>(live: &mut BTreeMap<String, T>, finished: &mut Vec<T>, id: &str) {
    match live.remove(id) {
        Some(record) => finished.insert(0, record),
        None => tracing::warn!("Ended {} was never started, history left untouched", id),
    }
}

fn prioritize(downloads: &mut BTreeMap<String, Download>, id: &str) {
    let order = downloads_by_order(downloads);
    if order.len() < 2 {
        // Nothing to reorder with zero or one download
        return;
    }

    let Some(first_priority) = downloads.get(&order[0]).map(|d| d.priority) else {
        return;
    };

    match downloads.get_mut(id) {
        // Saturates at the floor, where the download ties with the head
        Some(download) => download.priority = first_priority.saturating_sub(1),
        None => tracing::warn!("Cannot prioritize unknown download {:?}", id),
    }
}
