//! Events the store consumes
//!
//! Events serialize as `{"type": "TASK_STARTED", "payload": {...}}` so event
//! logs can be replayed from JSON.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::records::{Download, DownloadPatch, Task, TaskPatch};

/// Payload of events that only name a record
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RecordRef {
    #[serde(default)]
    pub id: String,
}

impl RecordRef {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

/// Every state change the task/download store understands
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StoreEvent {
    TaskStarted(Task),
    TaskProgress(TaskPatch),
    TaskEnded(RecordRef),
    DownloadStarted(Download),
    DownloadProgress(DownloadPatch),
    DownloadEnded(RecordRef),
    DownloadPrioritize(RecordRef),
    ClearFinishedDownloads,
    PauseDownloads,
    ResumeDownloads,
}

impl StoreEvent {
    /// Wire name of the event
    pub fn kind(&self) -> &'static str {
        match self {
            StoreEvent::TaskStarted(_) => "TASK_STARTED",
            StoreEvent::TaskProgress(_) => "TASK_PROGRESS",
            StoreEvent::TaskEnded(_) => "TASK_ENDED",
            StoreEvent::DownloadStarted(_) => "DOWNLOAD_STARTED",
            StoreEvent::DownloadProgress(_) => "DOWNLOAD_PROGRESS",
            StoreEvent::DownloadEnded(_) => "DOWNLOAD_ENDED",
            StoreEvent::DownloadPrioritize(_) => "DOWNLOAD_PRIORITIZE",
            StoreEvent::ClearFinishedDownloads => "CLEAR_FINISHED_DOWNLOADS",
            StoreEvent::PauseDownloads => "PAUSE_DOWNLOADS",
            StoreEvent::ResumeDownloads => "RESUME_DOWNLOADS",
        }
    }
}

/// Errors raised while applying an event
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The event is missing an identifier it must carry
    #[error("invalid {kind} event: {message}")]
    InvalidEvent {
        kind: &'static str,
        message: &'static str,
    },
}
