//! Task and download records, and the patches that progress events carry.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Identifier of a game in the library
pub type GameId = u64;

/// Unknown payload fields, preserved verbatim
pub type Extra = Map<String, Value>;

/// Status of a tracked operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TaskStatus {
    #[default]
    Idle,
    Awaken,
    Download,
    DownloadQueued,
    FindUpload,
    AskBeforeInstall,
    Install,
    Configure,
    Launch,
    Uninstall,
    Reporting,
    Error,
    /// Any status this client doesn't know by name
    #[serde(other)]
    Other,
}

impl TaskStatus {
    /// Wire name of the status
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Idle => "idle",
            TaskStatus::Awaken => "awaken",
            TaskStatus::Download => "download",
            TaskStatus::DownloadQueued => "download-queued",
            TaskStatus::FindUpload => "find-upload",
            TaskStatus::AskBeforeInstall => "ask-before-install",
            TaskStatus::Install => "install",
            TaskStatus::Configure => "configure",
            TaskStatus::Launch => "launch",
            TaskStatus::Uninstall => "uninstall",
            TaskStatus::Reporting => "reporting",
            TaskStatus::Error => "error",
            TaskStatus::Other => "other",
        }
    }

    /// Parse a wire name. Unknown names map to [`TaskStatus::Other`].
    pub fn parse(name: &str) -> Self {
        match name {
            "idle" => TaskStatus::Idle,
            "awaken" => TaskStatus::Awaken,
            "download" => TaskStatus::Download,
            "download-queued" => TaskStatus::DownloadQueued,
            "find-upload" => TaskStatus::FindUpload,
            "ask-before-install" => TaskStatus::AskBeforeInstall,
            "install" => TaskStatus::Install,
            "configure" => TaskStatus::Configure,
            "launch" => TaskStatus::Launch,
            "uninstall" => TaskStatus::Uninstall,
            "reporting" => TaskStatus::Reporting,
            "error" => TaskStatus::Error,
            _ => TaskStatus::Other,
        }
    }

    /// Whether the task is idle (nothing running against the game)
    pub fn is_idle(&self) -> bool {
        matches!(self, TaskStatus::Idle | TaskStatus::Awaken)
    }

    /// Whether the task is fetching bytes
    pub fn is_downloading(&self) -> bool {
        matches!(self, TaskStatus::Download | TaskStatus::FindUpload)
    }
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What the main action does once a game is installed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LaunchAction {
    Open,
    #[default]
    Launch,
}

/// A tracked long-running operation against a game
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    #[serde(default)]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub game_id: Option<GameId>,
    #[serde(default)]
    pub status: TaskStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<LaunchAction>,
    #[serde(default)]
    pub progress: f64,
    #[serde(flatten)]
    pub extra: Extra,
}

/// Partial task carried by a progress event
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskPatch {
    #[serde(default)]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub game_id: Option<GameId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<TaskStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<LaunchAction>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub progress: Option<f64>,
    #[serde(flatten)]
    pub extra: Extra,
}

/// A task that also sits in the download queue
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Download {
    #[serde(default)]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub game_id: Option<GameId>,
    #[serde(default)]
    pub status: TaskStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<LaunchAction>,
    #[serde(default)]
    pub progress: f64,
    /// Display position in the queue
    #[serde(default)]
    pub order: i64,
    /// Lower runs first
    #[serde(default)]
    pub priority: i64,
    #[serde(flatten)]
    pub extra: Extra,
}

/// Partial download carried by a progress event
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DownloadPatch {
    #[serde(default)]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub game_id: Option<GameId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<TaskStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<LaunchAction>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub progress: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<i64>,
    #[serde(flatten)]
    pub extra: Extra,
}

/// A record the store keeps in a live registry
pub trait Tracked: Clone {
    /// Partial record applied by progress events
    type Patch;

    fn id(&self) -> &str;

    fn game_id(&self) -> Option<GameId>;

    /// Empty record used as the merge base when a progress event
    /// arrives before its start event
    fn blank(id: &str) -> Self;

    /// Overwrite the fields present in `patch`, keep the rest
    fn merge(&mut self, patch: &Self::Patch);
}

fn merge_extra(extra: &mut Extra, patch: &Extra) {
    for (key, value) in patch {
        extra.insert(key.clone(), value.clone());
    }
}

impl Tracked for Task {
    type Patch = TaskPatch;

    fn id(&self) -> &str {
        &self.id
    }

    fn game_id(&self) -> Option<GameId> {
        self.game_id
    }

    fn blank(id: &str) -> Self {
        Self {
            id: id.to_string(),
            ..Default::default()
        }
    }

    fn merge(&mut self, patch: &TaskPatch) {
        self.id.clone_from(&patch.id);
        if let Some(game_id) = patch.game_id {
            self.game_id = Some(game_id);
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(action) = patch.action {
            self.action = Some(action);
        }
        if let Some(progress) = patch.progress {
            self.progress = progress;
        }
        merge_extra(&mut self.extra, &patch.extra);
    }
}

impl Tracked for Download {
    type Patch = DownloadPatch;

    fn id(&self) -> &str {
        &self.id
    }

    fn game_id(&self) -> Option<GameId> {
        self.game_id
    }

    fn blank(id: &str) -> Self {
        Self {
            id: id.to_string(),
            ..Default::default()
        }
    }

    fn merge(&mut self, patch: &DownloadPatch) {
        self.id.clone_from(&patch.id);
        if let Some(game_id) = patch.game_id {
            self.game_id = Some(game_id);
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(action) = patch.action {
            self.action = Some(action);
        }
        if let Some(progress) = patch.progress {
            self.progress = progress;
        }
        if let Some(order) = patch.order {
            self.order = order;
        }
        if let Some(priority) = patch.priority {
            self.priority = priority;
        }
        merge_extra(&mut self.extra, &patch.extra);
    }
}

impl TaskPatch {
    /// Patch that only touches `progress`
    #[cfg(test)]
    pub fn progress(id: impl Into<String>, progress: f64) -> Self {
        Self {
            id: id.into(),
            progress: Some(progress),
            ..Default::default()
        }
    }
}

impl DownloadPatch {
    /// Patch that only touches `progress`
    pub fn progress(id: impl Into<String>, progress: f64) -> Self {
        Self {
            id: id.into(),
            progress: Some(progress),
            ..Default::default()
        }
    }
}
