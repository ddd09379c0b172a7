//! Label and icon for a game with an active task

use crate::store::{LaunchAction, TaskStatus};

/// Catalog key of the status label. `None` means the label is empty.
pub fn label_key(task: TaskStatus, action: LaunchAction) -> Option<&'static str> {
    match task {
        TaskStatus::Idle | TaskStatus::Awaken => Some(match action {
            LaunchAction::Open => "grid.item.open",
            LaunchAction::Launch => "grid.item.launch",
        }),
        TaskStatus::Error | TaskStatus::Reporting => None,
        TaskStatus::Launch => Some("grid.item.running"),
        TaskStatus::Uninstall => Some("grid.item.uninstalling"),
        TaskStatus::Download | TaskStatus::FindUpload => Some("grid.item.downloading"),
        TaskStatus::AskBeforeInstall => Some("grid.item.finalize_installation"),
        TaskStatus::DownloadQueued => Some("grid.item.queued"),
        TaskStatus::Install | TaskStatus::Configure | TaskStatus::Other => {
            Some("grid.item.installing")
        }
    }
}

/// Icons the main action can show
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Icon {
    Play,
    FolderOpen,
    Running,
    Download,
    Install,
    Uninstall,
    Error,
    ShoppingCart,
    Cross,
}

impl Icon {
    /// Icon for a task in progress
    pub fn for_task(task: TaskStatus, action: LaunchAction) -> Self {
        match task {
            TaskStatus::Idle | TaskStatus::Awaken => match action {
                LaunchAction::Open => Icon::FolderOpen,
                LaunchAction::Launch => Icon::Play,
            },
            TaskStatus::Launch => Icon::Running,
            TaskStatus::Error | TaskStatus::Reporting => Icon::Error,
            TaskStatus::Uninstall => Icon::Uninstall,
            TaskStatus::Download | TaskStatus::FindUpload | TaskStatus::DownloadQueued => {
                Icon::Download
            }
            _ => Icon::Install,
        }
    }

    /// Glyph drawn by the egui widget
    pub fn glyph(&self) -> &'static str {
        match self {
            Icon::Play => "▶",
            Icon::FolderOpen => "📂",
            Icon::Running => "🔥",
            Icon::Download => "⬇",
            Icon::Install => "📦",
            Icon::Uninstall => "🗑",
            Icon::Error => "⚠",
            Icon::ShoppingCart => "🛒",
            Icon::Cross => "✖",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_idle_label_follows_action() {
        assert_eq!(
            label_key(TaskStatus::Idle, LaunchAction::Open),
            Some("grid.item.open")
        );
        assert_eq!(
            label_key(TaskStatus::Awaken, LaunchAction::Launch),
            Some("grid.item.launch")
        );
    }

    #[test]
    fn test_status_labels() {
        let action = LaunchAction::Launch;
        assert_eq!(label_key(TaskStatus::Error, action), None);
        assert_eq!(label_key(TaskStatus::Reporting, action), None);
        assert_eq!(label_key(TaskStatus::Launch, action), Some("grid.item.running"));
        assert_eq!(
            label_key(TaskStatus::Uninstall, action),
            Some("grid.item.uninstalling")
        );
        assert_eq!(
            label_key(TaskStatus::Download, action),
            Some("grid.item.downloading")
        );
        assert_eq!(
            label_key(TaskStatus::FindUpload, action),
            Some("grid.item.downloading")
        );
        assert_eq!(
            label_key(TaskStatus::AskBeforeInstall, action),
            Some("grid.item.finalize_installation")
        );
        assert_eq!(
            label_key(TaskStatus::DownloadQueued, action),
            Some("grid.item.queued")
        );
    }

    #[test]
    fn test_unlisted_statuses_are_installing() {
        for status in [TaskStatus::Install, TaskStatus::Configure, TaskStatus::Other] {
            assert_eq!(
                label_key(status, LaunchAction::Launch),
                Some("grid.item.installing")
            );
        }
    }

    #[test]
    fn test_task_icons() {
        assert_eq!(
            Icon::for_task(TaskStatus::Idle, LaunchAction::Open),
            Icon::FolderOpen
        );
        assert_eq!(
            Icon::for_task(TaskStatus::DownloadQueued, LaunchAction::Launch),
            Icon::Download
        );
        assert_eq!(
            Icon::for_task(TaskStatus::Configure, LaunchAction::Launch),
            Icon::Install
        );
    }
}
