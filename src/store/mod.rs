//! Task and download tracking
//!
//! The store keeps the live tasks and downloads the rest of the client
//! reports, their finished history and the download pause flag. State only
//! changes through [`StoreEvent`]s; the derived [`TasksView`] is recomputed
//! after every applied event.

mod events;
mod records;
mod reducer;
mod selectors;

pub use events::{RecordRef, StoreError, StoreEvent};
pub use records::{Download, DownloadPatch, GameId, LaunchAction, Task, TaskStatus};
pub use reducer::{TasksState, reduce};
pub use selectors::TasksView;

/// Holds the current snapshot and its derived view
#[derive(Debug, Clone, Default)]
pub struct Store {
    state: TasksState,
    view: TasksView,
}

impl Store {
    pub fn new(initial_state: TasksState) -> Self {
        let view = TasksView::select(&initial_state);
        Self {
            state: initial_state,
            view,
        }
    }

    /// Get the current state
    pub fn state(&self) -> &TasksState {
        &self.state
    }

    /// Get the derived view of the current state
    pub fn view(&self) -> &TasksView {
        &self.view
    }

    /// Apply an event. A rejected event leaves the store unchanged.
    pub fn dispatch(&mut self, event: StoreEvent) -> Result<(), StoreError> {
        match reduce(&self.state, &event) {
            Ok(next) => {
                tracing::debug!("Applied {}", event.kind());
                self.view = TasksView::select(&next);
                self.state = next;
                Ok(())
            }
            Err(e) => {
                tracing::error!("Rejected event: {}", e);
                Err(e)
            }
        }
    }

    /// Live download for a game that is first in the queue, if any
    pub fn active_download(&self, game_id: GameId) -> Option<&Download> {
        self.view
            .downloads_by_game_id
            .get(&game_id)
            .and_then(|ids| ids.first())
            .and_then(|id| self.state.downloads.get(id))
    }

    /// Whether a download for this game has ever finished or is queued
    pub fn has_download_attempt(&self, game_id: GameId) -> bool {
        self.view.downloads_by_game_id.contains_key(&game_id)
            || self
                .state
                .finished_downloads
                .iter()
                .any(|d| d.game_id == Some(game_id))
    }
}
