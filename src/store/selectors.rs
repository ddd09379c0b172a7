//! Derived views over the task/download state

use std::collections::BTreeMap;

use serde::Serialize;

use super::records::{Download, GameId, Task, Tracked};
use super::reducer::TasksState;

/// Projections recomputed from a [`TasksState`] after every change
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TasksView {
    /// One live task per game
    pub tasks_by_game_id: BTreeMap<GameId, Task>,
    /// Live download ids sorted by `order`
    pub downloads_by_order: Vec<String>,
    /// Live download ids per game, in queue order
    pub downloads_by_game_id: BTreeMap<GameId, Vec<String>>,
}

impl TasksView {
    pub fn select(state: &TasksState) -> Self {
        let downloads_by_order = downloads_by_order(&state.downloads);
        let downloads_by_game_id = group_by_game(&downloads_by_order, &state.downloads);

        Self {
            tasks_by_game_id: index_by_game(&state.tasks),
            downloads_by_order,
            downloads_by_game_id,
        }
    }

    /// Position of a download in the queue
    pub fn queue_position(&self, id: &str) -> Option<usize> {
        self.downloads_by_order.iter().position(|d| d == id)
    }
}

/// Index live records by game id. When several records share a game the
/// one with the greatest id wins. Records without a game are skipped.
pub fn index_by_game<T: Tracked>(live: &BTreeMap<String, T>) -> BTreeMap<GameId, T> {
    live.values()
        .filter_map(|record| record.game_id().map(|game_id| (game_id, record.clone())))
        .collect()
}

/// Download ids sorted by ascending `order`, ties broken by id
pub fn downloads_by_order(downloads: &BTreeMap<String, Download>) -> Vec<String> {
    let mut sorted: Vec<&Download> = downloads.values().collect();
    // Stable sort keeps the id order of the map for equal `order`
    sorted.sort_by_key(|d| d.order);
    sorted.into_iter().map(|d| d.id.clone()).collect()
}

/// Group an ordered id sequence by the game of each download
pub fn group_by_game(
    ordered_ids: &[String],
    downloads: &BTreeMap<String, Download>,
) -> BTreeMap<GameId, Vec<String>> {
    let mut groups: BTreeMap<GameId, Vec<String>> = BTreeMap::new();
    for id in ordered_ids {
        if let Some(game_id) = downloads.get(id).and_then(|d| d.game_id) {
            groups.entry(game_id).or_default().push(id.clone());
        }
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::records::TaskStatus;

    fn download(id: &str, game_id: u64, order: i64) -> Download {
        Download {
            id: id.to_string(),
            game_id: Some(game_id),
            order,
            ..Default::default()
        }
    }

    fn state_with(downloads: Vec<Download>, tasks: Vec<Task>) -> TasksState {
        TasksState {
            downloads: downloads.into_iter().map(|d| (d.id.clone(), d)).collect(),
            tasks: tasks.into_iter().map(|t| (t.id.clone(), t)).collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_downloads_sorted_by_order() {
        let state = state_with(
            vec![download("c", 1, 3), download("a", 2, 2), download("b", 1, 1)],
            vec![],
        );
        let view = TasksView::select(&state);

        assert_eq!(view.downloads_by_order, vec!["b", "a", "c"]);
        assert_eq!(view.queue_position("c"), Some(2));
        assert_eq!(view.queue_position("nope"), None);
    }

    #[test]
    fn test_equal_order_falls_back_to_id() {
        let state = state_with(vec![download("y", 1, 0), download("x", 2, 0)], vec![]);
        assert_eq!(TasksView::select(&state).downloads_by_order, vec!["x", "y"]);
    }

    #[test]
    fn test_downloads_grouped_by_game_in_queue_order() {
        let state = state_with(
            vec![download("c", 1, 3), download("a", 2, 2), download("b", 1, 1)],
            vec![],
        );
        let view = TasksView::select(&state);

        assert_eq!(view.downloads_by_game_id[&1], vec!["b", "c"]);
        assert_eq!(view.downloads_by_game_id[&2], vec!["a"]);
    }

    #[test]
    fn test_tasks_indexed_by_game() {
        let launch = Task {
            id: "t1".to_string(),
            game_id: Some(10),
            status: TaskStatus::Launch,
            ..Default::default()
        };
        let orphan = Task {
            id: "t2".to_string(),
            ..Default::default()
        };
        let view = TasksView::select(&state_with(vec![], vec![launch.clone(), orphan]));

        assert_eq!(view.tasks_by_game_id.len(), 1);
        assert_eq!(view.tasks_by_game_id[&10], launch);
    }

    #[test]
    fn test_empty_state_view() {
        assert_eq!(TasksView::select(&TasksState::default()), TasksView::default());
    }
}
