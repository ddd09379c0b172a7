//! What clicking the main action does
//!
//! The button never acts on its own. It calls into an [`ActionHost`] the
//! surrounding application provides.

use serde::Serialize;

use super::MainActionProps;
use crate::library::Game;
use crate::store::{GameId, TaskStatus};

/// Views the host can navigate to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Route {
    Downloads,
}

/// Capabilities the main action calls into
pub trait ActionHost {
    fn report_cave(&mut self, cave_id: &str);
    fn navigate(&mut self, route: Route);
    fn abort_game_request(&mut self, game: &Game);
    fn queue_game(&mut self, game: &Game);
    fn initiate_purchase(&mut self, game: &Game);
    fn browse_game(&mut self, game_id: GameId, url: &str);
}

/// A host call recorded for later processing
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "call", rename_all = "snake_case")]
pub enum HostRequest {
    ReportCave { cave_id: String },
    Navigate { route: Route },
    AbortGameRequest { game_id: GameId },
    QueueGame { game_id: GameId },
    InitiatePurchase { game_id: GameId },
    BrowseGame { game_id: GameId, url: String },
}

/// Collects calls so they can be applied once rendering is done
impl ActionHost for Vec<HostRequest> {
    fn report_cave(&mut self, cave_id: &str) {
        self.push(HostRequest::ReportCave {
            cave_id: cave_id.to_string(),
        });
    }

    fn navigate(&mut self, route: Route) {
        self.push(HostRequest::Navigate { route });
    }

    fn abort_game_request(&mut self, game: &Game) {
        self.push(HostRequest::AbortGameRequest { game_id: game.id });
    }

    fn queue_game(&mut self, game: &Game) {
        self.push(HostRequest::QueueGame { game_id: game.id });
    }

    fn initiate_purchase(&mut self, game: &Game) {
        self.push(HostRequest::InitiatePurchase { game_id: game.id });
    }

    fn browse_game(&mut self, game_id: GameId, url: &str) {
        self.push(HostRequest::BrowseGame {
            game_id,
            url: url.to_string(),
        });
    }
}

/// Dispatch a click on the main action
pub fn on_click(props: &MainActionProps<'_>, host: &mut dyn ActionHost) {
    match props.task {
        Some(TaskStatus::Error) => match props.cave {
            Some(cave) => host.report_cave(&cave.id),
            None => tracing::warn!("Game {} errored without a cave to report", props.game.id),
        },
        Some(status) if status.is_downloading() => host.navigate(Route::Downloads),
        task if props.platform_compatible => match task {
            Some(TaskStatus::Launch) => host.abort_game_request(props.game),
            None | Some(TaskStatus::Idle) => {
                if props.may_download || props.cave.is_some() {
                    host.queue_game(props.game);
                } else {
                    host.initiate_purchase(props.game);
                }
            }
            Some(_) => {}
        },
        _ => host.browse_game(props.game.id, &props.game.url),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::library::Cave;
    use crate::main_action::tests::{game, props};

    fn click(props: &MainActionProps<'_>) -> Vec<HostRequest> {
        let mut calls = Vec::new();
        on_click(props, &mut calls);
        calls
    }

    #[test]
    fn test_error_reports_cave() {
        let game = game();
        let cave = Cave::for_game(game.id);
        let mut p = props(&game);
        p.task = Some(TaskStatus::Error);
        p.cave = Some(&cave);

        assert_eq!(
            click(&p),
            vec![HostRequest::ReportCave {
                cave_id: "cave-1".to_string()
            }]
        );
    }

    #[test]
    fn test_error_without_cave_does_nothing() {
        let game = game();
        let mut p = props(&game);
        p.task = Some(TaskStatus::Error);

        assert!(click(&p).is_empty());
    }

    #[test]
    fn test_downloading_navigates() {
        let game = game();
        for status in [TaskStatus::Download, TaskStatus::FindUpload] {
            let mut p = props(&game);
            p.task = Some(status);
            // Even an incompatible platform goes to downloads
            p.platform_compatible = false;
            assert_eq!(
                click(&p),
                vec![HostRequest::Navigate {
                    route: Route::Downloads
                }]
            );
        }
    }

    #[test]
    fn test_running_game_is_aborted() {
        let game = game();
        let mut p = props(&game);
        p.task = Some(TaskStatus::Launch);

        assert_eq!(click(&p), vec![HostRequest::AbortGameRequest { game_id: 1 }]);
    }

    #[test]
    fn test_idle_queues_when_downloadable_or_installed() {
        let game = game();
        let mut p = props(&game);
        p.may_download = true;
        assert_eq!(click(&p), vec![HostRequest::QueueGame { game_id: 1 }]);

        let cave = Cave::for_game(game.id);
        let mut p = props(&game);
        p.task = Some(TaskStatus::Idle);
        p.cave = Some(&cave);
        assert_eq!(click(&p), vec![HostRequest::QueueGame { game_id: 1 }]);
    }

    #[test]
    fn test_idle_purchases_otherwise() {
        let game = game();
        let mut p = props(&game);
        p.can_be_bought = true;

        assert_eq!(click(&p), vec![HostRequest::InitiatePurchase { game_id: 1 }]);
    }

    #[test]
    fn test_other_statuses_do_nothing() {
        let game = game();
        for status in [
            TaskStatus::Awaken,
            TaskStatus::DownloadQueued,
            TaskStatus::Uninstall,
            TaskStatus::Reporting,
        ] {
            let mut p = props(&game);
            p.task = Some(status);
            assert!(click(&p).is_empty(), "{} should not dispatch", status);
        }
    }

    #[test]
    fn test_incompatible_browses() {
        let game = game();
        let mut p = props(&game);
        p.platform_compatible = false;
        p.task = Some(TaskStatus::Launch);

        assert_eq!(
            click(&p),
            vec![HostRequest::BrowseGame {
                game_id: 1,
                url: "https://example.com/game".to_string()
            }]
        );
    }
}
