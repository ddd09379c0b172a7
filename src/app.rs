use eframe::egui;
use std::collections::BTreeMap;
use std::time::Duration;

use crate::config::Config;
use crate::i18n::Catalog;
use crate::library::{Cave, Game};
use crate::main_action::{self, HostRequest, MainActionProps, Route};
use crate::platform::Platform;
use crate::store::{
    Download, DownloadPatch, GameId, LaunchAction, RecordRef, Store, StoreEvent, Task,
    TaskStatus, TasksState,
};
use crate::ui::theme::Theme;
use crate::ui::{self, Tab, UiState};

/// Fraction of a download completed per second
const DOWNLOAD_RATE: f64 = 0.08;

/// Main application state
pub struct GamedockApp {
    pub(crate) config: Config,
    pub(crate) catalog: Catalog,
    pub(crate) store: Store,
    /// Installed copies, one per game
    pub(crate) caves: BTreeMap<GameId, Cave>,
    pub(crate) ui: UiState,
    pub(crate) status_message: String,
    platform: Platform,
    /// Sequence used for download ids and queue order
    next_download: i64,
}

impl GamedockApp {
    /// Create a new application instance
    pub fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        let config = Config::load().unwrap_or_else(|e| {
            tracing::error!("Failed to load config: {:#}", e);
            Config::default()
        });
        Self::with_config(config)
    }

    /// Build the app from an already loaded configuration
    pub fn with_config(config: Config) -> Self {
        let catalog = Catalog::load(&config.launcher.locale, config.launcher.catalog.as_deref())
            .unwrap_or_else(|e| {
                tracing::error!("Failed to load string catalog: {:#}", e);
                Catalog::english()
            });

        let store = Store::new(TasksState::with_paused(config.downloads.start_paused));

        tracing::info!(
            "Library has {} games, locale {}",
            config.library.games.len(),
            catalog.locale()
        );

        Self {
            config,
            catalog,
            store,
            caves: BTreeMap::new(),
            ui: UiState::new(Theme::default()),
            status_message: "Ready".to_string(),
            platform: Platform::current(),
            next_download: 1,
        }
    }

    /// Props for one game's main action
    pub(crate) fn props_for<'a>(&'a self, game: &'a Game) -> MainActionProps<'a> {
        library_props(game, &self.store, self.caves.get(&game.id), self.platform)
    }

    /// Apply an event, surfacing rejections in the status bar
    pub(crate) fn dispatch(&mut self, event: StoreEvent) {
        let reorder = matches!(event, StoreEvent::DownloadPrioritize(_));
        if let Err(e) = self.store.dispatch(event) {
            self.status_message = e.to_string();
            return;
        }
        if reorder {
            self.requeue();
        }
    }

    /// Apply host calls gathered while rendering
    pub(crate) fn handle_requests(&mut self, requests: Vec<HostRequest>) {
        for request in requests {
            self.handle_request(request);
        }
    }

    fn handle_request(&mut self, request: HostRequest) {
        tracing::debug!("Host request: {:?}", request);

        match request {
            HostRequest::QueueGame { game_id } => self.queue_game(game_id),
            HostRequest::AbortGameRequest { game_id } => {
                self.dispatch(StoreEvent::TaskEnded(RecordRef::new(launch_task_id(game_id))));
                self.status_message = format!("Stopped {}", self.game_title(game_id));
            }
            HostRequest::Navigate { route } => match route {
                Route::Downloads => self.ui.active_tab = Tab::Downloads,
            },
            HostRequest::InitiatePurchase { game_id } | HostRequest::BrowseGame { game_id, .. } => {
                self.open_store_page(game_id);
            }
            HostRequest::ReportCave { cave_id } => {
                tracing::warn!("Problem reported for cave {}", cave_id);
                self.status_message = format!("Reported a problem with {}", cave_id);
            }
        }
    }

    fn queue_game(&mut self, game_id: GameId) {
        if self.caves.contains_key(&game_id) {
            self.dispatch(StoreEvent::TaskStarted(Task {
                id: launch_task_id(game_id),
                game_id: Some(game_id),
                status: TaskStatus::Launch,
                action: Some(LaunchAction::Launch),
                ..Default::default()
            }));
            self.status_message = format!("Launched {}", self.game_title(game_id));
            return;
        }

        if self.store.active_download(game_id).is_some() {
            self.ui.active_tab = Tab::Downloads;
            return;
        }

        let n = self.next_download;
        self.next_download += 1;
        self.dispatch(StoreEvent::DownloadStarted(Download {
            id: format!("download-{}-{}", game_id, n),
            game_id: Some(game_id),
            status: TaskStatus::DownloadQueued,
            order: n,
            priority: n,
            ..Default::default()
        }));
        self.status_message = format!("Queued {}", self.game_title(game_id));
    }

    fn open_store_page(&mut self, game_id: GameId) {
        let Some(url) = self.game(game_id).map(|g| g.url.clone()) else {
            tracing::warn!("No game {} in the library", game_id);
            return;
        };
        if url.is_empty() {
            self.status_message = format!("{} has no store page", self.game_title(game_id));
            return;
        }
        if let Err(e) = open::that(&url) {
            tracing::error!("Failed to open {}: {}", url, e);
            self.status_message = format!("Failed to open {}", url);
        }
    }

    /// Rewrite `order` so the queue follows priority
    fn requeue(&mut self) {
        let mut queue: Vec<(i64, i64, String)> = self
            .store
            .state()
            .downloads
            .values()
            .map(|d| (d.priority, d.order, d.id.clone()))
            .collect();
        queue.sort();

        for (position, (_, order, id)) in queue.into_iter().enumerate() {
            let position = position as i64 + 1;
            if order != position {
                self.dispatch(StoreEvent::DownloadProgress(DownloadPatch {
                    id,
                    order: Some(position),
                    ..Default::default()
                }));
            }
        }
    }

    /// Move the head of the queue forward by `dt` seconds
    pub(crate) fn advance_downloads(&mut self, dt: f64) {
        if self.store.state().downloads_paused {
            return;
        }
        let Some(head) = self
            .store
            .view()
            .downloads_by_order
            .first()
            .and_then(|id| self.store.state().downloads.get(id))
        else {
            return;
        };

        let id = head.id.clone();
        let game_id = head.game_id;
        let progress = (head.progress + dt * DOWNLOAD_RATE).min(1.0);

        if progress >= 1.0 {
            // Finished history keeps the full progress so completed and
            // cancelled downloads can be told apart
            self.dispatch(StoreEvent::DownloadProgress(DownloadPatch::progress(&id, 1.0)));
            self.dispatch(StoreEvent::DownloadEnded(RecordRef::new(id)));
            if let Some(game_id) = game_id {
                tracing::info!("Game {} installed", game_id);
                self.caves.insert(game_id, Cave::for_game(game_id));
                self.status_message = format!("Installed {}", self.game_title(game_id));
            }
        } else {
            self.dispatch(StoreEvent::DownloadProgress(DownloadPatch {
                status: Some(TaskStatus::Download),
                ..DownloadPatch::progress(id, progress)
            }));
        }
    }

    pub(crate) fn game(&self, game_id: GameId) -> Option<&Game> {
        self.config.library.games.iter().find(|g| g.id == game_id)
    }

    pub(crate) fn game_title(&self, game_id: GameId) -> String {
        self.game(game_id)
            .map(|g| g.title.clone())
            .unwrap_or_else(|| format!("game {}", game_id))
    }
}

fn launch_task_id(game_id: GameId) -> String {
    format!("launch-{}", game_id)
}

/// Main action props for a library entry
pub fn library_props<'a>(
    game: &'a Game,
    store: &Store,
    cave: Option<&'a Cave>,
    platform: Platform,
) -> MainActionProps<'a> {
    let (task, action, progress) = if let Some(task) = store.view().tasks_by_game_id.get(&game.id) {
        (Some(task.status), task.action, task.progress)
    } else if let Some(download) = store.active_download(game.id) {
        (Some(download.status), download.action, download.progress)
    } else if cave.is_some() {
        (Some(TaskStatus::Idle), None, 0.0)
    } else {
        (None, None, 0.0)
    };

    let dominant_color = game.dominant_color.as_deref().and_then(|hex| {
        let color = main_action::parse_color(hex);
        if color.is_none() {
            tracing::warn!("Ignoring invalid colour {:?} for game {}", hex, game.id);
        }
        color
    });

    MainActionProps {
        game,
        cave,
        task,
        action: action.unwrap_or_default(),
        progress,
        cancellable: task.is_some_and(|t| {
            t == TaskStatus::Launch || t == TaskStatus::DownloadQueued || t.is_downloading()
        }),
        animate: task.is_some_and(|t| !t.is_idle()),
        platform,
        platform_compatible: game.supports(platform),
        may_download: game.may_download,
        press_download: store.has_download_attempt(game.id),
        can_be_bought: game.can_be_bought,
        dominant_color,
    }
}

impl eframe::App for GamedockApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.ui.theme_dirty {
            self.ui.current_theme.apply(ctx);
            self.ui.theme_dirty = false;
        }

        let dt = ctx.input(|i| i.stable_dt) as f64;
        self.advance_downloads(dt);
        if !self.store.state().downloads.is_empty() && !self.store.state().downloads_paused {
            ctx.request_repaint_after(Duration::from_millis(100));
        }

        egui::TopBottomPanel::top("tabs").show(ctx, |ui| {
            ui.add_space(6.0);
            ui.horizontal(|ui| {
                let library = self.catalog.t("sidebar.library", &[]);
                let downloads = self.catalog.t("sidebar.downloads", &[]);
                ui::render_tab(self, ui, Tab::Library, &library);
                ui::render_tab(self, ui, Tab::Downloads, &downloads);
            });
        });

        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(&self.status_message);
                if self.store.state().downloads_paused {
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        ui.label(
                            egui::RichText::new(self.catalog.t("status.downloads.paused", &[]))
                                .color(self.ui.current_theme.warning),
                        );
                    });
                }
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| match self.ui.active_tab {
            Tab::Library => ui::render_library_tab(self, ui),
            Tab::Downloads => ui::render_downloads_tab(self, ui),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::main_action::tests::game;

    fn app() -> GamedockApp {
        let mut config = Config::default();
        let mut first = game();
        first.may_download = true;
        let mut second = game();
        second.id = 2;
        second.title = "Second".to_string();
        second.may_download = true;
        config.library.games = vec![first, second];
        GamedockApp::with_config(config)
    }

    fn queue(app: &mut GamedockApp, game_id: GameId) {
        app.handle_requests(vec![HostRequest::QueueGame { game_id }]);
    }

    #[test]
    fn test_queue_starts_download() {
        let mut app = app();
        queue(&mut app, 1);

        let download = app.store.active_download(1).unwrap();
        assert_eq!(download.id, "download-1-1");
        assert_eq!(download.status, TaskStatus::DownloadQueued);

        let game = app.game(1).unwrap().clone();
        let props = app.props_for(&game);
        assert_eq!(props.task, Some(TaskStatus::DownloadQueued));
        assert!(props.press_download);
        assert!(props.animate);
    }

    #[test]
    fn test_queue_twice_navigates() {
        let mut app = app();
        queue(&mut app, 1);
        queue(&mut app, 1);

        assert_eq!(app.store.state().downloads.len(), 1);
        assert_eq!(app.ui.active_tab, Tab::Downloads);
    }

    #[test]
    fn test_download_completes_into_cave() {
        let mut app = app();
        queue(&mut app, 1);

        app.advance_downloads(5.0);
        let download = app.store.active_download(1).unwrap();
        assert_eq!(download.status, TaskStatus::Download);
        assert!((download.progress - 0.4).abs() < 1e-9);

        app.advance_downloads(20.0);
        assert!(app.store.state().downloads.is_empty());
        assert_eq!(app.store.state().finished_downloads[0].id, "download-1-1");
        assert_eq!(app.store.state().finished_downloads[0].progress, 1.0);
        assert!(app.caves.contains_key(&1));

        let game = app.game(1).unwrap().clone();
        let props = app.props_for(&game);
        assert_eq!(props.task, Some(TaskStatus::Idle));
        assert!(!props.animate);
    }

    #[test]
    fn test_paused_queue_does_not_advance() {
        let mut app = app();
        queue(&mut app, 1);
        app.dispatch(StoreEvent::PauseDownloads);

        app.advance_downloads(100.0);
        assert_eq!(app.store.active_download(1).unwrap().progress, 0.0);
    }

    #[test]
    fn test_launch_and_abort() {
        let mut app = app();
        app.caves.insert(1, Cave::for_game(1));

        queue(&mut app, 1);
        let game = app.game(1).unwrap().clone();
        let props = app.props_for(&game);
        assert_eq!(props.task, Some(TaskStatus::Launch));
        assert!(props.cancellable);

        app.handle_requests(vec![HostRequest::AbortGameRequest { game_id: 1 }]);
        assert!(app.store.state().tasks.is_empty());
        assert_eq!(app.store.state().finished_tasks[0].id, "launch-1");
    }

    #[test]
    fn test_prioritize_reorders_queue() {
        let mut app = app();
        queue(&mut app, 1);
        queue(&mut app, 2);
        assert_eq!(
            app.store.view().downloads_by_order,
            vec!["download-1-1", "download-2-2"]
        );

        app.dispatch(StoreEvent::DownloadPrioritize(RecordRef::new("download-2-2")));
        assert_eq!(
            app.store.view().downloads_by_order,
            vec!["download-2-2", "download-1-1"]
        );

        // The new head is the one that advances
        app.advance_downloads(1.0);
        assert!(app.store.state().downloads["download-2-2"].progress > 0.0);
        assert_eq!(app.store.state().downloads["download-1-1"].progress, 0.0);
    }

    #[test]
    fn test_invalid_colour_is_ignored() {
        let mut broken = game();
        broken.dominant_color = Some("nope".to_string());
        let store = Store::default();

        let props = library_props(&broken, &store, None, Platform::Windows);
        assert!(props.dominant_color.is_none());
        assert!(props.task.is_none());
    }

    #[test]
    fn test_incompatible_platform() {
        let game = game();
        let store = Store::default();

        let props = library_props(&game, &store, None, Platform::Osx);
        assert!(!props.platform_compatible);
    }

    #[test]
    fn test_report_sets_status() {
        let mut app = app();
        app.handle_requests(vec![HostRequest::ReportCave {
            cave_id: "cave-1".to_string(),
        }]);
        assert!(app.status_message.contains("cave-1"));
    }
}
