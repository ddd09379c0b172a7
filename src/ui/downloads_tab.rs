//! Downloads tab: queue order, pause/resume and finished history

use eframe::egui::{self, RichText};

use crate::app::GamedockApp;
use crate::store::{Download, RecordRef, StoreEvent};
use crate::ui::render_section_frame;
use crate::ui::theme::Theme;

/// Render the downloads tab content
pub fn render_downloads_tab(app: &mut GamedockApp, ui: &mut egui::Ui) {
    let title = app.catalog.t("sidebar.downloads", &[]);
    let mut events = Vec::new();

    render_section_frame(app, ui, &title, |app, ui| {
        let theme = app.ui.current_theme.clone();
        let paused = app.store.state().downloads_paused;

        ui.horizontal(|ui| {
            let toggle = if paused { "Resume" } else { "Pause" };
            if ui.button(toggle).clicked() {
                events.push(if paused {
                    StoreEvent::ResumeDownloads
                } else {
                    StoreEvent::PauseDownloads
                });
            }
            if paused {
                ui.label(
                    RichText::new(app.catalog.t("status.downloads.paused", &[]))
                        .color(theme.warning),
                );
            }
        });
        ui.add_space(8.0);

        let queue = &app.store.view().downloads_by_order;
        if queue.is_empty() {
            ui.label(
                RichText::new(app.catalog.t("status.downloads.empty", &[])).color(theme.text_muted),
            );
        }

        for id in queue {
            let Some(download) = app.store.state().downloads.get(id) else {
                continue;
            };
            render_queued(app, ui, &theme, download, &mut events);
        }
    });

    if !app.store.state().finished_downloads.is_empty() {
        ui.add_space(12.0);
        render_section_frame(app, ui, "Finished", |app, ui| {
            let theme = app.ui.current_theme.clone();
            for download in &app.store.state().finished_downloads {
                ui.horizontal(|ui| {
                    let marker = if is_completed(download) {
                        RichText::new("✔").color(theme.success)
                    } else {
                        RichText::new("✖").color(theme.text_muted)
                    };
                    ui.label(marker);
                    ui.label(
                        RichText::new(download_title(app, download)).color(theme.text_secondary),
                    );
                });
            }
            ui.add_space(8.0);
            if ui.button("Clear finished").clicked() {
                events.push(StoreEvent::ClearFinishedDownloads);
            }
        });
    }

    for event in events {
        app.dispatch(event);
    }
}

fn render_queued(
    app: &GamedockApp,
    ui: &mut egui::Ui,
    theme: &Theme,
    download: &Download,
    events: &mut Vec<StoreEvent>,
) {
    let position = app.store.view().queue_position(&download.id).unwrap_or(0);

    ui.horizontal(|ui| {
        ui.vertical(|ui| {
            ui.label(RichText::new(download_title(app, download)).color(theme.text_primary));
            ui.label(
                RichText::new(download.status.to_string())
                    .color(theme.text_muted)
                    .size(11.0),
            );
        });

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if ui.button("Cancel").clicked() {
                events.push(StoreEvent::DownloadEnded(RecordRef::new(&download.id)));
            }
            if ui
                .add_enabled(position > 0, egui::Button::new("Prioritize"))
                .clicked()
            {
                events.push(StoreEvent::DownloadPrioritize(RecordRef::new(&download.id)));
            }
            ui.add(
                egui::ProgressBar::new(download.progress as f32)
                    .desired_width(160.0)
                    .show_percentage(),
            );
        });
    });
    ui.add_space(4.0);
}

fn download_title(app: &GamedockApp, download: &Download) -> String {
    match download.game_id {
        Some(game_id) => app.game_title(game_id),
        None => download.id.clone(),
    }
}

/// Whether a finished download ran to the end rather than being cancelled
fn is_completed(download: &Download) -> bool {
    download.progress >= 1.0
}
