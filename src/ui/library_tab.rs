//! Library tab: one row per game with its main action

use eframe::egui::{self, RichText};

use crate::app::GamedockApp;
use crate::main_action::HostRequest;
use crate::ui::main_action::render_main_action;
use crate::ui::render_section_frame;

/// Render the library tab content
pub fn render_library_tab(app: &mut GamedockApp, ui: &mut egui::Ui) {
    let title = app.catalog.t("sidebar.library", &[]);

    render_section_frame(app, ui, &title, |app, ui| {
        if app.config.library.games.is_empty() {
            ui.label(
                RichText::new("No games yet. Add [[library.games]] entries to config.toml.")
                    .color(app.ui.current_theme.text_muted),
            );
            return;
        }

        // Clicks are collected and applied once the rows are drawn
        let mut requests: Vec<HostRequest> = Vec::new();

        egui::ScrollArea::vertical().show(ui, |ui| {
            let app: &GamedockApp = app;
            let theme = &app.ui.current_theme;

            for game in &app.config.library.games {
                ui.horizontal(|ui| {
                    ui.vertical(|ui| {
                        ui.label(RichText::new(&game.title).color(theme.text_primary).strong());
                        let platforms = if game.platforms.is_empty() {
                            "All platforms".to_string()
                        } else {
                            game.platforms
                                .iter()
                                .map(|p| p.display_name())
                                .collect::<Vec<_>>()
                                .join(", ")
                        };
                        ui.label(RichText::new(platforms).color(theme.text_muted).size(11.0));
                    });

                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        let props = app.props_for(game);
                        render_main_action(ui, &props, &app.catalog, theme, &mut requests);
                    });
                });
                ui.separator();
            }
        });

        app.handle_requests(requests);
    });
}
