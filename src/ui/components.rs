//! Shared UI components for Gamedock

use eframe::egui::{self, Color32, CornerRadius, RichText, Vec2};

use crate::app::GamedockApp;
use crate::ui::Tab;

/// Render a tab button
pub fn render_tab(app: &mut GamedockApp, ui: &mut egui::Ui, tab: Tab, label: &str) {
    let theme = &app.ui.current_theme;
    let is_active = app.ui.active_tab == tab;

    let (bg, text_color) = if is_active {
        (theme.bg_medium, theme.accent)
    } else {
        (Color32::TRANSPARENT, theme.text_secondary)
    };

    let button = egui::Button::new(RichText::new(label).color(text_color))
        .fill(bg)
        .corner_radius(CornerRadius {
            nw: 6,
            ne: 6,
            sw: 0,
            se: 0,
        })
        .min_size(Vec2::new(96.0, 32.0));

    if ui.add(button).clicked() && !is_active {
        tracing::debug!("Switching to {:?} tab", tab);
        app.ui.active_tab = tab;
    }
}

/// Render a titled section frame
pub fn render_section_frame<F>(app: &mut GamedockApp, ui: &mut egui::Ui, title: &str, content: F)
where
    F: FnOnce(&mut GamedockApp, &mut egui::Ui),
{
    let theme = app.ui.current_theme.clone();

    egui::Frame::NONE
        .fill(theme.bg_medium)
        .corner_radius(CornerRadius::same(8))
        .inner_margin(egui::Margin::same(16))
        .stroke(egui::Stroke::new(1.0, theme.border))
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.label(RichText::new(title).color(theme.accent).size(13.0).strong());
            ui.add_space(12.0);
            content(app, ui);
        });
}
