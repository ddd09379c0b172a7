//! egui widget for the main action button

use eframe::egui::{
    self, Align2, CornerRadius, FontId, Rect, RichText, Sense, Stroke, StrokeKind, Vec2,
};

use crate::i18n::Catalog;
use crate::main_action::{
    self, ActionButton, ActionHost, ButtonFill, Icon, MainAction, MainActionProps,
    PROGRESS_BORDER, PROGRESS_DONE, PROGRESS_UNDONE,
};
use crate::ui::theme::Theme;

const BUTTON_SIZE: Vec2 = Vec2::new(180.0, 34.0);
const CORNER: u8 = 4;

/// Paint the main action for `props`; clicks are forwarded to `host`
pub fn render_main_action(
    ui: &mut egui::Ui,
    props: &MainActionProps<'_>,
    catalog: &Catalog,
    theme: &Theme,
    host: &mut dyn ActionHost,
) {
    match main_action::present(props, catalog) {
        MainAction::Empty => {}
        MainAction::NotCompatible { message } => {
            ui.label(RichText::new(message).color(theme.text_muted).italics());
        }
        MainAction::Button(button) => {
            if paint_button(ui, &button, theme).clicked() {
                main_action::on_click(props, host);
            }
        }
    }
}

fn paint_button(ui: &mut egui::Ui, button: &ActionButton, theme: &Theme) -> egui::Response {
    let (rect, response) = ui.allocate_exact_size(BUTTON_SIZE, Sense::click());
    let painter = ui.painter_at(rect);

    let base = if button.buy_now {
        theme.accent
    } else {
        theme.bg_light
    };

    match button.fill {
        ButtonFill::Progress { fraction } => {
            painter.rect_filled(rect, CornerRadius::same(CORNER), PROGRESS_UNDONE);
            let done = Rect::from_min_size(
                rect.min,
                Vec2::new(rect.width() * fraction, rect.height()),
            );
            painter.rect_filled(done, CornerRadius::same(CORNER), PROGRESS_DONE);
            painter.rect_stroke(
                rect,
                CornerRadius::same(CORNER),
                Stroke::new(1.0, PROGRESS_BORDER),
                StrokeKind::Inside,
            );
        }
        ButtonFill::Branded(color) => {
            painter.rect_filled(rect, CornerRadius::same(CORNER), color);
        }
        ButtonFill::Plain => {
            painter.rect_filled(rect, CornerRadius::same(CORNER), base);
        }
    }

    if response.hovered() {
        painter.rect_stroke(
            rect,
            CornerRadius::same(CORNER),
            Stroke::new(1.0, theme.accent_hover),
            StrokeKind::Inside,
        );
    }

    let text_color = if button.buy_now && button.fill == ButtonFill::Plain {
        theme.bg_darkest
    } else {
        theme.text_primary
    };

    let mut icon_color = if button.icon == Icon::Error {
        theme.error
    } else {
        text_color
    };
    if button.animate {
        // Pulse the icon while the task runs
        let t = ui.input(|i| i.time) as f32;
        icon_color = icon_color.gamma_multiply(0.6 + 0.4 * (t * 3.0).sin().abs());
        ui.ctx().request_repaint();
    }

    let left = rect.left_center() + Vec2::new(12.0, 0.0);
    painter.text(
        left,
        Align2::LEFT_CENTER,
        button.icon.glyph(),
        FontId::proportional(15.0),
        icon_color,
    );
    painter.text(
        left + Vec2::new(24.0, 0.0),
        Align2::LEFT_CENTER,
        &button.label,
        FontId::proportional(14.0),
        text_color,
    );

    if button.cancel {
        painter.text(
            rect.right_center() - Vec2::new(12.0, 0.0),
            Align2::RIGHT_CENTER,
            Icon::Cross.glyph(),
            FontId::proportional(12.0),
            theme.text_muted,
        );
    }

    match &button.hint {
        Some(hint) => response.on_hover_text(hint),
        None => response,
    }
}
