use eframe::egui::{self, Color32, Stroke, Visuals, style::WidgetVisuals};

/// Theme color definitions
#[derive(Debug, Clone)]
pub struct Theme {
    // Base colors
    pub bg_darkest: Color32,
    pub bg_dark: Color32,
    pub bg_medium: Color32,
    pub bg_light: Color32,

    // Text colors
    pub text_primary: Color32,
    pub text_secondary: Color32,
    pub text_muted: Color32,

    // Accent colors
    pub accent: Color32,
    pub accent_hover: Color32,
    pub accent_muted: Color32,

    // Semantic colors
    pub success: Color32,
    pub warning: Color32,
    pub error: Color32,

    // UI element colors
    pub border: Color32,
    pub selection: Color32,
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

impl Theme {
    /// Dark library theme with a rose accent
    pub fn dark() -> Self {
        Self {
            bg_darkest: Color32::from_rgb(20, 20, 20),
            bg_dark: Color32::from_rgb(28, 28, 28),
            bg_medium: Color32::from_rgb(38, 38, 38),
            bg_light: Color32::from_rgb(52, 52, 52),

            text_primary: Color32::from_rgb(245, 245, 245),
            text_secondary: Color32::from_rgb(200, 200, 200),
            text_muted: Color32::from_rgb(135, 135, 135),

            accent: Color32::from_rgb(250, 92, 92),
            accent_hover: Color32::from_rgb(252, 128, 128),
            accent_muted: Color32::from_rgb(180, 62, 62),

            success: Color32::from_rgb(34, 197, 94),
            warning: Color32::from_rgb(234, 179, 8),
            error: Color32::from_rgb(239, 68, 68),

            border: Color32::from_rgb(64, 64, 64),
            selection: Color32::from_rgb(250, 92, 92).gamma_multiply(0.3),
        }
    }

    /// Apply this theme to egui's visuals
    pub fn apply(&self, ctx: &egui::Context) {
        let mut visuals = Visuals::dark();

        visuals.window_fill = self.bg_dark;
        visuals.panel_fill = self.bg_dark;
        visuals.faint_bg_color = self.bg_medium;
        visuals.extreme_bg_color = self.bg_darkest;

        let widgets = &mut visuals.widgets;
        paint(
            &mut widgets.noninteractive,
            self.bg_medium,
            self.bg_medium,
            self.border,
            self.text_secondary,
        );
        paint(
            &mut widgets.inactive,
            self.bg_medium,
            self.bg_light,
            self.border,
            self.text_primary,
        );
        paint(
            &mut widgets.hovered,
            self.bg_light,
            self.bg_light,
            self.accent,
            self.text_primary,
        );
        paint(
            &mut widgets.active,
            self.accent_muted,
            self.accent_muted,
            self.accent_hover,
            self.text_primary,
        );

        visuals.selection.bg_fill = self.selection;
        visuals.selection.stroke = Stroke::new(1.0, self.accent);
        visuals.hyperlink_color = self.accent;
        visuals.window_stroke = Stroke::new(1.0, self.border);

        // Flat library look
        visuals.window_shadow = egui::epaint::Shadow::NONE;
        visuals.popup_shadow = egui::epaint::Shadow::NONE;

        ctx.set_visuals(visuals);
    }
}

fn paint(
    visuals: &mut WidgetVisuals,
    bg: Color32,
    weak_bg: Color32,
    stroke: Color32,
    fg: Color32,
) {
    visuals.bg_fill = bg;
    visuals.weak_bg_fill = weak_bg;
    visuals.bg_stroke = Stroke::new(1.0, stroke);
    visuals.fg_stroke = Stroke::new(1.0, fg);
}
