//! The main action button of a game
//!
//! [`present`] turns the game's current task, platform and ownership into a
//! render description. It holds no state: call it again whenever the inputs
//! change. [`on_click`] decides which host capability a click invokes.

mod click;
mod status;

use eframe::egui::Color32;
use serde::Serialize;

use crate::i18n::Catalog;
use crate::library::{Cave, Game};
use crate::platform::Platform;
use crate::store::{LaunchAction, TaskStatus};

pub use click::{ActionHost, HostRequest, Route, on_click};
pub use status::Icon;

/// Filled part of the progress bar
pub const PROGRESS_DONE: Color32 = Color32::from_rgb(0x41, 0x41, 0x41);
/// Remaining part of the progress bar
pub const PROGRESS_UNDONE: Color32 = Color32::from_rgb(0x2B, 0x2B, 0x2B);
/// Border drawn around a button showing progress
pub const PROGRESS_BORDER: Color32 = Color32::from_rgb(0x44, 0x44, 0x44);

/// Everything the main action depends on
#[derive(Debug, Clone)]
pub struct MainActionProps<'a> {
    pub game: &'a Game,
    /// Installed copy, if any
    pub cave: Option<&'a Cave>,
    /// Status of the task running against the game
    pub task: Option<TaskStatus>,
    pub action: LaunchAction,
    /// 0.0 - 1.0
    pub progress: f64,
    pub cancellable: bool,
    pub animate: bool,
    /// Platform of this machine
    pub platform: Platform,
    pub platform_compatible: bool,
    pub may_download: bool,
    /// A download was attempted before
    pub press_download: bool,
    pub can_be_bought: bool,
    pub dominant_color: Option<Color32>,
}

/// Background of the button
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ButtonFill {
    Plain,
    /// Horizontal bar filled up to `fraction`
    Progress { fraction: f32 },
    /// Flat brand colour
    Branded(Color32),
}

impl ButtonFill {
    /// Progress rounded to a whole percentage
    pub fn percent(&self) -> Option<u32> {
        match self {
            ButtonFill::Progress { fraction } => Some((fraction * 100.0).round() as u32),
            _ => None,
        }
    }
}

/// A rendered main action button
#[derive(Debug, Clone, PartialEq)]
pub struct ActionButton {
    pub icon: Icon,
    /// Catalog key the label came from
    pub label_key: Option<&'static str>,
    pub label: String,
    /// Show the cancel cross
    pub cancel: bool,
    pub animate: bool,
    pub fill: ButtonFill,
    /// Tooltip
    pub hint: Option<String>,
    /// Styled as a purchase button
    pub buy_now: bool,
}

/// Render description of the main action
#[derive(Debug, Clone, PartialEq)]
pub enum MainAction {
    /// Nothing to show
    Empty,
    /// Only a message, no button
    NotCompatible { message: String },
    Button(ActionButton),
}

/// Serializable summary of a render, for the CLI
#[derive(Debug, Serialize)]
pub struct MainActionSummary {
    pub kind: &'static str,
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label_key: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<Icon>,
    pub cancel: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub progress_percent: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub branded: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
    pub buy_now: bool,
}

impl MainAction {
    pub fn summary(&self) -> MainActionSummary {
        let mut summary = MainActionSummary {
            kind: "empty",
            label: String::new(),
            label_key: None,
            icon: None,
            cancel: false,
            progress_percent: None,
            branded: None,
            hint: None,
            buy_now: false,
        };

        match self {
            MainAction::Empty => {}
            MainAction::NotCompatible { message } => {
                summary.kind = "not_compatible";
                summary.label = message.clone();
            }
            MainAction::Button(button) => {
                summary.kind = "button";
                summary.label = button.label.clone();
                summary.label_key = button.label_key;
                summary.icon = Some(button.icon);
                summary.cancel = button.cancel;
                summary.progress_percent = button.fill.percent();
                if let ButtonFill::Branded(color) = button.fill {
                    summary.branded = Some(color_to_hex(color));
                }
                summary.hint = button.hint.clone();
                summary.buy_now = button.buy_now;
            }
        }
        summary
    }
}

/// Parse a `#rrggbb` brand colour
pub fn parse_color(hex: &str) -> Option<Color32> {
    let digits = hex.strip_prefix('#').unwrap_or(hex);
    if digits.len() != 6 || !digits.is_ascii() {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
    Some(Color32::from_rgb(channel(0)?, channel(2)?, channel(4)?))
}

fn color_to_hex(color: Color32) -> String {
    format!("#{:02x}{:02x}{:02x}", color.r(), color.g(), color.b())
}

/// Decide what the main action shows
pub fn present(props: &MainActionProps<'_>, catalog: &Catalog) -> MainAction {
    let (icon, label_key, cancel) = if let Some(task) = props.task {
        (
            Icon::for_task(task, props.action),
            status::label_key(task, props.action),
            props.cancellable,
        )
    } else if !props.platform_compatible {
        let platform = props.platform.display_name();
        return MainAction::NotCompatible {
            message: catalog.t("grid.item.not_platform_compatible", &[("platform", platform)]),
        };
    } else if props.may_download {
        let key = if props.press_download {
            "grid.item.review"
        } else {
            "grid.item.install"
        };
        (Icon::Install, Some(key), false)
    } else if props.can_be_bought {
        (Icon::ShoppingCart, Some("grid.item.buy_now"), false)
    } else {
        return MainAction::Empty;
    };

    let fill = if props.progress > 0.0 {
        ButtonFill::Progress {
            fraction: props.progress.clamp(0.0, 1.0) as f32,
        }
    } else if let Some(color) = props.dominant_color {
        ButtonFill::Branded(color)
    } else {
        ButtonFill::Plain
    };

    let hint = (props.task == Some(TaskStatus::Error))
        .then(|| catalog.t("grid.item.report_problem", &[]));

    MainAction::Button(ActionButton {
        icon,
        label_key,
        label: label_key.map(|k| catalog.t(k, &[])).unwrap_or_default(),
        cancel,
        animate: props.animate,
        fill,
        hint,
        buy_now: props.platform_compatible && !props.may_download && props.can_be_bought,
    })
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub fn game() -> Game {
        Game {
            id: 1,
            title: "Test Game".to_string(),
            url: "https://example.com/game".to_string(),
            platforms: vec![Platform::Windows, Platform::Linux],
            may_download: false,
            can_be_bought: false,
            dominant_color: None,
        }
    }

    pub fn props(game: &Game) -> MainActionProps<'_> {
        MainActionProps {
            game,
            cave: None,
            task: None,
            action: LaunchAction::Launch,
            progress: 0.0,
            cancellable: false,
            animate: false,
            platform: Platform::Windows,
            platform_compatible: true,
            may_download: false,
            press_download: false,
            can_be_bought: false,
            dominant_color: None,
        }
    }

    fn button(action: MainAction) -> ActionButton {
        match action {
            MainAction::Button(button) => button,
            other => panic!("expected a button, got {:?}", other),
        }
    }

    #[test]
    fn test_install_affordance() {
        let game = game();
        let mut p = props(&game);
        p.may_download = true;

        let b = button(present(&p, &Catalog::english()));
        assert_eq!(b.label_key, Some("grid.item.install"));
        assert_eq!(b.label, "Install");
        assert_eq!(b.icon, Icon::Install);
        assert!(!b.cancel);
        assert!(!b.buy_now);
    }

    #[test]
    fn test_review_after_previous_download() {
        let game = game();
        let mut p = props(&game);
        p.may_download = true;
        p.press_download = true;

        let b = button(present(&p, &Catalog::english()));
        assert_eq!(b.label_key, Some("grid.item.review"));
    }

    #[test]
    fn test_running_task_with_cancel() {
        let game = game();
        let mut p = props(&game);
        p.task = Some(TaskStatus::Launch);

        let b = button(present(&p, &Catalog::english()));
        assert_eq!(b.label_key, Some("grid.item.running"));
        assert!(!b.cancel);

        p.cancellable = true;
        let b = button(present(&p, &Catalog::english()));
        assert!(b.cancel);
    }

    #[test]
    fn test_not_compatible_ignores_other_props() {
        let game = game();
        let mut p = props(&game);
        p.platform_compatible = false;
        p.platform = Platform::Osx;
        p.may_download = true;
        p.can_be_bought = true;
        p.progress = 0.5;

        assert_eq!(
            present(&p, &Catalog::english()),
            MainAction::NotCompatible {
                message: "Not available for macOS".to_string()
            }
        );
    }

    #[test]
    fn test_task_wins_over_incompatible_platform() {
        let game = game();
        let mut p = props(&game);
        p.platform_compatible = false;
        p.task = Some(TaskStatus::Uninstall);

        let b = button(present(&p, &Catalog::english()));
        assert_eq!(b.label, "Uninstalling");
    }

    #[test]
    fn test_buy_now() {
        let game = game();
        let mut p = props(&game);
        p.can_be_bought = true;

        let b = button(present(&p, &Catalog::english()));
        assert_eq!(b.label_key, Some("grid.item.buy_now"));
        assert_eq!(b.icon, Icon::ShoppingCart);
        assert!(b.buy_now);
    }

    #[test]
    fn test_nothing_to_do_is_empty() {
        let game = game();
        assert_eq!(present(&props(&game), &Catalog::english()), MainAction::Empty);
    }

    #[test]
    fn test_error_has_empty_label_and_hint() {
        let game = game();
        let mut p = props(&game);
        p.task = Some(TaskStatus::Error);

        let b = button(present(&p, &Catalog::english()));
        assert_eq!(b.label_key, None);
        assert_eq!(b.label, "");
        assert_eq!(b.hint.as_deref(), Some("Report problem"));
    }

    #[test]
    fn test_progress_fill_beats_brand_colour() {
        let game = game();
        let mut p = props(&game);
        p.task = Some(TaskStatus::Download);
        p.progress = 0.426;
        p.dominant_color = Some(Color32::from_rgb(200, 10, 10));

        let b = button(present(&p, &Catalog::english()));
        assert_eq!(b.fill.percent(), Some(43));

        p.progress = 0.0;
        let b = button(present(&p, &Catalog::english()));
        assert_eq!(b.fill, ButtonFill::Branded(Color32::from_rgb(200, 10, 10)));

        p.dominant_color = None;
        let b = button(present(&p, &Catalog::english()));
        assert_eq!(b.fill, ButtonFill::Plain);
    }

    #[test]
    fn test_parse_color() {
        assert_eq!(parse_color("#aa3322"), Some(Color32::from_rgb(0xaa, 0x33, 0x22)));
        assert_eq!(parse_color("0A0B0C"), Some(Color32::from_rgb(10, 11, 12)));
        assert_eq!(parse_color("#abc"), None);
        assert_eq!(parse_color("#zz0000"), None);
    }

    #[test]
    fn test_summary() {
        let game = game();
        let mut p = props(&game);
        p.may_download = true;
        p.dominant_color = Some(Color32::from_rgb(0xaa, 0x33, 0x22));

        let summary = present(&p, &Catalog::english()).summary();
        assert_eq!(summary.kind, "button");
        assert_eq!(summary.label, "Install");
        assert_eq!(summary.branded.as_deref(), Some("#aa3322"));

        assert_eq!(MainAction::Empty.summary().kind, "empty");
    }
}
