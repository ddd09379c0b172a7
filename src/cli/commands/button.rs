//! Evaluate the main action for a hand-written set of props

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;

use crate::cli::output::{OutputFormat, print_formatted};
use crate::config::Config;
use crate::i18n::Catalog;
use crate::library::{Cave, Game};
use crate::main_action::{self, HostRequest, MainActionProps, MainActionSummary};
use crate::platform::Platform;
use crate::store::{GameId, LaunchAction, TaskStatus};

#[derive(Args, Debug, Clone)]
pub struct ButtonArgs {
    /// Status of the running task (idle, launch, download, error, ...)
    #[arg(long)]
    pub task: Option<String>,

    /// Action once installed
    #[arg(long, value_parser = ["open", "launch"], default_value = "launch")]
    pub action: String,

    /// Task progress, 0.0 - 1.0
    #[arg(long, default_value_t = 0.0)]
    pub progress: f64,

    #[arg(long)]
    pub cancellable: bool,

    /// Platform of this machine (defaults to the current one)
    #[arg(long, value_enum)]
    pub platform: Option<Platform>,

    /// The game has no build for this machine
    #[arg(long)]
    pub incompatible: bool,

    #[arg(long)]
    pub may_download: bool,

    /// A download was attempted before
    #[arg(long)]
    pub press_download: bool,

    #[arg(long)]
    pub can_be_bought: bool,

    /// The game is installed
    #[arg(long)]
    pub installed: bool,

    /// Brand colour as #rrggbb
    #[arg(long)]
    pub dominant_color: Option<String>,

    #[arg(long, default_value_t = 1)]
    pub game_id: GameId,

    #[arg(long, default_value = "")]
    pub url: String,
}

/// What the button shows and what a click would do
#[derive(Debug, Serialize)]
pub struct ButtonReport {
    pub render: MainActionSummary,
    pub click: Vec<HostRequest>,
}

pub async fn run(args: ButtonArgs, format: OutputFormat, _quiet: bool) -> Result<()> {
    let config = Config::load()?;
    let catalog = Catalog::load(&config.launcher.locale, config.launcher.catalog.as_deref())?;

    let report = evaluate(&args, &catalog)?;
    print_formatted(&report, format, format_report_text);
    Ok(())
}

/// Run the presenter and a simulated click
pub fn evaluate(args: &ButtonArgs, catalog: &Catalog) -> Result<ButtonReport> {
    let dominant_color = args
        .dominant_color
        .as_deref()
        .map(|hex| {
            main_action::parse_color(hex).with_context(|| format!("Invalid colour {:?}", hex))
        })
        .transpose()?;

    let game = Game {
        id: args.game_id,
        title: String::new(),
        url: args.url.clone(),
        platforms: Vec::new(),
        may_download: args.may_download,
        can_be_bought: args.can_be_bought,
        dominant_color: args.dominant_color.clone(),
    };
    let cave = args.installed.then(|| Cave::for_game(game.id));

    let props = MainActionProps {
        game: &game,
        cave: cave.as_ref(),
        task: args.task.as_deref().map(TaskStatus::parse),
        action: if args.action == "open" {
            LaunchAction::Open
        } else {
            LaunchAction::Launch
        },
        progress: args.progress,
        cancellable: args.cancellable,
        animate: false,
        platform: args.platform.unwrap_or_else(Platform::current),
        platform_compatible: !args.incompatible,
        may_download: args.may_download,
        press_download: args.press_download,
        can_be_bought: args.can_be_bought,
        dominant_color,
    };

    let mut click = Vec::new();
    let render = main_action::present(&props, catalog);
    if matches!(render, main_action::MainAction::Button(_)) {
        main_action::on_click(&props, &mut click);
    }

    Ok(ButtonReport {
        render: render.summary(),
        click,
    })
}

fn format_report_text(report: &ButtonReport) -> String {
    let render = &report.render;
    let mut lines = Vec::new();

    match render.kind {
        "empty" => lines.push("(nothing rendered)".to_string()),
        "not_compatible" => lines.push(format!("Message: {}", render.label)),
        _ => {
            let icon = render.icon.map(|i| i.glyph()).unwrap_or("");
            lines.push(format!("Button: {} {}", icon, render.label));
            if let Some(key) = render.label_key {
                lines.push(format!("Label key: {}", key));
            }
            if render.cancel {
                lines.push("Cancellable".to_string());
            }
            if let Some(percent) = render.progress_percent {
                lines.push(format!("Progress: {}%", percent));
            }
            if let Some(ref color) = render.branded {
                lines.push(format!("Branded: {}", color));
            }
            if let Some(ref hint) = render.hint {
                lines.push(format!("Hint: {}", hint));
            }
        }
    }

    match report.click.first() {
        Some(call) => lines.push(format!("Click: {:?}", call)),
        None => lines.push("Click: nothing".to_string()),
    }

    lines.join("\n")
}
