// src/bin/consola.rs

//! Demo application showing the commands, components and widgets.
//!
//! `CONSOLA_THEME` picks a theme, `CONSOLA_FONTS_DIR` adds a font directory on
//! top of the user's `<config_dir>/consola/fonts`.

use anyhow::Result;
use colored::Colorize;
use consola::components::IconChoice;
use consola::constants::{ENV_FONTS_DIR, ENV_THEME};
use consola::ui::ChartKind;
use consola::{Application, ArgumentDef, Command, CommandDefinition, Context, Hook, OptionDef, Value};
use serde_json::json;
use std::env;
use std::path::Path;
use std::time::Duration;

// --- Demo commands ---

#[derive(Default)]
struct Greet;

impl Command for Greet {
    fn definition(&self) -> CommandDefinition {
        CommandDefinition::new("greet")
            .group("Basics")
            .alias("hi")
            .description("Greets someone")
            .argument(ArgumentDef::new("name", "Who to greet").with_default("world"))
            .option(OptionDef::new("-y, --yell", "Greet in capitals"))
    }

    fn handle(&mut self, ctx: &mut Context<'_>) -> anyhow::Result<Value> {
        let name = ctx.parameter_str("name").unwrap_or_default();
        let greeting = format!("Hello, {}!", name);
        if ctx.flag("yell") {
            ctx.success(&greeting.to_uppercase());
        } else {
            ctx.success(&greeting);
        }
        Ok(json!(0))
    }
}

#[derive(Default)]
struct Status;

impl Command for Status {
    fn definition(&self) -> CommandDefinition {
        CommandDefinition::new("status")
            .group("Basics")
            .description("Shows the components and a sample table")
    }

    fn handle(&mut self, ctx: &mut Context<'_>) -> anyhow::Result<Value> {
        ctx.alert().info("All systems nominal.", Some("Status"), IconChoice::Default);
        ctx.badge()
            .success("api is up", Some("OK"), IconChoice::None)
            .warning("disk at 81%", Some("WARN"), IconChoice::None);
        ctx.new_line().table(
            &["Service", "State", "Uptime"],
            &[
                vec!["api", "running", "12d"],
                vec!["worker", "running", "3h"],
                vec!["cron", "stopped", "-"],
            ],
        );
        ctx.logger()?.info("status printed");
        Ok(json!(0))
    }
}

#[derive(Default)]
struct Banner;

impl Command for Banner {
    fn definition(&self) -> CommandDefinition {
        CommandDefinition::new("banner")
            .group("Art")
            .description("Renders text as ASCII art")
            .argument(ArgumentDef::new("text", "Text to render").with_default("consola"))
            .option(OptionDef::new("-f, --font <name>", "Font to use").with_default("standard"))
    }

    fn handle(&mut self, ctx: &mut Context<'_>) -> anyhow::Result<Value> {
        let text = ctx.parameter_str("text").unwrap_or_default();
        let font = ctx.parameter_str("font").unwrap_or_default();
        ctx.banner(&text, '*', Some(font.as_str()))?;
        Ok(json!(0))
    }
}

#[derive(Default)]
struct Fonts;

impl Command for Fonts {
    fn definition(&self) -> CommandDefinition {
        CommandDefinition::new("fonts")
            .group("Art")
            .description("Lists the available fonts")
    }

    fn handle(&mut self, ctx: &mut Context<'_>) -> anyhow::Result<Value> {
        let fonts = ctx.available_fonts();
        ctx.bullet_list(&fonts, Some("Fonts"), "info");
        Ok(json!(0))
    }
}

#[derive(Default)]
struct Build;

impl Command for Build {
    fn definition(&self) -> CommandDefinition {
        CommandDefinition::new("build")
            .group("Work")
            .description("Simulates a build with a spinner and a progress bar")
            .option(OptionDef::new("--steps <count>", "Number of steps").with_default(5))
    }

    fn handle(&mut self, ctx: &mut Context<'_>) -> anyhow::Result<Value> {
        let steps: usize = ctx.parameter_str("steps").unwrap_or_default().parse()?;
        ctx.with_spinner("Resolving dependencies", || {
            std::thread::sleep(Duration::from_millis(400));
        });
        let units: Vec<String> = (1..=steps).map(|i| format!("unit {}", i)).collect();
        ctx.with_progress_bar(units, |unit, bar| {
            std::thread::sleep(Duration::from_millis(100));
            bar.advance_with_message(0, &format!("compiled {}", unit));
        });
        ctx.success("Build finished");
        Ok(json!(0))
    }
}

#[derive(Default)]
struct Report;

impl Command for Report {
    fn definition(&self) -> CommandDefinition {
        CommandDefinition::new("report")
            .group("Work")
            .description("Prints a chart of the build output of the last week")
            .option(OptionDef::new("-p, --pie", "Draw a pie chart instead of bars"))
    }

    fn handle(&mut self, ctx: &mut Context<'_>) -> anyhow::Result<Value> {
        let data = [("Mon", 12.0), ("Tue", 7.5), ("Wed", 15.0), ("Thu", 3.0), ("Fri", 9.0)];
        let kind = if ctx.flag("pie") { ChartKind::Pie } else { ChartKind::Bar };
        ctx.chart(&data, kind);

        let summary = ctx.capture_output("status", Default::default(), Default::default())?;
        let lines = summary.lines().count();
        ctx.comment(&format!("(status output: {} lines, cached)", lines));
        Ok(json!(0))
    }
}

// --- Entry point ---

fn build_app() -> Result<Application> {
    let mut app = Application::new("consola", env!("CARGO_PKG_VERSION"))
        .headtitle(format!("consola demo {}", env!("CARGO_PKG_VERSION")))
        .show_footer(true)
        .logger("demo")
        .hook(Hook::Before, |_, command| {
            log::debug!("Running '{}'", command.definition().name);
        })
        .command::<Greet>()?
        .command::<Status>()?
        .command::<Banner>()?
        .command::<Fonts>()?
        .command::<Build>()?
        .command::<Report>()?;

    if let Ok(theme) = env::var(ENV_THEME) {
        app = app.theme(&theme)?;
    }
    let loaded = app.console().fonts().load_user_fonts();
    log::debug!("Loaded {} user fonts", loaded);
    if let Ok(dir) = env::var(ENV_FONTS_DIR) {
        let loaded = app.console().fonts().load_dir(Path::new(&dir));
        log::debug!("Loaded {} fonts from '{}'", loaded, dir);
    }
    Ok(app)
}

fn main() {
    env_logger::init();

    match build_app() {
        Ok(mut app) => std::process::exit(app.handle(env::args().skip(1).collect())),
        Err(e) => {
            eprintln!("\n{}: {}", "Error".red().bold(), e);
            std::process::exit(1);
        }
    }
}
