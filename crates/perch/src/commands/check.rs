use std::path::PathBuf;

use clap::Args;

use perch_core::{Config, Context, Rect, config};

const OK: &str = "\x1b[32m[ok]\x1b[0m";
const WARN: &str = "\x1b[33m[warn]\x1b[0m";
const FAIL: &str = "\x1b[31m[fail]\x1b[0m";

/// Screen used to preview the initial overlay size.
const PREVIEW_SCREEN: Rect = Rect {
    x: 0,
    y: 0,
    width: 1920,
    height: 1080,
};

/// Arguments for the `check` subcommand.
#[derive(Args)]
pub struct CheckArgs {
    /// Config file to check instead of ~/.config/perch/config.toml
    #[arg(long)]
    config: Option<PathBuf>,
}

pub fn execute(args: &CheckArgs) {
    let Some(path) = args.config.clone().or_else(config::config_path) else {
        println!("  {FAIL} Could not determine config path");
        std::process::exit(1);
    };

    let config = if path.exists() {
        match config::try_load_from(&path) {
            Ok(config) => {
                println!("  {OK} {} is valid", path.display());
                config
            }
            Err(e) => {
                println!("  {FAIL} {e}");
                std::process::exit(1);
            }
        }
    } else if args.config.is_some() {
        println!("  {FAIL} {} not found", path.display());
        std::process::exit(1);
    } else {
        println!("  {WARN} config.toml not found (using defaults)");
        Config::default()
    };

    let context = match Context::new(config) {
        Ok(context) => context,
        Err(e) => {
            println!("  {FAIL} {e}");
            std::process::exit(1);
        }
    };

    let overlay = &context.config().overlay;
    let controller = context.overlay();
    println!(
        "  {OK} {} resolutions for {}:{} up to width {}",
        controller.resolutions().len(),
        overlay.aspect_width,
        overlay.aspect_height,
        overlay.max_width
    );
    let initial = controller
        .resolutions()
        .fit(controller.size_ratio(), &PREVIEW_SCREEN);
    println!(
        "  {OK} Initial overlay on a {}x{} screen: {}x{}",
        PREVIEW_SCREEN.width, PREVIEW_SCREEN.height, initial.width, initial.height
    );
    println!(
        "  {OK} Auto-overlay classes: {}",
        if overlay.auto_classes.is_empty() {
            "(none)".to_string()
        } else {
            overlay.auto_classes.join(", ")
        }
    );
}
