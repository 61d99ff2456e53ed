pub mod check;
pub mod demo;
pub mod init;
pub mod resolutions;
pub mod run;

use std::path::Path;

use perch_core::{Config, config};
use perch_sim::{Script, Snapshot};

/// Loads the config from `path`, or from the default location.
///
/// An explicit path must exist and parse; the default location falls
/// back to defaults the way the controllers do at startup.
fn load_config(path: Option<&Path>) -> Config {
    match path {
        Some(path) => match config::try_load_from(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Error: {e}");
                std::process::exit(1);
            }
        },
        None => config::load(),
    }
}

/// Replays `script` and prints the result, exiting non-zero on failure.
fn replay_and_print(config: Config, script: &Script, json: bool) {
    perch_core::log::init(&config.logging);
    perch_core::log_info!("replaying {} steps", script.steps.len());

    let snapshot = match perch_sim::replay(config, script) {
        Ok(snapshot) => snapshot,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };
    print_snapshot(&snapshot, json);
}

fn print_snapshot(snapshot: &Snapshot, json: bool) {
    if !json {
        println!("{snapshot}");
        return;
    }
    match snapshot.to_json() {
        Ok(text) => println!("{text}"),
        Err(e) => {
            eprintln!("Error: could not serialize snapshot: {e}");
            std::process::exit(1);
        }
    }
}
