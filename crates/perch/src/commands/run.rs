use std::path::PathBuf;

use clap::Args;

use perch_sim::Script;

/// Arguments for the `run` subcommand.
#[derive(Args)]
pub struct RunArgs {
    /// Script file to replay
    script: PathBuf,
    /// Print the final snapshot as JSON
    #[arg(long)]
    json: bool,
    /// Config file to use instead of ~/.config/perch/config.toml
    #[arg(long)]
    config: Option<PathBuf>,
}

pub fn execute(args: &RunArgs) {
    let script = match Script::load(&args.script) {
        Ok(script) => script,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };
    let config = super::load_config(args.config.as_deref());
    super::replay_and_print(config, &script, args.json);
}
