mod commands;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "perch",
    version,
    about = "Overlay window and status ticker controllers for tiling window managers"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the default configuration file
    Init,
    /// Validate the configuration file
    Check(commands::check::CheckArgs),
    /// List the snapped overlay sizes for an aspect ratio
    Resolutions(commands::resolutions::ResolutionsArgs),
    /// Replay a session script against a simulated window manager
    Run(commands::run::RunArgs),
    /// Replay the built-in demo session
    Demo {
        /// Print the final snapshot as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Init => commands::init::execute(),
        Commands::Check(args) => commands::check::execute(&args),
        Commands::Resolutions(args) => commands::resolutions::execute(&args),
        Commands::Run(args) => commands::run::execute(&args),
        Commands::Demo { json } => commands::demo::execute(json),
    }
}
