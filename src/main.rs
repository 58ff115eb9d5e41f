//! castsvg command-line interface

mod commands;

use std::path::PathBuf;

use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};
use tracing::Level;

#[cfg(not(feature = "release"))]
const VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("VERGEN_GIT_SHA"),
    " ",
    env!("CASTSVG_BUILD_DATE"),
    ")"
);

#[cfg(feature = "release")]
const VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("CASTSVG_BUILD_DATE"),
    ")"
);

#[derive(Parser)]
#[command(name = "castsvg")]
#[command(version = VERSION)]
#[command(about = "Render recorded terminal sessions as animated SVG images")]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a screen snapshot stream to an animated SVG
    Render {
        /// Snapshot stream (JSON lines), `-` for stdin
        input: PathBuf,

        /// Output file, stdout when omitted or `-`
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Configuration file (TOML)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Built-in template name or template file, overrides the config
        #[arg(short, long)]
        template: Option<String>,

        /// Check the result against the SVG 1.1 grammar before writing it
        #[arg(long)]
        validate: bool,
    },

    /// Check an SVG file against the SVG 1.1 grammar
    Validate {
        /// SVG file to check
        file: PathBuf,
    },

    /// List built-in templates
    Templates,

    /// Inspect configuration
    #[command(subcommand)]
    Config(ConfigCommands),
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Show the effective configuration as TOML
    Show {
        /// Configuration file (TOML)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        _ => Level::DEBUG,
    };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[cfg(not(tarpaulin_include))]
fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Render {
            input,
            output,
            config,
            template,
            validate,
        } => commands::render::handle(
            &input,
            output.as_deref(),
            config.as_deref(),
            template.as_deref(),
            validate,
        ),
        Commands::Validate { file } => commands::validate::handle(&file),
        Commands::Templates => commands::templates::handle(),
        Commands::Config(ConfigCommands::Show { config }) => {
            commands::config::handle_show(config.as_deref())
        }
    }
}
