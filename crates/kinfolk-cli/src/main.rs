#![forbid(unsafe_code)]

mod cmd;
mod output;

use clap::{CommandFactory, Parser, Subcommand};
use kinfolk_core::ErrorCode;
use kinfolk_core::config::resolve_config;
use output::{CliError, OutputMode, render_error};
use std::env;
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "kin: family trees, kinship titles, and diagram graphs",
    long_about = None
)]
struct Cli {
    /// Family file to read.
    #[arg(short, long, global = true, default_value = "family.json")]
    file: PathBuf,

    /// Output format.
    #[arg(long, global = true, value_enum)]
    format: Option<OutputMode>,

    /// Shorthand for `--format json`.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    /// Explicit output choice from flags, if any.
    fn format_flag(&self) -> Option<OutputMode> {
        self.format
            .or_else(|| self.json.then_some(OutputMode::Json))
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(next_help_heading = "Kinship")]
    Title(cmd::title::TitleArgs),

    #[command(next_help_heading = "Kinship")]
    Roster(cmd::roster::RosterArgs),

    #[command(next_help_heading = "Kinship")]
    Search(cmd::search::SearchArgs),

    #[command(next_help_heading = "Structure")]
    Generations(cmd::generations::GenerationsArgs),

    #[command(next_help_heading = "Structure")]
    Clusters(cmd::clusters::ClustersArgs),

    #[command(next_help_heading = "Structure")]
    Layout(cmd::layout::LayoutArgs),

    #[command(next_help_heading = "Maintenance")]
    Check(cmd::check::CheckArgs),

    #[command(
        next_help_heading = "Maintenance",
        about = "Generate shell completion scripts",
        long_about = "Generate shell completion scripts for supported shells.",
        after_help = "EXAMPLES:\n    # Generate bash completions\n    kin completions bash\n\n    # Generate zsh completions\n    kin completions zsh"
    )]
    Completions(cmd::completions::CompletionsArgs),
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("KINFOLK_LOG").unwrap_or_else(|_| {
        EnvFilter::new(if env::var("DEBUG").is_ok() {
            "kinfolk=debug,info"
        } else {
            "kinfolk=info,warn"
        })
    });

    let format = env::var("KINFOLK_LOG_FORMAT").unwrap_or_else(|_| "compact".to_string());

    let registry = tracing_subscriber::registry().with(filter);

    match format.as_str() {
        "json" => {
            registry
                .with(fmt::layer().json().with_ansi(false).with_writer(std::io::stderr))
                .init();
        }
        _ => {
            registry
                .with(fmt::layer().compact().with_writer(std::io::stderr))
                .init();
        }
    }
}

fn main() -> anyhow::Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let project_root = env::current_dir()?;
    let fallback = cli.format_flag().unwrap_or(OutputMode::Text);

    let config = match resolve_config(&project_root, cli.format_flag().map(OutputMode::as_str)) {
        Ok(config) => config,
        Err(e) => {
            render_error(
                fallback,
                &CliError::from_code(ErrorCode::ConfigParseError, format!("{e:#}")),
            )?;
            return Err(e);
        }
    };
    let output = OutputMode::from_resolved(&config.resolved_output);
    debug!(output = output.as_str(), file = %cli.file.display(), "resolved settings");

    if let Commands::Completions(args) = &cli.command {
        let mut command = Cli::command();
        return cmd::completions::run_completions(args.shell, &mut command);
    }

    let family = cmd::load_family(&cli.file, output)?;
    let project = &config.project;

    match &cli.command {
        Commands::Title(args) => cmd::title::run_title(args, &family, &project.kinship, output),
        Commands::Roster(args) => cmd::roster::run_roster(args, &family, &project.kinship, output),
        Commands::Search(args) => cmd::search::run_search(args, &family, output),
        Commands::Generations(args) => cmd::generations::run_generations(args, &family, output),
        Commands::Clusters(args) => cmd::clusters::run_clusters(args, &family, output),
        Commands::Layout(args) => cmd::layout::run_layout(args, &family, project, output),
        Commands::Check(args) => cmd::check::run_check(args, &family, output),
        Commands::Completions(_) => Ok(()),
    }
}
