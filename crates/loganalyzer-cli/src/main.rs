use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use loganalyzer_cli::{OutputFormat, commands, logging, settings};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "log-analyzer")]
#[command(author, version, about, long_about = None)]
#[command(
    about = "Report the slowest URLs of an nginx access log",
    long_about = "Log Analyzer finds the latest rotated nginx ui access log, aggregates request \
                  times per URL and renders the slowest URLs into an HTML report."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Path to the JSON configuration file [default: config.json if present]
    #[arg(short, long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output format (json, table, pretty)
    #[arg(short, long, global = true, value_enum, default_value = "pretty")]
    format: OutputFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the HTML report for the latest log in LOG_DIR (default)
    Report,

    /// Print per-URL statistics for a single log file
    Stats {
        /// Path to the log file (plain or .gz)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Number of URLs to show [default: REPORT_SIZE]
        #[arg(long)]
        top: Option<usize>,
    },

    /// Generate shell completion scripts
    #[command(after_help = "SUPPORTED SHELLS:\n  bash, zsh, fish, powershell, elvish\n\n\
                            INSTALLATION:\n  log-analyzer completion --shell bash >> ~/.bashrc\n  \
                            log-analyzer completion --shell zsh > ~/.zfunc/_log-analyzer")]
    Completion {
        /// Shell to generate the script for
        #[arg(long, value_enum)]
        shell: Shell,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(Commands::Completion { shell }) = &cli.command {
        return commands::completion::execute(*shell, &mut Cli::command());
    }

    // LOG_FILE lives in the config, so config errors can only go to stderr
    let config = match settings::load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            logging::init_logging(cli.verbose, None)?;
            tracing::error!("Failed to load configuration: {:#}", e);
            return Err(e);
        }
    };

    logging::init_logging(cli.verbose, config.log_file.as_deref())?;
    tracing::debug!("Loaded configuration: {:?}", config);

    let result = match cli.command.unwrap_or(Commands::Report) {
        Commands::Report => commands::report::execute(&config),
        Commands::Stats { file, top } => commands::stats::execute(
            &file,
            top.unwrap_or(config.report_size),
            &config.methods,
            cli.format,
        ),
        Commands::Completion { .. } => unreachable!("handled before loading config"),
    };

    if let Err(e) = &result {
        tracing::error!("Unexpected error occurred: {:#}", e);
    }

    result
}
