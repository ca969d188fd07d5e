//! AAC Board - terminal communication board with text-to-speech tiles
//!
//! Without a subcommand the board is launched in the terminal. Subcommands
//! manage configuration and test the speech setup.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::{error, info};

use aacboard::cli::config::ConfigSetArgs;
use aacboard::cli::{CliError, CliResult, ConfigArgs, SayArgs, VoicesArgs};
use aacboard::config::Config;
use aacboard::constants::{APP_BINARY_NAME, APP_NAME};
use aacboard::speech::{SpeechService, SystemSpeaker};
use aacboard::{logging, tui};

/// AAC Board - speak word tiles by hovering or clicking
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// Activation mode for this session (dwell, hover, immediate or click)
    #[arg(long, value_name = "MODE")]
    mode: Option<String>,

    /// Dwell time in milliseconds for this session
    #[arg(long, value_name = "MS")]
    dwell_ms: Option<u32>,

    /// Voice for this session
    #[arg(long, value_name = "VOICE")]
    voice: Option<String>,

    /// Theme for this session (auto, light or dark)
    #[arg(long, value_name = "MODE")]
    theme: Option<String>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Log file (defaults to aacboard.log in the config directory)
    #[arg(long, value_name = "PATH", global = true)]
    log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show or change configuration
    Config(ConfigArgs),
    /// List voices offered by the speech engine
    Voices(VoicesArgs),
    /// Speak a phrase once and exit
    Say(SayArgs),
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = logging::init(cli.verbose, cli.log_file.as_deref()) {
        eprintln!("Warning: logging disabled: {e:#}");
    }

    let result = match &cli.command {
        Some(Command::Config(args)) => args.execute(),
        Some(Command::Voices(args)) => args.execute(),
        Some(Command::Say(args)) => args.execute(),
        None => run_board(&cli),
    };

    if let Err(e) = result {
        error!("{e}");
        eprintln!("Error: {e}");
        if e.code == aacboard::cli::ExitCode::ValidationError {
            eprintln!();
            eprintln!("For more options, run:");
            eprintln!("  {APP_BINARY_NAME} --help");
        }
        std::process::exit(e.exit_code());
    }
}

/// Loads configuration, applies session overrides and runs the board.
fn run_board(cli: &Cli) -> CliResult<()> {
    let config_path = Config::config_file_path()
        .map_err(|e| CliError::io(format!("Failed to locate configuration: {e:#}")))?;
    let mut config = Config::load_from(&config_path)
        .map_err(|e| CliError::validation(format!("Failed to load configuration: {e:#}")))?;

    let overrides = ConfigSetArgs {
        mode: cli.mode.clone(),
        dwell_ms: cli.dwell_ms,
        voice: cli.voice.clone(),
        theme: cli.theme.clone(),
        ..ConfigSetArgs::default()
    };
    overrides.apply(&mut config)?;

    info!(
        version = env!("CARGO_PKG_VERSION"),
        mode = %config.activation.mode(),
        dwell_ms = config.activation.dwell_ms(),
        "starting {APP_NAME}"
    );

    let speech = SpeechService::new(Box::new(SystemSpeaker::from_config(&config.speech)));
    let mut state = tui::AppState::new(config, speech, Some(config_path));

    run_terminal(&mut state).map_err(|e| CliError::io(format!("{e:#}")))
}

fn run_terminal(state: &mut tui::AppState) -> Result<()> {
    let mut terminal = tui::setup_terminal()?;

    let result = tui::run_tui(state, &mut terminal);

    // Restore terminal even if the loop failed
    tui::restore_terminal(terminal)?;

    result
}
