//! Configuration management CLI commands.

use crate::activation::ActivationMode;
use crate::cli::common::{CliError, CliResult};
use crate::config::{Config, ThemeMode};
use clap::{Args, Subcommand};
use serde::Serialize;

/// Configuration management commands
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommand,
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Display current configuration
    Show(ConfigShowArgs),
    /// Set configuration values
    Set(ConfigSetArgs),
}

/// Display current configuration
#[derive(Args, Debug)]
pub struct ConfigShowArgs {
    /// Output as JSON
    #[arg(long)]
    json: bool,
}

/// Set configuration values
#[derive(Args, Debug, Default)]
pub struct ConfigSetArgs {
    /// Activation mode (dwell, hover, immediate or click)
    #[arg(long, value_name = "MODE")]
    pub mode: Option<String>,

    /// Dwell time in milliseconds
    #[arg(long, value_name = "MS")]
    pub dwell_ms: Option<u32>,

    /// Voice passed to the speech engine
    #[arg(long, value_name = "VOICE")]
    pub voice: Option<String>,

    /// Speech engine program (say, spd-say, espeak-ng, espeak, or a custom command)
    #[arg(long, value_name = "PROGRAM")]
    pub engine: Option<String>,

    /// Speaking rate in words per minute
    #[arg(long, value_name = "WPM")]
    pub rate: Option<u32>,

    /// Theme mode (auto, light, or dark)
    #[arg(long, value_name = "MODE")]
    pub theme: Option<String>,
}

/// JSON-serializable configuration for output
#[derive(Serialize, Debug)]
struct ConfigOutput {
    path: Option<String>,
    activation: ActivationOutput,
    speech: SpeechOutput,
    ui: UiOutput,
}

#[derive(Serialize, Debug)]
struct ActivationOutput {
    mode: String,
    dwell_ms: u32,
}

#[derive(Serialize, Debug)]
struct SpeechOutput {
    #[serde(skip_serializing_if = "Option::is_none")]
    engine: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    voice: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    rate: Option<u32>,
}

#[derive(Serialize, Debug)]
struct UiOutput {
    theme: String,
}

impl ConfigArgs {
    /// Execute config subcommand
    pub fn execute(&self) -> CliResult<()> {
        match &self.command {
            ConfigCommand::Show(args) => args.execute(),
            ConfigCommand::Set(args) => args.execute(),
        }
    }
}

impl ConfigShowArgs {
    /// Execute show command
    pub fn execute(&self) -> CliResult<()> {
        let config = Config::load()
            .map_err(|e| CliError::validation(format!("Failed to load configuration: {e:#}")))?;

        if self.json {
            output_json(&config)?;
        } else {
            output_human_readable(&config);
        }

        Ok(())
    }
}

impl ConfigSetArgs {
    /// Returns `true` if no option was given.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.mode.is_none()
            && self.dwell_ms.is_none()
            && self.voice.is_none()
            && self.engine.is_none()
            && self.rate.is_none()
            && self.theme.is_none()
    }

    /// Applies the given options to `config` and validates the result.
    pub fn apply(&self, config: &mut Config) -> CliResult<()> {
        if let Some(mode) = &self.mode {
            let mode: ActivationMode = mode.parse().map_err(CliError::validation)?;
            config.activation = config.activation.with_mode(mode);
        }

        if let Some(dwell_ms) = self.dwell_ms {
            config.activation = config
                .activation
                .with_dwell_ms(dwell_ms)
                .map_err(|e| CliError::validation(e.to_string()))?;
        }

        if let Some(voice) = &self.voice {
            config.speech.voice = Some(voice.clone());
        }

        if let Some(engine) = &self.engine {
            config.speech.engine = Some(engine.clone());
        }

        if let Some(rate) = self.rate {
            config.speech.rate = Some(rate);
        }

        if let Some(theme) = &self.theme {
            let theme: ThemeMode = theme.parse().map_err(CliError::validation)?;
            config.ui.theme_mode = theme;
        }

        config
            .validate()
            .map_err(|e| CliError::validation(e.to_string()))
    }

    /// Execute set command
    pub fn execute(&self) -> CliResult<()> {
        if self.is_empty() {
            return Err(CliError::validation(
                "At least one configuration option must be specified: --mode, --dwell-ms, --voice, --engine, --rate, or --theme",
            ));
        }

        let mut config = Config::load()
            .map_err(|e| CliError::validation(format!("Failed to load configuration: {e:#}")))?;

        self.apply(&mut config)?;

        config
            .save()
            .map_err(|e| CliError::io(format!("Failed to save configuration: {e:#}")))?;

        println!("Configuration updated successfully.");

        Ok(())
    }
}

fn theme_name(mode: ThemeMode) -> String {
    format!("{mode:?}").to_lowercase()
}

/// Output configuration in JSON format
fn output_json(config: &Config) -> CliResult<()> {
    let output = ConfigOutput {
        path: Config::config_file_path()
            .ok()
            .map(|p| p.to_string_lossy().to_string()),
        activation: ActivationOutput {
            mode: config.activation.mode().to_string(),
            dwell_ms: config.activation.dwell_ms(),
        },
        speech: SpeechOutput {
            engine: config.speech.engine.clone(),
            voice: config.speech.voice.clone(),
            rate: config.speech.rate,
        },
        ui: UiOutput {
            theme: theme_name(config.ui.theme_mode),
        },
    };

    let json = serde_json::to_string_pretty(&output)
        .map_err(|e| CliError::io(format!("Failed to serialize configuration to JSON: {e}")))?;

    println!("{json}");
    Ok(())
}

/// Output configuration in human-readable format
fn output_human_readable(config: &Config) {
    println!("AAC Board Configuration");
    println!("=======================");
    println!();

    if let Ok(path) = Config::config_file_path() {
        println!("File: {}", path.display());
        println!();
    }

    println!("Activation:");
    println!("  Mode: {}", config.activation.mode().label());
    println!("  Dwell Time: {} ms", config.activation.dwell_ms());
    println!();

    println!("Speech:");
    println!(
        "  Engine: {}",
        config.speech.engine.as_deref().unwrap_or("(auto-detect)")
    );
    println!(
        "  Voice: {}",
        config.speech.voice.as_deref().unwrap_or("(engine default)")
    );
    match config.speech.rate {
        Some(rate) => println!("  Rate: {rate} wpm"),
        None => println!("  Rate: (engine default)"),
    }
    println!();

    println!("UI:");
    println!("  Theme Mode: {}", theme_name(config.ui.theme_mode));
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_mode_and_dwell() {
        let mut config = Config::default();
        let args = ConfigSetArgs {
            mode: Some("click".to_string()),
            dwell_ms: Some(1500),
            ..ConfigSetArgs::default()
        };
        args.apply(&mut config).unwrap();

        assert_eq!(config.activation.mode(), ActivationMode::Immediate);
        assert_eq!(config.activation.dwell_ms(), 1500);
    }

    #[test]
    fn test_apply_rejects_bad_values() {
        let mut config = Config::default();

        let args = ConfigSetArgs {
            dwell_ms: Some(0),
            ..ConfigSetArgs::default()
        };
        assert_eq!(args.apply(&mut config).unwrap_err().exit_code(), 1);

        let args = ConfigSetArgs {
            mode: Some("blink".to_string()),
            ..ConfigSetArgs::default()
        };
        assert!(args.apply(&mut config).is_err());

        let args = ConfigSetArgs {
            theme: Some("sepia".to_string()),
            ..ConfigSetArgs::default()
        };
        assert!(args.apply(&mut config).is_err());
    }

    #[test]
    fn test_apply_speech_settings() {
        let mut config = Config::default();
        let args = ConfigSetArgs {
            voice: Some("en-gb".to_string()),
            engine: Some("espeak-ng".to_string()),
            rate: Some(150),
            theme: Some("light".to_string()),
            ..ConfigSetArgs::default()
        };
        args.apply(&mut config).unwrap();

        assert_eq!(config.speech.voice.as_deref(), Some("en-gb"));
        assert_eq!(config.speech.engine.as_deref(), Some("espeak-ng"));
        assert_eq!(config.speech.rate, Some(150));
        assert_eq!(config.ui.theme_mode, ThemeMode::Light);
    }

    #[test]
    fn test_empty_set_detected() {
        assert!(ConfigSetArgs::default().is_empty());
    }
}
