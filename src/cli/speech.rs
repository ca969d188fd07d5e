//! Speech CLI commands: list voices and speak a phrase.

use clap::Args;

use crate::cli::common::{CliError, CliResult};
use crate::config::Config;
use crate::speech::{Speaker, SystemSpeaker};

/// List voices offered by the speech engine
#[derive(Args, Debug)]
pub struct VoicesArgs {
    /// Speech engine to query instead of the configured or detected one
    #[arg(long, value_name = "PROGRAM")]
    engine: Option<String>,
}

/// Speak a phrase once and exit
#[derive(Args, Debug)]
pub struct SayArgs {
    /// Text to speak
    #[arg(value_name = "TEXT", required = true, num_args = 1..)]
    text: Vec<String>,

    /// Voice to use for this phrase
    #[arg(long, value_name = "VOICE")]
    voice: Option<String>,
}

fn load_config() -> CliResult<Config> {
    Config::load().map_err(|e| CliError::validation(format!("Failed to load configuration: {e:#}")))
}

impl VoicesArgs {
    /// Execute voices command
    pub fn execute(&self) -> CliResult<()> {
        let mut config = load_config()?;
        if let Some(engine) = &self.engine {
            config.speech.engine = Some(engine.clone());
        }

        let speaker = SystemSpeaker::from_config(&config.speech);
        let engine = speaker.engine().ok_or_else(|| {
            CliError::io("No speech engine found (looked for say, spd-say, espeak-ng, espeak)")
        })?;

        let voices = speaker
            .list_voices()
            .map_err(|e| CliError::io(format!("Failed to list voices: {e:#}")))?;

        println!("Voices for {}:", engine.program());
        if voices.is_empty() {
            println!("  (none reported)");
        }
        for voice in voices {
            println!("  {voice}");
        }
        Ok(())
    }
}

impl SayArgs {
    /// The phrase to speak, words joined by single spaces.
    #[must_use]
    pub fn phrase(&self) -> String {
        self.text.join(" ").trim().to_string()
    }

    /// Execute say command
    pub fn execute(&self) -> CliResult<()> {
        let phrase = self.phrase();
        if phrase.is_empty() {
            return Err(CliError::validation("Nothing to say"));
        }

        let mut config = load_config()?;
        if let Some(voice) = &self.voice {
            config.speech.voice = Some(voice.clone());
        }

        let speaker = SystemSpeaker::from_config(&config.speech);
        speaker
            .speak(&phrase)
            .map_err(|e| CliError::io(format!("Speech failed: {e:#}")))?;
        speaker
            .wait()
            .map_err(|e| CliError::io(format!("Speech failed: {e:#}")))?;
        Ok(())
    }
}
