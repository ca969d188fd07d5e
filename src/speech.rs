//! Text-to-speech collaborator and spoken-phrase history.
//!
//! Speech is fire-and-forget: the platform engine is spawned as a child
//! process and never waited on. Failures are logged and swallowed so that an
//! activation always counts as performed.

use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use std::cell::RefCell;
use std::collections::VecDeque;
use std::env;
use std::path::PathBuf;
use std::process::{Child, Command, Stdio};
use tracing::{debug, info, warn};

use crate::config::SpeechConfig;
use crate::constants::HISTORY_LEN;

/// Something that can say text out loud.
pub trait Speaker {
    /// Starts speaking `text`. Must not block until speech finishes.
    fn speak(&self, text: &str) -> Result<()>;

    /// Releases resources of utterances that have finished.
    fn reap(&self) {}

    /// Voices the speaker can switch to.
    fn voices(&self) -> Result<Vec<String>> {
        Ok(Vec::new())
    }

    /// Uses `voice` for later utterances; `None` means the engine default.
    fn set_voice(&mut self, _voice: Option<String>) {}
}

/// Known speech engines and how to drive them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpeechEngine {
    /// macOS `say`
    Say,
    /// speech-dispatcher client `spd-say`
    SpdSay,
    /// `espeak-ng`
    EspeakNg,
    /// classic `espeak`
    Espeak,
    /// Any other program; the text is passed as the only argument
    Custom(String),
}

impl SpeechEngine {
    /// Engines looked for on `PATH`, in order of preference.
    const DETECTION_ORDER: [Self; 4] = [Self::Say, Self::SpdSay, Self::EspeakNg, Self::Espeak];

    /// Maps a program name to an engine.
    #[must_use]
    pub fn from_program(program: &str) -> Self {
        match program {
            "say" => Self::Say,
            "spd-say" => Self::SpdSay,
            "espeak-ng" => Self::EspeakNg,
            "espeak" => Self::Espeak,
            other => Self::Custom(other.to_string()),
        }
    }

    /// Program name to execute.
    #[must_use]
    pub fn program(&self) -> &str {
        match self {
            Self::Say => "say",
            Self::SpdSay => "spd-say",
            Self::EspeakNg => "espeak-ng",
            Self::Espeak => "espeak",
            Self::Custom(program) => program,
        }
    }

    /// Finds the first known engine available on `PATH`.
    #[must_use]
    pub fn detect() -> Option<Self> {
        Self::DETECTION_ORDER
            .into_iter()
            .find(|engine| find_on_path(engine.program()).is_some())
    }

    /// Arguments for speaking `text`.
    #[must_use]
    pub fn speak_args(&self, text: &str, voice: Option<&str>, rate: Option<u32>) -> Vec<String> {
        let mut args = Vec::new();
        match self {
            Self::Say => {
                if let Some(voice) = voice {
                    args.extend(["-v".to_string(), voice.to_string()]);
                }
                if let Some(rate) = rate {
                    args.extend(["-r".to_string(), rate.to_string()]);
                }
            }
            Self::SpdSay => {
                if let Some(voice) = voice {
                    args.extend(["-y".to_string(), voice.to_string()]);
                }
            }
            Self::EspeakNg | Self::Espeak => {
                if let Some(voice) = voice {
                    args.extend(["-v".to_string(), voice.to_string()]);
                }
                if let Some(rate) = rate {
                    args.extend(["-s".to_string(), rate.to_string()]);
                }
            }
            Self::Custom(_) => {}
        }
        // Words like "-5" must not be read as options
        if !matches!(self, Self::Custom(_)) {
            args.push("--".to_string());
        }
        args.push(text.to_string());
        args
    }

    /// Arguments that make the engine print its voices, if it supports that.
    #[must_use]
    pub fn list_voices_args(&self) -> Option<Vec<&'static str>> {
        match self {
            Self::Say => Some(vec!["-v", "?"]),
            Self::SpdSay => Some(vec!["-L"]),
            Self::EspeakNg | Self::Espeak => Some(vec!["--voices"]),
            Self::Custom(_) => None,
        }
    }

    /// Extracts voice names usable with `-v`/`-y` from a voice listing.
    #[must_use]
    pub fn parse_voices(&self, listing: &str) -> Vec<String> {
        let mut voices: Vec<String> = Vec::new();
        for line in listing.lines() {
            let fields: Vec<&str> = line.split_whitespace().collect();
            let name = match self {
                // "Good News   en_US    # comment": name may contain spaces
                Self::Say => {
                    let before_comment = line.split('#').next().unwrap_or_default();
                    let words: Vec<&str> = before_comment.split_whitespace().collect();
                    match words.split_last() {
                        Some((_locale, name)) if !name.is_empty() => Some(name.join(" ")),
                        _ => None,
                    }
                }
                Self::SpdSay => fields
                    .first()
                    .filter(|first| **first != "NAME")
                    .map(|first| (*first).to_string()),
                // "Pty Language Age/Gender VoiceName File": the language selects the voice
                Self::EspeakNg | Self::Espeak => match fields.as_slice() {
                    ["Pty", ..] => None,
                    [_, language, ..] => Some((*language).to_string()),
                    _ => None,
                },
                Self::Custom(_) => None,
            };
            if let Some(name) = name {
                if !voices.contains(&name) {
                    voices.push(name);
                }
            }
        }
        voices
    }
}

fn find_on_path(program: &str) -> Option<PathBuf> {
    let paths = env::var_os("PATH")?;
    env::split_paths(&paths)
        .map(|dir| dir.join(program))
        .find(|candidate| candidate.is_file())
}

/// Speaks through the platform's speech command.
#[derive(Debug)]
pub struct SystemSpeaker {
    engine: Option<SpeechEngine>,
    voice: Option<String>,
    rate: Option<u32>,
    children: RefCell<Vec<Child>>,
}

impl SystemSpeaker {
    /// Builds a speaker from config, detecting an engine if none is configured.
    #[must_use]
    pub fn from_config(config: &SpeechConfig) -> Self {
        let engine = config
            .engine
            .as_deref()
            .map(SpeechEngine::from_program)
            .or_else(SpeechEngine::detect);

        match &engine {
            Some(engine) => info!(engine = engine.program(), "using speech engine"),
            None => warn!("no speech engine found on PATH; tiles will not be spoken"),
        }

        Self {
            engine,
            voice: config.voice.clone(),
            rate: config.rate,
            children: RefCell::new(Vec::new()),
        }
    }

    /// Engine in use, if any.
    #[must_use]
    pub const fn engine(&self) -> Option<&SpeechEngine> {
        self.engine.as_ref()
    }

    /// Lists the voice names reported by the engine.
    pub fn list_voices(&self) -> Result<Vec<String>> {
        let engine = self
            .engine
            .as_ref()
            .context("No speech engine available")?;
        let args = engine.list_voices_args().context(format!(
            "Speech engine '{}' cannot list voices",
            engine.program()
        ))?;

        let output = Command::new(engine.program())
            .args(args)
            .output()
            .context(format!("Failed to run {}", engine.program()))?;

        if !output.status.success() {
            anyhow::bail!(
                "{} exited with {}: {}",
                engine.program(),
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            );
        }

        Ok(engine.parse_voices(&String::from_utf8_lossy(&output.stdout)))
    }

    /// Waits for every spawned utterance to finish.
    pub fn wait(&self) -> Result<()> {
        for mut child in self.children.borrow_mut().drain(..) {
            child.wait().context("Failed to wait for speech engine")?;
        }
        Ok(())
    }
}

impl Speaker for SystemSpeaker {
    fn speak(&self, text: &str) -> Result<()> {
        let engine = self
            .engine
            .as_ref()
            .context("Speech synthesis is not supported in this environment")?;

        let child = Command::new(engine.program())
            .args(engine.speak_args(text, self.voice.as_deref(), self.rate))
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .context(format!("Failed to start {}", engine.program()))?;

        self.children.borrow_mut().push(child);
        Ok(())
    }

    fn reap(&self) {
        self.children
            .borrow_mut()
            .retain_mut(|child| matches!(child.try_wait(), Ok(None)));
    }

    fn voices(&self) -> Result<Vec<String>> {
        self.list_voices()
    }

    fn set_voice(&mut self, voice: Option<String>) {
        info!(voice = voice.as_deref().unwrap_or("(default)"), "voice changed");
        self.voice = voice;
    }
}

/// One entry of the spoken-phrase history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpokenPhrase {
    /// Text that was spoken
    pub text: String,
    /// When it was spoken
    pub at: DateTime<Local>,
}

/// Most recent spoken phrases, newest first.
#[derive(Debug, Clone)]
pub struct SpeechHistory {
    entries: VecDeque<SpokenPhrase>,
    capacity: usize,
}

impl SpeechHistory {
    /// Creates an empty history holding at most `capacity` entries.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Records a phrase, dropping the oldest one when full.
    pub fn push(&mut self, text: &str) {
        if self.capacity == 0 {
            return;
        }
        if self.entries.len() == self.capacity {
            self.entries.pop_back();
        }
        self.entries.push_front(SpokenPhrase {
            text: text.to_string(),
            at: Local::now(),
        });
    }

    /// Newest phrase.
    #[must_use]
    pub fn last(&self) -> Option<&SpokenPhrase> {
        self.entries.front()
    }

    /// All phrases, newest first.
    pub fn iter(&self) -> impl Iterator<Item = &SpokenPhrase> {
        self.entries.iter()
    }

    /// Number of recorded phrases.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing has been spoken yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for SpeechHistory {
    fn default() -> Self {
        Self::new(HISTORY_LEN)
    }
}

/// Speaker plus history; the only way the rest of the app produces speech.
pub struct SpeechService {
    speaker: Box<dyn Speaker>,
    history: SpeechHistory,
}

impl SpeechService {
    /// Wraps a speaker.
    #[must_use]
    pub fn new(speaker: Box<dyn Speaker>) -> Self {
        Self {
            speaker,
            history: SpeechHistory::default(),
        }
    }

    /// Speaks `text`. Engine failures are logged, never returned.
    pub fn say(&mut self, text: &str) {
        let text = text.trim();
        if text.is_empty() {
            return;
        }

        debug!(text, "speaking");
        if let Err(e) = self.speaker.speak(text) {
            warn!(text, "speech failed: {e:#}");
        }
        self.history.push(text);
    }

    /// Reaps finished utterances.
    pub fn reap(&self) {
        self.speaker.reap();
    }

    /// Voices offered by the speaker. Listing failures yield an empty list.
    #[must_use]
    pub fn voices(&self) -> Vec<String> {
        self.speaker.voices().unwrap_or_else(|e| {
            warn!("could not list voices: {e:#}");
            Vec::new()
        })
    }

    /// Switches the voice used for later phrases.
    pub fn set_voice(&mut self, voice: Option<String>) {
        self.speaker.set_voice(voice);
    }

    /// Spoken-phrase history.
    #[must_use]
    pub const fn history(&self) -> &SpeechHistory {
        &self.history
    }
}

impl std::fmt::Debug for SpeechService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpeechService")
            .field("history", &self.history)
            .finish_non_exhaustive()
    }
}
