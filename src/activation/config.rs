//! Activation mode and dwell time, plus the shared handle that carries them.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::cell::Cell;
use std::fmt;
use std::rc::Rc;
use std::str::FromStr;
use std::time::Duration;

use crate::constants::DEFAULT_DWELL_MS;

/// How an element is activated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ActivationMode {
    /// Pointer rests over the element for the dwell time
    #[default]
    Dwell,
    /// Primary click or tap
    Immediate,
}

impl ActivationMode {
    /// Returns the other mode.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Dwell => Self::Immediate,
            Self::Immediate => Self::Dwell,
        }
    }

    /// Short label for the status bar and config panel.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Dwell => "Hover (dwell)",
            Self::Immediate => "Click",
        }
    }
}

impl fmt::Display for ActivationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Dwell => write!(f, "dwell"),
            Self::Immediate => write!(f, "immediate"),
        }
    }
}

impl FromStr for ActivationMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "dwell" | "hover" => Ok(Self::Dwell),
            "immediate" | "click" => Ok(Self::Immediate),
            other => Err(format!(
                "unknown activation mode '{other}' (expected dwell, hover, immediate or click)"
            )),
        }
    }
}

/// Process-wide activation settings.
///
/// `dwell_ms` is always positive; both constructors reject zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivationConfig {
    mode: ActivationMode,
    dwell_ms: u32,
}

impl ActivationConfig {
    /// Creates a validated configuration.
    pub fn new(mode: ActivationMode, dwell_ms: u32) -> Result<Self> {
        if dwell_ms == 0 {
            anyhow::bail!("Dwell time must be a positive number of milliseconds");
        }
        Ok(Self { mode, dwell_ms })
    }

    /// Current activation mode.
    #[must_use]
    pub const fn mode(&self) -> ActivationMode {
        self.mode
    }

    /// Dwell time in milliseconds.
    #[must_use]
    pub const fn dwell_ms(&self) -> u32 {
        self.dwell_ms
    }

    /// Dwell time as a [`Duration`].
    #[must_use]
    pub fn dwell(&self) -> Duration {
        Duration::from_millis(u64::from(self.dwell_ms))
    }

    /// Same dwell time, different mode.
    #[must_use]
    pub const fn with_mode(self, mode: ActivationMode) -> Self {
        Self { mode, ..self }
    }

    /// Same mode, different dwell time.
    pub fn with_dwell_ms(self, dwell_ms: u32) -> Result<Self> {
        Self::new(self.mode, dwell_ms)
    }

    /// Checks the invariants that deserialization cannot enforce.
    pub fn validate(&self) -> Result<()> {
        if self.dwell_ms == 0 {
            anyhow::bail!("activation.dwell_ms must be greater than zero");
        }
        Ok(())
    }
}

impl Default for ActivationConfig {
    fn default() -> Self {
        Self {
            mode: ActivationMode::default(),
            dwell_ms: DEFAULT_DWELL_MS,
        }
    }
}

/// Shared handle to the one [`ActivationConfig`] of the process.
///
/// Clones observe the same value. Everything runs on the UI thread, so a
/// `Cell` is enough.
#[derive(Debug, Clone, Default)]
pub struct ActivationContext {
    inner: Rc<Cell<ActivationConfig>>,
}

impl ActivationContext {
    /// Wraps an initial configuration.
    #[must_use]
    pub fn new(config: ActivationConfig) -> Self {
        Self {
            inner: Rc::new(Cell::new(config)),
        }
    }

    /// Reads the current configuration.
    #[must_use]
    pub fn get(&self) -> ActivationConfig {
        self.inner.get()
    }

    /// Replaces the configuration. Callers must rebind afterwards.
    pub fn set(&self, config: ActivationConfig) {
        self.inner.set(config);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_dwell_one_second() {
        let config = ActivationConfig::default();
        assert_eq!(config.mode(), ActivationMode::Dwell);
        assert_eq!(config.dwell_ms(), 1000);
        assert_eq!(config.dwell(), Duration::from_secs(1));
    }

    #[test]
    fn test_zero_dwell_rejected() {
        assert!(ActivationConfig::new(ActivationMode::Dwell, 0).is_err());
        assert!(ActivationConfig::default().with_dwell_ms(0).is_err());
    }

    #[test]
    fn test_mode_parsing_accepts_aliases() {
        assert_eq!("hover".parse::<ActivationMode>(), Ok(ActivationMode::Dwell));
        assert_eq!("Click".parse::<ActivationMode>(), Ok(ActivationMode::Immediate));
        assert_eq!(
            "immediate".parse::<ActivationMode>(),
            Ok(ActivationMode::Immediate)
        );
        assert!("double-click".parse::<ActivationMode>().is_err());
    }

    #[test]
    fn test_mode_toggle() {
        assert_eq!(ActivationMode::Dwell.toggled(), ActivationMode::Immediate);
        assert_eq!(ActivationMode::Immediate.toggled(), ActivationMode::Dwell);
    }

    #[test]
    fn test_context_clones_share_value() {
        let context = ActivationContext::new(ActivationConfig::default());
        let observer = context.clone();

        let updated = ActivationConfig::new(ActivationMode::Immediate, 1500).unwrap();
        context.set(updated);

        assert_eq!(observer.get(), updated);
    }

    #[test]
    fn test_config_toml_roundtrip_uses_lowercase_mode() {
        let config = ActivationConfig::new(ActivationMode::Immediate, 750).unwrap();
        let text = toml::to_string(&config).unwrap();
        assert!(text.contains("mode = \"immediate\""));
        assert!(text.contains("dwell_ms = 750"));
    }

    #[test]
    fn test_validate_catches_deserialized_zero() {
        let config: ActivationConfig = toml::from_str("mode = \"dwell\"\ndwell_ms = 0").unwrap();
        assert!(config.validate().is_err());
    }
}
