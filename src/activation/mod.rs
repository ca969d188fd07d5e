//! Activation dispatch for every interactive element on the board.
//!
//! Tiles, tab buttons and on-screen keyboard keys all share one of two input
//! models: dwell (hover for a configured time) or immediate (click). This
//! module owns the process-wide [`ActivationConfig`] and the
//! [`ActivationDispatcher`] that keeps exactly one binding per element in sync
//! with it.

pub mod config;
pub mod dispatcher;

pub use config::{ActivationConfig, ActivationContext, ActivationMode};
pub use dispatcher::{ActivationDispatcher, BindingHandle, BindingState, ElementHost};

/// Stable identity of an activatable element on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ElementId(pub u64);

impl std::fmt::Display for ElementId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Any UI control that acts when activated.
///
/// `label` is what is drawn, `speech_label` is what gets spoken. The two differ
/// when tiles are shown as icons.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivatableElement<A> {
    /// Element identity used for binding and hit-testing
    pub id: ElementId,
    /// Display text
    pub label: String,
    /// Text passed to the speech collaborator
    pub speech_label: String,
    /// Effect yielded when the element activates
    pub action: A,
}

impl<A> ActivatableElement<A> {
    /// Creates an element whose speech label matches its display label.
    pub fn new(id: ElementId, label: impl Into<String>, action: A) -> Self {
        let label = label.into();
        Self {
            id,
            speech_label: label.clone(),
            label,
            action,
        }
    }

    /// Overrides the spoken text.
    pub fn with_speech_label(mut self, speech_label: impl Into<String>) -> Self {
        self.speech_label = speech_label.into();
        self
    }
}
