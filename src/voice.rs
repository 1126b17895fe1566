//! Speech-to-text capture state.
//!
//! The recognizer itself lives in the host. It reports [`SpeechEvent`]s; this
//! module tracks whether capture is running, holds the interim transcript and
//! turns final results into fragments appended to an [`EditSession`].

use crate::session::EditSession;

/// Default recognition language.
pub const DEFAULT_LANGUAGE: &str = "ru-RU";

/// Event reported by the host recognizer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SpeechEvent {
    /// Recognized text; `is_final` marks the end of an utterance.
    Transcript { fragment: String, is_final: bool },
    /// Recognition failed. Treated like [`SpeechEvent::Ended`].
    Error(String),
    /// The recognizer stopped on its own.
    Ended,
}

/// Capture lifecycle for one language at a time.
#[derive(Clone, Debug)]
pub struct SpeechCapture {
    language: String,
    available: bool,
    listening: bool,
    partial: String,
}

impl Default for SpeechCapture {
    fn default() -> Self {
        Self::new(DEFAULT_LANGUAGE, true)
    }
}

impl SpeechCapture {
    /// `available` is false when the host has no recognizer; capture then
    /// never starts.
    #[must_use]
    pub fn new(language: &str, available: bool) -> Self {
        Self {
            language: language.to_string(),
            available,
            listening: false,
            partial: String::new(),
        }
    }

    #[must_use]
    pub fn is_available(&self) -> bool {
        self.available
    }

    #[must_use]
    pub fn is_listening(&self) -> bool {
        self.listening
    }

    #[must_use]
    pub fn language(&self) -> &str {
        &self.language
    }

    /// Interim text not yet finalized.
    #[must_use]
    pub fn partial(&self) -> &str {
        &self.partial
    }

    /// Begin a capture session, discarding any leftover interim text.
    ///
    /// Returns `false` if already listening or unavailable.
    pub fn start(&mut self) -> bool {
        if !self.available {
            tracing::debug!("speech capture unavailable");
            return false;
        }
        if self.listening {
            return false;
        }
        self.partial.clear();
        self.listening = true;
        tracing::debug!(language = %self.language, "speech capture started");
        true
    }

    /// Stop capturing. Returns `false` if already stopped.
    pub fn stop(&mut self) -> bool {
        if !self.listening {
            return false;
        }
        self.listening = false;
        tracing::debug!("speech capture stopped");
        true
    }

    /// Switch recognition language, stopping any running capture first.
    pub fn set_language(&mut self, language: &str) {
        self.stop();
        self.partial.clear();
        self.language = language.to_string();
    }

    /// Process a recognizer event.
    ///
    /// Returns the finalized fragment when an utterance completes with
    /// non-blank text.
    pub fn handle(&mut self, event: SpeechEvent) -> Option<String> {
        match event {
            SpeechEvent::Transcript { fragment, is_final } => {
                if !self.listening {
                    tracing::debug!("dropping transcript received while stopped");
                    return None;
                }
                if !is_final {
                    self.partial = fragment;
                    return None;
                }
                self.partial.clear();
                let fragment = fragment.trim();
                (!fragment.is_empty()).then(|| fragment.to_string())
            }
            SpeechEvent::Error(reason) => {
                tracing::warn!(%reason, "speech recognition error");
                self.stop();
                None
            }
            SpeechEvent::Ended => {
                self.stop();
                None
            }
        }
    }

    /// Process an event and append any finalized fragment to `session`.
    pub fn deliver(&mut self, event: SpeechEvent, session: &mut EditSession) -> bool {
        self.handle(event)
            .is_some_and(|fragment| session.append_fragment(&fragment))
    }
}
