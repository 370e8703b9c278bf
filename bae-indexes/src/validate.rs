//! Post-scan structural checks.

use crate::error::IndexesError;
use crate::events::ParseEvent;

/// Root element of every Subsonic response.
pub const ROOT_ELEMENT: &str = "subsonic-response";

/// Shape of the event stream, tracked while parsing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StreamState {
    pub root_seen: bool,
    /// Elements currently open.
    pub depth: usize,
    /// Elements started so far.
    pub elements: usize,
}

impl StreamState {
    pub fn observe(&mut self, event: &ParseEvent) {
        match event {
            ParseEvent::Start { name, .. } => {
                if name == ROOT_ELEMENT {
                    self.root_seen = true;
                }
                self.depth += 1;
                self.elements += 1;
            }
            ParseEvent::End => self.depth = self.depth.saturating_sub(1),
            ParseEvent::EndOfDocument => {}
        }
    }
}

/// Checks a finished stream before its result is used.
pub trait StructuralValidator {
    fn validate(&self, state: &StreamState) -> Result<(), IndexesError>;
}

/// Requires a `subsonic-response` root and a fully closed document.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvelopeValidator;

impl StructuralValidator for EnvelopeValidator {
    fn validate(&self, state: &StreamState) -> Result<(), IndexesError> {
        if !state.root_seen {
            return Err(IndexesError::Structural(format!(
                "{} root element not found",
                ROOT_ELEMENT
            )));
        }
        if state.depth > 0 {
            return Err(IndexesError::Structural(format!(
                "document ended with {} unclosed element(s)",
                state.depth
            )));
        }
        Ok(())
    }
}

/// Accepts every stream. For event sources that carry no envelope.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoValidation;

impl StructuralValidator for NoValidation {
    fn validate(&self, _state: &StreamState) -> Result<(), IndexesError> {
        Ok(())
    }
}
