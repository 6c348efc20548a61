//! Collaborator event stream
//!
//! The pipeline never talks to the console. It emits [`PipelineEvent`]s to
//! an [`EventSink`]; events flagged `requires_confirmation` let the sink stop
//! the run by answering [`Decision::Abort`].

use crate::app::models::DocumentKind;
use serde::Serialize;
use std::fmt;

/// Severity of a pipeline event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum EventLevel {
    Info,
    Warning,
    Error,
}

impl fmt::Display for EventLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventLevel::Info => f.write_str("INFO"),
            EventLevel::Warning => f.write_str("WARNING"),
            EventLevel::Error => f.write_str("ERROR"),
        }
    }
}

/// One structured message for the surrounding application
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PipelineEvent {
    pub level: EventLevel,
    pub message: String,
    pub requires_confirmation: bool,
    /// Source document the event concerns, if any
    pub document: Option<DocumentKind>,
    /// Source line the event concerns, if any
    pub line: Option<u64>,
}

impl PipelineEvent {
    pub fn info(message: impl Into<String>) -> Self {
        Self::new(EventLevel::Info, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(EventLevel::Warning, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(EventLevel::Error, message)
    }

    fn new(level: EventLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            requires_confirmation: false,
            document: None,
            line: None,
        }
    }

    /// Ask the collaborator whether to continue
    pub fn confirm(mut self) -> Self {
        self.requires_confirmation = true;
        self
    }

    pub fn for_document(mut self, kind: DocumentKind) -> Self {
        self.document = Some(kind);
        self
    }

    pub fn at_line(mut self, line: u64) -> Self {
        self.line = Some(line);
        self
    }
}

impl fmt::Display for PipelineEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: ", self.level)?;
        if let Some(document) = self.document {
            write!(f, "[{}", document)?;
            if let Some(line) = self.line {
                write!(f, " line {}", line)?;
            }
            write!(f, "] ")?;
        }
        f.write_str(&self.message)
    }
}

/// Collaborator answer to an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Continue,
    Abort,
}

/// Receiver of pipeline events
pub trait EventSink {
    /// Handle an event; the answer only matters when confirmation is requested
    fn emit(&mut self, event: &PipelineEvent) -> Decision;
}

impl<F> EventSink for F
where
    F: FnMut(&PipelineEvent) -> Decision,
{
    fn emit(&mut self, event: &PipelineEvent) -> Decision {
        self(event)
    }
}

/// Sink that records every event and always continues
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    events: Vec<PipelineEvent>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[PipelineEvent] {
        &self.events
    }

    /// Events at the given level
    pub fn at_level(&self, level: EventLevel) -> Vec<&PipelineEvent> {
        self.events
            .iter()
            .filter(|event| event.level == level)
            .collect()
    }

    /// Whether any event message contains `needle`
    pub fn contains(&self, needle: &str) -> bool {
        self.events.iter().any(|event| event.message.contains(needle))
    }
}

impl EventSink for EventLog {
    fn emit(&mut self, event: &PipelineEvent) -> Decision {
        self.events.push(event.clone());
        Decision::Continue
    }
}
