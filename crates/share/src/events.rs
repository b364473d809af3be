//! Share event stream.
//!
//! Every phase boundary of a share emits a [`ShareEvent`] tagged with a
//! [`Step`] and, for terminal events, a [`StepStatus`]. Downstream
//! observers follow a request through these events, keyed by the event id
//! carried in the request.

use std::sync::Mutex;

use slugshare_protocol::{Step, StepStatus};

/// Severity of a share event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventLevel {
    Debug,
    Info,
    Error,
}

/// One entry in a request's event stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShareEvent {
    pub level: EventLevel,
    pub message: String,
    pub step: Step,
    pub status: Option<StepStatus>,
}

/// Receives the event stream of one share request.
///
/// Implementations are handed to [`ShareItem`](crate::ShareItem) at
/// construction; there is no global registry.
pub trait EventLogger: Send + Sync {
    fn log(&self, event: ShareEvent);

    fn debug(&self, message: &str, step: Step) {
        self.log(ShareEvent {
            level: EventLevel::Debug,
            message: message.to_string(),
            step,
            status: None,
        });
    }

    fn info(&self, message: &str, step: Step, status: Option<StepStatus>) {
        self.log(ShareEvent {
            level: EventLevel::Info,
            message: message.to_string(),
            step,
            status,
        });
    }

    fn error(&self, message: &str, step: Step, status: Option<StepStatus>) {
        self.log(ShareEvent {
            level: EventLevel::Error,
            message: message.to_string(),
            step,
            status,
        });
    }
}

/// Forwards events to `tracing`, tagged with the request's event id.
#[derive(Debug, Clone)]
pub struct TracingEventLogger {
    event_id: String,
}

impl TracingEventLogger {
    pub fn new(event_id: impl Into<String>) -> Self {
        Self {
            event_id: event_id.into(),
        }
    }

    pub fn event_id(&self) -> &str {
        &self.event_id
    }
}

impl EventLogger for TracingEventLogger {
    fn log(&self, event: ShareEvent) {
        let status = event.status.map(|s| s.as_str()).unwrap_or("");
        match event.level {
            EventLevel::Debug => tracing::debug!(
                event_id = %self.event_id,
                step = %event.step,
                status,
                "{}",
                event.message
            ),
            EventLevel::Info => tracing::info!(
                event_id = %self.event_id,
                step = %event.step,
                status,
                "{}",
                event.message
            ),
            EventLevel::Error => tracing::error!(
                event_id = %self.event_id,
                step = %event.step,
                status,
                "{}",
                event.message
            ),
        }
    }
}

/// Keeps every event in memory.
#[derive(Debug, Default)]
pub struct RecordingEventLogger {
    events: Mutex<Vec<ShareEvent>>,
}

impl RecordingEventLogger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the events recorded so far.
    pub fn events(&self) -> Vec<ShareEvent> {
        self.events.lock().unwrap().clone()
    }

    /// Returns `true` if an event with this step and status was recorded.
    pub fn contains(&self, step: Step, status: StepStatus) -> bool {
        self.events
            .lock()
            .unwrap()
            .iter()
            .any(|e| e.step == step && e.status == Some(status))
    }
}

impl EventLogger for RecordingEventLogger {
    fn log(&self, event: ShareEvent) {
        self.events.lock().unwrap().push(event);
    }
}
