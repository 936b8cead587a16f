//! Fire-and-forget event reporting for persisted planner entities.

use std::sync::Mutex;

use log::info;
use serde_json::{Map, Value};

/// Target under which [`LogTelemetry`] emits its records.
pub const TELEMETRY_TARGET: &str = "marshal::telemetry";

/// Event attributes, rendered as a JSON object.
pub type Attributes = Map<String, Value>;

/// Receives named events. Implementations must not block the caller and
/// must never fail it.
pub trait Telemetry: Send + Sync {
    fn record_event(&self, name: &str, attributes: &Attributes);
}

/// Emits each event as an info-level `log` record on
/// [`TELEMETRY_TARGET`].
#[derive(Debug, Clone, Copy, Default)]
pub struct LogTelemetry;

impl Telemetry for LogTelemetry {
    fn record_event(&self, name: &str, attributes: &Attributes) {
        info!(target: TELEMETRY_TARGET, "{name} {}", Value::Object(attributes.clone()));
    }
}

/// Keeps events in memory so they can be inspected afterwards.
#[derive(Debug, Default)]
pub struct RecordingTelemetry {
    events: Mutex<Vec<(String, Attributes)>>,
}

impl RecordingTelemetry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the events recorded so far, oldest first.
    pub fn events(&self) -> Vec<(String, Attributes)> {
        match self.events.lock() {
            Ok(events) => events.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// Names of the recorded events, oldest first.
    pub fn names(&self) -> Vec<String> {
        self.events().into_iter().map(|(name, _)| name).collect()
    }
}

impl Telemetry for RecordingTelemetry {
    fn record_event(&self, name: &str, attributes: &Attributes) {
        let mut events = match self.events.lock() {
            Ok(events) => events,
            Err(poisoned) => poisoned.into_inner(),
        };
        events.push((name.to_string(), attributes.clone()));
    }
}

/// Builds an [`Attributes`] map from string pairs.
pub fn attributes<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Attributes {
    pairs
        .into_iter()
        .map(|(key, value)| (key.to_string(), Value::String(value.to_string())))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_telemetry_keeps_order() {
        let telemetry = RecordingTelemetry::new();
        telemetry.record_event("Plan added", &attributes([("plan_id", "p1")]));
        telemetry.record_event("Step added", &attributes([("step_id", "s1")]));

        let events = telemetry.events();
        assert_eq!(telemetry.names(), ["Plan added", "Step added"]);
        assert_eq!(events[0].1["plan_id"], "p1");
    }

    #[test]
    fn test_log_telemetry_does_not_panic_without_logger() {
        LogTelemetry.record_event("Plan added", &attributes([("plan_id", "p1")]));
    }
}
