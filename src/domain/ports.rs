use crate::domain::model::RulesConfig;
use std::sync::Mutex;

/// The UI's toast/alert mechanism. Called with a human-readable message
/// whenever the score sheet rejects an input.
pub trait Notifier {
    fn notify(&self, message: &str);
}

/// Anything that can supply the bounds record at startup.
pub trait RulesProvider {
    fn rules_config(&self) -> RulesConfig;
}

/// Notifier that only writes to the log.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, message: &str) {
        tracing::warn!("⚠️ {}", message);
    }
}

/// Keeps every message, for hosts that render notifications later and for tests.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    messages: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> Vec<String> {
        self.messages
            .lock()
            .map(|m| m.clone())
            .unwrap_or_default()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, message: &str) {
        if let Ok(mut messages) = self.messages.lock() {
            messages.push(message.to_string());
        }
    }
}

impl<N: Notifier + ?Sized> Notifier for &N {
    fn notify(&self, message: &str) {
        (**self).notify(message)
    }
}

impl RulesProvider for RulesConfig {
    fn rules_config(&self) -> RulesConfig {
        self.clone()
    }
}
