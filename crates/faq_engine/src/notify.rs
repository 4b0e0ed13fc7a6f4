pub const HELPFUL_ACK: &str = "Thanks for your feedback!";
pub const NOT_HELPFUL_ACK: &str = "Thanks, we'll improve this answer";

pub fn acknowledgment(helpful: bool) -> &'static str {
    if helpful {
        HELPFUL_ACK
    } else {
        NOT_HELPFUL_ACK
    }
}

/// Receives the short transient message shown after a vote.
pub trait Notifier {
    fn notify(&mut self, message: &str);
}

impl Notifier for Box<dyn Notifier> {
    fn notify(&mut self, message: &str) {
        (**self).notify(message)
    }
}

impl<N: Notifier + ?Sized> Notifier for &mut N {
    fn notify(&mut self, message: &str) {
        (**self).notify(message)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&mut self, message: &str) {
        tracing::info!(ack = message, "vote acknowledged");
    }
}

#[derive(Debug, Clone, Default)]
pub struct RecordingNotifier {
    messages: Vec<String>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    pub fn last(&self) -> Option<&str> {
        self.messages.last().map(String::as_str)
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&mut self, message: &str) {
        self.messages.push(message.to_string());
    }
}
