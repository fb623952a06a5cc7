//! Notification sink for schedule changes
//!
//! The scheduling engine only depends on [`NotificationSink`]; delivery is up
//! to the host.

use logger::info;

/// Receives one message per affected student
pub trait NotificationSink {
    /// Deliver `message` to the student called `student_name`
    fn notify(&mut self, student_name: &str, message: &str);
}

/// A notification as delivered to a [`RecordingNotifier`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    /// Recipient's name
    pub student_name: String,
    /// Message text
    pub message: String,
}

/// Keeps every notification in memory, in delivery order
#[derive(Debug, Clone, Default)]
pub struct RecordingNotifier {
    /// Delivered notifications
    pub sent: Vec<Notification>,
}

impl RecordingNotifier {
    /// Create an empty recorder
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl NotificationSink for RecordingNotifier {
    fn notify(&mut self, student_name: &str, message: &str) {
        self.sent.push(Notification {
            student_name: student_name.to_string(),
            message: message.to_string(),
        });
    }
}

/// Delivers notifications as info-level log lines
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl NotificationSink for LogNotifier {
    fn notify(&mut self, student_name: &str, message: &str) {
        info!("Notification to {student_name}: {message}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_notifier_keeps_order() {
        let mut sink = RecordingNotifier::new();

        sink.notify("Ada", "first");
        sink.notify("Alan", "second");

        assert_eq!(sink.sent.len(), 2);
        assert_eq!(sink.sent[0].student_name, "Ada");
        assert_eq!(sink.sent[1].message, "second");
    }

    #[test]
    fn test_log_notifier_logs_info() {
        logger::start_capture();
        LogNotifier.notify("Ada", "Schedule for Intro has been updated.");
        let records = logger::take_captured();

        assert_eq!(records.len(), 1);
        assert_eq!(
            records[0].message,
            "Notification to Ada: Schedule for Intro has been updated."
        );
    }
}
