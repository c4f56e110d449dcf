//! Transient user notifications ("toasts")
//!
//! Notifications are fire-and-forget: they are logged with `tracing` and
//! published on a broadcast channel for whatever surface renders them. A
//! notification nobody is listening for is simply dropped.

use serde::Serialize;
use std::fmt;
use std::time::Duration;
use tokio::sync::broadcast;

/// Default base display duration
pub const DEFAULT_DURATION: Duration = Duration::from_millis(4000);

const CHANNEL_CAPACITY: usize = 64;

/// Severity of a notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationLevel {
    Success,
    Error,
    Warning,
    Info,
}

impl fmt::Display for NotificationLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            NotificationLevel::Success => "success",
            NotificationLevel::Error => "error",
            NotificationLevel::Warning => "warning",
            NotificationLevel::Info => "info",
        };
        f.write_str(label)
    }
}

/// A single toast
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
    #[serde(with = "duration_ms")]
    pub duration: Duration,
}

mod duration_ms {
    use serde::Serializer;
    use std::time::Duration;

    pub fn serialize<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(u64::try_from(duration.as_millis()).unwrap_or(u64::MAX))
    }
}

/// Publishes notifications to subscribers
///
/// Cheap to clone; all clones share one channel.
#[derive(Debug, Clone)]
pub struct NotificationCenter {
    sender: broadcast::Sender<Notification>,
    base_duration: Duration,
}

impl Default for NotificationCenter {
    fn default() -> Self {
        Self::new(DEFAULT_DURATION)
    }
}

impl NotificationCenter {
    /// Creates a center whose non-error toasts last `base_duration`
    pub fn new(base_duration: Duration) -> Self {
        let (sender, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self {
            sender,
            base_duration,
        }
    }

    /// Receives every notification published after this call
    pub fn subscribe(&self) -> broadcast::Receiver<Notification> {
        self.sender.subscribe()
    }

    /// Display duration for `level`; errors stay 1.5x longer
    pub fn duration_for(&self, level: NotificationLevel) -> Duration {
        match level {
            NotificationLevel::Error => self.base_duration.mul_f64(1.5),
            _ => self.base_duration,
        }
    }

    /// Publishes a notification and returns it
    pub fn notify(&self, level: NotificationLevel, message: impl Into<String>) -> Notification {
        let notification = Notification {
            level,
            message: message.into(),
            duration: self.duration_for(level),
        };

        match level {
            NotificationLevel::Error => {
                tracing::error!(message = %notification.message, "Notification")
            }
            NotificationLevel::Warning => {
                tracing::warn!(message = %notification.message, "Notification")
            }
            NotificationLevel::Success | NotificationLevel::Info => {
                tracing::info!(level = %level, message = %notification.message, "Notification")
            }
        }

        // No receivers is fine
        let _ = self.sender.send(notification.clone());
        notification
    }

    pub fn success(&self, message: impl Into<String>) -> Notification {
        self.notify(NotificationLevel::Success, message)
    }

    pub fn error(&self, message: impl Into<String>) -> Notification {
        self.notify(NotificationLevel::Error, message)
    }

    pub fn warning(&self, message: impl Into<String>) -> Notification {
        self.notify(NotificationLevel::Warning, message)
    }

    pub fn info(&self, message: impl Into<String>) -> Notification {
        self.notify(NotificationLevel::Info, message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_toasts_last_longer() {
        let center = NotificationCenter::default();
        assert_eq!(center.success("Saved").duration, Duration::from_millis(4000));
        assert_eq!(center.error("Boom").duration, Duration::from_millis(6000));
        assert_eq!(
            center.duration_for(NotificationLevel::Warning),
            Duration::from_millis(4000)
        );
    }

    #[tokio::test]
    async fn test_subscribers_receive_notifications() {
        let center = NotificationCenter::new(Duration::from_millis(1000));
        let mut rx = center.subscribe();

        center.clone().warning("Careful");

        let received = rx.recv().await.unwrap();
        assert_eq!(received.level, NotificationLevel::Warning);
        assert_eq!(received.message, "Careful");
        assert_eq!(received.duration, Duration::from_millis(1000));
    }

    #[test]
    fn test_publishing_without_subscribers() {
        let center = NotificationCenter::default();
        let toast = center.info("Nobody listens");
        assert_eq!(toast.level, NotificationLevel::Info);
    }

    #[test]
    fn test_serializes_duration_in_ms() {
        let toast = NotificationCenter::default().error("x");
        let json = serde_json::to_value(&toast).unwrap();
        assert_eq!(json["level"], "error");
        assert_eq!(json["duration"], 6000);
    }
}
