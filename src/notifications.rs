//! Notification surface
//!
//! Fire-and-forget user-visible toasts raised by the dashboard actions. The
//! UI drains the receiving end of the channel and renders each toast.

use crate::consts::dashboard_consts::TOAST_QUEUE_SIZE;
use chrono::Local;
use std::fmt::Display;
use tokio::sync::mpsc;

#[derive(Debug, Copy, Clone, Eq, PartialEq, strum::Display)]
pub enum ToastKind {
    Success,
    Error,
}

/// A single user-visible notice.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Toast {
    pub message: String,
    pub kind: ToastKind,
    pub timestamp: String,
}

impl Toast {
    fn now(kind: ToastKind, message: &str) -> Self {
        Toast {
            message: message.to_string(),
            kind,
            timestamp: Local::now().format("%H:%M:%S").to_string(),
        }
    }
}

impl Display for Toast {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}: {}", self.timestamp, self.kind, self.message)
    }
}

/// Sink for fire-and-forget user notices.
pub trait Notifier: Send + Sync {
    fn success(&self, message: &str);
    fn error(&self, message: &str);
}

/// Channel-backed notifier. Sends never block; when the UI falls behind and
/// the queue fills up, new toasts are dropped.
#[derive(Debug, Clone)]
pub struct ToastChannel {
    sender: mpsc::Sender<Toast>,
}

impl ToastChannel {
    pub fn new() -> (Self, mpsc::Receiver<Toast>) {
        let (sender, receiver) = mpsc::channel(TOAST_QUEUE_SIZE);
        (ToastChannel { sender }, receiver)
    }
}

impl Notifier for ToastChannel {
    fn success(&self, message: &str) {
        let _ = self.sender.try_send(Toast::now(ToastKind::Success, message));
    }

    fn error(&self, message: &str) {
        let _ = self.sender.try_send(Toast::now(ToastKind::Error, message));
    }
}
