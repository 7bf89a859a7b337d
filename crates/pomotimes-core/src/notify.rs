//! Interval-boundary notifications.
//!
//! Notifiers are fire-and-forget: they return nothing and must not block the
//! timer. Failures are logged and dropped.

use std::io::Write;

use crate::events::NotifyKind;

pub trait Notifier {
    fn notify(&self, kind: NotifyKind);
}

/// Discards notifications.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullNotifier;

impl Notifier for NullNotifier {
    fn notify(&self, _kind: NotifyKind) {}
}

/// Emits notifications as log records.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, kind: NotifyKind) {
        match kind {
            NotifyKind::FocusCompleted => tracing::info!("focus interval complete, take a break"),
            NotifyKind::BreakCompleted => tracing::info!("break over, back to focus"),
        }
    }
}

/// Rings the terminal bell on stderr, then logs.
#[derive(Debug, Default, Clone, Copy)]
pub struct BellNotifier;

impl Notifier for BellNotifier {
    fn notify(&self, kind: NotifyKind) {
        let mut err = std::io::stderr();
        if let Err(e) = err.write_all(b"\x07").and_then(|_| err.flush()) {
            tracing::warn!("bell failed: {e}");
        }
        LogNotifier.notify(kind);
    }
}

impl<N: Notifier + ?Sized> Notifier for Box<N> {
    fn notify(&self, kind: NotifyKind) {
        (**self).notify(kind)
    }
}
