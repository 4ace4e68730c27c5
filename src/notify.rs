//! src/notify.rs
use crate::configuration::ToastSettings;
use colored::Colorize;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub text: String,
}

/// Shows a transient, non-blocking message to whoever is using the form.
pub trait Notifier: Send + Sync {
    fn notify(&self, kind: NotificationKind, text: &str);
}

impl<T: Notifier + ?Sized> Notifier for Arc<T> {
    fn notify(&self, kind: NotificationKind, text: &str) {
        (**self).notify(kind, text)
    }
}

#[derive(Debug)]
struct Toast {
    notification: Notification,
    expires_at: Instant,
}

/// Keeps each notification around until its display lifetime runs out.
#[derive(Debug)]
pub struct Toaster {
    success_lifetime: Duration,
    error_lifetime: Duration,
    toasts: Mutex<Vec<Toast>>,
}

impl Toaster {
    pub fn new(settings: ToastSettings) -> Self {
        Self {
            success_lifetime: Duration::from_millis(settings.success_milliseconds),
            error_lifetime: Duration::from_millis(settings.error_milliseconds),
            toasts: Mutex::new(Vec::new()),
        }
    }

    fn lifetime(&self, kind: NotificationKind) -> Duration {
        match kind {
            NotificationKind::Success => self.success_lifetime,
            NotificationKind::Error => self.error_lifetime,
        }
    }

    /// Notifications still on display, oldest first.
    pub fn visible(&self) -> Vec<Notification> {
        let mut toasts = self.toasts.lock().unwrap_or_else(PoisonError::into_inner);
        prune(&mut toasts, Instant::now());
        toasts.iter().map(|t| t.notification.clone()).collect()
    }
}

impl Default for Toaster {
    fn default() -> Self {
        Self::new(ToastSettings::default())
    }
}

fn prune(toasts: &mut Vec<Toast>, now: Instant) {
    toasts.retain(|t| t.expires_at > now);
}

impl Notifier for Toaster {
    fn notify(&self, kind: NotificationKind, text: &str) {
        let now = Instant::now();
        let mut toasts = self.toasts.lock().unwrap_or_else(PoisonError::into_inner);
        prune(&mut toasts, now);
        toasts.push(Toast {
            notification: Notification {
                kind,
                text: text.to_string(),
            },
            expires_at: now + self.lifetime(kind),
        });
    }
}

/// Prints one coloured line per notification on stdout.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalNotifier;

impl Notifier for TerminalNotifier {
    fn notify(&self, kind: NotificationKind, text: &str) {
        match kind {
            NotificationKind::Success => println!("{} {}", "✔".green().bold(), text.green()),
            NotificationKind::Error => println!("{} {}", "✖".red().bold(), text.red()),
        }
    }
}
