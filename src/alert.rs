use std::cell::RefCell;
use std::rc::Rc;

use log::{debug, info, warn};
use thiserror::Error;

use crate::config::Strings;

pub const CHANNEL_ID: &str = "org.hyperskill";
pub const NOTIFICATION_ID: u32 = 393939;

#[derive(Debug, Error)]
pub enum AlertError {
    #[error("desktop notification failed")]
    Notify(#[from] notify_rust::error::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum Importance {
    Default,
    High,
}

/// Delivery channel the overtime alert is routed through
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Channel {
    pub id: String,
    pub name: String,
    pub description: String,
    pub importance: Importance,
}

/// Content of the one-shot overtime notification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub title: String,
    pub body: String,
    /// Dismiss the notification once the user activates it
    pub auto_dismiss: bool,
}

/// Notification subsystem boundary
pub trait Notifier {
    fn register_channel(&mut self, channel: &Channel);
    fn show(&mut self, id: u32, channel: &Channel, alert: &Alert) -> Result<(), AlertError>;
    fn cancel(&mut self, id: u32);
}

impl<N: Notifier + ?Sized> Notifier for Box<N> {
    fn register_channel(&mut self, channel: &Channel) {
        (**self).register_channel(channel)
    }

    fn show(&mut self, id: u32, channel: &Channel, alert: &Alert) -> Result<(), AlertError> {
        (**self).show(id, channel, alert)
    }

    fn cancel(&mut self, id: u32) {
        (**self).cancel(id)
    }
}

/// Production notifier backed by the desktop notification service
#[derive(Default)]
pub struct DesktopNotifier {
    #[cfg(all(unix, not(target_os = "macos")))]
    shown: Option<notify_rust::NotificationHandle>,
}

impl DesktopNotifier {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Notifier for DesktopNotifier {
    fn register_channel(&mut self, channel: &Channel) {
        // Desktop notification services have no channel registry; the
        // channel only shapes the app name and urgency of each notification.
        debug!("using notification channel {} ({})", channel.id, channel.importance);
    }

    #[cfg(all(unix, not(target_os = "macos")))]
    fn show(&mut self, id: u32, channel: &Channel, alert: &Alert) -> Result<(), AlertError> {
        use notify_rust::{Hint, Notification, Urgency};

        let urgency = match channel.importance {
            Importance::High => Urgency::Critical,
            Importance::Default => Urgency::Normal,
        };
        let handle = Notification::new()
            .id(id)
            .summary(&alert.title)
            .body(&alert.body)
            .appname(&channel.name)
            .icon("alarm-clock")
            .urgency(urgency)
            .hint(Hint::Resident(!alert.auto_dismiss))
            .action("default", "Open")
            .show()?;
        self.shown = Some(handle);
        Ok(())
    }

    #[cfg(not(all(unix, not(target_os = "macos"))))]
    fn show(&mut self, _id: u32, channel: &Channel, alert: &Alert) -> Result<(), AlertError> {
        notify_rust::Notification::new()
            .summary(&alert.title)
            .body(&alert.body)
            .appname(&channel.name)
            .show()
            .map(|_| ())?;
        Ok(())
    }

    fn cancel(&mut self, _id: u32) {
        #[cfg(all(unix, not(target_os = "macos")))]
        if let Some(handle) = self.shown.take() {
            handle.close();
        }
    }
}

/// Notifier used when notifications are turned off
#[derive(Debug, Default, Clone, Copy)]
pub struct NullNotifier;

impl Notifier for NullNotifier {
    fn register_channel(&mut self, _channel: &Channel) {}

    fn show(&mut self, _id: u32, _channel: &Channel, _alert: &Alert) -> Result<(), AlertError> {
        Ok(())
    }

    fn cancel(&mut self, _id: u32) {}
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotifierCall {
    Register(String),
    Show(u32, String),
    Cancel(u32),
}

/// Test notifier that records every call.
///
/// Clones share the same log, so a test can keep one handle while the
/// dispatcher owns the other.
#[derive(Debug, Default, Clone)]
pub struct RecordingNotifier {
    calls: Rc<RefCell<Vec<NotifierCall>>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<NotifierCall> {
        self.calls.borrow().clone()
    }

    pub fn show_count(&self) -> usize {
        self.calls
            .borrow()
            .iter()
            .filter(|c| matches!(c, NotifierCall::Show(..)))
            .count()
    }
}

impl Notifier for RecordingNotifier {
    fn register_channel(&mut self, channel: &Channel) {
        self.calls
            .borrow_mut()
            .push(NotifierCall::Register(channel.id.clone()));
    }

    fn show(&mut self, id: u32, _channel: &Channel, alert: &Alert) -> Result<(), AlertError> {
        self.calls
            .borrow_mut()
            .push(NotifierCall::Show(id, alert.title.clone()));
        Ok(())
    }

    fn cancel(&mut self, id: u32) {
        self.calls.borrow_mut().push(NotifierCall::Cancel(id));
    }
}

/// Builds and withdraws the overtime notification
pub struct AlertDispatcher<N: Notifier> {
    notifier: N,
    channel: Channel,
    alert: Alert,
    registered: bool,
}

impl<N: Notifier> AlertDispatcher<N> {
    pub fn new(notifier: N, strings: &Strings) -> Self {
        Self {
            notifier,
            channel: Channel {
                id: CHANNEL_ID.to_string(),
                name: strings.channel_name.clone(),
                description: strings.channel_description.clone(),
                importance: Importance::High,
            },
            alert: Alert {
                title: strings.notification_title.clone(),
                body: strings.notification_text.clone(),
                auto_dismiss: true,
            },
            registered: false,
        }
    }

    /// Register the delivery channel. Only the first call reaches the notifier.
    pub fn register(&mut self) {
        if self.registered {
            return;
        }
        self.notifier.register_channel(&self.channel);
        self.registered = true;
    }

    /// Show the alert. Delivery failures are logged and dropped.
    pub fn show(&mut self) {
        self.register();
        match self.notifier.show(NOTIFICATION_ID, &self.channel, &self.alert) {
            Ok(()) => info!("overtime notification shown"),
            Err(e) => warn!("could not show overtime notification: {}", e),
        }
    }

    pub fn cancel(&mut self) {
        self.notifier.cancel(NOTIFICATION_ID);
    }

    pub fn channel(&self) -> &Channel {
        &self.channel
    }
}
