//! Notification adapters.
//!
//! [`ChannelNotifySink`] hands temperature pushes to the protocol engine
//! over the notify channel.  [`LogNotifySink`] is used when no protocol
//! engine is attached.

use log::{info, warn};

use crate::app::events::Notification;
use crate::app::ports::NotifySink;
use crate::rest::channels::NotifyChannel;

/// Forwards notifications into a bounded channel without blocking.
pub struct ChannelNotifySink<'a> {
    channel: &'a NotifyChannel,
    dropped: u32,
}

impl<'a> ChannelNotifySink<'a> {
    pub fn new(channel: &'a NotifyChannel) -> Self {
        Self { channel, dropped: 0 }
    }

    /// Pushes lost to a full channel since construction.
    pub fn dropped(&self) -> u32 {
        self.dropped
    }
}

impl NotifySink for ChannelNotifySink<'_> {
    fn push(&mut self, notification: Notification) {
        if self.channel.try_send(notification).is_err() {
            self.dropped = self.dropped.saturating_add(1);
            warn!(
                "Notify channel full, dropped push seq={}",
                notification.sequence
            );
        }
    }
}

/// Writes each push to the log.
#[derive(Debug, Default)]
pub struct LogNotifySink;

impl NotifySink for LogNotifySink {
    fn push(&mut self, notification: Notification) {
        info!(
            "OBS   | /temperature seq={} value={}",
            notification.sequence, notification.temperature
        );
    }
}
