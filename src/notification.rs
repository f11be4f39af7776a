// SPDX-FileCopyrightText: The msw810 authors
// SPDX-License-Identifier: MPL-2.0

use crate::Opcode;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display)]
pub enum Level {
    Success,
    Error,
}

/// The user-initiated operation that caused a [`Notification`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    ListDevices,
    Connect,
    Disconnect,
    Command(Opcode),
}

/// Outcome of an operation, e.g. displayed as a toast.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub level: Level,
    pub operation: Operation,
    pub message: String,
}

impl Notification {
    #[must_use]
    pub fn success(operation: Operation, message: impl Into<String>) -> Self {
        Self {
            level: Level::Success,
            operation,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn error(operation: Operation, message: impl Into<String>) -> Self {
        Self {
            level: Level::Error,
            operation,
            message: message.into(),
        }
    }

    #[must_use]
    pub const fn is_error(&self) -> bool {
        matches!(self.level, Level::Error)
    }
}

pub trait NotificationSink {
    fn sink_notification(&mut self, notification: Notification);
}

impl NotificationSink for Vec<Notification> {
    fn sink_notification(&mut self, notification: Notification) {
        self.push(notification);
    }
}

impl<S> NotificationSink for &mut S
where
    S: NotificationSink + ?Sized,
{
    fn sink_notification(&mut self, notification: Notification) {
        (**self).sink_notification(notification);
    }
}
