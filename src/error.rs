// SPDX-FileCopyrightText: The msw810 authors
// SPDX-License-Identifier: MPL-2.0

use std::borrow::Cow;

use thiserror::Error;

use crate::{ConnectToken, EndpointId};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// No MIDI support on this host or access has been denied.
    #[error("MIDI unavailable: {msg}")]
    CapabilityUnavailable { msg: Cow<'static, str> },

    /// Stale or unknown endpoint identifier.
    #[error("Device not found: {id}")]
    DeviceNotFound { id: EndpointId },

    #[error("No device selected")]
    NoDeviceSelected,

    #[error("Connect: {msg}")]
    Connect { msg: Cow<'static, str> },

    #[error("Send: {msg}")]
    Send { msg: Cow<'static, str> },

    /// A newer connection request has been issued in the meantime.
    #[error("Connection request {token} has been superseded")]
    Superseded { token: ConnectToken },
}

pub type Result<T> = std::result::Result<T, Error>;
