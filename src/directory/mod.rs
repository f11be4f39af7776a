// SPDX-FileCopyrightText: The msw810 authors
// SPDX-License-Identifier: MPL-2.0

use derive_more::{Deref, Display, From};

use crate::{Error, Result};

#[cfg(feature = "midir")]
mod midir;
#[cfg(feature = "midir")]
pub use self::midir::MidirAccess;

/// Opaque, platform-specific identifier of an output port.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Display, From, Deref)]
pub struct EndpointId(String);

impl EndpointId {
    #[must_use]
    pub const fn new(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for EndpointId {
    fn from(from: &str) -> Self {
        Self(from.to_owned())
    }
}

/// A MIDI destination the host can write messages to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputEndpoint {
    pub id: EndpointId,
    pub name: String,
}

pub trait MidiOutputConnection {
    fn send_midi_output(&mut self, output: &[u8]) -> Result<()>;
}

impl<C> MidiOutputConnection for Box<C>
where
    C: MidiOutputConnection + ?Sized,
{
    fn send_midi_output(&mut self, output: &[u8]) -> Result<()> {
        (**self).send_midi_output(output)
    }
}

/// Platform MIDI capability
///
/// Enumerates output ports and opens SysEx-capable connections.
pub trait MidiAccess {
    type Connection: MidiOutputConnection;

    /// Enumerate all currently available output ports.
    ///
    /// Fails with [`Error::CapabilityUnavailable`] if MIDI is not
    /// supported or access has been denied.
    fn output_endpoints(&mut self) -> Result<Vec<OutputEndpoint>>;

    fn open_output(&mut self, endpoint: &OutputEndpoint) -> Result<Self::Connection>;
}

/// An open connection to the selected endpoint.
#[allow(missing_debug_implementations)]
pub struct ActiveSession<C> {
    endpoint: OutputEndpoint,
    connection: C,
}

impl<C> ActiveSession<C> {
    #[must_use]
    pub const fn new(endpoint: OutputEndpoint, connection: C) -> Self {
        Self {
            endpoint,
            connection,
        }
    }

    #[must_use]
    pub const fn endpoint(&self) -> &OutputEndpoint {
        &self.endpoint
    }

    pub fn connection_mut(&mut self) -> &mut C {
        &mut self.connection
    }

    #[must_use]
    pub fn into_inner(self) -> (OutputEndpoint, C) {
        let Self {
            endpoint,
            connection,
        } = self;
        (endpoint, connection)
    }
}

/// Discovers output endpoints and resolves them into sessions.
///
/// Endpoints are only discovered when explicitly listed. Disconnected
/// hardware is not detected until the next listing.
#[derive(Debug)]
pub struct DeviceDirectory<A> {
    access: A,
    endpoints: Vec<OutputEndpoint>,
}

impl<A> DeviceDirectory<A>
where
    A: MidiAccess,
{
    #[must_use]
    pub const fn new(access: A) -> Self {
        Self {
            access,
            endpoints: Vec::new(),
        }
    }

    #[must_use]
    pub const fn access(&self) -> &A {
        &self.access
    }

    /// Endpoints of the last listing.
    #[must_use]
    pub fn endpoints(&self) -> &[OutputEndpoint] {
        &self.endpoints
    }

    pub fn list_outputs(&mut self) -> Result<&[OutputEndpoint]> {
        let endpoints = match self.access.output_endpoints() {
            Ok(endpoints) => endpoints,
            Err(err) => {
                log::warn!("Failed to list MIDI outputs: {err}");
                self.endpoints.clear();
                return Err(err);
            }
        };
        for endpoint in &endpoints {
            log::debug!(
                "Found MIDI output \"{name}\" ({id})",
                name = endpoint.name,
                id = endpoint.id
            );
        }
        self.endpoints = endpoints;
        Ok(&self.endpoints)
    }

    #[must_use]
    pub fn find_endpoint(&self, id: &EndpointId) -> Option<&OutputEndpoint> {
        self.endpoints.iter().find(|endpoint| endpoint.id == *id)
    }

    /// Open a session for an endpoint of the last listing.
    pub fn connect(&mut self, id: &EndpointId) -> Result<ActiveSession<A::Connection>> {
        let Some(endpoint) = self.find_endpoint(id).cloned() else {
            log::warn!("Unknown MIDI output {id}");
            return Err(Error::DeviceNotFound { id: id.clone() });
        };
        log::info!("Connecting MIDI output \"{name}\"", name = endpoint.name);
        let connection = self.access.open_output(&endpoint)?;
        Ok(ActiveSession::new(endpoint, connection))
    }
}
