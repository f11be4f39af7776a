// SPDX-FileCopyrightText: The msw810 authors
// SPDX-License-Identifier: MPL-2.0

use std::borrow::Cow;

use midir::{ConnectError, InitError, MidiOutput, MidiOutputConnection, SendError};

use super::{MidiAccess, OutputEndpoint};
use crate::{Error, Result};

impl From<InitError> for Error {
    fn from(err: InitError) -> Self {
        Error::CapabilityUnavailable {
            msg: err.to_string().into(),
        }
    }
}

impl From<ConnectError<MidiOutput>> for Error {
    fn from(err: ConnectError<MidiOutput>) -> Self {
        Error::Connect {
            msg: err.to_string().into(),
        }
    }
}

impl From<SendError> for Error {
    fn from(err: SendError) -> Self {
        Error::Send {
            msg: err.to_string().into(),
        }
    }
}

/// [`MidiAccess`] driven by [`midir`].
///
/// Endpoints are identified by the port ids of [`midir`].
#[derive(Debug, Clone)]
pub struct MidirAccess {
    client_name: Cow<'static, str>,
}

impl MidirAccess {
    #[must_use]
    pub const fn new(client_name: Cow<'static, str>) -> Self {
        Self { client_name }
    }

    fn new_output(&self) -> Result<MidiOutput> {
        MidiOutput::new(&self.client_name).map_err(Into::into)
    }
}

impl MidiAccess for MidirAccess {
    type Connection = MidiOutputConnection;

    fn output_endpoints(&mut self) -> Result<Vec<OutputEndpoint>> {
        let output = self.new_output()?;
        let endpoints = output
            .ports()
            .into_iter()
            .filter_map(|port| {
                let name = match output.port_name(&port) {
                    Ok(name) => name,
                    Err(err) => {
                        log::debug!("Skipping MIDI output port {id}: {err}", id = port.id());
                        return None;
                    }
                };
                Some(OutputEndpoint {
                    id: port.id().into(),
                    name,
                })
            })
            .collect();
        Ok(endpoints)
    }

    fn open_output(&mut self, endpoint: &OutputEndpoint) -> Result<Self::Connection> {
        let output = self.new_output()?;
        let Some(port) = output.find_port_by_id(endpoint.id.to_string()) else {
            return Err(Error::DeviceNotFound {
                id: endpoint.id.clone(),
            });
        };
        output
            .connect(&port, &endpoint.name)
            .map_err(Into::into)
    }
}

impl super::MidiOutputConnection for MidiOutputConnection {
    fn send_midi_output(&mut self, output: &[u8]) -> Result<()> {
        self.send(output).map_err(Into::into)
    }
}
