// SPDX-FileCopyrightText: The msw810 authors
// SPDX-License-Identifier: MPL-2.0

//! Virtual MIDI backend for tests

use std::{cell::RefCell, rc::Rc};

use crate::{EndpointId, Error, MidiAccess, MidiOutputConnection, OutputEndpoint, Result};

/// Messages on the wire, tagged with the receiving endpoint.
pub(crate) type Wire = Rc<RefCell<Vec<(EndpointId, Vec<u8>)>>>;

#[derive(Debug)]
pub(crate) struct VirtualConnection {
    endpoint_id: EndpointId,
    wire: Wire,
    broken: Rc<RefCell<bool>>,
}

impl MidiOutputConnection for VirtualConnection {
    fn send_midi_output(&mut self, output: &[u8]) -> Result<()> {
        if *self.broken.borrow() {
            return Err(Error::Send {
                msg: "broken pipe".into(),
            });
        }
        self.wire
            .borrow_mut()
            .push((self.endpoint_id.clone(), output.to_vec()));
        Ok(())
    }
}

#[derive(Debug, Default)]
pub(crate) struct VirtualMidiAccess {
    endpoints: Vec<OutputEndpoint>,
    denied: bool,
    wire: Wire,
    broken: Rc<RefCell<bool>>,
}

impl VirtualMidiAccess {
    pub(crate) fn new(ids: &[&str]) -> Self {
        let endpoints = ids
            .iter()
            .map(|id| OutputEndpoint {
                id: (*id).into(),
                name: format!("MSW-810 {id}"),
            })
            .collect();
        Self {
            endpoints,
            ..Default::default()
        }
    }

    pub(crate) fn deny(&mut self) {
        self.denied = true;
    }

    pub(crate) fn unplug(&mut self, id: &str) {
        self.endpoints.retain(|endpoint| endpoint.id.as_str() != id);
    }

    /// Make all sends fail.
    pub(crate) fn break_connections(&self) {
        *self.broken.borrow_mut() = true;
    }

    pub(crate) fn wire(&self) -> Wire {
        Rc::clone(&self.wire)
    }
}

impl MidiAccess for VirtualMidiAccess {
    type Connection = VirtualConnection;

    fn output_endpoints(&mut self) -> Result<Vec<OutputEndpoint>> {
        if self.denied {
            return Err(Error::CapabilityUnavailable {
                msg: "permission denied".into(),
            });
        }
        Ok(self.endpoints.clone())
    }

    fn open_output(&mut self, endpoint: &OutputEndpoint) -> Result<Self::Connection> {
        if !self.endpoints.iter().any(|known| known.id == endpoint.id) {
            return Err(Error::DeviceNotFound {
                id: endpoint.id.clone(),
            });
        }
        Ok(VirtualConnection {
            endpoint_id: endpoint.id.clone(),
            wire: Rc::clone(&self.wire),
            broken: Rc::clone(&self.broken),
        })
    }
}
