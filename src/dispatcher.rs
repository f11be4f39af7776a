// SPDX-FileCopyrightText: The msw810 authors
// SPDX-License-Identifier: MPL-2.0

use derive_more::Display;

use crate::{
    ActiveSession, Command, EndpointId, Error, HexBytes, MidiOutputConnection, OutputEndpoint,
    ParameterState, Result,
};

/// Identifies a connection request.
///
/// Issued in strictly increasing order. Only the result of the
/// most recent request is accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
#[display("#{_0}")]
pub struct ConnectToken(u64);

#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use]
pub struct ConnectRequest {
    pub token: ConnectToken,
    pub endpoint_id: EndpointId,
}

/// Sends commands through the active session.
///
/// Owns the single session slot and the acknowledged parameter values.
#[allow(missing_debug_implementations)]
pub struct Dispatcher<C> {
    session: Option<ActiveSession<C>>,
    last_connect_token: ConnectToken,
    parameters: ParameterState,
    #[cfg(feature = "observables")]
    parameters_pub: discro::Publisher<ParameterState>,
}

impl<C> Default for Dispatcher<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> Dispatcher<C> {
    #[must_use]
    pub fn new() -> Self {
        let parameters = ParameterState::default();
        Self {
            session: None,
            last_connect_token: ConnectToken(0),
            parameters,
            #[cfg(feature = "observables")]
            parameters_pub: discro::Publisher::new(parameters),
        }
    }

    #[must_use]
    pub const fn is_connected(&self) -> bool {
        self.session.is_some()
    }

    #[must_use]
    pub fn active_endpoint(&self) -> Option<&OutputEndpoint> {
        self.session.as_ref().map(ActiveSession::endpoint)
    }

    #[must_use]
    pub const fn parameters(&self) -> &ParameterState {
        &self.parameters
    }

    /// Observe the acknowledged parameter values.
    #[cfg(feature = "observables")]
    #[must_use]
    pub fn subscribe_parameters(&self) -> discro::Subscriber<ParameterState> {
        self.parameters_pub.subscribe()
    }

    /// Start connecting another endpoint.
    ///
    /// The current session is discarded immediately, regardless of
    /// the outcome. Sends are rejected until the request has been
    /// finished successfully.
    pub fn begin_connect(&mut self, endpoint_id: EndpointId) -> ConnectRequest {
        self.disconnect();
        self.last_connect_token = ConnectToken(self.last_connect_token.0 + 1);
        ConnectRequest {
            token: self.last_connect_token,
            endpoint_id,
        }
    }

    /// Install the resolved session of a request.
    ///
    /// Results of outdated requests are dropped and rejected with
    /// [`Error::Superseded`].
    pub fn finish_connect(
        &mut self,
        request: ConnectRequest,
        result: Result<ActiveSession<C>>,
    ) -> Result<&OutputEndpoint> {
        let ConnectRequest { token, endpoint_id } = request;
        if token != self.last_connect_token {
            debug_assert!(token < self.last_connect_token);
            log::debug!(
                "Discarding outdated connection request {token} for {endpoint_id} (latest: {latest})",
                latest = self.last_connect_token
            );
            return Err(Error::Superseded { token });
        }
        debug_assert!(self.session.is_none());
        let session = result.inspect_err(|err| {
            log::warn!("Failed to connect {endpoint_id}: {err}");
        })?;
        debug_assert_eq!(endpoint_id, session.endpoint().id);
        log::info!(
            "Connected MIDI output \"{name}\"",
            name = session.endpoint().name
        );
        Ok(self.session.insert(session).endpoint())
    }

    pub fn disconnect(&mut self) -> Option<ActiveSession<C>> {
        let session = self.session.take()?;
        log::info!(
            "Disconnecting MIDI output \"{name}\"",
            name = session.endpoint().name
        );
        Some(session)
    }
}

impl<C> Dispatcher<C>
where
    C: MidiOutputConnection,
{
    /// Write a message to the active session.
    ///
    /// Nothing is transmitted without a session. The platform does
    /// not confirm the delivery.
    pub fn send(&mut self, bytes: &[u8]) -> Result<()> {
        let Some(session) = &mut self.session else {
            log::warn!("Rejected {bytes}: No device selected", bytes = HexBytes(bytes));
            return Err(Error::NoDeviceSelected);
        };
        log::info!(
            "Sending {bytes} to \"{name}\"",
            bytes = HexBytes(bytes),
            name = session.endpoint().name
        );
        session.connection_mut().send_midi_output(bytes)
    }

    /// Encode and send a command.
    ///
    /// Parameter values are only committed after they have been sent.
    pub fn send_command(&mut self, command: Command) -> Result<()> {
        self.send(command.encode().as_bytes())?;
        let mut parameters = self.parameters;
        match command {
            Command::SetChannel(channel) => parameters.channel = channel,
            Command::SetRootOctave(octave) => parameters.root_octave = octave,
            Command::SetNotePriority(priority) => parameters.note_priority = priority,
            Command::RebootToBootloader | Command::FullCalibration | Command::QuickCalibration => {
                return Ok(());
            }
        }
        self.commit_parameters(parameters);
        Ok(())
    }

    fn commit_parameters(&mut self, parameters: ParameterState) {
        if self.parameters == parameters {
            return;
        }
        self.parameters = parameters;
        #[cfg(feature = "observables")]
        self.parameters_pub.write(parameters);
    }
}
