// SPDX-FileCopyrightText: The msw810 authors
// SPDX-License-Identifier: MPL-2.0

//! Config panel
//!
//! Entry point for user interfaces. Each user action is mapped onto
//! a method and each invocation results in exactly one [`Notification`].

use std::borrow::Cow;

use crate::{
    Channel, Command, DeviceDirectory, Dispatcher, EndpointId, MidiAccess, NotePriority,
    Notification, NotificationSink, Operation, OutputEndpoint, ParameterState, Result, RootOctave,
};

pub const DEFAULT_CLIENT_NAME: &str = "MSW-810 Config";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Client name that is registered with the MIDI subsystem.
    pub client_name: Cow<'static, str>,

    /// Connect the first endpoint after listing all available endpoints.
    pub auto_select_first: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            client_name: Cow::Borrowed(DEFAULT_CLIENT_NAME),
            auto_select_first: true,
        }
    }
}

#[allow(missing_debug_implementations)]
pub struct ConfigPanel<A, N>
where
    A: MidiAccess,
{
    config: Config,
    directory: DeviceDirectory<A>,
    dispatcher: Dispatcher<A::Connection>,
    notifications: N,
}

#[cfg(feature = "midir")]
impl<N> ConfigPanel<crate::MidirAccess, N>
where
    N: NotificationSink,
{
    /// Config panel for the system's MIDI outputs.
    #[must_use]
    pub fn with_midir(config: Config, notifications: N) -> Self {
        let access = crate::MidirAccess::new(config.client_name.clone());
        Self::new(config, access, notifications)
    }
}

impl<A, N> ConfigPanel<A, N>
where
    A: MidiAccess,
    N: NotificationSink,
{
    #[must_use]
    pub fn new(config: Config, access: A, notifications: N) -> Self {
        Self {
            config,
            directory: DeviceDirectory::new(access),
            dispatcher: Dispatcher::new(),
            notifications,
        }
    }

    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    #[must_use]
    pub fn endpoints(&self) -> &[OutputEndpoint] {
        self.directory.endpoints()
    }

    #[must_use]
    pub fn active_endpoint(&self) -> Option<&OutputEndpoint> {
        self.dispatcher.active_endpoint()
    }

    #[must_use]
    pub const fn parameters(&self) -> &ParameterState {
        self.dispatcher.parameters()
    }

    #[cfg(feature = "observables")]
    #[must_use]
    pub fn subscribe_parameters(&self) -> discro::Subscriber<ParameterState> {
        self.dispatcher.subscribe_parameters()
    }

    #[must_use]
    pub const fn notifications(&self) -> &N {
        &self.notifications
    }

    pub fn notifications_mut(&mut self) -> &mut N {
        &mut self.notifications
    }

    /// List all endpoints.
    ///
    /// The first endpoint is selected if configured. A failure to
    /// select it is reported separately and does not fail the listing.
    pub fn refresh_devices(&mut self) -> Result<()> {
        let operation = Operation::ListDevices;
        let endpoints = match self.directory.list_outputs() {
            Ok(endpoints) => endpoints,
            Err(err) => {
                self.notifications
                    .sink_notification(Notification::error(operation, err.to_string()));
                return Err(err);
            }
        };
        let num_endpoints = endpoints.len();
        let first_id = endpoints.first().map(|endpoint| endpoint.id.clone());
        self.notifications.sink_notification(Notification::success(
            operation,
            format!("Found {num_endpoints} MIDI output(s)"),
        ));
        if !self.config.auto_select_first {
            return Ok(());
        }
        let Some(first_id) = first_id else {
            log::debug!("No MIDI output available for auto-selection");
            return Ok(());
        };
        if let Err(err) = self.select_device(&first_id) {
            log::debug!("Auto-selection of {first_id} failed: {err}");
        }
        Ok(())
    }

    /// Replace the current session.
    ///
    /// The current session is closed even if the new endpoint cannot
    /// be connected.
    pub fn select_device(&mut self, id: &EndpointId) -> Result<()> {
        let operation = Operation::Connect;
        let request = self.dispatcher.begin_connect(id.clone());
        let result = self.directory.connect(id);
        match self.dispatcher.finish_connect(request, result) {
            Ok(endpoint) => {
                let message = format!("Connected to {name}", name = endpoint.name);
                self.notifications
                    .sink_notification(Notification::success(operation, message));
                Ok(())
            }
            Err(err) => {
                self.notifications.sink_notification(Notification::error(
                    operation,
                    format!("Failed to connect: {err}"),
                ));
                Err(err)
            }
        }
    }

    /// Close the current session, if any.
    pub fn disconnect(&mut self) {
        let message = match self.dispatcher.disconnect() {
            Some(session) => format!("Disconnected from {name}", name = session.endpoint().name),
            None => "No device connected".to_owned(),
        };
        self.notifications
            .sink_notification(Notification::success(Operation::Disconnect, message));
    }

    pub fn set_channel(&mut self, channel: Channel) -> Result<()> {
        self.dispatch(Command::SetChannel(channel))
    }

    pub fn set_note_priority(&mut self, note_priority: NotePriority) -> Result<()> {
        self.dispatch(Command::SetNotePriority(note_priority))
    }

    pub fn set_root_octave(&mut self, root_octave: RootOctave) -> Result<()> {
        self.dispatch(Command::SetRootOctave(root_octave))
    }

    pub fn reboot_to_bootloader(&mut self) -> Result<()> {
        self.dispatch(Command::RebootToBootloader)
    }

    pub fn calibrate(&mut self) -> Result<()> {
        self.dispatch(Command::FullCalibration)
    }

    pub fn quick_calibrate(&mut self) -> Result<()> {
        self.dispatch(Command::QuickCalibration)
    }

    pub fn dispatch(&mut self, command: Command) -> Result<()> {
        let operation = Operation::Command(command.opcode());
        match self.dispatcher.send_command(command) {
            Ok(()) => {
                self.notifications
                    .sink_notification(Notification::success(operation, command.to_string()));
                Ok(())
            }
            Err(err) => {
                self.notifications.sink_notification(Notification::error(
                    operation,
                    format!("{command}: {err}"),
                ));
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests;
