// SPDX-FileCopyrightText: The msw810 authors
// SPDX-License-Identifier: MPL-2.0

#![allow(rustdoc::invalid_rust_codeblocks)]
#![doc = include_str!("../README.md")]
#![warn(rust_2018_idioms)]
#![warn(rust_2021_compatibility)]
#![warn(missing_debug_implementations)]
#![warn(unreachable_pub)]
#![warn(unsafe_code)]
#![warn(clippy::pedantic)]
#![warn(clippy::clone_on_ref_ptr)]
#![warn(rustdoc::broken_intra_doc_links)]
// Repetitions of module/type names occur frequently when using many
// modules for keeping the size of the source files handy. Often
// types have the same name as their parent module.
#![allow(clippy::module_name_repetitions)]
// Repeating the type name in `..Default::default()` expressions
// is not needed since the context is obvious.
#![allow(clippy::default_trait_access)]

mod directory;
#[cfg(feature = "midir")]
pub use self::directory::MidirAccess;
pub use self::directory::{
    ActiveSession, DeviceDirectory, EndpointId, MidiAccess, MidiOutputConnection, OutputEndpoint,
};

mod dispatcher;
pub use self::dispatcher::{ConnectRequest, ConnectToken, Dispatcher};

mod error;
pub use self::error::{Error, Result};

mod notification;
pub use self::notification::{Level, Notification, NotificationSink, Operation};

mod panel;
pub use self::panel::{Config, ConfigPanel, DEFAULT_CLIENT_NAME};

mod param;
pub use self::param::{Channel, NotePriority, Param, ParamError, ParameterState, RootOctave};

pub mod sysex;
pub use self::sysex::{Command, DecodeError, HexBytes, Opcode, SysExMessage};

#[cfg(test)]
mod testing;
