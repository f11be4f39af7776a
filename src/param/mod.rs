// SPDX-FileCopyrightText: The msw810 authors
// SPDX-License-Identifier: MPL-2.0

//! Device parameters
//!
//! Typed, range-checked values of the parameters that could be written
//! to the device. Only values that have been sent successfully are
//! committed to the [`ParameterState`].

use std::str::FromStr;

use derive_more::Display;
use strum::{EnumCount, EnumIter, FromRepr};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display)]
pub enum Param {
    #[strum(serialize = "channel")]
    Channel,
    #[strum(serialize = "note priority")]
    NotePriority,
    #[strum(serialize = "root octave")]
    RootOctave,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParamError {
    #[error("{param} out of range: {value} (expected {min}..={max})")]
    OutOfRange { param: Param, value: u8, min: u8, max: u8 },

    #[error("invalid {param}: \"{input}\"")]
    Invalid { param: Param, input: String },
}

fn check_range(param: Param, value: u8, min: u8, max: u8) -> Result<u8, ParamError> {
    if (min..=max).contains(&value) {
        Ok(value)
    } else {
        Err(ParamError::OutOfRange {
            param,
            value,
            min,
            max,
        })
    }
}

/// Parse the decimal value of a UI selection.
fn parse_selection(param: Param, input: &str) -> Result<u8, ParamError> {
    input.trim().parse().map_err(|_| ParamError::Invalid {
        param,
        input: input.to_owned(),
    })
}

/// MIDI channel as displayed to the user, i.e. 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
pub struct Channel(u8);

impl Channel {
    pub const MIN: Self = Self(1);
    pub const MAX: Self = Self(16);

    pub fn new(channel: u8) -> Result<Self, ParamError> {
        check_range(Param::Channel, channel, Self::MIN.0, Self::MAX.0).map(Self)
    }

    /// Inverse of [`Self::wire_value()`].
    pub fn from_wire_value(wire_value: u8) -> Result<Self, ParamError> {
        Self::new(wire_value.saturating_add(1))
    }

    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }

    /// The 0-based channel number that is sent to the device.
    #[must_use]
    pub const fn wire_value(self) -> u8 {
        self.0 - 1
    }

    pub fn iter() -> impl Iterator<Item = Self> {
        (Self::MIN.0..=Self::MAX.0).map(Self)
    }
}

impl Default for Channel {
    fn default() -> Self {
        Self::MIN
    }
}

impl FromStr for Channel {
    type Err = ParamError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(parse_selection(Param::Channel, s)?)
    }
}

/// Which note wins when multiple keys are held down.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    EnumCount,
    EnumIter,
    FromRepr,
    strum::Display,
)]
#[repr(u8)]
pub enum NotePriority {
    #[default]
    #[strum(serialize = "Low Note")]
    Low = 0,
    #[strum(serialize = "High Note")]
    High = 1,
    #[strum(serialize = "Last Note")]
    Last = 2,
}

impl NotePriority {
    pub fn from_wire_value(wire_value: u8) -> Result<Self, ParamError> {
        Self::from_repr(wire_value).ok_or(ParamError::OutOfRange {
            param: Param::NotePriority,
            value: wire_value,
            min: Self::Low as u8,
            max: Self::Last as u8,
        })
    }

    #[must_use]
    pub const fn wire_value(self) -> u8 {
        self as u8
    }
}

impl FromStr for NotePriority {
    type Err = ParamError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_wire_value(parse_selection(Param::NotePriority, s)?)
    }
}

/// Octave of the lowest key.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
pub struct RootOctave(u8);

impl RootOctave {
    pub const MIN: Self = Self(0);
    pub const MAX: Self = Self(5);

    pub fn new(octave: u8) -> Result<Self, ParamError> {
        check_range(Param::RootOctave, octave, Self::MIN.0, Self::MAX.0).map(Self)
    }

    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }

    /// The octave is sent as is.
    #[must_use]
    pub const fn wire_value(self) -> u8 {
        self.0
    }

    pub fn iter() -> impl Iterator<Item = Self> {
        (Self::MIN.0..=Self::MAX.0).map(Self)
    }
}

impl FromStr for RootOctave {
    type Err = ParamError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(parse_selection(Param::RootOctave, s)?)
    }
}

/// Last known device configuration
///
/// Mirrors the values that have been acknowledged, i.e. sent
/// without an error. The defaults match the initial selections
/// that are displayed before anything has been sent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParameterState {
    pub channel: Channel,
    pub note_priority: NotePriority,
    pub root_octave: RootOctave,
}
