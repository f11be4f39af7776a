// SPDX-FileCopyrightText: The msw810 authors
// SPDX-License-Identifier: MPL-2.0

//! SysEx wire format
//!
//! All messages share the same envelope:
//!
//! ```text
//! F0 7D 08 10 <opcode> [<param>] F7
//! ```

use std::fmt;

use strum::{EnumCount, EnumIter, FromRepr};
use thiserror::Error;

use crate::{Channel, NotePriority, ParamError, RootOctave};

pub const SYSEX_START: u8 = 0xf0;
pub const SYSEX_END: u8 = 0xf7;

/// Non-commercial/educational manufacturer ID.
pub const MANUFACTURER_ID: u8 = 0x7d;

pub const PRODUCT_FAMILY: [u8; 2] = [0x08, 0x10];

const HEADER: [u8; 4] = [SYSEX_START, MANUFACTURER_ID, PRODUCT_FAMILY[0], PRODUCT_FAMILY[1]];

const MIN_MESSAGE_LEN: usize = HEADER.len() + 2;
const MAX_MESSAGE_LEN: usize = MIN_MESSAGE_LEN + 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumCount, EnumIter, FromRepr, strum::Display)]
#[repr(u8)]
pub enum Opcode {
    QuickCalibration = 0x0a,
    RebootToBootloader = 0x0b,
    SetChannel = 0x0c,
    SetRootOctave = 0x0d,
    SetNotePriority = 0x0e,
    FullCalibration = 0x0f,
}

impl Opcode {
    #[must_use]
    pub const fn to_u8(self) -> u8 {
        self as u8
    }

    /// Followed by a single parameter byte?
    #[must_use]
    pub const fn has_param(self) -> bool {
        match self {
            Self::SetChannel | Self::SetRootOctave | Self::SetNotePriority => true,
            Self::QuickCalibration | Self::RebootToBootloader | Self::FullCalibration => false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    SetChannel(Channel),
    SetRootOctave(RootOctave),
    SetNotePriority(NotePriority),
    RebootToBootloader,
    FullCalibration,
    QuickCalibration,
}

impl Command {
    #[must_use]
    pub const fn opcode(self) -> Opcode {
        match self {
            Self::SetChannel(_) => Opcode::SetChannel,
            Self::SetRootOctave(_) => Opcode::SetRootOctave,
            Self::SetNotePriority(_) => Opcode::SetNotePriority,
            Self::RebootToBootloader => Opcode::RebootToBootloader,
            Self::FullCalibration => Opcode::FullCalibration,
            Self::QuickCalibration => Opcode::QuickCalibration,
        }
    }

    /// The parameter byte, if any.
    #[must_use]
    pub const fn param(self) -> Option<u8> {
        match self {
            Self::SetChannel(channel) => Some(channel.wire_value()),
            Self::SetRootOctave(octave) => Some(octave.wire_value()),
            Self::SetNotePriority(priority) => Some(priority.wire_value()),
            Self::RebootToBootloader | Self::FullCalibration | Self::QuickCalibration => None,
        }
    }

    #[must_use]
    pub fn encode(self) -> SysExMessage {
        let mut message = SysExMessage::new(self.opcode());
        if let Some(param) = self.param() {
            message.push(param);
        }
        message.push(SYSEX_END);
        message
    }

    pub fn try_decode(input: &[u8]) -> Result<Self, DecodeError> {
        let Some((&SYSEX_END, input)) = input.split_last() else {
            return Err(DecodeError::Framing);
        };
        let Some(input) = input.strip_prefix(&HEADER[..1]) else {
            return Err(DecodeError::Framing);
        };
        let Some(input) = input.strip_prefix(&HEADER[1..]) else {
            return Err(DecodeError::Header);
        };
        let Some((&opcode, params)) = input.split_first() else {
            return Err(DecodeError::Length {
                opcode: None,
                num_params: 0,
            });
        };
        let Some(opcode) = Opcode::from_repr(opcode) else {
            return Err(DecodeError::UnknownOpcode(opcode));
        };
        let command = match (opcode, params) {
            (Opcode::SetChannel, &[param]) => Self::SetChannel(Channel::from_wire_value(param)?),
            (Opcode::SetRootOctave, &[param]) => Self::SetRootOctave(RootOctave::new(param)?),
            (Opcode::SetNotePriority, &[param]) => {
                Self::SetNotePriority(NotePriority::from_wire_value(param)?)
            }
            (Opcode::RebootToBootloader, []) => Self::RebootToBootloader,
            (Opcode::FullCalibration, []) => Self::FullCalibration,
            (Opcode::QuickCalibration, []) => Self::QuickCalibration,
            (opcode, params) => {
                return Err(DecodeError::Length {
                    opcode: Some(opcode),
                    num_params: params.len(),
                });
            }
        };
        debug_assert_eq!(opcode.has_param(), command.param().is_some());
        Ok(command)
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SetChannel(channel) => write!(f, "Set channel {channel}"),
            Self::SetRootOctave(octave) => write!(f, "Set root octave {octave}"),
            Self::SetNotePriority(priority) => write!(f, "Set note priority {priority}"),
            Self::RebootToBootloader => f.write_str("Reboot to bootloader"),
            Self::FullCalibration => f.write_str("Calibration"),
            Self::QuickCalibration => f.write_str("Quick calibration"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("not a SysEx message")]
    Framing,

    #[error("foreign manufacturer or product")]
    Header,

    #[error("unknown opcode 0x{0:02X}")]
    UnknownOpcode(u8),

    #[error("unexpected number of parameters: {num_params}")]
    Length {
        opcode: Option<Opcode>,
        num_params: usize,
    },

    #[error(transparent)]
    Param(#[from] ParamError),
}

/// Encoded SysEx message
///
/// Messages are short enough to be stored inline.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct SysExMessage {
    bytes: [u8; MAX_MESSAGE_LEN],
    len: usize,
}

impl SysExMessage {
    fn new(opcode: Opcode) -> Self {
        let mut bytes = [0; MAX_MESSAGE_LEN];
        bytes[..HEADER.len()].copy_from_slice(&HEADER);
        bytes[HEADER.len()] = opcode.to_u8();
        Self {
            bytes,
            len: HEADER.len() + 1,
        }
    }

    fn push(&mut self, byte: u8) {
        debug_assert!(self.len < MAX_MESSAGE_LEN);
        self.bytes[self.len] = byte;
        self.len += 1;
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..self.len]
    }
}

impl AsRef<[u8]> for SysExMessage {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl fmt::Debug for SysExMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SysExMessage")
            .field(&format_args!("{self}"))
            .finish()
    }
}

impl fmt::Display for SysExMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&HexBytes(self.as_bytes()), f)
    }
}

/// Uppercase, space-separated hex dump, e.g. `F0 7D 08 10 0C 04 F7`.
#[derive(Debug, Clone, Copy)]
pub struct HexBytes<'a>(pub &'a [u8]);

impl fmt::Display for HexBytes<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut bytes = self.0.iter();
        let Some(first) = bytes.next() else {
            return Ok(());
        };
        write!(f, "{first:02X}")?;
        for byte in bytes {
            write!(f, " {byte:02X}")?;
        }
        Ok(())
    }
}
