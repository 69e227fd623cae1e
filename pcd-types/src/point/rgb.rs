use std::fmt;

use bitcode::{Decode, Encode};
use serde::{Deserialize, Serialize};

use crate::error::{Channel, RangeError};

/// An 8-bit per channel RGB colour.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Encode, Decode,
)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Builds a colour from wide integers, rejecting components outside 0..=255.
    ///
    /// Channels are checked in r, g, b order and the first offending one is reported.
    pub fn try_new(r: i64, g: i64, b: i64) -> Result<Self, RangeError> {
        Ok(Self {
            r: component(Channel::Red, r)?,
            g: component(Channel::Green, g)?,
            b: component(Channel::Blue, b)?,
        })
    }

    /// Scales 16-bit channels (as stored by LAS files) down to 8 bits.
    pub fn from_rgb16(r: u16, g: u16, b: u16) -> Self {
        Self {
            r: (r as f64 / 65535.0 * 255.0) as u8,
            g: (g as f64 / 65535.0 * 255.0) as u8,
            b: (b as f64 / 65535.0 * 255.0) as u8,
        }
    }

    /// Widens each channel to 16 bits so that 255 maps to 65535.
    pub fn to_rgb16(&self) -> [u16; 3] {
        [
            self.r as u16 * 257,
            self.g as u16 * 257,
            self.b as u16 * 257,
        ]
    }

    /// Packs the colour as `0x00RRGGBB`.
    pub fn to_packed(&self) -> u32 {
        (self.r as u32) << 16 | (self.g as u32) << 8 | self.b as u32
    }

    /// Unpacks a `0x??RRGGBB` value. The top byte is ignored.
    pub fn from_packed(packed: u32) -> Self {
        Self {
            r: (packed >> 16) as u8,
            g: (packed >> 8) as u8,
            b: packed as u8,
        }
    }

    pub fn to_array(&self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }
}

fn component(channel: Channel, value: i64) -> Result<u8, RangeError> {
    u8::try_from(value).map_err(|_| {
        log::debug!("rejecting {} component {}", channel, value);
        RangeError { channel, value }
    })
}

impl From<[u8; 3]> for Rgb {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Self::new(r, g, b)
    }
}

impl From<Rgb> for [u8; 3] {
    fn from(color: Rgb) -> Self {
        color.to_array()
    }
}

impl TryFrom<(i64, i64, i64)> for Rgb {
    type Error = RangeError;

    fn try_from((r, g, b): (i64, i64, i64)) -> Result<Self, Self::Error> {
        Self::try_new(r, g, b)
    }
}

impl TryFrom<[i64; 3]> for Rgb {
    type Error = RangeError;

    fn try_from([r, g, b]: [i64; 3]) -> Result<Self, Self::Error> {
        Self::try_new(r, g, b)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.r, self.g, self.b)
    }
}
