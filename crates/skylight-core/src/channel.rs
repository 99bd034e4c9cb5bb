//! Output channels: the named color and scalar bindings a blended frame
//! state exposes to the renderer.
//!
//! Colors are authored as packed `0xRRGGBB` integers and decoded to linear
//! `[0, 1]` triples via [`unpack_rgb`].

use glam::Vec3;
use thiserror::Error;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors raised when resolving a raw channel index.
///
/// Passing an unknown index is a contract violation by the caller, not a
/// runtime condition to paper over with a default value.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ChannelError {
    /// The raw index does not name any known channel.
    #[error("invalid channel index: {0}")]
    InvalidChannel(u32),
}

// ---------------------------------------------------------------------------
// ColorChannel
// ---------------------------------------------------------------------------

/// A named color binding produced by the blend each frame.
///
/// The five sky bands are listed top-down as the renderer paints the dome.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ColorChannel {
    /// Global ambient term applied to all geometry.
    Ambient,
    /// Global diffuse (sun-facing) term.
    Diffuse,
    /// Sky dome, zenith band.
    SkyTop,
    /// Sky dome, upper middle band.
    SkyMiddle,
    /// Sky dome, lower middle band.
    SkyMiddleLower,
    /// Sky dome, lower band.
    SkyLower,
    /// Sky dome, horizon band.
    SkyHorizon,
    /// Distance fog color.
    Fog,
    /// Sun disk color.
    Sun,
    /// Sun halo color.
    Halo,
    /// Cloud layer color.
    Cloud,
}

impl ColorChannel {
    /// All named color channels, in slot order.
    pub const ALL: [ColorChannel; 11] = [
        ColorChannel::Ambient,
        ColorChannel::Diffuse,
        ColorChannel::SkyTop,
        ColorChannel::SkyMiddle,
        ColorChannel::SkyMiddleLower,
        ColorChannel::SkyLower,
        ColorChannel::SkyHorizon,
        ColorChannel::Fog,
        ColorChannel::Sun,
        ColorChannel::Halo,
        ColorChannel::Cloud,
    ];

    /// Number of named color channels.
    pub const COUNT: usize = Self::ALL.len();

    /// Buffer slot for this channel.
    pub const fn slot(self) -> usize {
        self as usize
    }

    /// Resolve a raw channel index.
    ///
    /// # Errors
    ///
    /// Returns [`ChannelError::InvalidChannel`] if the index names no
    /// channel. Reserved blend slots above the named range are not
    /// addressable through this conversion.
    pub fn from_index(index: u32) -> Result<Self, ChannelError> {
        Self::ALL
            .get(index as usize)
            .copied()
            .ok_or(ChannelError::InvalidChannel(index))
    }
}

// ---------------------------------------------------------------------------
// ScalarChannel
// ---------------------------------------------------------------------------

/// A named scalar binding produced by the blend each frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ScalarChannel {
    /// Fog density factor.
    FogDensity,
    /// Distance at which fog reaches full opacity.
    FogEnd,
    /// Multiplier applied to the fog range.
    FogScale,
}

impl ScalarChannel {
    /// All scalar channels, in slot order.
    pub const ALL: [ScalarChannel; 3] = [
        ScalarChannel::FogDensity,
        ScalarChannel::FogEnd,
        ScalarChannel::FogScale,
    ];

    /// Number of scalar channels.
    pub const COUNT: usize = Self::ALL.len();

    /// Buffer slot for this channel.
    pub const fn slot(self) -> usize {
        self as usize
    }

    /// Resolve a raw channel index.
    ///
    /// # Errors
    ///
    /// Returns [`ChannelError::InvalidChannel`] if the index names no
    /// channel.
    pub fn from_index(index: u32) -> Result<Self, ChannelError> {
        Self::ALL
            .get(index as usize)
            .copied()
            .ok_or(ChannelError::InvalidChannel(index))
    }
}

// ---------------------------------------------------------------------------
// Packed color decoding
// ---------------------------------------------------------------------------

/// Decode a packed `0xRRGGBB` color to a linear `[0, 1]` triple.
///
/// The top byte is ignored; authored records store colors in 24 bits.
pub fn unpack_rgb(value: u32) -> Vec3 {
    Vec3::new(
        ((value & 0x00FF_0000) >> 16) as f32 / 255.0,
        ((value & 0x0000_FF00) >> 8) as f32 / 255.0,
        (value & 0x0000_00FF) as f32 / 255.0,
    )
}
