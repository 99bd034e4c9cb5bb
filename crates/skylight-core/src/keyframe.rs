//! Keyframe: one time-stamped snapshot of every channel value within a zone.

use glam::Vec3;

use crate::channel::{ColorChannel, ScalarChannel, unpack_rgb};

/// Length of one in-game day in time ticks (two ticks per minute).
pub const DAY_CYCLE: u32 = 2880;

/// A single authored sample on the day cycle.
///
/// Colors are stored packed as authored (`0xRRGGBB`) and decoded on read.
/// Keyframes are immutable once handed to a zone.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Keyframe {
    /// Position on the day cycle, in ticks. Not required to be unique
    /// within a zone.
    pub time: u32,
    /// Global ambient color.
    pub ambient: u32,
    /// Global diffuse color.
    pub diffuse: u32,
    /// Sky dome bands, zenith to horizon.
    pub sky_top: u32,
    /// Upper middle sky band.
    pub sky_middle: u32,
    /// Lower middle sky band.
    pub sky_middle_lower: u32,
    /// Lower sky band.
    pub sky_lower: u32,
    /// Horizon sky band.
    pub sky_horizon: u32,
    /// Distance fog color.
    pub fog: u32,
    /// Sun disk color.
    pub sun: u32,
    /// Sun halo color.
    pub halo: u32,
    /// Cloud layer color.
    pub cloud: u32,
    /// Fog density factor.
    pub fog_density: f32,
    /// Fog full-opacity distance.
    pub fog_end: f32,
    /// Fog range multiplier.
    pub fog_scale: f32,
}

impl Keyframe {
    /// Decoded color value for one channel.
    pub fn color(&self, channel: ColorChannel) -> Vec3 {
        let packed = match channel {
            ColorChannel::Ambient => self.ambient,
            ColorChannel::Diffuse => self.diffuse,
            ColorChannel::SkyTop => self.sky_top,
            ColorChannel::SkyMiddle => self.sky_middle,
            ColorChannel::SkyMiddleLower => self.sky_middle_lower,
            ColorChannel::SkyLower => self.sky_lower,
            ColorChannel::SkyHorizon => self.sky_horizon,
            ColorChannel::Fog => self.fog,
            ColorChannel::Sun => self.sun,
            ColorChannel::Halo => self.halo,
            ColorChannel::Cloud => self.cloud,
        };
        unpack_rgb(packed)
    }

    /// Scalar value for one channel.
    pub fn scalar(&self, channel: ScalarChannel) -> f32 {
        match channel {
            ScalarChannel::FogDensity => self.fog_density,
            ScalarChannel::FogEnd => self.fog_end,
            ScalarChannel::FogScale => self.fog_scale,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_keyframe(time: u32) -> Keyframe {
        Keyframe {
            time,
            ambient: 0x808080,
            diffuse: 0xFFFFFF,
            sky_top: 0x0000FF,
            sky_middle: 0x2040FF,
            sky_middle_lower: 0x4080FF,
            sky_lower: 0x80C0FF,
            sky_horizon: 0xFFE0C0,
            fog: 0xC0C0C0,
            sun: 0xFFFF80,
            halo: 0xFFFFC0,
            cloud: 0xF0F0F0,
            fog_density: 0.05,
            fog_end: 900.0,
            fog_scale: 0.4,
        }
    }

    #[test]
    fn test_color_reads_matching_field() {
        let kf = sample_keyframe(0);
        assert_eq!(kf.color(ColorChannel::Ambient), unpack_rgb(0x808080));
        assert_eq!(kf.color(ColorChannel::SkyHorizon), unpack_rgb(0xFFE0C0));
        assert_eq!(kf.color(ColorChannel::Cloud), unpack_rgb(0xF0F0F0));
    }

    #[test]
    fn test_scalar_reads_matching_field() {
        let kf = sample_keyframe(0);
        assert_eq!(kf.scalar(ScalarChannel::FogDensity), 0.05);
        assert_eq!(kf.scalar(ScalarChannel::FogEnd), 900.0);
        assert_eq!(kf.scalar(ScalarChannel::FogScale), 0.4);
    }

    #[test]
    fn test_every_named_channel_is_covered() {
        let kf = sample_keyframe(0);
        for channel in ColorChannel::ALL {
            let c = kf.color(channel);
            assert!(
                c.cmpge(Vec3::ZERO).all() && c.cmple(Vec3::ONE).all(),
                "decoded {channel:?} must stay in [0, 1], got {c}"
            );
        }
    }
}
