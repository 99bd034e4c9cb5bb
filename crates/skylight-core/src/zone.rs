//! Light zone: one spatial+temporal light definition.
//!
//! A [`LightZone`] owns a time-sorted keyframe table and answers per-channel
//! value queries for any point on the day cycle, with no knowledge of other
//! zones. Spatial blending across zones lives in
//! [`environment`](crate::environment).

use glam::Vec3;

use crate::channel::{ColorChannel, ScalarChannel};
use crate::keyframe::{DAY_CYCLE, Keyframe};
use crate::record::LightRecord;

/// Radii below this are treated as zero: the zone becomes a global
/// fallback light instead of a positioned volume.
const GLOBAL_RADIUS_EPSILON: f32 = 0.01;

/// One light definition: identity, placement, and a keyframe table.
///
/// Read-only after construction. Keyframes are sorted ascending by time once,
/// at build time; ties are broken arbitrarily.
#[derive(Clone, Debug)]
pub struct LightZone {
    light_id: u32,
    sky_id: u32,
    position: Vec3,
    inner_radius: f32,
    outer_radius: f32,
    keyframes: Vec<Keyframe>,
}

/// Result of the bracket search shared by every channel query.
enum Bracket {
    /// Use this keyframe's value directly.
    Exact(usize),
    /// Interpolate from the first index toward the second with the given
    /// blend factor.
    Span(usize, usize, f32),
}

impl LightZone {
    /// Build a zone from its record, sorting the keyframe table.
    pub fn from_record(record: &LightRecord) -> Self {
        let mut keyframes = record.keyframes.clone();
        keyframes.sort_by_key(|kf| kf.time);
        Self {
            light_id: record.light_id,
            sky_id: record.sky_id,
            position: record.position,
            inner_radius: record.inner_radius,
            outer_radius: record.outer_radius,
            keyframes,
        }
    }

    /// Identity of the light record this zone was built from.
    pub fn light_id(&self) -> u32 {
        self.light_id
    }

    /// Identity of the linked sky parameter record.
    pub fn sky_id(&self) -> u32 {
        self.sky_id
    }

    /// World-space center of the zone volume.
    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Radius of full dominance.
    pub fn inner_radius(&self) -> f32 {
        self.inner_radius
    }

    /// Radius beyond which the zone contributes nothing.
    pub fn outer_radius(&self) -> f32 {
        self.outer_radius
    }

    /// Whether this zone is a radius-less global fallback light.
    pub fn is_global(&self) -> bool {
        self.inner_radius < GLOBAL_RADIUS_EPSILON && self.outer_radius < GLOBAL_RADIUS_EPSILON
    }

    /// The sorted keyframe table.
    pub fn keyframes(&self) -> &[Keyframe] {
        &self.keyframes
    }

    /// Interpolated color for one channel at `time`.
    ///
    /// Returns `None` when the zone has no keyframes; callers treat that as
    /// zero contribution.
    pub fn color_at(&self, channel: ColorChannel, time: i32) -> Option<Vec3> {
        Some(match self.find_bracket(time)? {
            Bracket::Exact(i) => self.keyframes[i].color(channel),
            Bracket::Span(a, b, sat) => {
                let v1 = self.keyframes[a].color(channel);
                let v2 = self.keyframes[b].color(channel);
                v2 * sat + v1 * (1.0 - sat)
            }
        })
    }

    /// Interpolated scalar for one channel at `time`.
    ///
    /// Returns `None` when the zone has no keyframes.
    pub fn scalar_at(&self, channel: ScalarChannel, time: i32) -> Option<f32> {
        Some(match self.find_bracket(time)? {
            Bracket::Exact(i) => self.keyframes[i].scalar(channel),
            Bracket::Span(a, b, sat) => {
                let v1 = self.keyframes[a].scalar(channel);
                let v2 = self.keyframes[b].scalar(channel);
                v2 * sat + v1 * (1.0 - sat)
            }
        })
    }

    /// All color channels at `time`, using a single bracket search.
    pub fn colors_at(&self, time: i32) -> Option<[Vec3; ColorChannel::COUNT]> {
        let bracket = self.find_bracket(time)?;
        let mut out = [Vec3::ZERO; ColorChannel::COUNT];
        match bracket {
            Bracket::Exact(i) => {
                for channel in ColorChannel::ALL {
                    out[channel.slot()] = self.keyframes[i].color(channel);
                }
            }
            Bracket::Span(a, b, sat) => {
                for channel in ColorChannel::ALL {
                    let v1 = self.keyframes[a].color(channel);
                    let v2 = self.keyframes[b].color(channel);
                    out[channel.slot()] = v2 * sat + v1 * (1.0 - sat);
                }
            }
        }
        Some(out)
    }

    /// All scalar channels at `time`, using a single bracket search.
    pub fn scalars_at(&self, time: i32) -> Option<[f32; ScalarChannel::COUNT]> {
        let bracket = self.find_bracket(time)?;
        let mut out = [0.0; ScalarChannel::COUNT];
        match bracket {
            Bracket::Exact(i) => {
                for channel in ScalarChannel::ALL {
                    out[channel.slot()] = self.keyframes[i].scalar(channel);
                }
            }
            Bracket::Span(a, b, sat) => {
                for channel in ScalarChannel::ALL {
                    let v1 = self.keyframes[a].scalar(channel);
                    let v2 = self.keyframes[b].scalar(channel);
                    out[channel.slot()] = v2 * sat + v1 * (1.0 - sat);
                }
            }
        }
        Some(out)
    }

    /// Locate the keyframe pair bracketing `time` on the day cycle.
    ///
    /// Channel selection never changes the bracket, so every query shares
    /// this search. The steps, in order:
    ///
    /// 1. No keyframes: no data.
    /// 2. One keyframe: its value holds for every time input.
    /// 3. If the last keyframe sits at time zero (degenerate table) or the
    ///    query precedes the first keyframe, the first keyframe's value is
    ///    returned without interpolation. Checked before the modulo so
    ///    negative times land here too.
    /// 4. Wrap the query onto the cycle, then scan for the pair with
    ///    `kf[a].time <= time < kf[b].time`. Reaching the last keyframe
    ///    means the query falls after the final sample: interpolate across
    ///    midnight toward the first keyframe shifted by one cycle.
    /// 5. A non-increasing bracket (duplicate timestamps) short-circuits to
    ///    the earlier keyframe, which also keeps the divisor nonzero.
    fn find_bracket(&self, time: i32) -> Option<Bracket> {
        if self.keyframes.is_empty() {
            return None;
        }
        if self.keyframes.len() == 1 {
            return Some(Bracket::Exact(0));
        }

        let max_time = self.keyframes[self.keyframes.len() - 1].time;
        if max_time == 0 || self.keyframes[0].time as i64 > time as i64 {
            return Some(Bracket::Exact(0));
        }

        let time = time as u32 % DAY_CYCLE;

        let mut i = 0;
        loop {
            if i + 1 >= self.keyframes.len() {
                let t1 = self.keyframes[i].time;
                let t2 = self.keyframes[0].time + DAY_CYCLE;
                return Some(Self::bracket_between(i, 0, t1, t2, time));
            }
            if self.keyframes[i].time > time || self.keyframes[i + 1].time <= time {
                i += 1;
                continue;
            }
            let t1 = self.keyframes[i].time;
            let t2 = self.keyframes[i + 1].time;
            return Some(Self::bracket_between(i, i + 1, t1, t2, time));
        }
    }

    fn bracket_between(a: usize, b: usize, t1: u32, t2: u32, time: u32) -> Bracket {
        if t1 >= t2 {
            return Bracket::Exact(a);
        }
        let sat = (time as f32 - t1 as f32) / (t2 - t1) as f32;
        Bracket::Span(a, b, sat)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keyframe(time: u32, ambient: u32, fog_end: f32) -> Keyframe {
        Keyframe {
            time,
            ambient,
            diffuse: 0,
            sky_top: 0,
            sky_middle: 0,
            sky_middle_lower: 0,
            sky_lower: 0,
            sky_horizon: 0,
            fog: 0,
            sun: 0,
            halo: 0,
            cloud: 0,
            fog_density: 0.0,
            fog_end,
            fog_scale: 0.0,
        }
    }

    fn zone(keyframes: Vec<Keyframe>) -> LightZone {
        LightZone::from_record(&LightRecord {
            map_id: 0,
            light_id: 1,
            sky_id: 1,
            position: Vec3::ZERO,
            inner_radius: 10.0,
            outer_radius: 20.0,
            keyframes,
        })
    }

    #[test]
    fn test_empty_zone_has_no_data() {
        let z = zone(vec![]);
        assert_eq!(z.color_at(ColorChannel::Ambient, 0), None);
        assert_eq!(z.scalar_at(ScalarChannel::FogEnd, 1440), None);
        assert!(z.colors_at(0).is_none());
        assert!(z.scalars_at(0).is_none());
    }

    #[test]
    fn test_single_keyframe_holds_for_every_time() {
        let z = zone(vec![keyframe(720, 0x808080, 500.0)]);
        let expected = Vec3::splat(128.0 / 255.0);
        for time in [-5000, -1, 0, 100, 720, 2879, 2880, 100_000] {
            assert_eq!(
                z.color_at(ColorChannel::Ambient, time),
                Some(expected),
                "single keyframe must hold at time {time}"
            );
            assert_eq!(z.scalar_at(ScalarChannel::FogEnd, time), Some(500.0));
        }
    }

    #[test]
    fn test_query_before_first_keyframe_returns_first() {
        let z = zone(vec![keyframe(600, 0x000040, 100.0), keyframe(1200, 0x000080, 200.0)]);
        assert_eq!(
            z.color_at(ColorChannel::Ambient, 100),
            Some(Vec3::new(0.0, 0.0, 64.0 / 255.0))
        );
        assert_eq!(
            z.color_at(ColorChannel::Ambient, -300),
            Some(Vec3::new(0.0, 0.0, 64.0 / 255.0)),
            "negative times take the first-keyframe path"
        );
    }

    #[test]
    fn test_all_keyframes_at_origin_returns_first() {
        // maxTime == 0 means the whole table collapsed onto the origin.
        let z = zone(vec![keyframe(0, 0x102030, 1.0), keyframe(0, 0x405060, 2.0)]);
        assert_eq!(z.scalar_at(ScalarChannel::FogEnd, 2000), Some(1.0));
    }

    #[test]
    fn test_midpoint_interpolation() {
        let z = zone(vec![keyframe(0, 0x000000, 0.0), keyframe(1000, 0x0000FF, 100.0)]);
        let color = z.color_at(ColorChannel::Ambient, 500).unwrap();
        assert!((color.z - 0.5).abs() < 1e-6, "blue should be halfway, got {}", color.z);
        let fog_end = z.scalar_at(ScalarChannel::FogEnd, 500).unwrap();
        assert!((fog_end - 50.0).abs() < 1e-4);
    }

    #[test]
    fn test_query_at_keyframe_time_is_exact() {
        let z = zone(vec![
            keyframe(100, 0x111111, 10.0),
            keyframe(200, 0x222222, 20.0),
            keyframe(300, 0x333333, 30.0),
        ]);
        assert_eq!(z.scalar_at(ScalarChannel::FogEnd, 100), Some(10.0));
        assert_eq!(z.scalar_at(ScalarChannel::FogEnd, 200), Some(20.0));
    }

    #[test]
    fn test_wraparound_interpolates_across_midnight() {
        let z = zone(vec![keyframe(100, 0x000000, 0.0), keyframe(2700, 0x0000FF, 280.0)]);
        // Past the last keyframe: bracket is (2700, 100 + 2880).
        let sat = (2850.0 - 2700.0) / (2980.0 - 2700.0);
        let fog_end = z.scalar_at(ScalarChannel::FogEnd, 2850).unwrap();
        let expected = 0.0 * sat + 280.0 * (1.0 - sat);
        assert!(
            (fog_end - expected).abs() < 1e-4,
            "wrap bracket should give {expected}, got {fog_end}"
        );
    }

    #[test]
    fn test_time_wraps_onto_cycle() {
        let z = zone(vec![keyframe(0, 0x000000, 0.0), keyframe(1000, 0x0000FF, 100.0)]);
        assert_eq!(
            z.scalar_at(ScalarChannel::FogEnd, 500 + DAY_CYCLE as i32),
            z.scalar_at(ScalarChannel::FogEnd, 500)
        );
    }

    #[test]
    fn test_duplicate_timestamps_do_not_divide_by_zero() {
        let z = zone(vec![keyframe(500, 0x101010, 1.0), keyframe(500, 0x202020, 2.0)]);
        // Bracket degenerates to t1 >= t2; the earlier keyframe wins.
        let fog_end = z.scalar_at(ScalarChannel::FogEnd, 700).unwrap();
        assert!(fog_end.is_finite());
        assert_eq!(fog_end, 1.0);
    }

    #[test]
    fn test_repeated_queries_are_deterministic() {
        let z = zone(vec![
            keyframe(100, 0x123456, 11.0),
            keyframe(900, 0x654321, 22.0),
            keyframe(2000, 0xABCDEF, 33.0),
        ]);
        for time in [0, 150, 900, 1500, 2500, 2879] {
            assert_eq!(
                z.color_at(ColorChannel::Ambient, time),
                z.color_at(ColorChannel::Ambient, time)
            );
        }
    }

    #[test]
    fn test_bulk_query_matches_per_channel() {
        let z = zone(vec![keyframe(100, 0x336699, 40.0), keyframe(2000, 0x996633, 80.0)]);
        for time in [0, 100, 777, 2100, 2850] {
            let colors = z.colors_at(time).unwrap();
            for channel in ColorChannel::ALL {
                assert_eq!(
                    Some(colors[channel.slot()]),
                    z.color_at(channel, time),
                    "bulk and per-channel must agree for {channel:?} at {time}"
                );
            }
            let scalars = z.scalars_at(time).unwrap();
            for channel in ScalarChannel::ALL {
                assert_eq!(Some(scalars[channel.slot()]), z.scalar_at(channel, time));
            }
        }
    }

    #[test]
    fn test_keyframes_are_sorted_at_construction() {
        let z = zone(vec![
            keyframe(2000, 0, 3.0),
            keyframe(100, 0, 1.0),
            keyframe(900, 0, 2.0),
        ]);
        let times: Vec<u32> = z.keyframes().iter().map(|kf| kf.time).collect();
        assert_eq!(times, vec![100, 900, 2000]);
    }

    #[test]
    fn test_is_global_requires_both_radii_near_zero() {
        let mut record = LightRecord {
            map_id: 0,
            light_id: 1,
            sky_id: 1,
            position: Vec3::ZERO,
            inner_radius: 0.0,
            outer_radius: 0.0,
            keyframes: vec![],
        };
        assert!(LightZone::from_record(&record).is_global());
        record.outer_radius = 0.009;
        assert!(LightZone::from_record(&record).is_global());
        record.outer_radius = 5.0;
        assert!(!LightZone::from_record(&record).is_global());
    }
}
