//! Light environment: the per-map zone set and the spatial blend that turns
//! it into one frame state.
//!
//! [`LightEnvironment`] owns every [`LightZone`] registered for a map,
//! recomputes per-zone weights for the query position each frame, and folds
//! the zones' interpolated channel values into a single set of output
//! buffers read by the renderer between updates.

use std::cmp::Ordering;

use glam::Vec3;
use tracing::{debug, warn};

use crate::channel::{ColorChannel, ScalarChannel};
use crate::record::LightRecordSource;
use crate::zone::LightZone;

/// Total color slots in the blend buffer. Slots past the named channels are
/// reserved and always read back as zero.
pub const COLOR_SLOTS: usize = 18;

/// Weights below this contribute nothing visible and are skipped.
const WEIGHT_CUTOFF: f32 = 1e-3;

/// Per-map lighting state.
///
/// Zones are ordered once at construction: globals first (source order
/// preserved among them), then non-globals ascending by outer radius. Radii
/// never change afterward, so the order is never revisited.
pub struct LightEnvironment {
    zones: Vec<LightZone>,
    colors: [Vec3; COLOR_SLOTS],
    scalars: [f32; ScalarChannel::COUNT],
}

impl LightEnvironment {
    /// Build the environment for `map_id` from a record source.
    ///
    /// A map with no records of its own falls back to the source's first
    /// record, when one exists anywhere. A completely empty source yields a
    /// zone-less environment whose channels all read zero; that is a
    /// legitimate state, not an error.
    pub fn from_source(map_id: u32, source: &dyn LightRecordSource) -> Self {
        let mut records = source.records_for_map(map_id);
        if records.is_empty()
            && let Some(fallback) = source.first_record()
        {
            warn!(
                map_id,
                fallback_light_id = fallback.light_id,
                "map has no light records, using first available record"
            );
            records.push(fallback);
        }

        let mut zones: Vec<LightZone> = records.iter().map(LightZone::from_record).collect();
        // Stable sort keeps the source order among globals.
        zones.sort_by(|a, b| match (a.is_global(), b.is_global()) {
            (true, true) => Ordering::Equal,
            (true, false) => Ordering::Less,
            (false, true) => Ordering::Greater,
            (false, false) => a
                .outer_radius()
                .partial_cmp(&b.outer_radius())
                .unwrap_or(Ordering::Equal),
        });

        debug!(map_id, zone_count = zones.len(), "light environment built");

        Self {
            zones,
            colors: [Vec3::ZERO; COLOR_SLOTS],
            scalars: [0.0; ScalarChannel::COUNT],
        }
    }

    /// The ordered zone set.
    pub fn zones(&self) -> &[LightZone] {
        &self.zones
    }

    /// Recompute the frame state for a world position and day-cycle time.
    ///
    /// Colors start from a `(1, 1, 1)` baseline that is subtracted again
    /// after accumulation: with full coverage (weights summing to one) the
    /// baseline cancels and the result is the exact weighted average; with
    /// partial coverage the remainder of the baseline leaks through as an
    /// implicit unlit contribution. Scalars start at zero and get no
    /// correction.
    pub fn update(&mut self, position: Vec3, time: u32) {
        let weights = self.compute_weights(position);

        self.colors = [Vec3::ONE; COLOR_SLOTS];
        self.scalars = [0.0; ScalarChannel::COUNT];

        let time = time as i32;
        for (zone, &weight) in self.zones.iter().zip(weights.iter()) {
            if weight < WEIGHT_CUTOFF {
                continue;
            }
            if let Some(colors) = zone.colors_at(time) {
                for channel in ColorChannel::ALL {
                    self.colors[channel.slot()] += colors[channel.slot()] * weight;
                }
            }
            if let Some(scalars) = zone.scalars_at(time) {
                for channel in ScalarChannel::ALL {
                    self.scalars[channel.slot()] += scalars[channel.slot()] * weight;
                }
            }
        }

        for slot in &mut self.colors {
            *slot -= Vec3::ONE;
        }
    }

    /// Last blended value of a color channel. Pure read; no computation.
    pub fn color(&self, channel: ColorChannel) -> Vec3 {
        self.colors[channel.slot()]
    }

    /// Last blended value of a scalar channel. Pure read; no computation.
    pub fn scalar(&self, channel: ScalarChannel) -> f32 {
        self.scalars[channel.slot()]
    }

    /// Spatial weight per zone for a query position.
    ///
    /// Walks zone indices in descending order, so the largest non-global
    /// volumes are visited first and every nearer (smaller) volume gets to
    /// occlude or suppress what was already assigned:
    ///
    /// - inside the inner radius the zone dominates outright: weight one,
    ///   every larger volume forced to zero;
    /// - inside the falloff ring the zone takes `1 - sat` and scales every
    ///   larger volume by `sat`;
    /// - beyond the outer radius the zone is out of range.
    ///
    /// Globals are skipped during the walk and then split whatever coverage
    /// is still missing evenly among themselves. Public so hosts and tests
    /// can inspect coverage directly; `update` uses the same path.
    pub fn compute_weights(&self, position: Vec3) -> Vec<f32> {
        let mut weights = vec![0.0f32; self.zones.len()];
        let mut globals = Vec::new();

        for i in (0..self.zones.len()).rev() {
            let zone = &self.zones[i];
            if zone.is_global() {
                globals.push(i);
                continue;
            }

            let dist = (position - zone.position()).length();
            if dist < zone.inner_radius() {
                weights[i] = 1.0;
                for w in &mut weights[i + 1..] {
                    *w = 0.0;
                }
            } else if dist < zone.outer_radius() {
                let sat = (dist - zone.inner_radius())
                    / (zone.outer_radius() - zone.inner_radius());
                weights[i] = 1.0 - sat;
                for w in &mut weights[i + 1..] {
                    *w *= sat;
                }
            } else {
                weights[i] = 0.0;
            }
        }

        let total: f32 = weights.iter().sum();
        if total >= 1.0 || globals.is_empty() {
            return weights;
        }

        let per_global = (1.0 - total) / globals.len() as f32;
        for i in globals {
            weights[i] = per_global;
        }
        weights
    }
}
