//! Light records and the source seam they are pulled through.
//!
//! Environments never reach into a global data archive; they are handed a
//! [`LightRecordSource`] at construction and own everything they build from
//! it.

use glam::Vec3;

use crate::keyframe::Keyframe;

/// One authored light definition as delivered by a record source.
#[derive(Clone, Debug)]
pub struct LightRecord {
    /// Map this record belongs to.
    pub map_id: u32,
    /// Identity of the light record.
    pub light_id: u32,
    /// Identity of the linked sky parameter record.
    pub sky_id: u32,
    /// World-space center of the zone volume.
    pub position: Vec3,
    /// Radius of full dominance. Near-zero together with `outer_radius`
    /// marks a global fallback light.
    pub inner_radius: f32,
    /// Radius beyond which the zone contributes nothing.
    pub outer_radius: f32,
    /// Authored samples, in any order; zones sort them.
    pub keyframes: Vec<Keyframe>,
}

/// Supplier of light records for environment construction.
pub trait LightRecordSource {
    /// Every record registered for `map_id`, in source order.
    fn records_for_map(&self, map_id: u32) -> Vec<LightRecord>;

    /// The first record available anywhere, used when a map has no records
    /// of its own. `None` only when the source is completely empty.
    fn first_record(&self) -> Option<LightRecord>;
}

/// In-memory record source.
///
/// The simplest implementation of the seam: useful in tests and for hosts
/// that assemble records themselves.
#[derive(Clone, Debug, Default)]
pub struct StaticRecords {
    records: Vec<LightRecord>,
}

impl StaticRecords {
    /// Wrap an already-assembled record list.
    pub fn new(records: Vec<LightRecord>) -> Self {
        Self { records }
    }

    /// All held records.
    pub fn records(&self) -> &[LightRecord] {
        &self.records
    }
}

impl LightRecordSource for StaticRecords {
    fn records_for_map(&self, map_id: u32) -> Vec<LightRecord> {
        self.records
            .iter()
            .filter(|r| r.map_id == map_id)
            .cloned()
            .collect()
    }

    fn first_record(&self) -> Option<LightRecord> {
        self.records.first().cloned()
    }
}
