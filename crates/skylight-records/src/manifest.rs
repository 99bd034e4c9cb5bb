//! Light record manifests: RON-authored light definitions loaded into a
//! [`LightLibrary`] that environments draw from.
//!
//! Manifest entry types mirror the authored file and are converted into the
//! validated runtime [`LightRecord`]s after parsing.

use std::path::Path;

use tracing::debug;

use skylight_core::{Keyframe, LightRecord, LightRecordSource};

use crate::error::LibraryError;

// ---------------------------------------------------------------------------
// RON manifest types
// ---------------------------------------------------------------------------

/// Top-level RON manifest of light definitions.
#[derive(serde::Deserialize)]
pub struct SkyManifest {
    /// Light entries, any map, any order.
    pub lights: Vec<LightEntry>,
}

/// A single light definition in the manifest.
#[derive(serde::Deserialize)]
pub struct LightEntry {
    /// Map the light belongs to.
    pub map_id: u32,
    /// Unique light id.
    pub light_id: u32,
    /// Linked sky parameter record id.
    pub sky_id: u32,
    /// World-space center.
    pub position: (f32, f32, f32),
    /// Full-dominance radius. Zero together with `outer_radius` makes the
    /// light a global fallback.
    pub inner_radius: f32,
    /// Zero-contribution radius.
    pub outer_radius: f32,
    /// Authored samples on the day cycle.
    pub keyframes: Vec<KeyframeEntry>,
}

/// One authored sample in the manifest. Colors are packed `0xRRGGBB`.
#[derive(serde::Deserialize)]
pub struct KeyframeEntry {
    /// Position on the day cycle, in ticks.
    pub time: u32,
    /// Global ambient color.
    pub ambient: u32,
    /// Global diffuse color.
    pub diffuse: u32,
    /// Sky band colors, zenith to horizon.
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

impl From<KeyframeEntry> for Keyframe {
    fn from(entry: KeyframeEntry) -> Self {
        Keyframe {
            time: entry.time,
            ambient: entry.ambient,
            diffuse: entry.diffuse,
            sky_top: entry.sky_top,
            sky_middle: entry.sky_middle,
            sky_middle_lower: entry.sky_middle_lower,
            sky_lower: entry.sky_lower,
            sky_horizon: entry.sky_horizon,
            fog: entry.fog,
            sun: entry.sun,
            halo: entry.halo,
            cloud: entry.cloud,
            fog_density: entry.fog_density,
            fog_end: entry.fog_end,
            fog_scale: entry.fog_scale,
        }
    }
}

// ---------------------------------------------------------------------------
// LightLibrary
// ---------------------------------------------------------------------------

/// Validated light records loaded from a manifest.
///
/// Immutable after construction; environments pull per-map record sets
/// through the [`LightRecordSource`] seam.
pub struct LightLibrary {
    records: Vec<LightRecord>,
}

impl LightLibrary {
    /// Load a library from a RON manifest file on disk.
    ///
    /// # Errors
    ///
    /// Returns [`LibraryError`] on I/O, parse, or validation failures.
    pub fn from_ron(path: &Path) -> Result<Self, LibraryError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_ron_str(&contents)
    }

    /// Load a library from a RON string.
    ///
    /// # Errors
    ///
    /// Returns [`LibraryError`] on parse or validation failures.
    pub fn from_ron_str(ron_str: &str) -> Result<Self, LibraryError> {
        let manifest: SkyManifest = ron::from_str(ron_str)?;

        let mut records = Vec::with_capacity(manifest.lights.len());
        let mut seen_ids = Vec::with_capacity(manifest.lights.len());

        for entry in manifest.lights {
            if seen_ids.contains(&entry.light_id) {
                return Err(LibraryError::DuplicateLight(entry.light_id));
            }
            seen_ids.push(entry.light_id);

            if entry.inner_radius < 0.0
                || entry.outer_radius < 0.0
                || entry.inner_radius > entry.outer_radius
            {
                return Err(LibraryError::InvalidRadii {
                    light_id: entry.light_id,
                    inner: entry.inner_radius,
                    outer: entry.outer_radius,
                });
            }

            records.push(LightRecord {
                map_id: entry.map_id,
                light_id: entry.light_id,
                sky_id: entry.sky_id,
                position: glam::Vec3::new(entry.position.0, entry.position.1, entry.position.2),
                inner_radius: entry.inner_radius,
                outer_radius: entry.outer_radius,
                keyframes: entry.keyframes.into_iter().map(Keyframe::from).collect(),
            });
        }

        debug!(record_count = records.len(), "light library loaded");
        Ok(Self { records })
    }

    /// All loaded records.
    pub fn records(&self) -> &[LightRecord] {
        &self.records
    }

    /// Number of loaded records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns `true` if the manifest held no light entries.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl LightRecordSource for LightLibrary {
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
