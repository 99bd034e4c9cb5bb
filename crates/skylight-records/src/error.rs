//! Record library error types.

use thiserror::Error;

/// Errors returned while loading a light record manifest.
#[derive(Debug, Error)]
pub enum LibraryError {
    /// I/O error reading the manifest file.
    #[error("failed to read manifest: {0}")]
    Io(#[from] std::io::Error),

    /// RON deserialization error.
    #[error("failed to parse manifest: {0}")]
    Ron(#[from] ron::error::SpannedError),

    /// Two light entries share the same id.
    #[error("duplicate light id: {0}")]
    DuplicateLight(u32),

    /// A light entry's radii are unusable for falloff.
    #[error("light {light_id} has invalid radii: inner {inner}, outer {outer}")]
    InvalidRadii {
        /// Offending light entry.
        light_id: u32,
        /// Authored inner radius.
        inner: f32,
        /// Authored outer radius.
        outer: f32,
    },
}
