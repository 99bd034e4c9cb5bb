//! RON-authored light record manifests and the library that serves them to
//! [`skylight_core`] environments.

mod error;
mod manifest;

pub use error::LibraryError;
pub use manifest::{KeyframeEntry, LightEntry, LightLibrary, SkyManifest};
