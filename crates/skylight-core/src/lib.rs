//! Day-cycle ambient lighting: keyframe interpolation per zone and spatial
//! weight blending across zones.
//!
//! A [`LightZone`] answers "what is channel X at time T" for one authored
//! light definition; a [`LightEnvironment`] owns all zones of a map and
//! blends them into the single frame state the renderer reads. Everything is
//! read-only after construction except the environment's output buffers,
//! which [`LightEnvironment::update`] rewrites wholesale once per frame.

mod channel;
mod environment;
mod keyframe;
mod record;
mod zone;

pub use channel::{ChannelError, ColorChannel, ScalarChannel, unpack_rgb};
pub use environment::{COLOR_SLOTS, LightEnvironment};
pub use keyframe::{DAY_CYCLE, Keyframe};
pub use record::{LightRecord, LightRecordSource, StaticRecords};
pub use zone::LightZone;
