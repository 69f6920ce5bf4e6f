//! Subtitle discovery and activation.
//!
//! For each opened video item: derive a caption URL from the video URL,
//! probe its existence, attach a caption descriptor on success, materialize
//! track elements on the rendered video, and wire the caption toggle. Every
//! failure mode degrades to "feature absent for this item"; nothing here is
//! user-visible or fatal.

mod activate;
mod enhance;
mod error;
mod materialize;
mod module;
mod probe;

pub use activate::{ActivationOutcome, ActivationTask, ActivatorConfig, ControlActivator};
pub use enhance::{EnhanceOutcome, ItemEnhancer};
pub use error::{Error, Result};
pub use materialize::materialize_tracks;
pub use module::AutoSubtitles;
pub use probe::{AvailabilityProbe, HttpProbe};
