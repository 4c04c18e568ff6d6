//! # Playback
//!
//! Everything between "a file node was activated" and "the acknowledgement
//! prompt is on screen":
//!
//! ```text
//!   player ──> renderer ──> sink (trait)
//!                │
//!                └─ profile (pacing numbers per playback mode)
//! ```

pub mod player;
pub mod profile;
pub mod renderer;
pub mod sink;

pub use player::play;
pub use profile::{Pacing, Profile};
pub use renderer::Renderer;
pub use sink::Sink;
