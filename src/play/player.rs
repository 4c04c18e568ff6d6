//! # Playback Driver
//!
//! Owns one file playback from activation to the acknowledgement prompt.
//! The navigator hands over control when playback starts and gets it back
//! only after the closing prompt is on screen; input during playback is
//! not serviced.

use log::info;

use crate::content::parser::parse_document;
use crate::core::config::PacingConfig;
use crate::core::menu::PlaybackMode;
use crate::core::state::{Mode, Navigator};
use crate::play::profile::{Pacing, Profile};
use crate::play::renderer::Renderer;
use crate::play::sink::Sink;

use std::time::Duration;

/// Play one content document to the sink, start to finish.
pub async fn play<S: Sink>(
    client: &reqwest::Client,
    config: &PacingConfig,
    sink: &mut S,
    nav: &mut Navigator,
    content: &str,
    mode: PlaybackMode,
) {
    let profile = Profile::from_mode(mode);
    let pacing = Pacing::new(profile, *config);
    info!("Playback started ({profile:?}, {} bytes)", content.len());

    nav.mode = Mode::Playing;

    let mut renderer = Renderer::new(sink, pacing, client);
    renderer.type_line(">> READING DATA STREAM...").await;
    renderer.sink().pause(Duration::from_millis(200)).await;

    if profile == Profile::Accelerated {
        renderer.sink().set_intense(true);
    }

    let segments = parse_document(content);
    renderer.render(&segments).await;

    renderer.sink().set_intense(false);

    renderer.type_line("").await;
    renderer.type_line(">> [EOF]").await;
    renderer.type_line("Press [ENTER] to return...").await;

    nav.mode = Mode::WaitingForAck;
    info!("Playback finished, waiting for acknowledgement");
}
