//! # Output Sink
//!
//! The abstract surface the incremental renderer writes into. The real
//! implementation (`tui::surface::TermSink`) appends to the transcript,
//! repaints and keeps the view scrolled to the newest chunk; tests use a
//! recording sink that captures every operation and skips real sleeping.
//!
//! The renderer is the only writer while playback is in progress — control
//! handoff between navigator and player is the only synchronization there is.

use std::time::Duration;

use async_trait::async_trait;
use ratatui::style::Style;
use ratatui::text::Line;

#[async_trait]
pub trait Sink: Send {
    /// Start a new output line.
    fn open_line(&mut self);

    /// Begin a new styled span on the current line. Subsequent `append`
    /// calls extend this span.
    fn push_span(&mut self, style: Style);

    /// Append text to the most recent span. Implementations scroll the view
    /// to the bottom so the newest chunk is always visible.
    fn append(&mut self, text: &str);

    /// Finish the current line.
    fn close_line(&mut self);

    /// Emit a whole pre-styled line at once (panel borders and the like).
    fn push_line(&mut self, line: Line<'static>);

    /// Wipe the whole transcript.
    fn clear(&mut self);

    /// Toggle the high-intensity visual flag used by accelerated playback.
    fn set_intense(&mut self, on: bool);

    /// Suspend rendering for the given duration. Real sinks sleep (and
    /// repaint first); recording sinks just note the duration.
    async fn pause(&mut self, duration: Duration);
}
