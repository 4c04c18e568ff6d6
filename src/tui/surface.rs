//! # Terminal Surface
//!
//! `Screen` is the presentation state the whole session draws from: the
//! transcript of everything ever typed out, the scroll position, and the
//! visual flags (intense playback, shutdown dimming, menu reveal counter).
//! `TermSink` adapts it to the renderer's [`Sink`] trait: every append
//! repaints and pins the view to the newest chunk, every pause repaints
//! then really sleeps.

use std::time::Duration;

use async_trait::async_trait;
use log::warn;
use ratatui::DefaultTerminal;
use ratatui::style::Style;
use ratatui::text::{Line, Span, Text};
use tui_scrollview::ScrollViewState;

use crate::play::sink::Sink;
use crate::tui::ui;

#[derive(Default)]
pub struct Screen {
    /// Everything rendered so far, oldest line first.
    pub transcript: Text<'static>,
    pub scroll: ScrollViewState,
    /// High-intensity visuals during accelerated playback.
    pub intense: bool,
    /// Shutdown dimming: the last frame before the process exits.
    pub dimmed: bool,
    /// Menu fade-in: how many option rows are visible this frame.
    pub reveal_rows: u16,
}

impl Screen {
    pub fn push_line(&mut self, line: Line<'static>) {
        self.transcript.lines.push(line);
        self.scroll.scroll_to_bottom();
    }

    pub fn clear(&mut self) {
        self.transcript = Text::default();
        self.scroll = ScrollViewState::default();
    }
}

/// The live sink: owns the terminal for the duration of one playback.
pub struct TermSink<'a> {
    terminal: &'a mut DefaultTerminal,
    screen: &'a mut Screen,
}

impl<'a> TermSink<'a> {
    pub fn new(terminal: &'a mut DefaultTerminal, screen: &'a mut Screen) -> Self {
        Self { terminal, screen }
    }

    fn repaint(&mut self) {
        let screen = &mut *self.screen;
        if let Err(e) = self.terminal.draw(|f| ui::draw_ui(f, None, screen)) {
            warn!("repaint failed: {e}");
        }
    }
}

#[async_trait]
impl Sink for TermSink<'_> {
    fn open_line(&mut self) {
        self.screen.transcript.lines.push(Line::default());
    }

    fn push_span(&mut self, style: Style) {
        if let Some(line) = self.screen.transcript.lines.last_mut() {
            line.spans.push(Span::styled(String::new(), style));
        }
    }

    fn append(&mut self, text: &str) {
        if let Some(span) = self
            .screen
            .transcript
            .lines
            .last_mut()
            .and_then(|line| line.spans.last_mut())
        {
            span.content.to_mut().push_str(text);
        }
        self.screen.scroll.scroll_to_bottom();
        self.repaint();
    }

    fn close_line(&mut self) {
        self.repaint();
    }

    fn push_line(&mut self, line: Line<'static>) {
        self.screen.push_line(line);
        self.repaint();
    }

    fn clear(&mut self) {
        self.screen.clear();
        self.repaint();
    }

    fn set_intense(&mut self, on: bool) {
        self.screen.intense = on;
        self.repaint();
    }

    async fn pause(&mut self, duration: Duration) {
        self.repaint();
        tokio::time::sleep(duration).await;
    }
}
