//! Shared test fixtures: a recording sink that captures renderer output
//! without sleeping, and a small menu tree exercising every node kind.

use std::time::Duration;

use async_trait::async_trait;
use ratatui::style::Style;
use ratatui::text::Line;

use crate::core::menu::MenuTree;
use crate::play::sink::Sink;

/// Every operation a renderer performed, in order.
#[derive(Debug, Clone, PartialEq)]
pub enum SinkOp {
    OpenLine,
    Span(Style),
    Text(String),
    CloseLine,
    Line(String),
    Clear,
    Intense(bool),
    Pause(Duration),
}

#[derive(Debug, Default)]
pub struct RecordingSink {
    ops: Vec<SinkOp>,
}

impl RecordingSink {
    pub fn ops(&self) -> &[SinkOp] {
        &self.ops
    }

    /// Reconstruct the transcript as plain text, one string per line.
    pub fn lines(&self) -> Vec<String> {
        let mut lines = Vec::new();
        let mut current: Option<String> = None;
        for op in &self.ops {
            match op {
                SinkOp::OpenLine => current = Some(String::new()),
                SinkOp::Text(text) => {
                    if let Some(buf) = current.as_mut() {
                        buf.push_str(text);
                    }
                }
                SinkOp::CloseLine => {
                    if let Some(buf) = current.take() {
                        lines.push(buf);
                    }
                }
                SinkOp::Line(text) => lines.push(text.clone()),
                SinkOp::Clear => lines.clear(),
                _ => {}
            }
        }
        lines
    }

    /// Every incremental span style pushed, in order.
    pub fn span_styles(&self) -> Vec<Style> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                SinkOp::Span(style) => Some(*style),
                _ => None,
            })
            .collect()
    }

    pub fn pauses(&self) -> Vec<Duration> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                SinkOp::Pause(d) => Some(*d),
                _ => None,
            })
            .collect()
    }
}

#[async_trait]
impl Sink for RecordingSink {
    fn open_line(&mut self) {
        self.ops.push(SinkOp::OpenLine);
    }

    fn push_span(&mut self, style: Style) {
        self.ops.push(SinkOp::Span(style));
    }

    fn append(&mut self, text: &str) {
        self.ops.push(SinkOp::Text(text.to_string()));
    }

    fn close_line(&mut self) {
        self.ops.push(SinkOp::CloseLine);
    }

    fn push_line(&mut self, line: Line<'static>) {
        let text: String = line.spans.iter().map(|s| s.content.as_ref()).collect();
        self.ops.push(SinkOp::Line(text));
    }

    fn clear(&mut self) {
        self.ops.push(SinkOp::Clear);
    }

    fn set_intense(&mut self, on: bool) {
        self.ops.push(SinkOp::Intense(on));
    }

    async fn pause(&mut self, duration: Duration) {
        self.ops.push(SinkOp::Pause(duration));
    }
}

/// A tree with one node of every kind at the root, plus a populated submenu.
pub fn sample_tree() -> MenuTree {
    serde_json::from_str(
        r#"{
            "sys": {
                "boot_msg": "PHOSPHOR OS v2.1 READY.",
                "news": ["maintenance window friday"]
            },
            "root": [
                { "label": "ABOUT", "type": "file", "content": "hello", "mode": "fast" },
                { "label": "ARCHIVE", "type": "menu", "items": [
                    { "label": "LOG 01", "type": "file", "content": "entry" }
                ]},
                { "label": "CLEAR SCREEN", "type": "action", "func": "clear" },
                { "label": "SHUTDOWN", "type": "action", "func": "shutdown" }
            ]
        }"#,
    )
    .expect("fixture tree parses")
}
