//! # Incremental Renderer
//!
//! Appends visual output to the sink in paced chunks to simulate a teletype.
//! Plain lines type out chunk-by-chunk with a dramatic pause on terminal
//! punctuation; markup lines are re-emitted through a tree-walk that opens a
//! styled span per element while streaming text content; code blocks render
//! as bordered panels with per-token styling; images preload with a deadline
//! and either reveal a container panel or report the failure inline and
//! move on. Segments are rendered strictly in source order, characters
//! strictly left to right.

use log::warn;

use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

use crate::api;
use crate::content::highlight::{self, TokenKind};
use crate::content::markup::{self, MarkupNode};
use crate::content::parser::Segment;
use crate::play::profile::{Pacing, TERMINAL_PUNCTUATION};
use crate::play::sink::Sink;

/// Base phosphor-green text style.
pub fn base_style() -> Style {
    Style::default().fg(Color::Green)
}

/// Error lines: red, typed slower so the user can read them.
pub fn error_style() -> Style {
    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
}

/// Debug/diagnostic lines: dimmed.
pub fn debug_style() -> Style {
    Style::default().fg(Color::DarkGray)
}

fn border_style() -> Style {
    Style::default().fg(Color::DarkGray)
}

fn token_style(kind: TokenKind) -> Style {
    match kind {
        TokenKind::Normal => Style::default().fg(Color::White),
        TokenKind::Keyword => Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        TokenKind::Str => Style::default().fg(Color::Yellow),
        TokenKind::Comment => Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::ITALIC),
        TokenKind::Number => Style::default().fg(Color::Magenta),
    }
}

/// Style overlay for a markup element, composed onto the parent style.
/// Tags map to modifiers; `class` attributes map to palette colors.
fn element_style(tag: &str, attrs: &[(String, String)], parent: Style) -> Style {
    let mut style = parent;
    match tag {
        "b" | "strong" => style = style.add_modifier(Modifier::BOLD),
        "i" | "em" => style = style.add_modifier(Modifier::ITALIC),
        "u" => style = style.add_modifier(Modifier::UNDERLINED),
        "s" | "del" => style = style.add_modifier(Modifier::CROSSED_OUT),
        _ => {}
    }
    let classes = attrs
        .iter()
        .find(|(name, _)| name == "class")
        .map(|(_, value)| value.as_str())
        .unwrap_or("");
    for class in classes.split_whitespace() {
        style = match class {
            "red" | "error" | "text-error" => style.fg(Color::Red),
            "yellow" | "warn" => style.fg(Color::Yellow),
            "cyan" | "info" => style.fg(Color::Cyan),
            "white" | "bright" => style.fg(Color::White),
            "dim" | "text-debug" => style.fg(Color::DarkGray),
            "blink" => style.add_modifier(Modifier::SLOW_BLINK),
            "invert" => style.add_modifier(Modifier::REVERSED),
            _ => style,
        };
    }
    style
}

pub struct Renderer<'a, S: Sink> {
    sink: &'a mut S,
    pacing: Pacing,
    client: &'a reqwest::Client,
}

impl<'a, S: Sink> Renderer<'a, S> {
    pub fn new(sink: &'a mut S, pacing: Pacing, client: &'a reqwest::Client) -> Self {
        Self { sink, pacing, client }
    }

    pub fn sink(&mut self) -> &mut S {
        self.sink
    }

    /// Render a parsed segment sequence in source order.
    pub async fn render(&mut self, segments: &[Segment]) {
        for segment in segments {
            match segment {
                Segment::Plain(text) => self.type_line(text).await,
                Segment::Markup(raw) => self.type_markup(raw).await,
                Segment::Code { filename, lines } => self.render_code(filename, lines).await,
                Segment::Image { src, alt, classes } => {
                    self.render_image(src, alt, classes).await
                }
                Segment::Pause(millis) => {
                    self.sink.pause(self.pacing.scaled_pause(*millis)).await
                }
            }
        }
    }

    /// Typewrite one plain line in the base style at profile pace.
    pub async fn type_line(&mut self, text: &str) {
        self.type_chunked(text, base_style(), false).await;
    }

    /// Typewrite one line in a fixed style at a fixed per-character delay,
    /// regardless of profile. Boot diagnostics and error reporting use this.
    pub async fn type_with(&mut self, text: &str, style: Style, char_delay: std::time::Duration) {
        if text.is_empty() {
            return;
        }
        self.sink.open_line();
        self.sink.push_span(style);
        for ch in text.chars() {
            self.sink.append(&ch.to_string());
            let delay = if TERMINAL_PUNCTUATION.contains(&ch) {
                char_delay * 4
            } else {
                char_delay
            };
            self.sink.pause(delay).await;
        }
        self.sink.close_line();
        self.sink.pause(self.pacing.line_settle()).await;
    }

    async fn type_chunked(&mut self, text: &str, style: Style, in_markup: bool) {
        self.sink.open_line();
        if !text.is_empty() {
            self.sink.push_span(style);
            self.stream_text(text, in_markup).await;
        }
        self.sink.close_line();
        self.sink.pause(self.pacing.line_settle()).await;
    }

    /// Emit text into the current span, chunk by chunk.
    async fn stream_text(&mut self, text: &str, in_markup: bool) {
        let chars: Vec<char> = text.chars().collect();
        for chunk in chars.chunks(self.pacing.chunk_size()) {
            let piece: String = chunk.iter().collect();
            self.sink.append(&piece);
            let delay = if chunk.iter().any(|c| TERMINAL_PUNCTUATION.contains(c)) {
                self.pacing.punct_delay(in_markup)
            } else {
                self.pacing.step_delay()
            };
            self.sink.pause(delay).await;
        }
    }

    /// Re-emit a markup line: structure reconstructed up front per element,
    /// text content still streamed chunk-by-chunk.
    async fn type_markup(&mut self, raw: &str) {
        let nodes = markup::parse_fragment(raw);
        self.sink.open_line();
        self.walk_nodes(&nodes, base_style()).await;
        self.sink.close_line();
        self.sink.pause(self.pacing.line_settle()).await;
    }

    async fn walk_nodes(&mut self, nodes: &[MarkupNode], style: Style) {
        for node in nodes {
            match node {
                MarkupNode::Text(text) => {
                    self.sink.push_span(style);
                    self.stream_text(text, true).await;
                }
                MarkupNode::Element { tag, attrs, children } => {
                    let child_style = element_style(tag, attrs, style);
                    Box::pin(self.walk_nodes(children, child_style)).await;
                }
            }
        }
    }

    /// Bordered code panel: header naming the file, token-styled body lines
    /// with a short per-character delay, settle at the end.
    async fn render_code(&mut self, filename: &str, lines: &[String]) {
        let bs = border_style();
        self.sink.push_line(Line::from(vec![
            Span::styled("╭── ", bs),
            Span::styled(format!("SRC: {filename}"), bs.add_modifier(Modifier::BOLD)),
            Span::styled(" ── PYTHON ──", bs),
        ]));

        for line in lines {
            self.sink.open_line();
            self.sink.push_span(bs);
            self.sink.append("│ ");
            for token in highlight::tokenize(line) {
                self.sink.push_span(token_style(token.kind));
                for ch in token.text.chars() {
                    self.sink.append(&ch.to_string());
                    self.sink.pause(self.pacing.code_char_delay()).await;
                }
            }
            self.sink.close_line();
            self.sink.pause(self.pacing.code_line_delay()).await;
        }

        self.sink.push_line(Line::from(Span::styled("╰──", bs)));
        self.sink.pause(self.pacing.code_settle()).await;
    }

    /// Announce, preload with deadline, then either reveal a container
    /// panel or report the failure inline. Never aborts the document.
    async fn render_image(&mut self, src: &str, alt: &str, classes: &[String]) {
        self.type_line(&format!(">> DOWNLOADING: {alt}...")).await;

        match api::preload_image(self.client, src, self.pacing.image_timeout()).await {
            Ok(info) => {
                let bs = border_style();
                let mut header = vec![
                    Span::styled("╭── ", bs),
                    Span::styled(format!("IMG: {src}"), bs.add_modifier(Modifier::BOLD)),
                ];
                if !classes.is_empty() {
                    header.push(Span::styled(format!(" [{}]", classes.join(" ")), bs));
                }
                self.sink.push_line(Line::from(header));
                self.sink.push_line(Line::from(vec![
                    Span::styled("│ ", bs),
                    Span::styled(
                        format!("{} ({})", alt, format_bytes(info.bytes)),
                        base_style().add_modifier(Modifier::REVERSED),
                    ),
                ]));
                self.sink.push_line(Line::from(Span::styled("╰──", bs)));
                self.sink.pause(self.pacing.image_settle()).await;
            }
            Err(e) => {
                warn!("Image load failed for {src}: {e}");
                self.report_load_failure(src).await;
            }
        }
    }

    async fn report_load_failure(&mut self, src: &str) {
        self.sink.open_line();
        self.sink.push_span(error_style());
        self.sink.append(&format!("[ERROR: LOAD FAILED - {src}]"));
        self.sink.close_line();
        self.sink.pause(self.pacing.line_settle()).await;
    }
}

fn format_bytes(n: usize) -> String {
    if n >= 1024 * 1024 {
        format!("{:.1} MB", n as f64 / (1024.0 * 1024.0))
    } else if n >= 1024 {
        format!("{} KB", n / 1024)
    } else {
        format!("{n} B")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::parser::parse_document;
    use crate::core::config::PacingConfig;
    use crate::play::profile::Profile;
    use crate::test_support::RecordingSink;
    use std::time::Duration;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn pacing(profile: Profile) -> Pacing {
        Pacing::new(profile, PacingConfig::default())
    }

    async fn render_doc(doc: &str, profile: Profile) -> RecordingSink {
        let client = reqwest::Client::new();
        let mut sink = RecordingSink::default();
        let mut renderer = Renderer::new(&mut sink, pacing(profile), &client);
        renderer.render(&parse_document(doc)).await;
        sink
    }

    #[tokio::test]
    async fn plain_line_text_reconstructs() {
        let sink = render_doc("HELLO OPERATOR", Profile::Normal).await;
        assert_eq!(sink.lines(), vec!["HELLO OPERATOR"]);
    }

    #[tokio::test]
    async fn punctuation_earns_longer_pause() {
        let sink = render_doc("ab", Profile::Normal).await;
        let plain_pauses = sink.pauses();
        let sink = render_doc("a.", Profile::Normal).await;
        let punct_pauses = sink.pauses();
        // Same chunk count; the punctuated chunk pauses 4x longer
        assert_eq!(plain_pauses.len(), punct_pauses.len());
        assert_eq!(plain_pauses[0] * 4, punct_pauses[0]);
    }

    #[tokio::test]
    async fn pause_segment_durations_follow_profile() {
        let sink = render_doc("[[PAUSE:250]]", Profile::Normal).await;
        assert_eq!(sink.pauses(), vec![Duration::from_millis(250)]);

        let sink = render_doc("[[PAUSE:250]]", Profile::Accelerated).await;
        assert_eq!(sink.pauses(), vec![Duration::from_millis(62)]);
    }

    #[tokio::test]
    async fn markup_line_styles_nested_spans() {
        let sink = render_doc("ok <span class=\"red\">ALERT</span> done", Profile::Normal).await;
        assert_eq!(sink.lines(), vec!["ok ALERT done"]);
        let styles = sink.span_styles();
        assert!(styles.contains(&base_style()));
        assert!(styles.iter().any(|s| s.fg == Some(Color::Red)));
    }

    #[tokio::test]
    async fn code_panel_has_header_body_and_footer() {
        let sink = render_doc("[[CODE:demo.py]]\nx = 1\n[[ENDCODE]]", Profile::Normal).await;
        let lines = sink.lines();
        assert!(lines[0].contains("SRC: demo.py"));
        assert!(lines[1].starts_with("│ "));
        assert!(lines[1].contains("x = 1"));
        assert!(lines.last().unwrap().starts_with('╰'));
    }

    #[tokio::test]
    async fn code_tokens_carry_their_styles() {
        let sink = render_doc(
            "[[CODE:demo.py]]\nreturn 'ok'  # done\n[[ENDCODE]]",
            Profile::Normal,
        )
        .await;
        let styles = sink.span_styles();
        assert!(styles.contains(&token_style(TokenKind::Keyword)));
        assert!(styles.contains(&token_style(TokenKind::Str)));
        assert!(styles.contains(&token_style(TokenKind::Comment)));
    }

    #[tokio::test]
    async fn image_success_renders_container_and_settles() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/pic.png"))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("content-type", "image/png")
                    .set_body_bytes(vec![0u8; 2048]),
            )
            .mount(&server)
            .await;

        let doc = format!("[[IMG:{}/pic.png|Schematic|wide]]", server.uri());
        let sink = render_doc(&doc, Profile::Normal).await;
        let lines = sink.lines();
        assert!(lines[0].starts_with(">> DOWNLOADING: Schematic"));
        assert!(lines.iter().any(|l| l.contains("IMG:") && l.contains("[wide]")));
        assert!(lines.iter().any(|l| l.contains("Schematic (2 KB)")));
        assert_eq!(
            sink.pauses().last(),
            Some(&Duration::from_millis(PacingConfig::default().image_settle_ms))
        );
    }

    #[tokio::test]
    async fn image_failure_reports_inline_and_continues() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/gone.png"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let doc = format!("[[IMG:{}/gone.png|Lost]]\nstill here", server.uri());
        let sink = render_doc(&doc, Profile::Normal).await;
        let lines = sink.lines();
        assert!(
            lines
                .iter()
                .any(|l| l.starts_with("[ERROR: LOAD FAILED - ") && l.contains("/gone.png"))
        );
        // The document keeps playing after the failed segment
        assert_eq!(lines.last().unwrap(), "still here");
    }

    #[tokio::test]
    async fn segments_render_in_source_order() {
        let sink = render_doc("one\ntwo\n[[PAUSE:10]]\nthree", Profile::Normal).await;
        assert_eq!(sink.lines(), vec!["one", "two", "three"]);
    }
}
