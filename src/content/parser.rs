//! # Directive Parser
//!
//! Splits a document body into an ordered sequence of [`Segment`] values.
//! The mini-markup language is line-oriented:
//!
//! ```text
//! [[CODE:<filename>]]   begin buffering a code panel
//! [[ENDCODE]]           flush the buffered panel
//! [[IMG:url|alt|class]] image with optional alt text and modifier classes
//! [[PAUSE:<digits>]]    suspend rendering for the given milliseconds
//! anything else         typewritten verbatim (markup if it contains <...>)
//! ```
//!
//! Directive markers are matched against the trimmed line; plain and markup
//! lines are emitted untrimmed. While a code block is open, every line is
//! buffered verbatim — markers other than `[[ENDCODE]]` are not recognized.

const CODE_OPEN: &str = "[[CODE:";
const CODE_CLOSE: &str = "[[ENDCODE]]";
const IMG_OPEN: &str = "[[IMG:";
const PAUSE_OPEN: &str = "[[PAUSE:";

/// Filename used for a code panel when the open marker names none.
pub const DEFAULT_CODE_FILENAME: &str = "script.py";

/// Alt text used for an image directive that omits it.
pub const DEFAULT_IMAGE_ALT: &str = "IMAGE";

/// One parsed unit of document content.
#[derive(Debug, Clone, PartialEq)]
pub enum Segment {
    Plain(String),
    Markup(String),
    Code {
        filename: String,
        lines: Vec<String>,
    },
    Image {
        src: String,
        alt: String,
        classes: Vec<String>,
    },
    Pause(u64),
}

/// Parse a full document body into segments, applied line by line in order.
///
/// An unterminated trailing code block flushes nothing: the buffered lines
/// are dropped rather than guessed into a panel.
pub fn parse_document(body: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut in_code = false;
    let mut code_filename = DEFAULT_CODE_FILENAME.to_string();
    let mut code_buffer: Vec<String> = Vec::new();

    for line in body.split('\n') {
        let trimmed = line.trim();

        if !in_code && trimmed.starts_with(CODE_OPEN) {
            in_code = true;
            code_filename = parse_code_filename(trimmed);
            code_buffer = Vec::new();
            continue;
        }
        if trimmed == CODE_CLOSE {
            in_code = false;
            segments.push(Segment::Code {
                filename: std::mem::replace(
                    &mut code_filename,
                    DEFAULT_CODE_FILENAME.to_string(),
                ),
                lines: std::mem::take(&mut code_buffer),
            });
            continue;
        }
        if in_code {
            code_buffer.push(line.to_string());
            continue;
        }
        if trimmed.starts_with(IMG_OPEN) {
            segments.push(parse_image(trimmed));
            continue;
        }
        if trimmed.starts_with(PAUSE_OPEN) {
            segments.push(Segment::Pause(parse_pause_millis(trimmed)));
            continue;
        }
        if line.contains('<') && line.contains('>') {
            segments.push(Segment::Markup(line.to_string()));
        } else {
            segments.push(Segment::Plain(line.to_string()));
        }
    }

    if in_code {
        log::debug!(
            "document ended inside a code block ({} buffered lines dropped)",
            code_buffer.len()
        );
    }

    segments
}

fn strip_brackets<'a>(trimmed: &'a str, open: &str) -> &'a str {
    let inner = trimmed.strip_prefix(open).unwrap_or(trimmed);
    inner.strip_suffix("]]").unwrap_or(inner)
}

fn parse_code_filename(trimmed: &str) -> String {
    let name = strip_brackets(trimmed, CODE_OPEN).trim();
    if name.is_empty() {
        DEFAULT_CODE_FILENAME.to_string()
    } else {
        name.to_string()
    }
}

fn parse_image(trimmed: &str) -> Segment {
    let raw = strip_brackets(trimmed, IMG_OPEN);
    let parts: Vec<&str> = raw.split('|').map(str::trim).collect();
    let src = parts.first().copied().unwrap_or("").to_string();
    let alt = match parts.get(1) {
        Some(a) if !a.is_empty() => (*a).to_string(),
        _ => DEFAULT_IMAGE_ALT.to_string(),
    };
    let classes = parts
        .iter()
        .skip(2)
        .filter(|c| !c.is_empty())
        .map(|c| c.to_string())
        .collect();
    Segment::Image { src, alt, classes }
}

/// Digits-only payload; all non-digit characters are stripped. A payload
/// without digits is a zero-duration pause, not an error.
fn parse_pause_millis(trimmed: &str) -> u64 {
    let digits: String = trimmed.chars().filter(char::is_ascii_digit).collect();
    digits.parse().unwrap_or(0)
}
