//! # Token Highlighter
//!
//! Classifies substrings of a code line for styled emission in code panels.
//! One regex partitions the line into quoted strings, inline comments, a fixed
//! keyword set, and single-character punctuation; everything between matches
//! falls through as `Normal`. Lexically naive on purpose — no nesting, no
//! escape sequences — this paints panels, it is not a lexer.

use std::sync::LazyLock;

use regex::Regex;

/// Fragments the partition captures besides plain text: strings (non-greedy),
/// comments to end of line, keywords, and the punctuation set `():,.=`.
static PARTITION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"('.*?'|".*?"|#.*|\b(?:def|class|import|from|return|if|else|elif|while|for|in|try|except|print|True|False|None|self)\b|[():,.=])"#,
    )
    .expect("partition regex is valid")
});

static KEYWORD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(def|class|import|from|return|if|else|elif|while|for|in|try|except|print|True|False|None|self)$",
    )
    .expect("keyword regex is valid")
});

static DIGITS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+$").expect("digits regex is valid"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Normal,
    Keyword,
    Str,
    Comment,
    Number,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CodeToken {
    pub text: String,
    pub kind: TokenKind,
}

/// Tokenize one line of code. The returned tokens cover the whole line with
/// no gaps or overlaps; concatenating their texts reconstructs the input.
pub fn tokenize(line: &str) -> Vec<CodeToken> {
    if line.trim_start().starts_with('#') {
        return vec![CodeToken {
            text: line.to_string(),
            kind: TokenKind::Comment,
        }];
    }

    let mut tokens = Vec::new();
    let mut last = 0;
    for m in PARTITION.find_iter(line) {
        push_fragment(&mut tokens, &line[last..m.start()]);
        push_fragment(&mut tokens, m.as_str());
        last = m.end();
    }
    push_fragment(&mut tokens, &line[last..]);
    tokens
}

fn push_fragment(tokens: &mut Vec<CodeToken>, text: &str) {
    if text.is_empty() {
        return;
    }
    tokens.push(CodeToken {
        text: text.to_string(),
        kind: classify(text),
    });
}

/// Priority order: comment > string > keyword > pure digits > normal.
fn classify(text: &str) -> TokenKind {
    if text.starts_with('#') {
        TokenKind::Comment
    } else if text.starts_with('\'') || text.starts_with('"') {
        TokenKind::Str
    } else if KEYWORD.is_match(text) {
        TokenKind::Keyword
    } else if DIGITS.is_match(text) {
        TokenKind::Number
    } else {
        TokenKind::Normal
    }
}
