//! # Document Content Engine
//!
//! Pure, synchronous pieces of the content pipeline. A document body goes
//! through [`parser`] to become segments; code lines go through [`highlight`]
//! for styled panels; markup lines go through [`markup`] to become a node
//! tree. None of these know about pacing or the terminal — the `play` module
//! owns that.

pub mod highlight;
pub mod markup;
pub mod parser;

pub use highlight::{CodeToken, TokenKind, tokenize};
pub use markup::{MarkupNode, parse_fragment};
pub use parser::{Segment, parse_document};
