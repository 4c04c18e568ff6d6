//! Phosphor library exports for testing

pub mod api;
pub mod content;
pub mod core;
pub mod play;
pub mod tui;

#[cfg(test)]
pub mod test_support;
