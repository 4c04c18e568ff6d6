//! # Core Application Logic
//!
//! This module contains Phosphor's domain logic.
//! It knows nothing about any specific UI technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • menu (data model)    │
//!                    │  • state (navigator)    │
//!                    │  • command (reducer)    │
//!                    │  • config (settings)    │
//!                    │                         │
//!                    │  No I/O. No UI. Pure.   │
//!                    └───────────┬─────────────┘
//!                                │
//!                                ▼
//!                       ┌────────────────┐
//!                       │  TUI Adapter   │
//!                       │   (ratatui)    │
//!                       └────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`menu`]: The fetched menu tree — nodes, kinds, system record
//! - [`state`]: The `Navigator` struct — all session state in one place
//! - [`command`]: The `Command` enum and `update()` reducer
//! - [`config`]: Settings with defaults → file → env → CLI resolution

pub mod command;
pub mod config;
pub mod menu;
pub mod state;
