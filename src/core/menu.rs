//! # Menu Tree
//!
//! The data the console serves: a tree of menu nodes plus a `sys` record
//! (boot message, notice list). Fetched once at boot as JSON and held
//! immutable for the process lifetime.
//!
//! Node shapes are kind-dependent: `menu` nodes carry `items`, `file` nodes
//! carry `content` (and an optional playback `mode`), `action` nodes carry
//! `func`. `back` nodes never appear in source data — the navigator
//! synthesizes them when the ancestor stack is non-empty.

use serde::Deserialize;

/// Label used for the synthesized return entry.
pub const RETURN_LABEL: &str = "<< RETURN";

/// One node of the menu tree.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MenuNode {
    pub label: String,
    #[serde(rename = "type")]
    pub kind: NodeKind,
    /// Child nodes (`menu` only).
    #[serde(default)]
    pub items: Option<Vec<MenuNode>>,
    /// Document body (`file` only).
    #[serde(default)]
    pub content: Option<String>,
    /// Side-effecting operation (`action` only).
    #[serde(default)]
    pub func: Option<ActionKind>,
    /// Playback speed for `file` nodes. Absent means normal.
    #[serde(default)]
    pub mode: Option<PlaybackMode>,
}

impl MenuNode {
    /// The synthetic return entry appended below real options.
    pub fn back() -> Self {
        Self {
            label: RETURN_LABEL.to_string(),
            kind: NodeKind::Back,
            items: None,
            content: None,
            func: None,
            mode: None,
        }
    }

    pub fn playback_mode(&self) -> PlaybackMode {
        self.mode.unwrap_or_default()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Menu,
    File,
    Action,
    Back,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionKind {
    Clear,
    Shutdown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlaybackMode {
    #[default]
    Normal,
    Fast,
}

/// System record shipped alongside the tree: boot banner and notices.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SysInfo {
    #[serde(default)]
    pub boot_msg: String,
    #[serde(default)]
    pub news: Vec<String>,
    /// Root menu title. Falls back to a built-in when the data omits it.
    #[serde(default)]
    pub title: Option<String>,
}

/// The whole fetched resource.
#[derive(Debug, Clone, Deserialize)]
pub struct MenuTree {
    #[serde(default)]
    pub sys: SysInfo,
    pub root: Vec<MenuNode>,
}

pub const DEFAULT_ROOT_TITLE: &str = "MAIN MENU // PHOSPHOR-TOOLKIT";

impl MenuTree {
    pub fn root_title(&self) -> &str {
        self.sys.title.as_deref().unwrap_or(DEFAULT_ROOT_TITLE)
    }
}
