//! # Commands
//!
//! Everything the input edge can say to the navigator becomes a [`Command`].
//! Arrow key? That's `Command::CursorUp`. Mouse over option 3? That's
//! `Command::Hover(3)`.
//!
//! The `update()` function takes the navigator and a command and returns an
//! [`Effect`] for the session controller to execute. No I/O here — playback,
//! screen clearing and shutdown happen in the tui module.
//!
//! ```text
//! Navigator + Command  →  update()  →  Effect
//! ```
//!
//! Commands issued in a mode that does not accept them are silently ignored
//! (`Effect::None`) — a cursor move during playback does nothing.

use crate::core::menu::{ActionKind, NodeKind, PlaybackMode};
use crate::core::state::{Mode, Navigator};

/// A discrete input command, already decoupled from any keyboard/mouse API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    CursorUp,
    CursorDown,
    Hover(usize),
    Activate,
    Acknowledge,
    Quit,
}

/// What the session controller must do after a transition.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    None,
    /// Play a document through the content player.
    Play {
        content: String,
        mode: PlaybackMode,
    },
    ClearScreen,
    Shutdown,
    /// A node was missing the fields its declared type requires. Fatal
    /// configuration error — surfaced, never recovered.
    Fatal(String),
}

pub fn update(nav: &mut Navigator, command: Command) -> Effect {
    match (nav.mode, command) {
        (Mode::Menu, Command::CursorUp) => {
            nav.move_up();
            Effect::None
        }
        (Mode::Menu, Command::CursorDown) => {
            nav.move_down();
            Effect::None
        }
        (Mode::Menu, Command::Hover(index)) => {
            nav.hover(index);
            Effect::None
        }
        (Mode::Menu, Command::Activate) => activate(nav),
        (Mode::WaitingForAck, Command::Acknowledge) => {
            nav.acknowledge();
            Effect::None
        }
        (Mode::Menu | Mode::WaitingForAck, Command::Quit) => Effect::Shutdown,
        (mode, command) => {
            log::debug!("ignored {command:?} in {mode:?}");
            Effect::None
        }
    }
}

/// Dispatch the option under the cursor by node kind.
fn activate(nav: &mut Navigator) -> Effect {
    let Some(node) = nav.options.get(nav.cursor).cloned() else {
        return Effect::None;
    };

    match node.kind {
        NodeKind::Menu => match node.items {
            Some(items) => {
                nav.descend(&node.label, items);
                Effect::None
            }
            None => Effect::Fatal(format!("menu node \"{}\" has no items", node.label)),
        },
        NodeKind::File => {
            let mode = node.playback_mode();
            match node.content {
                Some(content) => {
                    nav.save_context();
                    Effect::Play { content, mode }
                }
                None => Effect::Fatal(format!("file node \"{}\" has no content", node.label)),
            }
        }
        NodeKind::Back => {
            nav.ascend();
            Effect::None
        }
        NodeKind::Action => match node.func {
            Some(ActionKind::Clear) => Effect::ClearScreen,
            Some(ActionKind::Shutdown) => Effect::Shutdown,
            None => Effect::Fatal(format!("action node \"{}\" has no func", node.label)),
        },
    }
}
