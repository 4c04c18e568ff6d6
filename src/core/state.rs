//! # Navigator State
//!
//! The single session-wide state machine over the menu tree. This module
//! contains domain logic only — no TUI types, no I/O. Presentation reads
//! from it; transitions happen through `update()` in command.rs or through
//! the content player's explicit mode handoffs.
//!
//! ```text
//! Navigator
//! ├── mode: Mode                    // Booting | Menu | Playing | ...
//! ├── cursor: usize                 // highlighted option index
//! ├── title: String                 // current menu title
//! ├── options: Vec<MenuNode>        // visible options (incl. synthetic back)
//! ├── stack: Vec<MenuFrame>         // ancestor trail for << RETURN
//! ├── saved: Option<MenuFrame>      // frame to restore after playback
//! └── root: MenuFrame               // fallback when the trail runs dry
//! ```
//!
//! The navigator never reconstructs its position from rendered output: the
//! title and option list it carries are the source of truth.

use crate::core::menu::{MenuNode, MenuTree, NodeKind};

/// Session mode. `Busy` covers actions (clear) that briefly own the screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Booting,
    Menu,
    Playing,
    WaitingForAck,
    Busy,
    Shutdown,
}

/// A snapshot of one menu level: what `show_menu` needs to rebuild it.
/// Pushed on descent, popped on ascent; also serves as the single saved
/// navigation context around document playback.
#[derive(Debug, Clone, PartialEq)]
pub struct MenuFrame {
    pub title: String,
    pub items: Vec<MenuNode>,
}

pub struct Navigator {
    pub mode: Mode,
    pub cursor: usize,
    pub title: String,
    pub options: Vec<MenuNode>,
    pub stack: Vec<MenuFrame>,
    pub saved: Option<MenuFrame>,
    /// True right after `show_menu` asked for an entry animation.
    pub animate_menu: bool,
    root: MenuFrame,
}

impl Navigator {
    pub fn new(tree: &MenuTree) -> Self {
        Self {
            mode: Mode::Booting,
            cursor: 0,
            title: String::new(),
            options: Vec::new(),
            stack: Vec::new(),
            saved: None,
            animate_menu: false,
            root: MenuFrame {
                title: tree.root_title().to_string(),
                items: tree.root.clone(),
            },
        }
    }

    /// Enter `Menu` showing the given frame. Appends the synthetic return
    /// entry iff the ancestor stack is non-empty, and resets the cursor.
    pub fn show_menu(&mut self, title: String, items: Vec<MenuNode>, animated: bool) {
        self.mode = Mode::Menu;
        self.cursor = 0;
        self.title = title;
        self.options = items;
        if !self.stack.is_empty() {
            self.options.push(MenuNode::back());
        }
        self.animate_menu = animated;
        log::debug!(
            "menu: \"{}\" ({} options, depth {})",
            self.title,
            self.options.len(),
            self.stack.len()
        );
    }

    pub fn show_root(&mut self, animated: bool) {
        let root = self.root.clone();
        self.show_menu(root.title, root.items, animated);
    }

    pub fn show_frame(&mut self, frame: MenuFrame, animated: bool) {
        self.show_menu(frame.title, frame.items, animated);
    }

    /// Cursor up with wraparound. Only meaningful in `Menu`.
    pub fn move_up(&mut self) {
        if self.mode != Mode::Menu || self.options.is_empty() {
            return;
        }
        self.cursor = if self.cursor > 0 {
            self.cursor - 1
        } else {
            self.options.len() - 1
        };
    }

    /// Cursor down with wraparound. Only meaningful in `Menu`.
    pub fn move_down(&mut self) {
        if self.mode != Mode::Menu || self.options.is_empty() {
            return;
        }
        self.cursor = if self.cursor + 1 < self.options.len() {
            self.cursor + 1
        } else {
            0
        };
    }

    /// Mouse-equivalent hover: set the cursor without activating.
    pub fn hover(&mut self, index: usize) {
        if self.mode == Mode::Menu && index < self.options.len() {
            self.cursor = index;
        }
    }

    /// The current level as a frame, with the synthetic back entry excluded
    /// (rendering re-adds it).
    pub fn current_frame(&self) -> MenuFrame {
        MenuFrame {
            title: self.title.clone(),
            items: self
                .options
                .iter()
                .filter(|n| n.kind != NodeKind::Back)
                .cloned()
                .collect(),
        }
    }

    /// Descend into a submenu: push the current frame onto the ancestor
    /// stack, then show the child's items under a derived title.
    pub fn descend(&mut self, label: &str, items: Vec<MenuNode>) {
        let frame = self.current_frame();
        self.stack.push(frame);
        self.show_menu(format!("SUBMENU // {label}"), items, false);
    }

    /// Ascend one level: pop the trail, or fall back to the root frame.
    pub fn ascend(&mut self) {
        match self.stack.pop() {
            Some(parent) => self.show_frame(parent, false),
            None => self.show_root(false),
        }
    }

    /// Save the current frame as the single navigation context, overwriting
    /// any previous one. Called immediately before document playback.
    pub fn save_context(&mut self) {
        self.saved = Some(self.current_frame());
    }

    /// Leave `WaitingForAck`, restoring the saved context (or the root menu
    /// when there is none).
    pub fn acknowledge(&mut self) {
        match self.saved.take() {
            Some(frame) => self.show_frame(frame, false),
            None => self.show_root(false),
        }
    }

    pub fn root_frame(&self) -> &MenuFrame {
        &self.root
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::sample_tree;

    fn menu_navigator() -> Navigator {
        let tree = sample_tree();
        let mut nav = Navigator::new(&tree);
        nav.show_root(false);
        nav
    }

    #[test]
    fn boot_starts_in_booting_mode() {
        let nav = Navigator::new(&sample_tree());
        assert_eq!(nav.mode, Mode::Booting);
        assert!(nav.options.is_empty());
    }

    #[test]
    fn root_menu_has_no_back_entry() {
        let nav = menu_navigator();
        assert_eq!(nav.mode, Mode::Menu);
        assert!(nav.options.iter().all(|n| n.kind != NodeKind::Back));
    }

    #[test]
    fn cursor_wraps_both_directions() {
        let mut nav = menu_navigator();
        let len = nav.options.len();
        assert_eq!(nav.cursor, 0);
        nav.move_up();
        assert_eq!(nav.cursor, len - 1);
        nav.move_down();
        assert_eq!(nav.cursor, 0);
    }

    #[test]
    fn cursor_is_inert_outside_menu_mode() {
        let mut nav = menu_navigator();
        nav.mode = Mode::Playing;
        nav.move_down();
        assert_eq!(nav.cursor, 0);
        nav.hover(1);
        assert_eq!(nav.cursor, 0);
    }

    #[test]
    fn hover_sets_cursor_without_activating() {
        let mut nav = menu_navigator();
        nav.hover(2);
        assert_eq!(nav.cursor, 2);
        assert_eq!(nav.mode, Mode::Menu);
        // Out-of-range hover is ignored
        nav.hover(99);
        assert_eq!(nav.cursor, 2);
    }

    #[test]
    fn descend_adds_back_entry_and_ascend_restores_parent() {
        let mut nav = menu_navigator();
        let parent = nav.current_frame();
        nav.descend("ARCHIVE", vec![]);
        assert!(nav.title.starts_with("SUBMENU // "));
        assert_eq!(nav.stack.len(), 1);
        assert!(nav.options.iter().any(|n| n.kind == NodeKind::Back));
        nav.ascend();
        assert_eq!(nav.current_frame(), parent);
        assert_eq!(nav.stack.len(), 0);
    }

    #[test]
    fn two_nested_descents_return_correctly() {
        let mut nav = menu_navigator();
        let root_frame = nav.current_frame();
        nav.descend("LEVEL ONE", sample_tree().root.clone());
        let level_one = nav.current_frame();
        nav.descend("LEVEL TWO", sample_tree().root.clone());
        assert_eq!(nav.stack.len(), 2);

        nav.ascend();
        assert_eq!(nav.current_frame(), level_one);
        nav.ascend();
        assert_eq!(nav.current_frame(), root_frame);
    }

    #[test]
    fn ascend_with_empty_stack_falls_back_to_root() {
        let mut nav = menu_navigator();
        nav.ascend();
        assert_eq!(nav.title, nav.root_frame().title);
    }

    #[test]
    fn acknowledge_restores_saved_context_exactly() {
        let mut nav = menu_navigator();
        nav.descend("ARCHIVE", sample_tree().root.clone());
        let frame_before = nav.current_frame();

        nav.save_context();
        nav.mode = Mode::Playing;
        nav.mode = Mode::WaitingForAck;
        nav.acknowledge();

        assert_eq!(nav.mode, Mode::Menu);
        assert_eq!(nav.current_frame(), frame_before);
        assert!(nav.saved.is_none(), "context is consumed, not stacked");
    }

    #[test]
    fn acknowledge_without_context_shows_root() {
        let mut nav = menu_navigator();
        nav.mode = Mode::WaitingForAck;
        nav.acknowledge();
        assert_eq!(nav.title, nav.root_frame().title);
    }
}
