use crate::core::state::{Mode, Navigator};
use crate::tui::surface::Screen;

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect, Size};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use tui_scrollview::{ScrollView, ScrollbarVisibility};

pub const MENU_HINT: &str = "USE ARROW KEYS OR MOUSE";

/// What the menu pane needs from the navigator, decoupled so playback can
/// repaint without holding a navigator borrow.
pub struct MenuView<'a> {
    pub title: &'a str,
    pub labels: Vec<&'a str>,
    pub cursor: usize,
}

impl<'a> MenuView<'a> {
    /// The menu pane is only shown while the navigator is in `Menu`.
    pub fn from_nav(nav: &'a Navigator) -> Option<Self> {
        (nav.mode == Mode::Menu).then(|| MenuView {
            title: &nav.title,
            labels: nav.options.iter().map(|n| n.label.as_str()).collect(),
            cursor: nav.cursor,
        })
    }

    /// Title row + option rows + hint row.
    fn height(&self) -> u16 {
        self.labels.len() as u16 + 2
    }
}

pub fn draw_ui(frame: &mut Frame, menu: Option<&MenuView>, screen: &mut Screen) {
    use Constraint::{Length, Min};
    let menu_height = menu.map(MenuView::height).unwrap_or(0);
    let layout = Layout::vertical([Length(1), Min(0), Length(menu_height)]);
    let [title_area, transcript_area, menu_area] = layout.areas(frame.area());

    draw_title_bar(frame, title_area, screen);
    draw_transcript(frame, transcript_area, screen);
    if let Some(menu) = menu {
        draw_menu(frame, menu_area, menu, screen);
    }
}

fn overall_style(screen: &Screen) -> Style {
    if screen.dimmed {
        Style::default().fg(Color::DarkGray).add_modifier(Modifier::DIM)
    } else if screen.intense {
        Style::default()
            .fg(Color::LightGreen)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Green)
    }
}

fn draw_title_bar(frame: &mut Frame, area: Rect, screen: &Screen) {
    let label = if screen.intense {
        "PHOSPHOR CONSOLE // ACCELERATED"
    } else {
        "PHOSPHOR CONSOLE"
    };
    let bar = Span::styled(label, overall_style(screen).add_modifier(Modifier::REVERSED));
    frame.render_widget(bar, area);
}

fn draw_transcript(frame: &mut Frame, area: Rect, screen: &mut Screen) {
    let content_width = area.width.saturating_sub(1);
    let total_height = screen.transcript.lines.len() as u16;

    let mut scroll_view = ScrollView::new(Size::new(content_width, total_height))
        .vertical_scrollbar_visibility(ScrollbarVisibility::Automatic)
        .horizontal_scrollbar_visibility(ScrollbarVisibility::Never);

    let content_rect = Rect::new(0, 0, content_width, total_height);
    let mut paragraph = Paragraph::new(screen.transcript.clone());
    if screen.dimmed {
        paragraph = paragraph.style(overall_style(screen));
    }
    scroll_view.render_widget(paragraph, content_rect);

    frame.render_stateful_widget(scroll_view, area, &mut screen.scroll);
}

fn draw_menu(frame: &mut Frame, area: Rect, menu: &MenuView, screen: &Screen) {
    let base = overall_style(screen);
    let mut lines = Vec::with_capacity(menu.labels.len() + 2);
    lines.push(Line::from(Span::styled(
        menu.title.to_string(),
        base.add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
    )));

    for (index, label) in menu.labels.iter().enumerate() {
        // Fade-in: rows past the reveal counter stay blank this frame
        if (index as u16) >= screen.reveal_rows {
            lines.push(Line::default());
            continue;
        }
        let row = format!("[ {} ] {}", index + 1, label);
        let style = if index == menu.cursor {
            base.add_modifier(Modifier::REVERSED)
        } else {
            base
        };
        lines.push(Line::from(Span::styled(row, style)));
    }

    lines.push(Line::from(Span::styled(
        MENU_HINT.to_string(),
        base.add_modifier(Modifier::DIM),
    )));

    frame.render_widget(Paragraph::new(lines), area);
}

/// Hit test: given a screen Y coordinate, find which option row (if any)
/// is at that position. Mirrors the `draw_ui` layout.
pub fn hit_test_option(screen_y: u16, frame_area: Rect, option_count: usize) -> Option<usize> {
    use Constraint::{Length, Min};
    let menu_height = option_count as u16 + 2;
    let layout = Layout::vertical([Length(1), Min(0), Length(menu_height)]);
    let [_title_area, _transcript_area, menu_area] = layout.areas(frame_area);

    // First menu row is the title, last is the hint
    let first_option_y = menu_area.y + 1;
    if screen_y < first_option_y || screen_y >= first_option_y + option_count as u16 {
        return None;
    }
    Some((screen_y - first_option_y) as usize)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn menu_view(labels: Vec<&'static str>) -> MenuView<'static> {
        MenuView {
            title: "MAIN MENU",
            labels,
            cursor: 0,
        }
    }

    #[test]
    fn draw_ui_renders_menu_rows() {
        let backend = TestBackend::new(60, 20);
        let mut terminal = Terminal::new(backend).unwrap();
        let mut screen = Screen::default();
        screen.reveal_rows = u16::MAX;
        let menu = menu_view(vec!["ABOUT", "SHUTDOWN"]);
        terminal
            .draw(|f| draw_ui(f, Some(&menu), &mut screen))
            .unwrap();

        let rendered = format!("{:?}", terminal.backend().buffer());
        assert!(rendered.contains("[ 1 ] ABOUT"));
        assert!(rendered.contains("[ 2 ] SHUTDOWN"));
        assert!(rendered.contains(MENU_HINT));
    }

    #[test]
    fn draw_ui_without_menu_only_shows_transcript() {
        let backend = TestBackend::new(60, 20);
        let mut terminal = Terminal::new(backend).unwrap();
        let mut screen = Screen::default();
        screen.push_line(Line::from("hello"));
        terminal.draw(|f| draw_ui(f, None, &mut screen)).unwrap();

        let rendered = format!("{:?}", terminal.backend().buffer());
        assert!(rendered.contains("hello"));
        assert!(!rendered.contains(MENU_HINT));
    }

    #[test]
    fn hit_test_maps_rows_to_option_indices() {
        let frame = Rect::new(0, 0, 60, 20);
        // 3 options: menu pane occupies rows 15..20, options at 16..19
        assert_eq!(hit_test_option(16, frame, 3), Some(0));
        assert_eq!(hit_test_option(18, frame, 3), Some(2));
        // Title row and hint row are not options
        assert_eq!(hit_test_option(15, frame, 3), None);
        assert_eq!(hit_test_option(19, frame, 3), None);
        // Transcript area is not an option
        assert_eq!(hit_test_option(3, frame, 3), None);
    }
}
