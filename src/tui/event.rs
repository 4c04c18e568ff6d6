use crossterm::event::{self, Event, KeyCode, KeyModifiers, MouseButton, MouseEventKind};

/// TUI-specific input events
pub enum TuiEvent {
    // Core actions (translated to core::Command)
    CursorUp,
    CursorDown,
    Submit,
    MouseMove(u16, u16),
    MouseClick(u16, u16),
    ForceQuit,

    // TUI-local events (handled directly in the session loop)
    ScrollUp,
    ScrollDown,
    Resize,
}

/// Poll for an event with a timeout.
pub fn poll_event_timeout(timeout: std::time::Duration) -> std::io::Result<Option<TuiEvent>> {
    if !event::poll(timeout)? {
        return Ok(None);
    }
    let translated = match event::read()? {
        Event::Key(key_event) => {
            log::debug!(
                "Key event: {:?} with modifiers {:?}",
                key_event.code,
                key_event.modifiers
            );
            match (key_event.modifiers, key_event.code) {
                (KeyModifiers::CONTROL, KeyCode::Char('c')) => Some(TuiEvent::ForceQuit),
                (_, KeyCode::Up) => Some(TuiEvent::CursorUp),
                (_, KeyCode::Down) => Some(TuiEvent::CursorDown),
                (_, KeyCode::Enter) => Some(TuiEvent::Submit),
                (_, KeyCode::PageUp) => Some(TuiEvent::ScrollUp),
                (_, KeyCode::PageDown) => Some(TuiEvent::ScrollDown),
                _ => None,
            }
        }
        Event::Mouse(mouse_event) => match mouse_event.kind {
            MouseEventKind::Moved => {
                Some(TuiEvent::MouseMove(mouse_event.column, mouse_event.row))
            }
            MouseEventKind::Down(MouseButton::Left) => {
                Some(TuiEvent::MouseClick(mouse_event.column, mouse_event.row))
            }
            MouseEventKind::ScrollUp => Some(TuiEvent::ScrollUp),
            MouseEventKind::ScrollDown => Some(TuiEvent::ScrollDown),
            _ => None,
        },
        Event::Resize(_, _) => Some(TuiEvent::Resize),
        _ => None,
    };
    Ok(translated)
}

/// Poll for an event without blocking (returns immediately)
pub fn poll_event_immediate() -> std::io::Result<Option<TuiEvent>> {
    poll_event_timeout(std::time::Duration::ZERO)
}

/// Discard every already-queued event. Called after an operation that owned
/// the screen (playback, buffer clear) so keys mashed while it ran do not
/// replay against whatever prompt or menu comes up next. Returns the number
/// of events dropped.
pub fn drain_pending(
    mut poll: impl FnMut() -> std::io::Result<Option<TuiEvent>>,
) -> std::io::Result<usize> {
    let mut dropped = 0;
    while poll()?.is_some() {
        dropped += 1;
    }
    Ok(dropped)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drain_consumes_every_queued_event() {
        let mut queue =
            vec![TuiEvent::Submit, TuiEvent::CursorDown, TuiEvent::Submit].into_iter();
        let dropped = drain_pending(|| Ok(queue.next())).unwrap();
        assert_eq!(dropped, 3);
        assert!(queue.next().is_none());
    }

    #[test]
    fn drain_with_nothing_queued_is_a_no_op() {
        assert_eq!(drain_pending(|| Ok(None)).unwrap(), 0);
    }

    #[test]
    fn drain_stops_at_the_first_poll_error() {
        let mut calls = 0;
        let result = drain_pending(|| {
            calls += 1;
            if calls < 3 {
                Ok(Some(TuiEvent::Submit))
            } else {
                Err(std::io::Error::other("tty gone"))
            }
        });
        assert!(result.is_err());
        assert_eq!(calls, 3);
    }
}
