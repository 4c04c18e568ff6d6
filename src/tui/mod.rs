//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI, and
//! translates keyboard/mouse events into core::Command values.
//!
//! This is the only module that knows about ratatui and crossterm. The
//! session controller in `run()` owns the whole lifecycle:
//!
//! ```text
//! boot diagnostics → fetch menu tree → root menu → event loop
//!                                  ↘ fatal halt (no menu)
//! ```
//!
//! ## Redraw Strategy
//!
//! The event loop uses conditional redraw: while the menu fade-in is
//! animating it draws every ~40ms, otherwise it sleeps up to 250ms and only
//! redraws on events. Playback bypasses the loop entirely — the renderer
//! repaints through `TermSink` on every appended chunk and the loop resumes
//! once the acknowledgement prompt is up.

mod event;
mod surface;
mod ui;

use std::io::stdout;
use std::time::Duration;

use log::{error, info};

use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use ratatui::DefaultTerminal;

use crate::api::{FetchError, fetch_menu_tree};
use crate::core::command::{Command, Effect, update};
use crate::core::config::ResolvedConfig;
use crate::core::menu::MenuTree;
use crate::core::state::{Mode, Navigator};
use crate::play::profile::{Pacing, Profile};
use crate::play::renderer::{Renderer, debug_style, error_style};
use crate::play::{self, Sink};
use crate::tui::event::{TuiEvent, drain_pending, poll_event_immediate, poll_event_timeout};
use crate::tui::surface::{Screen, TermSink};
use crate::tui::ui::MenuView;

const DEBUG_CHAR_DELAY: Duration = Duration::from_millis(10);
const ERROR_CHAR_DELAY: Duration = Duration::from_millis(30);
const NOTICE_RULE_WIDTH: usize = 40;

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        execute!(stdout(), EnableMouseCapture)?;
        info!("Terminal modes enabled (mouse capture)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(stdout(), DisableMouseCapture);
    }
}

pub async fn run(config: ResolvedConfig) -> std::io::Result<()> {
    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new()?;

    let client = reqwest::Client::new();
    let mut screen = Screen::default();
    let pacing = Pacing::new(Profile::Normal, config.pacing);

    // ── boot ──
    let tree = {
        let mut sink = TermSink::new(&mut terminal, &mut screen);
        let mut renderer = Renderer::new(&mut sink, pacing, &client);

        renderer
            .type_with("BIOS CHECK: OK", debug_style(), DEBUG_CHAR_DELAY)
            .await;
        renderer
            .type_with("INITIALIZING NETWORK...", debug_style(), DEBUG_CHAR_DELAY)
            .await;
        renderer
            .type_line(&format!(">> FETCHING DATA {}", config.data_url))
            .await;

        match fetch_menu_tree(&client, &config.data_url).await {
            Ok(tree) => {
                render_boot_banner(&mut renderer, &tree).await;
                tree
            }
            Err(e) => {
                error!("Boot fetch failed: {e}");
                render_boot_failure(&mut renderer, &e).await;
                halt_until_quit(&mut terminal, &mut screen)?;
                ratatui::restore();
                return Ok(());
            }
        }
    };

    let mut nav = Navigator::new(&tree);
    nav.show_root(true);

    // ── event loop ──
    let mut was_animating = false;
    loop {
        // Menu fade-in: reveal one more row per frame
        if nav.animate_menu {
            if !was_animating {
                screen.reveal_rows = 0;
            }
            screen.reveal_rows += 1;
            if screen.reveal_rows as usize >= nav.options.len() {
                nav.animate_menu = false;
            }
        } else {
            screen.reveal_rows = u16::MAX;
        }
        was_animating = nav.animate_menu;

        let menu = MenuView::from_nav(&nav);
        terminal.draw(|f| ui::draw_ui(f, menu.as_ref(), &mut screen))?;

        let timeout = if nav.animate_menu {
            Duration::from_millis(40)
        } else {
            Duration::from_millis(250)
        };
        let Some(tui_event) = poll_event_timeout(timeout)? else {
            continue;
        };

        let command = match tui_event {
            TuiEvent::Resize => continue,
            TuiEvent::ScrollUp => {
                screen.scroll.scroll_up();
                continue;
            }
            TuiEvent::ScrollDown => {
                screen.scroll.scroll_down();
                continue;
            }
            TuiEvent::ForceQuit => Command::Quit,
            TuiEvent::CursorUp => Command::CursorUp,
            TuiEvent::CursorDown => Command::CursorDown,
            TuiEvent::Submit => {
                if nav.mode == Mode::WaitingForAck {
                    Command::Acknowledge
                } else {
                    Command::Activate
                }
            }
            TuiEvent::MouseMove(_col, row) => {
                let frame_area = terminal.get_frame().area();
                match ui::hit_test_option(row, frame_area, nav.options.len()) {
                    Some(index) => Command::Hover(index),
                    None => continue,
                }
            }
            TuiEvent::MouseClick(_col, row) => {
                let frame_area = terminal.get_frame().area();
                let Some(index) = ui::hit_test_option(row, frame_area, nav.options.len())
                else {
                    continue;
                };
                update(&mut nav, Command::Hover(index));
                Command::Activate
            }
        };

        match update(&mut nav, command) {
            Effect::None => {}
            Effect::Play { content, mode } => {
                let mut sink = TermSink::new(&mut terminal, &mut screen);
                play::play(&client, &config.pacing, &mut sink, &mut nav, &content, mode)
                    .await;
                // Input mashed during playback must not replay against the
                // acknowledgement prompt
                let dropped = drain_pending(poll_event_immediate)?;
                if dropped > 0 {
                    info!("Dropped {dropped} events queued during playback");
                }
            }
            Effect::ClearScreen => {
                nav.mode = Mode::Busy;
                let mut sink = TermSink::new(&mut terminal, &mut screen);
                let mut renderer = Renderer::new(&mut sink, pacing, &client);
                renderer.type_line(">> CLEARING BUFFER...").await;
                renderer.sink().pause(Duration::from_millis(150)).await;
                renderer.sink().clear();
                nav.stack.clear();
                nav.saved = None;
                nav.show_root(false);
                drain_pending(poll_event_immediate)?;
            }
            Effect::Shutdown => {
                nav.mode = Mode::Shutdown;
                let mut sink = TermSink::new(&mut terminal, &mut screen);
                let mut renderer = Renderer::new(&mut sink, pacing, &client);
                renderer
                    .type_with("System halting...", error_style(), Duration::from_millis(20))
                    .await;
                screen.dimmed = true;
                terminal.draw(|f| ui::draw_ui(f, None, &mut screen))?;
                tokio::time::sleep(Duration::from_secs(1)).await;
                break;
            }
            Effect::Fatal(msg) => {
                error!("Fatal data error: {msg}");
                let mut sink = TermSink::new(&mut terminal, &mut screen);
                let mut renderer = Renderer::new(&mut sink, pacing, &client);
                renderer
                    .type_with(
                        &format!("[FATAL ERROR] {msg}"),
                        error_style(),
                        ERROR_CHAR_DELAY,
                    )
                    .await;
                renderer
                    .type_with("SYSTEM HALTED", error_style(), ERROR_CHAR_DELAY)
                    .await;
                halt_until_quit(&mut terminal, &mut screen)?;
                break;
            }
        }
    }

    info!("Session ended");
    ratatui::restore();
    Ok(())
}

/// Post-fetch boot transcript: integrity line, boot message, and the
/// bulleted notice block framed by dashed rules.
async fn render_boot_banner<S: Sink>(renderer: &mut Renderer<'_, S>, tree: &MenuTree) {
    renderer
        .type_with(">> DATA INTEGRITY CHECK: PASS", debug_style(), DEBUG_CHAR_DELAY)
        .await;
    renderer.type_line("").await;
    renderer.type_line(&tree.sys.boot_msg).await;

    if !tree.sys.news.is_empty() {
        renderer
            .type_with(">> CHECKING SYSTEM NOTICES...", debug_style(), DEBUG_CHAR_DELAY)
            .await;
        let rule = "-".repeat(NOTICE_RULE_WIDTH);
        renderer.type_line(&rule).await;
        for notice in &tree.sys.news {
            renderer.type_line(&format!(" * {notice}")).await;
        }
        renderer.type_line(&rule).await;
    }
}

/// Fatal boot transcript: visible error, diagnostics, halt notice.
async fn render_boot_failure<S: Sink>(renderer: &mut Renderer<'_, S>, error: &FetchError) {
    renderer
        .type_with(
            "[FATAL ERROR] FAILED TO LOAD SYSTEM DATA.",
            error_style(),
            ERROR_CHAR_DELAY,
        )
        .await;
    renderer
        .type_with(&format!("DEBUG INFO: {error}"), debug_style(), DEBUG_CHAR_DELAY)
        .await;
    renderer
        .type_with("Please check server connection.", debug_style(), DEBUG_CHAR_DELAY)
        .await;
    renderer
        .type_with("SYSTEM HALTED", error_style(), ERROR_CHAR_DELAY)
        .await;
}

/// Terminal state after a fatal error: keep the transcript on screen and
/// accept nothing but Ctrl+C.
fn halt_until_quit(terminal: &mut DefaultTerminal, screen: &mut Screen) -> std::io::Result<()> {
    loop {
        terminal.draw(|f| ui::draw_ui(f, None, screen))?;
        match poll_event_timeout(Duration::from_millis(250))? {
            Some(TuiEvent::ForceQuit) => return Ok(()),
            Some(TuiEvent::ScrollUp) => screen.scroll.scroll_up(),
            Some(TuiEvent::ScrollDown) => screen.scroll.scroll_down(),
            _ => {}
        }
    }
}
