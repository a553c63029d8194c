// Keyboard handling module
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use invoice_review::config::Layout;
use invoice_review::debug_log;
use invoice_review::navigation::Move;
use invoice_review::screen_mode::ScreenMode;
use invoice_review::types::AppFlags;

use crate::App;

/// Returns `false` when the app should exit.
pub fn handle_input(app: &mut App, key: KeyEvent) -> Result<bool> {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.flags.insert(AppFlags::EXIT);
        return Ok(false);
    }

    let layout = app.config.ui.layout;
    match key.code {
        KeyCode::Char('q') => {
            app.flags.insert(AppFlags::EXIT);
            return Ok(false);
        }

        // Navigation works from every tab
        KeyCode::Left | KeyCode::Char('p') | KeyCode::Char('h') => {
            app.navigate(Move::Previous);
        }
        KeyCode::Right | KeyCode::Char('n') | KeyCode::Char('l') => {
            app.navigate(Move::Next);
        }
        KeyCode::Char('/') | KeyCode::Enter => {
            app.open_picker = true;
        }

        KeyCode::Tab => {
            app.set_screen(app.screen_mode.next(layout));
        }
        KeyCode::Char(c @ '1'..='9') => {
            let number = c.to_digit(10).unwrap_or(0) as usize;
            if let Some(mode) = ScreenMode::from_number(number, layout) {
                app.set_screen(mode);
            }
        }

        KeyCode::Char('[') if app.screen_mode.shows_pdf() => app.change_pdf_page(-1),
        KeyCode::Char(']') if app.screen_mode.shows_pdf() => app.change_pdf_page(1),

        KeyCode::Char('+') | KeyCode::Char('=') => {
            if app.expand_depth < app.structured_depth() {
                app.expand_depth += 1;
            }
            app.status_message = format!("JSON depth {}", app.expand_depth);
            app.flags.insert(AppFlags::REDRAW);
        }
        KeyCode::Char('-') => {
            app.expand_depth = app.expand_depth.saturating_sub(1);
            app.status_message = format!("JSON depth {}", app.expand_depth);
            app.flags.insert(AppFlags::REDRAW);
        }
        KeyCode::Char('f') => {
            app.flags.toggle(AppFlags::SHOW_FULL_TEXT);
            app.flags.insert(AppFlags::REDRAW);
        }
        KeyCode::Char('d') => {
            app.flags.toggle(AppFlags::DARK_MODE);
            app.flags.insert(AppFlags::REDRAW);
            debug_log(format!("dark mode {}", app.flags.contains(AppFlags::DARK_MODE)));
        }

        KeyCode::Up | KeyCode::Down | KeyCode::PageUp | KeyCode::PageDown => {
            handle_scroll_keys(app, key.code, layout);
        }
        _ => {}
    }

    Ok(true)
}

fn handle_scroll_keys(app: &mut App, code: KeyCode, layout: Layout) {
    match app.screen_mode {
        ScreenMode::Debug => match code {
            KeyCode::Up => app.debug_panel.scroll_up(1),
            KeyCode::Down => app.debug_panel.scroll_down(1),
            KeyCode::PageUp => app.debug_panel.scroll_up(10),
            KeyCode::PageDown => app.debug_panel.scroll_down(10),
            _ => {}
        },
        // PDF alone on screen: page keys flip pages
        mode if mode.shows_pdf() && !mode.shows_data(layout) => match code {
            KeyCode::PageUp => app.change_pdf_page(-1),
            KeyCode::PageDown => app.change_pdf_page(1),
            _ => {}
        },
        _ => match code {
            KeyCode::Up => app.data_panel.scroll_up(1),
            KeyCode::Down => app.data_panel.scroll_down(1),
            KeyCode::PageUp => app.data_panel.scroll_up(10),
            KeyCode::PageDown => app.data_panel.scroll_down(10),
            _ => {}
        },
    }
    app.flags.insert(AppFlags::REDRAW);
}
