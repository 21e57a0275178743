//! Input handling for TUI

use crate::app::{App, AppMode, Page};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use themeswitch::{FormAction, GridAction, ThemeId};

/// Route a key press to the right handler for the current mode and page
pub fn handle_key_event(app: &mut App, key: KeyEvent) {
    if handle_keybinding(app, key.modifiers, key.code) {
        return;
    }

    match app.mode {
        AppMode::ThemePicker => handle_theme_picker_input(app, key.code),
        AppMode::ProductDetail(_) => handle_detail_input(app, key.code),
        AppMode::Normal => handle_page_input(app, key.code),
    }
}

/// Handle global keybindings, returns true if handled
pub fn handle_keybinding(app: &mut App, modifiers: KeyModifiers, code: KeyCode) -> bool {
    match (modifiers, code) {
        // Ctrl+Q: Quit
        (KeyModifiers::CONTROL, KeyCode::Char('q' | 'Q')) => {
            app.should_quit = true;
            true
        }
        // Ctrl+T: Open theme picker
        (KeyModifiers::CONTROL, KeyCode::Char('t' | 'T')) => {
            app.open_theme_picker();
            true
        }
        // Ctrl+N / Ctrl+P: Next / previous page
        (KeyModifiers::CONTROL, KeyCode::Char('n' | 'N')) => {
            app.next_page();
            true
        }
        (KeyModifiers::CONTROL, KeyCode::Char('p' | 'P')) => {
            app.prev_page();
            true
        }
        // Ctrl+S: Send the contact form
        (KeyModifiers::CONTROL, KeyCode::Char('s' | 'S')) if app.page == Page::Contact => {
            app.submit_contact();
            true
        }
        // F1-F3 or Alt+1-3: Jump to page
        (_, KeyCode::F(n)) if (1..=3).contains(&n) => {
            app.go_to(Page::all()[(n - 1) as usize]);
            true
        }
        (KeyModifiers::ALT, KeyCode::Char(c)) if ('1'..='3').contains(&c) => {
            let index = (c as usize) - ('1' as usize);
            app.go_to(Page::all()[index]);
            true
        }
        _ => false,
    }
}

/// Handle theme picker keyboard input
pub fn handle_theme_picker_input(app: &mut App, code: KeyCode) {
    let themes = ThemeId::all();
    let theme_count = themes.len();

    match code {
        KeyCode::Up | KeyCode::Char('k') => {
            if app.theme_picker_index > 0 {
                app.theme_picker_index -= 1;
            } else {
                app.theme_picker_index = theme_count.saturating_sub(1);
            }
        }
        KeyCode::Down | KeyCode::Char('j') => {
            if app.theme_picker_index < theme_count.saturating_sub(1) {
                app.theme_picker_index += 1;
            } else {
                app.theme_picker_index = 0;
            }
        }
        KeyCode::Char(c @ '1'..='3') => {
            app.theme_picker_index = (c as usize) - ('1' as usize);
        }
        KeyCode::Enter => {
            // Apply selected theme
            if let Some(id) = themes.get(app.theme_picker_index) {
                app.apply_theme(*id);
            }
            app.close_popup();
        }
        KeyCode::Esc | KeyCode::Char('q') => {
            app.close_popup();
        }
        _ => {}
    }
}

/// Handle product detail popup input
pub fn handle_detail_input(app: &mut App, code: KeyCode) {
    if matches!(code, KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q')) {
        app.close_popup();
    }
}

/// Handle keys for the page that has focus
pub fn handle_page_input(app: &mut App, code: KeyCode) {
    match app.page {
        Page::Home => {
            if matches!(code, KeyCode::Tab | KeyCode::BackTab) {
                switch_page(app, code);
                return;
            }
            let count = app.feed.products().len();
            let columns = app.columns();
            match app.grid.handle_key(code, count, columns) {
                Some(GridAction::Retry) => {
                    // Only meaningful once the current fetch is over
                    if !app.feed.is_loading() {
                        app.refetch();
                    }
                }
                Some(GridAction::Open(index)) => app.open_detail(index),
                None => {}
            }
        }
        Page::About => match code {
            KeyCode::Tab | KeyCode::BackTab => switch_page(app, code),
            KeyCode::Up | KeyCode::Char('k') => {
                app.about_scroll = app.about_scroll.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                app.about_scroll = app.about_scroll.saturating_add(1);
            }
            KeyCode::PageUp => app.about_scroll = app.about_scroll.saturating_sub(10),
            KeyCode::PageDown => app.about_scroll = app.about_scroll.saturating_add(10),
            KeyCode::Home => app.about_scroll = 0,
            _ => {}
        },
        Page::Contact => {
            if app.contact.handle_key(code) == Some(FormAction::Submit) {
                app.submit_contact();
            }
        }
    }
}

fn switch_page(app: &mut App, code: KeyCode) {
    if code == KeyCode::BackTab {
        app.prev_page();
    } else {
        app.next_page();
    }
}
