//! TUI rendering functions

use super::pages::{render_about, render_contact, render_home};
use crate::app::{App, AppMode, NotifyLevel, Page};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};
use themeswitch::product_grid::render_product_detail;
use themeswitch::{StyleBundle, ThemeId};

/// Main UI rendering function
pub fn ui(f: &mut Frame, app: &mut App) {
    let t = app.styles();
    f.render_widget(Block::default().style(t.style_page()), f.area());

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Top navigation
            Constraint::Min(0),    // Page
            Constraint::Length(1), // Bottom navigation
        ])
        .split(f.area());

    render_header(f, app, chunks[0]);

    match app.page {
        Page::Home => render_home(f, app, chunks[1]),
        Page::About => render_about(f, app, chunks[1]),
        Page::Contact => render_contact(f, app, chunks[1]),
    }

    render_footer(f, app, chunks[2]);

    // Render overlays based on mode
    match app.mode {
        AppMode::ThemePicker => render_theme_picker(f, app, f.area()),
        AppMode::ProductDetail(_) => {
            if let Some(product) = app.detail_product() {
                render_product_detail(f, f.area(), product, t);
            }
        }
        AppMode::Normal => {}
    }

    // Render notifications at the bottom
    if !app.notifications.is_empty() {
        render_notifications(f, app, f.area());
    }
}

/// Render notifications at the bottom of the screen
pub fn render_notifications(f: &mut Frame, app: &App, area: Rect) {
    let notification_count = app.notifications.len().min(3); // Show max 3 notifications
    if notification_count == 0 {
        return;
    }

    let height = notification_count as u16 + 2; // +2 for borders
    let notification_area = Rect {
        x: area.x + 2,
        y: area.height.saturating_sub(height + 1),
        width: area.width.saturating_sub(4).min(60),
        height: height.min(area.height),
    };

    let t = app.styles();
    let lines: Vec<Line> = app
        .notifications
        .iter()
        .rev()
        .take(3)
        .map(|n| {
            let (prefix, style) = match n.level {
                NotifyLevel::Info => ("ℹ", t.style_accent()),
                NotifyLevel::Warning => ("⚠", t.style_warning()),
                NotifyLevel::Error => ("✗", t.style_error()),
                NotifyLevel::Success => ("✓", t.style_success()),
            };
            Line::from(vec![
                Span::styled(format!(" {prefix} "), style),
                Span::styled(n.message.as_str(), t.style_text()),
            ])
        })
        .collect();

    let notification_widget = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(t.style_border())
            .style(t.style_card()),
    );

    f.render_widget(Clear, notification_area);
    f.render_widget(notification_widget, notification_area);
}

/// Render theme picker modal
pub fn render_theme_picker(f: &mut Frame, app: &App, area: Rect) {
    let t = app.styles();
    let themes = ThemeId::all();
    let current = app.theme();

    // Calculate popup size
    let popup_width = 72u16;
    let popup_height = (themes.len() as u16) + 6; // title + items + description + footer + borders

    // Center the popup
    let popup_x = area.x + (area.width.saturating_sub(popup_width)) / 2;
    let popup_y = area.y + (area.height.saturating_sub(popup_height)) / 2;

    let popup_area = Rect {
        x: popup_x,
        y: popup_y,
        width: popup_width.min(area.width),
        height: popup_height.min(area.height),
    };

    // Clear the popup area
    f.render_widget(Clear, popup_area);

    // Build theme list
    let mut lines: Vec<Line> = vec![Line::from("")];

    for (i, id) in themes.iter().enumerate() {
        let is_selected = i == app.theme_picker_index;
        let is_current = *id == current;

        let prefix = if is_selected { " > " } else { "   " };
        let suffix = if is_current { " ✓" } else { "" };

        let style = if is_selected {
            t.style_accent().add_modifier(Modifier::BOLD)
        } else if is_current {
            t.style_success()
        } else {
            t.style_text()
        };

        lines.push(Line::from(vec![
            Span::styled(prefix, style),
            Span::styled(format!("{}. {}", i + 1, id.name()), style),
            Span::styled(suffix, t.style_success()),
        ]));

        // Show description for selected item
        if is_selected {
            lines.push(Line::from(vec![
                Span::raw("      "),
                Span::styled(id.description(), t.style_text_muted()),
            ]));
        }
    }

    lines.push(Line::from(""));

    // Footer
    lines.push(Line::from(vec![
        Span::styled(" Enter", t.style_key()),
        Span::styled(": Select  ", t.style_text_muted()),
        Span::styled("Esc", t.style_key()),
        Span::styled(": Cancel", t.style_text_muted()),
    ]));

    let block = Block::default()
        .title(Span::styled(" Choose a Theme ", t.style_subtitle()))
        .borders(Borders::ALL)
        .border_style(t.style_border_focus())
        .style(t.style_card());

    let paragraph = Paragraph::new(lines).block(block);
    f.render_widget(paragraph, popup_area);
}

/// Render top navigation: logo, page links and the active theme
pub fn render_header(f: &mut Frame, app: &App, area: Rect) {
    let t = app.styles();

    let mut left_spans: Vec<Span> = vec![
        Span::styled(" ◆ ThemeSwitch ", t.style_logo()),
        Span::styled(" ", t.style_header()),
    ];
    left_spans.extend(nav_links(app.page, t, t.style_header()));

    let mut right_spans: Vec<Span> = vec![];
    if app.theme_store.is_transitioning() {
        right_spans.push(Span::styled("⟳ ", t.style_header().patch(t.style_loading())));
    }
    right_spans.push(Span::styled(
        format!("Theme: {} ", app.theme().name()),
        t.style_header(),
    ));

    let line = justify(left_spans, right_spans, area.width);
    f.render_widget(Paragraph::new(line).style(t.style_header()), area);
}

/// Render bottom navigation with key hints
pub fn render_footer(f: &mut Frame, app: &App, area: Rect) {
    let t = app.styles();

    let mut left_spans: Vec<Span> = vec![Span::raw(" ")];
    for (i, page) in Page::all().iter().enumerate() {
        let style = if *page == app.page {
            t.style_nav_active()
        } else {
            t.style_text_muted()
        };
        left_spans.push(Span::styled(format!("F{}", i + 1), t.style_key()));
        left_spans.push(Span::styled(format!(" {} {} ", page.icon(), page.label()), style));
    }

    let hints = match (&app.mode, app.page) {
        (AppMode::ThemePicker, _) => "[j/k:move 1-3:pick Enter:apply Esc:cancel] ",
        (AppMode::ProductDetail(_), _) => "[Esc:close] ",
        (AppMode::Normal, Page::Home) => "[←↑↓→:select Enter:details r:retry ^T:theme ^Q:quit] ",
        (AppMode::Normal, Page::About) => "[j/k:scroll ^T:theme ^Q:quit] ",
        (AppMode::Normal, Page::Contact) => "[Tab:field Enter/^S:send ^T:theme ^Q:quit] ",
    };
    let right_spans = vec![Span::styled(hints, t.style_text_muted())];

    let line = justify(left_spans, right_spans, area.width);
    f.render_widget(Paragraph::new(line).style(t.style_header()), area);
}

/// Page links with the active one marked
pub fn nav_links(active: Page, t: &StyleBundle, base: ratatui::style::Style) -> Vec<Span<'static>> {
    Page::all()
        .iter()
        .map(|page| {
            if *page == active {
                Span::styled(format!(" ▸{} ", page.label()), base.patch(t.style_nav_active()))
            } else {
                Span::styled(format!("  {} ", page.label()), base.patch(t.style_nav()))
            }
        })
        .collect()
}

/// Join left and right spans with padding so the right side is flush
fn justify<'a>(left: Vec<Span<'a>>, right: Vec<Span<'a>>, width: u16) -> Line<'a> {
    let left_width: usize = left.iter().map(Span::width).sum();
    let right_width: usize = right.iter().map(Span::width).sum();

    let mut spans = left;
    let padding = (width as usize).saturating_sub(left_width + right_width);
    if padding > 0 {
        spans.push(Span::raw(" ".repeat(padding)));
    }
    spans.extend(right);
    Line::from(spans)
}

/// Wrap a paragraph of text lines into a bordered card
pub fn card<'a>(title: &'a str, lines: Vec<Line<'a>>, t: &StyleBundle) -> Paragraph<'a> {
    Paragraph::new(lines)
        .block(
            Block::default()
                .title(Span::styled(format!(" {title} "), t.style_card_title()))
                .borders(Borders::ALL)
                .border_style(t.style_border())
                .style(t.style_card()),
        )
        .wrap(Wrap { trim: true })
}
