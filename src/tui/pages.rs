//! Page bodies for the three routes

use super::render::card;
use crate::app::{App, Page};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Margin, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};
use themeswitch::{PageLayout, StyleBundle, ThemeId};

/// Widest the text column gets on wide terminals
const MAX_COLUMN_WIDTH: u16 = 100;

const HERO_BLURB: &str = "Experience the power of dynamic theming in your terminal. \
Switch between themes and watch as the entire interface transforms before your eyes. \
Built with Rust, ratatui and a live product catalog.";

const ABOUT_INTRO: &str = "ThemeSwitch is a terminal application that demonstrates the power of \
dynamic theming. Built with modern Rust tooling and featuring three distinct visual themes, \
it showcases how thoughtful design can dramatically impact user experience.";

const MISSION: &str = "To demonstrate how modern applications can provide personalized user \
experiences through intelligent theming systems while maintaining performance, accessibility, \
and code quality standards.";

const PILLARS: [(&str, &str, &str); 3] = [
    ("🎯", "User-Centric", "Personalized experiences"),
    ("🚀", "Performance", "Optimized and fast"),
    ("💡", "Innovation", "Cutting-edge tech"),
];

const FEATURES: [(&str, &str, &str); 6] = [
    (
        "🦀",
        "Rust & ratatui",
        "Built with idiomatic Rust and ratatui for a fast, memory-safe terminal experience.",
    ),
    (
        "🎨",
        "Dynamic Theming",
        "Three distinct themes with the active choice persisted between sessions.",
    ),
    (
        "🔗",
        "API Integration",
        "Real-time data fetching from external APIs with comprehensive error handling and loading states.",
    ),
    (
        "📐",
        "Responsive Layout",
        "Layouts adapt to the terminal size, from a single column to a three-card grid.",
    ),
    (
        "⚡",
        "Performance Optimized",
        "Background fetching and a 60 fps event loop keep the interface responsive.",
    ),
    (
        "⌨",
        "Keyboard First",
        "Every action is reachable from the keyboard with consistent shortcuts.",
    ),
];

const TECHNOLOGIES: [(&str, &str); 6] = [
    ("Rust", "Language"),
    ("ratatui", "Terminal UI"),
    ("crossterm", "Terminal Backend"),
    ("ureq", "HTTP Client"),
    ("serde", "Serialization"),
    ("Fake Store API", "Data Source"),
];

const CONTACT_INTRO: &str = "Have questions about ThemeSwitch? Want to collaborate or provide \
feedback? We'd love to hear from you. Send us a message and we'll respond as soon as possible.";

const CONTACT_INFO: [(&str, &str, &str, &str); 4] = [
    ("📧", "Email", "hello@themeswitch.com", "Send us an email anytime"),
    ("📞", "Phone", "+1 (555) 123-4567", "Call us during business hours"),
    ("📍", "Address", "123 Tech Street, Innovation City", "Visit our office"),
    ("🕒", "Hours", "Mon - Fri: 9AM - 6PM", "Our working hours"),
];

const WHY_CHOOSE: [(&str, &str); 4] = [
    ("🎨", "Innovative theming system with real-time switching"),
    ("⚡", "High performance and optimized user experience"),
    ("🔒", "Secure, type-safe, and production-ready codebase"),
    ("📱", "Fully responsive layout for any terminal size"),
];

/// Horizontally centered column no wider than `max_width`
pub fn centered_column(area: Rect, max_width: u16) -> Rect {
    let width = area.width.min(max_width);
    Rect {
        x: area.x + (area.width - width) / 2,
        width,
        ..area
    }
}

// ==================== Home ====================

/// Landing page: hero, featured products and (sidebar layout) navigation
pub fn render_home(f: &mut Frame, app: &mut App, area: Rect) {
    let t = app.styles();

    let content = match t.layout {
        PageLayout::Sidebar => {
            let columns = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Length(26), Constraint::Min(0)])
                .split(area);
            render_sidebar(f, app, columns[0]);
            columns[1].inner(Margin::new(2, 1))
        }
        PageLayout::Standard => centered_column(area, MAX_COLUMN_WIDTH).inner(Margin::new(1, 1)),
        PageLayout::Grid => area.inner(Margin::new(1, 1)),
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(7), // Hero
            Constraint::Length(2), // Section title
            Constraint::Min(0),    // Products
        ])
        .split(content);

    let alignment = match t.layout {
        PageLayout::Sidebar => Alignment::Left,
        _ => Alignment::Center,
    };

    let hero = vec![
        Line::from(Span::styled("Welcome to ThemeSwitch", t.style_title())),
        Line::from(""),
        Line::from(Span::styled(HERO_BLURB, t.style_text())),
        Line::from(""),
        Line::from(vec![
            Span::styled(" Get Started ", t.style_button()),
            Span::raw("  "),
            Span::styled(" Learn More ", t.style_badge()),
            Span::styled(" F2", t.style_key()),
        ]),
    ];
    f.render_widget(
        Paragraph::new(hero)
            .alignment(alignment)
            .wrap(Wrap { trim: true }),
        chunks[0],
    );

    let mut heading = vec![Span::styled("Featured Products", t.style_subtitle())];
    let count = app.feed.products().len();
    if count > 0 {
        heading.push(Span::styled(format!("  ({count})"), t.style_text_muted()));
    }
    f.render_widget(
        Paragraph::new(Line::from(heading)).alignment(alignment),
        chunks[1],
    );

    app.grid.render(f, chunks[2], app.feed.view(), t);
}

/// Navigation and quick stats beside the landing page
fn render_sidebar(f: &mut Frame, app: &App, area: Rect) {
    let t = app.styles();
    let block = Block::default()
        .borders(Borders::RIGHT)
        .border_style(t.style_border())
        .style(t.style_card());
    let inner = block.inner(area).inner(Margin::new(1, 1));
    f.render_widget(block, area);

    let mut lines = vec![
        Line::from(Span::styled("Navigation", t.style_subtitle())),
        Line::from(""),
    ];
    for (i, page) in Page::all().iter().enumerate() {
        if *page == app.page {
            lines.push(Line::from(vec![
                Span::styled("▎ ", t.style_accent()),
                Span::styled(format!("{} {}", page.icon(), page.label()), t.style_nav_active()),
            ]));
        } else {
            lines.push(Line::from(vec![
                Span::raw("  "),
                Span::styled(format!("{} {}", page.icon(), page.label()), t.style_text()),
                Span::styled(format!("  F{}", i + 1), t.style_text_muted()),
            ]));
        }
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled("Quick Stats", t.style_subtitle())));
    lines.push(Line::from(""));
    let products = app.feed.products().len().to_string();
    let themes = ThemeId::all().len().to_string();
    for (value, label) in [
        (products, "Products"),
        (themes, "Themes"),
        ("100%".to_string(), "Responsive"),
    ] {
        lines.push(Line::from(vec![
            Span::styled(value, t.style_accent()),
            Span::styled(format!(" {label}"), t.style_text_muted()),
        ]));
    }

    f.render_widget(Paragraph::new(lines), inner);
}

// ==================== About ====================

/// About page, scrolled by `app.about_scroll`
pub fn render_about(f: &mut Frame, app: &mut App, area: Rect) {
    let t = app.styles();
    let column = centered_column(area, MAX_COLUMN_WIDTH).inner(Margin::new(2, 1));
    let lines = about_lines(app.theme(), t);

    app.about_scroll = app.about_scroll.min(lines.len().saturating_sub(1) as u16);
    let paragraph = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .scroll((app.about_scroll, 0));
    f.render_widget(paragraph, column);
}

fn about_lines(active: ThemeId, t: &StyleBundle) -> Vec<Line<'static>> {
    let mut lines = vec![
        Line::from(Span::styled("About ThemeSwitch", t.style_title())).alignment(Alignment::Center),
        Line::from(""),
        Line::from(Span::styled(ABOUT_INTRO, t.style_text())),
        Line::from(""),
        Line::from(Span::styled("Our Mission", t.style_subtitle())),
        Line::from(Span::styled(MISSION, t.style_text())),
        Line::from(""),
    ];

    let mut pillars = Vec::new();
    for (icon, title, text) in PILLARS {
        pillars.push(Span::raw(format!("{icon} ")));
        pillars.push(Span::styled(title, t.style_card_title()));
        pillars.push(Span::styled(format!(" {text}   "), t.style_text_muted()));
    }
    lines.push(Line::from(pillars));
    lines.push(Line::from(""));

    lines.push(Line::from(Span::styled("Key Features", t.style_subtitle())));
    for (icon, title, text) in FEATURES {
        lines.push(Line::from(vec![
            Span::raw(format!("{icon} ")),
            Span::styled(title, t.style_card_title()),
        ]));
        lines.push(Line::from(Span::styled(format!("   {text}"), t.style_text_muted())));
    }
    lines.push(Line::from(""));

    lines.push(Line::from(Span::styled("Technologies Used", t.style_subtitle())));
    for pair in TECHNOLOGIES.chunks(3) {
        let mut spans = Vec::new();
        for (name, role) in pair {
            spans.push(Span::styled(format!(" {name} "), t.style_badge()));
            spans.push(Span::styled(format!(" {role}    "), t.style_text_muted()));
        }
        lines.push(Line::from(spans));
    }
    lines.push(Line::from(""));

    lines.push(Line::from(Span::styled("Theme Showcase", t.style_subtitle())));
    for id in ThemeId::all() {
        let is_active = *id == active;
        let mut title = vec![Span::styled(format!("{} Theme", id.name()), t.style_card_title())];
        if is_active {
            title.push(Span::styled("  ● active", t.style_accent()));
        }
        lines.push(Line::from(""));
        lines.push(Line::from(title));
        lines.push(Line::from(Span::styled(id.description(), t.style_text())));
        for highlight in id.highlights() {
            let marker = if is_active { t.style_accent() } else { t.style_text_muted() };
            lines.push(Line::from(vec![
                Span::styled("  • ", marker),
                Span::styled(highlight, t.style_text_muted()),
            ]));
        }
    }

    lines
}

// ==================== Contact ====================

/// Contact page: form on the left, contact details on the right
pub fn render_contact(f: &mut Frame, app: &mut App, area: Rect) {
    let t = app.styles();
    let column = centered_column(area, MAX_COLUMN_WIDTH + 20).inner(Margin::new(1, 1));

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(5), Constraint::Min(0)])
        .split(column);

    let intro = vec![
        Line::from(Span::styled("Get in Touch", t.style_title())),
        Line::from(""),
        Line::from(Span::styled(CONTACT_INTRO, t.style_text())),
    ];
    f.render_widget(
        Paragraph::new(intro)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        rows[0],
    );

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(rows[1]);

    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(17), Constraint::Length(5)])
        .split(columns[0]);
    app.contact.render(f, left[0], t);

    let notes = vec![
        Line::from(vec![
            Span::styled("Privacy Notice: ", t.style_card_title()),
            Span::styled(
                "We respect your privacy and will never share your information with third parties.",
                t.style_text_muted(),
            ),
        ]),
        Line::from(vec![
            Span::styled("Response Time: ", t.style_card_title()),
            Span::styled(
                "We typically respond within 24 hours during business days.",
                t.style_text_muted(),
            ),
        ]),
    ];
    f.render_widget(
        Paragraph::new(notes).wrap(Wrap { trim: true }),
        left[1].inner(Margin::new(1, 1)),
    );

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(10), // Contact information
            Constraint::Length(6),  // Why choose
            Constraint::Min(3),     // Social
        ])
        .split(columns[1].inner(Margin::new(1, 0)));

    let mut info = Vec::new();
    for (icon, label, value, note) in CONTACT_INFO {
        info.push(Line::from(vec![
            Span::raw(format!("{icon} ")),
            Span::styled(format!("{label}: "), t.style_card_title()),
            Span::styled(value, t.style_text()),
        ]));
        info.push(Line::from(Span::styled(format!("   {note}"), t.style_text_muted())));
    }
    f.render_widget(card("Contact Information", info, t), right[0]);

    let why = WHY_CHOOSE
        .iter()
        .map(|(icon, text)| {
            Line::from(vec![
                Span::raw(format!("{icon} ")),
                Span::styled(*text, t.style_text()),
            ])
        })
        .collect();
    f.render_widget(card("Why Choose ThemeSwitch?", why, t), right[1]);

    let social = vec![Line::from(Span::raw("🐦  💼  📘  🐙")).alignment(Alignment::Center)];
    f.render_widget(card("Connect With Us", social, t), right[2]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::render::ui;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;
    use std::time::{Duration, Instant};
    use tempfile::TempDir;
    use themeswitch::catalog::Rating;
    use themeswitch::error::CatalogResource;
    use themeswitch::{Config, FetchError, NoPresentation, Product, ProductSource};

    struct Catalog {
        fail: bool,
    }

    impl ProductSource for Catalog {
        fn fetch_products(&self, limit: Option<u32>) -> Result<Vec<Product>, FetchError> {
            if self.fail {
                return Err(FetchError::Timeout {
                    resource: CatalogResource::Products,
                });
            }
            Ok((1..=limit.unwrap_or(20) as u64)
                .map(|id| Product {
                    id,
                    title: format!("Gadget {id}"),
                    price: 1299.5,
                    description: "A very nice gadget".to_string(),
                    category: "electronics".to_string(),
                    image: String::new(),
                    rating: Rating { rate: 4.5, count: 120 },
                })
                .collect())
        }
    }

    fn test_app(dir: &TempDir, theme: ThemeId, fail: bool) -> App {
        let mut config = Config::default();
        config.preferences_file = dir.path().join("prefs.toml");
        let mut app = App::with_parts(config, Box::new(Catalog { fail }), Box::new(NoPresentation));
        app.apply_theme(theme);
        app.notifications.clear();
        app
    }

    fn loaded(app: &mut App) {
        assert!(app.feed.wait(Duration::from_secs(5)));
        app.tick(Instant::now());
    }

    fn screen(app: &mut App) -> String {
        let backend = TestBackend::new(140, 60);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| ui(f, app)).unwrap();
        let buffer = terminal.backend().buffer().clone();
        buffer
            .content()
            .chunks(140)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_home_loading_state() {
        let dir = TempDir::new().unwrap();
        let mut app = test_app(&dir, ThemeId::Minimalist, false);
        // Nothing polled yet
        let text = screen(&mut app);
        assert!(text.contains("Welcome to ThemeSwitch"));
        assert!(text.contains("Loading amazing products..."));
    }

    #[test]
    fn test_home_products_every_theme() {
        for theme in ThemeId::all() {
            let dir = TempDir::new().unwrap();
            let mut app = test_app(&dir, *theme, false);
            loaded(&mut app);

            let text = screen(&mut app);
            assert!(text.contains("Featured Products"), "{theme}");
            assert!(text.contains("(6)"), "{theme}");
            assert!(text.contains("Gadget 1"), "{theme}");
            assert!(text.contains("$1,299.50"), "{theme}");
            assert!(text.contains("★★★★"), "{theme}");
        }
    }

    #[test]
    fn test_sidebar_only_for_dark_professional() {
        let dir = TempDir::new().unwrap();
        let mut app = test_app(&dir, ThemeId::DarkProfessional, false);
        loaded(&mut app);
        let text = screen(&mut app);
        assert!(text.contains("Quick Stats"));
        assert!(text.contains("6 Products"));
        assert!(text.contains("3 Themes"));
        assert!(text.contains("100% Responsive"));

        let dir = TempDir::new().unwrap();
        let mut app = test_app(&dir, ThemeId::ColorfulFun, false);
        loaded(&mut app);
        assert!(!screen(&mut app).contains("Quick Stats"));
    }

    #[test]
    fn test_home_error_offers_retry() {
        let dir = TempDir::new().unwrap();
        let mut app = test_app(&dir, ThemeId::Minimalist, true);
        loaded(&mut app);

        let text = screen(&mut app);
        assert!(text.contains("Request timeout - please try again"));
        assert!(text.contains("Try Again"));
    }

    #[test]
    fn test_about_marks_active_theme() {
        let dir = TempDir::new().unwrap();
        let mut app = test_app(&dir, ThemeId::ColorfulFun, false);
        app.go_to(Page::About);

        let text = screen(&mut app);
        assert!(text.contains("About ThemeSwitch"));
        assert!(text.contains("Our Mission"));
        assert!(text.contains("Key Features"));

        let lines = about_lines(ThemeId::ColorfulFun, app.styles());
        let rendered: Vec<String> = lines.iter().map(|l| l.to_string()).collect();
        let active = rendered.iter().position(|l| l.contains("● active")).unwrap();
        assert!(rendered[active].starts_with("Colorful Fun Theme"));
        assert_eq!(rendered.iter().filter(|l| l.contains("● active")).count(), 1);
    }

    #[test]
    fn test_about_scroll_is_clamped() {
        let dir = TempDir::new().unwrap();
        let mut app = test_app(&dir, ThemeId::Minimalist, false);
        app.go_to(Page::About);
        app.about_scroll = u16::MAX;

        screen(&mut app);
        let total = about_lines(ThemeId::Minimalist, app.styles()).len() as u16;
        assert_eq!(app.about_scroll, total - 1);
    }

    #[test]
    fn test_contact_page() {
        let dir = TempDir::new().unwrap();
        let mut app = test_app(&dir, ThemeId::DarkProfessional, false);
        app.go_to(Page::Contact);

        let text = screen(&mut app);
        assert!(text.contains("Get in Touch"));
        assert!(text.contains("Send us a Message"));
        assert!(text.contains("Send Message"));
        assert!(text.contains("hello@themeswitch.com"));
        assert!(text.contains("Why Choose ThemeSwitch?"));
        assert!(text.contains("Privacy Notice"));
    }

    #[test]
    fn test_centered_column() {
        let area = Rect::new(0, 0, 140, 10);
        let column = centered_column(area, 100);
        assert_eq!(column, Rect::new(20, 0, 100, 10));

        let narrow = Rect::new(0, 0, 80, 10);
        assert_eq!(centered_column(narrow, 100), narrow);
    }
}
