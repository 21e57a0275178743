//! Product card grid for ThemeSwitch
//!
//! Renders the featured products as cards laid out according to the active
//! theme, with loading, error and empty states.

use crate::catalog::{truncate_chars, Product, Star};
use crate::product_feed::FeedView;
use crate::theme::StyleBundle;
use crossterm::event::KeyCode;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Margin, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// Rendered height of one product card, borders included
pub const CARD_HEIGHT: u16 = 7;

/// Result of grid interaction
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridAction {
    /// Open details for the product at this index
    Open(usize),
    /// Fetch the products again
    Retry,
}

/// Selection and scroll state of the product grid
#[derive(Debug, Default)]
pub struct ProductGrid {
    /// Currently selected index
    selected_index: usize,

    /// First visible row
    scroll_row: usize,
}

impl ProductGrid {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected_index(&self) -> usize {
        self.selected_index
    }

    /// Currently selected product within `products`
    pub fn selected<'a>(&self, products: &'a [Product]) -> Option<&'a Product> {
        products.get(self.selected_index)
    }

    /// Reset selection, e.g. after new products arrive
    pub fn reset(&mut self) {
        self.selected_index = 0;
        self.scroll_row = 0;
    }

    /// Handle key input
    ///
    /// `count` is the number of products shown, `columns` the cards per row.
    pub fn handle_key(&mut self, key: KeyCode, count: usize, columns: usize) -> Option<GridAction> {
        let columns = columns.max(1);
        match key {
            KeyCode::Char('r') => return Some(GridAction::Retry),
            KeyCode::Enter => {
                return (self.selected_index < count).then_some(GridAction::Open(self.selected_index));
            }
            _ => {}
        }

        if count == 0 {
            return None;
        }

        match key {
            KeyCode::Up | KeyCode::Char('k') => {
                if self.selected_index >= columns {
                    self.selected_index -= columns;
                }
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if self.selected_index + columns < count {
                    self.selected_index += columns;
                }
            }
            KeyCode::Left | KeyCode::Char('h') => {
                self.selected_index = self.selected_index.saturating_sub(1);
            }
            KeyCode::Right | KeyCode::Char('l') => {
                if self.selected_index + 1 < count {
                    self.selected_index += 1;
                }
            }
            KeyCode::Home => self.selected_index = 0,
            KeyCode::End => self.selected_index = count - 1,
            _ => {}
        }
        None
    }

    /// Keep the selected row inside the visible window
    fn scroll_into_view(&mut self, columns: usize, visible_rows: usize) {
        let row = self.selected_index / columns;
        if row < self.scroll_row {
            self.scroll_row = row;
        } else if row >= self.scroll_row + visible_rows {
            self.scroll_row = row + 1 - visible_rows;
        }
    }

    /// Render the grid for the current feed state
    pub fn render(&mut self, f: &mut Frame, area: Rect, feed: FeedView<'_>, t: &StyleBundle) {
        // Handle loading state
        if feed.loading {
            let loading = Paragraph::new(vec![
                Line::from(""),
                Line::from(Span::styled("⟳", t.style_loading())),
                Line::from(Span::styled("Loading amazing products...", t.style_loading())),
            ])
            .alignment(Alignment::Center);
            f.render_widget(loading, area);
            return;
        }

        // Handle error state
        if let Some(error) = feed.error {
            let text = vec![
                Line::from(""),
                Line::from(Span::styled(error, t.style_error())),
                Line::from(""),
                Line::from(vec![
                    Span::styled(" Try Again ", t.style_button()),
                    Span::styled("  press ", t.style_text_muted()),
                    Span::styled("r", t.style_key()),
                ]),
            ];
            let paragraph = Paragraph::new(text)
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true });
            f.render_widget(paragraph, area);
            return;
        }

        // Handle empty state
        if feed.products.is_empty() {
            let empty = Paragraph::new("No products found")
                .style(t.style_text_muted())
                .alignment(Alignment::Center);
            f.render_widget(empty, area);
            return;
        }

        let count = feed.products.len();
        let columns = t.layout.columns();
        self.selected_index = self.selected_index.min(count - 1);

        let visible_rows = ((area.height / CARD_HEIGHT) as usize).max(1);
        self.scroll_into_view(columns, visible_rows);

        let rows: Vec<&[Product]> = feed.products.chunks(columns).collect();
        for (slot, row_index) in (self.scroll_row..rows.len()).take(visible_rows).enumerate() {
            let y = area.y + slot as u16 * CARD_HEIGHT;
            let height = CARD_HEIGHT.min(area.bottom().saturating_sub(y));
            if height == 0 {
                break;
            }
            let row_area = Rect::new(area.x, y, area.width, height);

            let cells = Layout::default()
                .direction(Direction::Horizontal)
                .constraints(vec![Constraint::Ratio(1, columns as u32); columns])
                .split(row_area);

            for (col, product) in rows[row_index].iter().enumerate() {
                let index = row_index * columns + col;
                render_card(f, cells[col], product, index == self.selected_index, t);
            }
        }
    }
}

/// Star glyph spans for a product rating
pub fn star_spans(product: &Product, t: &StyleBundle) -> Vec<Span<'static>> {
    product
        .stars()
        .iter()
        .map(|star| {
            let style = match star {
                Star::Full | Star::Half => t.style_star(),
                Star::Empty => t.style_text_muted(),
            };
            Span::styled(star.glyph().to_string(), style)
        })
        .collect()
}

fn render_card(f: &mut Frame, area: Rect, product: &Product, selected: bool, t: &StyleBundle) {
    let border = if selected {
        t.style_border_focus()
    } else {
        t.style_border()
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border)
        .style(if selected { t.style_selected() } else { t.style_card() });
    let inner = block.inner(area);
    f.render_widget(block, area);

    let width = inner.width as usize;
    let mut rating = vec![
        Span::styled(product.formatted_price(), t.style_accent()),
        Span::raw("  "),
    ];
    rating.extend(star_spans(product, t));
    rating.push(Span::styled(
        format!(" ({})", product.rating.count),
        t.style_text_muted(),
    ));

    let lines = vec![
        Line::from(Span::styled(
            format!(" {} ", truncate_chars(&product.category, width.saturating_sub(2))),
            t.style_badge(),
        )),
        Line::from(Span::styled(
            truncate_chars(&product.title, width),
            t.style_card_title(),
        )),
        Line::from(Span::styled(
            product.short_description(width),
            t.style_text_muted(),
        )),
        Line::from(""),
        Line::from(rating),
    ];
    f.render_widget(Paragraph::new(lines), inner);
}

/// Render the product detail popup
pub fn render_product_detail(f: &mut Frame, area: Rect, product: &Product, t: &StyleBundle) {
    let popup = centered_rect(70, 70, area);
    f.render_widget(Clear, popup);

    let block = Block::default()
        .title(Span::styled(" Product Details ", t.style_subtitle()))
        .borders(Borders::ALL)
        .border_style(t.style_border_focus())
        .style(t.style_card());
    let inner = block.inner(popup);
    f.render_widget(block, popup);

    let mut rating = star_spans(product, t);
    rating.push(Span::styled(
        format!(" {:.1} ({} reviews)", product.rating.rate, product.rating.count),
        t.style_text_muted(),
    ));

    let lines = vec![
        Line::from(Span::styled(product.title.as_str(), t.style_title())),
        Line::from(""),
        Line::from(vec![
            Span::styled(format!(" {} ", product.category), t.style_badge()),
            Span::raw("  "),
            Span::styled(product.formatted_price(), t.style_accent()),
        ]),
        Line::from(rating),
        Line::from(""),
        Line::from(Span::styled(product.description.as_str(), t.style_text())),
        Line::from(""),
        Line::from(Span::styled(product.image.as_str(), t.style_text_muted())),
        Line::from(""),
        Line::from(vec![
            Span::styled("[", t.style_text_muted()),
            Span::styled("Esc", t.style_key()),
            Span::styled("] Close", t.style_text_muted()),
        ]),
    ];

    let paragraph = Paragraph::new(lines).wrap(Wrap { trim: true });
    f.render_widget(paragraph, inner.inner(Margin::new(1, 0)));
}

/// Calculate centered popup area
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_width = area.width * percent_x / 100;
    let popup_height = area.height * percent_y / 100;

    let x = (area.width - popup_width) / 2;
    let y = (area.height - popup_height) / 2;

    Rect {
        x: area.x + x,
        y: area.y + y,
        width: popup_width,
        height: popup_height,
    }
}
