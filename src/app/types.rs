//! Application types and state structures

use std::time::Instant;

/// Top-level route
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Page {
    #[default]
    Home,
    About,
    Contact,
}

impl Page {
    pub fn label(&self) -> &'static str {
        match self {
            Page::Home => "Home",
            Page::About => "About",
            Page::Contact => "Contact",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Page::Home => "⌂",
            Page::About => "ⓘ",
            Page::Contact => "✉",
        }
    }

    pub fn all() -> &'static [Page] {
        &[Page::Home, Page::About, Page::Contact]
    }

    pub fn next(&self) -> Page {
        match self {
            Page::Home => Page::About,
            Page::About => Page::Contact,
            Page::Contact => Page::Home,
        }
    }

    pub fn prev(&self) -> Page {
        match self {
            Page::Home => Page::Contact,
            Page::About => Page::Home,
            Page::Contact => Page::About,
        }
    }
}

/// Application mode
#[derive(Debug, Clone, PartialEq)]
pub enum AppMode {
    /// Normal mode - page content has focus
    Normal,
    /// Theme picker mode
    ThemePicker,
    /// Detail popup for the product at this index
    ProductDetail(usize),
}

/// Notification severity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotifyLevel {
    Info,
    Warning,
    Error,
    Success,
}

/// Notification message
pub struct Notification {
    pub message: String,
    pub level: NotifyLevel,
    pub created_at: Instant,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_mode_equality() {
        assert_eq!(AppMode::Normal, AppMode::Normal);
        assert_eq!(AppMode::ProductDetail(2), AppMode::ProductDetail(2));
        assert_ne!(AppMode::ProductDetail(1), AppMode::ProductDetail(2));
        assert_ne!(AppMode::Normal, AppMode::ThemePicker);
    }

    #[test]
    fn test_page_cycle() {
        for page in Page::all() {
            assert_eq!(page.next().prev(), *page);
        }
        assert_eq!(Page::Contact.next(), Page::Home);
        assert_eq!(Page::Home.prev(), Page::Contact);
        assert_eq!(Page::default(), Page::Home);
    }

    #[test]
    fn test_notification_creation() {
        let notification = Notification {
            message: "Test message".to_string(),
            level: NotifyLevel::Info,
            created_at: Instant::now(),
        };
        assert_eq!(notification.message, "Test message");
        assert_eq!(notification.level, NotifyLevel::Info);
    }
}
