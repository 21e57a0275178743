//! Application state and logic

pub mod types;

pub use types::{AppMode, Notification, NotifyLevel, Page};

use std::time::{Duration, Instant};
use themeswitch::{
    Config, ContactField, ContactForm, FilePreferences, Product, ProductFeed, ProductGrid, ProductSource,
    PresentationHook, StyleBundle, SubmitStatus, TerminalTitle, ThemeId, ThemeStore,
};
use tracing::{debug, info};

/// How long a notification stays on screen
const NOTIFICATION_TTL: Duration = Duration::from_secs(5);

/// Application state
pub struct App {
    pub should_quit: bool,
    /// Current application mode
    pub mode: AppMode,
    /// Current route
    pub page: Page,
    /// Configuration
    pub config: Config,
    /// Active theme, handed to every render function
    pub theme_store: ThemeStore<FilePreferences, Box<dyn PresentationHook>>,
    /// Featured products on the landing page
    pub feed: ProductFeed<Box<dyn ProductSource>>,
    /// Product grid selection
    pub grid: ProductGrid,
    /// Contact page form
    pub contact: ContactForm,
    /// Theme picker: currently selected index
    pub theme_picker_index: usize,
    /// First visible line of the About page
    pub about_scroll: u16,
    /// Notifications to display
    pub notifications: Vec<Notification>,
}

impl App {
    pub fn new(config: Config) -> Self {
        let source: Box<dyn ProductSource> = Box::new(config.api.client());
        Self::with_parts(config, source, Box::new(TerminalTitle))
    }

    /// Build the app around an explicit product source and presentation hook
    pub fn with_parts(
        config: Config,
        source: Box<dyn ProductSource>,
        presentation: Box<dyn PresentationHook>,
    ) -> Self {
        let storage = FilePreferences::new(&config.preferences_file);
        let theme_store = ThemeStore::load(storage, presentation, config.theme.transition());
        let feed = ProductFeed::new(source, config.catalog.limit());
        let contact = ContactForm::new(config.contact.delivery())
            .with_timings(config.contact.submit_delay(), config.contact.status_reset());

        Self {
            should_quit: false,
            mode: AppMode::Normal,
            page: Page::Home,
            config,
            theme_store,
            feed,
            grid: ProductGrid::new(),
            contact,
            theme_picker_index: 0,
            about_scroll: 0,
            notifications: Vec::new(),
        }
    }

    pub fn theme(&self) -> ThemeId {
        self.theme_store.theme()
    }

    /// Style bundle of the active theme
    pub fn styles(&self) -> &'static StyleBundle {
        self.theme().styles()
    }

    /// Cards per row in the product grid
    pub fn columns(&self) -> usize {
        self.styles().layout.columns()
    }

    /// Open theme picker
    pub fn open_theme_picker(&mut self) {
        // Set index to current theme
        let current = self.theme();
        self.theme_picker_index = ThemeId::all()
            .iter()
            .position(|id| *id == current)
            .unwrap_or(0);
        self.mode = AppMode::ThemePicker;
    }

    /// Switch to `id`; the store persists it
    pub fn apply_theme(&mut self, id: ThemeId) {
        if self.theme_store.set_theme(id) {
            self.add_notification(format!("Theme changed to {}", id.name()), NotifyLevel::Success);
        }
    }

    /// Close any popup and return to the page
    pub fn close_popup(&mut self) {
        self.mode = AppMode::Normal;
    }

    pub fn go_to(&mut self, page: Page) {
        if self.page != page {
            debug!("Navigating to {}", page.label());
            self.page = page;
        }
        self.mode = AppMode::Normal;
    }

    pub fn next_page(&mut self) {
        self.go_to(self.page.next());
    }

    pub fn prev_page(&mut self) {
        self.go_to(self.page.prev());
    }

    /// Fetch the featured products again
    pub fn refetch(&mut self) {
        self.feed.refetch();
        self.grid.reset();
    }

    /// Show details for the product at `index`
    pub fn open_detail(&mut self, index: usize) {
        if index < self.feed.products().len() {
            self.mode = AppMode::ProductDetail(index);
        }
    }

    /// Product shown in the detail popup
    pub fn detail_product(&self) -> Option<&Product> {
        match self.mode {
            AppMode::ProductDetail(index) => self.feed.products().get(index),
            _ => None,
        }
    }

    /// Submit the contact form, reporting which fields are missing
    ///
    /// Focus jumps to the first empty field.
    pub fn submit_contact(&mut self) {
        if self.contact.status() != SubmitStatus::Idle {
            return;
        }

        let missing = self.contact.missing_fields();
        if let Some(first) = missing.first() {
            self.contact.set_focus(*first);
            let names: Vec<&str> = missing.iter().map(ContactField::label).collect();
            self.add_notification(
                format!("Please fill in: {}", names.join(", ")),
                NotifyLevel::Warning,
            );
            return;
        }

        if self.contact.submit() {
            info!("Contact message submitted");
        }
    }

    /// Advance timers and drain finished fetches
    pub fn tick(&mut self, now: Instant) {
        self.theme_store.tick(now);

        let before = self.contact.status();
        if self.contact.tick(now) {
            match (before, self.contact.status()) {
                (SubmitStatus::Submitting, SubmitStatus::Success) => {
                    self.add_notification("Message sent".to_string(), NotifyLevel::Success);
                }
                (SubmitStatus::Submitting, SubmitStatus::Error) => {
                    self.add_notification("Message could not be sent".to_string(), NotifyLevel::Error);
                }
                _ => {}
            }
        }

        if self.feed.poll() {
            self.grid.reset();
            // The index may no longer point at the same product
            if matches!(self.mode, AppMode::ProductDetail(_)) {
                self.mode = AppMode::Normal;
            }
        }

        self.cleanup_notifications(now);
    }

    pub fn add_notification(&mut self, message: String, level: NotifyLevel) {
        self.notifications.push(Notification {
            message,
            level,
            created_at: Instant::now(),
        });
    }

    /// Remove notifications older than five seconds
    pub fn cleanup_notifications(&mut self, now: Instant) {
        self.notifications
            .retain(|n| now.saturating_duration_since(n.created_at) < NOTIFICATION_TTL);
    }

    /// Cancel every scheduled transition before exit
    pub fn shutdown(&mut self) {
        self.theme_store.cancel_pending();
        self.contact.cancel_pending();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyCode;
    use std::thread;
    use tempfile::TempDir;
    use themeswitch::catalog::Rating;
    use themeswitch::error::CatalogResource;
    use themeswitch::{FetchError, NoPresentation};

    /// Answers every fetch with the same result
    struct FixedSource {
        count: u64,
        fail: bool,
    }

    impl ProductSource for FixedSource {
        fn fetch_products(&self, _limit: Option<u32>) -> Result<Vec<Product>, FetchError> {
            if self.fail {
                return Err(FetchError::Http {
                    resource: CatalogResource::Products,
                    status: 503,
                });
            }
            Ok((1..=self.count)
                .map(|id| Product {
                    id,
                    title: format!("Product {id}"),
                    price: 19.99,
                    description: "Something useful".to_string(),
                    category: "electronics".to_string(),
                    image: String::new(),
                    rating: Rating { rate: 3.5, count: 10 },
                })
                .collect())
        }
    }

    fn test_app(dir: &TempDir, source: FixedSource) -> App {
        let mut config = Config::default();
        config.preferences_file = dir.path().join("prefs.toml");
        config.contact.submit_delay_ms = 0;
        App::with_parts(config, Box::new(source), Box::new(NoPresentation))
    }

    fn wait_for_feed(app: &mut App) {
        for _ in 0..500 {
            app.tick(Instant::now());
            if !app.feed.is_loading() {
                return;
            }
            thread::sleep(Duration::from_millis(2));
        }
        panic!("product feed did not finish");
    }

    #[test]
    fn test_initial_state() {
        let dir = TempDir::new().unwrap();
        let app = test_app(&dir, FixedSource { count: 6, fail: false });

        assert_eq!(app.page, Page::Home);
        assert_eq!(app.mode, AppMode::Normal);
        assert_eq!(app.theme(), ThemeId::Minimalist);
        assert_eq!(app.columns(), 2);
        assert!(app.feed.is_loading());
    }

    #[test]
    fn test_apply_theme_persists_and_notifies() {
        let dir = TempDir::new().unwrap();
        {
            let mut app = test_app(&dir, FixedSource { count: 6, fail: false });
            app.open_theme_picker();
            assert_eq!(app.theme_picker_index, 0);
            assert_eq!(app.mode, AppMode::ThemePicker);

            app.apply_theme(ThemeId::ColorfulFun);
            assert_eq!(app.theme(), ThemeId::ColorfulFun);
            assert_eq!(app.columns(), 3);
            assert!(app.theme_store.is_transitioning());
            assert_eq!(app.notifications.len(), 1);
            assert_eq!(app.notifications[0].level, NotifyLevel::Success);

            // Same theme again is silent
            app.apply_theme(ThemeId::ColorfulFun);
            assert_eq!(app.notifications.len(), 1);
        }

        let app = test_app(&dir, FixedSource { count: 6, fail: false });
        assert_eq!(app.theme(), ThemeId::ColorfulFun);
    }

    #[test]
    fn test_page_navigation_closes_popup() {
        let dir = TempDir::new().unwrap();
        let mut app = test_app(&dir, FixedSource { count: 6, fail: false });

        app.open_theme_picker();
        app.next_page();
        assert_eq!(app.page, Page::About);
        assert_eq!(app.mode, AppMode::Normal);

        app.prev_page();
        app.prev_page();
        assert_eq!(app.page, Page::Contact);
    }

    #[test]
    fn test_open_detail_after_load() {
        let dir = TempDir::new().unwrap();
        let mut app = test_app(&dir, FixedSource { count: 6, fail: false });

        app.open_detail(0);
        assert_eq!(app.mode, AppMode::Normal);

        wait_for_feed(&mut app);
        app.open_detail(5);
        assert_eq!(app.detail_product().map(|p| p.id), Some(6));

        app.open_detail(6);
        assert_eq!(app.mode, AppMode::ProductDetail(5));
    }

    #[test]
    fn test_fetch_error_and_refetch() {
        let dir = TempDir::new().unwrap();
        let mut app = test_app(&dir, FixedSource { count: 0, fail: true });
        wait_for_feed(&mut app);

        assert!(app.feed.error().unwrap().contains("503"));
        app.refetch();
        assert!(app.feed.is_loading());
        assert!(app.feed.error().is_none());
    }

    #[test]
    fn test_submit_contact_missing_fields() {
        let dir = TempDir::new().unwrap();
        let mut app = test_app(&dir, FixedSource { count: 6, fail: false });

        app.submit_contact();
        assert_eq!(app.contact.status(), SubmitStatus::Idle);
        assert_eq!(app.notifications.len(), 1);
        assert_eq!(app.notifications[0].level, NotifyLevel::Warning);
        assert!(app.notifications[0].message.contains("Name"));
    }

    #[test]
    fn test_submit_contact_focuses_first_missing_field() {
        let dir = TempDir::new().unwrap();
        let mut app = test_app(&dir, FixedSource { count: 6, fail: false });

        for c in "Ada".chars() {
            app.contact.handle_key(KeyCode::Char(c));
        }
        app.contact.handle_key(KeyCode::Tab);
        app.contact.handle_key(KeyCode::Tab);
        assert_eq!(app.contact.focus(), ContactField::Message);

        app.submit_contact();
        assert_eq!(app.contact.focus(), ContactField::Email);
        assert!(app.notifications[0].message.contains("Email"));
        assert!(!app.notifications[0].message.contains("Name"));
    }

    #[test]
    fn test_notifications_expire() {
        let dir = TempDir::new().unwrap();
        let mut app = test_app(&dir, FixedSource { count: 6, fail: false });

        app.add_notification("hello".to_string(), NotifyLevel::Info);
        let created = app.notifications[0].created_at;

        app.cleanup_notifications(created + Duration::from_secs(4));
        assert_eq!(app.notifications.len(), 1);
        app.cleanup_notifications(created + Duration::from_secs(5));
        assert!(app.notifications.is_empty());
    }

    #[test]
    fn test_shutdown_clears_transition() {
        let dir = TempDir::new().unwrap();
        let mut app = test_app(&dir, FixedSource { count: 6, fail: false });

        app.apply_theme(ThemeId::DarkProfessional);
        app.shutdown();
        assert!(!app.theme_store.is_transitioning());
    }
}
