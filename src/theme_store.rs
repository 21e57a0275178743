//! Active theme state with persistence and a timed transition flag
//!
//! The store is owned by the application and handed by reference to every
//! render function. Changing the theme persists it, signals the presentation
//! hook and raises a `transitioning` flag that clears after a short window.

use crate::storage::{FilePreferences, PreferenceStorage};
use crate::theme::ThemeId;
use std::io;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Storage key of the active theme
pub const THEME_KEY: &str = "app-theme";

/// How long the transitioning flag stays raised after a change
pub const DEFAULT_TRANSITION: Duration = Duration::from_millis(500);

/// Receives the active theme whenever it is loaded or changed
pub trait PresentationHook {
    fn apply(&mut self, theme: ThemeId);
}

impl<P: PresentationHook + ?Sized> PresentationHook for Box<P> {
    fn apply(&mut self, theme: ThemeId) {
        (**self).apply(theme);
    }
}

/// Marks the terminal window title with the active theme
#[derive(Debug, Default)]
pub struct TerminalTitle;

impl TerminalTitle {
    pub fn title_for(theme: ThemeId) -> String {
        format!("ThemeSwitch · theme-{}", theme.id())
    }
}

impl PresentationHook for TerminalTitle {
    fn apply(&mut self, theme: ThemeId) {
        let title = Self::title_for(theme);
        if let Err(e) = crossterm::execute!(io::stdout(), crossterm::terminal::SetTitle(&title)) {
            warn!("Failed to set terminal title: {e}");
        }
    }
}

/// Presentation hook for non-interactive use
#[derive(Debug, Default)]
pub struct NoPresentation;

impl PresentationHook for NoPresentation {
    fn apply(&mut self, _theme: ThemeId) {}
}

/// Owner of the active theme
pub struct ThemeStore<S: PreferenceStorage = FilePreferences, P: PresentationHook = TerminalTitle> {
    storage: S,
    presentation: P,
    current: ThemeId,
    transition: Duration,
    /// Pending reset of the transitioning flag
    transition_deadline: Option<Instant>,
}

impl<S: PreferenceStorage, P: PresentationHook> ThemeStore<S, P> {
    /// Restore the persisted theme, falling back to the default
    ///
    /// Missing, unreadable or unknown values are not errors. The presentation
    /// hook receives the restored theme; nothing is written back.
    pub fn load(storage: S, mut presentation: P, transition: Duration) -> Self {
        let current = match storage.read(THEME_KEY) {
            Ok(Some(value)) => match ThemeId::from_id(value.trim()) {
                Some(id) => id,
                None => {
                    warn!("Unknown stored theme '{value}', using default");
                    ThemeId::default()
                }
            },
            Ok(None) => ThemeId::default(),
            Err(e) => {
                warn!("Failed to read theme preference: {e}");
                ThemeId::default()
            }
        };

        debug!("Loaded theme {current}");
        presentation.apply(current);

        Self {
            storage,
            presentation,
            current,
            transition,
            transition_deadline: None,
        }
    }

    /// Currently active theme
    pub fn theme(&self) -> ThemeId {
        self.current
    }

    /// Whether a theme change happened within the transition window
    pub fn is_transitioning(&self) -> bool {
        self.transition_deadline.is_some()
    }

    /// Switch to `id`, see [`ThemeStore::set_theme_at`]
    pub fn set_theme(&mut self, id: ThemeId) -> bool {
        self.set_theme_at(id, Instant::now())
    }

    /// Switch to `id` as of `now`
    ///
    /// Returns `false` without any side effect when `id` is already active.
    /// Otherwise raises the transitioning flag, persists the id and signals
    /// the presentation hook. A reset that is already pending keeps its
    /// deadline, so the flag clears one window after the first change of a
    /// burst. Persistence failures are logged and swallowed.
    pub fn set_theme_at(&mut self, id: ThemeId, now: Instant) -> bool {
        if id == self.current {
            return false;
        }

        info!("Theme changed: {} -> {}", self.current, id);
        self.current = id;
        if self.transition_deadline.is_none() {
            self.transition_deadline = Some(now + self.transition);
        }

        if let Err(e) = self.storage.write(THEME_KEY, id.id()) {
            warn!("Failed to persist theme preference: {e}");
        }

        self.presentation.apply(id);
        true
    }

    /// Fire the pending transition reset if its deadline has passed
    ///
    /// Returns `true` when the flag was cleared by this call.
    pub fn tick(&mut self, now: Instant) -> bool {
        match self.transition_deadline {
            Some(deadline) if now >= deadline => {
                self.transition_deadline = None;
                true
            }
            _ => false,
        }
    }

    /// Discard any scheduled reset
    pub fn cancel_pending(&mut self) {
        if self.transition_deadline.take().is_some() {
            debug!("Discarded pending theme transition");
        }
    }

    pub fn transition(&self) -> Duration {
        self.transition
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn presentation(&self) -> &P {
        &self.presentation
    }
}

impl<S: PreferenceStorage, P: PresentationHook> Drop for ThemeStore<S, P> {
    fn drop(&mut self) {
        self.cancel_pending();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PersistenceError;
    use crate::storage::MockPreferenceStorage;
    use std::fs;
    use tempfile::TempDir;

    /// Records every theme the hook receives
    #[derive(Default)]
    struct RecordingHook {
        applied: Vec<ThemeId>,
    }

    impl PresentationHook for RecordingHook {
        fn apply(&mut self, theme: ThemeId) {
            self.applied.push(theme);
        }
    }

    fn file_store(dir: &TempDir) -> ThemeStore<FilePreferences, RecordingHook> {
        let prefs = FilePreferences::new(dir.path().join("prefs.toml"));
        ThemeStore::load(prefs, RecordingHook::default(), DEFAULT_TRANSITION)
    }

    #[test]
    fn test_default_when_missing() {
        let dir = TempDir::new().unwrap();
        let store = file_store(&dir);
        assert_eq!(store.theme(), ThemeId::Minimalist);
        assert!(!store.is_transitioning());
        assert_eq!(store.presentation().applied, vec![ThemeId::Minimalist]);
    }

    #[test]
    fn test_persists_across_restart() {
        for id in ThemeId::all() {
            let dir = TempDir::new().unwrap();
            {
                let mut store = file_store(&dir);
                store.set_theme(ThemeId::DarkProfessional);
                store.set_theme(*id);
            }
            let store = file_store(&dir);
            assert_eq!(store.theme(), *id);
        }
    }

    #[test]
    fn test_unknown_value_falls_back() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("prefs.toml"), "app-theme = \"theme9\"\n").unwrap();
        let store = file_store(&dir);
        assert_eq!(store.theme(), ThemeId::Minimalist);
    }

    #[test]
    fn test_corrupt_file_falls_back() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("prefs.toml"), "app-theme = ").unwrap();
        let store = file_store(&dir);
        assert_eq!(store.theme(), ThemeId::Minimalist);
    }

    #[test]
    fn test_load_does_not_write() {
        let mut storage = MockPreferenceStorage::new();
        storage
            .expect_read()
            .returning(|_| Ok(Some("theme3".to_string())));
        storage.expect_write().times(0);

        let store = ThemeStore::load(storage, NoPresentation, DEFAULT_TRANSITION);
        assert_eq!(store.theme(), ThemeId::ColorfulFun);
    }

    #[test]
    fn test_same_theme_is_noop() {
        let mut storage = MockPreferenceStorage::new();
        storage
            .expect_read()
            .returning(|_| Ok(Some("theme2".to_string())));
        storage.expect_write().times(0);

        let mut store = ThemeStore::load(storage, RecordingHook::default(), DEFAULT_TRANSITION);
        assert!(!store.set_theme(ThemeId::DarkProfessional));
        assert!(!store.is_transitioning());
        assert_eq!(store.presentation().applied.len(), 1);
    }

    #[test]
    fn test_change_writes_exact_id() {
        let mut storage = MockPreferenceStorage::new();
        storage.expect_read().returning(|_| Ok(None));
        storage
            .expect_write()
            .withf(|key: &str, value: &str| key == "app-theme" && value == "theme3")
            .times(1)
            .returning(|_, _| Ok(()));

        let mut store = ThemeStore::load(storage, RecordingHook::default(), DEFAULT_TRANSITION);
        assert!(store.set_theme(ThemeId::ColorfulFun));
        assert_eq!(store.theme(), ThemeId::ColorfulFun);
        assert_eq!(
            store.presentation().applied,
            vec![ThemeId::Minimalist, ThemeId::ColorfulFun]
        );
    }

    #[test]
    fn test_write_failure_is_swallowed() {
        let mut storage = MockPreferenceStorage::new();
        storage.expect_read().returning(|_| {
            Err(PersistenceError::Read {
                path: "prefs.toml".into(),
                source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
            })
        });
        storage.expect_write().returning(|_, _| {
            Err(PersistenceError::Write {
                path: "prefs.toml".into(),
                source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
            })
        });

        let mut store = ThemeStore::load(storage, NoPresentation, DEFAULT_TRANSITION);
        assert_eq!(store.theme(), ThemeId::Minimalist);
        assert!(store.set_theme(ThemeId::DarkProfessional));
        assert_eq!(store.theme(), ThemeId::DarkProfessional);
    }

    #[test]
    fn test_transition_clears_after_window() {
        let dir = TempDir::new().unwrap();
        let mut store = file_store(&dir);
        let start = Instant::now();

        store.set_theme_at(ThemeId::ColorfulFun, start);
        assert!(store.is_transitioning());

        assert!(!store.tick(start + Duration::from_millis(499)));
        assert!(store.is_transitioning());

        assert!(store.tick(start + Duration::from_millis(500)));
        assert!(!store.is_transitioning());
    }

    #[test]
    fn test_later_change_keeps_first_deadline() {
        let dir = TempDir::new().unwrap();
        let mut store = file_store(&dir);
        let start = Instant::now();

        store.set_theme_at(ThemeId::ColorfulFun, start);
        store.set_theme_at(ThemeId::DarkProfessional, start + Duration::from_millis(400));
        assert!(store.is_transitioning());

        assert!(store.tick(start + Duration::from_millis(500)));
        assert!(!store.is_transitioning());
        assert_eq!(store.theme(), ThemeId::DarkProfessional);

        // A change after the reset opens a fresh window
        store.set_theme_at(ThemeId::Minimalist, start + Duration::from_millis(600));
        assert!(!store.tick(start + Duration::from_millis(1000)));
        assert!(store.tick(start + Duration::from_millis(1100)));
    }

    #[test]
    fn test_cancel_pending() {
        let dir = TempDir::new().unwrap();
        let mut store = file_store(&dir);
        let start = Instant::now();

        store.set_theme_at(ThemeId::ColorfulFun, start);
        store.cancel_pending();
        assert!(!store.is_transitioning());
        assert!(!store.tick(start + Duration::from_secs(1)));
        assert_eq!(store.theme(), ThemeId::ColorfulFun);
    }

    #[test]
    fn test_terminal_title() {
        assert_eq!(
            TerminalTitle::title_for(ThemeId::DarkProfessional),
            "ThemeSwitch · theme-theme2"
        );
    }
}
