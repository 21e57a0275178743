//! Theme command implementation

use anyhow::{anyhow, Result};
use themeswitch::storage::PreferenceStorage;
use themeswitch::{Config, FilePreferences, NoPresentation, ThemeId, ThemeStore};

/// Show the stored theme, or switch to `theme`
pub fn run_theme(theme: Option<String>) -> Result<()> {
    let config = Config::load()?;
    let storage = FilePreferences::new(&config.preferences_file);
    let mut store = ThemeStore::load(storage, NoPresentation, config.theme.transition());

    let Some(requested) = theme else {
        print_themes(store.theme());
        return Ok(());
    };

    let id: ThemeId = requested.parse().map_err(|_| {
        anyhow!("Unknown theme '{requested}'. Available: theme1, theme2, theme3")
    })?;

    if store.set_theme(id) {
        // Writes are best effort inside the store; confirm it landed
        match store.storage().read(themeswitch::theme_store::THEME_KEY) {
            Ok(Some(saved)) if saved == id.id() => {
                println!("✅ Theme set to {} ({})", id.name(), id.id());
            }
            _ => println!(
                "⚠️  Theme set to {} for this run, but it could not be saved to {}",
                id.name(),
                config.preferences_file.display()
            ),
        }
    } else {
        println!("Theme is already {} ({})", id.name(), id.id());
    }
    Ok(())
}

fn print_themes(current: ThemeId) {
    println!("Themes:\n");
    for id in ThemeId::all() {
        let marker = if *id == current { "✓" } else { " " };
        println!(" {marker} {}  {:<18} {}", id.id(), id.name(), id.description());
    }
}
