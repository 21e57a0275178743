//! Init command implementation

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use themeswitch::config::CONFIG_FILE_NAME;
use themeswitch::Config;

/// Run the init command
pub fn run_init(force: bool) -> Result<()> {
    println!("🚀 Initializing ThemeSwitch...\n");
    init_in(Path::new("."), force)?;
    println!("\n✨ Done. Run `themeswitch` to start the showcase.");
    Ok(())
}

/// Write the default configuration and state directory under `root`
fn init_in(root: &Path, force: bool) -> Result<()> {
    let state_dir = root.join(".themeswitch");
    if !state_dir.exists() {
        fs::create_dir_all(&state_dir)
            .with_context(|| format!("Failed to create {}", state_dir.display()))?;
        println!("✅ Created .themeswitch/ directory");
    } else {
        println!("📁 .themeswitch/ directory already exists");
    }

    let config_path = root.join(CONFIG_FILE_NAME);
    if !config_path.exists() || force {
        Config::generate_default(&config_path)?;
        println!("✅ Created configuration: {CONFIG_FILE_NAME}");
    } else {
        println!("📄 Configuration file already exists (use --force to overwrite)");
    }

    Ok(())
}
