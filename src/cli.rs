//! CLI argument parsing

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "themeswitch")]
#[command(author, version, about = "ThemeSwitch - themed product showcase with a persistent theme switcher")]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write a default .themeswitch.toml in the current directory
    Init {
        /// Force overwrite existing files
        #[arg(short, long)]
        force: bool,
    },
    /// List catalog products
    Products {
        /// Maximum number of products (0 for all)
        #[arg(short, long)]
        limit: Option<u32>,
    },
    /// Show a single product
    Product {
        /// Product id
        id: u64,
    },
    /// List product categories
    Categories,
    /// Show the stored theme, or switch to another one
    Theme {
        /// Theme to switch to (theme1, theme2, theme3 or a theme name)
        theme: Option<String>,
    },
}
