//! Command implementations

pub mod init;
pub mod products;
pub mod theme;
pub mod tui;

pub use init::run_init;
pub use products::{run_categories, run_product, run_products};
pub use theme::run_theme;
pub use tui::run_tui;
