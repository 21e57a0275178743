//! ThemeSwitch - themed product showcase for the terminal
//!
//! This crate provides the stores, clients and widgets behind the
//! `themeswitch` binary.
//!
//! # Modules
//!
//! - [`theme`] - Theme identifiers and style bundles
//! - [`theme_store`] - Active theme with persistence and transition flag
//! - [`storage`] - Key-value preference storage
//! - [`catalog`] - Product catalog HTTP client
//! - [`product_feed`] - Loading/error/data state around product fetches
//! - [`product_grid`] - Product card grid widget
//! - [`contact`] - Contact form state machine and widget
//! - [`config`] - `.themeswitch.toml` configuration
//! - [`error`] - Fetch and persistence errors
//! - [`logging`] - Tracing subscriber setup

pub mod catalog;
pub mod config;
pub mod contact;
pub mod error;
pub mod logging;
pub mod product_feed;
pub mod product_grid;
pub mod storage;
pub mod theme;
pub mod theme_store;

// Re-export commonly used types
pub use catalog::{CatalogClient, HttpClient, Product, Rating, UreqHttpClient};
pub use config::Config;
pub use contact::{ContactField, ContactForm, FormAction, SubmitStatus};
pub use error::{CatalogResource, FetchError, PersistenceError};
pub use product_feed::{FeedView, ProductFeed, ProductSource};
pub use product_grid::{centered_rect, GridAction, ProductGrid};
pub use storage::{FilePreferences, PreferenceStorage};
pub use theme::{PageLayout, StyleBundle, ThemeId};
pub use theme_store::{NoPresentation, PresentationHook, TerminalTitle, ThemeStore};
