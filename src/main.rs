mod app;
mod cli;
mod commands;
mod tui;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};
use themeswitch::logging;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let Some(command) = cli.command else {
        return commands::run_tui(cli.verbose);
    };

    logging::init_cli_logger(cli.verbose);

    match command {
        Commands::Init { force } => commands::run_init(force),
        Commands::Products { limit } => commands::run_products(limit),
        Commands::Product { id } => commands::run_product(id),
        Commands::Categories => commands::run_categories(),
        Commands::Theme { theme } => commands::run_theme(theme),
    }
}
