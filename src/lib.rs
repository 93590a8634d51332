pub mod api;
pub mod cli;
pub mod config;
pub mod database;
pub mod errors;
pub mod scoring;
pub mod services;

use anyhow::Result;
use clap::Parser;
use cli::Cli;

use crate::cli::Command;
use crate::config::settings::AppConfig;
use crate::services::server::ServerService;

pub fn interpret() -> Command {
    let cli = Cli::parse();
    cli.command
}

pub fn handle_serve(port: u16) -> Result<()> {
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async {
        let config = AppConfig::new();
        let service = ServerService::new(port, config);
        service.run().await
    })
}

pub fn handle_init_db() -> Result<()> {
    let config = AppConfig::new();
    let pool = database::create_pool(&config.database.path)?;
    let mut conn = database::get_connection(&pool)?;

    database::setup::reset_database(&mut conn)?;
    database::setup::seed_initial_season(&mut conn, &config.scoring)?;

    log::info!("Database initialized at {}", config.database.path);
    Ok(())
}
