use std::error::Error;

use clap::Parser;
use database::{DatabaseConnectionInfo, PgDatabase};
use spots::{
    database::{Database, SpotRepo},
    memory::InMemoryDatabase,
    region::RegionResolver,
};

mod args;
mod commands;

use args::Cli;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // a missing .env file is fine, the variables may come from the environment
    let _ = dotenvy::dotenv();
    env_logger::init();

    let cli = Cli::parse();
    let resolver = RegionResolver::new(cli.out_of_bounds.into());

    if cli.dry_run {
        log::info!("dry run, nothing is written to the database");
        let database = InMemoryDatabase::new();
        commands::run(database.clone(), resolver, &cli.command).await?;
        let spots = database.auto().spots().await?;
        println!("{}", serde_json::to_string_pretty(&spots)?);
        return Ok(());
    }

    // database
    let database_connection_info =
        DatabaseConnectionInfo::from_env().ok_or("expected database connection info in env.")?;
    let database = PgDatabase::connect(database_connection_info).await?;

    commands::run(database, resolver, &cli.command).await
}
