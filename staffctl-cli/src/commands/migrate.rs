//! Schema bootstrap command

use anyhow::{Context, Result};
use clap::Parser;

use staffctl_server::db::migrations;

use super::DatabaseArgs;

/// Arguments for the migrate command
#[derive(Parser, Debug)]
pub struct MigrateArgs {
    #[command(flatten)]
    pub db: DatabaseArgs,
}

/// Create the employee table and indexes if missing
pub async fn run_migrate(args: MigrateArgs) -> Result<()> {
    let pool = args.db.connect().await?;

    migrations::run(&pool)
        .await
        .context("Failed to bootstrap schema")?;

    pool.close().await;
    println!("Schema is up to date");
    Ok(())
}
