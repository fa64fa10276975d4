//! Migrate command - manages the PostgreSQL schema

use anyhow::bail;
use clap::Args;
use tracing::info;

use crate::config::{AppConfig, StorageBackend};
use crate::infrastructure::storage::migrations::{user_migrations, PostgresMigrator};
use crate::infrastructure::storage::{connect, run_user_migrations};

#[derive(Debug, Args)]
pub struct MigrateArgs {
    /// Revert the latest applied migration instead of applying pending ones
    #[arg(long)]
    pub revert: bool,
}

pub async fn run(config: &AppConfig, args: MigrateArgs) -> anyhow::Result<()> {
    if config.storage.backend != StorageBackend::Postgres {
        bail!("Migrations require the postgres storage backend");
    }

    let pool = connect(&config.storage).await?;

    if !args.revert {
        let applied = run_user_migrations(&pool).await?;
        info!(applied, "Migrations complete");
        return Ok(());
    }

    let migrator = PostgresMigrator::new(pool);
    let Some(version) = migrator.current_version().await? else {
        info!("No migration to revert");
        return Ok(());
    };

    match user_migrations().into_iter().find(|m| m.version == version) {
        Some(migration) => {
            migrator.revert_migration(&migration).await?;
            info!(version, "Migration reverted");
            Ok(())
        }
        None => bail!("Applied migration {} is unknown to this build", version),
    }
}
