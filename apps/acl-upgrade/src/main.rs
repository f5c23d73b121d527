//! Newscoop 3.5 upgrade step: LiveUser permissions to ACL rules.

#![forbid(unsafe_code)]

mod upgrade_config;

use std::sync::Arc;

use newscoop_application::{
    AclMigrationReport, AclMigrationService, MigrationMode, RightNameMapping,
};
use newscoop_core::{AppError, AppResult};
use newscoop_infrastructure::{MySqlLegacyAclStore, load_right_name_mapping};
use sqlx::MySqlPool;
use sqlx::mysql::MySqlPoolOptions;
use tracing::{info, warn};

use crate::upgrade_config::{UpgradeConfig, init_tracing};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = UpgradeConfig::load()?;
    let mapping = match &config.right_name_mapping_path {
        Some(path) => load_right_name_mapping(path).await?,
        None => RightNameMapping::bundled()?,
    };

    let pool = connect_pool(&config).await?;
    let store = MySqlLegacyAclStore::new(pool);
    ensure_acl_tables_are_empty(store.existing_role_count().await?)?;

    let mapping_entries = mapping.len();
    let service = AclMigrationService::new(Arc::new(mapping), config.unknown_right_policy);
    info!(
        mapping_entries,
        unknown_right_policy = service.unknown_right_policy().as_str(),
        dry_run = config.mode == MigrationMode::DryRun,
        "starting acl migration"
    );

    let report = service.run_atomic(&store, config.mode).await?;
    log_report(&report, config.mode);

    Ok(())
}

async fn connect_pool(config: &UpgradeConfig) -> AppResult<MySqlPool> {
    MySqlPoolOptions::new()
        .max_connections(config.database_max_connections)
        .connect(config.database_url.as_str())
        .await
        .map_err(|error| AppError::Internal(format!("failed to connect to database: {error}")))
}

/// Role ids restart at 1 on every run, so any existing `acl_role` row would
/// collide with the new batch on the primary key.
fn ensure_acl_tables_are_empty(existing_roles: i64) -> AppResult<()> {
    if existing_roles == 0 {
        return Ok(());
    }

    Err(AppError::Conflict(format!(
        "acl_role already contains {existing_roles} rows; the permission upgrade appears to have run already"
    )))
}

fn log_report(report: &AclMigrationReport, mode: MigrationMode) {
    for skipped in &report.skipped_rights {
        warn!(
            principal = %skipped.principal,
            right_name = %skipped.right_name,
            "skipped legacy right without acl mapping"
        );
    }

    if !report.wrote_acl_rows() {
        info!(
            groups = report.groups_migrated,
            users = report.users_migrated,
            "no legacy rights to migrate; acl tables left untouched"
        );
    }

    let elapsed_ms = (report.finished_at - report.started_at).num_milliseconds();
    let outcome = match mode {
        MigrationMode::Commit => "acl migration committed",
        MigrationMode::DryRun => "acl migration dry run rolled back",
    };

    info!(
        groups = report.groups_migrated,
        users = report.users_migrated,
        rules = report.rules_inserted,
        roles = report.roles_inserted,
        skipped_rights = report.skipped_rights.len(),
        elapsed_ms,
        "{outcome}"
    );
}

#[cfg(test)]
mod tests {
    use newscoop_core::AppError;

    use super::ensure_acl_tables_are_empty;

    #[test]
    fn empty_acl_role_table_lets_the_upgrade_run() {
        assert!(ensure_acl_tables_are_empty(0).is_ok());
    }

    #[test]
    fn existing_acl_roles_always_block_the_upgrade() {
        assert!(matches!(
            ensure_acl_tables_are_empty(3),
            Err(AppError::Conflict(message)) if message.contains("3 rows")
        ));
    }
}
