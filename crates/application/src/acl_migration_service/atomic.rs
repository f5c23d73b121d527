use newscoop_core::{AppError, AppResult};

use super::{AclMigrationReport, AclMigrationService, MigrationMode};
use crate::LegacyAclStore;

impl AclMigrationService {
    /// Runs the migration in a single store transaction.
    ///
    /// A failed run is rolled back and its error returned, so no stamp or
    /// ACL row survives. When the rollback fails too, both errors are
    /// returned in [`AppError::RollbackFailed`]. A successful run is
    /// committed, or rolled back when `mode` is [`MigrationMode::DryRun`].
    pub async fn run_atomic(
        &self,
        store: &dyn LegacyAclStore,
        mode: MigrationMode,
    ) -> AppResult<AclMigrationReport> {
        let mut transaction = store.begin().await?;

        let report = match self.run(transaction.as_mut()).await {
            Ok(report) => report,
            Err(error) => {
                return Err(match transaction.rollback().await {
                    Ok(()) => error,
                    Err(rollback_error) => AppError::RollbackFailed {
                        error: Box::new(error),
                        rollback_error: Box::new(rollback_error),
                    },
                });
            }
        };

        match mode {
            MigrationMode::Commit => transaction.commit().await?,
            MigrationMode::DryRun => transaction.rollback().await?,
        }

        Ok(report)
    }
}
