use chrono::Utc;

use newscoop_core::{AppError, AppResult};
use newscoop_domain::{
    AclPermission, AclRule, LegacyPrincipal, LegacyRightName, PrincipalKind, RoleAssignment,
    RoleId, RoleIdSequence,
};

use super::{AclMigrationReport, AclMigrationService, SkippedRight, UnknownRightPolicy};
use crate::LegacyAclTransaction;

/// Rows accumulated across the group and user phases.
#[derive(Debug, Default)]
struct MigrationBatch {
    assignments: Vec<RoleAssignment>,
    rules: Vec<AclRule>,
    skipped_rights: Vec<SkippedRight>,
}

impl MigrationBatch {
    fn migrated(&self, kind: PrincipalKind) -> usize {
        self.assignments
            .iter()
            .filter(|assignment| assignment.principal.kind() == kind)
            .count()
    }
}

impl AclMigrationService {
    /// Runs the migration inside the caller's transaction.
    ///
    /// Stamps every group, then every user, with a fresh role id and
    /// collects one allow-rule per held right. When at least one rule was
    /// produced, rules are inserted in bulk followed by one role row per
    /// minted id. When no rule was produced, no ACL rows are written.
    ///
    /// Any failure is returned unchanged; the caller decides whether to roll
    /// back the transaction.
    pub async fn run(
        &self,
        transaction: &mut dyn LegacyAclTransaction,
    ) -> AppResult<AclMigrationReport> {
        let started_at = Utc::now();

        let mut sequence = RoleIdSequence::new();
        let mut batch = MigrationBatch::default();
        for kind in PrincipalKind::migration_order() {
            (sequence, batch) = self
                .migrate_principals(transaction, *kind, sequence, batch)
                .await?;
        }

        let groups_migrated = batch.migrated(PrincipalKind::Group);
        let users_migrated = batch.migrated(PrincipalKind::User);
        let MigrationBatch {
            assignments,
            rules,
            skipped_rights,
        } = batch;

        let (rules_inserted, roles_inserted) = if rules.is_empty() {
            (0, 0)
        } else {
            let role_ids: Vec<RoleId> = sequence.issued().collect();
            transaction.insert_rules(&rules).await?;
            transaction.insert_roles(&role_ids).await?;
            (rules.len(), role_ids.len())
        };

        Ok(AclMigrationReport {
            assignments,
            groups_migrated,
            users_migrated,
            rules_inserted,
            roles_inserted,
            skipped_rights,
            started_at,
            finished_at: Utc::now(),
        })
    }

    async fn migrate_principals(
        &self,
        transaction: &mut dyn LegacyAclTransaction,
        kind: PrincipalKind,
        mut sequence: RoleIdSequence,
        mut batch: MigrationBatch,
    ) -> AppResult<(RoleIdSequence, MigrationBatch)> {
        let principals = transaction.list_principals(kind).await?;

        for principal in principals {
            let role_id = sequence.next_role_id()?;
            transaction.assign_role(principal, role_id).await?;
            batch.assignments.push(RoleAssignment { principal, role_id });

            for right_name in transaction.list_rights(principal).await? {
                let translated = if right_name.is_blank() {
                    None
                } else {
                    self.decoder.translate(&right_name)
                };

                match translated {
                    Some((resource, action)) => {
                        let permission = AclPermission::new(resource, action)?;
                        batch.rules.push(AclRule::allow(role_id, permission));
                    }
                    None => {
                        self.handle_unknown_right(principal, right_name, &mut batch)?;
                    }
                }
            }
        }

        Ok((sequence, batch))
    }

    fn handle_unknown_right(
        &self,
        principal: LegacyPrincipal,
        right_name: LegacyRightName,
        batch: &mut MigrationBatch,
    ) -> AppResult<()> {
        match self.unknown_right_policy {
            UnknownRightPolicy::Strict => Err(AppError::UnknownRightName {
                principal: principal.to_string(),
                right_name: right_name.as_str().to_owned(),
            }),
            UnknownRightPolicy::Lenient => {
                batch.skipped_rights.push(SkippedRight {
                    principal,
                    right_name,
                });
                Ok(())
            }
        }
    }
}
