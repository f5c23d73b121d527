use sqlx::QueryBuilder;

use super::*;

impl MySqlLegacyAclTransaction {
    pub(super) async fn assign_role_impl(
        &mut self,
        principal: LegacyPrincipal,
        role_id: RoleId,
    ) -> AppResult<()> {
        let (table, statement) = match principal.kind() {
            PrincipalKind::Group => (
                "liveuser_groups",
                "UPDATE liveuser_groups SET role_id = ? WHERE group_id = ?",
            ),
            PrincipalKind::User => (
                "liveuser_users",
                "UPDATE liveuser_users SET role_id = ? WHERE Id = ?",
            ),
        };

        sqlx::query(statement)
            .bind(role_id.as_u32())
            .bind(principal.id())
            .execute(&mut *self.transaction)
            .await
            .map_err(|error| {
                AppError::StoreWrite(format!(
                    "failed to stamp role {role_id} on {principal} in {table}: {error}"
                ))
            })?;

        Ok(())
    }

    pub(super) async fn insert_rules_impl(&mut self, rules: &[AclRule]) -> AppResult<()> {
        for chunk in rules.chunks(RULE_INSERT_CHUNK_SIZE) {
            let mut builder: QueryBuilder<'_, MySql> =
                QueryBuilder::new("INSERT INTO acl_rule (`type`, role_id, resource, action) ");
            builder.push_values(chunk, |mut row, rule| {
                row.push_bind(rule.rule_type().as_str())
                    .push_bind(rule.role_id().as_u32())
                    .push_bind(rule.resource())
                    .push_bind(rule.action());
            });

            builder
                .build()
                .execute(&mut *self.transaction)
                .await
                .map_err(|error| {
                    AppError::StoreWrite(format!("failed to insert rows into acl_rule: {error}"))
                })?;
        }

        debug!(count = rules.len(), "inserted acl rules");

        Ok(())
    }

    pub(super) async fn insert_roles_impl(&mut self, role_ids: &[RoleId]) -> AppResult<()> {
        for chunk in role_ids.chunks(ROLE_INSERT_CHUNK_SIZE) {
            let mut builder: QueryBuilder<'_, MySql> =
                QueryBuilder::new("INSERT INTO acl_role (id) ");
            builder.push_values(chunk, |mut row, role_id| {
                row.push_bind(role_id.as_u32());
            });

            builder
                .build()
                .execute(&mut *self.transaction)
                .await
                .map_err(|error| {
                    AppError::StoreWrite(format!("failed to insert rows into acl_role: {error}"))
                })?;
        }

        debug!(count = role_ids.len(), "inserted acl roles");

        Ok(())
    }
}
