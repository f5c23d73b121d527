use super::*;

impl MySqlLegacyAclTransaction {
    pub(super) async fn list_principals_impl(
        &mut self,
        kind: PrincipalKind,
    ) -> AppResult<Vec<LegacyPrincipal>> {
        let (table, statement) = match kind {
            PrincipalKind::Group => (
                "liveuser_groups",
                r#"
                SELECT CAST(group_id AS SIGNED) AS principal_id
                FROM liveuser_groups
                ORDER BY group_id
                "#,
            ),
            PrincipalKind::User => (
                "liveuser_users",
                r#"
                SELECT CAST(Id AS SIGNED) AS principal_id
                FROM liveuser_users
                ORDER BY Id
                "#,
            ),
        };

        let ids = sqlx::query_scalar::<_, i64>(statement)
            .fetch_all(&mut *self.transaction)
            .await
            .map_err(|error| {
                AppError::StoreRead(format!("failed to list principals from {table}: {error}"))
            })?;

        debug!(kind = kind.as_str(), count = ids.len(), "listed legacy principals");

        Ok(ids
            .into_iter()
            .map(|id| LegacyPrincipal::new(kind, id))
            .collect())
    }

    pub(super) async fn list_rights_impl(
        &mut self,
        principal: LegacyPrincipal,
    ) -> AppResult<Vec<LegacyRightName>> {
        let (table, statement) = match principal.kind() {
            PrincipalKind::Group => (
                "liveuser_grouprights",
                r#"
                SELECT rights.right_define_name
                FROM liveuser_rights AS rights
                INNER JOIN liveuser_grouprights AS granted
                    ON granted.right_id = rights.right_id
                WHERE granted.group_id = ?
                ORDER BY rights.right_id
                "#,
            ),
            PrincipalKind::User => (
                "liveuser_userrights",
                r#"
                SELECT rights.right_define_name
                FROM liveuser_rights AS rights
                INNER JOIN liveuser_userrights AS granted
                    ON granted.right_id = rights.right_id
                WHERE granted.perm_user_id = ?
                ORDER BY rights.right_id
                "#,
            ),
        };

        let names = sqlx::query_scalar::<_, String>(statement)
            .bind(principal.id())
            .fetch_all(&mut *self.transaction)
            .await
            .map_err(|error| {
                AppError::StoreRead(format!(
                    "failed to list rights of {principal} from {table}: {error}"
                ))
            })?;

        Ok(names.into_iter().map(LegacyRightName::new).collect())
    }
}
