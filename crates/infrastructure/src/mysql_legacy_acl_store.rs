use async_trait::async_trait;
use sqlx::{MySql, MySqlPool, Transaction};
use tracing::debug;

use newscoop_application::{LegacyAclStore, LegacyAclTransaction};
use newscoop_core::{AppError, AppResult};
use newscoop_domain::{AclRule, LegacyPrincipal, LegacyRightName, PrincipalKind, RoleId};

/// Rows per `acl_rule` insert statement; four placeholders per row.
const RULE_INSERT_CHUNK_SIZE: usize = 1_000;

/// Rows per `acl_role` insert statement; one placeholder per row.
const ROLE_INSERT_CHUNK_SIZE: usize = 5_000;

/// MySQL-backed store over the LiveUser and ACL tables.
#[derive(Clone)]
pub struct MySqlLegacyAclStore {
    pool: MySqlPool,
}

impl MySqlLegacyAclStore {
    /// Creates a store with the provided connection pool.
    #[must_use]
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Counts rows already present in `acl_role`.
    pub async fn existing_role_count(&self) -> AppResult<i64> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM acl_role")
            .fetch_one(&self.pool)
            .await
            .map_err(|error| {
                AppError::StoreRead(format!("failed to count rows in acl_role: {error}"))
            })
    }
}

#[async_trait]
impl LegacyAclStore for MySqlLegacyAclStore {
    async fn begin(&self) -> AppResult<Box<dyn LegacyAclTransaction>> {
        let transaction =
            self.pool.begin().await.map_err(|error| {
                AppError::Internal(format!("failed to begin transaction: {error}"))
            })?;

        Ok(Box::new(MySqlLegacyAclTransaction { transaction }))
    }
}

/// One open transaction over the LiveUser and ACL tables.
pub struct MySqlLegacyAclTransaction {
    transaction: Transaction<'static, MySql>,
}

#[async_trait]
impl LegacyAclTransaction for MySqlLegacyAclTransaction {
    async fn list_principals(&mut self, kind: PrincipalKind) -> AppResult<Vec<LegacyPrincipal>> {
        self.list_principals_impl(kind).await
    }

    async fn assign_role(&mut self, principal: LegacyPrincipal, role_id: RoleId) -> AppResult<()> {
        self.assign_role_impl(principal, role_id).await
    }

    async fn list_rights(
        &mut self,
        principal: LegacyPrincipal,
    ) -> AppResult<Vec<LegacyRightName>> {
        self.list_rights_impl(principal).await
    }

    async fn insert_rules(&mut self, rules: &[AclRule]) -> AppResult<()> {
        self.insert_rules_impl(rules).await
    }

    async fn insert_roles(&mut self, role_ids: &[RoleId]) -> AppResult<()> {
        self.insert_roles_impl(role_ids).await
    }

    async fn commit(self: Box<Self>) -> AppResult<()> {
        self.transaction.commit().await.map_err(|error| {
            AppError::Internal(format!("failed to commit transaction: {error}"))
        })?;
        debug!("acl migration transaction committed");

        Ok(())
    }

    async fn rollback(self: Box<Self>) -> AppResult<()> {
        self.transaction.rollback().await.map_err(|error| {
            AppError::Internal(format!("failed to roll back transaction: {error}"))
        })?;
        debug!("acl migration transaction rolled back");

        Ok(())
    }
}

mod reads;
mod writes;
