use async_trait::async_trait;

use newscoop_core::AppResult;
use newscoop_domain::{AclRule, LegacyPrincipal, LegacyRightName, PrincipalKind, RoleId};

/// Store port that opens the transactional scope for one migration run.
#[async_trait]
pub trait LegacyAclStore: Send + Sync {
    /// Begins a transaction over the LiveUser and ACL tables.
    async fn begin(&self) -> AppResult<Box<dyn LegacyAclTransaction>>;
}

/// Transaction-scoped access to legacy principals, rights and ACL tables.
///
/// Every operation runs inside the same transaction. Dropping the handle
/// without calling [`LegacyAclTransaction::commit`] discards all writes.
#[async_trait]
pub trait LegacyAclTransaction: Send {
    /// Lists every legacy principal of the given kind in store order.
    async fn list_principals(&mut self, kind: PrincipalKind) -> AppResult<Vec<LegacyPrincipal>>;

    /// Stamps the principal row with its role id. Idempotent.
    async fn assign_role(&mut self, principal: LegacyPrincipal, role_id: RoleId) -> AppResult<()>;

    /// Lists the legacy rights attached directly to the principal.
    async fn list_rights(
        &mut self,
        principal: LegacyPrincipal,
    ) -> AppResult<Vec<LegacyRightName>>;

    /// Inserts ACL rule rows in bulk.
    async fn insert_rules(&mut self, rules: &[AclRule]) -> AppResult<()>;

    /// Inserts ACL role rows in bulk.
    async fn insert_roles(&mut self, role_ids: &[RoleId]) -> AppResult<()>;

    /// Makes all writes of this transaction durable.
    async fn commit(self: Box<Self>) -> AppResult<()>;

    /// Discards all writes of this transaction.
    async fn rollback(self: Box<Self>) -> AppResult<()>;
}

/// Naming decoder from legacy right name to ACL `(resource, action)`.
pub trait RightNameDecoder: Send + Sync {
    /// Returns the raw `(resource, action)` pair, or `None` for unmapped names.
    fn translate(&self, right_name: &LegacyRightName) -> Option<(&str, &str)>;
}
