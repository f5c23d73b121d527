use newscoop_core::{AppError, AppResult};
use serde::{Deserialize, Serialize};

use crate::RoleId;

/// Rule type written to `acl_rule.type`. The upgrade only grants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AclRuleType {
    /// Grants the action on the resource.
    Allow,
}

impl AclRuleType {
    /// Returns a stable storage value for this rule type.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Allow => "allow",
        }
    }
}

/// Normalized `(resource, action)` pair. Both parts are lower-cased.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AclPermission {
    resource: String,
    action: String,
}

impl AclPermission {
    /// Creates a normalized permission from decoder output.
    pub fn new(resource: &str, action: &str) -> AppResult<Self> {
        let resource = resource.trim().to_lowercase();
        let action = action.trim().to_lowercase();

        if resource.is_empty() {
            return Err(AppError::Validation(
                "acl resource must not be empty".to_owned(),
            ));
        }

        if action.is_empty() {
            return Err(AppError::Validation(
                "acl action must not be empty".to_owned(),
            ));
        }

        Ok(Self { resource, action })
    }

    /// Returns the protected resource.
    #[must_use]
    pub fn resource(&self) -> &str {
        self.resource.as_str()
    }

    /// Returns the permitted action.
    #[must_use]
    pub fn action(&self) -> &str {
        self.action.as_str()
    }
}

/// One row of the `acl_rule` table.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AclRule {
    rule_type: AclRuleType,
    role_id: RoleId,
    permission: AclPermission,
}

impl AclRule {
    /// Creates an allow-rule for a role.
    #[must_use]
    pub fn allow(role_id: RoleId, permission: AclPermission) -> Self {
        Self {
            rule_type: AclRuleType::Allow,
            role_id,
            permission,
        }
    }

    /// Returns the rule type.
    #[must_use]
    pub fn rule_type(&self) -> AclRuleType {
        self.rule_type
    }

    /// Returns the role the rule applies to.
    #[must_use]
    pub fn role_id(&self) -> RoleId {
        self.role_id
    }

    /// Returns the protected resource.
    #[must_use]
    pub fn resource(&self) -> &str {
        self.permission.resource()
    }

    /// Returns the permitted action.
    #[must_use]
    pub fn action(&self) -> &str {
        self.permission.action()
    }
}
