//! Domain entities and invariants for the LiveUser to ACL upgrade.

#![forbid(unsafe_code)]

mod acl;
mod legacy_right;
mod principal;

pub use acl::{AclPermission, AclRule, AclRuleType};
pub use legacy_right::LegacyRightName;
pub use principal::{LegacyPrincipal, PrincipalKind, RoleAssignment, RoleId, RoleIdSequence};
