//! Application services and ports.

#![forbid(unsafe_code)]

mod acl_migration_ports;
mod acl_migration_service;
mod right_name_mapping;

pub use acl_migration_ports::{LegacyAclStore, LegacyAclTransaction, RightNameDecoder};
pub use acl_migration_service::{
    AclMigrationReport, AclMigrationService, MigrationMode, SkippedRight, UnknownRightPolicy,
};
pub use right_name_mapping::RightNameMapping;
