//! Infrastructure adapters for application ports.

#![forbid(unsafe_code)]

mod mysql_legacy_acl_store;
mod right_name_mapping_file;

pub use mysql_legacy_acl_store::{MySqlLegacyAclStore, MySqlLegacyAclTransaction};
pub use right_name_mapping_file::load_right_name_mapping;
