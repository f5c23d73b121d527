//! LiveUser permission to ACL migration.
//!
//! Converts group and user right assignments into one synthetic ACL role per
//! legacy principal plus one allow-rule per held right. Groups are numbered
//! before users and role ids start at 1.

use std::str::FromStr;
use std::sync::Arc;

use chrono::{DateTime, Utc};

use newscoop_core::AppError;
use newscoop_domain::{LegacyPrincipal, LegacyRightName, RoleAssignment};

use crate::RightNameDecoder;

/// Behaviour when a legacy right name is missing from the mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnknownRightPolicy {
    /// Abort the run with [`AppError::UnknownRightName`].
    #[default]
    Strict,
    /// Skip the right and record it in the report.
    Lenient,
}

impl UnknownRightPolicy {
    /// Returns a stable configuration value for this policy.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Strict => "strict",
            Self::Lenient => "lenient",
        }
    }
}

impl FromStr for UnknownRightPolicy {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "strict" => Ok(Self::Strict),
            "lenient" => Ok(Self::Lenient),
            other => Err(AppError::Configuration(format!(
                "unknown right policy must be either 'strict' or 'lenient', got '{other}'"
            ))),
        }
    }
}

/// Whether [`AclMigrationService::run_atomic`] keeps its writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MigrationMode {
    /// Commit the transaction after a successful run.
    Commit,
    /// Roll the transaction back after a successful run.
    DryRun,
}

/// A right dropped under [`UnknownRightPolicy::Lenient`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedRight {
    /// Principal that held the right.
    pub principal: LegacyPrincipal,
    /// Unmapped legacy right name.
    pub right_name: LegacyRightName,
}

/// Outcome of one migration run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AclMigrationReport {
    /// Role minted for every legacy principal, in assignment order.
    pub assignments: Vec<RoleAssignment>,
    /// Number of legacy groups stamped with a role.
    pub groups_migrated: usize,
    /// Number of legacy users stamped with a role.
    pub users_migrated: usize,
    /// Number of `acl_rule` rows written.
    pub rules_inserted: usize,
    /// Number of `acl_role` rows written.
    pub roles_inserted: usize,
    /// Rights skipped because they had no mapping.
    pub skipped_rights: Vec<SkippedRight>,
    /// Run start time.
    pub started_at: DateTime<Utc>,
    /// Run completion time.
    pub finished_at: DateTime<Utc>,
}

impl AclMigrationReport {
    /// Returns whether the run wrote any ACL rows.
    #[must_use]
    pub fn wrote_acl_rows(&self) -> bool {
        self.rules_inserted > 0
    }
}

/// Application service running the permission to ACL upgrade step.
#[derive(Clone)]
pub struct AclMigrationService {
    decoder: Arc<dyn RightNameDecoder>,
    unknown_right_policy: UnknownRightPolicy,
}

impl AclMigrationService {
    /// Creates a migration service from a naming decoder and policy.
    #[must_use]
    pub fn new(
        decoder: Arc<dyn RightNameDecoder>,
        unknown_right_policy: UnknownRightPolicy,
    ) -> Self {
        Self {
            decoder,
            unknown_right_policy,
        }
    }

    /// Returns the configured unknown right policy.
    #[must_use]
    pub fn unknown_right_policy(&self) -> UnknownRightPolicy {
        self.unknown_right_policy
    }
}

mod atomic;
mod run;
