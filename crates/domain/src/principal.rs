use std::fmt::{Display, Formatter};

use newscoop_core::{AppError, AppResult};
use serde::{Deserialize, Serialize};

/// Class of legacy principal that can hold rights.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrincipalKind {
    /// A LiveUser group.
    Group,
    /// An individual LiveUser account.
    User,
}

impl PrincipalKind {
    /// Returns a stable value for logs and error messages.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Group => "group",
            Self::User => "user",
        }
    }

    /// Principal classes in migration order: groups are numbered before users.
    #[must_use]
    pub fn migration_order() -> &'static [Self] {
        const ORDER: &[PrincipalKind] = &[PrincipalKind::Group, PrincipalKind::User];

        ORDER
    }
}

/// A legacy group or user row identified by its primary key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LegacyPrincipal {
    kind: PrincipalKind,
    id: i64,
}

impl LegacyPrincipal {
    /// Creates a legacy group principal.
    #[must_use]
    pub fn group(id: i64) -> Self {
        Self {
            kind: PrincipalKind::Group,
            id,
        }
    }

    /// Creates a legacy user principal.
    #[must_use]
    pub fn user(id: i64) -> Self {
        Self {
            kind: PrincipalKind::User,
            id,
        }
    }

    /// Creates a principal of the given kind.
    #[must_use]
    pub fn new(kind: PrincipalKind, id: i64) -> Self {
        Self { kind, id }
    }

    /// Returns the principal class.
    #[must_use]
    pub fn kind(&self) -> PrincipalKind {
        self.kind
    }

    /// Returns the legacy primary key.
    #[must_use]
    pub fn id(&self) -> i64 {
        self.id
    }
}

impl Display for LegacyPrincipal {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{}:{}", self.kind.as_str(), self.id)
    }
}

/// Synthetic ACL role identifier. Always positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct RoleId(u32);

impl RoleId {
    /// Creates a role identifier, rejecting zero.
    pub fn new(value: u32) -> AppResult<Self> {
        if value == 0 {
            return Err(AppError::Validation(
                "role id must be a positive integer".to_owned(),
            ));
        }

        Ok(Self(value))
    }

    /// Returns the underlying integer value.
    #[must_use]
    pub fn as_u32(&self) -> u32 {
        self.0
    }
}

impl TryFrom<u32> for RoleId {
    type Error = AppError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<RoleId> for u32 {
    fn from(value: RoleId) -> Self {
        value.0
    }
}

impl Display for RoleId {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

/// Binding of one legacy principal to the role minted for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RoleAssignment {
    /// Legacy group or user.
    pub principal: LegacyPrincipal,
    /// Role stamped onto the principal row.
    pub role_id: RoleId,
}

/// Monotonic role id generator for one migration run.
///
/// The sequence is moved into each migration phase and handed back when the
/// phase completes, so the numbering across groups and users is carried by
/// value rather than by a shared counter.
#[derive(Debug, PartialEq, Eq)]
pub struct RoleIdSequence {
    next: u32,
}

impl RoleIdSequence {
    /// Starts a sequence whose first issued id is 1.
    #[must_use]
    pub fn new() -> Self {
        Self { next: 1 }
    }

    /// Issues the next role id.
    pub fn next_role_id(&mut self) -> AppResult<RoleId> {
        let role_id = RoleId::new(self.next)?;
        self.next = self.next.checked_add(1).ok_or_else(|| {
            AppError::Validation("role id sequence exhausted the u32 range".to_owned())
        })?;

        Ok(role_id)
    }

    /// Returns every issued id in ascending order, `1..next`.
    pub fn issued(&self) -> impl Iterator<Item = RoleId> + use<> {
        (1..self.next).map(RoleId)
    }
}

impl Default for RoleIdSequence {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::{LegacyPrincipal, PrincipalKind, RoleId, RoleIdSequence};

    #[test]
    fn role_id_rejects_zero() {
        assert!(RoleId::new(0).is_err());
        assert!(RoleId::new(1).is_ok());
    }

    #[test]
    fn fresh_sequence_issues_nothing() {
        let sequence = RoleIdSequence::new();
        assert_eq!(sequence.issued().count(), 0);
    }

    #[test]
    fn sequence_starts_at_one() {
        let mut sequence = RoleIdSequence::new();
        let first = sequence.next_role_id().map(|role_id| role_id.as_u32());
        assert_eq!(first.ok(), Some(1));
    }

    #[test]
    fn principal_formats_as_kind_and_id() {
        assert_eq!(LegacyPrincipal::group(4).to_string(), "group:4");
        assert_eq!(LegacyPrincipal::user(12).to_string(), "user:12");
    }

    #[test]
    fn groups_precede_users_in_migration_order() {
        assert_eq!(
            PrincipalKind::migration_order(),
            &[PrincipalKind::Group, PrincipalKind::User]
        );
    }

    #[test]
    fn role_id_deserialization_rejects_zero() {
        let parsed: Result<RoleId, _> = serde_json::from_str("0");
        assert!(parsed.is_err());
    }

    proptest! {
        #[test]
        fn issued_ids_are_dense_and_ascending(count in 0_u32..500) {
            let mut sequence = RoleIdSequence::new();
            let mut minted = Vec::new();
            for _ in 0..count {
                minted.push(sequence.next_role_id().map(|role_id| role_id.as_u32()));
            }

            let minted: Vec<u32> = minted.into_iter().filter_map(Result::ok).collect();
            let expected: Vec<u32> = (1..=count).collect();
            prop_assert_eq!(&minted, &expected);

            let reported: Vec<u32> = sequence.issued().map(|role_id| role_id.as_u32()).collect();
            prop_assert_eq!(reported, expected);
        }
    }
}
