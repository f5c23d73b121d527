use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

/// LiveUser right name as stored, e.g. `ManagePub` or `plugin_blog_admin`.
///
/// `liveuser_rights.right_define_name` defaults to the empty string, so a
/// blank name is representable. It never matches a mapping entry and goes
/// through the unknown-right handling like any other unmapped name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LegacyRightName(String);

impl LegacyRightName {
    /// Creates a right name. Surrounding whitespace is trimmed.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        let value = value.into();
        Self(value.trim().to_owned())
    }

    /// Returns the right name as stored in `liveuser_rights`, trimmed.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Returns whether the stored name is empty after trimming.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.0.is_empty()
    }
}

impl Display for LegacyRightName {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::LegacyRightName;

    #[test]
    fn right_name_is_trimmed() {
        let name = LegacyRightName::new("  AddArticle\n");
        assert_eq!(name.to_string(), "AddArticle");
        assert!(!name.is_blank());
    }

    #[test]
    fn blank_right_name_is_kept_as_blank() {
        let name = LegacyRightName::new("\t");
        assert!(name.is_blank());
        assert_eq!(name.as_str(), "");
    }
}
