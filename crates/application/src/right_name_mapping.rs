//! Explicit lookup table from LiveUser right names to ACL `(resource, action)`.
//!
//! The table is a configuration resource: a JSON document of the form
//! `{"rights": [{"name": "...", "resource": "...", "action": "..."}]}`.
//! Names outside the table are never guessed from their spelling.

use std::collections::HashMap;

use serde::Deserialize;

use newscoop_core::{AppError, AppResult};
use newscoop_domain::LegacyRightName;

use crate::RightNameDecoder;

const BUNDLED_RIGHT_NAMES: &str = include_str!("../resources/legacy_right_names.json");

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RightNameMappingDocument {
    rights: Vec<RightNameMappingEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RightNameMappingEntry {
    name: String,
    resource: String,
    action: String,
}

/// Finite right-name mapping loaded at start time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RightNameMapping {
    entries: HashMap<String, (String, String)>,
}

impl RightNameMapping {
    /// Returns the mapping shipped with the upgrade for Campsite 3.x rights.
    pub fn bundled() -> AppResult<Self> {
        Self::from_json_str(BUNDLED_RIGHT_NAMES)
    }

    /// Parses and validates a mapping document.
    pub fn from_json_str(document: &str) -> AppResult<Self> {
        let document: RightNameMappingDocument =
            serde_json::from_str(document).map_err(|error| {
                AppError::Configuration(format!("invalid right name mapping document: {error}"))
            })?;

        Self::from_entries(
            document
                .rights
                .into_iter()
                .map(|entry| (entry.name, entry.resource, entry.action)),
        )
    }

    /// Builds a mapping from `(name, resource, action)` triples.
    pub fn from_entries<I, S>(entries: I) -> AppResult<Self>
    where
        I: IntoIterator<Item = (S, S, S)>,
        S: Into<String>,
    {
        let mut mapped = HashMap::new();

        for (name, resource, action) in entries {
            let name = name.into().trim().to_owned();
            let resource = resource.into().trim().to_owned();
            let action = action.into().trim().to_owned();

            if name.is_empty() {
                return Err(AppError::Configuration(
                    "right name mapping contains an entry with an empty name".to_owned(),
                ));
            }

            if resource.is_empty() || action.is_empty() {
                return Err(AppError::Configuration(format!(
                    "right name mapping entry '{name}' must have a resource and an action"
                )));
            }

            if mapped.contains_key(name.as_str()) {
                return Err(AppError::Configuration(format!(
                    "right name mapping defines '{name}' more than once"
                )));
            }

            mapped.insert(name, (resource, action));
        }

        Ok(Self { entries: mapped })
    }

    /// Returns the number of mapped right names.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns whether the mapping is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl RightNameDecoder for RightNameMapping {
    fn translate(&self, right_name: &LegacyRightName) -> Option<(&str, &str)> {
        self.entries
            .get(right_name.as_str())
            .map(|(resource, action)| (resource.as_str(), action.as_str()))
    }
}

#[cfg(test)]
mod tests;
