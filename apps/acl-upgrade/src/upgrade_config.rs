use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use newscoop_application::{MigrationMode, UnknownRightPolicy};
use newscoop_core::AppError;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone)]
pub struct UpgradeConfig {
    pub database_url: String,
    pub database_max_connections: u32,
    pub right_name_mapping_path: Option<PathBuf>,
    pub unknown_right_policy: UnknownRightPolicy,
    pub mode: MigrationMode,
}

impl UpgradeConfig {
    pub fn load() -> Result<Self, AppError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let database_url = lookup("DATABASE_URL")
            .filter(|value| !value.trim().is_empty())
            .ok_or_else(|| AppError::Configuration("DATABASE_URL is required".to_owned()))?;

        let database_max_connections = match lookup("DATABASE_MAX_CONNECTIONS") {
            Some(value) => value.trim().parse::<u32>().map_err(|error| {
                AppError::Configuration(format!("invalid DATABASE_MAX_CONNECTIONS: {error}"))
            })?,
            None => 2,
        };
        if database_max_connections == 0 {
            return Err(AppError::Configuration(
                "DATABASE_MAX_CONNECTIONS must be at least 1".to_owned(),
            ));
        }

        let right_name_mapping_path = lookup("ACL_RIGHT_NAME_MAPPING_PATH")
            .filter(|value| !value.trim().is_empty())
            .map(PathBuf::from);

        let unknown_right_policy = lookup("ACL_UNKNOWN_RIGHT_POLICY")
            .map(|value| UnknownRightPolicy::from_str(value.as_str()))
            .transpose()?
            .unwrap_or_default();

        let mode = if flag(&lookup, "ACL_MIGRATION_DRY_RUN") {
            MigrationMode::DryRun
        } else {
            MigrationMode::Commit
        };

        Ok(Self {
            database_url,
            database_max_connections,
            right_name_mapping_path,
            unknown_right_policy,
            mode,
        })
    }
}

fn flag(lookup: &impl Fn(&str) -> Option<String>, name: &str) -> bool {
    lookup(name)
        .unwrap_or_else(|| "false".to_owned())
        .trim()
        .eq_ignore_ascii_case("true")
}

pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .init();
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::path::PathBuf;

    use newscoop_application::{MigrationMode, UnknownRightPolicy};
    use newscoop_core::AppError;

    use super::UpgradeConfig;

    fn config_from(pairs: &[(&str, &str)]) -> Result<UpgradeConfig, AppError> {
        let values: HashMap<String, String> = pairs
            .iter()
            .map(|(name, value)| ((*name).to_owned(), (*value).to_owned()))
            .collect();
        UpgradeConfig::from_lookup(|name| values.get(name).cloned())
    }

    #[test]
    fn defaults_apply_when_only_database_url_is_set() {
        let config = config_from(&[("DATABASE_URL", "mysql://root@localhost/newscoop")]);
        assert!(config.is_ok());
        let Ok(config) = config else {
            return;
        };

        assert_eq!(config.database_max_connections, 2);
        assert_eq!(config.right_name_mapping_path, None);
        assert_eq!(config.unknown_right_policy, UnknownRightPolicy::Strict);
        assert_eq!(config.mode, MigrationMode::Commit);
    }

    #[test]
    fn database_url_is_required() {
        let config = config_from(&[("ACL_MIGRATION_DRY_RUN", "true")]);
        assert!(matches!(config, Err(AppError::Configuration(_))));
    }

    #[test]
    fn overrides_are_parsed() {
        let config = config_from(&[
            ("DATABASE_URL", "mysql://root@localhost/newscoop"),
            ("DATABASE_MAX_CONNECTIONS", "4"),
            ("ACL_RIGHT_NAME_MAPPING_PATH", "/etc/newscoop/rights.json"),
            ("ACL_UNKNOWN_RIGHT_POLICY", "lenient"),
            ("ACL_MIGRATION_DRY_RUN", "TRUE"),
        ]);
        assert!(config.is_ok());
        let Ok(config) = config else {
            return;
        };

        assert_eq!(config.database_max_connections, 4);
        assert_eq!(
            config.right_name_mapping_path,
            Some(PathBuf::from("/etc/newscoop/rights.json"))
        );
        assert_eq!(config.unknown_right_policy, UnknownRightPolicy::Lenient);
        assert_eq!(config.mode, MigrationMode::DryRun);
    }

    #[test]
    fn invalid_values_are_rejected() {
        let policy = config_from(&[
            ("DATABASE_URL", "mysql://root@localhost/newscoop"),
            ("ACL_UNKNOWN_RIGHT_POLICY", "ignore"),
        ]);
        let connections = config_from(&[
            ("DATABASE_URL", "mysql://root@localhost/newscoop"),
            ("DATABASE_MAX_CONNECTIONS", "0"),
        ]);

        assert!(matches!(policy, Err(AppError::Configuration(_))));
        assert!(matches!(connections, Err(AppError::Configuration(_))));
    }
}
