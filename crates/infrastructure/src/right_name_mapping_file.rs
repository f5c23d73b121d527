use std::path::Path;

use tracing::info;

use newscoop_application::RightNameMapping;
use newscoop_core::{AppError, AppResult};

/// Loads a right-name mapping document from disk.
pub async fn load_right_name_mapping(path: &Path) -> AppResult<RightNameMapping> {
    let document = tokio::fs::read_to_string(path).await.map_err(|error| {
        AppError::Configuration(format!(
            "failed to read right name mapping '{}': {error}",
            path.display()
        ))
    })?;

    let mapping = RightNameMapping::from_json_str(document.as_str())?;
    info!(
        path = %path.display(),
        entries = mapping.len(),
        "loaded right name mapping"
    );

    Ok(mapping)
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use newscoop_core::AppError;

    use super::load_right_name_mapping;

    fn scratch_path(file_name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("{}-{file_name}", std::process::id()))
    }

    #[tokio::test]
    async fn loads_mapping_from_file() {
        let path = scratch_path("right-names.json");
        let written = tokio::fs::write(
            &path,
            r#"{"rights": [{"name": "ViewLogs", "resource": "log", "action": "view"}]}"#,
        )
        .await;
        assert!(written.is_ok());

        let mapping = load_right_name_mapping(&path).await;
        let _ = tokio::fs::remove_file(&path).await;

        assert_eq!(mapping.map(|mapping| mapping.len()).ok(), Some(1));
    }

    #[tokio::test]
    async fn missing_file_is_a_configuration_error() {
        let mapping = load_right_name_mapping(&scratch_path("does-not-exist.json")).await;
        assert!(matches!(mapping, Err(AppError::Configuration(_))));
    }
}
