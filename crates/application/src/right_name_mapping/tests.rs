use newscoop_core::AppError;
use newscoop_domain::LegacyRightName;

use crate::{RightNameDecoder, RightNameMapping};

fn right(name: &str) -> LegacyRightName {
    LegacyRightName::new(name)
}

#[test]
fn bundled_mapping_covers_core_campsite_rights() {
    let mapping = RightNameMapping::bundled();
    assert!(mapping.is_ok());
    let Ok(mapping) = mapping else {
        return;
    };

    assert!(!mapping.is_empty());
    assert_eq!(
        mapping.translate(&right("ManagePub")),
        Some(("publication", "manage"))
    );
    assert_eq!(
        mapping.translate(&right("ChangeArticle")),
        Some(("article", "edit"))
    );
    assert_eq!(
        mapping.translate(&right("plugin_blog_admin")),
        Some(("plugin-blog", "admin"))
    );
}

#[test]
fn lookup_is_exact_and_case_sensitive() {
    let mapping = RightNameMapping::from_entries([("ARTICLE_MODIFY", "Article", "Modify")]);
    assert!(mapping.is_ok());
    let Ok(mapping) = mapping else {
        return;
    };

    assert_eq!(
        mapping.translate(&right("ARTICLE_MODIFY")),
        Some(("Article", "Modify"))
    );
    assert_eq!(mapping.translate(&right("article_modify")), None);
    assert_eq!(mapping.translate(&right("ARTICLE_DELETE")), None);
}

#[test]
fn document_entries_are_parsed() {
    let mapping = RightNameMapping::from_json_str(
        r#"{"rights": [
            {"name": "ARTICLE_MODIFY", "resource": "article", "action": "modify"},
            {"name": "ARTICLE_DELETE", "resource": "article", "action": "delete"}
        ]}"#,
    );

    assert_eq!(mapping.map(|mapping| mapping.len()).ok(), Some(2));
}

#[test]
fn duplicate_names_are_rejected() {
    let mapping = RightNameMapping::from_entries([
        ("ManagePub", "publication", "manage"),
        (" ManagePub ", "publication", "admin"),
    ]);

    assert!(matches!(mapping, Err(AppError::Configuration(_))));
}

#[test]
fn blank_resource_or_action_is_rejected() {
    let blank_action = RightNameMapping::from_entries([("ViewLogs", "log", " ")]);
    let blank_name = RightNameMapping::from_entries([("", "log", "view")]);

    assert!(matches!(blank_action, Err(AppError::Configuration(_))));
    assert!(matches!(blank_name, Err(AppError::Configuration(_))));
}

#[test]
fn malformed_document_is_a_configuration_error() {
    let unknown_field = RightNameMapping::from_json_str(
        r#"{"rights": [{"name": "ViewLogs", "resource": "log", "action": "view", "extra": 1}]}"#,
    );
    let not_json = RightNameMapping::from_json_str("rights = []");

    assert!(matches!(unknown_field, Err(AppError::Configuration(_))));
    assert!(matches!(not_json, Err(AppError::Configuration(_))));
}
