//! Template-to-export flow across the public API.

use std::collections::HashMap;
use std::sync::Arc;

use tempfile::TempDir;

use dorkforge_core::{
    engine::target_params, get_variations, optimize, testing::fixtures, validate_dork, Dork,
    DorkEngine, DorkFilter, Engine, ExportFormat, ExportMetadata, GenerateRequest,
    TemplateRepository,
};

fn engine() -> (DorkEngine, TempDir) {
    let dir = TempDir::new().unwrap();
    fixtures::write_sample_templates(dir.path()).unwrap();
    let repository = TemplateRepository::new(dir.path()).unwrap();
    (DorkEngine::new(Arc::new(repository), true), dir)
}

#[test]
fn test_generate_optimize_export() {
    let (engine, _dir) = engine();
    let params = target_params(Some("example.com"), None);

    let dorks = engine
        .generate(&GenerateRequest::new("sensitive_files", params))
        .unwrap();
    assert_eq!(dorks.len(), 2);
    for dork in &dorks {
        assert!(validate_dork(dork).is_ok());
    }

    let combined = optimize(&dorks);
    assert_eq!(
        combined,
        vec!["site:example.com ((ext:env) OR (ext:sql intext:password))".to_string()]
    );

    let metadata = ExportMetadata {
        generated_at: Some("2026-01-01 00:00:00".to_string()),
        domain: Some("example.com".to_string()),
        categories: vec!["sensitive_files".to_string()],
        ..Default::default()
    };
    let text = ExportFormat::Text.export(&dorks, &metadata).unwrap();
    assert!(text.contains("# Categories: sensitive_files"));
    assert!(text.contains("# === SENSITIVE FILES (2 dorks) ==="));
}

#[test]
fn test_batch_with_custom_template_and_https_filter() {
    let (engine, _dir) = engine();
    engine
        .repository()
        .add_custom_template(
            "login_pages",
            "site:{domain} inurl:sso",
            "Single sign-on portal",
            vec!["domain".to_string()],
        )
        .unwrap();

    let mut filters = HashMap::new();
    filters.insert(
        "login_pages".to_string(),
        DorkFilter {
            https_only: true,
            ..Default::default()
        },
    );

    let results = engine.generate_batch(
        &["login_pages".to_string(), "nope".to_string()],
        &target_params(Some("example.com"), None),
        Engine::Google,
        &filters,
    );

    assert_eq!(results.len(), 1);
    let login = &results["login_pages"];
    assert_eq!(login.len(), 3);
    assert!(login.iter().all(|d| d.query.ends_with("-inurl:http")));
    assert!(login
        .iter()
        .any(|d| d.query.starts_with("site:example.com inurl:sso")));
}

#[test]
fn test_variations_feed_back_into_validation() {
    let dork = fixtures::dork("site:example.com ext:php inurl:/admin/login/", "custom");
    let variations = get_variations(&dork.query);

    assert!(variations.contains(&dork.query));
    assert!(variations.len() > 1);
    for query in variations {
        let variant = Dork::new(query, "custom", "").unwrap();
        assert!(validate_dork(&variant).is_ok(), "{}", variant.query);
    }
}
