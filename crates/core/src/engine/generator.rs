use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use tracing::{debug, info, warn};

use super::{DorkFilter, GenerateError};
use crate::dork::Dork;
use crate::templates::{CategoryFilter, TemplateError, TemplateRepository};
use crate::translator::{translate_for, Engine};
use crate::validator::{validate_dork, ValidationError};

/// One category's worth of generation.
#[derive(Debug, Clone, Default)]
pub struct GenerateRequest {
    pub category: String,
    pub params: HashMap<String, String>,
    pub engine: Engine,
    pub filter: DorkFilter,
    /// Id of a preset filter declared by the category.
    pub preset: Option<String>,
}

impl GenerateRequest {
    pub fn new(category: impl Into<String>, params: HashMap<String, String>) -> Self {
        Self {
            category: category.into(),
            params,
            ..Default::default()
        }
    }

    pub fn with_engine(mut self, engine: Engine) -> Self {
        self.engine = engine;
        self
    }

    pub fn with_filter(mut self, filter: DorkFilter) -> Self {
        self.filter = filter;
        self
    }

    pub fn with_preset(mut self, preset: impl Into<String>) -> Self {
        self.preset = Some(preset.into());
        self
    }
}

/// Template parameters for a target. `domain_name` mirrors `domain`.
pub fn target_params(domain: Option<&str>, keyword: Option<&str>) -> HashMap<String, String> {
    let mut params = HashMap::new();
    if let Some(domain) = domain.map(str::trim).filter(|d| !d.is_empty()) {
        params.insert("domain".to_string(), domain.to_string());
        params.insert("domain_name".to_string(), domain.to_string());
    }
    if let Some(keyword) = keyword.map(str::trim).filter(|k| !k.is_empty()) {
        params.insert("keyword".to_string(), keyword.to_string());
    }
    params
}

/// `(q1) OR (q2) ...`, or `None` unless there are at least two dorks.
pub fn combine(dorks: &[Dork]) -> Option<String> {
    if dorks.len() < 2 {
        return None;
    }
    Some(
        dorks
            .iter()
            .map(|d| format!("({})", d.query))
            .collect::<Vec<_>>()
            .join(" OR "),
    )
}

#[derive(Debug, Clone, Serialize)]
pub struct TemplateSummary {
    pub pattern: String,
    pub description: String,
    pub params: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CategoryInfo {
    pub name: String,
    pub description: String,
    pub template_count: usize,
    pub filters: Vec<CategoryFilter>,
    pub templates: Vec<TemplateSummary>,
}

pub struct DorkEngine {
    repository: Arc<TemplateRepository>,
    validate: bool,
}

impl DorkEngine {
    pub fn new(repository: Arc<TemplateRepository>, validate: bool) -> Self {
        info!("Dork engine initialized (validation {})", if validate { "on" } else { "off" });
        Self {
            repository,
            validate,
        }
    }

    pub fn repository(&self) -> &Arc<TemplateRepository> {
        &self.repository
    }

    pub fn generate(&self, request: &GenerateRequest) -> Result<Vec<Dork>, GenerateError> {
        let category = self.repository.get_by_category(&request.category)?;

        let filter = match &request.preset {
            Some(id) => {
                let preset = category.filter(id).ok_or_else(|| GenerateError::UnknownFilter {
                    category: request.category.clone(),
                    filter: id.clone(),
                })?;
                request.filter.clone().with_preset(preset)
            }
            None => request.filter.clone(),
        };

        let templates: Vec<_> = category
            .templates
            .iter()
            .filter(|t| filter.accepts_template(t))
            .collect();
        debug!(
            "Category '{}': {} of {} templates selected",
            request.category,
            templates.len(),
            category.template_count()
        );

        let mut dorks = Vec::new();
        let mut rejected = Vec::new();

        for template in templates {
            let query = match template.render(&request.params) {
                Ok(query) => query,
                Err(TemplateError::MissingParameter(param)) => {
                    warn!("Skipping template '{}': missing parameter {}", template.pattern, param);
                    continue;
                }
                Err(e) => {
                    warn!("Skipping template '{}': {}", template.pattern, e);
                    continue;
                }
            };

            let query = translate_for(&query, request.engine);
            let dork = match Dork::new(query, &template.category, &template.description) {
                Ok(dork) => dork.with_parameters(request.params.clone()),
                Err(e) => {
                    warn!("Skipping template '{}': {}", template.pattern, e);
                    continue;
                }
            };

            if self.validate {
                if let Err(e) = validate_dork(&dork) {
                    warn!("Validation failed for dork '{}': {}", dork.query, e);
                    rejected.push(format!("{}: {}", dork.query, e));
                    continue;
                }
            }

            dorks.push(dork);
        }

        info!(
            "Generated {} dorks for '{}' (skipped {} invalid)",
            dorks.len(),
            request.category,
            rejected.len()
        );

        if dorks.is_empty() && !rejected.is_empty() {
            return Err(ValidationError::AllFailed(rejected.join("; ")).into());
        }

        Ok(filter.apply(dorks))
    }

    /// Generate for several categories with shared parameters.
    ///
    /// Unknown or failing categories are logged and left out of the result.
    pub fn generate_batch(
        &self,
        categories: &[String],
        params: &HashMap<String, String>,
        engine: Engine,
        filters: &HashMap<String, DorkFilter>,
    ) -> BTreeMap<String, Vec<Dork>> {
        let mut results = BTreeMap::new();

        for category in categories {
            let request = GenerateRequest {
                category: category.clone(),
                params: params.clone(),
                engine,
                filter: filters.get(category).cloned().unwrap_or_default(),
                preset: None,
            };
            match self.generate(&request) {
                Ok(dorks) => {
                    results.insert(category.clone(), dorks);
                }
                Err(GenerateError::Template(TemplateError::NotFound(_))) => {
                    warn!("Skipping unknown category: {}", category);
                }
                Err(e) => {
                    warn!("Error generating dorks for '{}': {}", category, e);
                }
            }
        }

        info!(
            "Batch generation complete: {} dorks across {} categories",
            results.values().map(Vec::len).sum::<usize>(),
            results.len()
        );
        results
    }

    pub fn list_categories(&self) -> Result<Vec<String>, GenerateError> {
        Ok(self.repository.all_categories()?)
    }

    pub fn category_info(&self, name: &str) -> Result<CategoryInfo, GenerateError> {
        let category = self.repository.get_by_category(name)?;
        Ok(CategoryInfo {
            name: category.name.clone(),
            description: category.description.clone(),
            template_count: category.template_count(),
            filters: category.filters.clone(),
            templates: category
                .templates
                .iter()
                .map(|t| TemplateSummary {
                    pattern: t.pattern.clone(),
                    description: t.description.clone(),
                    params: t.params.clone(),
                })
                .collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const ADMIN: &str = r#"
description = "Admin panels"

[[filters]]
id = "wordpress"
label = "WordPress"
description_contains = "WordPress"

[[templates]]
pattern = "site:{domain} inurl:wp-admin"
description = "WordPress admin"
params = ["domain"]

[[templates]]
pattern = "site:{domain} intext:{keyword}"
description = "Keyword admin page"
params = ["domain", "keyword"]

[[templates]]
pattern = "site:{domain} intitle:administrator"
description = "Joomla administrator"
params = ["domain"]
"#;

    const BROKEN: &str = r#"
description = "Always invalid"

[[templates]]
pattern = "allintext:{domain} intext:x"
description = "Conflicting operators"
params = ["domain"]
"#;

    fn engine() -> (TempDir, DorkEngine) {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("admin_panels.toml"), ADMIN).unwrap();
        fs::write(dir.path().join("broken.toml"), BROKEN).unwrap();
        let repo = Arc::new(TemplateRepository::new(dir.path()).unwrap());
        (dir, DorkEngine::new(repo, true))
    }

    #[test]
    fn test_generate_skips_missing_parameters() {
        let (_dir, engine) = engine();
        let request = GenerateRequest::new("admin_panels", target_params(Some("a.com"), None));
        let dorks = engine.generate(&request).unwrap();
        assert_eq!(dorks.len(), 2);
        assert_eq!(dorks[0].query, "site:a.com inurl:wp-admin");
        assert_eq!(dorks[0].category, "admin_panels");
        assert_eq!(dorks[0].parameters.get("domain_name").unwrap(), "a.com");
    }

    #[test]
    fn test_generate_translates() {
        let (_dir, engine) = engine();
        let request = GenerateRequest::new(
            "admin_panels",
            target_params(Some("a.com"), Some("secret")),
        )
        .with_engine(Engine::Bing);
        let dorks = engine.generate(&request).unwrap();
        assert!(dorks.iter().any(|d| d.query == "site:a.com inbody:secret"));
        assert!(dorks.iter().any(|d| d.query == "site:a.com instreamset:url:wp-admin"));
    }

    #[test]
    fn test_generate_preset() {
        let (_dir, engine) = engine();
        let request = GenerateRequest::new("admin_panels", target_params(Some("a.com"), None))
            .with_preset("wordpress");
        let dorks = engine.generate(&request).unwrap();
        assert_eq!(dorks.len(), 1);
        assert_eq!(dorks[0].description, "WordPress admin");
    }

    #[test]
    fn test_generate_unknown_preset() {
        let (_dir, engine) = engine();
        let request = GenerateRequest::new("admin_panels", HashMap::new()).with_preset("drupal");
        assert!(matches!(
            engine.generate(&request),
            Err(GenerateError::UnknownFilter { .. })
        ));
    }

    #[test]
    fn test_generate_unknown_category() {
        let (_dir, engine) = engine();
        let request = GenerateRequest::new("nope", HashMap::new());
        assert!(matches!(
            engine.generate(&request),
            Err(GenerateError::Template(TemplateError::NotFound(_)))
        ));
    }

    #[test]
    fn test_all_failed_validation() {
        let (_dir, engine) = engine();
        let request = GenerateRequest::new("broken", target_params(Some("a.com"), None));
        let err = engine.generate(&request).unwrap_err();
        assert!(matches!(
            err,
            GenerateError::Validation(ValidationError::AllFailed(_))
        ));
    }

    #[test]
    fn test_validation_disabled_keeps_invalid() {
        let (dir, _) = engine();
        let repo = Arc::new(TemplateRepository::new(dir.path()).unwrap());
        let engine = DorkEngine::new(repo, false);
        let request = GenerateRequest::new("broken", target_params(Some("a.com"), None));
        assert_eq!(engine.generate(&request).unwrap().len(), 1);
    }

    #[test]
    fn test_no_renderable_templates_is_empty_not_error() {
        let (_dir, engine) = engine();
        let request = GenerateRequest::new("admin_panels", HashMap::new());
        assert!(engine.generate(&request).unwrap().is_empty());
    }

    #[test]
    fn test_generate_batch_skips_failures() {
        let (_dir, engine) = engine();
        let categories = vec![
            "admin_panels".to_string(),
            "broken".to_string(),
            "missing".to_string(),
        ];
        let mut filters = HashMap::new();
        filters.insert(
            "admin_panels".to_string(),
            DorkFilter {
                max_dorks: 1,
                ..Default::default()
            },
        );
        let results = engine.generate_batch(
            &categories,
            &target_params(Some("a.com"), None),
            Engine::Google,
            &filters,
        );
        assert_eq!(results.len(), 1);
        assert_eq!(results["admin_panels"].len(), 1);
    }

    #[test]
    fn test_combine() {
        let a = Dork::new("site:a.com", "c", "").unwrap();
        let b = Dork::new("ext:pdf", "c", "").unwrap();
        assert_eq!(combine(&[a.clone()]), None);
        assert_eq!(
            combine(&[a, b]),
            Some("(site:a.com) OR (ext:pdf)".to_string())
        );
    }

    #[test]
    fn test_category_info() {
        let (_dir, engine) = engine();
        let info = engine.category_info("admin_panels").unwrap();
        assert_eq!(info.template_count, 3);
        assert_eq!(info.filters.len(), 1);
        assert_eq!(info.templates[1].params, vec!["domain", "keyword"]);
        assert_eq!(
            engine.list_categories().unwrap(),
            vec!["admin_panels".to_string(), "broken".to_string()]
        );
    }
}
