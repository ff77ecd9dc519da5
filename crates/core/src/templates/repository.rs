use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use tracing::{debug, info};

use super::{Template, TemplateCategory, TemplateError, TemplateLoader};

/// Cached access to template categories.
///
/// Each category is loaded from disk at most once until it is invalidated.
/// Custom templates live in an in-memory overlay that is merged in on load.
pub struct TemplateRepository {
    loader: TemplateLoader,
    cache: Mutex<HashMap<String, Arc<TemplateCategory>>>,
    custom: Mutex<HashMap<String, Vec<Template>>>,
}

impl TemplateRepository {
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self, TemplateError> {
        Ok(Self::with_loader(TemplateLoader::new(dir)?))
    }

    pub fn with_loader(loader: TemplateLoader) -> Self {
        Self {
            loader,
            cache: Mutex::new(HashMap::new()),
            custom: Mutex::new(HashMap::new()),
        }
    }

    pub fn get_by_category(&self, name: &str) -> Result<Arc<TemplateCategory>, TemplateError> {
        // Held across the load so concurrent callers never read the same file twice.
        let mut cache = self.cache.lock().unwrap();
        if let Some(category) = cache.get(name) {
            return Ok(Arc::clone(category));
        }

        debug!("Loading category '{}'", name);
        let mut category = self.loader.load_category(name)?;
        if let Some(extra) = self.custom.lock().unwrap().get(name) {
            category.templates.extend(extra.iter().cloned());
        }

        let category = Arc::new(category);
        cache.insert(name.to_string(), Arc::clone(&category));
        Ok(category)
    }

    /// Drop one cached category; the next access reloads it.
    pub fn invalidate(&self, name: &str) {
        if self.cache.lock().unwrap().remove(name).is_some() {
            debug!("Invalidated category '{}'", name);
        }
    }

    pub fn clear(&self) {
        self.cache.lock().unwrap().clear();
        info!("Cleared template cache");
    }

    pub fn all_categories(&self) -> Result<Vec<String>, TemplateError> {
        self.loader.list_available_categories()
    }

    pub fn template_count(&self) -> Result<usize, TemplateError> {
        let mut total = 0;
        for name in self.all_categories()? {
            total += self.get_by_category(&name)?.template_count();
        }
        Ok(total)
    }

    /// Templates whose description or pattern contains `keyword`, ignoring case.
    pub fn search_templates(&self, keyword: &str) -> Result<Vec<Template>, TemplateError> {
        let keyword = keyword.to_lowercase();
        let mut results = Vec::new();
        for name in self.all_categories()? {
            let category = self.get_by_category(&name)?;
            results.extend(
                category
                    .templates
                    .iter()
                    .filter(|t| {
                        t.description.to_lowercase().contains(&keyword)
                            || t.pattern.to_lowercase().contains(&keyword)
                    })
                    .cloned(),
            );
        }
        debug!("Template search for {:?} returned {} results", keyword, results.len());
        Ok(results)
    }

    /// Add an in-memory template to an existing category.
    pub fn add_custom_template(
        &self,
        category: &str,
        pattern: &str,
        description: &str,
        params: Vec<String>,
    ) -> Result<Template, TemplateError> {
        self.get_by_category(category)?;

        let template = Template::new(pattern, description, category, params)?;
        self.custom
            .lock()
            .unwrap()
            .entry(category.to_string())
            .or_default()
            .push(template.clone());
        self.invalidate(category);

        info!("Added custom template to '{}': {}", category, pattern);
        Ok(template)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn setup() -> (TempDir, TemplateRepository) {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("backup_files.toml"),
            r#"
description = "Backups"

[[templates]]
pattern = "site:{domain} ext:bak"
description = "Backup files"
params = ["domain"]
"#,
        )
        .unwrap();
        fs::write(
            dir.path().join("login_pages.toml"),
            r#"
description = "Logins"

[[templates]]
pattern = "site:{domain} intitle:login"
description = "Login PASSWORD form"
params = ["domain"]
"#,
        )
        .unwrap();
        let repo = TemplateRepository::new(dir.path()).unwrap();
        (dir, repo)
    }

    #[test]
    fn test_cache_returns_same_instance() {
        let (_dir, repo) = setup();
        let a = repo.get_by_category("backup_files").unwrap();
        let b = repo.get_by_category("backup_files").unwrap();
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn test_invalidate_reloads() {
        let (dir, repo) = setup();
        let before = repo.get_by_category("backup_files").unwrap();
        fs::write(
            dir.path().join("backup_files.toml"),
            "description = \"Changed\"\n",
        )
        .unwrap();

        // Still cached.
        assert_eq!(repo.get_by_category("backup_files").unwrap().description, "Backups");

        repo.invalidate("backup_files");
        let after = repo.get_by_category("backup_files").unwrap();
        assert!(!Arc::ptr_eq(&before, &after));
        assert_eq!(after.description, "Changed");
    }

    #[test]
    fn test_clear() {
        let (_dir, repo) = setup();
        let a = repo.get_by_category("login_pages").unwrap();
        repo.clear();
        let b = repo.get_by_category("login_pages").unwrap();
        assert!(!Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn test_counts_and_search() {
        let (_dir, repo) = setup();
        assert_eq!(repo.all_categories().unwrap().len(), 2);
        assert_eq!(repo.template_count().unwrap(), 2);

        let found = repo.search_templates("password").unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].category, "login_pages");

        let by_pattern = repo.search_templates("EXT:BAK").unwrap();
        assert_eq!(by_pattern.len(), 1);
    }

    #[test]
    fn test_custom_template_survives_reload() {
        let (_dir, repo) = setup();
        repo.add_custom_template(
            "backup_files",
            "site:{domain} ext:old",
            "Old copies",
            vec!["domain".to_string()],
        )
        .unwrap();

        assert_eq!(repo.get_by_category("backup_files").unwrap().template_count(), 2);
        repo.clear();
        assert_eq!(repo.get_by_category("backup_files").unwrap().template_count(), 2);
    }

    #[test]
    fn test_custom_template_unknown_category() {
        let (_dir, repo) = setup();
        let err = repo
            .add_custom_template("nope", "site:{domain}", "x", vec![])
            .unwrap_err();
        assert!(matches!(err, TemplateError::NotFound(_)));
    }
}
