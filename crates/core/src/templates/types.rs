use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::TemplateError;

/// A dork pattern with `{name}` placeholders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Template {
    /// e.g. `site:{domain} filetype:pdf`. `{{` and `}}` render as literal braces.
    pub pattern: String,
    pub description: String,
    pub category: String,
    /// Placeholders the pattern expects.
    #[serde(default)]
    pub params: Vec<String>,
    #[serde(default)]
    pub examples: Vec<String>,
}

impl Template {
    pub fn new(
        pattern: impl Into<String>,
        description: impl Into<String>,
        category: impl Into<String>,
        params: Vec<String>,
    ) -> Result<Self, TemplateError> {
        let template = Self {
            pattern: pattern.into(),
            description: description.into(),
            category: category.into(),
            params,
            examples: Vec::new(),
        };
        if template.pattern.is_empty() {
            return Err(TemplateError::Configuration(
                "Template pattern cannot be empty".to_string(),
            ));
        }
        if template.category.is_empty() {
            return Err(TemplateError::Configuration(
                "Template category cannot be empty".to_string(),
            ));
        }
        Ok(template)
    }

    /// Substitute every placeholder from `parameters`.
    pub fn render(&self, parameters: &HashMap<String, String>) -> Result<String, TemplateError> {
        let mut out = String::with_capacity(self.pattern.len());
        let mut chars = self.pattern.chars().peekable();

        while let Some(c) = chars.next() {
            match c {
                '{' if chars.peek() == Some(&'{') => {
                    chars.next();
                    out.push('{');
                }
                '}' if chars.peek() == Some(&'}') => {
                    chars.next();
                    out.push('}');
                }
                '{' => {
                    let mut name = String::new();
                    loop {
                        match chars.next() {
                            Some('}') => break,
                            Some(c) => name.push(c),
                            None => {
                                return Err(TemplateError::Configuration(format!(
                                    "Unterminated placeholder in pattern: {}",
                                    self.pattern
                                )))
                            }
                        }
                    }
                    let value = parameters
                        .get(&name)
                        .ok_or_else(|| TemplateError::MissingParameter(name.clone()))?;
                    out.push_str(value);
                }
                c => out.push(c),
            }
        }

        Ok(out)
    }
}

/// A named preset narrowing a category's output, e.g. "WordPress only".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryFilter {
    pub id: String,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description_contains: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query_contains: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TemplateCategory {
    pub name: String,
    pub description: String,
    pub templates: Vec<Template>,
    pub filters: Vec<CategoryFilter>,
}

impl TemplateCategory {
    pub fn template_count(&self) -> usize {
        self.templates.len()
    }

    pub fn filter(&self, id: &str) -> Option<&CategoryFilter> {
        self.filters.iter().find(|f| f.id == id)
    }
}
