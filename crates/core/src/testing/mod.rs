//! Testing utilities shared by unit and end-to-end tests.
//!
//! # Example
//!
//! ```rust,ignore
//! use dorkforge_core::testing::{fixtures, MockDorkGenerator};
//!
//! let generator = MockDorkGenerator::new();
//! generator.set_response("site:example.com ext:sql").await;
//!
//! let dir = tempfile::TempDir::new()?;
//! fixtures::write_sample_templates(dir.path())?;
//! ```

mod mock_generator;

pub use mock_generator::{MockDorkGenerator, RecordedPrompt};

/// Test fixtures and helper functions.
pub mod fixtures {
    use std::io;
    use std::path::Path;

    use crate::dork::Dork;

    /// Login portals, with a `wordpress` preset filter.
    pub const LOGIN_PAGES: &str = r#"
category = "login_pages"
description = "Login portals"

[[filters]]
id = "wordpress"
label = "WordPress"
description_contains = "WordPress"

[[templates]]
pattern = "site:{domain} inurl:wp-login.php"
description = "WordPress login page"
params = ["domain"]

[[templates]]
pattern = "site:{domain} intitle:login"
description = "Generic login title"
params = ["domain"]

[[templates]]
pattern = "site:{domain} inurl:admin intext:{keyword}"
description = "Admin login mentioning a keyword"
params = ["domain", "keyword"]
"#;

    /// Exposed files; one template fails validation on purpose.
    pub const SENSITIVE_FILES: &str = r#"
category = "sensitive_files"
description = "Configuration and dump files"

[[templates]]
pattern = "site:{domain} ext:env"
description = "Environment files"
params = ["domain"]

[[templates]]
pattern = "site:{domain} ext:sql intext:password"
description = "SQL dumps with passwords"
params = ["domain"]

[[templates]]
pattern = "site:{domain} allintext:secret intext:key"
description = "Conflicting text operators"
params = ["domain"]
"#;

    /// Write the sample categories into `dir`.
    pub fn write_sample_templates(dir: &Path) -> io::Result<()> {
        std::fs::write(dir.join("login_pages.toml"), LOGIN_PAGES)?;
        std::fs::write(dir.join("sensitive_files.toml"), SENSITIVE_FILES)?;
        Ok(())
    }

    /// Template-sourced dork with no description.
    ///
    /// Panics on an empty query or category.
    pub fn dork(query: &str, category: &str) -> Dork {
        match Dork::new(query, category, "") {
            Ok(dork) => dork,
            Err(e) => panic!("invalid fixture dork {:?}: {}", query, e),
        }
    }
}
