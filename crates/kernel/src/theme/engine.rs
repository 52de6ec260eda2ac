//! Theme engine with Tera templates.

use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};
use tera::Tera;
use tracing::debug;

/// Built-in templates, always available unless overridden on disk.
const BUILTIN_TEMPLATES: &[(&str, &str)] = &[(
    "equipments.html",
    include_str!("../../templates/equipments.html"),
)];

/// Theme engine for rendering templates.
pub struct ThemeEngine {
    /// Tera template engine instance.
    tera: Tera,
}

impl ThemeEngine {
    /// Create a theme engine.
    ///
    /// Templates under `template_dir` take precedence over the built-in
    /// ones with the same name.
    pub fn new(template_dir: Option<&Path>) -> Result<Self> {
        let mut tera = match template_dir {
            Some(dir) => {
                let pattern = dir.join("**/*.html");
                let pattern_str = pattern
                    .to_str()
                    .context("invalid template directory path")?;
                Tera::new(pattern_str).context("failed to initialize Tera templates")?
            }
            None => Tera::default(),
        };

        let builtin = Self::builtin_tera()?;
        tera.extend(&builtin)
            .context("failed to merge built-in templates")?;

        // Register custom filters
        Self::register_filters(&mut tera);

        let template_names: Vec<_> = tera.get_template_names().collect();
        debug!(count = template_names.len(), "loaded templates");

        Ok(Self { tera })
    }

    fn builtin_tera() -> Result<Tera> {
        let mut tera = Tera::default();
        tera.add_raw_templates(BUILTIN_TEMPLATES.iter().copied())
            .context("failed to parse built-in templates")?;
        Ok(tera)
    }

    /// Register custom Tera filters.
    fn register_filters(tera: &mut Tera) {
        // Formats RFC 3339 strings or Unix timestamps as human-readable dates
        tera.register_filter(
            "format_date",
            |value: &tera::Value, _args: &HashMap<String, tera::Value>| {
                let parsed = match value {
                    tera::Value::String(s) => chrono::DateTime::parse_from_rfc3339(s)
                        .ok()
                        .map(|dt| dt.with_timezone(&chrono::Utc)),
                    tera::Value::Number(n) => {
                        n.as_i64().and_then(|ts| chrono::DateTime::from_timestamp(ts, 0))
                    }
                    _ => return Ok(tera::Value::String(String::new())),
                };

                let formatted = parsed
                    .map(|dt| dt.format("%B %-d, %Y").to_string())
                    .unwrap_or_default();

                Ok(tera::Value::String(formatted))
            },
        );
    }

    /// Resolve a template id such as `equipments` to a loaded template name.
    pub fn resolve_template(&self, template_id: &str) -> Option<String> {
        let with_extension = format!("{template_id}.html");
        if self.tera.get_template(&with_extension).is_ok() {
            return Some(with_extension);
        }
        // Also try without .html extension (in case the id already has it)
        if self.tera.get_template(template_id).is_ok() {
            return Some(template_id.to_string());
        }
        None
    }

    /// Render the template registered for `template_id`.
    pub fn render(&self, template_id: &str, context: &tera::Context) -> Result<String> {
        let template = self
            .resolve_template(template_id)
            .with_context(|| format!("no template for {template_id}"))?;

        self.tera
            .render(&template, context)
            .with_context(|| format!("failed to render template {template}"))
    }
}

impl std::fmt::Debug for ThemeEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ThemeEngine")
            .field("template_count", &self.tera.get_template_names().count())
            .finish()
    }
}
