//! Annotation template rendering

use std::collections::BTreeMap;
use std::sync::LazyLock;

use handlebars::Handlebars;
use regex::Regex;

use crate::context::RenderContext;

/// Matches a Go-style `{{ .field }}` reference so it can be rewritten to `{{ field }}`
static DOTTED_REFERENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\{\{~?\s*)\.([A-Za-z_])").expect("dotted reference pattern is valid")
});

/// Renders annotation templates against a render context.
///
/// Templates are Handlebars, rendered without HTML escaping. Each template
/// is rendered on its own; one that fails to parse or execute keeps its raw
/// source so a single bad annotation never sinks the alert.
pub struct TemplateRenderer {
    registry: Handlebars<'static>,
}

impl std::fmt::Debug for TemplateRenderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TemplateRenderer").finish()
    }
}

impl Default for TemplateRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateRenderer {
    pub fn new() -> Self {
        let mut registry = Handlebars::new();
        registry.register_escape_fn(handlebars::no_escape);
        Self { registry }
    }

    /// Render a single template
    pub fn render(
        &self,
        template: &str,
        context: &RenderContext,
    ) -> Result<String, handlebars::RenderError> {
        let normalized = DOTTED_REFERENCE.replace_all(template, "${1}${2}");
        self.registry.render_template(&normalized, context)
    }

    /// Render every annotation, falling back to the raw template per key
    pub fn render_annotations(
        &self,
        annotations: &BTreeMap<String, String>,
        context: &RenderContext,
    ) -> BTreeMap<String, String> {
        annotations
            .iter()
            .map(|(name, template)| {
                let rendered = match self.render(template, context) {
                    Ok(text) => text,
                    Err(e) => {
                        tracing::warn!(
                            "Annotation '{}' failed to render, keeping template: {}",
                            name,
                            e
                        );
                        template.clone()
                    }
                };
                (name.clone(), rendered)
            })
            .collect()
    }
}
