//! Template engine for code generation using Handlebars.
//!
//! Provides a wrapper around Handlebars with the route module, test
//! suite and API helper templates pre-registered.
//!
//! # Examples
//!
//! ```
//! use route_codegen::template_engine::TemplateEngine;
//! use serde_json::json;
//!
//! let engine = TemplateEngine::new().unwrap();
//! let context = json!({
//!     "source": "pages",
//!     "dialect": "next-pages",
//!     "has_query": false,
//!     "nodes": [],
//!     "route_path_type": "never",
//! });
//! let module = engine.render("routes", &context).unwrap();
//! assert!(module.contains("export const routes = {"));
//! ```

use handlebars::Handlebars;
use route_core::{Error, Result};
use serde::Serialize;

/// Template engine for code generation.
///
/// Templates run in strict mode with HTML escaping disabled: every
/// context field must be present and values are emitted verbatim.
#[derive(Debug)]
pub struct TemplateEngine<'a> {
    handlebars: Handlebars<'a>,
}

impl TemplateEngine<'_> {
    /// Creates a new template engine with registered templates.
    ///
    /// # Errors
    ///
    /// Returns error if template registration fails (should not happen
    /// with valid built-in templates).
    pub fn new() -> Result<Self> {
        let mut handlebars = Handlebars::new();

        // Strict mode: fail on missing variables
        handlebars.set_strict_mode(true);
        handlebars.register_escape_fn(handlebars::no_escape);

        let mut engine = Self { handlebars };
        engine.register_partial("route_node", include_str!("../templates/partials/route_node.hbs"))?;
        engine.register_template_string("routes", include_str!("../templates/routes.ts.hbs"))?;
        engine.register_template_string(
            "routes_test",
            include_str!("../templates/routes.test.ts.hbs"),
        )?;
        engine.register_template_string("routes_api", include_str!("../templates/routes.api.ts.hbs"))?;

        Ok(engine)
    }

    /// Renders a template with the given context.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - Template name is not registered
    /// - Context cannot be serialized
    /// - Template rendering fails
    pub fn render<T: Serialize>(&self, template_name: &str, context: &T) -> Result<String> {
        self.handlebars
            .render(template_name, context)
            .map_err(|e| Error::GenerationError {
                message: format!("Template '{template_name}' rendering failed: {e}"),
                source: Some(Box::new(e)),
            })
    }

    /// Registers a custom template.
    ///
    /// # Errors
    ///
    /// Returns error if template string is invalid.
    ///
    /// # Examples
    ///
    /// ```
    /// use route_codegen::template_engine::TemplateEngine;
    ///
    /// let mut engine = TemplateEngine::new().unwrap();
    /// engine.register_template_string(
    ///     "banner",
    ///     "// {{name}}"
    /// ).unwrap();
    /// ```
    pub fn register_template_string(&mut self, name: &str, template: &str) -> Result<()> {
        self.handlebars
            .register_template_string(name, template)
            .map_err(|e| Error::GenerationError {
                message: format!("Failed to register template '{name}': {e}"),
                source: Some(Box::new(e)),
            })
    }

    fn register_partial(&mut self, name: &str, template: &str) -> Result<()> {
        self.handlebars
            .register_partial(name, template)
            .map_err(|e| Error::GenerationError {
                message: format!("Failed to register partial '{name}': {e}"),
                source: Some(Box::new(e)),
            })
    }
}
