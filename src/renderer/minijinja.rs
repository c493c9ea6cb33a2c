use super::filters::*;
use crate::{error::Result, renderer::interface::TemplateRenderer};
use minijinja::{AutoEscape, Environment};
use serde_json::json;

/// MiniJinja-based template rendering engine.
pub struct MiniJinjaRenderer {
    /// MiniJinja environment instance
    env: Environment<'static>,
    /// Default context that will be merged with any provided context
    default_context: serde_json::Value,
}

impl MiniJinjaRenderer {
    /// Creates a new MiniJinjaRenderer instance with default environment.
    pub fn new() -> Self {
        let mut env = Environment::new();
        env.set_auto_escape_callback(|_| AutoEscape::None);
        let default_context = json!({
            "platform": {
                "os": std::env::consts::OS,
                "family": std::env::consts::FAMILY,
                "arch": std::env::consts::ARCH,
            }
        });

        env.add_filter("regex", regex_filter);
        env.add_filter("split_answer", split_filter);

        Self { env, default_context }
    }

    /// Merges the default context with the provided one. Keys of the provided
    /// context win.
    fn merge_context(&self, context: &serde_json::Value) -> serde_json::Value {
        if let (Some(default_obj), Some(context_obj)) =
            (self.default_context.as_object(), context.as_object())
        {
            let mut result = default_obj.clone();
            for (key, value) in context_obj {
                result.insert(key.clone(), value.clone());
            }
            json!(result)
        } else {
            // If either isn't an object, just use the provided context
            context.clone()
        }
    }
}

impl Default for MiniJinjaRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for MiniJinjaRenderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MiniJinjaRenderer").finish_non_exhaustive()
    }
}

impl TemplateRenderer for MiniJinjaRenderer {
    fn render(
        &self,
        template: &str,
        context: &serde_json::Value,
        template_name: Option<&str>,
    ) -> Result<String> {
        // Plain labels are by far the common case.
        if !template.contains("{{") && !template.contains("{%") {
            return Ok(template.to_string());
        }
        let name = template_name.unwrap_or("temp");
        Ok(self.env.render_named_str(name, template, self.merge_context(context))?)
    }

    fn execute_expression(
        &self,
        expr_str: &str,
        context: &serde_json::Value,
    ) -> Result<bool> {
        // Only compile the expression if it's not empty
        if expr_str.trim().is_empty() {
            return Ok(true);
        }
        let expr = self.env.compile_expression(expr_str)?;
        Ok(expr.eval(self.merge_context(context))?.is_true())
    }
}
