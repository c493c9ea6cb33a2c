use crate::error::Result;
use log::warn;

/// Renders question text and evaluates validation conditions against the
/// answers given so far.
pub trait TemplateRenderer {
    /// Renders `template` with `context`, usually the answers keyed by
    /// question id.
    ///
    /// `template_name` only shows up in error messages.
    fn render(
        &self,
        template: &str,
        context: &serde_json::Value,
        template_name: Option<&str>,
    ) -> Result<String>;

    /// Whether `expr` is truthy in `context`. An empty expression is true.
    fn execute_expression(&self, expr: &str, context: &serde_json::Value) -> Result<bool>;

    /// Like [`render`](Self::render), but a broken template is logged and
    /// returned as written so the question can still be asked.
    fn render_or_keep(&self, template: &str, context: &serde_json::Value, name: &str) -> String {
        match self.render(template, context, Some(name)) {
            Ok(rendered) => rendered,
            Err(err) => {
                warn!("could not render '{template}' for '{name}': {err}");
                template.to_string()
            }
        }
    }
}
