//! Question definitions as written in survey files

use crate::config::types::{Choice, Target, Type, Validation};
use crate::prompt::{PromptRequest, SelectOption, Theme};
use crate::survey::{Branch, Question};
use indexmap::IndexMap;
use serde::Deserialize;

/// Represents a single question in the configuration
#[derive(Debug, Clone, Deserialize)]
pub struct QuestionConfig {
    /// Help text/prompt to display to the user
    #[serde(default)]
    pub help: String,
    /// Type of the question (string or boolean)
    #[serde(rename = "type", default)]
    pub r#type: Type,
    /// Optional default value for the question
    #[serde(default)]
    pub default: serde_json::Value,
    /// Available choices for string questions
    #[serde(default)]
    pub choices: Vec<Choice>,
    /// Whether several choices may be picked
    #[serde(default)]
    pub multiselect: bool,
    /// Label of the row that submits a multi-select
    #[serde(default)]
    pub continue_text: Option<String>,
    #[serde(default)]
    pub validation: Option<Validation>,
    /// Shorthand for the `""` branch
    #[serde(default)]
    pub next: Option<Target>,
    #[serde(default)]
    pub branches: IndexMap<String, Target>,
}

impl QuestionConfig {
    /// The default as prompt text: booleans become `y`/`n` and lists are
    /// joined with commas.
    pub fn default_text(&self) -> String {
        match &self.default {
            serde_json::Value::Null => String::new(),
            serde_json::Value::String(s) => s.clone(),
            serde_json::Value::Bool(true) => "y".to_string(),
            serde_json::Value::Bool(false) => "n".to_string(),
            serde_json::Value::Array(items) => items
                .iter()
                .map(|item| match item {
                    serde_json::Value::String(s) => s.clone(),
                    other => other.to_string(),
                })
                .collect::<Vec<_>>()
                .join(","),
            other => other.to_string(),
        }
    }

    /// Every branch target, the `next` shorthand first.
    pub fn targets(&self) -> impl Iterator<Item = &Target> {
        self.next.iter().chain(self.branches.values())
    }

    pub fn into_question(&self, id: &str, theme: &Theme) -> Question {
        let label = if self.help.is_empty() { id } else { self.help.as_str() };
        let mut request = PromptRequest::new(label)
            .with_default(self.default_text())
            .with_theme(theme.clone());
        match self.r#type {
            Type::Bool => request = request.confirm(),
            Type::Str if !self.choices.is_empty() => {
                request = request.with_options(self.choices.iter().map(SelectOption::from));
                if self.multiselect {
                    request = request.multi_select();
                }
            }
            Type::Str => {}
        }
        if let Some(text) = &self.continue_text {
            request = request.with_continue_text(text.as_str());
        }

        let mut question = Question::new(id, request);
        if let Some(validation) = &self.validation {
            question = question
                .with_validation(validation.condition.as_str(), validation.error_message.as_str());
        }
        if let Some(next) = &self.next {
            question = question.default_branch(next.to_branch());
        }
        for (answer, target) in &self.branches {
            question = question.branch(answer.as_str(), target.to_branch());
        }
        question
    }
}
