//! Basic types and enums for survey definitions

use crate::{
    constants::{validation, END_TARGET},
    prompt::SelectOption,
    survey::Branch,
};
use serde::Deserialize;

/// Type of question to be presented to the user
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Type {
    /// String input question type
    #[default]
    Str,
    /// Boolean (yes/no) question type
    Bool,
}

/// One entry of `choices`: a bare label or a label with value and description.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum Choice {
    Label(String),
    Detailed {
        label: String,
        #[serde(default)]
        value: String,
        #[serde(default)]
        description: Option<String>,
    },
}

impl From<&Choice> for SelectOption {
    fn from(choice: &Choice) -> Self {
        match choice {
            Choice::Label(label) => SelectOption::new(label.as_str(), ""),
            Choice::Detailed { label, value, description } => SelectOption {
                label: label.clone(),
                value: value.clone(),
                description: description.clone(),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Validation {
    #[serde(default = "get_default_condition")]
    pub condition: String,
    #[serde(default = "get_default_error_message")]
    pub error_message: String,
}

/// Where a branch leads: one question id, several ids asked in listed order,
/// or `@end`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum Target {
    One(String),
    Many(Vec<String>),
}

impl Target {
    /// Every question id named by this target.
    pub fn ids(&self) -> Vec<&str> {
        match self {
            Target::One(id) if id == END_TARGET => Vec::new(),
            Target::One(id) => vec![id.as_str()],
            Target::Many(ids) => ids.iter().map(String::as_str).collect(),
        }
    }

    pub fn to_branch(&self) -> Branch {
        match self {
            Target::One(id) if id == END_TARGET => Branch::End,
            Target::One(id) => Branch::push(id.as_str()),
            Target::Many(ids) => {
                let ids = ids.clone();
                // The stack is LIFO, so push in reverse to ask in listed order.
                Branch::handler(move |state, _| {
                    for id in ids.iter().rev() {
                        state.push(id)?;
                    }
                    Ok(())
                })
            }
        }
    }
}

fn get_default_error_message() -> String {
    validation::INVALID_ANSWER.to_string()
}

pub fn get_default_condition() -> String {
    validation::DEFAULT_CONDITION.to_string()
}
