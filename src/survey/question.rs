//! Questions and the branches taken after they are answered.

use super::SurveyState;
use crate::{error::Result, prompt::PromptRequest};
use indexmap::IndexMap;
use std::fmt;
use std::rc::Rc;

/// Handler run as a branch. It may push questions or clear the stack.
pub type BranchHandler = Rc<dyn Fn(&mut SurveyState, &str) -> Result<()>>;

/// What happens after a question is answered.
#[derive(Clone)]
pub enum Branch {
    /// Ask the question with this id next.
    Push(String),
    /// Run a handler against the survey state.
    Handler(BranchHandler),
    /// Drop every pending question.
    End,
}

impl Branch {
    pub fn push(id: impl Into<String>) -> Self {
        Branch::Push(id.into())
    }

    pub fn handler<F>(handler: F) -> Self
    where
        F: Fn(&mut SurveyState, &str) -> Result<()> + 'static,
    {
        Branch::Handler(Rc::new(handler))
    }

    pub fn execute(&self, answer: &str, state: &mut SurveyState) -> Result<()> {
        match self {
            Branch::Push(id) => state.push(id),
            Branch::Handler(handler) => handler(state, answer),
            Branch::End => {
                state.clear();
                Ok(())
            }
        }
    }
}

impl fmt::Debug for Branch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Branch::Push(id) => f.debug_tuple("Push").field(id).finish(),
            Branch::Handler(_) => f.write_str("Handler(..)"),
            Branch::End => f.write_str("End"),
        }
    }
}

/// A template expression the answer must satisfy.
///
/// Evaluated by the survey's renderer with `value` bound to the answer and
/// every earlier answer bound by question id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Validation {
    pub condition: String,
    pub error_message: String,
}

/// One question of a survey.
#[derive(Debug, Clone)]
pub struct Question {
    pub id: String,
    pub request: PromptRequest,
    /// Keyed by the literal answer; `""` is taken when nothing else matches.
    pub branches: IndexMap<String, Branch>,
    pub validation: Option<Validation>,
}

impl Question {
    pub fn new(id: impl Into<String>, request: PromptRequest) -> Self {
        Self { id: id.into(), request, branches: IndexMap::new(), validation: None }
    }

    pub fn branch(mut self, answer: impl Into<String>, branch: Branch) -> Self {
        self.branches.insert(answer.into(), branch);
        self
    }

    /// Branch taken for any answer without a branch of its own.
    pub fn default_branch(self, branch: Branch) -> Self {
        self.branch("", branch)
    }

    /// Shorthand for a default branch pushing `id`.
    pub fn then(self, id: impl Into<String>) -> Self {
        self.default_branch(Branch::push(id))
    }

    pub fn with_validation(
        mut self,
        condition: impl Into<String>,
        error_message: impl Into<String>,
    ) -> Self {
        self.validation =
            Some(Validation { condition: condition.into(), error_message: error_message.into() });
        self
    }

    /// The branch for `answer`: an exact match, else the default branch.
    pub fn resolve(&self, answer: &str) -> Option<&Branch> {
        self.branches.get(answer).or_else(|| self.branches.get(""))
    }
}
