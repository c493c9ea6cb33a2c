//! Prompter that answers from a script instead of a person
//!
//! Useful for automation, `--non-interactive` runs and tests. Replies are
//! consumed in order; once the script runs dry every prompt takes its default.

use super::{
    interface::{resolve_confirm, PromptKind, PromptRequest},
    Prompter,
};
use crate::error::{Error, Result};
use std::collections::{HashMap, VecDeque};

/// One scripted reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Answer(String),
    /// Behave as if the undo key was pressed.
    GoBack,
    /// Behave as if Ctrl-C was pressed.
    Cancel,
}

#[derive(Debug, Default)]
pub struct ScriptedPrompter {
    replies: VecDeque<Reply>,
    by_label: HashMap<String, String>,
    asked: Vec<String>,
    messages: Vec<String>,
}

impl ScriptedPrompter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue one answer.
    pub fn answer(mut self, answer: impl Into<String>) -> Self {
        self.replies.push_back(Reply::Answer(answer.into()));
        self
    }

    /// Queue several answers.
    pub fn answers<I, S>(mut self, answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.replies.extend(answers.into_iter().map(|a| Reply::Answer(a.into())));
        self
    }

    pub fn go_back(mut self) -> Self {
        self.replies.push_back(Reply::GoBack);
        self
    }

    pub fn cancel(mut self) -> Self {
        self.replies.push_back(Reply::Cancel);
        self
    }

    /// Answer a specific label whenever it is asked and the queue is empty.
    pub fn with_response(mut self, label: &str, answer: &str) -> Self {
        self.by_label.insert(label.to_string(), answer.to_string());
        self
    }

    /// Labels of every prompt asked so far, in order.
    pub fn asked(&self) -> &[String] {
        &self.asked
    }

    /// Every message printed so far.
    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    fn default_answer(request: &PromptRequest) -> String {
        match request.kind() {
            PromptKind::Confirm => {
                resolve_confirm("", &request.default).unwrap_or_else(|| "y".to_string())
            }
            PromptKind::Select if request.default_index().is_none() => {
                request.options.first().map(|o| o.answer().to_string()).unwrap_or_default()
            }
            _ => request.default.clone(),
        }
    }
}

impl Prompter for ScriptedPrompter {
    fn prompt(&mut self, request: &PromptRequest) -> Result<String> {
        self.asked.push(request.label.clone());
        let answer = match self.replies.pop_front() {
            Some(Reply::Answer(answer)) => answer,
            Some(Reply::GoBack) => return Err(Error::GoBack),
            Some(Reply::Cancel) => return Err(Error::Cancelled),
            None => match self.by_label.get(&request.label) {
                Some(answer) => answer.clone(),
                None => Self::default_answer(request),
            },
        };
        log::info!("auto-answering '{}' with '{answer}'", request.label);
        Ok(answer)
    }

    fn message(&mut self, text: &str) -> Result<()> {
        self.messages.push(text.to_string());
        Ok(())
    }
}
