//! Branching, undoable surveys
//!
//! A [`Survey`] keeps a LIFO stack of pending questions. Each run step pops
//! the most recently pushed question, asks it, records the answer and then
//! executes the branch for that answer. Branches push more questions, so the
//! survey walks its questions depth first.
//!
//! With undo enabled every answer is mirrored in a history together with the
//! stack as it was when the question was asked. A `back` answer, or an
//! Escape/F12 press in interactive mode, rolls the last entry back and asks
//! that question again.

use crate::{
    constants::{messages, BACK_ANSWER},
    error::{Error, Result},
    prompt::{Action, Command, KeyBinding, PromptRequest, Prompter, Theme},
    renderer::TemplateRenderer,
};
use indexmap::IndexMap;
use log::{debug, warn};
use serde_json::json;
use std::rc::Rc;

mod question;

pub use question::{Branch, BranchHandler, Question, Validation};

/// One recorded answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Answer {
    pub id: String,
    /// The label as it was shown.
    pub label: String,
    pub value: String,
}

#[derive(Debug, Clone)]
struct HistoryEntry {
    question: Rc<Question>,
    /// The pending stack right after `question` was popped.
    stack: Vec<Rc<Question>>,
}

/// The mutable part of a survey, handed to branch handlers.
#[derive(Debug, Default)]
pub struct SurveyState {
    registry: IndexMap<String, Rc<Question>>,
    stack: Vec<Rc<Question>>,
    answers: Vec<Answer>,
    history: Vec<HistoryEntry>,
}

impl SurveyState {
    /// Push a registered question onto the stack. It is asked before anything
    /// pushed earlier.
    pub fn push(&mut self, id: &str) -> Result<()> {
        let question = self
            .registry
            .get(id)
            .cloned()
            .ok_or_else(|| Error::UnknownQuestion(id.to_string()))?;
        debug!("pushing question '{id}'");
        self.stack.push(question);
        Ok(())
    }

    /// Drop every pending question.
    pub fn clear(&mut self) {
        debug!("clearing {} pending question(s)", self.stack.len());
        self.stack.clear();
    }

    pub fn answers(&self) -> &[Answer] {
        &self.answers
    }

    /// The latest answer recorded for `id`.
    pub fn answer(&self, id: &str) -> Option<&str> {
        self.answers.iter().rev().find(|a| a.id == id).map(|a| a.value.as_str())
    }

    /// Ids of the pending questions, next to be asked first.
    pub fn pending(&self) -> Vec<&str> {
        self.stack.iter().rev().map(|q| q.id.as_str()).collect()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.registry.contains_key(id)
    }

    /// Answers by question id, later answers replacing earlier ones.
    fn context(&self) -> serde_json::Value {
        let mut map = serde_json::Map::new();
        for answer in &self.answers {
            map.insert(answer.id.clone(), json!(answer.value));
        }
        serde_json::Value::Object(map)
    }

    /// Rolls back the most recent answer. Returns false when there is nothing
    /// to roll back.
    fn undo_step(&mut self) -> bool {
        let Some(entry) = self.history.pop() else {
            return false;
        };
        debug!("undoing answer to '{}'", entry.question.id);
        self.stack = entry.stack;
        self.stack.push(entry.question);
        self.answers.truncate(self.history.len());
        true
    }
}

/// A set of questions asked through a [`Prompter`].
pub struct Survey<P> {
    prompter: P,
    state: SurveyState,
    undo: bool,
    end_card: bool,
    theme: Theme,
    renderer: Option<Rc<dyn TemplateRenderer>>,
}

impl<P: Prompter> Survey<P> {
    /// A survey with undo on and the end card off.
    pub fn new(prompter: P) -> Self {
        Self {
            prompter,
            state: SurveyState::default(),
            undo: true,
            end_card: false,
            theme: Theme::default(),
            renderer: None,
        }
    }

    pub fn with_undo(mut self, undo: bool) -> Self {
        self.undo = undo;
        self
    }

    pub fn with_end_card(mut self, end_card: bool) -> Self {
        self.end_card = end_card;
        self
    }

    /// Theme for the end card. Questions keep their own.
    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    /// Render labels, defaults and validation expressions with `renderer`.
    pub fn with_renderer(mut self, renderer: Rc<dyn TemplateRenderer>) -> Self {
        self.renderer = Some(renderer);
        self
    }

    /// Register a question. A question with the same id is replaced.
    pub fn add_question(&mut self, question: Question) {
        if self.state.registry.contains_key(&question.id) {
            warn!("question '{}' registered twice, keeping the last one", question.id);
        }
        self.state.registry.insert(question.id.clone(), Rc::new(question));
    }

    pub fn with_question(mut self, question: Question) -> Self {
        self.add_question(question);
        self
    }

    /// Seed the stack with the first question.
    pub fn start(&mut self, id: &str) -> Result<()> {
        self.state.push(id)
    }

    pub fn state(&self) -> &SurveyState {
        &self.state
    }

    pub fn prompter(&self) -> &P {
        &self.prompter
    }

    pub fn into_prompter(self) -> P {
        self.prompter
    }

    /// Answer values in the order they were given.
    pub fn answers(&self) -> Vec<String> {
        self.state.answers.iter().map(|a| a.value.clone()).collect()
    }

    /// (question id, answer) pairs in the order they were given.
    pub fn answer_pairs(&self) -> Vec<(String, String)> {
        self.state.answers.iter().map(|a| (a.id.clone(), a.value.clone())).collect()
    }

    /// Asks questions until the stack is empty and the end card, if any, is
    /// accepted.
    ///
    /// # Errors
    ///
    /// Prompt errors other than the go-back signal, and branch errors.
    pub fn run(&mut self) -> Result<()> {
        loop {
            while let Some(question) = self.state.stack.pop() {
                self.ask(question)?;
            }
            if !self.end_card || !self.show_end_card()? {
                debug!("survey finished with {} answer(s)", self.state.answers.len());
                return Ok(());
            }
        }
    }

    fn ask(&mut self, question: Rc<Question>) -> Result<()> {
        let stack = self.state.stack.clone();
        let request = self.prepare(&question);
        debug!("asking '{}'", question.id);

        let answer = match self.prompter.prompt(&request) {
            Ok(answer) if self.undo && answer.eq_ignore_ascii_case(BACK_ANSWER) => {
                self.go_back(question);
                return Ok(());
            }
            Err(Error::GoBack) => {
                self.go_back(question);
                return Ok(());
            }
            result => result?,
        };

        debug!("'{}' answered with '{answer}'", question.id);
        self.state.answers.push(Answer {
            id: question.id.clone(),
            label: request.label.clone(),
            value: answer.clone(),
        });
        if self.undo {
            self.state.history.push(HistoryEntry { question: Rc::clone(&question), stack });
        }
        if let Some(branch) = question.resolve(&answer) {
            branch.execute(&answer, &mut self.state)?;
        }
        Ok(())
    }

    fn go_back(&mut self, current: Rc<Question>) {
        if !self.state.undo_step() {
            debug!("nothing to undo, asking '{}' again", current.id);
            self.state.stack.push(current);
        }
    }

    fn undo_bindings(&self) -> Vec<KeyBinding> {
        if !self.undo {
            return Vec::new();
        }
        [Command::Escape, Command::Function(12)]
            .into_iter()
            .map(|command| {
                KeyBinding::new(command, "go back").on(|_| Action::Exit(Error::GoBack))
            })
            .collect()
    }

    /// The request actually shown for `question`.
    fn prepare(&self, question: &Question) -> PromptRequest {
        let mut request = question.request.clone();
        request.key_map.extend(self.undo_bindings());

        let Some(renderer) = &self.renderer else {
            if question.validation.is_some() {
                warn!("question '{}' has a validation but no renderer", question.id);
            }
            return request;
        };
        let context = self.state.context();
        request.label = renderer.render_or_keep(&request.label, &context, &question.id);
        request.default = renderer.render_or_keep(&request.default, &context, &question.id);

        if let Some(validation) = &question.validation {
            let previous = request.validate.take();
            let renderer = Rc::clone(renderer);
            let validation = validation.clone();
            let undo = self.undo;
            request.validate = Some(Rc::new(move |value: &str| {
                if undo && value.eq_ignore_ascii_case(BACK_ANSWER) {
                    return Ok(());
                }
                if let Some(previous) = &previous {
                    previous(value)?;
                }
                let mut context = context.clone();
                if let Some(map) = context.as_object_mut() {
                    map.insert("value".to_string(), json!(value));
                }
                match renderer.execute_expression(&validation.condition, &context) {
                    Ok(true) => Ok(()),
                    Ok(false) => Err(validation.error_message.clone()),
                    Err(err) => {
                        warn!("validation '{}' failed: {err}", validation.condition);
                        Err(err.to_string())
                    }
                }
            }));
        }
        request
    }

    /// Prints the summary and asks whether to finish. Returns true when an
    /// answer was rolled back and the survey should resume.
    fn show_end_card(&mut self) -> Result<bool> {
        self.prompter.message(&(self.theme.label)(messages::END_CARD_TITLE))?;
        for answer in &self.state.answers {
            let line = format!(
                "  {}: {}",
                (self.theme.label)(&answer.label),
                (self.theme.answer)(&answer.value)
            );
            self.prompter.message(&line)?;
        }

        let mut request = PromptRequest::new(messages::END_CARD_QUESTION)
            .confirm()
            .with_theme(self.theme.clone());
        request.key_map.extend(self.undo_bindings());
        let reply = match self.prompter.prompt(&request) {
            Err(Error::GoBack) => BACK_ANSWER.to_string(),
            result => result?,
        };

        let wants_changes = matches!(reply.to_lowercase().as_str(), "n" | "no" | BACK_ANSWER);
        Ok(wants_changes && self.state.undo_step())
    }
}

impl<P: std::fmt::Debug> std::fmt::Debug for Survey<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Survey")
            .field("prompter", &self.prompter)
            .field("state", &self.state)
            .field("undo", &self.undo)
            .field("end_card", &self.end_card)
            .field("renderer", &self.renderer.is_some())
            .finish()
    }
}
