//! Pure interfaces for prompting
//!
//! This module defines the request a caller hands to a [`super::Prompter`]:
//! the label, default, options, validation hook, styling hook and key map.
//! Nothing here touches a terminal.

use crate::{
    constants::{BACK_ANSWER, DEFAULT_CONTINUE_TEXT},
    error::Error,
    terminal::Key,
};
use std::fmt;
use std::rc::Rc;

/// Caller-supplied validation. `Err` carries the message shown to the user.
pub type Validator = Rc<dyn Fn(&str) -> Result<(), String>>;

/// Opaque text transform used for styling.
pub type Style = Rc<dyn Fn(&str) -> String>;

/// Kind of prompt a request renders as
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptKind {
    Text,
    Select,
    MultiSelect,
    Confirm,
}

/// One entry of a select or multi-select prompt.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SelectOption {
    pub label: String,
    pub value: String,
    pub description: Option<String>,
}

impl SelectOption {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self { label: label.into(), value: value.into(), description: None }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// The text reported when this option is chosen: the value, or the label
    /// when the value is empty.
    pub fn answer(&self) -> &str {
        if self.value.is_empty() {
            &self.label
        } else {
            &self.value
        }
    }
}

impl From<&str> for SelectOption {
    fn from(label: &str) -> Self {
        Self::new(label, "")
    }
}

/// Styling hooks applied to the pieces of a rendered prompt.
#[derive(Clone)]
pub struct Theme {
    pub label: Style,
    pub suggestion: Style,
    pub selected: Style,
    pub answer: Style,
    pub error: Style,
}

impl Theme {
    /// No styling at all.
    pub fn plain() -> Self {
        let identity: Style = Rc::new(|s: &str| s.to_string());
        Self {
            label: identity.clone(),
            suggestion: identity.clone(),
            selected: identity.clone(),
            answer: identity.clone(),
            error: identity,
        }
    }

    /// ANSI colours for terminals.
    pub fn colored() -> Self {
        use crossterm::style::Stylize;
        Self {
            label: Rc::new(|s: &str| s.bold().to_string()),
            suggestion: Rc::new(|s: &str| s.dark_grey().to_string()),
            selected: Rc::new(|s: &str| s.cyan().to_string()),
            answer: Rc::new(|s: &str| s.green().to_string()),
            error: Rc::new(|s: &str| s.red().to_string()),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::plain()
    }
}

impl fmt::Debug for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Theme").finish_non_exhaustive()
    }
}

/// Keys a binding can be attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Escape,
    Tab,
    Enter,
    /// Function key by number, `Function(12)` is F12.
    Function(u8),
}

impl Command {
    pub fn matches(&self, key: Key) -> bool {
        match (self, key) {
            (Command::Escape, Key::Escape)
            | (Command::Tab, Key::Tab)
            | (Command::Enter, Key::Enter) => true,
            (Command::Function(n), Key::F(m)) => *n == m,
            _ => false,
        }
    }
}

/// What a binding handler wants to happen next.
#[derive(Debug)]
pub enum Action {
    /// Keep prompting.
    Continue,
    /// Abort the prompt call with the given error.
    Exit(Error),
}

/// State handed to binding handlers.
pub struct BindingContext<'a> {
    input: &'a mut String,
    selected: Option<usize>,
}

impl<'a> BindingContext<'a> {
    pub(crate) fn new(input: &'a mut String, selected: Option<usize>) -> Self {
        Self { input, selected }
    }

    /// The text typed so far.
    pub fn input(&self) -> &str {
        self.input.as_str()
    }

    /// Replace the text typed so far.
    pub fn set_input(&mut self, value: impl Into<String>) {
        *self.input = value.into();
    }

    /// Highlighted option of a select or multi-select prompt.
    pub fn selected(&self) -> Option<usize> {
        self.selected
    }
}

pub type BindingHandler = Rc<dyn Fn(&mut BindingContext<'_>) -> Action>;
pub type BindingActive = Rc<dyn Fn(&BindingContext<'_>) -> bool>;

/// A key binding consulted before a prompt's default key handling.
#[derive(Clone)]
pub struct KeyBinding {
    pub command: Command,
    pub description: String,
    pub handler: Option<BindingHandler>,
    pub active: Option<BindingActive>,
}

impl KeyBinding {
    pub fn new(command: Command, description: impl Into<String>) -> Self {
        Self { command, description: description.into(), handler: None, active: None }
    }

    pub fn on<F>(mut self, handler: F) -> Self
    where
        F: Fn(&mut BindingContext<'_>) -> Action + 'static,
    {
        self.handler = Some(Rc::new(handler));
        self
    }

    pub fn when<F>(mut self, active: F) -> Self
    where
        F: Fn(&BindingContext<'_>) -> bool + 'static,
    {
        self.active = Some(Rc::new(active));
        self
    }

    fn is_active(&self, context: &BindingContext<'_>) -> bool {
        self.active.as_ref().map_or(true, |active| active(context))
    }
}

impl fmt::Debug for KeyBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyBinding")
            .field("command", &self.command)
            .field("description", &self.description)
            .field("handler", &self.handler.is_some())
            .field("active", &self.active.is_some())
            .finish()
    }
}

/// Result of offering a key to a key map.
#[derive(Debug)]
pub(crate) enum Dispatch {
    /// No binding with a handler claimed the key.
    Unbound,
    /// A binding consumed the key.
    Handled,
    /// A binding aborted the prompt.
    Exit(Error),
}

/// Offers `key` to the first binding whose command matches it.
///
/// An inactive binding swallows the key. A binding without a handler leaves
/// the key to the prompt's default handling.
pub(crate) fn dispatch_binding(
    key_map: &[KeyBinding],
    key: Key,
    context: &mut BindingContext<'_>,
) -> Dispatch {
    let Some(binding) = key_map.iter().find(|b| b.command.matches(key)) else {
        return Dispatch::Unbound;
    };
    if !binding.is_active(context) {
        return Dispatch::Handled;
    }
    match &binding.handler {
        None => Dispatch::Unbound,
        Some(handler) => match handler(context) {
            Action::Continue => Dispatch::Handled,
            Action::Exit(err) => Dispatch::Exit(err),
        },
    }
}

/// Everything needed to ask one question.
#[derive(Clone, Default)]
pub struct PromptRequest {
    pub label: String,
    pub default: String,
    pub options: Vec<SelectOption>,
    pub multi_select: bool,
    pub confirm: bool,
    pub continue_text: String,
    pub validate: Option<Validator>,
    pub theme: Theme,
    pub key_map: Vec<KeyBinding>,
    pub no_default_placeholder: bool,
}

impl PromptRequest {
    pub fn new(label: impl Into<String>) -> Self {
        Self { label: label.into(), ..Default::default() }
    }

    pub fn with_default(mut self, default: impl Into<String>) -> Self {
        self.default = default.into();
        self
    }

    pub fn with_options<I, O>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = O>,
        O: Into<SelectOption>,
    {
        self.options = options.into_iter().map(Into::into).collect();
        self
    }

    pub fn multi_select(mut self) -> Self {
        self.multi_select = true;
        self
    }

    pub fn confirm(mut self) -> Self {
        self.confirm = true;
        self
    }

    pub fn with_continue_text(mut self, text: impl Into<String>) -> Self {
        self.continue_text = text.into();
        self
    }

    pub fn with_validator<F>(mut self, validate: F) -> Self
    where
        F: Fn(&str) -> Result<(), String> + 'static,
    {
        self.validate = Some(Rc::new(validate));
        self
    }

    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    pub fn with_binding(mut self, binding: KeyBinding) -> Self {
        self.key_map.push(binding);
        self
    }

    pub fn without_default_placeholder(mut self) -> Self {
        self.no_default_placeholder = true;
        self
    }

    pub fn kind(&self) -> PromptKind {
        match (self.confirm, self.options.is_empty(), self.multi_select) {
            (true, _, _) => PromptKind::Confirm,
            (false, true, _) => PromptKind::Text,
            (false, false, true) => PromptKind::MultiSelect,
            (false, false, false) => PromptKind::Select,
        }
    }

    /// Runs the validator, if any.
    pub fn check(&self, answer: &str) -> Result<(), String> {
        match &self.validate {
            Some(validate) => validate(answer),
            None => Ok(()),
        }
    }

    pub fn continue_label(&self) -> &str {
        if self.continue_text.is_empty() {
            DEFAULT_CONTINUE_TEXT
        } else {
            &self.continue_text
        }
    }

    /// Index of the option named by the default, if any.
    pub(crate) fn default_index(&self) -> Option<usize> {
        if self.default.is_empty() {
            return None;
        }
        self.options
            .iter()
            .position(|o| o.answer() == self.default || o.label == self.default)
    }

    /// Options preselected by a comma-separated default.
    pub(crate) fn default_selection(&self) -> Vec<bool> {
        let wanted: Vec<&str> =
            self.default.split(',').map(str::trim).filter(|s| !s.is_empty()).collect();
        self.options
            .iter()
            .map(|o| wanted.iter().any(|w| *w == o.answer() || *w == o.label))
            .collect()
    }
}

impl fmt::Debug for PromptRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PromptRequest")
            .field("label", &self.label)
            .field("default", &self.default)
            .field("options", &self.options)
            .field("multi_select", &self.multi_select)
            .field("confirm", &self.confirm)
            .field("continue_text", &self.continue_text)
            .field("validate", &self.validate.is_some())
            .field("key_map", &self.key_map)
            .field("no_default_placeholder", &self.no_default_placeholder)
            .finish()
    }
}

/// Suffix of `default` still to be typed when `input` is a strict prefix of it.
pub fn suggestion<'a>(default: &'a str, input: &str) -> &'a str {
    if default.len() > input.len() && default.starts_with(input) {
        &default[input.len()..]
    } else {
        ""
    }
}

/// Whether a confirm default means "yes". Anything but `n`/`no` does.
pub(crate) fn confirm_default_is_yes(default: &str) -> bool {
    !matches!(default.trim().to_lowercase().as_str(), "n" | "no")
}

/// Normalises a confirm answer to `"y"`, `"n"` or a verbatim `back`.
///
/// `None` means the input is not an answer and the prompt should repeat.
pub(crate) fn resolve_confirm(input: &str, default: &str) -> Option<String> {
    let input = input.trim();
    if input.is_empty() {
        let answer = if confirm_default_is_yes(default) { "y" } else { "n" };
        return Some(answer.to_string());
    }
    match input.to_lowercase().as_str() {
        "y" | "yes" => Some("y".to_string()),
        "n" | "no" => Some("n".to_string()),
        BACK_ANSWER => Some(input.to_string()),
        _ => None,
    }
}

/// One numbered option row, as listed by both prompt engines.
pub(crate) fn option_row(number: usize, option: &SelectOption) -> String {
    match &option.description {
        Some(description) => format!("{number}. {} - {description}", option.label),
        None => format!("{number}. {}", option.label),
    }
}

/// Selected options' answers joined in option order.
pub(crate) fn join_selection(options: &[SelectOption], selected: &[bool]) -> String {
    options
        .iter()
        .zip(selected)
        .filter(|(_, on)| **on)
        .map(|(o, _)| o.answer())
        .collect::<Vec<_>>()
        .join(",")
}
