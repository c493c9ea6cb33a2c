use super::{PromptState, Step};
use crate::{
    error::{Error, Result},
    prompt::interface::{join_selection, option_row, BindingContext, PromptRequest},
    terminal::Key,
};

/// Any number of choices, submitted from a trailing continue row.
pub(crate) struct MultiSelectPrompt<'a> {
    request: &'a PromptRequest,
    /// Focused row; `options.len()` is the continue row.
    focus: usize,
    selected: Vec<bool>,
    scratch: String,
    error: Option<String>,
}

impl<'a> MultiSelectPrompt<'a> {
    pub(crate) fn new(request: &'a PromptRequest) -> Result<Self> {
        if request.options.is_empty() {
            return Err(Error::ConfigurationError(format!(
                "multi-select prompt '{}' has no options",
                request.label
            )));
        }
        Ok(Self {
            request,
            focus: 0,
            selected: request.default_selection(),
            scratch: String::new(),
            error: None,
        })
    }

    fn rows(&self) -> usize {
        self.request.options.len() + 1
    }

    fn on_continue_row(&self) -> bool {
        self.focus == self.request.options.len()
    }

    fn toggle(&mut self, index: usize) {
        self.selected[index] = !self.selected[index];
        self.error = None;
    }

    fn activate(&mut self) -> Step {
        if !self.on_continue_row() {
            self.toggle(self.focus);
            return Step::Continue;
        }
        if !self.selected.contains(&true) {
            return Step::Continue;
        }
        let answer = join_selection(&self.request.options, &self.selected);
        match self.request.check(&answer) {
            Ok(()) => Step::Submit(answer),
            Err(message) => {
                self.error = Some(message);
                Step::Continue
            }
        }
    }
}

impl PromptState for MultiSelectPrompt<'_> {
    fn lines(&self) -> Vec<String> {
        let theme = &self.request.theme;
        let mut lines = vec![(theme.label)(&format!("{}:", self.request.label))];
        for (i, option) in self.request.options.iter().enumerate() {
            let mark = if self.selected[i] { "[x]" } else { "[ ]" };
            let row = format!("{mark} {}", option_row(i + 1, option));
            if i == self.focus {
                lines.push((theme.selected)(&format!("> {row}")));
            } else {
                lines.push(format!("  {row}"));
            }
        }
        let continue_row = self.request.continue_label();
        if self.on_continue_row() {
            lines.push((theme.selected)(&format!("> {continue_row}")));
        } else {
            lines.push(format!("  {continue_row}"));
        }
        if let Some(error) = &self.error {
            lines.push((theme.error)(error));
        }
        lines
    }

    fn binding_context(&mut self) -> BindingContext<'_> {
        let focus = (!self.on_continue_row()).then_some(self.focus);
        BindingContext::new(&mut self.scratch, focus)
    }

    fn handle(&mut self, key: Key) -> Result<Step> {
        let rows = self.rows();
        match key {
            Key::CtrlC | Key::Escape => return Err(Error::Cancelled),
            Key::Enter | Key::Space => return Ok(self.activate()),
            Key::Up => self.focus = (self.focus + rows - 1) % rows,
            Key::Down => self.focus = (self.focus + 1) % rows,
            Key::Home => self.focus = 0,
            Key::End => self.focus = rows - 1,
            _ => {
                if let Some(digit) = key.digit().filter(|d| *d <= self.request.options.len()) {
                    self.toggle(digit - 1);
                }
            }
        }
        Ok(Step::Continue)
    }
}
