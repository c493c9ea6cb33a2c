use super::{PromptState, Step};
use crate::{
    constants::messages,
    error::{Error, Result},
    prompt::interface::{confirm_default_is_yes, resolve_confirm, BindingContext, PromptRequest},
    terminal::Key,
};

/// Yes/no question answered by typing and pressing Enter.
pub(crate) struct ConfirmPrompt<'a> {
    request: &'a PromptRequest,
    buffer: String,
    error: Option<String>,
}

impl<'a> ConfirmPrompt<'a> {
    pub(crate) fn new(request: &'a PromptRequest) -> Self {
        Self { request, buffer: String::new(), error: None }
    }

    fn prefix(&self) -> String {
        let hint = if confirm_default_is_yes(&self.request.default) {
            messages::CONFIRM_HINT_YES
        } else {
            messages::CONFIRM_HINT_NO
        };
        format!("{} {hint}: ", self.request.label)
    }

    fn submit(&mut self) -> Step {
        let checked = resolve_confirm(&self.buffer, &self.request.default)
            .ok_or_else(|| messages::CONFIRM_INVALID.to_string())
            .and_then(|answer| self.request.check(&answer).map(|()| answer));
        match checked {
            Ok(answer) => Step::Submit(answer),
            Err(message) => {
                self.buffer.clear();
                self.error = Some(message);
                Step::Continue
            }
        }
    }
}

impl PromptState for ConfirmPrompt<'_> {
    fn lines(&self) -> Vec<String> {
        let theme = &self.request.theme;
        let mut lines = vec![format!("{}{}", (theme.label)(&self.prefix()), self.buffer)];
        if let Some(error) = &self.error {
            lines.push((theme.error)(error));
        }
        lines
    }

    fn cursor(&self) -> Option<(usize, usize)> {
        Some((0, self.prefix().chars().count() + self.buffer.chars().count()))
    }

    fn binding_context(&mut self) -> BindingContext<'_> {
        BindingContext::new(&mut self.buffer, None)
    }

    fn handle(&mut self, key: Key) -> Result<Step> {
        match key {
            Key::CtrlC | Key::Escape => return Err(Error::Cancelled),
            Key::Enter => return Ok(self.submit()),
            Key::Char(c) => self.buffer.push(c),
            Key::Backspace => {
                self.buffer.pop();
            }
            _ => {}
        }
        Ok(Step::Continue)
    }
}
