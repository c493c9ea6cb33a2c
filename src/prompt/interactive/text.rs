use super::{PromptState, Step};
use crate::{
    error::{Error, Result},
    prompt::interface::{suggestion, BindingContext, PromptRequest},
    terminal::Key,
};

/// Free text entry with an inline default suggestion.
pub(crate) struct TextPrompt<'a> {
    request: &'a PromptRequest,
    buffer: String,
    error: Option<String>,
}

impl<'a> TextPrompt<'a> {
    pub(crate) fn new(request: &'a PromptRequest) -> Self {
        Self { request, buffer: String::new(), error: None }
    }

    fn prefix(&self) -> String {
        format!("{}: ", self.request.label)
    }

    fn suggestion(&self) -> &'a str {
        if self.request.no_default_placeholder {
            return "";
        }
        suggestion(&self.request.default, &self.buffer)
    }

    fn submit(&mut self) -> Step {
        let answer = if self.buffer.is_empty() {
            self.request.default.clone()
        } else {
            self.buffer.clone()
        };
        match self.request.check(&answer) {
            Ok(()) => Step::Submit(answer),
            Err(message) => {
                log::debug!("rejected answer for {:?}: {message}", self.request.label);
                self.buffer.clear();
                self.error = Some(message);
                Step::Continue
            }
        }
    }
}

impl PromptState for TextPrompt<'_> {
    fn lines(&self) -> Vec<String> {
        let theme = &self.request.theme;
        let mut first = (theme.label)(&self.prefix());
        first.push_str(&self.buffer);
        let rest = self.suggestion();
        if !rest.is_empty() {
            first.push_str(&(theme.suggestion)(rest));
        }

        let mut lines = vec![first];
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
            Key::Space => self.buffer.push(' '),
            Key::Backspace => {
                self.buffer.pop();
            }
            Key::Tab => {
                if !self.request.default.is_empty() {
                    self.buffer = self.request.default.clone();
                }
            }
            _ => {}
        }
        Ok(Step::Continue)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prompt::interactive::tests::run;
    use crate::prompt::interface::{Action, Command, KeyBinding};

    fn feed(prompt: &mut TextPrompt<'_>, keys: &[Key]) -> Step {
        let mut last = Step::Continue;
        for key in keys {
            last = prompt.handle(*key).unwrap();
        }
        last
    }

    #[test]
    fn typed_text_is_submitted() {
        let request = PromptRequest::new("Name");
        assert_eq!(run(&request, b"Ada\r").0.unwrap(), "Ada");
    }

    #[test]
    fn empty_enter_returns_default() {
        let request = PromptRequest::new("Name").with_default("world");
        assert_eq!(run(&request, b"\r").0.unwrap(), "world");
    }

    #[test]
    fn tab_completes_to_default() {
        let request = PromptRequest::new("Name").with_default("world");
        assert_eq!(run(&request, b"wo\t\r").0.unwrap(), "world");
    }

    #[test]
    fn backspace_removes_whole_characters() {
        let request = PromptRequest::new("Name");
        let input = "héé\x7f\r".as_bytes();
        assert_eq!(run(&request, input).0.unwrap(), "hé");
    }

    #[test]
    fn suggestion_tracks_the_buffer() {
        let request = PromptRequest::new("Greeting").with_default("hello");
        let mut prompt = TextPrompt::new(&request);
        assert_eq!(prompt.lines(), vec!["Greeting: hello"]);
        feed(&mut prompt, &[Key::Char('h'), Key::Char('e')]);
        assert_eq!(prompt.suggestion(), "llo");
        feed(&mut prompt, &[Key::Char('x')]);
        assert_eq!(prompt.suggestion(), "");
        assert_eq!(prompt.lines(), vec!["Greeting: hex"]);
    }

    #[test]
    fn placeholder_can_be_suppressed() {
        let request =
            PromptRequest::new("Greeting").with_default("hello").without_default_placeholder();
        let prompt = TextPrompt::new(&request);
        assert_eq!(prompt.lines(), vec!["Greeting: "]);
        assert_eq!(run(&request, b"\r").0.unwrap(), "hello");
    }

    #[test]
    fn cursor_column_counts_characters() {
        let request = PromptRequest::new("名前");
        let mut prompt = TextPrompt::new(&request);
        feed(&mut prompt, &[Key::Char('日'), Key::Char('本')]);
        assert_eq!(prompt.cursor(), Some((0, 6)));
    }

    #[test]
    fn failed_validation_clears_and_shows_error() {
        let request = PromptRequest::new("Age").with_validator(|answer| {
            answer.parse::<u32>().map(|_| ()).map_err(|_| "Not a number".to_string())
        });
        let mut prompt = TextPrompt::new(&request);
        let step = feed(&mut prompt, &[Key::Char('x'), Key::Enter]);
        assert_eq!(step, Step::Continue);
        assert_eq!(prompt.lines(), vec!["Age: ", "Not a number"]);

        let (result, out) = run(&request, b"x\r42\r");
        assert_eq!(result.unwrap(), "42");
        assert!(out.contains("Not a number"));
    }

    #[test]
    fn escape_and_ctrl_c_cancel() {
        let request = PromptRequest::new("Name");
        assert!(matches!(run(&request, b"a\x1b").0, Err(Error::Cancelled)));
        assert!(matches!(run(&request, &[0x03]).0, Err(Error::Cancelled)));
    }

    #[test]
    fn tab_binding_can_replace_input() {
        let binding = KeyBinding::new(Command::Tab, "shout").on(|ctx| {
            let loud = ctx.input().to_uppercase();
            ctx.set_input(loud);
            Action::Continue
        });
        let request = PromptRequest::new("Name").with_default("zzz").with_binding(binding);
        assert_eq!(run(&request, b"ada\t\r").0.unwrap(), "ADA");
    }

    #[test]
    fn inactive_enter_binding_blocks_submit() {
        let binding = KeyBinding::new(Command::Enter, "locked")
            .when(|_| false)
            .on(|_| Action::Continue);
        let request = PromptRequest::new("Code").with_binding(binding);
        let (result, _) = run(&request, b"abc\r\x1b");
        assert!(matches!(result, Err(Error::Cancelled)));
    }

    #[test]
    fn enter_binding_without_handler_still_submits() {
        let binding = KeyBinding::new(Command::Enter, "submit");
        let request = PromptRequest::new("Code").with_binding(binding);
        assert_eq!(run(&request, b"abc\r").0.unwrap(), "abc");
    }
}
