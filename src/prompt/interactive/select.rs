use super::{PromptState, Step};
use crate::{
    error::{Error, Result},
    prompt::interface::{option_row, BindingContext, PromptRequest},
    terminal::Key,
};

/// Single choice from a list, moved through with the arrow keys.
pub(crate) struct SelectPrompt<'a> {
    request: &'a PromptRequest,
    index: usize,
    scratch: String,
    error: Option<String>,
}

impl<'a> SelectPrompt<'a> {
    pub(crate) fn new(request: &'a PromptRequest) -> Result<Self> {
        if request.options.is_empty() {
            return Err(Error::ConfigurationError(format!(
                "select prompt '{}' has no options",
                request.label
            )));
        }
        Ok(Self {
            request,
            index: request.default_index().unwrap_or(0),
            scratch: String::new(),
            error: None,
        })
    }

    fn len(&self) -> usize {
        self.request.options.len()
    }

    fn submit(&mut self) -> Step {
        let answer = self.request.options[self.index].answer().to_string();
        match self.request.check(&answer) {
            Ok(()) => Step::Submit(answer),
            Err(message) => {
                self.error = Some(message);
                Step::Continue
            }
        }
    }
}

impl PromptState for SelectPrompt<'_> {
    fn lines(&self) -> Vec<String> {
        let theme = &self.request.theme;
        let mut lines = vec![(theme.label)(&format!("{}:", self.request.label))];
        for (i, option) in self.request.options.iter().enumerate() {
            let row = option_row(i + 1, option);
            if i == self.index {
                lines.push((theme.selected)(&format!("> {row}")));
            } else {
                lines.push(format!("  {row}"));
            }
        }
        if let Some(error) = &self.error {
            lines.push((theme.error)(error));
        }
        lines
    }

    fn binding_context(&mut self) -> BindingContext<'_> {
        BindingContext::new(&mut self.scratch, Some(self.index))
    }

    fn handle(&mut self, key: Key) -> Result<Step> {
        let len = self.len();
        match key {
            Key::CtrlC | Key::Escape => return Err(Error::Cancelled),
            Key::Enter => return Ok(self.submit()),
            Key::Up => self.index = (self.index + len - 1) % len,
            Key::Down => self.index = (self.index + 1) % len,
            Key::Home => self.index = 0,
            Key::End => self.index = len - 1,
            _ => {
                if let Some(digit) = key.digit().filter(|d| *d <= len) {
                    self.index = digit - 1;
                    return Ok(self.submit());
                }
            }
        }
        Ok(Step::Continue)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prompt::interactive::tests::run;
    use crate::prompt::interface::SelectOption;

    fn fruit() -> PromptRequest {
        PromptRequest::new("Fruit").with_options([
            SelectOption::new("Apple", "apple"),
            SelectOption::new("Banana", "banana").with_description("yellow"),
            SelectOption::from("Cherry"),
        ])
    }

    #[test]
    fn enter_picks_highlighted_option() {
        assert_eq!(run(&fruit(), b"\r").0.unwrap(), "apple");
        assert_eq!(run(&fruit(), b"\x1b[B\r").0.unwrap(), "banana");
    }

    #[test]
    fn arrows_wrap_around() {
        assert_eq!(run(&fruit(), b"\x1b[A\r").0.unwrap(), "Cherry");
        assert_eq!(run(&fruit(), b"\x1b[B\x1b[B\x1b[B\r").0.unwrap(), "apple");
    }

    #[test]
    fn home_and_end_jump() {
        assert_eq!(run(&fruit(), b"\x1b[F\r").0.unwrap(), "Cherry");
        assert_eq!(run(&fruit(), b"\x1b[F\x1b[H\r").0.unwrap(), "apple");
    }

    #[test]
    fn digit_selects_and_submits() {
        assert_eq!(run(&fruit(), b"2").0.unwrap(), "banana");
        // Out of range digits are ignored.
        assert_eq!(run(&fruit(), b"9\r").0.unwrap(), "apple");
    }

    #[test]
    fn single_option_still_needs_enter() {
        let request = PromptRequest::new("Only").with_options(["one"]);
        let (result, _) = run(&request, b"");
        assert!(matches!(result, Err(Error::IoError(_))));
        assert_eq!(run(&request, b"\r").0.unwrap(), "one");
    }

    #[test]
    fn default_sets_initial_highlight() {
        let request = fruit().with_default("banana");
        assert_eq!(run(&request, b"\r").0.unwrap(), "banana");
        let request = fruit().with_default("Cherry");
        assert_eq!(run(&request, b"\r").0.unwrap(), "Cherry");
    }

    #[test]
    fn rows_show_marker_and_description() {
        let request = fruit();
        let prompt = SelectPrompt::new(&request).unwrap();
        assert_eq!(prompt.lines(), vec![
            "Fruit:",
            "> 1. Apple",
            "  2. Banana - yellow",
            "  3. Cherry",
        ]);
    }

    #[test]
    fn empty_option_list_is_a_configuration_error() {
        let request = PromptRequest::new("None");
        assert!(matches!(
            SelectPrompt::new(&request),
            Err(Error::ConfigurationError(_))
        ));
    }

    #[test]
    fn collapsed_frame_shows_answer() {
        let (result, out) = run(&fruit(), b"3");
        assert_eq!(result.unwrap(), "Cherry");
        assert!(out.contains("Fruit: Cherry"));
    }
}
