//! The [`Prompter`] backed by real input and output streams.

use super::{interactive, interface::PromptRequest, line, Prompter};
use crate::{
    error::{Error, Result},
    terminal::RawMode,
};
use std::io::{self, BufReader, IsTerminal, Read, Stdin, Stdout, Write};

/// How a [`Console`] asks its questions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Always line by line.
    Line,
    /// Always key by key, assuming the caller already put the input in raw
    /// mode (or that it is not a terminal at all, as in tests).
    Interactive,
    /// Key by key inside a raw-mode session on stdin, falling back to line
    /// mode when raw mode cannot be entered.
    Terminal,
}

/// Prompts over one buffered reader and one writer.
///
/// The reader is kept for the console's whole lifetime so bytes buffered
/// while answering one question are still there for the next.
#[derive(Debug)]
pub struct Console<R, W> {
    reader: BufReader<R>,
    writer: W,
    mode: Mode,
}

impl<R: Read, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self::with_mode(input, output, Mode::Line)
    }

    pub fn with_mode(input: R, output: W, mode: Mode) -> Self {
        Self { reader: BufReader::new(input), writer: output, mode }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn writer(&self) -> &W {
        &self.writer
    }

    pub fn into_inner(self) -> (BufReader<R>, W) {
        (self.reader, self.writer)
    }

    fn ask_in_terminal(&mut self, request: &PromptRequest) -> Result<String> {
        let raw = match RawMode::enable(&io::stdin()) {
            Ok(raw) => raw,
            Err(err) => {
                log::debug!("raw mode unavailable, asking line by line: {err}");
                return line::ask(&mut self.reader, &mut self.writer, request);
            }
        };
        let answer = interactive::ask(&mut self.reader, &mut self.writer, request);
        let restored = raw.restore();
        let answer = answer?;
        restored?;
        Ok(answer)
    }
}

impl Console<Stdin, Stdout> {
    /// A console on the process's stdin and stdout.
    ///
    /// Uses [`Mode::Terminal`] when both are terminals and [`Mode::Line`]
    /// otherwise.
    pub fn stdio() -> Self {
        let mode = if io::stdin().is_terminal() && io::stdout().is_terminal() {
            Mode::Terminal
        } else {
            Mode::Line
        };
        log::debug!("console mode: {mode:?}");
        Self::with_mode(io::stdin(), io::stdout(), mode)
    }
}

impl<R: Read, W: Write> Prompter for Console<R, W> {
    fn prompt(&mut self, request: &PromptRequest) -> Result<String> {
        match self.mode {
            Mode::Line => line::ask(&mut self.reader, &mut self.writer, request),
            Mode::Interactive => interactive::ask(&mut self.reader, &mut self.writer, request),
            Mode::Terminal => self.ask_in_terminal(request),
        }
    }

    fn message(&mut self, text: &str) -> Result<()> {
        writeln!(self.writer, "{text}")?;
        self.writer.flush()?;
        Ok(())
    }
}

/// Builds a [`Console`] from separately supplied streams.
#[derive(Debug)]
pub struct ConsoleBuilder<R, W> {
    input: Option<R>,
    output: Option<W>,
    mode: Mode,
}

impl<R: Read, W: Write> Default for ConsoleBuilder<R, W> {
    fn default() -> Self {
        Self { input: None, output: None, mode: Mode::Line }
    }
}

impl<R: Read, W: Write> ConsoleBuilder<R, W> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn input(mut self, input: R) -> Self {
        self.input = Some(input);
        self
    }

    pub fn output(mut self, output: W) -> Self {
        self.output = Some(output);
        self
    }

    pub fn mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }

    /// # Errors
    ///
    /// [`Error::ConfigurationError`] when either stream is missing.
    pub fn build(self) -> Result<Console<R, W>> {
        let input = self
            .input
            .ok_or_else(|| Error::ConfigurationError("console has no input stream".into()))?;
        let output = self
            .output
            .ok_or_else(|| Error::ConfigurationError("console has no output stream".into()))?;
        Ok(Console::with_mode(input, output, self.mode))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_mode_console_answers_in_order() {
        let mut console = Console::new("Ada\n2\n".as_bytes(), Vec::<u8>::new());
        let name = console.prompt(&PromptRequest::new("Name")).unwrap();
        let pick = console
            .prompt(&PromptRequest::new("Pick").with_options(["one", "two"]))
            .unwrap();
        assert_eq!((name.as_str(), pick.as_str()), ("Ada", "two"));
    }

    #[test]
    fn buffered_input_survives_between_prompts() {
        // Both answers land in the reader's buffer on the first read.
        let mut console =
            Console::with_mode("a\rb\r".as_bytes(), Vec::<u8>::new(), Mode::Interactive);
        assert_eq!(console.prompt(&PromptRequest::new("First")).unwrap(), "a");
        assert_eq!(console.prompt(&PromptRequest::new("Second")).unwrap(), "b");
    }

    #[test]
    fn terminal_mode_falls_back_to_lines_without_a_tty() {
        // Under a test harness stdin is not a terminal, so raw mode is refused.
        let mut console = Console::with_mode("Ada\n".as_bytes(), Vec::<u8>::new(), Mode::Terminal);
        assert_eq!(console.prompt(&PromptRequest::new("Name")).unwrap(), "Ada");
        assert_eq!(console.mode(), Mode::Terminal);
    }

    #[test]
    fn message_is_written_with_newline() {
        let mut console = Console::new("".as_bytes(), Vec::<u8>::new());
        console.message("hello").unwrap();
        assert_eq!(console.writer(), b"hello\n");
    }

    #[test]
    fn builder_requires_both_streams() {
        let missing_input = ConsoleBuilder::<&[u8], Vec<u8>>::new().output(Vec::new()).build();
        assert!(matches!(missing_input, Err(Error::ConfigurationError(_))));

        let missing_output =
            ConsoleBuilder::<&[u8], Vec<u8>>::new().input("".as_bytes()).build();
        assert!(matches!(missing_output, Err(Error::ConfigurationError(_))));

        let console = ConsoleBuilder::new()
            .input("".as_bytes())
            .output(Vec::<u8>::new())
            .mode(Mode::Interactive)
            .build()
            .unwrap();
        assert_eq!(console.mode(), Mode::Interactive);
    }
}
