//! Interactive dialog utilities for user input
//!
//! This module provides the four prompt kinds (text, select, multi-select and
//! confirm) behind one [`Prompter`] capability.
//!
//! The module is structured in layers:
//! - `interface`: Pure request, option, theme and key binding types
//! - `interactive`: Raw-mode renderer that redraws a frame on every key
//! - `line`: Line-buffered fallback for pipes and dumb terminals
//! - `console`: The [`Prompter`] that picks between the two
//! - `scripted`: A [`Prompter`] that answers from a script

use crate::error::Result;

pub mod console;
pub mod interactive;
pub mod interface;
pub mod line;
pub mod scripted;

pub use console::{Console, ConsoleBuilder, Mode};
pub use interface::*;
pub use scripted::{Reply, ScriptedPrompter};

/// Anything that can ask a question and get a string answer back.
pub trait Prompter {
    fn prompt(&mut self, request: &PromptRequest) -> Result<String>;

    /// Print a line of output that is not a question.
    fn message(&mut self, text: &str) -> Result<()>;
}

impl<P: Prompter + ?Sized> Prompter for &mut P {
    fn prompt(&mut self, request: &PromptRequest) -> Result<String> {
        (**self).prompt(request)
    }

    fn message(&mut self, text: &str) -> Result<()> {
        (**self).message(text)
    }
}

impl<P: Prompter + ?Sized> Prompter for Box<P> {
    fn prompt(&mut self, request: &PromptRequest) -> Result<String> {
        (**self).prompt(request)
    }

    fn message(&mut self, text: &str) -> Result<()> {
        (**self).message(text)
    }
}

/// Main entry point for asking a single question on stdin/stdout
pub fn ask(request: &PromptRequest) -> Result<String> {
    Console::stdio().prompt(request)
}
