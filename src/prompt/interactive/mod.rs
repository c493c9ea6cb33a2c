//! Raw-mode prompt renderer
//!
//! Each prompt kind keeps its edit or selection state in memory and is
//! redrawn in place after every key. A redraw hides the cursor, walks back to
//! the top of the previous frame, and rewrites every line after `\r` and an
//! erase-to-end-of-line. Once the prompt is answered the frame collapses into
//! a single `label: answer` line.

use super::interface::{dispatch_binding, BindingContext, Dispatch, PromptKind, PromptRequest};
use crate::{
    error::Result,
    terminal::{ansi, read_key, Key},
};
use std::io::{self, BufReader, Read, Write};

mod confirm;
mod multi_select;
mod select;
mod text;

use confirm::ConfirmPrompt;
use multi_select::MultiSelectPrompt;
use select::SelectPrompt;
use text::TextPrompt;

/// Outcome of feeding one key to a prompt.
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum Step {
    Continue,
    Submit(String),
}

/// In-memory state of one interactive prompt.
pub(crate) trait PromptState {
    /// Lines of the current frame, already styled.
    fn lines(&self) -> Vec<String>;

    /// Where the cursor should rest as (row, column), if it is shown at all.
    fn cursor(&self) -> Option<(usize, usize)> {
        None
    }

    fn binding_context(&mut self) -> BindingContext<'_>;

    /// Default handling for a key no binding claimed.
    fn handle(&mut self, key: Key) -> Result<Step>;
}

/// Asks `request` by reading keys from `reader` and drawing on `writer`.
///
/// The caller is responsible for raw mode.
pub fn ask<R: Read, W: Write>(
    reader: &mut BufReader<R>,
    writer: &mut W,
    request: &PromptRequest,
) -> Result<String> {
    match request.kind() {
        PromptKind::Text => drive(reader, writer, request, TextPrompt::new(request)),
        PromptKind::Confirm => drive(reader, writer, request, ConfirmPrompt::new(request)),
        PromptKind::Select => drive(reader, writer, request, SelectPrompt::new(request)?),
        PromptKind::MultiSelect => {
            drive(reader, writer, request, MultiSelectPrompt::new(request)?)
        }
    }
}

fn drive<R: Read, W: Write, S: PromptState>(
    reader: &mut BufReader<R>,
    writer: &mut W,
    request: &PromptRequest,
    mut state: S,
) -> Result<String> {
    let mut frame = Frame::default();
    let result = key_loop(reader, writer, request, &mut state, &mut frame);
    match &result {
        Ok(answer) => {
            let theme = &request.theme;
            let line = format!("{}: {}", (theme.label)(&request.label), (theme.answer)(answer));
            frame.draw(writer, &[line], None)?;
        }
        Err(_) => frame.leave(writer)?,
    }
    ansi::cursor_show(writer)?;
    writer.flush()?;
    result
}

fn key_loop<R: Read, W: Write, S: PromptState>(
    reader: &mut BufReader<R>,
    writer: &mut W,
    request: &PromptRequest,
    state: &mut S,
    frame: &mut Frame,
) -> Result<String> {
    loop {
        frame.draw(writer, &state.lines(), state.cursor())?;
        let key = read_key(reader)?;
        match dispatch_binding(&request.key_map, key, &mut state.binding_context()) {
            Dispatch::Handled => continue,
            Dispatch::Exit(err) => return Err(err),
            Dispatch::Unbound => {}
        }
        if let Step::Submit(answer) = state.handle(key)? {
            return Ok(answer);
        }
    }
}

/// Tracks what the previous draw left on screen.
#[derive(Debug, Default)]
struct Frame {
    /// Lines drawn last time.
    lines: usize,
    /// How far above the bottom of the frame the cursor was left.
    cursor_offset: usize,
}

impl Frame {
    fn draw<W: Write>(
        &mut self,
        w: &mut W,
        lines: &[String],
        cursor: Option<(usize, usize)>,
    ) -> io::Result<()> {
        ansi::cursor_hide(w)?;
        ansi::cursor_down(w, self.cursor_offset)?;
        ansi::cursor_up(w, self.lines)?;

        for line in lines {
            ansi::cr(w)?;
            ansi::clear_line(w)?;
            w.write_all(line.as_bytes())?;
            ansi::newline(w)?;
        }
        let stale = self.lines.saturating_sub(lines.len());
        for _ in 0..stale {
            ansi::cr(w)?;
            ansi::clear_line(w)?;
            ansi::newline(w)?;
        }
        ansi::cursor_up(w, stale)?;

        self.lines = lines.len();
        self.cursor_offset = 0;

        if let Some((row, col)) = cursor {
            let up = lines.len().saturating_sub(row);
            ansi::cursor_up(w, up)?;
            ansi::cr(w)?;
            ansi::cursor_right(w, col)?;
            ansi::cursor_show(w)?;
            self.cursor_offset = up;
        }
        w.flush()
    }

    /// Moves below the frame without touching it.
    fn leave<W: Write>(&mut self, w: &mut W) -> io::Result<()> {
        ansi::cursor_down(w, self.cursor_offset)?;
        self.cursor_offset = 0;
        Ok(())
    }
}
