//! Line-buffered prompts
//!
//! Used when the input is not a terminal or raw mode cannot be entered. Each
//! prompt kind is a question followed by one answer line; nothing is redrawn.

use super::interface::{
    confirm_default_is_yes, join_selection, option_row, resolve_confirm, PromptKind,
    PromptRequest, SelectOption,
};
use crate::{
    constants::{messages, BACK_ANSWER, FINISH_WORDS},
    error::{Error, Result},
};
use std::io::{self, BufRead, Write};

/// Asks `request` one line at a time.
pub fn ask<R: BufRead, W: Write>(
    reader: &mut R,
    writer: &mut W,
    request: &PromptRequest,
) -> Result<String> {
    match request.kind() {
        PromptKind::Text => text(reader, writer, request),
        PromptKind::Confirm => confirm(reader, writer, request),
        PromptKind::Select => select(reader, writer, request),
        PromptKind::MultiSelect => multi_select(reader, writer, request),
    }
}

/// Reads one line without its terminator or surrounding whitespace.
fn read_line<R: BufRead>(reader: &mut R) -> Result<String> {
    let mut line = String::new();
    if reader.read_line(&mut line)? == 0 {
        return Err(io::Error::from(io::ErrorKind::UnexpectedEof).into());
    }
    Ok(line.trim().to_string())
}

fn print_error<W: Write>(writer: &mut W, request: &PromptRequest, message: &str) -> Result<()> {
    writeln!(writer, "{}", (request.theme.error)(message))?;
    Ok(())
}

fn print_options<W: Write>(writer: &mut W, request: &PromptRequest) -> Result<()> {
    writeln!(writer, "{}", (request.theme.label)(&format!("{}:", request.label)))?;
    for (i, option) in request.options.iter().enumerate() {
        writeln!(writer, "  {}", option_row(i + 1, option))?;
    }
    Ok(())
}

fn text<R: BufRead, W: Write>(
    reader: &mut R,
    writer: &mut W,
    request: &PromptRequest,
) -> Result<String> {
    let question = if request.default.is_empty() || request.no_default_placeholder {
        format!("{}: ", request.label)
    } else {
        format!("{} [{}]: ", request.label, request.default)
    };
    loop {
        write!(writer, "{}", (request.theme.label)(&question))?;
        writer.flush()?;
        let line = read_line(reader)?;
        let answer = if line.is_empty() { request.default.clone() } else { line };
        match request.check(&answer) {
            Ok(()) => return Ok(answer),
            Err(message) => print_error(writer, request, &message)?,
        }
    }
}

fn confirm<R: BufRead, W: Write>(
    reader: &mut R,
    writer: &mut W,
    request: &PromptRequest,
) -> Result<String> {
    let hint = if confirm_default_is_yes(&request.default) {
        messages::CONFIRM_HINT_YES
    } else {
        messages::CONFIRM_HINT_NO
    };
    let question = format!("{} {hint}: ", request.label);
    loop {
        write!(writer, "{}", (request.theme.label)(&question))?;
        writer.flush()?;
        let line = read_line(reader)?;
        let Some(answer) = resolve_confirm(&line, &request.default) else {
            print_error(writer, request, messages::CONFIRM_INVALID)?;
            continue;
        };
        match request.check(&answer) {
            Ok(()) => return Ok(answer),
            Err(message) => print_error(writer, request, &message)?,
        }
    }
}

/// Finds the option a token names: a 1-based index, then an exact value or
/// label, then a label prefix. Comparisons ignore case.
fn match_option(options: &[SelectOption], token: &str) -> Option<usize> {
    option_at(options, token).or_else(|| literal_option(options, token)).or_else(|| {
        let token = token.to_lowercase();
        options.iter().position(|o| o.label.to_lowercase().starts_with(&token))
    })
}

/// The option at a 1-based index, if `token` is one and it is in range.
fn option_at(options: &[SelectOption], token: &str) -> Option<usize> {
    let n = token.parse::<usize>().ok()?;
    (1..=options.len()).contains(&n).then(|| n - 1)
}

/// The first option whose value or label is `token`, ignoring case.
fn literal_option(options: &[SelectOption], token: &str) -> Option<usize> {
    let token = token.to_lowercase();
    options.iter().position(|o| o.value.to_lowercase() == token || o.label.to_lowercase() == token)
}

fn no_options(request: &PromptRequest) -> Error {
    Error::ConfigurationError(format!("prompt '{}' has no options", request.label))
}

fn select<R: BufRead, W: Write>(
    reader: &mut R,
    writer: &mut W,
    request: &PromptRequest,
) -> Result<String> {
    if request.options.is_empty() {
        return Err(no_options(request));
    }
    print_options(writer, request)?;
    let default = request.default_index().unwrap_or(0);
    loop {
        write!(writer, "Choice [{}]: ", default + 1)?;
        writer.flush()?;
        let line = read_line(reader)?;
        let index =
            if line.is_empty() { Some(default) } else { match_option(&request.options, &line) };

        let answer = match index {
            Some(i) => request.options[i].answer().to_string(),
            None if line.eq_ignore_ascii_case(BACK_ANSWER) => return Ok(line),
            None if request.validate.is_none() => {
                log::debug!("no option matches {line:?}, returning it as typed");
                return Ok(line);
            }
            None => line,
        };
        match request.check(&answer) {
            Ok(()) => return Ok(answer),
            Err(message) => print_error(writer, request, &message)?,
        }
    }
}

fn multi_select<R: BufRead, W: Write>(
    reader: &mut R,
    writer: &mut W,
    request: &PromptRequest,
) -> Result<String> {
    if request.options.is_empty() {
        return Err(no_options(request));
    }
    print_options(writer, request)?;
    writeln!(writer, "{}", messages::MULTI_SELECT_HINT)?;

    let mut selected = request.default_selection();
    loop {
        let current = join_selection(&request.options, &selected);
        write!(writer, "Selected [{current}]: ")?;
        writer.flush()?;
        let line = read_line(reader)?;

        if line.is_empty() || FINISH_WORDS.contains(&line.to_lowercase().as_str()) {
            if current.is_empty() {
                print_error(writer, request, messages::NO_SELECTION)?;
                continue;
            }
            match request.check(&current) {
                Ok(()) => return Ok(current),
                Err(message) => {
                    print_error(writer, request, &message)?;
                    continue;
                }
            }
        }

        if let Some(i) = literal_option(&request.options, &line) {
            selected[i] = !selected[i];
            continue;
        }

        let tokens: Vec<&str> = line
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|t| !t.is_empty())
            .collect();
        if tokens.iter().all(|t| t.parse::<usize>().is_ok()) {
            for token in tokens {
                match option_at(&request.options, token) {
                    Some(i) => selected[i] = !selected[i],
                    None => {
                        let message = format!("{}: {token}", messages::NO_MATCH);
                        print_error(writer, request, &message)?
                    }
                }
            }
            continue;
        }

        match line.to_lowercase().as_str() {
            BACK_ANSWER => return Ok(line),
            _ => print_error(writer, request, &format!("{}: {line}", messages::NO_MATCH))?,
        }
    }
}
