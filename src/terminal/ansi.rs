//! ANSI escape sequence generation helpers.
//!
//! Pure byte writers for the handful of control sequences the prompt renderer
//! needs. No state is tracked here.
//!
//! | Sequence | Description |
//! |----------|-------------|
//! | `\r` | carriage return |
//! | `ESC [ K` | erase to end of line |
//! | `ESC [ n A` / `ESC [ n B` | cursor up / down n lines |
//! | `ESC [ n C` | cursor right n columns |
//! | `ESC [ ? 25 l` / `ESC [ ? 25 h` | hide / show cursor |

use std::io::{self, Write};

/// Erase from cursor to end of line: `CSI K`
pub const CLEAR_LINE: &[u8] = b"\x1b[K";

/// Hide cursor: `CSI ? 25 l`
pub const CURSOR_HIDE: &[u8] = b"\x1b[?25l";

/// Show cursor: `CSI ? 25 h`
pub const CURSOR_SHOW: &[u8] = b"\x1b[?25h";

/// Move cursor to start of line: `\r` (CR)
#[inline]
pub fn cr<W: Write>(w: &mut W) -> io::Result<()> {
    w.write_all(b"\r")
}

/// Line break that also returns to column zero, since raw mode disables
/// output post-processing.
#[inline]
pub fn newline<W: Write>(w: &mut W) -> io::Result<()> {
    w.write_all(b"\r\n")
}

/// Erase to end of line.
#[inline]
pub fn clear_line<W: Write>(w: &mut W) -> io::Result<()> {
    w.write_all(CLEAR_LINE)
}

/// Move cursor up: `CSI n A`
pub fn cursor_up<W: Write>(w: &mut W, n: usize) -> io::Result<()> {
    if n == 0 {
        return Ok(());
    }
    write!(w, "\x1b[{n}A")
}

/// Move cursor down: `CSI n B`
pub fn cursor_down<W: Write>(w: &mut W, n: usize) -> io::Result<()> {
    if n == 0 {
        return Ok(());
    }
    write!(w, "\x1b[{n}B")
}

/// Move cursor forward (right): `CSI n C`
pub fn cursor_right<W: Write>(w: &mut W, n: usize) -> io::Result<()> {
    if n == 0 {
        return Ok(());
    }
    write!(w, "\x1b[{n}C")
}

#[inline]
pub fn cursor_hide<W: Write>(w: &mut W) -> io::Result<()> {
    w.write_all(CURSOR_HIDE)
}

#[inline]
pub fn cursor_show<W: Write>(w: &mut W) -> io::Result<()> {
    w.write_all(CURSOR_SHOW)
}
