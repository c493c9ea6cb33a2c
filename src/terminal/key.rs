//! Key decoding.
//!
//! Turns a buffered byte source into one logical [`Key`] per call. The decoder
//! understands the xterm CSI family (`ESC [ ...`) and VT100 SS3 (`ESC O ...`)
//! for arrows, Home/End and function keys. Bytes after an `ESC` are only
//! consumed when they are already sitting in the reader's buffer, so a lone
//! Escape press never blocks waiting for a sequence that will not come.

use std::io::{self, BufRead, BufReader, Read};

const ESC: u8 = 0x1b;
const CTRL_C: u8 = 0x03;
const BACKSPACE: u8 = 0x08;
const DEL: u8 = 0x7f;

/// A single logical key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// A printable character.
    Char(char),
    Enter,
    Escape,
    Tab,
    Backspace,
    Space,
    CtrlC,
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    /// Function key F1 through F12.
    F(u8),
    Unknown,
}

impl Key {
    /// The digit shown on this key, if it is one of `1`..=`9`.
    pub fn digit(&self) -> Option<usize> {
        match self {
            Key::Char(c @ '1'..='9') => c.to_digit(10).map(|d| d as usize),
            _ => None,
        }
    }
}

/// Reads exactly one key from `reader`.
///
/// Returns [`io::ErrorKind::UnexpectedEof`] when the source has no more bytes.
pub fn read_key<R: Read>(reader: &mut BufReader<R>) -> io::Result<Key> {
    let byte = next_byte(reader)?;
    let key = match byte {
        b'\r' | b'\n' => Key::Enter,
        b'\t' => Key::Tab,
        BACKSPACE | DEL => Key::Backspace,
        CTRL_C => Key::CtrlC,
        b' ' => Key::Space,
        ESC => decode_escape(reader),
        0x00..=0x1f => Key::Unknown,
        0x20..=0x7e => Key::Char(byte as char),
        _ => decode_utf8(reader, byte)?,
    };
    Ok(key)
}

fn next_byte<R: Read>(reader: &mut BufReader<R>) -> io::Result<u8> {
    let byte = match reader.fill_buf()?.first() {
        Some(&b) => b,
        None => return Err(io::Error::from(io::ErrorKind::UnexpectedEof)),
    };
    reader.consume(1);
    Ok(byte)
}

/// Takes the next byte only if it has already been read into the buffer.
fn buffered_byte<R: Read>(reader: &mut BufReader<R>) -> Option<u8> {
    let byte = *reader.buffer().first()?;
    reader.consume(1);
    Some(byte)
}

fn decode_escape<R: Read>(reader: &mut BufReader<R>) -> Key {
    match buffered_byte(reader) {
        Some(b'[') => decode_csi(reader),
        Some(b'O') => decode_ss3(reader),
        _ => Key::Escape,
    }
}

/// Takes the next buffered byte only when `accept` says it belongs to the
/// sequence being decoded.
fn buffered_byte_if<R: Read>(
    reader: &mut BufReader<R>,
    accept: impl Fn(u8) -> bool,
) -> Option<u8> {
    let byte = *reader.buffer().first()?;
    if !accept(byte) {
        return None;
    }
    reader.consume(1);
    Some(byte)
}

fn decode_csi<R: Read>(reader: &mut BufReader<R>) -> Key {
    // Linux console function keys: `ESC [ [ 1 <d>`.
    if buffered_byte_if(reader, |b| b == b'[').is_some() {
        return match buffered_byte_if(reader, |b| b == b'1') {
            Some(_) => match buffered_byte_if(reader, |b| b.is_ascii_digit() && b != b'0') {
                Some(d) => Key::F(d - b'0'),
                None => Key::Escape,
            },
            None => Key::Escape,
        };
    }

    // A CSI sequence is parameter bytes followed by one final byte. Unknown
    // sequences are consumed whole so their tail never reaches the prompt.
    let mut params = Vec::new();
    while let Some(byte) = buffered_byte_if(reader, |b| (0x20..=0x3f).contains(&b)) {
        params.push(byte);
    }
    let Some(last) = buffered_byte_if(reader, |b| (0x40..=0x7e).contains(&b)) else {
        return Key::Escape;
    };

    match (params.as_slice(), last) {
        ([], b'A') => Key::Up,
        ([], b'B') => Key::Down,
        ([], b'C') => Key::Right,
        ([], b'D') => Key::Left,
        ([], b'H') => Key::Home,
        ([], b'F') => Key::End,
        ([b'1', d @ b'1'..=b'9'], b'~') => Key::F(d - b'0'),
        ([b'2', b'0'], b'~') => Key::F(10),
        ([b'2', b'1'], b'~') => Key::F(11),
        ([b'2', b'2'], b'~') => Key::F(12),
        // F13 has no key of its own and reports as F12.
        ([b'2', b'3'], b'~') => Key::F(12),
        _ => Key::Escape,
    }
}

fn decode_ss3<R: Read>(reader: &mut BufReader<R>) -> Key {
    match buffered_byte(reader) {
        Some(b'P') => Key::F(1),
        Some(b'Q') => Key::F(2),
        Some(b'R') => Key::F(3),
        Some(b'S') => Key::F(4),
        _ => Key::Escape,
    }
}

fn decode_utf8<R: Read>(reader: &mut BufReader<R>, lead: u8) -> io::Result<Key> {
    let width = match lead {
        0xc2..=0xdf => 2,
        0xe0..=0xef => 3,
        0xf0..=0xf4 => 4,
        _ => return Ok(Key::Unknown),
    };
    let mut buf = [lead, 0, 0, 0];
    for slot in buf.iter_mut().take(width).skip(1) {
        *slot = next_byte(reader)?;
    }
    let key = std::str::from_utf8(&buf[..width])
        .ok()
        .and_then(|s| s.chars().next())
        .map_or(Key::Unknown, Key::Char);
    Ok(key)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(bytes: &[u8]) -> Key {
        let mut reader = BufReader::new(bytes);
        read_key(&mut reader).unwrap()
    }

    fn decode_all(bytes: &[u8]) -> Vec<Key> {
        let mut reader = BufReader::new(bytes);
        let mut keys = Vec::new();
        loop {
            match read_key(&mut reader) {
                Ok(key) => keys.push(key),
                Err(err) => {
                    assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
                    return keys;
                }
            }
        }
    }

    #[test]
    fn single_byte_keys() {
        assert_eq!(decode(b"\r"), Key::Enter);
        assert_eq!(decode(b"\n"), Key::Enter);
        assert_eq!(decode(b"\t"), Key::Tab);
        assert_eq!(decode(&[0x7f]), Key::Backspace);
        assert_eq!(decode(&[0x08]), Key::Backspace);
        assert_eq!(decode(&[0x03]), Key::CtrlC);
        assert_eq!(decode(b" "), Key::Space);
        assert_eq!(decode(b"a"), Key::Char('a'));
        assert_eq!(decode(b"7"), Key::Char('7'));
        assert_eq!(decode(b"~"), Key::Char('~'));
    }

    #[test]
    fn unlisted_control_bytes_are_unknown() {
        assert_eq!(decode(&[0x01]), Key::Unknown);
        assert_eq!(decode(&[0x1f]), Key::Unknown);
    }

    #[test]
    fn multibyte_characters() {
        assert_eq!(decode("é".as_bytes()), Key::Char('é'));
        assert_eq!(decode("€".as_bytes()), Key::Char('€'));
        assert_eq!(decode("🦀".as_bytes()), Key::Char('🦀'));
        assert_eq!(decode_all("añb".as_bytes()), vec![
            Key::Char('a'),
            Key::Char('ñ'),
            Key::Char('b')
        ]);
    }

    #[test]
    fn invalid_utf8_is_unknown() {
        assert_eq!(decode(&[0xff]), Key::Unknown);
        assert_eq!(decode(&[0xc3, 0x28]), Key::Unknown);
    }

    #[test]
    fn lone_escape() {
        assert_eq!(decode(&[0x1b]), Key::Escape);
    }

    #[test]
    fn csi_arrows_and_home_end() {
        assert_eq!(decode(b"\x1b[A"), Key::Up);
        assert_eq!(decode(b"\x1b[B"), Key::Down);
        assert_eq!(decode(b"\x1b[C"), Key::Right);
        assert_eq!(decode(b"\x1b[D"), Key::Left);
        assert_eq!(decode(b"\x1b[H"), Key::Home);
        assert_eq!(decode(b"\x1b[F"), Key::End);
    }

    #[test]
    fn csi_tilde_function_keys_one_through_nine() {
        for n in 1..=9u8 {
            let seq = [0x1b, b'[', b'1', b'0' + n, b'~'];
            assert_eq!(decode(&seq), Key::F(n), "sequence for F{n}");
        }
    }

    #[test]
    fn double_bracket_function_keys() {
        for n in 1..=9u8 {
            let seq = [0x1b, b'[', b'[', b'1', b'0' + n];
            assert_eq!(decode(&seq), Key::F(n), "sequence for F{n}");
        }
        assert_eq!(decode(b"\x1b[[2"), Key::Escape);
    }

    #[test]
    fn csi_tilde_function_keys_ten_through_twelve() {
        assert_eq!(decode(b"\x1b[20~"), Key::F(10));
        assert_eq!(decode(b"\x1b[21~"), Key::F(11));
        assert_eq!(decode(b"\x1b[22~"), Key::F(12));
    }

    #[test]
    fn f13_reports_as_f12() {
        assert_eq!(decode(b"\x1b[23~"), Key::F(12));
    }

    #[test]
    fn ss3_function_keys() {
        assert_eq!(decode(b"\x1bOP"), Key::F(1));
        assert_eq!(decode(b"\x1bOQ"), Key::F(2));
        assert_eq!(decode(b"\x1bOR"), Key::F(3));
        assert_eq!(decode(b"\x1bOS"), Key::F(4));
    }

    #[test]
    fn unknown_sequences_degrade_to_escape() {
        assert_eq!(decode(b"\x1b[Z"), Key::Escape);
        assert_eq!(decode(b"\x1bOX"), Key::Escape);
        assert_eq!(decode(b"\x1b[1"), Key::Escape);
        assert_eq!(decode(b"\x1b[10~"), Key::Escape);
        assert_eq!(decode(b"\x1b[24~"), Key::Escape);
        assert_eq!(decode(b"\x1b[2"), Key::Escape);
        assert_eq!(decode(b"\x1bx"), Key::Escape);
    }

    #[test]
    fn truncated_sequences_do_not_block() {
        assert_eq!(decode(b"\x1b["), Key::Escape);
        assert_eq!(decode(b"\x1bO"), Key::Escape);
        assert_eq!(decode(b"\x1b[1"), Key::Escape);
    }

    #[test]
    fn unknown_sequences_do_not_swallow_the_next_key() {
        assert_eq!(decode_all(b"\x1b[1~a"), vec![Key::Escape, Key::Char('a')]);
        assert_eq!(decode_all(b"\x1b[1;5Ab"), vec![Key::Escape, Key::Char('b')]);
        assert_eq!(decode_all(b"\x1b[2Xc"), vec![Key::Escape, Key::Char('c')]);
        assert_eq!(decode_all(b"\x1b[[2"), vec![Key::Escape, Key::Char('2')]);
        assert_eq!(decode_all(b"\x1b[1\r"), vec![Key::Escape, Key::Enter]);
    }

    #[test]
    fn stream_of_keys_decodes_in_order() {
        let keys = decode_all(b"ab\x1b[B\x1bOP \r");
        assert_eq!(keys, vec![
            Key::Char('a'),
            Key::Char('b'),
            Key::Down,
            Key::F(1),
            Key::Space,
            Key::Enter,
        ]);
    }

    #[test]
    fn empty_source_is_eof() {
        let mut reader = BufReader::new(&b""[..]);
        let err = read_key(&mut reader).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
    }

    #[test]
    fn digit_helper() {
        assert_eq!(Key::Char('1').digit(), Some(1));
        assert_eq!(Key::Char('9').digit(), Some(9));
        assert_eq!(Key::Char('0').digit(), None);
        assert_eq!(Key::Char('a').digit(), None);
        assert_eq!(Key::Enter.digit(), None);
    }
}
