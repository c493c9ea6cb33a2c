//! Terminal plumbing: key decoding, ANSI output and raw mode.
//!
//! - `key`: byte stream to [`Key`] decoding
//! - `ansi`: control sequence writers used by the interactive renderer
//! - `raw`: raw mode session with once-only restore

pub mod ansi;
pub mod key;
pub mod raw;

pub use key::{read_key, Key};
pub use raw::RawMode;
