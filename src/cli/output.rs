//! Printing collected answers

use crate::cli::args::OutputFormat;
use crate::error::Result;
use indexmap::IndexMap;
use std::io::Write;

/// Write `(id, answer)` pairs to `writer` in `format`.
pub fn write_answers<W: Write>(
    writer: &mut W,
    answers: &[(String, String)],
    format: OutputFormat,
) -> Result<()> {
    let map: IndexMap<&str, &str> =
        answers.iter().map(|(id, value)| (id.as_str(), value.as_str())).collect();
    match format {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *writer, &map)?;
            writeln!(writer)?;
        }
        OutputFormat::Yaml => write!(writer, "{}", serde_yaml::to_string(&map)?)?,
        OutputFormat::Text => {
            for (id, value) in map {
                writeln!(writer, "{id}: {value}")?;
            }
        }
    }
    writer.flush()?;
    Ok(())
}
