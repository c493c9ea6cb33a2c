use std::path::PathBuf;

#[allow(dead_code)]
/// Path of a survey fixture under `tests/surveys`.
pub fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests").join("surveys").join(name)
}

/// Output of a console as text.
pub fn text(output: Vec<u8>) -> String {
    String::from_utf8(output).unwrap()
}
