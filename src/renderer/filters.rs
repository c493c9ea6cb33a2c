use log::warn;
use regex::Regex;

/// Custom regex filter for template processing.
///
/// Tests if a string matches a given regular expression pattern.
///
/// # Arguments
/// * `val` - The string to test
/// * `re` - The regular expression pattern
///
/// # Returns
/// * `bool` - True if the string matches the pattern, false otherwise
pub fn regex_filter(val: &str, re: &str) -> bool {
    match Regex::new(re) {
        Ok(re) => re.is_match(val),
        Err(err) => {
            warn!("Invalid regex '{re}': {err}");
            false
        }
    }
}

/// Splits a multi-select answer back into its values.
pub fn split_filter(val: &str) -> Vec<String> {
    val.split(',').map(str::trim).filter(|s| !s.is_empty()).map(String::from).collect()
}
