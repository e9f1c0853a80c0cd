//! Upload intake helpers: extension whitelist, filename sanitization and
//! output naming.

use std::sync::LazyLock;

use regex::Regex;
use unicode_normalization::UnicodeNormalization;

/// Extensions accepted by default.
pub const DEFAULT_ALLOWED_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg"];

/// Reply when the form carried no `file` field.
pub const NO_FILE_PART: &str = "No file part";

/// Reply when the `file` field had an empty filename.
pub const NO_SELECTED_FILE: &str = "No selected file";

static UNSAFE_FILENAME_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^A-Za-z0-9_.-]").unwrap());

/// Check the text after the last `.` (case-insensitive) against the whitelist.
pub fn allowed_file<S: AsRef<str>>(filename: &str, allowed: &[S]) -> bool {
    match filename.rsplit_once('.') {
        Some((_, ext)) => allowed.iter().any(|a| a.as_ref().eq_ignore_ascii_case(ext)),
        None => false,
    }
}

/// Reduce a client-supplied filename to a safe, flat ASCII name.
///
/// Compatibility-decomposes and drops non-ASCII, turns path separators into
/// spaces, joins whitespace runs with `_`, removes anything outside
/// `[A-Za-z0-9_.-]` and trims leading/trailing `.` and `_`. The result may
/// be empty.
pub fn secure_filename(filename: &str) -> String {
    let ascii: String = filename.nfkd().filter(char::is_ascii).collect();
    let flattened = ascii.replace(['/', '\\'], " ");
    let joined = flattened.split_whitespace().collect::<Vec<_>>().join("_");
    UNSAFE_FILENAME_CHARS
        .replace_all(&joined, "")
        .trim_matches(|c| c == '.' || c == '_')
        .to_string()
}

/// Filename without its final extension (`scan.v2.png` -> `scan.v2`).
pub fn base_name(filename: &str) -> &str {
    match filename.rsplit_once('.') {
        Some((stem, _)) if !stem.is_empty() => stem,
        _ => filename,
    }
}
