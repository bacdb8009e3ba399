use std::sync::OnceLock;

use regex::Regex;

/// Image extensions the bare-filename rule is allowed to rewrite.
pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "svg"];

fn external_reference_patterns() -> &'static [Regex] {
    static PATTERNS: OnceLock<Vec<Regex>> = OnceLock::new();
    PATTERNS
        .get_or_init(|| {
            vec![
                Regex::new(r"(?i)^https?://").expect("invalid http(s) regex"),
                Regex::new(r"(?i)^data:").expect("invalid data URI regex"),
                Regex::new(r"(?i)^mailto:").expect("invalid mailto regex"),
                Regex::new(r"^//").expect("invalid protocol-relative regex"),
            ]
        })
        .as_slice()
}

fn authoring_path_patterns() -> &'static [Regex] {
    static PATTERNS: OnceLock<Vec<Regex>> = OnceLock::new();
    PATTERNS
        .get_or_init(|| {
            vec![
                Regex::new(r"^/").expect("invalid root path regex"),
                Regex::new(r"^\\\\").expect("invalid UNC path regex"),
                Regex::new(r"(?i)^file:").expect("invalid file URI regex"),
                Regex::new(r"^[A-Za-z]:[\\/]").expect("invalid drive letter regex"),
            ]
        })
        .as_slice()
}

/// Determine whether a reference points outside the authored asset tree.
///
/// Remote URLs (including protocol-relative ones), data URIs and mail links are served
/// as-is and never rewritten.
pub fn is_external_reference(value: &str) -> bool {
    external_reference_patterns()
        .iter()
        .any(|pattern| pattern.is_match(value))
}

/// Determine whether a reference uses an absolute, machine-local path.
///
/// Covers POSIX roots, UNC shares, `file:` URIs and Windows drive letters.
pub fn is_absolute_reference(value: &str) -> bool {
    !is_external_reference(value)
        && authoring_path_patterns()
            .iter()
            .any(|pattern| pattern.is_match(value))
}

/// Check the extension of a file name against [`IMAGE_EXTENSIONS`], ignoring case.
pub fn has_image_extension(file_name: &str) -> bool {
    let Some((stem, extension)) = file_name.rsplit_once('.') else {
        return false;
    };
    !stem.is_empty()
        && IMAGE_EXTENSIONS
            .iter()
            .any(|allowed| extension.eq_ignore_ascii_case(allowed))
}
