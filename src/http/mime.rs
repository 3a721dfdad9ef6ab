use std::path::Path;

/// Content type reported for served files.
// TODO: map well-known extensions (html, css, png) instead of labelling
// everything text/plain.
pub fn guess_content_type(_path: &Path) -> &'static str {
    "text/plain"
}
