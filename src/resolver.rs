//! Maps request paths onto the document root.

use std::fs;
use std::path::{Path, PathBuf};

/// A request path resolved to a servable file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedFile {
    /// Filesystem path, confined to the document root.
    pub path: PathBuf,
    /// Size at stat time. The file is not locked, so this is a snapshot;
    /// it is what `Content-Length` will promise.
    pub length: u64,
}

/// Resolves `request_path` against `docroot`.
///
/// Returns `None` for everything that should answer 404: paths that do not
/// start with `/`, paths whose `..` segments would climb out of the document
/// root, paths that do not exist, and paths that exist but are not regular
/// files. The stat does not follow symlinks, so a link is "not a regular
/// file" even when its target is one.
pub fn resolve(docroot: &Path, request_path: &str) -> Option<ResolvedFile> {
    let safe = sanitize_path(request_path)?;
    let path = docroot.join(safe.trim_start_matches('/'));
    let metadata = fs::symlink_metadata(&path).ok()?;
    if !metadata.is_file() {
        return None;
    }
    Some(ResolvedFile {
        path,
        length: metadata.len(),
    })
}

/// Collapses `//` and `/./`, applies `..` segments, and rejects any path
/// that is not `/`-rooted or that would climb above the root.
///
/// A trailing slash survives sanitization, so `/file.txt/` still names a
/// directory and resolves to 404 rather than quietly serving `/file.txt`.
pub fn sanitize_path(raw: &str) -> Option<String> {
    if !raw.starts_with('/') {
        return None;
    }
    let trailing_slash = raw.len() > 1 && raw.ends_with('/');

    let mut segments: Vec<&str> = Vec::new();
    for segment in raw.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop()?;
            }
            name => segments.push(name),
        }
    }

    let mut safe = String::from("/");
    safe.push_str(&segments.join("/"));
    if trailing_slash && safe.len() > 1 {
        safe.push('/');
    }
    Some(safe)
}
