//! Frame discovery: turns a glob like `part2/*.txt` into an ordered list of frame files.

mod pattern;

use std::path::{Component, Path, PathBuf};

pub use pattern::glob_match;

use crate::foundation::error::{AsciiGifError, AsciiGifResult};

/// Ordered, truncated list of frame files.
///
/// Order is lexicographic by path and defines playback order, so callers zero-pad numeric
/// indices (`map_000001.txt`, ...).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameSource {
    paths: Vec<PathBuf>,
}

impl FrameSource {
    /// List files matching `pattern`, sort them by path and keep the first `max_frames`.
    ///
    /// Any path component may hold wildcards. Only regular files match the last component and
    /// only directories the ones before it. Zero matches is an error: there would be nothing to
    /// render.
    #[tracing::instrument]
    pub fn discover(pattern: &str, max_frames: usize) -> AsciiGifResult<Self> {
        let (base, parts) = split_pattern(pattern)?;
        let Some((file_part, dir_parts)) = parts.split_last() else {
            return Err(AsciiGifError::validation(format!(
                "frame pattern '{pattern}' must end in a file-name glob"
            )));
        };

        let mut dirs = vec![base];
        for part in dir_parts {
            let mut next = Vec::new();
            for dir in &dirs {
                if pattern::has_wildcard(part) {
                    next.extend(list_matching(dir, part, |p| p.is_dir())?);
                } else if dir.join(part).is_dir() {
                    next.push(dir.join(part));
                }
            }
            dirs = next;
        }

        let mut matched = Vec::new();
        for dir in &dirs {
            matched.extend(list_matching(dir, file_part, |p| p.is_file())?);
        }

        if matched.is_empty() {
            return Err(AsciiGifError::discovery(format!(
                "pattern '{pattern}' matched no frame files"
            )));
        }

        matched.sort();
        let found = matched.len();
        matched.truncate(max_frames);
        tracing::info!(found, used = matched.len(), "discovered frame files");

        Ok(Self { paths: matched })
    }

    /// Frame files in playback order.
    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }

    /// Number of frames.
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    /// Always `false` for a constructed source. Kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Read frame `i` as UTF-8 text.
    pub fn read_frame(&self, i: usize) -> AsciiGifResult<String> {
        let path = self.paths.get(i).ok_or_else(|| {
            AsciiGifError::frame_read(format!(
                "frame {i} out of range (source has {} frames)",
                self.paths.len()
            ))
        })?;
        read_frame_text(path)
    }
}

fn read_frame_text(path: &Path) -> AsciiGifResult<String> {
    let bytes = std::fs::read(path).map_err(|e| {
        AsciiGifError::frame_read(format!("cannot read '{}': {e}", path.display()))
    })?;
    String::from_utf8(bytes).map_err(|e| {
        AsciiGifError::frame_read(format!("'{}' is not valid UTF-8: {e}", path.display()))
    })
}

/// Entries of `dir` whose names match `glob` and whose paths pass `keep`.
fn list_matching(
    dir: &Path,
    glob: &str,
    keep: impl Fn(&Path) -> bool,
) -> AsciiGifResult<Vec<PathBuf>> {
    let cannot_list = |e: std::io::Error| {
        AsciiGifError::discovery(format!(
            "cannot list frame directory '{}': {e}",
            dir.display()
        ))
    };

    let mut out = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(cannot_list)? {
        let entry = entry.map_err(cannot_list)?;
        let file_name = entry.file_name();
        let Some(name) = file_name.to_str() else {
            continue;
        };
        if !glob_match(glob, name) {
            continue;
        }
        let path = entry.path();
        if keep(&path) {
            out.push(path);
        }
    }
    Ok(out)
}

/// Split a pattern into the literal directory prefix to start listing from and the remaining
/// components, the last of which is the file-name glob.
fn split_pattern(pattern: &str) -> AsciiGifResult<(PathBuf, Vec<String>)> {
    let pattern = pattern.trim();
    if pattern.is_empty() {
        return Err(AsciiGifError::validation("frame pattern must be non-empty"));
    }
    let must_end_in_name = || {
        AsciiGifError::validation(format!(
            "frame pattern '{pattern}' must end in a file-name glob"
        ))
    };
    if pattern.ends_with(['/', '\\']) {
        return Err(must_end_in_name());
    }

    let mut components: Vec<Component<'_>> = Path::new(pattern).components().collect();
    match components.pop() {
        Some(Component::Normal(_)) => {}
        _ => return Err(must_end_in_name()),
    }
    let file_part = Path::new(pattern)
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(must_end_in_name)?;

    let literal_len = components
        .iter()
        .position(|c| pattern::has_wildcard(&c.as_os_str().to_string_lossy()))
        .unwrap_or(components.len());

    let mut base: PathBuf = components[..literal_len].iter().collect();
    if base.as_os_str().is_empty() {
        base = PathBuf::from(".");
    }
    let mut parts: Vec<String> = components[literal_len..]
        .iter()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();
    parts.push(file_part.to_owned());

    Ok((base, parts))
}

#[cfg(test)]
#[path = "../../tests/unit/source.rs"]
mod tests;
