// file: src/utils/files.rs
// version: 1.0.0
// guid: b6f03e84-9d21-47c5-a8b9-57e2d1c04a6f

//! Owned configuration fragments
//!
//! Every file this tool writes carries a marker header and is replaced
//! wholesale on each run, so re-runs overwrite cleanly instead of appending
//! duplicates.

use crate::Result;
use std::fs;
use std::io::Write;
use std::path::Path;
use tracing::debug;

/// Marker placed at the top of every fragment this tool owns
pub const FRAGMENT_MARKER: &str = "Managed by ubuntu-harden-agent; edits are overwritten on re-run";

/// Prepend the ownership marker to fragment content
pub fn with_marker(comment_prefix: &str, body: &str) -> String {
    format!("{} {}\n{}", comment_prefix, FRAGMENT_MARKER, body)
}

/// Atomically write a configuration fragment with an explicit mode
///
/// The content lands in a temp file in the destination directory and is
/// persisted over the target, so a crash mid-write never leaves a truncated
/// config behind.
pub fn write_fragment(path: &Path, content: &str, mode: u32) -> Result<()> {
    let dir = path.parent().ok_or_else(|| {
        crate::error::HardenError::Config(format!("No parent directory for {}", path.display()))
    })?;
    fs::create_dir_all(dir)?;

    let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
    tmp.write_all(content.as_bytes())?;
    tmp.flush()?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(tmp.path(), fs::Permissions::from_mode(mode))?;
    }

    tmp.persist(path).map_err(|e| e.error)?;
    debug!("Wrote fragment {} (mode {:o})", path.display(), mode);
    Ok(())
}

/// Append a line to a file unless the exact line is already present
///
/// Creates the file with the given mode when absent. Returns whether the
/// line was added; used for authorized-key installation so re-runs never
/// duplicate entries.
pub fn append_line_once(path: &Path, line: &str, mode: u32) -> Result<bool> {
    let existing = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => String::new(),
        Err(e) => return Err(e.into()),
    };

    if existing.lines().any(|l| l.trim() == line.trim()) {
        debug!("Line already present in {}", path.display());
        return Ok(false);
    }

    let mut content = existing;
    if !content.is_empty() && !content.ends_with('\n') {
        content.push('\n');
    }
    content.push_str(line.trim());
    content.push('\n');

    write_fragment(path, &content, mode)?;
    Ok(true)
}
