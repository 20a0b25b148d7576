//! Reading Transition fragments from files or stdin with a size cap.

use std::io::Read;
use std::path::Path;

use anyhow::{bail, Context, Result};

/// Path argument that means "read standard input".
pub const STDIN_PATH: &str = "-";

/// Read `path` (or stdin for `-`) as UTF-8, refusing anything larger than
/// `max_bytes`.
pub fn read_fragment(path: &Path, max_bytes: u64) -> Result<String> {
    if path.as_os_str() == STDIN_PATH {
        return read_limited(std::io::stdin().lock(), max_bytes, "<stdin>");
    }
    let file = std::fs::File::open(path)
        .with_context(|| format!("failed to open {}", path.display()))?;
    read_limited(file, max_bytes, &path.display().to_string())
}

/// Read at most `max_bytes` from `reader`; one byte more is an error.
pub fn read_limited<R: Read>(reader: R, max_bytes: u64, label: &str) -> Result<String> {
    let mut buf = Vec::new();
    reader
        .take(max_bytes.saturating_add(1))
        .read_to_end(&mut buf)
        .with_context(|| format!("failed to read {label}"))?;
    if buf.len() as u64 > max_bytes {
        bail!("{label} exceeds the {max_bytes}-byte input limit");
    }
    String::from_utf8(buf).with_context(|| format!("{label} is not valid UTF-8"))
}
