//! Helpers for cleaning user-supplied names before they touch the filesystem
//! and for keeping local paths out of tracing span attributes.

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

static UNSAFE_RUN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[^a-zA-Z0-9._-]+").expect("static filename pattern is valid")
});

/// Longest name [`sanitize_filename`] returns. Leaves room for the
/// timestamp prefix and collision suffix under the usual 255-byte limit.
pub const MAX_SAFE_NAME_BYTES: usize = 200;

/// Extensions longer than this are treated as part of the stem.
const MAX_EXTENSION_BYTES: usize = 16;

/// Replaces every run of characters outside `[A-Za-z0-9._-]` with `_` and
/// caps the result at [`MAX_SAFE_NAME_BYTES`], keeping the extension.
///
/// - `"IPTU 2026 (final).pdf"` → `"IPTU_2026_final_.pdf"`
/// - `"../../etc/passwd"` → `".._.._etc_passwd"`
/// - `""` → `"file"`
pub fn sanitize_filename(name: &str) -> String {
    let cleaned = UNSAFE_RUN.replace_all(name, "_").into_owned();
    if cleaned.is_empty() {
        "file".to_string()
    } else {
        truncate_keeping_extension(cleaned)
    }
}

// Input is ASCII after cleaning, so byte offsets are char boundaries.
fn truncate_keeping_extension(name: String) -> String {
    if name.len() <= MAX_SAFE_NAME_BYTES {
        return name;
    }

    let ext = match name.rfind('.') {
        Some(pos) if pos > 0 && name.len() - pos <= MAX_EXTENSION_BYTES => &name[pos..],
        _ => "",
    };
    let stem_len = MAX_SAFE_NAME_BYTES - ext.len();
    format!("{}{}", &name[..stem_len], ext)
}

/// Returns only the filename component of a path (no directory).
///
/// Safe for span fields: reveals the staged name without exposing the
/// scratch directory layout.
pub fn redact_path(path: &Path) -> String {
    path.file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("<unknown>")
        .to_string()
}
