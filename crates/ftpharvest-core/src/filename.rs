//! Local filename derivation from remote paths.
//!
//! Downloads are saved under the remote file's base name, sanitized for
//! Linux filesystems.

/// Fallback name when a remote path yields nothing usable.
const DEFAULT_FILENAME: &str = "download.bin";

/// Derive a safe local filename from a remote path: the last path segment,
/// sanitized (see [`sanitize_filename`]). Falls back to `"download.bin"`
/// when the path has no usable segment.
pub fn local_name_for(remote_path: &str) -> String {
    let base = remote_path
        .trim_end_matches('/')
        .rsplit('/')
        .next()
        .unwrap_or("");
    let sanitized = sanitize_filename(base);
    if sanitized.is_empty() || sanitized == "." || sanitized == ".." {
        DEFAULT_FILENAME.to_string()
    } else {
        sanitized
    }
}

/// Sanitize a candidate filename for Linux:
///
/// - NUL, `/`, `\`, whitespace, and control characters become `_`
/// - consecutive `_` collapse, leading/trailing dots/spaces/underscores trim
/// - length capped at 255 bytes (NAME_MAX), on a char boundary
pub fn sanitize_filename(name: &str) -> String {
    const NAME_MAX: usize = 255;

    let mut out = String::with_capacity(name.len());
    let mut prev_underscore = false;
    for c in name.chars() {
        let mapped = if c == '\0' || c == '/' || c == '\\' || c == ' ' || c == '\t' || c.is_control()
        {
            '_'
        } else {
            c
        };
        if mapped == '_' {
            if !prev_underscore {
                out.push('_');
            }
            prev_underscore = true;
        } else {
            out.push(mapped);
            prev_underscore = false;
        }
    }

    let trimmed = out.trim_matches(|c| c == ' ' || c == '.' || c == '_');
    if trimmed.len() > NAME_MAX {
        let mut take = NAME_MAX;
        while take > 0 && !trimmed.is_char_boundary(take) {
            take -= 1;
        }
        trimmed[..take].to_string()
    } else {
        trimmed.to_string()
    }
}
