//! Path normalization for module prefixes and endpoint sub-paths.

use crate::router::error::RegistrationError;

/// Normalize a module prefix or full route path.
///
/// Every `/`-separated segment must be non-empty, ASCII alphanumeric and
/// start with a letter. A single leading `/` is accepted and always present
/// in the result, so normalizing an already normalized path returns it
/// unchanged. Empty segments (`a//b`, a trailing `/`) are rejected.
pub fn normalize_path(path: &str) -> Result<String, RegistrationError> {
    let trimmed = path.strip_prefix('/').unwrap_or(path);
    validate_segments(path, trimmed)?;
    Ok(format!("/{trimmed}"))
}

/// Normalize an endpoint sub-path.
///
/// Backslashes read as `/` and stray slashes at either end are dropped
/// before the segments are checked like [`normalize_path`]. The result has
/// no leading slash and is meant to be appended to a normalized prefix.
pub fn normalize_sub_path(path: &str) -> Result<String, RegistrationError> {
    let unified = path.replace('\\', "/");
    let trimmed = unified.trim_matches('/');
    validate_segments(path, trimmed)?;
    Ok(trimmed.to_string())
}

/// Compose the full route path from a normalized prefix and sub-path.
pub(crate) fn join(prefix: &str, sub_path: &str) -> String {
    format!("{}/{sub_path}", prefix.trim_end_matches('/'))
}

fn validate_segments(original: &str, trimmed: &str) -> Result<(), RegistrationError> {
    let invalid = |reason: String| RegistrationError::InvalidPath {
        path: original.to_string(),
        reason,
    };

    for segment in trimmed.split('/') {
        if segment.is_empty() {
            return Err(invalid(
                "empty path segment (doubled or trailing '/'?)".to_string(),
            ));
        }
        if !segment.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(invalid(format!(
                "segment '{segment}' must only contain letters and digits"
            )));
        }
        if !segment.starts_with(|c: char| c.is_ascii_alphabetic()) {
            return Err(invalid(format!("segment '{segment}' must start with a letter")));
        }
    }
    Ok(())
}
