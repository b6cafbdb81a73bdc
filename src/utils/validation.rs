use std::path::Path;
use uuid::Uuid;

/// Longest extension we will reproduce on a staged file
const MAX_EXTENSION_LEN: usize = 8;

/// Extracts a path-safe, lowercase extension from a caller-supplied
/// filename. Anything that is not short plain ASCII alphanumerics is
/// dropped, so the caller's name can never influence the staging path.
pub fn safe_extension(filename: &str) -> Option<String> {
    let ext = Path::new(filename).extension()?.to_str()?;

    if ext.is_empty() || ext.len() > MAX_EXTENSION_LEN {
        return None;
    }
    if !ext.chars().all(|c| c.is_ascii_alphanumeric()) {
        return None;
    }

    Some(ext.to_ascii_lowercase())
}

/// Collision-resistant staging filename: a random token plus the sanitized
/// extension of the original name, decoupled from everything else the
/// caller sent.
pub fn staging_filename(original: &str) -> String {
    let token = Uuid::new_v4().simple().to_string();
    match safe_extension(original) {
        Some(ext) => format!("{token}.{ext}"),
        None => token,
    }
}
