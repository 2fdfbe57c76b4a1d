use std::path::{Component, Path, PathBuf};

/// Normalizes a project-relative path lexically.
///
/// `.` segments are dropped and `..` pops the previous segment. Returns `None` when the
/// path is absolute, empty after normalization, or climbs above the project root.
pub fn normalize_relative(source: &str) -> Option<PathBuf> {
    let input = Path::new(source);

    let mut new_path = PathBuf::new();

    for component in input.components() {
        match component {
            // Skip the current-dir marker "."
            Component::CurDir => {}

            // For "..", pop the last component; nothing left to pop means we left the root
            Component::ParentDir => {
                if !new_path.pop() {
                    return None;
                }
            }

            Component::Normal(segment) => new_path.push(segment),

            Component::RootDir | Component::Prefix(_) => return None,
        }
    }

    if new_path.as_os_str().is_empty() {
        None
    } else {
        Some(new_path)
    }
}
