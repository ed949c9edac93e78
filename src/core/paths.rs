//! Path helpers for configured locations.

use std::env;
use std::fs;
use std::path::{Component, Path, PathBuf};

/// Turn a configured path into an absolute one.
///
/// A leading `~` is expanded first. Paths that exist are canonicalized, which
/// resolves symlinks; paths that don't are joined onto the working directory
/// and cleaned of `.` and `..` lexically.
pub fn resolve_config_path(path: &Path) -> PathBuf {
    let absolute = absolutize(&expand_home(path));
    fs::canonicalize(&absolute).unwrap_or_else(|_| clean_lexically(&absolute))
}

/// Replace a leading `~` with `$HOME`. Paths without one are returned as-is.
pub fn expand_home(path: &Path) -> PathBuf {
    let Ok(rest) = path.strip_prefix("~") else {
        return path.to_path_buf();
    };
    env::var_os("HOME").map_or_else(|| path.to_path_buf(), |home| PathBuf::from(home).join(rest))
}

fn absolutize(path: &Path) -> PathBuf {
    if path.is_absolute() {
        return path.to_path_buf();
    }
    env::current_dir().map_or_else(|_| path.to_path_buf(), |cwd| cwd.join(path))
}

/// `..` never climbs above the root.
fn clean_lexically(path: &Path) -> PathBuf {
    let mut kept: Vec<Component<'_>> = Vec::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if matches!(kept.last(), Some(Component::Normal(_))) {
                    kept.pop();
                }
            }
            other => kept.push(other),
        }
    }
    kept.into_iter().collect()
}
