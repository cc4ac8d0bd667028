//! Path and file utilities shared by every other component: existence
//! checks, mtime comparison, glob expansion, and `${NAME}` environment
//! substitution in descriptor-supplied patterns.

use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// Expands `${NAME}` references in a pattern using the process
/// environment. Unset variables expand to the empty string.
///
/// # Examples
///
/// ```
/// use envhealth_core::paths::expand_env;
///
/// unsafe { std::env::set_var("ENVHEALTH_TEST_HOME", "/home/dev") };
/// assert_eq!(
///     expand_env("${ENVHEALTH_TEST_HOME}/cache/*.jar"),
///     "/home/dev/cache/*.jar"
/// );
/// ```
pub fn expand_env(pattern: &str) -> String {
    let mut out = String::with_capacity(pattern.len());
    let bytes = pattern.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'$' && bytes.get(i + 1) == Some(&b'{') {
            if let Some(end) = pattern[i + 2..].find('}') {
                let name = &pattern[i + 2..i + 2 + end];
                if let Ok(value) = std::env::var(name) {
                    out.push_str(&value);
                }
                i += 2 + end + 1;
                continue;
            }
        }
        out.push(bytes[i] as char);
        i += 1;
    }
    out
}

/// Joins `root` with a (possibly env-expanded) relative path.
pub fn resolve(root: &Path, relative: &str) -> PathBuf {
    root.join(expand_env(relative))
}

/// Returns true iff the path exists on disk.
pub fn exists(path: &Path) -> bool {
    path.exists()
}

/// Returns the last-modified time of a path, if it exists and the
/// platform reports one.
pub fn mtime(path: &Path) -> Option<SystemTime> {
    std::fs::metadata(path).ok()?.modified().ok()
}

/// Expands environment variables in a glob pattern, joins it with
/// `root`, and returns every matching path, most-recently-modified last
/// is NOT guaranteed — callers needing "newest" must sort explicitly.
pub fn glob_matches(root: &Path, pattern: &str) -> Vec<PathBuf> {
    let expanded = resolve(root, pattern);
    let pattern_str = expanded.to_string_lossy();
    match glob::glob(&pattern_str) {
        Ok(paths) => paths.filter_map(Result::ok).collect(),
        Err(_) => Vec::new(),
    }
}

/// Returns the newest (by mtime) of a set of paths, or `None` if empty
/// or none have a readable mtime.
pub fn newest(paths: &[PathBuf]) -> Option<&PathBuf> {
    paths
        .iter()
        .filter_map(|p| mtime(p).map(|t| (t, p)))
        .max_by_key(|(t, _)| *t)
        .map(|(_, p)| p)
}
