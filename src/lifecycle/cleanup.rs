//! Removal of generated artifact directories.
//!
//! Every target must be a relative path that stays inside the root. All
//! targets are checked before anything is removed, so one bad argument
//! leaves the tree untouched.

use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};

use thiserror::Error;

/// Targets removed when none are named.
pub const DEFAULT_CLEANUP_PATHS: &[&str] = &[".cache", "tmp", "dist"];

#[derive(Debug, Error)]
pub enum CleanupError {
    #[error("cleanup root {path:?} is not accessible: {source}")]
    Root {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("refusing to remove {0:?}: path escapes the cleanup root")]
    OutsideRoot(PathBuf),

    #[error("failed to remove {path:?}: {source}")]
    Remove {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CleanupReport {
    /// Removed targets (or, on a dry run, targets that would be removed).
    pub removed: Vec<PathBuf>,
    /// Targets that did not exist.
    pub missing: Vec<PathBuf>,
    pub dry_run: bool,
}

/// Remove `targets` (relative to `root`).
pub fn remove_paths<P: AsRef<Path>>(
    root: &Path,
    targets: &[P],
    dry_run: bool,
) -> Result<CleanupReport, CleanupError> {
    let root = root.canonicalize().map_err(|source| CleanupError::Root {
        path: root.to_path_buf(),
        source,
    })?;

    let resolved = targets
        .iter()
        .map(|target| resolve(&root, target.as_ref()))
        .collect::<Result<Vec<_>, _>>()?;

    let mut report = CleanupReport {
        dry_run,
        ..CleanupReport::default()
    };

    for (target, path) in resolved {
        let Some(path) = path else {
            report.missing.push(target);
            continue;
        };

        if !dry_run {
            let result = match fs::symlink_metadata(&path) {
                Ok(meta) if meta.is_dir() => fs::remove_dir_all(&path),
                Ok(_) => fs::remove_file(&path),
                Err(source) => Err(source),
            };
            result.map_err(|source| CleanupError::Remove {
                path: path.clone(),
                source,
            })?;
        }
        tracing::info!(path = %path.display(), dry_run, "Removed artifact");
        report.removed.push(target);
    }

    Ok(report)
}

/// Check `target` and return its absolute path, or `None` if it does not
/// exist.
fn resolve(root: &Path, target: &Path) -> Result<(PathBuf, Option<PathBuf>), CleanupError> {
    let escapes = target.as_os_str().is_empty()
        || target
            .components()
            .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir))
        || target.components().all(|c| matches!(c, Component::CurDir));
    if escapes {
        return Err(CleanupError::OutsideRoot(target.to_path_buf()));
    }

    let joined = root.join(target);
    let meta = match fs::symlink_metadata(&joined) {
        Ok(meta) => meta,
        Err(_) => return Ok((target.to_path_buf(), None)),
    };

    if meta.file_type().is_symlink() {
        return resolve_link(root, target, &joined);
    }

    let canonical = joined
        .canonicalize()
        .map_err(|_| CleanupError::OutsideRoot(target.to_path_buf()))?;
    if !canonical.starts_with(root) || canonical == root {
        return Err(CleanupError::OutsideRoot(target.to_path_buf()));
    }

    Ok((target.to_path_buf(), Some(canonical)))
}

/// A symlink target is removed as a link, never through it. The link must
/// sit inside the root, and a link that resolves out of the root is refused.
fn resolve_link(
    root: &Path,
    target: &Path,
    joined: &Path,
) -> Result<(PathBuf, Option<PathBuf>), CleanupError> {
    let outside = || CleanupError::OutsideRoot(target.to_path_buf());

    let (Some(parent), Some(name)) = (joined.parent(), joined.file_name()) else {
        return Err(outside());
    };
    let parent = parent.canonicalize().map_err(|_| outside())?;
    if !parent.starts_with(root) {
        return Err(outside());
    }

    // Dangling links resolve nowhere and are safe to unlink.
    if let Ok(pointee) = joined.canonicalize() {
        if !pointee.starts_with(root) {
            return Err(outside());
        }
    }

    Ok((target.to_path_buf(), Some(parent.join(name))))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn populate(root: &Path) {
        fs::create_dir_all(root.join(".cache/pages")).unwrap();
        fs::write(root.join(".cache/pages/index.html"), "x").unwrap();
        fs::create_dir_all(root.join("dist")).unwrap();
        fs::write(root.join("keep.txt"), "keep").unwrap();
    }

    #[test]
    fn test_removes_defaults_and_reports_missing() {
        let dir = tempfile::tempdir().unwrap();
        populate(dir.path());

        let report = remove_paths(dir.path(), DEFAULT_CLEANUP_PATHS, false).unwrap();
        assert_eq!(report.removed, vec![PathBuf::from(".cache"), PathBuf::from("dist")]);
        assert_eq!(report.missing, vec![PathBuf::from("tmp")]);
        assert!(!dir.path().join(".cache").exists());
        assert!(!dir.path().join("dist").exists());
        assert!(dir.path().join("keep.txt").exists());
    }

    #[test]
    fn test_dry_run_keeps_files() {
        let dir = tempfile::tempdir().unwrap();
        populate(dir.path());

        let report = remove_paths(dir.path(), &[".cache"], true).unwrap();
        assert!(report.dry_run);
        assert_eq!(report.removed, vec![PathBuf::from(".cache")]);
        assert!(dir.path().join(".cache/pages/index.html").exists());
    }

    #[test]
    fn test_refuses_escaping_paths() {
        let dir = tempfile::tempdir().unwrap();
        populate(dir.path());

        for bad in ["../outside", "/etc", "dist/../..", ".", ""] {
            let result = remove_paths(dir.path(), &["dist", bad], false);
            assert!(matches!(result, Err(CleanupError::OutsideRoot(_))), "{bad}");
        }
        // Nothing was removed before the bad target was found.
        assert!(dir.path().join("dist").exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_refuses_symlink_out_of_root() {
        let outside = tempfile::tempdir().unwrap();
        let dir = tempfile::tempdir().unwrap();
        std::os::unix::fs::symlink(outside.path(), dir.path().join("tmp")).unwrap();

        let result = remove_paths(dir.path(), &["tmp"], false);
        assert!(matches!(result, Err(CleanupError::OutsideRoot(_))));
        assert!(outside.path().exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_symlink_into_root_removes_only_the_link() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("src")).unwrap();
        fs::write(dir.path().join("src/main.rs"), "fn main() {}").unwrap();
        std::os::unix::fs::symlink(dir.path().join("src"), dir.path().join("tmp")).unwrap();

        let report = remove_paths(dir.path(), &["tmp"], false).unwrap();
        assert_eq!(report.removed, vec![PathBuf::from("tmp")]);
        assert!(fs::symlink_metadata(dir.path().join("tmp")).is_err());
        assert!(dir.path().join("src/main.rs").exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_dangling_symlink_is_unlinked() {
        let dir = tempfile::tempdir().unwrap();
        std::os::unix::fs::symlink(dir.path().join("gone"), dir.path().join("dist")).unwrap();

        let report = remove_paths(dir.path(), &["dist"], false).unwrap();
        assert_eq!(report.removed, vec![PathBuf::from("dist")]);
        assert!(fs::symlink_metadata(dir.path().join("dist")).is_err());
    }

    #[test]
    fn test_missing_root() {
        let dir = tempfile::tempdir().unwrap();
        let result = remove_paths(&dir.path().join("nope"), DEFAULT_CLEANUP_PATHS, false);
        assert!(matches!(result, Err(CleanupError::Root { .. })));
    }
}
