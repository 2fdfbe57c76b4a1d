use crate::errors::{EntryKind, FileOperation, FilesystemConflict, IoError};
use miette::Diagnostic;
use std::{
    fs, io,
    path::{Path, PathBuf},
};
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum DirectoryError {
    #[error("I/O error within directories domain")]
    #[diagnostic(code(dappinit::directories::io))]
    Io(#[from] IoError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Conflict(#[from] FilesystemConflict),
}

/// Current on-disk state of a configured directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectoryStatus {
    Missing,
    Present,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DirectoryOutcome {
    Created(PathBuf),
    AlreadyPresent(PathBuf),
}

/// Walks `relative` one segment at a time under `root` without modifying anything.
///
/// Stops at the first segment that does not exist yet. Any segment that exists but is not a
/// directory (symlinks are followed) is reported as a [`FilesystemConflict`].
pub fn inspect(root: &Path, relative: &Path) -> Result<DirectoryStatus, DirectoryError> {
    let mut current = root.to_path_buf();

    for component in relative.components() {
        current.push(component);

        match fs::metadata(&current) {
            Ok(metadata) if metadata.is_dir() => {}
            Ok(_) => {
                return Err(FilesystemConflict::new(current, EntryKind::Directory).into());
            }
            Err(error) if error.kind() == io::ErrorKind::NotFound => {
                return Ok(DirectoryStatus::Missing);
            }
            Err(error) => {
                return Err(IoError::new(FileOperation::Metadata, current, error).into());
            }
        }
    }

    Ok(DirectoryStatus::Present)
}

/// Makes sure every path in `directories` exists as a directory under `root`.
///
/// Missing parents are created along the way and existing directories are left alone. The
/// first conflict or I/O failure aborts the run; directories created before it stay.
///
/// # Errors
///
/// Returns a [`DirectoryError`] if:
///
/// - A path, or one of its parents, is occupied by something other than a directory.
/// - A directory cannot be inspected or created.
pub fn initialize(
    root: &Path,
    directories: &[PathBuf],
) -> Result<Vec<DirectoryOutcome>, DirectoryError> {
    let mut outcomes = Vec::with_capacity(directories.len());

    for relative in directories {
        let outcome = match inspect(root, relative)? {
            DirectoryStatus::Present => {
                log::debug!("directory already present: {}", relative.display());

                DirectoryOutcome::AlreadyPresent(relative.clone())
            }
            DirectoryStatus::Missing => {
                create_directory(&root.join(relative))?;

                log::debug!("created directory: {}", relative.display());

                DirectoryOutcome::Created(relative.clone())
            }
        };

        outcomes.push(outcome);
    }

    Ok(outcomes)
}

/// Creates `path` and any missing parents via [`std::fs::create_dir_all`].
///
/// Something that appeared in the way since [`inspect`] ran is still reported as a conflict.
fn create_directory(path: &Path) -> Result<(), DirectoryError> {
    match fs::create_dir_all(path) {
        Ok(()) => Ok(()),
        Err(error) if path.exists() && !path.is_dir() => {
            log::debug!("create_dir_all failed on {}: {}", path.display(), error);

            Err(FilesystemConflict::new(path.to_path_buf(), EntryKind::Directory).into())
        }
        Err(error) => Err(IoError::new(FileOperation::Mkdir, path.to_path_buf(), error).into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dirs(paths: &[&str]) -> Vec<PathBuf> {
        paths.iter().map(PathBuf::from).collect()
    }

    #[test]
    fn creates_missing_directories_with_parents() {
        let root = tempfile::tempdir().unwrap();
        let wanted = dirs(&["src/components/ui", "public"]);

        let outcomes = initialize(root.path(), &wanted).unwrap();

        assert!(root.path().join("src/components/ui").is_dir());
        assert!(root.path().join("public").is_dir());
        assert_eq!(
            outcomes,
            vec![
                DirectoryOutcome::Created(PathBuf::from("src/components/ui")),
                DirectoryOutcome::Created(PathBuf::from("public")),
            ]
        );
    }

    #[test]
    fn existing_directory_is_a_no_op() {
        let root = tempfile::tempdir().unwrap();
        fs::create_dir_all(root.path().join("src/hooks")).unwrap();
        fs::write(root.path().join("src/hooks/useWallet.ts"), "export {}").unwrap();

        let outcomes = initialize(root.path(), &dirs(&["src/hooks"])).unwrap();

        assert_eq!(
            outcomes,
            vec![DirectoryOutcome::AlreadyPresent(PathBuf::from("src/hooks"))]
        );
        assert!(root.path().join("src/hooks/useWallet.ts").is_file());
    }

    #[test]
    fn second_run_reports_everything_present() {
        let root = tempfile::tempdir().unwrap();
        let wanted = dirs(&["src/context", "scripts"]);

        initialize(root.path(), &wanted).unwrap();
        let outcomes = initialize(root.path(), &wanted).unwrap();

        assert!(outcomes
            .iter()
            .all(|outcome| matches!(outcome, DirectoryOutcome::AlreadyPresent(_))));
    }

    #[test]
    fn file_in_place_of_directory_is_a_conflict() {
        let root = tempfile::tempdir().unwrap();
        fs::write(root.path().join("public"), "not a dir").unwrap();

        let error = initialize(root.path(), &dirs(&["public"])).unwrap_err();

        match error {
            DirectoryError::Conflict(conflict) => {
                assert_eq!(conflict.path, root.path().join("public"));
                assert_eq!(conflict.expected, EntryKind::Directory);
            }
            other => panic!("expected a conflict, got {other:?}"),
        }
    }

    #[test]
    fn file_in_place_of_parent_is_a_conflict() {
        let root = tempfile::tempdir().unwrap();
        fs::write(root.path().join("src"), "").unwrap();

        let error = inspect(root.path(), Path::new("src/hooks")).unwrap_err();

        assert!(matches!(
            error,
            DirectoryError::Conflict(FilesystemConflict { ref path, .. }) if path == &root.path().join("src")
        ));
    }

    #[test]
    fn conflict_aborts_without_touching_later_entries() {
        let root = tempfile::tempdir().unwrap();
        fs::write(root.path().join("scripts"), "").unwrap();

        let result = initialize(root.path(), &dirs(&["public", "scripts", "src/utils"]));

        assert!(result.is_err());
        assert!(root.path().join("public").is_dir());
        assert!(!root.path().join("src/utils").exists());
    }

    #[test]
    fn inspect_reports_missing_and_present() {
        let root = tempfile::tempdir().unwrap();
        fs::create_dir(root.path().join("src")).unwrap();

        assert_eq!(
            inspect(root.path(), Path::new("src")).unwrap(),
            DirectoryStatus::Present
        );
        assert_eq!(
            inspect(root.path(), Path::new("src/styles")).unwrap(),
            DirectoryStatus::Missing
        );
    }
}
