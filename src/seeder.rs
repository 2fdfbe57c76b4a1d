use crate::{
    directories::{self, DirectoryError, DirectoryStatus},
    errors::{EntryKind, FileOperation, FilesystemConflict, IoError},
};
use indexmap::IndexMap;
use miette::Diagnostic;
use std::{
    fs::{self, File, FileTimes},
    io,
    path::{Path, PathBuf},
};
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum SeedError {
    #[error("I/O error within seeder domain")]
    #[diagnostic(code(dappinit::seeder::io))]
    Io(#[from] IoError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Conflict(#[from] FilesystemConflict),

    #[error("template '{path}' exists but is not a regular file")]
    #[diagnostic(
        code(dappinit::seeder::source_not_a_file),
        help("Only single files can be seeded; point the mapping at a file")
    )]
    SourceNotAFile { path: PathBuf },
}
impl From<DirectoryError> for SeedError {
    fn from(error: DirectoryError) -> Self {
        match error {
            DirectoryError::Io(error) => Self::Io(error),
            DirectoryError::Conflict(conflict) => Self::Conflict(conflict),
        }
    }
}

/// What seeding a single source/destination pair would do right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedStatus {
    MissingSource,
    Create,
    Overwrite,
    AlreadyInPlace,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SeedOutcome {
    Copied {
        source: PathBuf,
        destination: PathBuf,
        overwritten: bool,
    },
    SkippedMissingSource {
        source: PathBuf,
    },
    AlreadyInPlace {
        path: PathBuf,
    },
}

/// Classifies a source/destination pair under `root` without modifying anything.
pub fn inspect(root: &Path, source: &Path, destination: &Path) -> Result<SeedStatus, SeedError> {
    let source_path = root.join(source);

    match fs::metadata(&source_path) {
        Ok(metadata) if metadata.is_file() => {}
        Ok(_) => return Err(SeedError::SourceNotAFile { path: source_path }),
        Err(error) if error.kind() == io::ErrorKind::NotFound => {
            return Ok(SeedStatus::MissingSource);
        }
        Err(error) => {
            return Err(IoError::new(FileOperation::Metadata, source_path, error).into());
        }
    }

    if let Some(parent) = non_empty_parent(destination) {
        if directories::inspect(root, parent)? == DirectoryStatus::Missing {
            return Ok(SeedStatus::Create);
        }
    }

    let destination_path = root.join(destination);

    match fs::metadata(&destination_path) {
        Ok(metadata) if metadata.is_dir() => {
            Err(FilesystemConflict::new(destination_path, EntryKind::File).into())
        }
        Ok(_) => {
            if is_same_file(&source_path, &destination_path)? {
                Ok(SeedStatus::AlreadyInPlace)
            } else {
                Ok(SeedStatus::Overwrite)
            }
        }
        Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(SeedStatus::Create),
        Err(error) => Err(IoError::new(FileOperation::Metadata, destination_path, error).into()),
    }
}

/// Copies every template in `files` whose source exists, replacing existing destinations.
///
/// Missing sources are skipped with a warning. Contents are copied first, then access and
/// modification times, then permissions.
///
/// # Errors
///
/// Returns a [`SeedError`] if:
///
/// - A source exists but is not a regular file.
/// - A destination, or one of its parents, is in the way as the wrong kind of entry.
/// - Reading, writing or updating metadata fails.
pub fn seed(
    root: &Path,
    files: &IndexMap<PathBuf, PathBuf>,
) -> Result<Vec<SeedOutcome>, SeedError> {
    let mut outcomes = Vec::with_capacity(files.len());

    for (source, destination) in files {
        let outcome = match inspect(root, source, destination)? {
            SeedStatus::MissingSource => {
                log::warn!(
                    "template '{}' not found, skipping '{}'",
                    source.display(),
                    destination.display()
                );

                SeedOutcome::SkippedMissingSource {
                    source: source.clone(),
                }
            }
            SeedStatus::AlreadyInPlace => {
                log::debug!("'{}' is its own template, leaving it", source.display());

                SeedOutcome::AlreadyInPlace {
                    path: destination.clone(),
                }
            }
            status @ (SeedStatus::Create | SeedStatus::Overwrite) => {
                if let Some(parent) = non_empty_parent(destination) {
                    let parent = root.join(parent);

                    fs::create_dir_all(&parent)
                        .map_err(|error| IoError::new(FileOperation::Mkdir, parent, error))?;
                }

                let destination_path = root.join(destination);

                // replaced, not truncated, so read-only destinations are overwritten too
                if status == SeedStatus::Overwrite {
                    fs::remove_file(&destination_path).map_err(|error| {
                        IoError::new(FileOperation::Remove, destination_path.clone(), error)
                    })?;
                }

                copy_with_metadata(&root.join(source), &destination_path)?;

                log::debug!("copied {} -> {}", source.display(), destination.display());

                SeedOutcome::Copied {
                    source: source.clone(),
                    destination: destination.clone(),
                    overwritten: status == SeedStatus::Overwrite,
                }
            }
        };

        outcomes.push(outcome);
    }

    Ok(outcomes)
}

fn non_empty_parent(path: &Path) -> Option<&Path> {
    path.parent().filter(|parent| !parent.as_os_str().is_empty())
}

/// Two paths name the same file when they share device and inode, which also catches hard links.
#[cfg(unix)]
fn is_same_file(a: &Path, b: &Path) -> Result<bool, SeedError> {
    use std::os::unix::fs::MetadataExt;

    let a = fs::metadata(a)
        .map_err(|error| IoError::new(FileOperation::Metadata, a.to_path_buf(), error))?;
    let b = fs::metadata(b)
        .map_err(|error| IoError::new(FileOperation::Metadata, b.to_path_buf(), error))?;

    Ok(a.dev() == b.dev() && a.ino() == b.ino())
}

#[cfg(not(unix))]
fn is_same_file(a: &Path, b: &Path) -> Result<bool, SeedError> {
    let a = fs::canonicalize(a)
        .map_err(|error| IoError::new(FileOperation::Metadata, a.to_path_buf(), error))?;
    let b = fs::canonicalize(b)
        .map_err(|error| IoError::new(FileOperation::Metadata, b.to_path_buf(), error))?;

    Ok(a == b)
}

/// Copies bytes, timestamps and permissions from `source` to `destination`.
fn copy_with_metadata(source: &Path, destination: &Path) -> Result<(), IoError> {
    let metadata = fs::metadata(source)
        .map_err(|error| IoError::new(FileOperation::Metadata, source.to_path_buf(), error))?;

    let mut reader = File::open(source)
        .map_err(|error| IoError::new(FileOperation::Read, source.to_path_buf(), error))?;

    let mut writer = File::create(destination)
        .map_err(|error| IoError::new(FileOperation::Write, destination.to_path_buf(), error))?;

    io::copy(&mut reader, &mut writer)
        .map_err(|error| IoError::new(FileOperation::Copy, destination.to_path_buf(), error))?;

    let modified = metadata
        .modified()
        .map_err(|error| IoError::new(FileOperation::Metadata, source.to_path_buf(), error))?;
    let accessed = metadata
        .accessed()
        .map_err(|error| IoError::new(FileOperation::Metadata, source.to_path_buf(), error))?;

    writer
        .set_times(FileTimes::new().set_modified(modified).set_accessed(accessed))
        .map_err(|error| IoError::new(FileOperation::SetTimes, destination.to_path_buf(), error))?;

    drop(writer);

    fs::set_permissions(destination, metadata.permissions()).map_err(|error| {
        IoError::new(FileOperation::SetPermissions, destination.to_path_buf(), error)
    })?;

    Ok(())
}
