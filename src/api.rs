use crate::{
    config::{self, ScaffoldConfig},
    directories::{self, DirectoryOutcome},
    errors::{EntryKind, FileOperation, FilesystemConflict, IoError},
    plan::Plan,
    seeder::{self, SeedOutcome},
};
use std::{fs, io, path::Path};

#[derive(Debug, thiserror::Error, miette::Diagnostic)]
pub enum ScaffoldError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Config(#[from] config::ConfigError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Root(#[from] FilesystemConflict),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Io(#[from] IoError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Directory(#[from] directories::DirectoryError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Seed(#[from] seeder::SeedError),
}

/// Everything a completed run did, in the order it happened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    pub directories: Vec<DirectoryOutcome>,
    pub files: Vec<SeedOutcome>,
}
impl Summary {
    pub fn created_directories(&self) -> usize {
        self.directories
            .iter()
            .filter(|outcome| matches!(outcome, DirectoryOutcome::Created(_)))
            .count()
    }

    pub fn copied_files(&self) -> usize {
        self.files
            .iter()
            .filter(|outcome| matches!(outcome, SeedOutcome::Copied { .. }))
            .count()
    }
}

/// Loads the manifest at `path`, or the built-in layout when there is none.
pub fn load_config(path: Option<&Path>) -> Result<ScaffoldConfig, ScaffoldError> {
    match path {
        Some(path) => {
            log::debug!("loading manifest: {}", path.display());

            Ok(ScaffoldConfig::from_file(path)?)
        }
        None => Ok(ScaffoldConfig::default()),
    }
}

fn check_root(root: &Path) -> Result<(), ScaffoldError> {
    match fs::metadata(root) {
        Ok(metadata) if !metadata.is_dir() => {
            Err(FilesystemConflict::new(root.to_path_buf(), EntryKind::Directory).into())
        }
        Ok(_) => Ok(()),
        Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(error) => Err(IoError::new(FileOperation::Metadata, root.to_path_buf(), error).into()),
    }
}

/// Creates the configured directories under `root`, then seeds the configured templates.
///
/// Running it again on a scaffolded project changes nothing but re-copying templates.
///
/// # Errors
///
/// Returns a [`ScaffoldError`] if:
///
/// - `root` or a configured directory is occupied by a non-directory.
/// - A destination file is occupied by a directory.
/// - A template exists but is not a regular file.
/// - Any filesystem operation fails.
///
/// Nothing is rolled back: whatever was created before the failure stays.
pub fn scaffold(root: &Path, config: &ScaffoldConfig) -> Result<Summary, ScaffoldError> {
    check_root(root)?;

    log::debug!("scaffolding project at: {}", root.display());

    let directories = directories::initialize(root, &config.directories)?;

    let files = seeder::seed(root, &config.files)?;

    Ok(Summary { directories, files })
}

/// Works out what [`scaffold`] would do without modifying anything.
///
/// # Errors
///
/// Returns a [`ScaffoldError`] for the same conflicts [`scaffold`] would hit.
pub fn plan(root: &Path, config: &ScaffoldConfig) -> Result<Plan, ScaffoldError> {
    check_root(root)?;

    Plan::build(root, config)
}
