use crate::{
    errors::{FileFormat, FileOperation, IoError, ParseError},
    utils::normalize_relative,
};
use indexmap::IndexMap;
use miette::Diagnostic;
use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
};
use thiserror::Error;

const DEFAULT_DIRECTORIES: [&str; 9] = [
    "src/contracts",
    "src/components/ui",
    "src/components/web3",
    "src/context",
    "src/hooks",
    "src/styles",
    "src/utils",
    "public",
    "scripts",
];

const DEFAULT_FILES: [(&str, &str); 2] = [
    (".env.example", ".env"),
    ("tailwind.config.js", "tailwind.config.js"),
];

#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    #[error("I/O error within config domain")]
    #[diagnostic(code(dappinit::config::io))]
    Io(#[from] IoError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Parse(#[from] ParseError),

    #[error("invalid path '{path}' in {section}")]
    #[diagnostic(
        code(dappinit::config::invalid_path),
        help("Paths must be relative to the project root and must not climb above it")
    )]
    InvalidPath { path: String, section: &'static str },

    #[error("'{path}' appears more than once as a {role} in files")]
    #[diagnostic(
        code(dappinit::config::duplicate_path),
        help("Each template and each destination may only be listed once")
    )]
    DuplicatePath { path: PathBuf, role: &'static str },
}

/// Manifest layout as written on disk. Missing keys keep the built-in values.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct Manifest {
    directories: Option<Vec<String>>,
    files: Option<IndexMap<String, String>>,
}

/// Directories to create and template files to seed, all relative to the project root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScaffoldConfig {
    pub directories: Vec<PathBuf>,
    pub files: IndexMap<PathBuf, PathBuf>,
}
impl Default for ScaffoldConfig {
    fn default() -> Self {
        Self {
            directories: DEFAULT_DIRECTORIES.iter().map(PathBuf::from).collect(),
            files: DEFAULT_FILES
                .iter()
                .map(|(source, destination)| (PathBuf::from(source), PathBuf::from(destination)))
                .collect(),
        }
    }
}
impl ScaffoldConfig {
    /// Builds a config from raw path strings, normalizing and validating each one.
    pub fn from_parts<D, F, S>(directories: D, files: F) -> Result<Self, ConfigError>
    where
        D: IntoIterator<Item = S>,
        F: IntoIterator<Item = (S, S)>,
        S: AsRef<str>,
    {
        Ok(Self {
            directories: checked_directories(directories)?,
            files: checked_files(files)?,
        })
    }

    pub fn from_toml_str(content: &str, origin: &Path) -> Result<Self, ConfigError> {
        let manifest: Manifest = toml::from_str(content).map_err(|error| {
            ParseError::new(FileFormat::Toml, origin.to_path_buf(), error)
        })?;

        let defaults = Self::default();

        let directories = match manifest.directories {
            Some(dirs) => checked_directories(dirs)?,
            None => defaults.directories,
        };

        let files = match manifest.files {
            Some(files) => checked_files(files)?,
            None => defaults.files,
        };

        Ok(Self { directories, files })
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        let content = fs::read_to_string(path)
            .map_err(|error| IoError::new(FileOperation::Read, path.to_path_buf(), error))?;

        Self::from_toml_str(&content, path)
    }
}

fn checked_path(raw: &str, section: &'static str) -> Result<PathBuf, ConfigError> {
    normalize_relative(raw).ok_or_else(|| ConfigError::InvalidPath {
        path: raw.to_string(),
        section,
    })
}

fn checked_directories<D, S>(directories: D) -> Result<Vec<PathBuf>, ConfigError>
where
    D: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    directories
        .into_iter()
        .map(|dir| checked_path(dir.as_ref(), "directories"))
        .collect()
}

fn checked_files<F, S>(files: F) -> Result<IndexMap<PathBuf, PathBuf>, ConfigError>
where
    F: IntoIterator<Item = (S, S)>,
    S: AsRef<str>,
{
    let mut mapping: IndexMap<PathBuf, PathBuf> = IndexMap::new();

    for (source, destination) in files {
        let source = checked_path(source.as_ref(), "files")?;
        let destination = checked_path(destination.as_ref(), "files")?;

        if mapping.contains_key(&source) {
            return Err(ConfigError::DuplicatePath {
                path: source,
                role: "template",
            });
        }
        if mapping.values().any(|existing| existing == &destination) {
            return Err(ConfigError::DuplicatePath {
                path: destination,
                role: "destination",
            });
        }

        mapping.insert(source, destination);
    }

    Ok(mapping)
}
