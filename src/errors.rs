use miette::Diagnostic;
use std::{fmt, path::PathBuf};
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum FileOperation {
    #[error("reading a file")]
    Read,
    #[error("reading metadata")]
    Metadata,
    #[error("writing a file")]
    Write,
    #[error("copying a file")]
    Copy,
    #[error("setting file times")]
    SetTimes,
    #[error("setting permissions")]
    SetPermissions,
    #[error("removing a file")]
    Remove,
    #[error("creating a directory")]
    Mkdir,
}
#[derive(Debug, Error, Diagnostic)]
#[error("I/O error: {operation} on path '{path}'")]
#[diagnostic(
    code(dappinit::io),
    help("Check file permissions, disk space, or that the path is correct.")
)]
pub struct IoError {
    pub operation: FileOperation,
    pub path: PathBuf,
    #[source]
    pub source: std::io::Error,
}
impl IoError {
    pub fn new(operation: FileOperation, path: PathBuf, error: std::io::Error) -> Self {
        Self {
            operation,
            path,
            source: error,
        }
    }
}

/// What a configured path is supposed to be on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Directory,
    File,
}
impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Directory => write!(f, "directory"),
            Self::File => write!(f, "file"),
        }
    }
}

/// A path is occupied by an entry of the wrong kind.
#[derive(Debug, Error, Diagnostic)]
#[error("'{path}' already exists but a {expected} is needed there")]
#[diagnostic(
    code(dappinit::filesystem_conflict),
    help("Move or rename the entry occupying this path, then run again.")
)]
pub struct FilesystemConflict {
    pub path: PathBuf,
    pub expected: EntryKind,
}
impl FilesystemConflict {
    pub fn new(path: PathBuf, expected: EntryKind) -> Self {
        Self { path, expected }
    }
}

#[derive(Debug, Error, Diagnostic)]
pub enum FileFormat {
    #[error("toml")]
    Toml,
}
#[derive(Debug, Error, Diagnostic)]
#[error("Parsing error: {file_format} on '{path}'")]
#[diagnostic(code(dappinit::parse), help("Review file"))]
pub struct ParseError {
    pub file_format: FileFormat,
    pub path: PathBuf,
    #[source]
    pub source: toml::de::Error,
}
impl ParseError {
    pub fn new(file_format: FileFormat, path: PathBuf, error: toml::de::Error) -> Self {
        Self {
            file_format,
            path,
            source: error,
        }
    }
}
