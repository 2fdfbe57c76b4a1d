use crate::{
    api::ScaffoldError,
    config::ScaffoldConfig,
    directories::{self, DirectoryStatus},
    errors::EntryKind,
    seeder::{self, SeedStatus},
};
use std::path::{Path, PathBuf};

/// What a run would do to a single configured path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlannedAction {
    /// Directory will be created.
    Create,
    /// Directory is already there.
    Keep,
    /// File will be copied from a template.
    Copy { from: PathBuf },
    /// File exists and will be replaced by the template.
    Overwrite { from: PathBuf },
    /// Template is missing, nothing happens.
    Skip { from: PathBuf },
    /// File is its own template.
    AlreadyInPlace,
}

/// A single path of the project layout together with the action planned for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedEntry {
    /// Path relative to the project root.
    pub path: PathBuf,
    pub kind: EntryKind,
    pub action: PlannedAction,
}

/// Ordered list of everything a run would touch, directories first.
///
/// Built from the same checks a real run performs, so a plan that builds without error
/// describes a run that would not hit a conflict, as long as nothing changes on disk in between.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Plan {
    pub entries: Vec<PlannedEntry>,
}
impl Plan {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub fn build(root: &Path, config: &ScaffoldConfig) -> Result<Self, ScaffoldError> {
        let mut plan = Self::new();

        for relative in &config.directories {
            let action = match directories::inspect(root, relative)? {
                DirectoryStatus::Missing => PlannedAction::Create,
                DirectoryStatus::Present => PlannedAction::Keep,
            };

            plan.entries.push(PlannedEntry {
                path: relative.clone(),
                kind: EntryKind::Directory,
                action,
            });
        }

        for (source, destination) in &config.files {
            let from = source.clone();

            let action = match seeder::inspect(root, source, destination)? {
                SeedStatus::MissingSource => PlannedAction::Skip { from },
                SeedStatus::Create => PlannedAction::Copy { from },
                SeedStatus::Overwrite => PlannedAction::Overwrite { from },
                SeedStatus::AlreadyInPlace => PlannedAction::AlreadyInPlace,
            };

            plan.entries.push(PlannedEntry {
                path: destination.clone(),
                kind: EntryKind::File,
                action,
            });
        }

        Ok(plan)
    }

    /// `true` when running would change nothing on disk.
    pub fn is_noop(&self) -> bool {
        self.entries.iter().all(|entry| {
            matches!(
                entry.action,
                PlannedAction::Keep | PlannedAction::Skip { .. } | PlannedAction::AlreadyInPlace
            )
        })
    }
}
