//! Discovery of up/down migration pairs in a directory

use crate::error::{ConvertError, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

static MIGRATION_SUFFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\.(up|down)\.sql$").expect("migration suffix pattern is valid"));

/// Which half of a migration pair a file holds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MigrationDirection {
    Up,
    Down,
}

impl MigrationDirection {
    pub fn suffix(&self) -> &'static str {
        match self {
            Self::Up => ".up.sql",
            Self::Down => ".down.sql",
        }
    }

    /// Path of this half of `target` inside `dir`
    pub fn path_for(&self, dir: &Path, target: &str) -> PathBuf {
        dir.join(format!("{}{}", target, self.suffix()))
    }
}

/// Base name shared by a migration pair, if `file_name` is one of its halves
pub fn migration_target(file_name: &str) -> Option<&str> {
    MIGRATION_SUFFIX
        .find(file_name)
        .map(|suffix| &file_name[..suffix.start()])
}

/// Collect the unique target names of every `*.up.sql` / `*.down.sql` entry in `dir`
///
/// Pairs are not validated here; a lone half surfaces when the converter
/// tries to read its missing partner.
pub fn collect_targets(dir: &Path) -> Result<BTreeSet<String>> {
    let mut targets = BTreeSet::new();

    for entry in fs::read_dir(dir).map_err(|e| ConvertError::io(dir, e))? {
        let entry = entry.map_err(|e| ConvertError::io(dir, e))?;
        let file_name = entry.file_name();

        let Some(name) = file_name.to_str() else {
            log::warn!("Skipping non UTF-8 entry: {}", file_name.to_string_lossy());
            continue;
        };

        if let Some(target) = migration_target(name) {
            if targets.insert(target.to_string()) {
                log::debug!("Found migration target: {}", target);
            }
        }
    }

    Ok(targets)
}
