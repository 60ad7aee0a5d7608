//! Convert paired `*.up.sql` / `*.down.sql` migrations into goose migration files
//!
//! A run resolves the directory, refuses to touch a dirty Git working tree,
//! pairs migration files by name and rewrites each pair into `<name>.sql`
//! carrying `-- +goose` directives. The first failure stops the run.

pub mod converter;
pub mod error;
pub mod pairing;
pub mod paths;
pub mod repository;

pub use converter::{convert_target, render_goose_migration};
pub use error::{ConvertError, Result};
pub use pairing::{collect_targets, migration_target, MigrationDirection};
pub use paths::resolve_migrations_directory;
pub use repository::{ensure_clean_repository, find_repository_root, GitCli, WorkingTreeStatus};

use std::fmt;
use std::path::{Path, PathBuf};

/// Outcome of a completed conversion run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionReport {
    pub directory: PathBuf,
    pub written: Vec<PathBuf>,
}

impl ConversionReport {
    pub fn count(&self) -> usize {
        self.written.len()
    }
}

impl fmt::Display for ConversionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Written {} migrations!", self.count())
    }
}

/// Run every stage against `dir`, stopping at the first error
pub fn convert_directory(dir: &Path, status: &dyn WorkingTreeStatus) -> Result<ConversionReport> {
    let directory = resolve_migrations_directory(dir)?;
    log::info!("Converting migrations in {}", directory.display());

    ensure_clean_repository(&directory, status)?;

    let targets = collect_targets(&directory)?;
    log::info!("Found {} migration targets", targets.len());

    let mut written = Vec::with_capacity(targets.len());
    for target in &targets {
        written.push(convert_target(&directory, target)?);
    }

    Ok(ConversionReport { directory, written })
}
