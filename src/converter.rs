//! Rewriting of an up/down pair into a single goose migration file

use crate::error::{ConvertError, Result};
use crate::pairing::MigrationDirection;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

const GOOSE_UP: &str = "-- +goose Up";
const GOOSE_DOWN: &str = "-- +goose Down";
const STATEMENT_BEGIN: &str = "-- +goose StatementBegin";
const STATEMENT_END: &str = "-- +goose StatementEnd";

/// Render the goose file body for an up script and an optional down script
///
/// The down section is emitted only when `down` is non-empty before trimming,
/// so a whitespace-only down file still yields an (empty) down block.
pub fn render_goose_migration(up: &str, down: &str) -> String {
    let mut content = format!("{GOOSE_UP}\n{STATEMENT_BEGIN}\n{}\n{STATEMENT_END}", up.trim());

    if !down.is_empty() {
        content.push_str(&format!(
            "\n\n{GOOSE_DOWN}\n{STATEMENT_BEGIN}\n{}\n{STATEMENT_END}",
            down.trim()
        ));
    }

    content
}

/// Convert the pair named `target` in `dir` and return the written path
///
/// Each half is removed right after it is read. If the down half cannot be
/// read, the up half is already gone and nothing is written.
pub fn convert_target(dir: &Path, target: &str) -> Result<PathBuf> {
    let up = take_migration_half(dir, target, MigrationDirection::Up)?;
    let down = take_migration_half(dir, target, MigrationDirection::Down)?;

    let output_path = dir.join(format!("{}.sql", target));
    write_migration_file(&output_path, &render_goose_migration(&up, &down))?;
    log::info!("Wrote {}", output_path.display());

    Ok(output_path)
}

/// Read one half of a pair and delete it
fn take_migration_half(dir: &Path, target: &str, direction: MigrationDirection) -> Result<String> {
    let path = direction.path_for(dir, target);

    let content = fs::read_to_string(&path).map_err(|e| ConvertError::io(&path, e))?;
    fs::remove_file(&path).map_err(|e| ConvertError::io(&path, e))?;
    log::debug!("Consumed {} ({} bytes)", path.display(), content.len());

    Ok(content)
}

fn write_migration_file(path: &Path, content: &str) -> Result<()> {
    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);

    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o664);
    }

    let mut file = options.open(path).map_err(|e| ConvertError::io(path, e))?;
    file.write_all(content.as_bytes())
        .map_err(|e| ConvertError::io(path, e))
}
