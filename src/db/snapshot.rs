//! Whole-database copies between the in-memory working store and a file on
//! disk. Nothing here diffs or merges: a load replaces the working store and a
//! save replaces the file.

use std::path::Path;

use rusqlite::backup::{Backup, StepResult};
use rusqlite::Connection;
use tracing::info;

use crate::db::connection::{open_existing, open_memory, open_or_create};
use crate::error::{LeagueError, Result};

/// Build a fresh working store holding a full copy of the file at `path`.
///
/// The file handle only lives for the duration of the copy. Any failure drops
/// the half-built store, so the caller never sees a partial copy.
pub fn open_working_copy(path: &Path) -> Result<Connection> {
    let durable = open_existing(path)?;
    let mut working = open_memory()?;
    copy_database(&durable, &mut working)?;
    drop(durable);

    info!(path = %path.display(), "loaded working copy");
    Ok(working)
}

/// Overwrite (or create) the file at `path` with the working store's contents.
/// The working store itself is left untouched.
pub fn save_working_copy(working: &Connection, path: &Path) -> Result<()> {
    let mut durable = open_or_create(path)?;
    copy_database(working, &mut durable)?;
    drop(durable);

    info!(path = %path.display(), "saved working copy");
    Ok(())
}

/// Copy every page of `src` into `dst` in a single backup step.
pub fn copy_database(src: &Connection, dst: &mut Connection) -> Result<()> {
    let backup = Backup::new(src, dst).map_err(|err| LeagueError::Copy {
        detail: format!("could not start backup: {err}"),
    })?;

    let step = backup.step(-1).map_err(|err| LeagueError::Copy {
        detail: err.to_string(),
    })?;

    if matches!(step, StepResult::Done) {
        Ok(())
    } else {
        Err(LeagueError::Copy {
            detail: "backup stopped before copying every page".to_string(),
        })
    }
}
