use std::path::Path;

use rusqlite::{Connection, OpenFlags};

use crate::error::{LeagueError, Result};

/// Path label used in errors about the in-memory working store.
const MEMORY_LABEL: &str = ":memory:";

/// Create the three tables the simulator reads and writes, if they are not
/// there yet. Databases produced elsewhere are loaded as-is; this is only
/// needed when starting a league database from scratch.
pub fn ensure_schema(conn: &Connection) -> Result<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS Leagues (
            id INTEGER PRIMARY KEY,
            name TEXT
        )",
        [],
    )
    .map_err(LeagueError::query("create Leagues"))?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS Teams (
            id INTEGER PRIMARY KEY,
            name TEXT
        )",
        [],
    )
    .map_err(LeagueError::query("create Teams"))?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS LeagueTable (
            team_id INTEGER NOT NULL REFERENCES Teams(id),
            league_id INTEGER NOT NULL REFERENCES Leagues(id),
            points INTEGER NOT NULL DEFAULT 0,
            matches_played INTEGER NOT NULL DEFAULT 0,
            goals_scored INTEGER NOT NULL DEFAULT 0,
            goals_conceded INTEGER NOT NULL DEFAULT 0,
            goal_diff INTEGER NOT NULL DEFAULT 0,
            UNIQUE (team_id, league_id)
        )",
        [],
    )
    .map_err(LeagueError::query("create LeagueTable"))?;

    Ok(())
}

/// Fresh, empty working store.
pub fn open_memory() -> Result<Connection> {
    Connection::open_in_memory().map_err(|source| LeagueError::StoreOpen {
        path: MEMORY_LABEL.into(),
        source,
    })
}

/// Open an existing durable store for reading. A missing file is an error
/// rather than a silently created empty database.
pub(crate) fn open_existing(path: &Path) -> Result<Connection> {
    Connection::open_with_flags(
        path,
        OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
    )
    .map_err(|source| LeagueError::StoreOpen {
        path: path.to_path_buf(),
        source,
    })
}

/// Open a durable store for writing, creating the file when absent.
pub(crate) fn open_or_create(path: &Path) -> Result<Connection> {
    Connection::open(path).map_err(|source| LeagueError::StoreOpen {
        path: path.to_path_buf(),
        source,
    })
}
