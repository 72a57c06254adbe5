use std::path::PathBuf;

use thiserror::Error;

/// Everything that can go wrong while loading, simulating or saving a league
/// database.
#[derive(Error, Debug)]
pub enum LeagueError {
    #[error("failed to open store at {}: {source}", .path.display())]
    StoreOpen {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },
    #[error("database copy did not complete: {detail}")]
    Copy { detail: String },
    #[error("failed to prepare {query} query: {source}")]
    QueryPrepare {
        query: &'static str,
        #[source]
        source: rusqlite::Error,
    },
    #[error("failed to bind league {league_id}: {source}")]
    Bind {
        league_id: i64,
        #[source]
        source: rusqlite::Error,
    },
    #[error("failed to run {query} query: {source}")]
    Query {
        query: &'static str,
        #[source]
        source: rusqlite::Error,
    },
    #[error("season simulation failed and was rolled back: {0}")]
    Simulation(#[source] rusqlite::Error),
    #[error("another load, save or simulation is already running")]
    Busy,
}

pub type Result<T> = std::result::Result<T, LeagueError>;

impl LeagueError {
    pub(crate) fn prepare(query: &'static str) -> impl FnOnce(rusqlite::Error) -> Self {
        move |source| LeagueError::QueryPrepare { query, source }
    }

    pub(crate) fn query(query: &'static str) -> impl FnOnce(rusqlite::Error) -> Self {
        move |source| LeagueError::Query { query, source }
    }
}
