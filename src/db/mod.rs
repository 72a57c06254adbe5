//! Persistence module split across logical submodules.

mod columns;
mod connection;
mod leagues;
mod snapshot;
mod standings;

pub use connection::{ensure_schema, open_memory};
pub use leagues::{
    create_league, create_team, enroll_team, fetch_leagues, fetch_teams_for_league,
    load_leagues_and_teams,
};
pub use snapshot::{copy_database, open_working_copy, save_working_copy};
pub use standings::fetch_standings;
pub(crate) use standings::{apply_result, reset_league};
