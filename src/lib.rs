//! Core library for the league simulator: load a league database into an
//! in-memory working copy, replay seasons into its standings, and save the
//! result back to disk.
//!
//! Rendering is left to whatever front end sits on top; everything here takes
//! the store and the league list explicitly.
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod session;
pub mod simulation;
pub mod table;

pub use config::Settings;
pub use error::{LeagueError, Result};

/// Domain types shared by every layer.
pub use models::{Fixture, League, MatchResult, StandingsRow, TableRow, Team};

pub use session::{Session, Workspace};
pub use simulation::{generate_fixtures, season_rng, simulate_season};
pub use table::get_table;
