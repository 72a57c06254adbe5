//! The operations a front end drives: open a database, simulate, read tables,
//! save and load.
//!
//! `Workspace` is the working store plus its league cache and is usable on
//! its own when the caller already owns it exclusively. `Session` wraps one
//! workspace for front ends that hand out shared references (UI callbacks and
//! the like) and turns overlapping operations into `LeagueError::Busy`.

use std::cell::{Ref, RefCell, RefMut};
use std::path::Path;

use rand::rngs::StdRng;
use rand::Rng;
use rusqlite::Connection;
use tracing::info;

use crate::config::Settings;
use crate::db::{load_leagues_and_teams, open_working_copy, save_working_copy};
use crate::error::{LeagueError, Result};
use crate::models::{League, TableRow};
use crate::simulation::{season_rng, simulate_season};
use crate::table::get_table;

/// In-memory working store together with the leagues cached from it.
pub struct Workspace {
    conn: Connection,
    leagues: Vec<League>,
}

impl Workspace {
    /// Copy the database at `path` into a new working store and cache its
    /// leagues. Nothing is returned unless both steps succeed.
    pub fn open(path: &Path) -> Result<Self> {
        let conn = open_working_copy(path)?;
        Self::from_connection(conn)
    }

    /// Adopt an already populated working store.
    pub fn from_connection(conn: Connection) -> Result<Self> {
        let leagues = load_leagues_and_teams(&conn)?;
        info!(leagues = leagues.len(), "league cache rebuilt");
        Ok(Self { conn, leagues })
    }

    /// Cached leagues, rebuilt after every load and simulation.
    pub fn leagues(&self) -> &[League] {
        &self.leagues
    }

    /// Read access to the working store for queries the workspace does not
    /// wrap itself.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Simulate a season for every cached league and refresh the cache.
    pub fn simulate<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<&[League]> {
        self.leagues = simulate_season(&mut self.conn, &self.leagues, rng)?;
        Ok(&self.leagues)
    }

    /// Sorted standings for one league, read straight from the working store.
    pub fn table(&self, league: &League) -> Result<Vec<TableRow>> {
        get_table(&self.conn, league)
    }

    /// Write a full copy of the working store to `path`.
    pub fn save(&self, path: &Path) -> Result<()> {
        save_working_copy(&self.conn, path)
    }
}

/// Single-owner session over one active workspace.
pub struct Session {
    workspace: RefCell<Workspace>,
    rng: RefCell<StdRng>,
    seed: u64,
}

impl Session {
    /// Load `settings.db_path` and seed the season generator once for the
    /// lifetime of the session.
    pub fn initialize(settings: &Settings) -> Result<Self> {
        let workspace = Workspace::open(&settings.db_path)?;
        Ok(Self::with_workspace(workspace, settings.seed))
    }

    /// Wrap an existing workspace. The seed behaves as in `Settings::seed`.
    pub fn with_workspace(workspace: Workspace, seed: Option<u64>) -> Self {
        let (rng, seed) = season_rng(seed);
        Self {
            workspace: RefCell::new(workspace),
            rng: RefCell::new(rng),
            seed,
        }
    }

    /// Seed the season generator was started from.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Snapshot of the cached leagues, so the caller holds no borrow.
    pub fn leagues(&self) -> Result<Vec<League>> {
        Ok(self.shared()?.leagues().to_vec())
    }

    /// Run one season for every league with the session's generator and
    /// return the refreshed leagues.
    pub fn simulate_all_leagues(&self) -> Result<Vec<League>> {
        let mut workspace = self.exclusive()?;
        let mut rng = self.rng.try_borrow_mut().map_err(|_| LeagueError::Busy)?;
        let leagues = workspace.simulate(&mut *rng)?;
        Ok(leagues.to_vec())
    }

    /// Sorted standings for `league`; empty when the league has no members.
    pub fn get_table(&self, league: &League) -> Result<Vec<TableRow>> {
        self.shared()?.table(league)
    }

    /// Save the working store to `path`, overwriting whatever is there.
    pub fn save(&self, path: &Path) -> Result<()> {
        self.exclusive()?.save(path)
    }

    /// Replace the working store with a copy of `path`. The new store is built
    /// off to the side and only swapped in once it is complete; on failure the
    /// current workspace stays active.
    pub fn load(&self, path: &Path) -> Result<Vec<League>> {
        let mut workspace = self.exclusive()?;
        let candidate = Workspace::open(path)?;
        *workspace = candidate;
        Ok(workspace.leagues().to_vec())
    }

    fn shared(&self) -> Result<Ref<'_, Workspace>> {
        self.workspace.try_borrow().map_err(|_| LeagueError::Busy)
    }

    fn exclusive(&self) -> Result<RefMut<'_, Workspace>> {
        self.workspace.try_borrow_mut().map_err(|_| LeagueError::Busy)
    }
}
