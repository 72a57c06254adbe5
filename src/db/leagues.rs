use rusqlite::{params, Connection, Statement};
use tracing::warn;

use crate::db::columns::name_column;
use crate::error::{LeagueError, Result};
use crate::models::{League, Team};

const TEAMS_FOR_LEAGUE_SQL: &str = "SELECT t.id, t.name
     FROM Teams t
     INNER JOIN LeagueTable lt ON t.id = lt.team_id
     WHERE lt.league_id = ?1
     ORDER BY t.id";

/// Project the store into the in-memory model: every league ordered by id,
/// each carrying its members ordered by team id.
///
/// Only a failure of the league query itself (or of preparing the member
/// query) fails the load. A league whose member query breaks is logged and
/// kept with an empty team list.
pub fn load_leagues_and_teams(conn: &Connection) -> Result<Vec<League>> {
    let mut leagues = fetch_leagues(conn)?;

    let mut teams_stmt = conn
        .prepare(TEAMS_FOR_LEAGUE_SQL)
        .map_err(LeagueError::prepare("league members"))?;

    for league in &mut leagues {
        league.teams = match query_teams(&mut teams_stmt, league.id) {
            Ok(teams) => teams,
            Err(err) => {
                warn!(league = %league.name, error = %err, "skipping members of league");
                Vec::new()
            }
        };
    }

    Ok(leagues)
}

/// Every league ordered by id, with an empty team cache.
pub fn fetch_leagues(conn: &Connection) -> Result<Vec<League>> {
    let mut stmt = conn
        .prepare("SELECT id, name FROM Leagues ORDER BY id")
        .map_err(LeagueError::prepare("leagues"))?;

    let leagues = stmt
        .query_map([], |row| {
            Ok(League {
                id: row.get(0)?,
                name: name_column(row, 1)?,
                teams: Vec::new(),
            })
        })
        .map_err(LeagueError::query("leagues"))?
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(LeagueError::query("leagues"))?;

    Ok(leagues)
}

/// Members of one league, ordered by team id.
pub fn fetch_teams_for_league(conn: &Connection, league_id: i64) -> Result<Vec<Team>> {
    let mut stmt = conn
        .prepare(TEAMS_FOR_LEAGUE_SQL)
        .map_err(LeagueError::prepare("league members"))?;
    query_teams(&mut stmt, league_id)
}

fn query_teams(stmt: &mut Statement<'_>, league_id: i64) -> Result<Vec<Team>> {
    stmt.query_map([league_id], |row| {
        Ok(Team {
            id: row.get(0)?,
            name: name_column(row, 1)?,
        })
    })
    .map_err(|source| LeagueError::Bind { league_id, source })?
    .collect::<std::result::Result<Vec<_>, _>>()
    .map_err(LeagueError::query("league members"))
}

/// Insert a new league, returning it with an empty team cache.
pub fn create_league(conn: &Connection, name: &str) -> Result<League> {
    conn.execute("INSERT INTO Leagues (name) VALUES (?1)", params![name])
        .map_err(LeagueError::query("insert league"))?;

    Ok(League {
        id: conn.last_insert_rowid(),
        name: name.to_string(),
        teams: Vec::new(),
    })
}

/// Insert a new team. It belongs to no league until `enroll_team` links it.
pub fn create_team(conn: &Connection, name: &str) -> Result<Team> {
    conn.execute("INSERT INTO Teams (name) VALUES (?1)", params![name])
        .map_err(LeagueError::query("insert team"))?;

    Ok(Team {
        id: conn.last_insert_rowid(),
        name: name.to_string(),
    })
}

/// Make a team a member of a league by giving it a zeroed standings row.
/// Enrolling twice is a no-op.
pub fn enroll_team(conn: &Connection, league_id: i64, team_id: i64) -> Result<()> {
    conn.execute(
        "INSERT OR IGNORE INTO LeagueTable
             (team_id, league_id, points, matches_played, goals_scored, goals_conceded, goal_diff)
         VALUES (?1, ?2, 0, 0, 0, 0, 0)",
        params![team_id, league_id],
    )
    .map_err(LeagueError::query("enroll team"))?;
    Ok(())
}
