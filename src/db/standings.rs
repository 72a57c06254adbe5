use rusqlite::{params, Connection};

use crate::db::columns::{name_column, stat_column};
use crate::error::{LeagueError, Result};
use crate::models::{MatchResult, StandingsRow, TableRow};

/// Standings of one league joined with team names, in team id order. Sorting
/// for display is the job of `table::get_table`.
pub fn fetch_standings(conn: &Connection, league_id: i64) -> Result<Vec<TableRow>> {
    let mut stmt = conn
        .prepare(
            "SELECT t.name, lt.team_id, lt.league_id, lt.points, lt.matches_played,
                    lt.goals_scored, lt.goals_conceded, lt.goal_diff
             FROM Teams t
             INNER JOIN LeagueTable lt ON t.id = lt.team_id
             WHERE lt.league_id = ?1
             ORDER BY lt.team_id",
        )
        .map_err(LeagueError::prepare("standings"))?;

    let rows = stmt
        .query_map([league_id], |row| {
            Ok(TableRow {
                team_name: name_column(row, 0)?,
                standings: StandingsRow {
                    team_id: row.get(1)?,
                    league_id: row.get(2)?,
                    points: stat_column(row, 3)?,
                    matches_played: stat_column(row, 4)?,
                    goals_scored: stat_column(row, 5)?,
                    goals_conceded: stat_column(row, 6)?,
                    goal_diff: stat_column(row, 7)?,
                },
            })
        })
        .map_err(|source| LeagueError::Bind { league_id, source })?
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(LeagueError::query("standings"))?;

    Ok(rows)
}

/// Zero every standings row of a league.
pub(crate) fn reset_league(conn: &Connection, league_id: i64) -> rusqlite::Result<usize> {
    conn.execute(
        "UPDATE LeagueTable
         SET points = 0, matches_played = 0, goals_scored = 0, goals_conceded = 0, goal_diff = 0
         WHERE league_id = ?1",
        [league_id],
    )
}

/// Fold one result into both teams' rows. `goal_diff` is recomputed from the
/// updated totals in the same statement.
pub(crate) fn apply_result(conn: &Connection, result: &MatchResult) -> rusqlite::Result<()> {
    let fixture = result.fixture;
    let (home_points, away_points) = result.points();

    let mut stmt = conn.prepare_cached(
        "UPDATE LeagueTable
         SET points = points + ?1,
             matches_played = matches_played + 1,
             goals_scored = goals_scored + ?2,
             goals_conceded = goals_conceded + ?3,
             goal_diff = (goals_scored + ?2) - (goals_conceded + ?3)
         WHERE team_id = ?4 AND league_id = ?5",
    )?;

    for (team_id, points, scored, conceded) in [
        (fixture.home_id, home_points, result.home_goals, result.away_goals),
        (fixture.away_id, away_points, result.away_goals, result.home_goals),
    ] {
        let updated = stmt.execute(params![points, scored, conceded, team_id, fixture.league_id])?;
        if updated == 0 {
            return Err(rusqlite::Error::QueryReturnedNoRows);
        }
    }

    Ok(())
}
