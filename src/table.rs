//! League table ordering for display.

use std::cmp::Ordering;

use rusqlite::Connection;

use crate::db::fetch_standings;
use crate::error::Result;
use crate::models::{League, TableRow};

/// Current standings of `league`, best first. A league without members yields
/// an empty table.
pub fn get_table(conn: &Connection, league: &League) -> Result<Vec<TableRow>> {
    let mut rows = fetch_standings(conn, league.id)?;
    sort_standings(&mut rows);
    Ok(rows)
}

/// Points, then goal difference, then goals scored, all descending; remaining
/// ties fall back to team name and finally team id so the order is total.
pub fn sort_standings(rows: &mut [TableRow]) {
    rows.sort_by(compare_rows);
}

fn compare_rows(a: &TableRow, b: &TableRow) -> Ordering {
    let (sa, sb) = (&a.standings, &b.standings);
    sb.points
        .cmp(&sa.points)
        .then_with(|| sb.goal_diff.cmp(&sa.goal_diff))
        .then_with(|| sb.goals_scored.cmp(&sa.goals_scored))
        .then_with(|| a.team_name.cmp(&b.team_name))
        .then_with(|| sa.team_id.cmp(&sb.team_id))
}
