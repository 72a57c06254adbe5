//! Domain models that mirror the SQLite schema and get passed between the
//! persistence layer, the simulator and whatever front end renders the tables.
//! They stay plain data holders; every query lives in `db`.

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
/// A club. Identity is the id; the name is display-only and may repeat.
pub struct Team {
    /// Primary key from the `Teams` table.
    pub id: i64,
    pub name: String,
}

impl fmt::Display for Team {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// A league together with a read cache of its members.
///
/// Membership is not stored on the league itself: a team belongs to a league
/// exactly when a `LeagueTable` row links the two. `teams` is rebuilt from
/// that join after every load and every simulation, ordered by team id.
pub struct League {
    pub id: i64,
    pub name: String,
    pub teams: Vec<Team>,
}

impl fmt::Display for League {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
/// One `LeagueTable` record: a team's season aggregate inside one league.
pub struct StandingsRow {
    pub team_id: i64,
    pub league_id: i64,
    pub points: i64,
    pub matches_played: i64,
    pub goals_scored: i64,
    pub goals_conceded: i64,
    /// Always `goals_scored - goals_conceded` once a simulation pass finishes.
    pub goal_diff: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// A standings row joined with the team name, ready for display.
pub struct TableRow {
    pub team_name: String,
    pub standings: StandingsRow,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// One scheduled match between an ordered (home, away) pair.
pub struct Fixture {
    pub league_id: i64,
    pub home_id: i64,
    pub away_id: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Final score of a played fixture.
pub struct MatchResult {
    pub fixture: Fixture,
    pub home_goals: i64,
    pub away_goals: i64,
}

/// Points for a win.
pub const WIN_POINTS: i64 = 3;
/// Points for a draw.
pub const DRAW_POINTS: i64 = 1;

impl MatchResult {
    /// Points awarded as `(home, away)`.
    pub fn points(&self) -> (i64, i64) {
        use std::cmp::Ordering;

        match self.home_goals.cmp(&self.away_goals) {
            Ordering::Greater => (WIN_POINTS, 0),
            Ordering::Less => (0, WIN_POINTS),
            Ordering::Equal => (DRAW_POINTS, DRAW_POINTS),
        }
    }
}
