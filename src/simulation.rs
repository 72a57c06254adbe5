//! Naive double round-robin season simulation.
//!
//! Every ordered pair of distinct members plays once, so each pairing is
//! played home and away. Scores are drawn uniformly from 0..=3 goals per side.
//! Fixture order follows the cached team order, which is what makes a seeded
//! run reproducible.

use std::time::{SystemTime, UNIX_EPOCH};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rusqlite::Connection;
use tracing::{debug, info};

use crate::db::{apply_result, load_leagues_and_teams, reset_league};
use crate::error::{LeagueError, Result};
use crate::models::{Fixture, League, MatchResult};

/// Most goals a side can score in one simulated match.
pub const MAX_GOALS: i64 = 3;

/// Seeded generator for season draws, plus the seed actually used. Without an
/// explicit seed the wall clock is used; the seed is logged either way so a
/// run can be replayed.
pub fn season_rng(seed: Option<u64>) -> (StdRng, u64) {
    let seed = seed.unwrap_or_else(clock_seed);
    info!(seed, "seeded season generator");
    (StdRng::seed_from_u64(seed), seed)
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_nanos() as u64)
        .unwrap_or_default()
}

/// All fixtures of a league: every member hosts every other member once.
pub fn generate_fixtures(league: &League) -> Vec<Fixture> {
    let teams = &league.teams;
    let mut fixtures = Vec::with_capacity(teams.len() * teams.len().saturating_sub(1));

    for (i, home) in teams.iter().enumerate() {
        for (j, away) in teams.iter().enumerate() {
            if i == j {
                continue;
            }
            fixtures.push(Fixture {
                league_id: league.id,
                home_id: home.id,
                away_id: away.id,
            });
        }
    }

    fixtures
}

/// Draw a score for one fixture. Home goals are drawn before away goals.
pub fn play_fixture<R: Rng + ?Sized>(rng: &mut R, fixture: Fixture) -> MatchResult {
    let home_goals = rng.gen_range(0..=MAX_GOALS);
    let away_goals = rng.gen_range(0..=MAX_GOALS);
    MatchResult {
        fixture,
        home_goals,
        away_goals,
    }
}

/// Replay a full season for every league and return the reloaded leagues.
///
/// Each league is reset to zero before its fixtures are folded in, so seasons
/// never accumulate. The whole run is one transaction: the first failed
/// statement rolls back every league and surfaces `LeagueError::Simulation`.
/// The league cache is rebuilt before the commit, so a failed reload rolls the
/// season back too and the store never gets ahead of the returned leagues.
pub fn simulate_season<R: Rng + ?Sized>(
    conn: &mut Connection,
    leagues: &[League],
    rng: &mut R,
) -> Result<Vec<League>> {
    let tx = conn.transaction().map_err(LeagueError::Simulation)?;
    let mut played = 0usize;

    for league in leagues {
        reset_league(&tx, league.id).map_err(LeagueError::Simulation)?;

        for fixture in generate_fixtures(league) {
            let result = play_fixture(rng, fixture);
            debug!(
                league = league.id,
                home = fixture.home_id,
                away = fixture.away_id,
                score = %format!("{}-{}", result.home_goals, result.away_goals),
                "fixture played"
            );
            apply_result(&tx, &result).map_err(LeagueError::Simulation)?;
            played += 1;
        }
    }

    let reloaded = load_leagues_and_teams(&tx)?;
    tx.commit().map_err(LeagueError::Simulation)?;
    info!(leagues = leagues.len(), fixtures = played, "season simulated");

    Ok(reloaded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{
        create_league, create_team, enroll_team, ensure_schema, fetch_standings, open_memory,
    };
    use crate::models::Team;

    fn league_of(size: i64) -> League {
        League {
            id: 1,
            name: "Test".into(),
            teams: (1..=size)
                .map(|id| Team {
                    id,
                    name: format!("T{id}"),
                })
                .collect(),
        }
    }

    fn store_with(sizes: &[usize]) -> (Connection, Vec<League>) {
        let conn = open_memory().unwrap();
        ensure_schema(&conn).unwrap();
        for (n, size) in sizes.iter().enumerate() {
            let league = create_league(&conn, &format!("L{n}")).unwrap();
            for t in 0..*size {
                let team = create_team(&conn, &format!("L{n}T{t}")).unwrap();
                enroll_team(&conn, league.id, team.id).unwrap();
            }
        }
        let leagues = load_leagues_and_teams(&conn).unwrap();
        (conn, leagues)
    }

    #[test]
    fn two_teams_play_home_and_away() {
        let fixtures = generate_fixtures(&league_of(2));
        let pairs: Vec<_> = fixtures.iter().map(|f| (f.home_id, f.away_id)).collect();
        assert_eq!(pairs, [(1, 2), (2, 1)]);
    }

    #[test]
    fn fixture_count_is_n_times_n_minus_one() {
        for size in 0..6 {
            let n = size as usize;
            assert_eq!(generate_fixtures(&league_of(size)).len(), n * n.saturating_sub(1));
        }
    }

    #[test]
    fn no_team_plays_itself() {
        assert!(generate_fixtures(&league_of(5))
            .iter()
            .all(|f| f.home_id != f.away_id));
    }

    #[test]
    fn scores_stay_within_range() {
        let (mut rng, _) = season_rng(Some(11));
        let fixture = generate_fixtures(&league_of(2))[0];
        for _ in 0..500 {
            let result = play_fixture(&mut rng, fixture);
            assert!((0..=MAX_GOALS).contains(&result.home_goals));
            assert!((0..=MAX_GOALS).contains(&result.away_goals));
        }
    }

    #[test]
    fn everyone_plays_twice_against_each_opponent() {
        let (mut conn, leagues) = store_with(&[4, 2, 0]);
        let (mut rng, _) = season_rng(Some(3));

        let reloaded = simulate_season(&mut conn, &leagues, &mut rng).unwrap();
        assert_eq!(reloaded, leagues);

        for league in &reloaded {
            let expected = 2 * (league.teams.len() as i64 - 1);
            for row in fetch_standings(&conn, league.id).unwrap() {
                let s = row.standings;
                assert_eq!(s.matches_played, expected);
                assert_eq!(s.goal_diff, s.goals_scored - s.goals_conceded);
            }
        }
    }

    #[test]
    fn two_team_league_always_hands_out_four_points() {
        let (mut conn, leagues) = store_with(&[2]);
        for seed in 0..20 {
            let (mut rng, _) = season_rng(Some(seed));
            simulate_season(&mut conn, &leagues, &mut rng).unwrap();
            let total: i64 = fetch_standings(&conn, leagues[0].id)
                .unwrap()
                .iter()
                .map(|row| row.standings.points)
                .sum();
            assert_eq!(total, 4, "seed {seed}");
        }
    }

    #[test]
    fn seasons_do_not_accumulate() {
        let (mut conn, leagues) = store_with(&[3]);
        let (mut rng, _) = season_rng(Some(5));
        simulate_season(&mut conn, &leagues, &mut rng).unwrap();
        simulate_season(&mut conn, &leagues, &mut rng).unwrap();

        for row in fetch_standings(&conn, leagues[0].id).unwrap() {
            assert_eq!(row.standings.matches_played, 4);
        }
    }

    #[test]
    fn same_seed_same_standings() {
        let (mut conn, leagues) = store_with(&[5, 3]);

        let (mut rng, _) = season_rng(Some(2024));
        simulate_season(&mut conn, &leagues, &mut rng).unwrap();
        let first: Vec<_> = leagues
            .iter()
            .map(|l| fetch_standings(&conn, l.id).unwrap())
            .collect();

        let (mut rng, _) = season_rng(Some(2024));
        simulate_season(&mut conn, &leagues, &mut rng).unwrap();
        let second: Vec<_> = leagues
            .iter()
            .map(|l| fetch_standings(&conn, l.id).unwrap())
            .collect();

        assert_eq!(first, second);
    }

    #[test]
    fn failed_reload_rolls_the_season_back() {
        let mut conn = open_memory().unwrap();
        conn.execute_batch(
            "CREATE TABLE Leagues (id, name);
             INSERT INTO Leagues VALUES (1, 'Good');",
        )
        .unwrap();
        ensure_schema(&conn).unwrap();
        for name in ["A", "B", "C"] {
            let team = create_team(&conn, name).unwrap();
            enroll_team(&conn, 1, team.id).unwrap();
        }
        let leagues = load_leagues_and_teams(&conn).unwrap();

        // Sorts after every integer id and cannot be read back as one.
        conn.execute("INSERT INTO Leagues VALUES ('bad', 'Broken')", [])
            .unwrap();

        let (mut rng, _) = season_rng(Some(6));
        let err = simulate_season(&mut conn, &leagues, &mut rng).unwrap_err();
        assert!(matches!(err, LeagueError::Query { .. }), "{err:?}");

        for row in fetch_standings(&conn, 1).unwrap() {
            assert_eq!(row.standings.matches_played, 0);
            assert_eq!(row.standings.points, 0);
        }
    }

    #[test]
    fn failure_rolls_back_every_league() {
        let (mut conn, mut leagues) = store_with(&[2, 2]);
        let (mut rng, _) = season_rng(Some(9));
        simulate_season(&mut conn, &leagues, &mut rng).unwrap();
        let before: Vec<_> = leagues
            .iter()
            .map(|l| fetch_standings(&conn, l.id).unwrap())
            .collect();

        // A stale cache naming a team with no standings row in the second league.
        leagues[1].teams.push(Team {
            id: 999,
            name: "Ghost".into(),
        });
        let err = simulate_season(&mut conn, &leagues, &mut rng).unwrap_err();
        assert!(matches!(err, LeagueError::Simulation(_)), "{err:?}");

        let after: Vec<_> = leagues
            .iter()
            .map(|l| fetch_standings(&conn, l.id).unwrap())
            .collect();
        assert_eq!(before, after);
    }
}
